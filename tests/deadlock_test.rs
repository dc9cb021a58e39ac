// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Deadlock detection tests using parking_lot's built-in deadlock detector.
//!
//! Writers register customers and accounts while readers run every query
//! against the same bank. The detector thread fails the test if the lock
//! graph ever contains a cycle.

use bank_demo_rs::{Bank, BankAccount, BankError, Customer, ZipCode};
use parking_lot::deadlock;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

const WRITERS: usize = 4;
const READERS: usize = 4;
const REGISTRATIONS_PER_WRITER: usize = 500;

/// Spawns a detector that records whether any deadlock was observed.
fn spawn_detector(stop: Arc<AtomicBool>, found: Arc<AtomicBool>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            thread::sleep(Duration::from_millis(10));
            let deadlocks = deadlock::check_deadlock();
            if !deadlocks.is_empty() {
                for (i, threads) in deadlocks.iter().enumerate() {
                    eprintln!("Deadlock #{i}");
                    for t in threads {
                        eprintln!("Thread Id {:#?}\n{:#?}", t.thread_id(), t.backtrace());
                    }
                }
                found.store(true, Ordering::SeqCst);
                return;
            }
        }
    })
}

#[test]
fn concurrent_registration_and_queries() {
    let bank = Arc::new(Bank::new("Shared"));
    let stop = Arc::new(AtomicBool::new(false));
    let found = Arc::new(AtomicBool::new(false));
    let detector = spawn_detector(Arc::clone(&stop), Arc::clone(&found));

    let writers: Vec<_> = (0..WRITERS)
        .map(|w| {
            let bank = Arc::clone(&bank);
            thread::spawn(move || {
                for i in 0..REGISTRATIONS_PER_WRITER {
                    let customer = format!("C{w}-{i:04}");
                    bank.register_customer(Customer::new(
                        customer.as_str(),
                        ZipCode(12222 + (i % 4) as i32),
                    ));
                    bank.register_account(BankAccount::new(
                        format!("A{w}-{i:04}"),
                        customer.as_str(),
                        Decimal::from(i),
                    ));
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..READERS)
        .map(|_| {
            let bank = Arc::clone(&bank);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    let _ = bank.query_bank_accounts(Decimal::from(100));
                    let _ = bank.query_total_account_balance();
                    let _ = bank.query_zip_code_customers();
                    let _ = bank.query_customers(ZipCode(12223));
                    let _ = bank.query_max_balance_bank_accounts();
                    let _ = bank.query_zip_code("A0-0001");
                    // Customers are registered before their accounts, so the
                    // joins never see a dangling reference
                    match bank.query_zip_code_accounts() {
                        Ok(_) => {}
                        Err(e @ BankError::MissingCustomer { .. }) => panic!("{e}"),
                        Err(e) => panic!("unexpected error: {e}"),
                    }
                    bank.query_account_number_zip_code().unwrap();
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().unwrap();
    }
    stop.store(true, Ordering::Relaxed);
    for reader in readers {
        reader.join().unwrap();
    }
    detector.join().unwrap();

    assert!(!found.load(Ordering::SeqCst), "deadlock detected");
    assert_eq!(bank.customer_count(), WRITERS * REGISTRATIONS_PER_WRITER);
    assert_eq!(bank.account_count(), WRITERS * REGISTRATIONS_PER_WRITER);
    let total: usize = bank
        .query_zip_code_accounts()
        .unwrap()
        .iter()
        .map(|(_, count)| count)
        .sum();
    assert_eq!(total, WRITERS * REGISTRATIONS_PER_WRITER);
}

#[test]
fn maximum_filter_sees_one_snapshot() {
    let bank = Arc::new(Bank::new("Shared"));
    bank.register_account(BankAccount::new("S-0", "C0", Decimal::ZERO));
    let next_balance = Arc::new(AtomicU64::new(1));
    let writers_done = Arc::new(AtomicBool::new(false));

    // Each step registers a pair of accounts tied at a balance above every
    // earlier one, so the maximum keeps moving while readers query
    let writers: Vec<_> = (0..WRITERS)
        .map(|w| {
            let bank = Arc::clone(&bank);
            let next_balance = Arc::clone(&next_balance);
            thread::spawn(move || {
                for i in 0..REGISTRATIONS_PER_WRITER {
                    let balance = Decimal::from(next_balance.fetch_add(1, Ordering::SeqCst));
                    for copy in 0..2 {
                        bank.register_account(BankAccount::new(
                            format!("A{w}-{i:04}-{copy}"),
                            "C0",
                            balance,
                        ));
                    }
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..READERS)
        .map(|_| {
            let bank = Arc::clone(&bank);
            let writers_done = Arc::clone(&writers_done);
            thread::spawn(move || {
                let mut observed = 0usize;
                while !writers_done.load(Ordering::Relaxed) || observed == 0 {
                    let accounts = bank.query_max_balance_bank_accounts().unwrap();
                    assert!(!accounts.is_empty());
                    let top = accounts[0].balance();
                    assert!(
                        accounts.iter().all(|a| a.balance() == top),
                        "maximum filter mixed balances: {accounts:?}"
                    );
                    observed += 1;
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().unwrap();
    }
    writers_done.store(true, Ordering::Relaxed);
    for reader in readers {
        reader.join().unwrap();
    }

    let last = Decimal::from(next_balance.load(Ordering::SeqCst) - 1);
    let accounts = bank.query_max_balance_bank_accounts().unwrap();
    assert_eq!(accounts.len(), 2);
    assert!(accounts.iter().all(|a| a.balance() == last));
}
