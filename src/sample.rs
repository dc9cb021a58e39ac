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

//! Deterministic sample data.
//!
//! For `n` customers the generator produces:
//!
//! - customers `C0..C{n-1}`, ZIP codes cycling through [`ZIP_CODES`];
//! - accounts `A{2i}` and `A{2i+1}` owned by customer `i`, balances cycling
//!   through [`BALANCES`] by account index;
//! - one extra account `A{2n}` owned by the last customer.
//!
//! Numbers are zero-padded to the digit count of `2n`.

use crate::account::BankAccount;
use crate::bank::Bank;
use crate::base::ZipCode;
use crate::customer::Customer;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

/// Balances assigned to accounts, indexed by account index modulo 3.
pub const BALANCES: [Decimal; 3] = [dec!(1000.0), dec!(10000.0), dec!(100000.0)];

/// ZIP codes assigned to customers, indexed by customer index modulo 4.
pub const ZIP_CODES: [ZipCode; 4] = [
    ZipCode(12222),
    ZipCode(12223),
    ZipCode(12224),
    ZipCode(12225),
];

/// Number of digits needed to print `2 * customers`, i.e. `ceil(log10(2n))`.
fn number_width(customers: usize) -> usize {
    let limit = customers.saturating_mul(2);
    let mut width = 0;
    let mut power = 1usize;
    while power < limit {
        width += 1;
        match power.checked_mul(10) {
            Some(next) => power = next,
            None => break,
        }
    }
    width
}

/// Generates `customers` customers and `2 * customers + 1` accounts.
///
/// Each customer is handed to `on_customer` before its accounts are handed
/// to `on_account`. Generates nothing when `customers` is zero.
pub fn generate<C, A>(customers: usize, mut on_customer: C, mut on_account: A)
where
    C: FnMut(Customer),
    A: FnMut(BankAccount),
{
    let width = number_width(customers);
    let account = |index: usize, owner: &str| {
        BankAccount::new(
            format!("A{index:0width$}"),
            owner,
            BALANCES[index % BALANCES.len()],
        )
    };

    for i in 0..customers {
        let customer_number = format!("C{i:0width$}");
        on_customer(Customer::new(
            customer_number.as_str(),
            ZIP_CODES[i % ZIP_CODES.len()],
        ));
        on_account(account(2 * i, &customer_number));
        on_account(account(2 * i + 1, &customer_number));
        if i == customers - 1 {
            on_account(account(2 * i + 2, &customer_number));
        }
    }
}

/// Registers the sample data for `customers` customers with `bank`.
pub fn populate(bank: &Bank, customers: usize) {
    debug!(bank = bank.name(), customers, "populating sample data");
    generate(
        customers,
        |customer| {
            bank.register_customer(customer);
        },
        |account| {
            bank.register_account(account);
        },
    );
}

impl Bank {
    /// Creates a bank populated with the sample data for `customers` customers.
    ///
    /// # Example
    ///
    /// ```
    /// use bank_demo_rs::Bank;
    ///
    /// let bank = Bank::sample("Sample", 10);
    /// assert_eq!(bank.customer_count(), 10);
    /// assert_eq!(bank.account_count(), 21);
    /// ```
    pub fn sample(name: impl Into<String>, customers: usize) -> Self {
        let bank = Bank::new(name);
        populate(&bank, customers);
        bank
    }
}
