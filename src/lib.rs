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

//! # Bank Demo
//!
//! This library models an in-memory bank of customers and accounts and
//! answers filter, aggregate and join queries over them (totals, maxima,
//! counts grouped by ZIP code, owner lookups).
//!
//! ## Core Components
//!
//! - [`Bank`]: Ordered customer and account maps plus the query operations
//! - [`Customer`]: Customer number and ZIP code
//! - [`BankAccount`]: Account number, owning customer number and balance
//! - [`BankError`]: Errors raised by queries that cannot produce a result
//! - [`sample`]: Deterministic sample data
//! - [`Report`]: Results of every query, ready to print or serialize
//!
//! ## Example
//!
//! ```
//! use bank_demo_rs::{Bank, BankAccount, Customer, ZipCode};
//! use rust_decimal_macros::dec;
//!
//! let bank = Bank::new("Example");
//! bank.register_customer(Customer::new("C00", ZipCode(12222)));
//! bank.register_account(BankAccount::new("A00", "C00", dec!(250.00)));
//!
//! assert_eq!(bank.query_zip_code("A00"), Some(ZipCode(12222)));
//! assert_eq!(bank.query_total_account_balance(), Ok(dec!(250.00)));
//! assert_eq!(bank.query_zip_code("A01"), None);
//! ```
//!
//! ## Thread Safety
//!
//! [`Bank`] is `Send + Sync`. Registration and queries may be called from
//! multiple threads through a shared reference.

pub mod account;
mod bank;
mod base;
pub mod customer;
pub mod error;
pub mod report;
pub mod sample;

pub use account::BankAccount;
pub use bank::Bank;
pub use base::{AccountNumber, CustomerNumber, ZipCode};
pub use customer::Customer;
pub use error::BankError;
pub use report::{Report, ReportOptions};
