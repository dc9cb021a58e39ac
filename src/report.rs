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

//! Query report.
//!
//! [`Report::collect`] runs every bank query once and keeps the results, in
//! the order a reader walks through them. Rendering is left to the caller.

use crate::account::BankAccount;
use crate::bank::Bank;
use crate::base::{AccountNumber, ZipCode};
use crate::customer::Customer;
use crate::error::BankError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::debug;

/// Parameters of the queries that take an argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Balance threshold for [`Bank::query_bank_accounts`].
    pub threshold: Decimal,
    /// Account numbers passed to [`Bank::query_zip_code`].
    pub lookups: Vec<AccountNumber>,
    /// ZIP codes passed to [`Bank::query_customers`].
    pub zip_codes: Vec<ZipCode>,
}

impl ReportOptions {
    pub const DEFAULT_THRESHOLD: Decimal = dec!(10000);
    pub const DEFAULT_LOOKUPS: [&'static str; 3] = ["A10", "A11", "A15"];
    pub const DEFAULT_ZIP_CODES: [ZipCode; 2] = [ZipCode(12222), ZipCode(12225)];
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
            lookups: Self::DEFAULT_LOOKUPS.map(AccountNumber::from).to_vec(),
            zip_codes: Self::DEFAULT_ZIP_CODES.to_vec(),
        }
    }
}

/// Owner ZIP code looked up for one account number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZipCodeLookup {
    pub account_number: AccountNumber,
    pub zip_code: Option<ZipCode>,
}

/// Customers living in one ZIP code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZipCodeCustomers {
    pub zip_code: ZipCode,
    pub customers: Vec<Customer>,
}

/// Results of every bank query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub bank: String,
    pub customers: Vec<Customer>,
    pub accounts: Vec<BankAccount>,
    pub threshold: Decimal,
    pub accounts_above_threshold: Vec<BankAccount>,
    pub zip_code_lookups: Vec<ZipCodeLookup>,
    pub account_zip_codes: Vec<(AccountNumber, ZipCode)>,
    pub total_balance: Decimal,
    pub maximum_balance: Decimal,
    pub customers_per_zip_code: Vec<(ZipCode, usize)>,
    pub customers_by_zip_code: Vec<ZipCodeCustomers>,
    pub accounts_per_zip_code: Vec<(ZipCode, usize)>,
    pub max_balance_accounts: Vec<BankAccount>,
}

impl Report {
    /// Runs every query against `bank`.
    ///
    /// # Errors
    ///
    /// - [`BankError::NoAccounts`] - The bank has no accounts.
    /// - [`BankError::BalanceOverflow`] - The total balance overflows.
    /// - [`BankError::MissingCustomer`] - An account's owner is not registered.
    pub fn collect(bank: &Bank, options: &ReportOptions) -> Result<Self, BankError> {
        debug!(bank = bank.name(), ?options, "collecting report");

        let zip_code_lookups = options
            .lookups
            .iter()
            .map(|account_number| ZipCodeLookup {
                account_number: account_number.clone(),
                zip_code: bank.query_zip_code(account_number.as_str()),
            })
            .collect();

        let customers_by_zip_code = options
            .zip_codes
            .iter()
            .map(|&zip_code| ZipCodeCustomers {
                zip_code,
                customers: bank.query_customers(zip_code),
            })
            .collect();

        Ok(Report {
            bank: bank.name().to_owned(),
            customers: bank.customers(),
            accounts: bank.accounts(),
            threshold: options.threshold,
            accounts_above_threshold: bank.query_bank_accounts(options.threshold),
            zip_code_lookups,
            account_zip_codes: bank.query_account_number_zip_code()?,
            total_balance: bank.query_total_account_balance()?,
            maximum_balance: bank.query_maximum_account_balance()?,
            customers_per_zip_code: bank.query_zip_code_customers(),
            customers_by_zip_code,
            accounts_per_zip_code: bank.query_zip_code_accounts()?,
            max_balance_accounts: bank.query_max_balance_bank_accounts()?,
        })
    }
}
