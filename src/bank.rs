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

//! The bank and its queries.
//!
//! A [`Bank`] holds customers and accounts in maps ordered by their numbers
//! and answers filter, aggregate and join queries over them.
//!
//! # Queries
//!
//! | Query | Result |
//! |-------|--------|
//! | [`query_bank_accounts`](Bank::query_bank_accounts) | Accounts with a balance above a threshold |
//! | [`query_total_account_balance`](Bank::query_total_account_balance) | Sum of all balances |
//! | [`query_maximum_account_balance`](Bank::query_maximum_account_balance) | Largest balance |
//! | [`query_zip_code`](Bank::query_zip_code) | ZIP code of an account's owner, if known |
//! | [`query_account_number_zip_code`](Bank::query_account_number_zip_code) | Owner ZIP code for every account |
//! | [`query_zip_code_customers`](Bank::query_zip_code_customers) | Customer count per ZIP code |
//! | [`query_customers`](Bank::query_customers) | Customers living in a ZIP code |
//! | [`query_zip_code_accounts`](Bank::query_zip_code_accounts) | Account count per owner ZIP code |
//! | [`query_max_balance_bank_accounts`](Bank::query_max_balance_bank_accounts) | Every account holding the largest balance |
//!
//! Every query materializes its result into an owned, ordered collection.
//! Accounts and customers come out in ascending number order, grouped
//! results in ascending ZIP code order.
//!
//! # Thread Safety
//!
//! Both maps sit behind one [`RwLock`]. Registration takes the write lock,
//! queries take the read lock only while building their result.

use crate::account::BankAccount;
use crate::base::{AccountNumber, CustomerNumber, ZipCode};
use crate::customer::Customer;
use crate::error::BankError;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct BankData {
    customers: BTreeMap<CustomerNumber, Customer>,
    accounts: BTreeMap<AccountNumber, BankAccount>,
}

impl BankData {
    fn max_balance(&self) -> Result<Decimal, BankError> {
        self.accounts
            .values()
            .map(BankAccount::balance)
            .max()
            .ok_or(BankError::NoAccounts)
    }

    /// Resolves the owner of `account`, failing if it was never registered.
    fn owner_of(&self, account: &BankAccount) -> Result<&Customer, BankError> {
        self.customers.get(account.customer_number()).ok_or_else(|| {
            warn!(
                account = %account.account_number(),
                customer = %account.customer_number(),
                "account references unregistered customer"
            );
            BankError::MissingCustomer {
                account_number: account.account_number().clone(),
                customer_number: account.customer_number().clone(),
            }
        })
    }
}

/// An in-memory bank of customers and their accounts.
///
/// # Invariants
///
/// - Customers are keyed by customer number, accounts by account number.
///   Registering an existing number replaces the previous entry.
/// - Entities are never mutated or removed once registered.
/// - An account's customer number need not name a registered customer.
#[derive(Debug)]
pub struct Bank {
    name: String,
    inner: RwLock<BankData>,
}

impl Bank {
    /// Creates an empty bank.
    pub fn new(name: impl Into<String>) -> Self {
        Bank {
            name: name.into(),
            inner: RwLock::new(BankData::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a customer, returning the customer it replaced, if any.
    pub fn register_customer(&self, customer: Customer) -> Option<Customer> {
        let number = customer.customer_number().clone();
        let replaced = self.inner.write().customers.insert(number, customer);
        if let Some(previous) = &replaced {
            debug!(customer = %previous.customer_number(), "replaced registered customer");
        }
        replaced
    }

    /// Registers an account, returning the account it replaced, if any.
    pub fn register_account(&self, account: BankAccount) -> Option<BankAccount> {
        let number = account.account_number().clone();
        let replaced = self.inner.write().accounts.insert(number, account);
        if let Some(previous) = &replaced {
            debug!(account = %previous.account_number(), "replaced registered account");
        }
        replaced
    }

    /// Returns all customers in customer number order.
    pub fn customers(&self) -> Vec<Customer> {
        self.inner.read().customers.values().cloned().collect()
    }

    /// Returns all accounts in account number order.
    pub fn accounts(&self) -> Vec<BankAccount> {
        self.inner.read().accounts.values().cloned().collect()
    }

    pub fn customer(&self, customer_number: &str) -> Option<Customer> {
        self.inner.read().customers.get(customer_number).cloned()
    }

    pub fn account(&self, account_number: &str) -> Option<BankAccount> {
        self.inner.read().accounts.get(account_number).cloned()
    }

    pub fn customer_count(&self) -> usize {
        self.inner.read().customers.len()
    }

    pub fn account_count(&self) -> usize {
        self.inner.read().accounts.len()
    }

    /// Returns the accounts whose balance is strictly greater than `amount`.
    pub fn query_bank_accounts(&self, amount: Decimal) -> Vec<BankAccount> {
        self.inner
            .read()
            .accounts
            .values()
            .filter(|account| account.balance() > amount)
            .cloned()
            .collect()
    }

    /// Returns the sum of all balances, zero for a bank without accounts.
    ///
    /// # Errors
    ///
    /// - [`BankError::BalanceOverflow`] - The sum exceeds the range of [`Decimal`].
    pub fn query_total_account_balance(&self) -> Result<Decimal, BankError> {
        self.inner
            .read()
            .accounts
            .values()
            .try_fold(Decimal::ZERO, |total, account| {
                total
                    .checked_add(account.balance())
                    .ok_or(BankError::BalanceOverflow)
            })
    }

    /// Returns the largest balance held by any account.
    ///
    /// # Errors
    ///
    /// - [`BankError::NoAccounts`] - No account is registered.
    pub fn query_maximum_account_balance(&self) -> Result<Decimal, BankError> {
        self.inner.read().max_balance()
    }

    /// Returns the ZIP code of the customer owning `account_number`.
    ///
    /// Returns `None` when the account is unknown or its owner was never
    /// registered.
    pub fn query_zip_code(&self, account_number: &str) -> Option<ZipCode> {
        let data = self.inner.read();
        let account = data.accounts.get(account_number)?;
        data.customers
            .get(account.customer_number())
            .map(Customer::zip_code)
    }

    /// Returns every account number paired with its owner's ZIP code.
    ///
    /// # Errors
    ///
    /// - [`BankError::MissingCustomer`] - An account's owner is not registered.
    ///   No pairs are returned in that case.
    pub fn query_account_number_zip_code(
        &self,
    ) -> Result<Vec<(AccountNumber, ZipCode)>, BankError> {
        let data = self.inner.read();
        data.accounts
            .values()
            .map(|account| {
                let owner = data.owner_of(account)?;
                Ok((account.account_number().clone(), owner.zip_code()))
            })
            .collect()
    }

    /// Counts customers per ZIP code.
    ///
    /// Each ZIP code present among the customers appears exactly once.
    pub fn query_zip_code_customers(&self) -> Vec<(ZipCode, usize)> {
        let data = self.inner.read();
        let mut summary: BTreeMap<ZipCode, usize> = BTreeMap::new();
        for customer in data.customers.values() {
            *summary.entry(customer.zip_code()).or_default() += 1;
        }
        summary.into_iter().collect()
    }

    /// Returns the customers whose ZIP code is `zip_code`.
    pub fn query_customers(&self, zip_code: ZipCode) -> Vec<Customer> {
        self.inner
            .read()
            .customers
            .values()
            .filter(|customer| customer.zip_code() == zip_code)
            .cloned()
            .collect()
    }

    /// Counts accounts per ZIP code of their owner.
    ///
    /// # Errors
    ///
    /// - [`BankError::MissingCustomer`] - An account's owner is not registered.
    pub fn query_zip_code_accounts(&self) -> Result<Vec<(ZipCode, usize)>, BankError> {
        let data = self.inner.read();
        let mut summary: BTreeMap<ZipCode, usize> = BTreeMap::new();
        for account in data.accounts.values() {
            *summary.entry(data.owner_of(account)?.zip_code()).or_default() += 1;
        }
        Ok(summary.into_iter().collect())
    }

    /// Returns every account whose balance is not smaller than any other.
    ///
    /// The maximum and the filter are computed over the same snapshot.
    ///
    /// # Errors
    ///
    /// - [`BankError::NoAccounts`] - No account is registered.
    pub fn query_max_balance_bank_accounts(&self) -> Result<Vec<BankAccount>, BankError> {
        let data = self.inner.read();
        let max = data.max_balance()?;
        debug!(%max, "filtering accounts holding the maximum balance");
        Ok(data
            .accounts
            .values()
            .filter(|account| account.balance() >= max)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bank_with_orphan() -> Bank {
        let bank = Bank::new("Test");
        bank.register_customer(Customer::new("C00", ZipCode(12222)));
        bank.register_account(BankAccount::new("A00", "C00", dec!(10.0)));
        bank.register_account(BankAccount::new("A01", "C99", dec!(20.0)));
        bank
    }

    #[test]
    fn max_balance_on_empty_data_is_error() {
        let data = BankData::default();
        assert_eq!(data.max_balance(), Err(BankError::NoAccounts));
    }

    #[test]
    fn owner_of_reports_both_numbers() {
        let bank = bank_with_orphan();
        let data = bank.inner.read();
        let orphan = data.accounts.get("A01").unwrap();
        assert_eq!(
            data.owner_of(orphan),
            Err(BankError::MissingCustomer {
                account_number: "A01".into(),
                customer_number: "C99".into(),
            })
        );
    }

    #[test]
    fn register_returns_replaced_entity() {
        let bank = Bank::new("Test");
        assert_eq!(
            bank.register_customer(Customer::new("C00", ZipCode(1))),
            None
        );
        let replaced = bank.register_customer(Customer::new("C00", ZipCode(2)));
        assert_eq!(replaced, Some(Customer::new("C00", ZipCode(1))));
        assert_eq!(bank.customer_count(), 1);
        assert_eq!(bank.customer("C00").unwrap().zip_code(), ZipCode(2));
    }

    #[test]
    fn grouping_is_sorted_by_zip_code() {
        let bank = Bank::new("Test");
        bank.register_customer(Customer::new("C00", ZipCode(30000)));
        bank.register_customer(Customer::new("C01", ZipCode(10000)));
        bank.register_customer(Customer::new("C02", ZipCode(20000)));
        bank.register_customer(Customer::new("C03", ZipCode(10000)));

        assert_eq!(
            bank.query_zip_code_customers(),
            vec![(ZipCode(10000), 2), (ZipCode(20000), 1), (ZipCode(30000), 1)]
        );
    }

    #[test]
    fn joining_queries_fail_without_partial_output() {
        let bank = bank_with_orphan();
        assert!(bank.query_account_number_zip_code().is_err());
        assert!(bank.query_zip_code_accounts().is_err());
        // the tolerant lookup still answers
        assert_eq!(bank.query_zip_code("A00"), Some(ZipCode(12222)));
        assert_eq!(bank.query_zip_code("A01"), None);
    }
}
