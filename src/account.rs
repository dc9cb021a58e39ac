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

//! Bank accounts.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use bank_demo_rs::BankAccount;
//!
//! let account = BankAccount::new("A00", "C00", dec!(1000.0));
//! assert_eq!(account.customer_number().as_str(), "C00");
//! assert_eq!(account.balance(), dec!(1000));
//! ```

use crate::base::{AccountNumber, CustomerNumber};
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// A bank account. Immutable once constructed.
///
/// The owning customer is referenced by number only and does not have to be
/// registered with the bank that holds the account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankAccount {
    account_number: AccountNumber,
    customer_number: CustomerNumber,
    balance: Decimal,
}

impl BankAccount {
    const DECIMAL_PRECISION: u32 = 4;

    pub fn new(
        account_number: impl Into<AccountNumber>,
        customer_number: impl Into<CustomerNumber>,
        balance: Decimal,
    ) -> Self {
        Self {
            account_number: account_number.into(),
            customer_number: customer_number.into(),
            balance,
        }
    }

    pub fn account_number(&self) -> &AccountNumber {
        &self.account_number
    }

    /// Number of the customer owning this account.
    pub fn customer_number(&self) -> &CustomerNumber {
        &self.customer_number
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }
}

impl fmt::Display for BankAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "account {} of {}: {}",
            self.account_number,
            self.customer_number,
            self.balance.round_dp(Self::DECIMAL_PRECISION)
        )
    }
}

impl Serialize for BankAccount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("BankAccount", 3)?;
        state.serialize_field("account_number", &self.account_number)?;
        state.serialize_field("customer_number", &self.customer_number)?;
        state.serialize_field(
            "balance",
            &self.balance.round_dp(BankAccount::DECIMAL_PRECISION),
        )?;
        state.end()
    }
}
