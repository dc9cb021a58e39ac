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

//! Error types for bank queries.

use crate::base::{AccountNumber, CustomerNumber};
use thiserror::Error;

/// Query errors.
///
/// Lookups that may legitimately miss (see [`Bank::query_zip_code`]) return
/// `None` instead of an error.
///
/// [`Bank::query_zip_code`]: crate::Bank::query_zip_code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    /// The maximum balance is undefined because no account is registered
    #[error("bank has no accounts")]
    NoAccounts,

    /// The sum of the balances does not fit in a decimal
    #[error("total account balance overflowed")]
    BalanceOverflow,

    /// An account names a customer that was never registered
    #[error("account {account_number} references unregistered customer {customer_number}")]
    MissingCustomer {
        account_number: AccountNumber,
        customer_number: CustomerNumber,
    },
}
