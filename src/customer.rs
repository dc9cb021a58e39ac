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

//! Bank customers.

use crate::base::{CustomerNumber, ZipCode};
use serde::Serialize;
use std::fmt;

/// A customer of a bank. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    customer_number: CustomerNumber,
    zip_code: ZipCode,
}

impl Customer {
    pub fn new(customer_number: impl Into<CustomerNumber>, zip_code: ZipCode) -> Self {
        Self {
            customer_number: customer_number.into(),
            zip_code,
        }
    }

    pub fn customer_number(&self) -> &CustomerNumber {
        &self.customer_number
    }

    pub fn zip_code(&self) -> ZipCode {
        self.zip_code
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "customer {} (ZIP {})", self.customer_number, self.zip_code)
    }
}
