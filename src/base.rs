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

//! Core identifier types: account numbers and PINs.

use crate::BankError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an account, assigned by the [`Bank`](crate::Bank).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AccountNumber(pub u32);

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Secret account PIN.
///
/// Only ever compared for equality. `Debug` is redacted and there is no
/// accessor for the digits.
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
    pub const LENGTH: usize = 4;

    /// Parses a PIN made of exactly [`Pin::LENGTH`] ASCII digits.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::InvalidPin`] for any other input.
    pub fn parse(candidate: &str) -> Result<Self, BankError> {
        if candidate.len() != Self::LENGTH || !candidate.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BankError::InvalidPin);
        }
        Ok(Self(candidate.to_owned()))
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}
