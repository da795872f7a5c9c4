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

//! Transaction history records.
//!
//! A [`Transaction`] is only created by a successful deposit or withdrawal
//! and is never mutated afterwards.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Transaction {
    kind: TransactionKind,
    amount: Decimal,
}

impl Transaction {
    pub(crate) fn deposit(amount: Decimal) -> Self {
        Self {
            kind: TransactionKind::Deposit,
            amount,
        }
    }

    pub(crate) fn withdraw(amount: Decimal) -> Self {
        Self {
            kind: TransactionKind::Withdraw,
            amount,
        }
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Renders as `+100 Deposit` or `-50 Withdraw`.
impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TransactionKind::Deposit => write!(f, "+{} Deposit", self.amount),
            TransactionKind::Withdraw => write!(f, "-{} Withdraw", self.amount),
        }
    }
}
