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

//! Error types for the bank and the shopping cart.

use thiserror::Error;

/// Bank and account operation errors.
///
/// Every variant leaves account and registry state unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    /// PIN is not exactly four digits
    #[error("PIN must be 4 digits")]
    InvalidPin,

    /// Opening balance is below the bank minimum
    #[error("minimum opening balance is 500")]
    InsufficientInitialBalance,

    /// Account type selector is not Savings or Current
    #[error("invalid account type")]
    InvalidAccountType,

    /// Amount is zero or negative
    #[error("invalid amount (must be positive)")]
    InvalidAmount,

    /// Withdrawal would exceed the balance
    #[error("insufficient balance")]
    InsufficientBalance,

    /// Unknown account number or wrong PIN; intentionally not distinguished
    #[error("invalid login")]
    AuthenticationFailed,
}

/// Shopping cart errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("cannot add product {0}: not in inventory")]
    UnknownProduct(String),

    #[error("product {product} out of stock (requested {requested}, available {available})")]
    OutOfStock {
        product: String,
        requested: u32,
        available: u32,
    },

    #[error("quantity must be at least 1")]
    InvalidQuantity,
}
