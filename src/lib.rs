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
//! An in-memory bank: savings and current accounts protected by a 4-digit
//! PIN, with deposits, withdrawals, a transaction log and informational
//! interest. A small shopping-cart calculator ships alongside.
//!
//! ## Core Components
//!
//! - [`Bank`]: Account registry, number allocation and login
//! - [`Account`]: Balance, history and PIN check for one account
//! - [`AccountKind`]: Savings (4% interest, reported only) or Current (none)
//! - [`BankError`]: Error types for rejected operations
//! - [`Inventory`] / [`ShoppingCart`]: Stock-checked cart totals
//!
//! ## Example
//!
//! ```
//! use bank_demo_rs::{AccountKind, AccountNumber, Bank, BankError};
//! use rust_decimal_macros::dec;
//!
//! let bank = Bank::new();
//! let account = bank
//!     .create_account("Ada", "4321", dec!(500), AccountKind::Current)
//!     .unwrap();
//! assert_eq!(account.number(), AccountNumber(1001));
//!
//! let session = bank.login(AccountNumber(1001), "4321").unwrap();
//! session.deposit(dec!(250)).unwrap();
//! assert_eq!(session.withdraw(dec!(1000)), Err(BankError::InsufficientBalance));
//! assert_eq!(account.balance(), dec!(750));
//! ```

pub mod account;
mod bank;
mod base;
pub mod cart;
pub mod error;
mod transaction;

pub use account::{Account, AccountDetails, AccountKind, Interest};
pub use bank::Bank;
pub use base::{AccountNumber, Pin};
pub use cart::{CartItem, Inventory, ShoppingCart};
pub use error::{BankError, CartError};
pub use transaction::{Transaction, TransactionKind};
