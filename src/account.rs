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

//! Account management.
//!
//! Accounts come in two kinds, [`AccountKind::Savings`] and
//! [`AccountKind::Current`], which differ only in how interest is reported.
//! Balance and history change only through [`Account::deposit`] and
//! [`Account::withdraw`].
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use bank_demo_rs::{AccountKind, Bank, Interest};
//!
//! let bank = Bank::new();
//! let account = bank
//!     .create_account("Ada", "1234", dec!(1000), AccountKind::Savings)
//!     .unwrap();
//! assert_eq!(account.calculate_interest(), Interest::Accrued(dec!(40)));
//! assert_eq!(account.balance(), dec!(1000));
//! ```

use crate::base::{AccountNumber, Pin};
use crate::transaction::Transaction;
use crate::BankError;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::str::FromStr;

/// The closed set of account variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Savings,
    Current,
}

impl AccountKind {
    const SAVINGS_RATE: Decimal = dec!(0.04);

    /// Informational interest on `balance`. Never credited.
    pub fn interest(&self, balance: Decimal) -> Interest {
        match self {
            Self::Savings => Interest::Accrued(balance * Self::SAVINGS_RATE),
            Self::Current => Interest::NotOffered,
        }
    }
}

/// Menu selector: `1` is Savings, `2` is Current.
impl TryFrom<u8> for AccountKind {
    type Error = BankError;

    fn try_from(choice: u8) -> Result<Self, Self::Error> {
        match choice {
            1 => Ok(Self::Savings),
            2 => Ok(Self::Current),
            _ => Err(BankError::InvalidAccountType),
        }
    }
}

impl FromStr for AccountKind {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "savings" => Ok(Self::Savings),
            "current" => Ok(Self::Current),
            _ => Err(BankError::InvalidAccountType),
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Savings => f.write_str("Savings"),
            Self::Current => f.write_str("Current"),
        }
    }
}

/// Result of an interest calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interest {
    Accrued(Decimal),
    NotOffered,
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accrued(amount) => write!(f, "Savings interest: {amount}"),
            Self::NotOffered => f.write_str("Current account does not provide interest."),
        }
    }
}

/// Read-only snapshot of name, number and balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDetails {
    pub name: String,
    pub number: AccountNumber,
    pub kind: AccountKind,
    pub balance: Decimal,
}

impl fmt::Display for AccountDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "------ Account Details ------")?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Account No: {}", self.number)?;
        writeln!(f, "Type: {}", self.kind)?;
        write!(f, "Balance: {}", self.balance)
    }
}

#[derive(Debug)]
struct AccountData {
    balance: Decimal,
    /// Append-only, in insertion order.
    history: Vec<Transaction>,
}

impl AccountData {
    fn new(balance: Decimal) -> Self {
        Self {
            balance,
            history: Vec::new(),
        }
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.balance >= Decimal::ZERO,
            "Invariant violated: balance went negative: {}",
            self.balance
        );
    }

    fn deposit(&mut self, amount: Decimal) -> Result<(), BankError> {
        if amount <= Decimal::ZERO {
            return Err(BankError::InvalidAmount);
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(BankError::InvalidAmount)?;
        self.history.push(Transaction::deposit(amount));
        self.assert_invariants();
        Ok(())
    }

    fn withdraw(&mut self, amount: Decimal) -> Result<(), BankError> {
        if amount <= Decimal::ZERO {
            return Err(BankError::InvalidAmount);
        }
        if self.balance < amount {
            return Err(BankError::InsufficientBalance);
        }
        self.balance -= amount;
        self.history.push(Transaction::withdraw(amount));
        self.assert_invariants();
        Ok(())
    }
}

/// Bank account.
///
/// Created only by [`Bank::create_account`](crate::Bank::create_account).
#[derive(Debug)]
pub struct Account {
    name: String,
    number: AccountNumber,
    kind: AccountKind,
    pin: Pin,
    inner: Mutex<AccountData>,
}

impl Account {
    const DECIMAL_PRECISION: u32 = 2;

    pub(crate) fn new(
        name: String,
        number: AccountNumber,
        kind: AccountKind,
        pin: Pin,
        balance: Decimal,
    ) -> Self {
        Self {
            name,
            number,
            kind,
            pin,
            inner: Mutex::new(AccountData::new(balance)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn balance(&self) -> Decimal {
        self.inner.lock().balance
    }

    /// Plain equality check. There is no lockout after repeated failures.
    pub fn verify_pin(&self, candidate: &str) -> bool {
        self.pin.matches(candidate)
    }

    /// Credits `amount` and records a deposit.
    ///
    /// # Errors
    ///
    /// [`BankError::InvalidAmount`] if `amount <= 0` or the balance would
    /// exceed [`Decimal::MAX`].
    pub fn deposit(&self, amount: Decimal) -> Result<(), BankError> {
        let result = self.inner.lock().deposit(amount);
        match &result {
            Ok(()) => tracing::debug!(account = %self.number, %amount, "deposit applied"),
            Err(e) => tracing::debug!(account = %self.number, %amount, error = %e, "deposit rejected"),
        }
        result
    }

    /// Debits `amount` and records a withdrawal. No overdraft.
    ///
    /// # Errors
    ///
    /// - [`BankError::InvalidAmount`] if `amount <= 0`.
    /// - [`BankError::InsufficientBalance`] if `amount` exceeds the balance.
    pub fn withdraw(&self, amount: Decimal) -> Result<(), BankError> {
        let result = self.inner.lock().withdraw(amount);
        match &result {
            Ok(()) => tracing::debug!(account = %self.number, %amount, "withdrawal applied"),
            Err(e) => {
                tracing::debug!(account = %self.number, %amount, error = %e, "withdrawal rejected")
            }
        }
        result
    }

    /// Copy of the transaction log, oldest first. May be empty.
    pub fn history(&self) -> Vec<Transaction> {
        self.inner.lock().history.clone()
    }

    pub fn calculate_interest(&self) -> Interest {
        self.kind.interest(self.balance())
    }

    pub fn details(&self) -> AccountDetails {
        AccountDetails {
            name: self.name.clone(),
            number: self.number,
            kind: self.kind,
            balance: self.balance(),
        }
    }
}

impl Serialize for Account {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let data = self.inner.lock();
        let mut state = serializer.serialize_struct("Account", 5)?;
        state.serialize_field("number", &self.number)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field(
            "balance",
            &data.balance.round_dp(Account::DECIMAL_PRECISION),
        )?;
        state.serialize_field("transactions", &data.history.len())?;
        state.end()
    }
}
