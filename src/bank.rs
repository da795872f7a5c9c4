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

//! Account registry and login.
//!
//! The [`Bank`] is the only creator of accounts. It assigns account numbers,
//! validates opening requests and authenticates logins. Accounts live as long
//! as the bank; there is no close operation.
//!
//! # Thread Safety
//!
//! The registry is a [`DashMap`] and the number counter is atomic, so a
//! `&Bank` can be shared. Each account serializes its own mutations.

use crate::account::{Account, AccountKind};
use crate::base::{AccountNumber, Pin};
use crate::BankError;
use dashmap::DashMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Registry of accounts keyed by account number.
///
/// # Invariants
///
/// - Account numbers start at [`Bank::FIRST_ACCOUNT_NUMBER`] and are never reused.
/// - Every stored account opened with at least [`Bank::MINIMUM_OPENING_BALANCE`].
/// - Login failure does not reveal whether the account exists.
pub struct Bank {
    accounts: DashMap<AccountNumber, Arc<Account>>,
    next_account_number: AtomicU32,
}

impl Bank {
    pub const FIRST_ACCOUNT_NUMBER: AccountNumber = AccountNumber(1001);
    pub const MINIMUM_OPENING_BALANCE: Decimal = dec!(500);

    pub fn new() -> Self {
        Bank {
            accounts: DashMap::new(),
            next_account_number: AtomicU32::new(Self::FIRST_ACCOUNT_NUMBER.0),
        }
    }

    /// Returns the current counter value, then increments it.
    pub fn generate_account_number(&self) -> AccountNumber {
        AccountNumber(self.next_account_number.fetch_add(1, Ordering::Relaxed))
    }

    /// Opens a new account and stores it in the registry.
    ///
    /// Validation happens before a number is allocated, so a rejected
    /// request does not consume one.
    ///
    /// # Errors
    ///
    /// - [`BankError::InvalidPin`] - `pin` is not exactly four digits.
    /// - [`BankError::InsufficientInitialBalance`] - `initial_balance` is below 500.
    pub fn create_account(
        &self,
        name: &str,
        pin: &str,
        initial_balance: Decimal,
        kind: AccountKind,
    ) -> Result<Arc<Account>, BankError> {
        let pin = Pin::parse(pin)?;
        if initial_balance < Self::MINIMUM_OPENING_BALANCE {
            return Err(BankError::InsufficientInitialBalance);
        }

        let number = self.generate_account_number();
        let account = Arc::new(Account::new(
            name.to_owned(),
            number,
            kind,
            pin,
            initial_balance,
        ));
        self.accounts.insert(number, Arc::clone(&account));

        tracing::info!(account = %number, %kind, "account opened");
        Ok(account)
    }

    /// Returns the account handle if `number` exists and `pin` matches.
    ///
    /// # Errors
    ///
    /// [`BankError::AuthenticationFailed`] for an unknown number or a wrong
    /// PIN alike.
    pub fn login(&self, number: AccountNumber, pin: &str) -> Result<Arc<Account>, BankError> {
        match self.accounts.get(&number) {
            Some(account) if account.verify_pin(pin) => {
                tracing::info!(account = %number, "login succeeded");
                Ok(Arc::clone(account.value()))
            }
            _ => {
                tracing::warn!(account = %number, "login failed");
                Err(BankError::AuthenticationFailed)
            }
        }
    }

    /// All accounts, ordered by account number.
    pub fn accounts(&self) -> Vec<Arc<Account>> {
        let mut accounts: Vec<_> = self
            .accounts
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        accounts.sort_by_key(|account| account.number());
        accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for Bank {
    fn default() -> Self {
        Self::new()
    }
}
