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

//! Account public API integration tests.

use bank_demo_rs::{Account, AccountKind, Bank, BankError, Interest, TransactionKind};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::thread;

// === Helper Functions ===

fn open(kind: AccountKind, balance: Decimal) -> Arc<Account> {
    Bank::new()
        .create_account("Test", "1234", balance, kind)
        .unwrap()
}

fn savings(balance: Decimal) -> Arc<Account> {
    open(AccountKind::Savings, balance)
}

fn current(balance: Decimal) -> Arc<Account> {
    open(AccountKind::Current, balance)
}

// === Basic Account Tests ===

#[test]
fn new_account_has_opening_balance_and_no_history() {
    let account = savings(dec!(500));
    assert_eq!(account.balance(), dec!(500));
    assert!(account.history().is_empty());
    assert_eq!(account.name(), "Test");
    assert_eq!(account.kind(), AccountKind::Savings);
}

#[test]
fn deposit_increases_balance() {
    let account = savings(dec!(500));
    account.deposit(dec!(50.00)).unwrap();
    assert_eq!(account.balance(), dec!(550.00));
}

#[test]
fn multiple_deposits_accumulate() {
    let account = current(dec!(500));
    account.deposit(dec!(100.00)).unwrap();
    account.deposit(dec!(50.00)).unwrap();
    account.deposit(dec!(25.50)).unwrap();
    assert_eq!(account.balance(), dec!(675.50));
    assert_eq!(account.history().len(), 3);
}

#[test]
fn deposit_has_no_upper_bound() {
    let account = current(dec!(500));
    account.deposit(dec!(1_000_000_000)).unwrap();
    assert_eq!(account.balance(), dec!(1_000_000_500));
}

#[test]
fn withdrawal_decreases_balance() {
    let account = savings(dec!(500));
    account.withdraw(dec!(30.00)).unwrap();
    assert_eq!(account.balance(), dec!(470.00));
}

#[test]
fn withdraw_entire_balance() {
    let account = savings(dec!(500));
    account.withdraw(dec!(500)).unwrap();
    assert_eq!(account.balance(), Decimal::ZERO);
}

#[test]
fn deposit_then_withdraw_records_both_in_order() {
    let account = savings(dec!(1000));
    account.deposit(dec!(200)).unwrap();
    account.withdraw(dec!(1150)).unwrap();

    assert_eq!(account.balance(), dec!(50));
    let history = account.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].kind(), TransactionKind::Deposit);
    assert_eq!(history[0].amount(), dec!(200));
    assert_eq!(history[1].kind(), TransactionKind::Withdraw);
    assert_eq!(history[1].amount(), dec!(1150));
}

#[test]
fn history_renders_signed_entries() {
    let account = current(dec!(500));
    account.deposit(dec!(100)).unwrap();
    account.withdraw(dec!(40)).unwrap();

    let rendered: Vec<String> = account.history().iter().map(|t| t.to_string()).collect();
    assert_eq!(rendered, vec!["+100 Deposit", "-40 Withdraw"]);
}

// === Error Cases ===

#[test]
fn deposit_zero_returns_invalid_amount() {
    let account = savings(dec!(500));
    assert_eq!(account.deposit(Decimal::ZERO), Err(BankError::InvalidAmount));
    assert_eq!(account.balance(), dec!(500));
    assert!(account.history().is_empty());
}

#[test]
fn deposit_negative_returns_invalid_amount() {
    let account = savings(dec!(500));
    assert_eq!(account.deposit(dec!(-10.00)), Err(BankError::InvalidAmount));
    assert_eq!(account.balance(), dec!(500));
}

#[test]
fn deposit_past_decimal_max_is_rejected() {
    let account = current(dec!(500));
    assert_eq!(account.deposit(Decimal::MAX), Err(BankError::InvalidAmount));
    assert_eq!(account.balance(), dec!(500));
    assert!(account.history().is_empty());

    account.deposit(dec!(1)).unwrap();
    assert_eq!(account.balance(), dec!(501));
}

#[test]
fn withdraw_zero_or_negative_returns_invalid_amount() {
    let account = savings(dec!(500));
    assert_eq!(account.withdraw(Decimal::ZERO), Err(BankError::InvalidAmount));
    assert_eq!(account.withdraw(dec!(-1)), Err(BankError::InvalidAmount));
    assert!(account.history().is_empty());
}

#[test]
fn overdraw_returns_insufficient_balance() {
    let account = current(dec!(500));
    assert_eq!(
        account.withdraw(dec!(500.01)),
        Err(BankError::InsufficientBalance)
    );
    assert_eq!(account.balance(), dec!(500));
    assert!(account.history().is_empty());
}

// === PIN ===

#[test]
fn verify_pin_is_exact_match() {
    let account = savings(dec!(500));
    assert!(account.verify_pin("1234"));
    assert!(!account.verify_pin("1235"));
    assert!(!account.verify_pin("1234 "));
    assert!(!account.verify_pin(""));
}

// === Interest ===

#[test]
fn savings_interest_is_four_percent_and_not_credited() {
    let account = savings(dec!(1000));
    assert_eq!(account.calculate_interest(), Interest::Accrued(dec!(40.0)));
    assert_eq!(account.balance(), dec!(1000));
    assert!(account.history().is_empty());
}

#[test]
fn savings_interest_tracks_current_balance() {
    let account = savings(dec!(1000));
    account.deposit(dec!(500)).unwrap();
    assert_eq!(account.calculate_interest(), Interest::Accrued(dec!(60)));
}

#[test]
fn current_account_offers_no_interest() {
    let account = current(dec!(1000));
    assert_eq!(account.calculate_interest(), Interest::NotOffered);
    assert_eq!(account.balance(), dec!(1000));
}

// === Details ===

#[test]
fn details_snapshot_matches_account() {
    let account = current(dec!(800));
    let details = account.details();
    assert_eq!(details.name, "Test");
    assert_eq!(details.number, account.number());
    assert_eq!(details.kind, AccountKind::Current);
    assert_eq!(details.balance, dec!(800));
}

// === Concurrency ===

#[test]
fn concurrent_deposits_are_all_applied() {
    let account = savings(dec!(500));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let account = Arc::clone(&account);
            thread::spawn(move || {
                for _ in 0..100 {
                    account.deposit(dec!(1)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(account.balance(), dec!(1300));
    assert_eq!(account.history().len(), 800);
}

#[test]
fn concurrent_withdrawals_never_overdraw() {
    let account = current(dec!(500));

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let account = Arc::clone(&account);
            thread::spawn(move || {
                let mut ok = 0;
                for _ in 0..100 {
                    if account.withdraw(dec!(1)).is_ok() {
                        ok += 1;
                    }
                }
                ok
            })
        })
        .collect();
    let succeeded: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();

    assert_eq!(succeeded, 500);
    assert_eq!(account.balance(), Decimal::ZERO);
}
