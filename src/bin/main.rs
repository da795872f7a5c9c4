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

use bank_demo_rs::{
    Account, AccountKind, AccountNumber, Bank, CartError, Inventory, Pin, ShoppingCart,
};
use clap::{Parser, Subcommand};
use csv::Writer;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use std::process;
use std::str::FromStr;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Bank Management System - interactive account simulator
///
/// Open savings or current accounts, log in with a 4-digit PIN, then deposit,
/// withdraw, and inspect balance, history and interest. State lives only for
/// the duration of the run.
#[derive(Parser, Debug)]
#[command(name = "bank-demo-rs")]
#[command(about = "An interactive in-memory bank account simulator", long_about = None)]
struct Args {
    /// Log filter used when RUST_LOG is not set (e.g. "info", "bank_demo_rs=debug")
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    /// Print a CSV summary of all accounts to stdout on exit
    #[arg(long)]
    summary: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Price a shopping cart against the demo catalog
    Cart {
        /// Add QTY units of NAME, e.g. --add iphone=2
        #[arg(long = "add", value_name = "NAME=QTY", value_parser = parse_cart_line)]
        add: Vec<(String, u32)>,

        /// Remove one unit of NAME after all additions
        #[arg(long = "remove", value_name = "NAME")]
        remove: Vec<String>,
    },
}

#[derive(Error, Debug)]
enum CartCommandError {
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("failed to write cart: {0}")]
    Io(#[from] io::Error),
}

fn parse_cart_line(s: &str) -> Result<(String, u32), String> {
    let (name, quantity) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=QTY, got '{s}'"))?;
    let quantity = quantity
        .trim()
        .parse()
        .map_err(|e| format!("invalid quantity '{quantity}': {e}"))?;
    Ok((name.trim().to_owned(), quantity))
}

fn main() {
    let args = Args::parse();

    // Logs go to stderr so they never interleave with the menus.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Some(Command::Cart { add, remove }) = args.command {
        let mut inventory = Inventory::apple_store();
        if let Err(e) = run_cart(&mut inventory, &add, &remove, io::stdout().lock()) {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
        return;
    }

    let bank = Bank::new();
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout().lock());
    if let Err(e) = console.run(&bank) {
        eprintln!("Error in session: {}", e);
        process::exit(1);
    }

    if args.summary {
        if let Err(e) = write_accounts(&bank, io::stdout()) {
            eprintln!("Error writing summary: {}", e);
            process::exit(1);
        }
    }
}

/// Line-oriented menu over any reader/writer pair.
///
/// End of input is treated as Exit from whichever menu is active.
struct Console<R, W> {
    input: R,
    output: W,
}

enum Flow {
    Continue,
    Exit,
}

impl<R: BufRead, W: Write> Console<R, W> {
    fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `label` and reads one trimmed line. `None` on end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    /// Re-prompts until the line parses as `T`.
    fn prompt_parsed<T: FromStr>(&mut self, label: &str) -> io::Result<Option<T>> {
        loop {
            let Some(line) = self.prompt(label)? else {
                return Ok(None);
            };
            match line.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "Please enter a valid number")?,
            }
        }
    }

    fn run(&mut self, bank: &Bank) -> io::Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "------------- BANK MANAGEMENT SYSTEM -------------")?;
            writeln!(self.output, "1. Open Account")?;
            writeln!(self.output, "2. Login")?;
            writeln!(self.output, "3. Exit")?;

            let Some(choice) = self.prompt_parsed::<u8>("Enter choice: ")? else {
                return Ok(());
            };
            let flow = match choice {
                1 => self.open_account(bank)?,
                2 => self.login(bank)?,
                3 => {
                    writeln!(self.output, "Thank you for using the bank system!")?;
                    Flow::Exit
                }
                _ => {
                    writeln!(self.output, "Invalid choice")?;
                    Flow::Continue
                }
            };
            if let Flow::Exit = flow {
                return Ok(());
            }
        }
    }

    fn open_account(&mut self, bank: &Bank) -> io::Result<Flow> {
        writeln!(self.output, "--- Open New Account ---")?;
        let Some(name) = self.prompt("Enter name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(pin) = self.prompt("Set 4 digit PIN: ")? else {
            return Ok(Flow::Exit);
        };
        if let Err(e) = Pin::parse(&pin) {
            writeln!(self.output, "Error: {e}")?;
            return Ok(Flow::Continue);
        }
        let Some(balance) =
            self.prompt_parsed::<Decimal>("Enter initial balance (>= 500): ")?
        else {
            return Ok(Flow::Exit);
        };
        if balance < Bank::MINIMUM_OPENING_BALANCE {
            writeln!(self.output, "Minimum balance is {}", Bank::MINIMUM_OPENING_BALANCE)?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output, "1. Savings Account")?;
        writeln!(self.output, "2. Current Account")?;
        let Some(choice) = self.prompt("Choose type (number or name): ")? else {
            return Ok(Flow::Exit);
        };
        let selected = match choice.parse::<u8>() {
            Ok(number) => AccountKind::try_from(number),
            Err(_) => choice.parse::<AccountKind>(),
        };
        let kind = match selected {
            Ok(kind) => kind,
            Err(e) => {
                writeln!(self.output, "Error: {e}")?;
                return Ok(Flow::Continue);
            }
        };

        match bank.create_account(&name, &pin, balance, kind) {
            Ok(account) => {
                writeln!(self.output, "Account created successfully!")?;
                writeln!(self.output, "Your account number: {}", account.number())?;
            }
            Err(e) => writeln!(self.output, "Error: {e}")?,
        }
        Ok(Flow::Continue)
    }

    fn login(&mut self, bank: &Bank) -> io::Result<Flow> {
        let Some(number) = self.prompt_parsed::<u32>("Enter account number: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(pin) = self.prompt("Enter PIN: ")? else {
            return Ok(Flow::Exit);
        };
        match bank.login(AccountNumber(number), &pin) {
            Ok(account) => {
                writeln!(self.output, "Login successful!")?;
                self.user_menu(&account)
            }
            Err(e) => {
                writeln!(self.output, "Error: {e}")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn user_menu(&mut self, account: &Account) -> io::Result<Flow> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "--- USER MENU ---")?;
            writeln!(self.output, "1. Deposit")?;
            writeln!(self.output, "2. Withdraw")?;
            writeln!(self.output, "3. Check Balance")?;
            writeln!(self.output, "4. View Details")?;
            writeln!(self.output, "5. Transaction History")?;
            writeln!(self.output, "6. Interest")?;
            writeln!(self.output, "7. Logout")?;

            let Some(choice) = self.prompt_parsed::<u8>("Enter choice: ")? else {
                return Ok(Flow::Exit);
            };
            match choice {
                1 => {
                    let Some(amount) = self.prompt_parsed::<Decimal>("Enter amount: ")? else {
                        return Ok(Flow::Exit);
                    };
                    match account.deposit(amount) {
                        Ok(()) => writeln!(self.output, "Deposit successful!")?,
                        Err(e) => writeln!(self.output, "Error: {e}")?,
                    }
                }
                2 => {
                    let Some(amount) = self.prompt_parsed::<Decimal>("Enter amount: ")? else {
                        return Ok(Flow::Exit);
                    };
                    match account.withdraw(amount) {
                        Ok(()) => writeln!(self.output, "Withdrawal successful!")?,
                        Err(e) => writeln!(self.output, "Error: {e}")?,
                    }
                }
                3 => writeln!(self.output, "Balance: {}", account.balance())?,
                4 => writeln!(self.output, "{}", account.details())?,
                5 => {
                    let history = account.history();
                    if history.is_empty() {
                        writeln!(self.output, "No transactions yet")?;
                    } else {
                        writeln!(self.output, "--- Transaction History ---")?;
                        for (i, transaction) in history.iter().enumerate() {
                            writeln!(self.output, "{} {}", i + 1, transaction)?;
                        }
                    }
                }
                6 => writeln!(self.output, "{}", account.calculate_interest())?,
                7 => {
                    writeln!(self.output, "Logged out")?;
                    return Ok(Flow::Continue);
                }
                _ => writeln!(self.output, "Invalid choice")?,
            }
        }
    }
}

/// Applies cart additions then removals and prints the lines and total.
///
/// # Errors
///
/// Stops at the first rejected addition or failed write.
fn run_cart<W: Write>(
    inventory: &mut Inventory,
    add: &[(String, u32)],
    remove: &[String],
    mut writer: W,
) -> Result<(), CartCommandError> {
    let mut cart = ShoppingCart::new();
    for (name, quantity) in add {
        cart.add_item(inventory, name, *quantity)?;
    }
    for name in remove {
        cart.remove_item(name);
    }

    for item in cart.items() {
        writeln!(
            writer,
            "{} x{} @ {}",
            item.name, item.quantity, item.unit_price
        )?;
    }
    writeln!(writer, "Total: {}", cart.total_cost())?;
    Ok(())
}

/// Write account snapshots as CSV, ordered by account number.
///
/// # CSV Format
///
/// Columns: `number, name, kind, balance, transactions`
///
/// # Errors
///
/// Returns a CSV error if writing fails.
fn write_accounts<W: Write>(bank: &Bank, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);

    for account in bank.accounts() {
        wtr.serialize(account.as_ref())?;
    }

    wtr.flush()?;
    Ok(())
}
