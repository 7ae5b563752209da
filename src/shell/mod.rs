//! Numbered text menu driving a [`Ledger`].
//!
//! The shell reads line-oriented answers from any `BufRead` and writes to any
//! `Write`, so a whole session can be scripted.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::accounting::ledger::Ledger;
use crate::accounting::transactions::{Transaction, TransactionKind, MAX_AMOUNT};

pub mod menu;

use menu::{Exit, MenuAction, MenuChoice};

pub const CURRENCY_SYMBOL: &str = "€";

const MENU: &str = "\
=== Personal Finance Tracker ===
1. Add Transaction
2. View All Transactions
3. View Balance
4. View Summary
5. View Category Breakdown
6. Delete Transaction
7. Save Data
8. Exit";

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("input closed")]
    InputClosed,
    #[error("{0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub struct Session<'a> {
    ledger: &'a mut Ledger,
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
}

impl<'a> Session<'a> {
    /// Shows `text` and reads one answer line, without its line ending.
    fn prompt(&mut self, text: &str) -> Result<String, ShellError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ShellError::InputClosed);
        }

        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_owned())
    }

    fn prompt_amount(&mut self) -> Result<Decimal, ShellError> {
        loop {
            let answer = self.prompt(&format!("Enter amount: {}", CURRENCY_SYMBOL))?;
            let answer = answer.trim();
            match Decimal::from_str(answer).or_else(|_| Decimal::from_scientific(answer)) {
                Ok(amount) if amount <= dec!(0) => writeln!(self.output, "Amount must be greater than 0.")?,
                Ok(amount) if amount > MAX_AMOUNT => writeln!(
                    self.output,
                    "Amount must not exceed {}.",
                    format_currency(MAX_AMOUNT)
                )?,
                Ok(amount) => return Ok(amount),
                Err(_) => writeln!(self.output, "Please enter a valid number for amount.")?,
            }
        }
    }

    fn prompt_kind(&mut self) -> Result<TransactionKind, ShellError> {
        loop {
            let answer = self.prompt("Enter type (income/expense): ")?;
            match answer.parse() {
                Ok(kind) => return Ok(kind),
                Err(_) => writeln!(self.output, "Please enter 'income' or 'expense'.")?,
            }
        }
    }

    fn write_table(&mut self) -> Result<(), ShellError> {
        if self.ledger.is_empty() {
            writeln!(self.output, "No transactions found.")?;
            return Ok(());
        }

        writeln!(
            self.output,
            "\n{:<4} {:<10} {:<12} {:<12} {:<15} {:<20}",
            "#", "Type", "Amount", "Date", "Category", "Description"
        )?;
        writeln!(self.output, "{}", "-".repeat(80))?;
        for (position, transaction) in self.ledger.transactions().iter().enumerate() {
            writeln!(self.output, "{}", table_row(position + 1, transaction))?;
        }

        Ok(())
    }
}

fn table_row(number: usize, transaction: &Transaction) -> String {
    format!(
        "{:<4} {:<10} {:<12} {:<12} {:<15} {:<20}",
        number,
        transaction.kind(),
        format_currency(transaction.amount()),
        transaction.date(),
        transaction.category(),
        transaction.description()
    )
}

/// Renders `amount` with the currency symbol and exactly two decimals.
pub fn format_currency(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    format!("{}{}", CURRENCY_SYMBOL, rounded)
}

/// Runs the menu loop until the user exits or `input` runs dry.
pub fn run<R: BufRead, W: Write>(ledger: &mut Ledger, mut input: R, mut output: W) -> anyhow::Result<()> {
    let mut session = Session {
        ledger,
        input: &mut input,
        output: &mut output,
    };

    loop {
        writeln!(session.output, "\n{}", MENU)?;

        let answer = match session.prompt("Enter your choice (1-8): ") {
            Ok(answer) => answer,
            Err(ShellError::InputClosed) => break,
            Err(err) => return Err(err.into()),
        };

        let Ok(number) = answer.trim().parse::<u8>() else {
            writeln!(session.output, "Please enter a valid number.")?;
            continue;
        };

        let Some(choice) = MenuChoice::from_number(number) else {
            writeln!(session.output, "Invalid choice, please try again.")?;
            continue;
        };

        match choice.run(&mut session) {
            Ok(LoopControl::Continue) => {},
            Ok(LoopControl::Exit) => return Ok(()),
            Err(ShellError::InputClosed) => break,
            Err(err) => return Err(err.into()),
        }
    }

    writeln!(session.output)?;
    Exit.run(&mut session)?;
    Ok(())
}
