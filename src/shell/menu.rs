use std::io::Write;

use chrono::Local;
use enum_dispatch::enum_dispatch;
use log::debug;

use super::{format_currency, LoopControl, Session, ShellError};
use crate::accounting::LedgerError;

#[enum_dispatch]
pub trait MenuAction {
    fn run(&self, session: &mut Session<'_>) -> Result<LoopControl, ShellError>;
}

#[enum_dispatch(MenuAction)]
pub enum MenuChoice {
    AddTransaction,
    ListTransactions,
    ShowBalance,
    ShowSummary,
    ShowCategories,
    DeleteTransaction,
    SaveData,
    Exit,
}

impl MenuChoice {
    /// Maps a menu number (1-8) to its action.
    pub fn from_number(number: u8) -> Option<MenuChoice> {
        let choice: MenuChoice = match number {
            1 => AddTransaction.into(),
            2 => ListTransactions.into(),
            3 => ShowBalance.into(),
            4 => ShowSummary.into(),
            5 => ShowCategories.into(),
            6 => DeleteTransaction.into(),
            7 => SaveData.into(),
            8 => Exit.into(),
            _ => return None,
        };

        Some(choice)
    }
}

pub struct AddTransaction;

impl MenuAction for AddTransaction {
    fn run(&self, session: &mut Session<'_>) -> Result<LoopControl, ShellError> {
        let amount = session.prompt_amount()?;
        let description = session.prompt("Enter description: ")?;

        let use_today = session.prompt("Use today's date? (y/n): ")?;
        let date = if use_today.trim().eq_ignore_ascii_case("y") {
            Local::now().format("%Y-%m-%d").to_string()
        } else {
            session.prompt("Enter date (YYYY-MM-DD): ")?
        };

        let category = session.prompt("Enter category: ")?;
        let kind = session.prompt_kind()?;

        match session.ledger.append(amount, &description, &date, &category, kind) {
            Ok(()) => writeln!(session.output, "Transaction added successfully!")?,
            Err(LedgerError::Storage(err)) => {
                writeln!(session.output, "Transaction added, but it could not be saved: {}", err)?;
                writeln!(session.output, "Choose 'Save Data' to try again.")?;
            },
            Err(err) => writeln!(session.output, "Transaction not added: {}", err)?,
        }

        Ok(LoopControl::Continue)
    }
}

pub struct ListTransactions;

impl MenuAction for ListTransactions {
    fn run(&self, session: &mut Session<'_>) -> Result<LoopControl, ShellError> {
        writeln!(session.output, "\n--- All Transactions ---")?;
        session.write_table()?;
        Ok(LoopControl::Continue)
    }
}

pub struct ShowBalance;

impl MenuAction for ShowBalance {
    fn run(&self, session: &mut Session<'_>) -> Result<LoopControl, ShellError> {
        let balance = session.ledger.balance();
        writeln!(session.output, "\nCurrent Balance: {}", format_currency(balance))?;
        Ok(LoopControl::Continue)
    }
}

pub struct ShowSummary;

impl MenuAction for ShowSummary {
    fn run(&self, session: &mut Session<'_>) -> Result<LoopControl, ShellError> {
        let summary = session.ledger.summary();
        writeln!(session.output, "\n--- Financial Summary ---")?;
        writeln!(session.output, "Total Income:   {}", format_currency(summary.income))?;
        writeln!(session.output, "Total Expenses: {}", format_currency(summary.expense))?;
        writeln!(session.output, "Net Balance:    {}", format_currency(summary.net()))?;
        Ok(LoopControl::Continue)
    }
}

pub struct ShowCategories;

impl MenuAction for ShowCategories {
    fn run(&self, session: &mut Session<'_>) -> Result<LoopControl, ShellError> {
        let breakdown = session.ledger.category_breakdown();
        writeln!(session.output, "\n--- Category Breakdown ---")?;
        if breakdown.is_empty() {
            writeln!(session.output, "No transactions found.")?;
        }

        for totals in &breakdown {
            writeln!(
                session.output,
                "{}: Income {}, Expenses {}, Net: {}",
                totals.category,
                format_currency(totals.income),
                format_currency(totals.expense),
                format_currency(totals.net())
            )?;
        }

        Ok(LoopControl::Continue)
    }
}

pub struct DeleteTransaction;

impl MenuAction for DeleteTransaction {
    fn run(&self, session: &mut Session<'_>) -> Result<LoopControl, ShellError> {
        writeln!(session.output, "\n--- Delete Transaction ---")?;
        session.write_table()?;
        if session.ledger.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let answer = session.prompt("Enter transaction number to delete (1-based): ")?;
        let Ok(number) = answer.trim().parse::<usize>() else {
            writeln!(session.output, "Please enter a valid number.")?;
            return Ok(LoopControl::Continue);
        };

        // Numbers are shown 1-based; 0 is never valid.
        let Some(index) = number.checked_sub(1) else {
            writeln!(session.output, "Invalid transaction number.")?;
            return Ok(LoopControl::Continue);
        };

        let description = session.ledger.get(index).map(|transaction| transaction.description().clone());
        match session.ledger.remove_at(index) {
            Ok(removed) => writeln!(session.output, "Deleted: {}", removed.description())?,
            Err(LedgerError::NotFound(index)) => {
                debug!("delete requested for missing position {}", index);
                writeln!(session.output, "Invalid transaction number.")?;
            },
            Err(LedgerError::Storage(err)) => {
                writeln!(
                    session.output,
                    "Deleted: {}, but the change could not be saved: {}",
                    description.unwrap_or_default(),
                    err
                )?;
                writeln!(session.output, "Choose 'Save Data' to try again.")?;
            },
            Err(err) => writeln!(session.output, "Transaction not deleted: {}", err)?,
        }

        Ok(LoopControl::Continue)
    }
}

pub struct SaveData;

impl MenuAction for SaveData {
    fn run(&self, session: &mut Session<'_>) -> Result<LoopControl, ShellError> {
        match session.ledger.persist() {
            Ok(()) => writeln!(session.output, "Data saved successfully!")?,
            Err(err) => writeln!(session.output, "Could not save data: {}", err)?,
        }
        Ok(LoopControl::Continue)
    }
}

pub struct Exit;

impl MenuAction for Exit {
    fn run(&self, session: &mut Session<'_>) -> Result<LoopControl, ShellError> {
        if session.ledger.has_unsaved_changes() {
            writeln!(
                session.output,
                "Warning: the latest changes were not saved to {}.",
                session.ledger.path().display()
            )?;
        }
        writeln!(session.output, "Thanks for using Finance Tracker!")?;
        Ok(LoopControl::Exit)
    }
}
