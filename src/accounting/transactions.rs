use std::fmt;
use std::str::FromStr;

use getset::{CopyGetters, Getters};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::TransactionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(TransactionError::InvalidKind(s.trim().to_owned())),
        }
    }
}

/// Largest amount a single transaction may carry.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// A single recorded income or expense. Fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct Transaction {
    #[getset(get_copy = "pub")]
    amount: Decimal,
    #[getset(get = "pub")]
    description: String,
    #[getset(get = "pub")]
    date: String,
    #[getset(get = "pub")]
    category: String,
    #[getset(get_copy = "pub")]
    kind: TransactionKind,
}

impl Transaction {
    pub fn new(
        amount: Decimal,
        description: impl Into<String>,
        date: impl Into<String>,
        category: impl Into<String>,
        kind: TransactionKind,
    ) -> Result<Transaction, TransactionError> {
        if amount <= dec!(0) {
            return Err(TransactionError::InvalidAmount);
        }

        if amount > MAX_AMOUNT {
            return Err(TransactionError::AmountTooLarge);
        }

        Ok(Transaction {
            amount,
            description: description.into(),
            date: date.into(),
            category: category.into(),
            kind,
        })
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Amount with the sign it contributes to the balance.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}
