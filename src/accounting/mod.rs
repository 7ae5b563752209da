use thiserror::Error;

use crate::data::StorageError;

pub mod ledger;
pub mod transactions;


#[derive(Debug, PartialEq, Error)]
pub enum TransactionError {
    #[error("amount must be greater than zero")]
    InvalidAmount,
    #[error("amount must not exceed {}", transactions::MAX_AMOUNT)]
    AmountTooLarge,
    #[error("unknown transaction type '{0}', expected 'income' or 'expense'")]
    InvalidKind(String),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{0}")]
    Transaction(#[from] TransactionError),
    #[error("no transaction at position {0}")]
    NotFound(usize),
    #[error("income or expense total would exceed {}", ledger::MAX_TOTAL)]
    TotalTooLarge,
    /// The in-memory change was applied but could not be written out.
    #[error("change kept in memory only: {0}")]
    Storage(#[from] StorageError),
}
