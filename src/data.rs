use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::accounting::transactions::{Transaction, TransactionKind};

pub const DEFAULT_LEDGER_FILE: &str = "transactions.json";

const INDENT: &[u8] = b"    ";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("failed to encode transactions: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One entry of the persisted document. Amounts are written as exact JSON
/// numbers, digit for digit.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionRecord {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub description: String,
    pub date: String,
    pub category: String,
    #[serde(rename = "Type")]
    pub kind: TransactionKind,
}

impl From<&Transaction> for TransactionRecord {
    fn from(transaction: &Transaction) -> Self {
        TransactionRecord {
            amount: transaction.amount(),
            description: transaction.description().clone(),
            date: transaction.date().clone(),
            category: transaction.category().clone(),
            kind: transaction.kind(),
        }
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = crate::accounting::TransactionError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        Transaction::new(record.amount, record.description, record.date, record.category, record.kind)
    }
}

/// The whole ledger as a single JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> JsonStore {
        JsonStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every stored transaction. A missing document reads as empty.
    /// Records that fail validation are skipped.
    pub fn load(&self) -> Result<Vec<Transaction>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no ledger document at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            },
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            },
        };

        let records: Vec<TransactionRecord> =
            serde_json::from_str(&content).map_err(|source| StorageError::Parse {
                path: self.path.clone(),
                source,
            })?;

        let mut transactions = Vec::with_capacity(records.len());
        for (position, record) in records.into_iter().enumerate() {
            match Transaction::try_from(record) {
                Ok(transaction) => transactions.push(transaction),
                Err(err) => warn!("skipping stored record {}, err={}", position, err),
            }
        }

        Ok(transactions)
    }

    /// Overwrites the document with `transactions`, indented for reading.
    pub fn save(&self, transactions: &[Transaction]) -> Result<(), StorageError> {
        let records: Vec<TransactionRecord> = transactions.iter().map(TransactionRecord::from).collect();
        let encoded = encode_pretty(&records)?;

        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };
        let file = File::create(&self.path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&encoded).map_err(write_err)?;
        writer.flush().map_err(write_err)?;

        Ok(())
    }
}

fn encode_pretty(records: &[TransactionRecord]) -> Result<Vec<u8>, StorageError> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    records.serialize(&mut serializer)?;
    Ok(buffer)
}
