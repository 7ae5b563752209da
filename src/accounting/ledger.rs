use std::collections::HashMap;
use std::path::Path;
use std::slice::Iter;

use log::{debug, error, info, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::transactions::{Transaction, TransactionKind};
use super::LedgerError;
use crate::data::{JsonStore, StorageError};

/// Upper bound for the income total and for the expense total.
pub const MAX_TOTAL: Decimal = dec!(1000000000000000);

/// Income and expense totals over a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub income: Decimal,
    pub expense: Decimal,
}

impl Summary {
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }

    /// Totals with `transaction` counted in, or `None` past `MAX_TOTAL`.
    pub fn with(&self, transaction: &Transaction) -> Option<Summary> {
        let mut next = *self;
        let total = if transaction.is_income() {
            &mut next.income
        } else {
            &mut next.expense
        };

        *total = total.checked_add(transaction.amount())?;
        if *total > MAX_TOTAL {
            return None;
        }

        Some(next)
    }

    fn without(&self, transaction: &Transaction) -> Summary {
        let mut next = *self;
        if transaction.is_income() {
            next.income -= transaction.amount();
        } else {
            next.expense -= transaction.amount();
        }
        next
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotals {
    pub category: String,
    pub income: Decimal,
    pub expense: Decimal,
}

impl CategoryTotals {
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }
}

/// Per-category totals, kept in the order each category first appeared.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryBreakdown {
    entries: Vec<CategoryTotals>,
}

impl CategoryBreakdown {
    pub fn get(&self, category: &str) -> Option<&CategoryTotals> {
        self.entries.iter().find(|totals| totals.category == category)
    }

    pub fn iter(&self) -> Iter<'_, CategoryTotals> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a CategoryBreakdown {
    type Item = &'a CategoryTotals;
    type IntoIter = Iter<'a, CategoryTotals>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Ordered transactions bound to their document.
///
/// `totals` always holds the income and expense sums of `transactions`, and
/// both stay within `MAX_TOTAL`, so no aggregation over the ledger overflows.
pub struct Ledger {
    transactions: Vec<Transaction>,
    totals: Summary,
    store: JsonStore,
    unsaved: bool,
}

impl Ledger {
    pub fn new(store: JsonStore) -> Ledger {
        Ledger {
            transactions: Vec::new(),
            totals: Summary::default(),
            store,
            unsaved: false,
        }
    }

    /// Loads whatever `store` holds. An unreadable document is logged and
    /// the ledger starts empty.
    pub fn load(store: JsonStore) -> Ledger {
        let stored = match store.load() {
            Ok(stored) => stored,
            Err(err) => {
                error!("error loading transactions, starting empty, err={}", err);
                Vec::new()
            },
        };

        let mut ledger = Ledger::new(store);
        for (position, transaction) in stored.into_iter().enumerate() {
            match ledger.totals.with(&transaction) {
                Some(totals) => {
                    ledger.totals = totals;
                    ledger.transactions.push(transaction);
                },
                None => warn!("skipping stored record {}, err={}", position, LedgerError::TotalTooLarge),
            }
        }

        info!("loaded {} transactions from {}", ledger.len(), ledger.path().display());
        ledger
    }

    /// Records a new transaction and writes the ledger out.
    ///
    /// On `LedgerError::Storage` the transaction is still part of the ledger,
    /// only the document on disk is behind.
    pub fn append(
        &mut self,
        amount: Decimal,
        description: &str,
        date: &str,
        category: &str,
        kind: TransactionKind,
    ) -> Result<(), LedgerError> {
        let transaction = Transaction::new(amount, description, date, category, kind)?;
        let totals = self.totals.with(&transaction).ok_or(LedgerError::TotalTooLarge)?;

        debug!("appending {} of {} in '{}'", kind, amount, category);
        self.transactions.push(transaction);
        self.totals = totals;

        self.persist()?;
        Ok(())
    }

    /// Removes the transaction at `index` (0-based) and writes the ledger out.
    ///
    /// As with `append`, a storage failure leaves the removal in place.
    pub fn remove_at(&mut self, index: usize) -> Result<Transaction, LedgerError> {
        if index >= self.transactions.len() {
            return Err(LedgerError::NotFound(index));
        }

        let removed = self.transactions.remove(index);
        self.totals = self.totals.without(&removed);
        debug!("removed transaction {} '{}'", index, removed.description());

        self.persist()?;
        Ok(removed)
    }

    pub fn balance(&self) -> Decimal {
        // Partial sums never leave [-expense, income].
        self.transactions.iter().map(Transaction::signed_amount).sum()
    }

    pub fn summary(&self) -> Summary {
        self.totals
    }

    pub fn category_breakdown(&self) -> CategoryBreakdown {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut entries: Vec<CategoryTotals> = Vec::new();

        for transaction in &self.transactions {
            let category = transaction.category().as_str();
            let position = *positions.entry(category).or_insert_with(|| {
                entries.push(CategoryTotals {
                    category: category.to_owned(),
                    income: Decimal::ZERO,
                    expense: Decimal::ZERO,
                });
                entries.len() - 1
            });

            // Each category total is bounded by the matching ledger total.
            let totals = &mut entries[position];
            match transaction.kind() {
                TransactionKind::Income => totals.income += transaction.amount(),
                TransactionKind::Expense => totals.expense += transaction.amount(),
            }
        }

        CategoryBreakdown { entries }
    }

    /// Overwrites the document with the full in-memory sequence.
    pub fn persist(&mut self) -> Result<(), StorageError> {
        match self.store.save(&self.transactions) {
            Ok(()) => {
                debug!("saved {} transactions to {}", self.transactions.len(), self.store.path().display());
                self.unsaved = false;
                Ok(())
            },
            Err(err) => {
                error!("error saving transactions, err={}", err);
                self.unsaved = true;
                Err(err)
            },
        }
    }

    /// True when the document on disk is known to lag behind memory.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }
}
