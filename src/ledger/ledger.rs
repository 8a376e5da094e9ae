use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

use super::{
    budget::TargetBook,
    transaction::{Transaction, TransactionKind, TransactionPatch},
};

pub(crate) const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Ordered record of every income and expense, plus the monthly targets
/// tracked against it.
///
/// Positions handed to [`Ledger::delete`] and [`Ledger::edit`] are 1-based
/// offsets into insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    #[serde(default)]
    transactions: Vec<Transaction>,
    #[serde(default)]
    targets: TargetBook,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            targets: TargetBook::new(),
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add(&mut self, transaction: Transaction) {
        tracing::debug!(%transaction, "transaction added");
        self.transactions.push(transaction);
    }

    pub fn get(&self, position: usize) -> Result<&Transaction, LedgerError> {
        self.check_position(position)?;
        Ok(&self.transactions[position - 1])
    }

    /// Removes the transaction at `position`, returning it.
    pub fn delete(&mut self, position: usize) -> Result<Transaction, LedgerError> {
        self.check_position(position)?;
        let removed = self.transactions.remove(position - 1);
        tracing::debug!(position, transaction = %removed, "transaction deleted");
        Ok(removed)
    }

    /// Removes the inclusive range `start..=end`, returning the removed
    /// transactions in ledger order. Nothing is removed on error.
    pub fn delete_range(
        &mut self,
        start: usize,
        end: usize,
    ) -> Result<Vec<Transaction>, LedgerError> {
        if start > end {
            return Err(LedgerError::InvalidRange { start, end });
        }
        self.check_position(start)?;
        self.check_position(end)?;
        let removed: Vec<Transaction> = self.transactions.drain(start - 1..end).collect();
        tracing::debug!(start, end, count = removed.len(), "transactions deleted");
        Ok(removed)
    }

    /// Replaces the patched fields of the transaction at `position` and
    /// returns the updated record.
    pub fn edit(
        &mut self,
        position: usize,
        patch: TransactionPatch,
    ) -> Result<&Transaction, LedgerError> {
        self.check_position(position)?;
        let transaction = &mut self.transactions[position - 1];
        if patch.category.is_some() && transaction.is_income() {
            return Err(LedgerError::InvalidEdit(
                "income transactions have no category".into(),
            ));
        }

        if let Some(amount) = patch.amount {
            transaction.amount = amount;
        }
        if let Some(description) = patch.description {
            transaction.description = description;
        }
        if let Some(date) = patch.date {
            transaction.date = date;
        }
        if let Some(tags) = patch.tags {
            transaction.tags = tags;
        }
        if let (Some(category), TransactionKind::Expense { category: current }) =
            (patch.category, &mut transaction.kind)
        {
            *current = category;
        }
        tracing::debug!(position, %transaction, "transaction edited");
        Ok(transaction)
    }

    /// All transactions, most recent first. Equal dates keep insertion order.
    pub fn list(&self) -> Vec<&Transaction> {
        self.list_indexed()
            .into_iter()
            .map(|(_, transaction)| transaction)
            .collect()
    }

    /// Same ordering as [`Ledger::list`], paired with each entry's 1-based
    /// ledger position.
    pub fn list_indexed(&self) -> Vec<(usize, &Transaction)> {
        let mut indexed: Vec<(usize, &Transaction)> = self
            .transactions
            .iter()
            .enumerate()
            .map(|(offset, transaction)| (offset + 1, transaction))
            .collect();
        // `sort_by` is stable, which keeps insertion order among equal dates.
        indexed.sort_by(|(_, a), (_, b)| b.date.cmp(&a.date));
        indexed
    }

    /// Transactions dated within `start..=end`, in ledger order.
    pub fn filter(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|transaction| transaction.date >= start && transaction.date <= end)
            .collect()
    }

    /// Transactions whose description contains `keyword`, ignoring case.
    pub fn search(&self, keyword: &str) -> Vec<&Transaction> {
        let needle = keyword.to_lowercase();
        self.transactions
            .iter()
            .filter(|transaction| transaction.description.to_lowercase().contains(&needle))
            .collect()
    }

    /// Always exactly `total_income() - total_expenses()`, rounding included.
    pub fn balance(&self) -> f64 {
        self.total_income() - self.total_expenses()
    }

    pub fn total_income(&self) -> f64 {
        self.transactions
            .iter()
            .filter(|transaction| transaction.is_income())
            .map(|transaction| transaction.amount)
            .sum()
    }

    pub fn total_expenses(&self) -> f64 {
        self.transactions
            .iter()
            .filter(|transaction| transaction.is_expense())
            .map(|transaction| transaction.amount)
            .sum()
    }

    /// Drops every transaction. Monthly targets are kept.
    pub fn clear(&mut self) {
        tracing::debug!(count = self.transactions.len(), "ledger cleared");
        self.transactions.clear();
    }

    pub fn count(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn targets(&self) -> &TargetBook {
        &self.targets
    }

    pub fn targets_mut(&mut self) -> &mut TargetBook {
        &mut self.targets
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    fn check_position(&self, position: usize) -> Result<(), LedgerError> {
        let size = self.transactions.len();
        if position == 0 || position > size {
            return Err(LedgerError::OutOfRange {
                index: position,
                size,
            });
        }
        Ok(())
    }
}
