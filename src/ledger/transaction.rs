use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::Category;

/// Distinguishes money coming in from money going out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum TransactionKind {
    Income,
    Expense { category: Category },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub tags: Vec<String>,
    pub kind: TransactionKind,
}

impl Transaction {
    pub fn income(
        amount: f64,
        description: impl Into<String>,
        date: NaiveDate,
        tags: Vec<String>,
    ) -> Self {
        Self {
            amount,
            description: description.into(),
            date,
            tags,
            kind: TransactionKind::Income,
        }
    }

    pub fn expense(
        amount: f64,
        description: impl Into<String>,
        date: NaiveDate,
        category: Category,
        tags: Vec<String>,
    ) -> Self {
        Self {
            amount,
            description: description.into(),
            date,
            tags,
            kind: TransactionKind::Expense { category },
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self.kind, TransactionKind::Income)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self.kind, TransactionKind::Expense { .. })
    }

    /// Category of an expense; incomes carry none.
    pub fn category(&self) -> Option<Category> {
        match self.kind {
            TransactionKind::Income => None,
            TransactionKind::Expense { category } => Some(category),
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TransactionKind::Income => write!(f, "[Income]")?,
            TransactionKind::Expense { category } => write!(f, "[Expense][{category}]")?,
        }
        write!(f, " ${:.2} - {}", self.amount, self.description)?;
        if !self.tags.is_empty() {
            write!(f, " [{}]", self.tags.join(", "))?;
        }
        Ok(())
    }
}

/// Field replacements applied by [`Ledger::edit`](super::Ledger::edit).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub category: Option<Category>,
    pub tags: Option<Vec<String>>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }

    #[test]
    fn display_matches_prompt_format() {
        let income = Transaction::income(3000.0, "Salary", date(), vec!["Work".into()]);
        assert_eq!(income.to_string(), "[Income] $3000.00 - Salary [Work]");

        let expense = Transaction::expense(
            25.5,
            "Lunch",
            date(),
            Category::Food,
            vec!["Work".into(), "Team".into()],
        );
        assert_eq!(
            expense.to_string(),
            "[Expense][Food] $25.50 - Lunch [Work, Team]"
        );

        let untagged = Transaction::expense(4.0, "Bus", date(), Category::Transport, vec![]);
        assert_eq!(untagged.to_string(), "[Expense][Transport] $4.00 - Bus");
    }

    #[test]
    fn category_follows_kind() {
        let income = Transaction::income(10.0, "Gift", date(), vec![]);
        let expense = Transaction::expense(4.0, "Snack", date(), Category::Food, vec![]);
        assert!(income.is_income() && !income.is_expense());
        assert_eq!(income.category(), None);
        assert_eq!(expense.category(), Some(Category::Food));
    }

    #[test]
    fn patch_emptiness() {
        assert!(TransactionPatch::default().is_empty());
        let patch = TransactionPatch {
            amount: Some(1.0),
            ..TransactionPatch::default()
        };
        assert!(!patch.is_empty());
    }
}
