//! Validated entry points for recording and amending transactions.

use crate::ledger::{Ledger, Transaction, TransactionPatch};

use super::{validate_amount, ServiceError, ServiceResult};

/// Applies input rules before touching the ledger.
pub struct TransactionService;

impl TransactionService {
    /// Appends `transaction` after checking amount, description and tag count.
    pub fn record(
        ledger: &mut Ledger,
        transaction: Transaction,
        max_tags: usize,
    ) -> ServiceResult<()> {
        validate_amount(transaction.amount)?;
        validate_description(&transaction.description)?;
        validate_tags(&transaction.tags, max_tags)?;
        ledger.add(transaction);
        Ok(())
    }

    /// Applies `patch` to the transaction at `position` and returns a copy of
    /// the result.
    pub fn amend(
        ledger: &mut Ledger,
        position: usize,
        patch: TransactionPatch,
        max_tags: usize,
    ) -> ServiceResult<Transaction> {
        if patch.is_empty() {
            return Err(ServiceError::Invalid("nothing to edit".into()));
        }
        if let Some(amount) = patch.amount {
            validate_amount(amount)?;
        }
        if let Some(description) = &patch.description {
            validate_description(description)?;
        }
        if let Some(tags) = &patch.tags {
            validate_tags(tags, max_tags)?;
        }
        Ok(ledger.edit(position, patch)?.clone())
    }
}

fn validate_description(description: &str) -> ServiceResult<()> {
    if description.trim().is_empty() {
        return Err(ServiceError::Invalid("description cannot be empty".into()));
    }
    Ok(())
}

fn validate_tags(tags: &[String], max_tags: usize) -> ServiceResult<()> {
    if tags.len() > max_tags {
        return Err(ServiceError::Invalid(format!(
            "at most {max_tags} tags are allowed"
        )));
    }
    if tags.iter().any(|tag| tag.trim().is_empty()) {
        return Err(ServiceError::Invalid("tags cannot be empty".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LedgerError;
    use crate::ledger::Category;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 14).unwrap()
    }

    #[test]
    fn record_rejects_invalid_input() {
        let mut ledger = Ledger::new();
        let negative = Transaction::income(-5.0, "Oops", date(), vec![]);
        let blank = Transaction::income(5.0, "  ", date(), vec![]);
        let tagged = Transaction::expense(
            5.0,
            "Flowers",
            date(),
            Category::Shopping,
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
        );
        assert!(TransactionService::record(&mut ledger, negative, 3).is_err());
        assert!(TransactionService::record(&mut ledger, blank, 3).is_err());
        assert!(TransactionService::record(&mut ledger, tagged, 3).is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn amend_surfaces_out_of_range() {
        let mut ledger = Ledger::new();
        TransactionService::record(
            &mut ledger,
            Transaction::income(5.0, "Tip", date(), vec![]),
            3,
        )
        .unwrap();
        let patch = TransactionPatch {
            amount: Some(6.0),
            ..TransactionPatch::default()
        };
        let err = TransactionService::amend(&mut ledger, 2, patch.clone(), 3)
            .expect_err("position 2 does not exist");
        assert!(matches!(
            err,
            ServiceError::Ledger(LedgerError::OutOfRange { index: 2, size: 1 })
        ));

        let updated = TransactionService::amend(&mut ledger, 1, patch, 3).unwrap();
        assert_eq!(updated.amount, 6.0);
    }

    #[test]
    fn amend_requires_some_change() {
        let mut ledger = Ledger::new();
        ledger.add(Transaction::income(5.0, "Tip", date(), vec![]));
        assert!(TransactionService::amend(&mut ledger, 1, TransactionPatch::default(), 3).is_err());
    }
}
