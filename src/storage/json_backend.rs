use std::{fs, path::PathBuf};

use crate::{
    core::utils::write_atomic,
    errors::StorageError,
    ledger::{ledger::CURRENT_SCHEMA_VERSION, Ledger},
};

use super::{Result, StorageBackend};

/// Keeps the whole ledger as one pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<Ledger> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "no data file yet, starting empty");
            return Ok(Ledger::new());
        }
        let data = fs::read_to_string(&self.path)?;
        let ledger: Ledger = serde_json::from_str(&data)?;
        if ledger.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(StorageError::UnsupportedSchema(ledger.schema_version));
        }
        tracing::info!(
            path = %self.path.display(),
            transactions = ledger.count(),
            "ledger loaded"
        );
        Ok(ledger)
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        let json = serde_json::to_string_pretty(ledger)?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), "ledger saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Category, MonthKey, Transaction};
    use chrono::NaiveDate;

    #[test]
    fn missing_file_loads_empty_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().join("finbro.json"));
        let ledger = storage.load().unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn save_then_load_restores_transactions_and_targets() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().join("finbro.json"));
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let april = MonthKey::new(4, 2025).unwrap();

        let mut ledger = Ledger::new();
        ledger.add(Transaction::income(3000.0, "Salary", date, vec!["Work".into()]));
        ledger.add(Transaction::expense(
            25.5,
            "Lunch",
            date,
            Category::Food,
            vec![],
        ));
        ledger.targets_mut().set_budget(april, 1500.0);
        ledger.targets_mut().set_savings_goal(april, 800.0);
        storage.save(&ledger).unwrap();

        let restored = storage.load().unwrap();
        assert_eq!(restored, ledger);
    }

    #[test]
    fn rejects_newer_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("finbro.json");
        fs::write(&path, r#"{ "transactions": [], "schema_version": 99 }"#).unwrap();
        let err = JsonStorage::new(&path).load().expect_err("schema 99 is unknown");
        assert!(matches!(err, StorageError::UnsupportedSchema(99)));
    }

    #[test]
    fn corrupt_file_reports_serde_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("finbro.json");
        fs::write(&path, "not json").unwrap();
        let err = JsonStorage::new(&path).load().expect_err("garbage must fail");
        assert!(matches!(err, StorageError::Serde(_)));
    }

    #[test]
    fn out_of_calendar_month_in_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("finbro.json");
        fs::write(
            &path,
            r#"{
                "transactions": [],
                "targets": { "budgets": [{ "year": 2025, "month": 13, "amount": 100.0 }] },
                "schema_version": 1
            }"#,
        )
        .unwrap();
        let err = JsonStorage::new(&path).load().expect_err("month 13 must fail");
        assert!(matches!(err, StorageError::Serde(_)));
    }
}
