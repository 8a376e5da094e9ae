pub mod budget_service;
pub mod summary_service;
pub mod transaction_service;

pub use budget_service::{BudgetProgress, BudgetService, SavingsProgress};
pub use summary_service::{rank_with_cutoff, MonthlySummary, SummaryService};
pub use transaction_service::TransactionService;

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Invalid(String),
}

pub(crate) fn validate_amount(amount: f64) -> ServiceResult<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ServiceError::Invalid(format!(
            "amount must be a non-negative number, got {amount}"
        )));
    }
    Ok(())
}
