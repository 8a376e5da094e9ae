//! Ledger domain models: transactions, categories, month keys, and the
//! per-month budget/savings book.

pub mod budget;
pub mod category;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod period;
pub mod transaction;

pub use budget::TargetBook;
pub use category::Category;
pub use ledger::Ledger;
pub use period::MonthKey;
pub use transaction::{Transaction, TransactionKind, TransactionPatch};
