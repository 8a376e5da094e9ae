use thiserror::Error;

/// Failures raised by ledger and budget-store operations.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("Index {index} is out of range. Valid indices are 1 to {size}.")]
    OutOfRange { index: usize, size: usize },
    #[error("Invalid range {start}-{end}: start must not exceed end.")]
    InvalidRange { start: usize, end: usize },
    #[error("Invalid month {0}: expected a value from 1 to 12.")]
    InvalidMonth(u32),
    #[error("Invalid edit: {0}")]
    InvalidEdit(String),
}

/// Failures raised while reading or writing the ledger snapshot.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Unsupported data file schema v{0}")]
    UnsupportedSchema(u8),
}
