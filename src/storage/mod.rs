pub mod json_backend;

use crate::{errors::StorageError, ledger::Ledger};

pub type Result<T> = std::result::Result<T, StorageError>;

/// Abstraction over where the ledger lives between sessions.
pub trait StorageBackend {
    /// Loads the persisted ledger, or an empty one when nothing was saved yet.
    fn load(&self) -> Result<Ledger>;
    fn save(&self, ledger: &Ledger) -> Result<()>;
}

pub use json_backend::JsonStorage;
