use thiserror::Error;

use stockbook_core::{DomainError, RecordId};
use stockbook_inventory::RecordKind;
use stockbook_storage::StorageError;

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors surfaced at the ledger boundary. None are retried automatically.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Rejected input; state is unchanged.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Lookup, edit or command target is missing.
    #[error("not found: {0}")]
    NotFound(String),

    /// Persistence failed; in-memory state is what it was before the call.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl LedgerError {
    pub fn not_found(kind: RecordKind, id: &RecordId) -> Self {
        Self::NotFound(format!("{kind} {id}"))
    }
}

impl From<DomainError> for LedgerError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => Self::Validation(msg),
            DomainError::NotFound => Self::NotFound("record".to_string()),
        }
    }
}
