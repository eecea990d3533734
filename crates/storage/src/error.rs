use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure of the underlying persistence layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Backend unreachable or an IO/driver error occurred.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The write would exceed the space available to this store.
    #[error("storage quota exceeded")]
    QuotaExceeded,

    /// A persisted blob could not be decoded.
    #[error("corrupt blob under key {key:?}: {reason}")]
    Corrupt { key: String, reason: String },
}

impl StorageError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn corrupt(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
