//! Persisted state for the stock ledger.
//!
//! The ledger keeps each record collection as one serialized blob under its own
//! key. This crate provides the key/value seam and its backends:
//! - `InMemoryStore`: tests/dev, optional byte quota
//! - `SqliteStore`: durable local file (feature `sqlite`)

pub mod error;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

use std::sync::Arc;

pub use error::{StorageError, StorageResult};
pub use memory::InMemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

/// Synchronous key/value store holding whole serialized collections.
///
/// Writes replace the value for a key in full; there is no locking or
/// versioning (last write wins).
pub trait KeyValueStore: Send + Sync {
    /// Read a blob. An absent key is `Ok(None)`, never an error.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

impl<S> KeyValueStore for Box<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}
