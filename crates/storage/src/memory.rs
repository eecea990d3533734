use std::collections::HashMap;
use std::sync::RwLock;

use crate::{KeyValueStore, StorageError, StorageResult};

/// In-memory key/value store for tests/dev.
///
/// An optional quota caps the total bytes of keys plus values, mirroring the
/// per-origin limit of browser storage.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn poisoned() -> StorageError {
        StorageError::unavailable("in-memory store lock poisoned")
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let map = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut map = self.inner.write().map_err(|_| Self::poisoned())?;

        if let Some(quota) = self.quota_bytes {
            let others: usize = map
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if others + key.len() + value.len() > quota {
                return Err(StorageError::QuotaExceeded);
            }
        }

        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut map = self.inner.write().map_err(|_| Self::poisoned())?;
        map.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_reads_as_none() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn set_replaces_and_remove_clears() {
        let store = InMemoryStore::new();
        store.set("k", "a").unwrap();
        store.set("k", "b").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("b"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn quota_rejects_oversized_write_and_keeps_old_value() {
        let store = InMemoryStore::with_quota(8);
        store.set("k", "1234").unwrap();
        assert_eq!(store.set("k", "123456789"), Err(StorageError::QuotaExceeded));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("1234"));
    }
}
