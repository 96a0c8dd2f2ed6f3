//! In-memory key-value store for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::backend::KeyValueStore;
use super::error::{StorageError, StorageResult};

/// An in-memory key-value store.
///
/// Suitable for unit tests and for embedding the registry without a data
/// directory. Failures can be injected to exercise storage error paths.
///
/// # Example
///
/// ```ignore
/// let store = MemoryStore::new();
/// store.set("key", "value").await?;
/// assert_eq!(store.write_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with one pre-existing value.
    ///
    /// Useful for testing how callers handle previously stored data.
    #[must_use]
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        Self {
            values: RwLock::new(values),
            ..Self::default()
        }
    }

    /// Makes every subsequent `get` fail with `StorageError::Unavailable`.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent `set` fail with `StorageError::QuotaExceeded`.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Returns a copy of the raw value under `key`.
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.values.read().await.get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("memory store reads disabled".into()));
        }
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
            });
        }
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = MemoryStore::new();
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_replaces_value() {
        let store = MemoryStore::new();
        store.set("key", "one").await.unwrap();
        store.set("key", "two").await.unwrap();

        assert_eq!(store.get("key").await.unwrap().as_deref(), Some("two"));
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn test_with_value() {
        let store = MemoryStore::with_value("key", "stored");
        assert_eq!(store.raw("key").await.as_deref(), Some("stored"));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let store = MemoryStore::new();

        store.fail_writes(true);
        let err = store.set("key", "value").await.unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));
        assert_eq!(store.write_count(), 0);

        store.fail_reads(true);
        let err = store.get("key").await.unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));

        store.fail_reads(false);
        store.fail_writes(false);
        store.set("key", "value").await.unwrap();
        assert_eq!(store.get("key").await.unwrap().as_deref(), Some("value"));
    }
}
