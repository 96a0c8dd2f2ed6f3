//! Registry persistence
//!
//! The whole registry lives under a single key in the key-value store.
//! Every read decodes the full mapping and every write replaces it; there
//! are no per-record keys.

use std::sync::Arc;

use tracing::debug;

use super::backend::KeyValueStore;
use super::error::{StorageError, StorageResult};
use crate::models::Registry;

/// Key under which the serialized registry is stored
pub const REGISTRY_KEY: &str = "MARKDOWN_RESUME_data";

/// Read-all / write-all access to the persisted registry
#[derive(Clone)]
pub struct RecordStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl RecordStore {
    /// Create a record store over the given key-value store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, REGISTRY_KEY)
    }

    /// Create a record store that keeps the registry under a custom key
    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The storage key holding the registry
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the full registry
    ///
    /// Returns an empty registry if nothing has been stored yet. A stored
    /// `null` is treated the same as no value.
    pub async fn read_all(&self) -> StorageResult<Registry> {
        let Some(raw) = self.store.get(&self.key).await? else {
            debug!(key = %self.key, "no registry stored yet");
            return Ok(Registry::new());
        };

        let registry: Option<Registry> =
            serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt {
                key: self.key.clone(),
                details: e.to_string(),
            })?;

        let registry = registry.unwrap_or_default();
        debug!(key = %self.key, records = registry.len(), "loaded registry");
        Ok(registry)
    }

    /// Replace the persisted registry
    pub async fn write_all(&self, registry: &Registry) -> StorageResult<()> {
        let raw = serde_json::to_string(registry)?;
        self.store.set(&self.key, &raw).await?;
        debug!(key = %self.key, records = registry.len(), "saved registry");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentRecord;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_read_all_empty_on_first_read() {
        let records = RecordStore::new(Arc::new(MemoryStore::new()));
        assert!(records.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_all_null_sentinel() {
        let store = Arc::new(MemoryStore::with_value(REGISTRY_KEY, "null"));
        let records = RecordStore::new(store);
        assert!(records.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let store = Arc::new(MemoryStore::new());
        let records = RecordStore::new(store.clone());

        let mut registry = Registry::new();
        registry.insert("1".to_string(), DocumentRecord::with_defaults());
        records.write_all(&registry).await.unwrap();

        assert_eq!(records.read_all().await.unwrap(), registry);
        assert!(store.raw(REGISTRY_KEY).await.unwrap().contains("styleSheet"));
    }

    #[tokio::test]
    async fn test_corrupt_value() {
        let store = Arc::new(MemoryStore::with_value(REGISTRY_KEY, "{not json"));
        let records = RecordStore::new(store);

        let err = records.read_all().await.unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn test_write_failure_propagates() {
        let store = Arc::new(MemoryStore::new());
        store.fail_writes(true);
        let records = RecordStore::new(store);

        let err = records.write_all(&Registry::new()).await.unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));
    }

    #[tokio::test]
    async fn test_custom_key() {
        let store = Arc::new(MemoryStore::new());
        let records = RecordStore::with_key(store.clone(), "other");

        records.write_all(&Registry::new()).await.unwrap();
        assert_eq!(records.key(), "other");
        assert!(store.raw("other").await.is_some());
        assert!(store.raw(REGISTRY_KEY).await.is_none());
    }
}
