//! Key-value store trait definition.

use async_trait::async_trait;

use super::error::StorageResult;

/// An asynchronous key-value store holding text blobs.
///
/// Stores are **opaque**: they never interpret the values they hold. The
/// record store owns the JSON encoding of the registry.
///
/// # Invariants
///
/// - `get` returns `None` for a key that has never been written
/// - `set` replaces the whole value for a key; a reader never observes a
///   partially written value
/// - Stores must be `Send + Sync` so one store can back several registries
///
/// # Implementors
///
/// - [`super::MemoryStore`] - For testing
/// - [`super::FileStore`] - For persistent storage
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any prior value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable or rejects the write
    /// (for example when it is out of space).
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}
