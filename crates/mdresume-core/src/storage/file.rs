//! File-backed key-value store
//!
//! Each key is stored as its own file in a directory. Writes are atomic
//! (write to temp file, sync, then rename) so a crash never leaves a
//! partially written value behind.
//!
//! Storage location: `~/.local/share/mdresume/store/` (configurable via `Config`)
//!
//! Files:
//! - `{key}.json` - The value stored under `key`

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::backend::KeyValueStore;
use super::error::{StorageError, StorageResult};
use crate::config::Config;

/// Key-value store persisting one file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the given directory
    ///
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a store in the configured data directory
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.store_dir())
    }

    /// Directory holding the value files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Size in bytes of the value stored under `key`, if any
    pub async fn size_of(&self, key: &str) -> StorageResult<Option<u64>> {
        match fs::metadata(self.path_for(key)).await {
            Ok(meta) => Ok(Some(meta.len())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadError {
                path: self.path_for(key),
                source: e,
            }),
        }
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key);

        match fs::read_to_string(&path).await {
            Ok(content) => {
                debug!(key, bytes = content.len(), "read value");
                Ok(Some(content))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                Err(StorageError::PermissionDenied { path, source: e })
            }
            Err(e) => Err(StorageError::ReadError { path, source: e }),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key);
        atomic_write(&path, value.as_bytes()).await?;
        debug!(key, bytes = value.len(), "wrote value");
        Ok(())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
async fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| StorageError::from_io(e, parent.to_path_buf()))?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = path.with_extension("tmp");

    let mut file = fs::File::create(&temp_path)
        .await
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.write_all(data)
        .await
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.sync_all()
        .await
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path)
        .await
        .map_err(|e| StorageError::AtomicWriteFailed {
            from: temp_path.clone(),
            to: path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_get_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        assert!(store.get("nothing").await.unwrap().is_none());
        assert!(store.size_of("nothing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.set("resumes", r#"{"1":{}}"#).await.unwrap();

        assert_eq!(
            store.get("resumes").await.unwrap().as_deref(),
            Some(r#"{"1":{}}"#)
        );
        assert!(store.path_for("resumes").exists());
        assert_eq!(store.size_of("resumes").await.unwrap(), Some(8));
    }

    #[tokio::test]
    async fn test_set_overwrites_and_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.set("resumes", "first").await.unwrap();
        store.set("resumes", "second").await.unwrap();

        assert_eq!(store.get("resumes").await.unwrap().as_deref(), Some("second"));
        assert!(!store.path_for("resumes").with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_set_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b").join("c");
        let store = FileStore::new(&nested);

        store.set("key", "test data").await.unwrap();

        let content = std::fs::read_to_string(nested.join("key.json")).unwrap();
        assert_eq!(content, "test data");
    }

    #[tokio::test]
    async fn test_values_survive_new_handle() {
        let temp_dir = TempDir::new().unwrap();

        FileStore::new(temp_dir.path())
            .set("key", "persisted")
            .await
            .unwrap();

        let reopened = FileStore::new(temp_dir.path());
        assert_eq!(reopened.get("key").await.unwrap().as_deref(), Some("persisted"));
    }
}
