//! Document registry
//!
//! The `DocumentRegistry` is the main entry point: list, create, read,
//! update, delete, duplicate, rename, switch, export and import resumes.
//!
//! ## Consistency
//!
//! Every operation reads the whole registry once and, if it mutates,
//! writes the whole registry once. There is no locking: two operations
//! running at the same time can both read the same state and the later
//! write wins. Callers are expected to issue one operation at a time.
//!
//! ## Usage
//!
//! ```ignore
//! let registry = DocumentRegistry::open(&config);
//!
//! let id = registry.create().await?;
//! registry.rename(&id, "My Resume").await?;
//!
//! for entry in registry.list().await? {
//!     println!("{} {}", entry.id, entry.record.name);
//! }
//! ```

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::id::{ClockIdGenerator, IdGenerator};
use crate::models::{DocumentRecord, Registry, RegistryEntry};
use crate::notify::{NotificationSink, TracingSink};
use crate::session::EditingSession;
use crate::storage::{FileStore, KeyValueStore, RecordStore, StorageError};
use crate::validation::{validate_registry, ValidationError};

/// File name used for exports
pub const EXPORT_FILE_NAME: &str = "MARKDOWN_RESUME_data.json";

/// Errors that can occur during registry operations
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The underlying store could not be read or written
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// No resume exists with the given id
    #[error("Resume not found: {id}")]
    NotFound { id: String },

    /// Import data is not valid JSON
    #[error("Import is not valid JSON: {0}")]
    Decode(String),

    /// Import data is JSON but not shaped like a registry
    #[error("Import rejected: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Serialized registry ready to be handed to a download target
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

/// Why an import was refused
#[derive(Debug, Clone, PartialEq)]
pub enum ImportRejection {
    Decode(String),
    Invalid(ValidationError),
}

impl std::fmt::Display for ImportRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportRejection::Decode(details) => write!(f, "not valid JSON: {}", details),
            ImportRejection::Invalid(err) => write!(f, "{}", err),
        }
    }
}

/// Result of `import_merge`
///
/// A rejected import is an expected outcome, not an error: the registry is
/// left untouched and the sink has been told.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// All records were valid and have been merged
    Merged { imported: usize },
    /// Nothing was merged
    Rejected(ImportRejection),
}

impl ImportOutcome {
    pub fn is_merged(&self) -> bool {
        matches!(self, ImportOutcome::Merged { .. })
    }

    /// Convert a rejection into a `RegistryError`
    pub fn into_result(self) -> RegistryResult<usize> {
        match self {
            ImportOutcome::Merged { imported } => Ok(imported),
            ImportOutcome::Rejected(ImportRejection::Decode(details)) => {
                Err(RegistryError::Decode(details))
            }
            ImportOutcome::Rejected(ImportRejection::Invalid(err)) => Err(err.into()),
        }
    }
}

/// Persistent collection of resumes
pub struct DocumentRegistry {
    records: RecordStore,
    ids: Arc<dyn IdGenerator>,
    sink: Arc<dyn NotificationSink>,
}

impl DocumentRegistry {
    /// Create a registry over a key-value store
    ///
    /// Uses wall-clock ids and logs notifications through `tracing`.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            records: RecordStore::new(store),
            ids: Arc::new(ClockIdGenerator),
            sink: Arc::new(TracingSink),
        }
    }

    /// Open the file-backed registry in the configured data directory
    pub fn open(config: &Config) -> Self {
        Self::new(Arc::new(FileStore::from_config(config)))
    }

    /// Replace the id generator
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    /// Replace the notification sink
    pub fn with_sink(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Get the record store backing this registry
    pub fn record_store(&self) -> &RecordStore {
        &self.records
    }

    // ==================== Queries ====================

    /// All resumes, most recently updated first
    ///
    /// Ordered descending by `updated_at`, or by id when a record has no
    /// update token, comparing as plain strings.
    pub async fn list(&self) -> RegistryResult<Vec<RegistryEntry>> {
        let registry = self.records.read_all().await?;

        let mut entries: Vec<RegistryEntry> = registry
            .into_iter()
            .map(|(id, record)| RegistryEntry { id, record })
            .collect();
        entries.sort_by(|a, b| b.record.sort_key(&b.id).cmp(a.record.sort_key(&a.id)));

        Ok(entries)
    }

    /// Number of stored resumes
    pub async fn count(&self) -> RegistryResult<usize> {
        Ok(self.records.read_all().await?.len())
    }

    /// Get a resume by id
    pub async fn get(&self, id: &str) -> RegistryResult<Option<DocumentRecord>> {
        let mut registry = self.records.read_all().await?;
        Ok(registry.remove(id))
    }

    // ==================== Mutations ====================

    /// Create a resume with default content and return its id
    ///
    /// An id minted in the same millisecond as an existing one replaces
    /// that record.
    pub async fn create(&self) -> RegistryResult<String> {
        let id = self.ids.next_id();
        let mut record = DocumentRecord::with_defaults();
        record.updated_at = Some(id.clone());

        let mut registry = self.records.read_all().await?;
        registry.insert(id.clone(), record);
        self.records.write_all(&registry).await?;

        info!(%id, "created resume");
        self.sink.notify_created();
        Ok(id)
    }

    /// Store `record` under `id`, replacing whatever was there
    pub async fn save(&self, id: &str, record: DocumentRecord) -> RegistryResult<()> {
        let mut registry = self.records.read_all().await?;
        registry.insert(id.to_string(), record);
        self.records.write_all(&registry).await?;

        info!(%id, "saved resume");
        self.sink.notify_saved();
        Ok(())
    }

    /// Delete a resume, returning the removed record
    ///
    /// Deleting an unknown id does nothing and notifies nobody.
    pub async fn delete(&self, id: &str) -> RegistryResult<Option<DocumentRecord>> {
        let mut registry = self.records.read_all().await?;

        let Some(removed) = registry.remove(id) else {
            return Ok(None);
        };

        self.records.write_all(&registry).await?;

        info!(%id, name = %removed.name, "deleted resume");
        self.sink.notify_deleted(&removed.name);
        Ok(Some(removed))
    }

    /// Copy a resume under a fresh id, returning the new id
    ///
    /// The copy's name gets a " Copy" suffix and its update token is the new
    /// id. Duplicating an unknown id does nothing.
    pub async fn duplicate(&self, id: &str) -> RegistryResult<Option<String>> {
        let mut registry = self.records.read_all().await?;

        let Some(original) = registry.get(id) else {
            return Ok(None);
        };

        let new_id = self.ids.next_id();
        let original_name = original.name.clone();

        let mut copy = original.clone();
        copy.name = format!("{} Copy", original_name);
        copy.updated_at = Some(new_id.clone());

        registry.insert(new_id.clone(), copy);
        self.records.write_all(&registry).await?;

        info!(%id, %new_id, "duplicated resume");
        self.sink.notify_duplicated(&original_name);
        Ok(Some(new_id))
    }

    /// Change the display name of an existing resume
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if `id` does not exist; nothing is
    /// written in that case.
    pub async fn rename(&self, id: &str, name: impl Into<String>) -> RegistryResult<()> {
        let mut registry = self.records.read_all().await?;

        let record = registry.get_mut(id).ok_or_else(|| RegistryError::NotFound {
            id: id.to_string(),
        })?;
        record.name = name.into();

        self.records.write_all(&registry).await?;

        info!(%id, "renamed resume");
        self.sink.notify_saved();
        Ok(())
    }

    /// Load a resume into the editing session
    ///
    /// Returns `false` without side effects if `id` does not exist, so the
    /// caller can report a resume that disappeared.
    pub async fn switch_active(
        &self,
        id: &str,
        session: &mut dyn EditingSession,
    ) -> RegistryResult<bool> {
        let registry = self.records.read_all().await?;

        let Some(record) = registry.get(id) else {
            return Ok(false);
        };

        session.load_active_document(id, record);

        info!(%id, "switched active resume");
        self.sink.notify_switched(&record.name);
        Ok(true)
    }

    // ==================== Export / Import ====================

    /// Serialize every resume for download
    pub async fn export_all(&self) -> RegistryResult<ExportFile> {
        let registry = self.records.read_all().await?;
        let contents = serde_json::to_string(&registry).map_err(StorageError::from)?;

        info!(records = registry.len(), "exported resumes");
        Ok(ExportFile {
            file_name: EXPORT_FILE_NAME.to_string(),
            contents,
        })
    }

    /// Merge an exported registry into this one
    ///
    /// See [`DocumentRegistry::import_merge_with`].
    pub async fn import_merge(&self, blob: &str) -> RegistryResult<ImportOutcome> {
        self.import_merge_with(blob, || {}).await
    }

    /// Merge an exported registry into this one, then run `on_complete`
    ///
    /// The whole blob is validated first; a single malformed record rejects
    /// the import and leaves the registry untouched. Imported records
    /// replace existing records with the same id. `on_complete` runs only
    /// after a successful merge.
    pub async fn import_merge_with(
        &self,
        blob: &str,
        on_complete: impl FnOnce(),
    ) -> RegistryResult<ImportOutcome> {
        let imported = match decode_import(blob) {
            Ok(imported) => imported,
            Err(rejection) => {
                warn!(%rejection, "import rejected");
                self.sink.notify_import_result(false);
                return Ok(ImportOutcome::Rejected(rejection));
            }
        };

        let mut registry = self.records.read_all().await?;
        let count = imported.len();
        registry.extend(imported);
        self.records.write_all(&registry).await?;

        info!(imported = count, total = registry.len(), "imported resumes");
        self.sink.notify_import_result(true);
        on_complete();

        Ok(ImportOutcome::Merged { imported: count })
    }
}

/// Decode and validate an import blob
fn decode_import(blob: &str) -> Result<Registry, ImportRejection> {
    let value: Value =
        serde_json::from_str(blob).map_err(|e| ImportRejection::Decode(e.to_string()))?;

    validate_registry(&value).map_err(ImportRejection::Invalid)?;

    serde_json::from_value(value).map_err(|e| ImportRejection::Decode(e.to_string()))
}
