//! mdresume Core Library
//!
//! This crate provides the storage core for mdresume, a local-first
//! markdown resume editor: a registry of resumes kept as a single JSON
//! value in an asynchronous key-value store.
//!
//! # Architecture
//!
//! - **KeyValueStore**: async get/set by key (file-backed or in-memory)
//! - **RecordStore**: read-all / write-all of the registry under one key
//! - **DocumentRegistry**: every resume operation, each a full
//!   read-modify-write cycle
//!
//! # Quick Start
//!
//! ```text
//! let registry = DocumentRegistry::open(&Config::load()?);
//!
//! let id = registry.create().await?;
//! registry.rename(&id, "My Resume").await?;
//!
//! let export = registry.export_all().await?;
//! ```
//!
//! # Modules
//!
//! - `registry`: Document registry (main entry point)
//! - `models`: Resume records and style settings
//! - `validation`: Shape checks for imported data
//! - `storage`: Key-value stores and registry persistence
//! - `notify`: Operation outcome notifications
//! - `session`: Active document handling
//! - `id`: Document id generation
//! - `config`: Application configuration

pub mod config;
pub mod id;
pub mod models;
pub mod notify;
pub mod registry;
pub mod session;
pub mod storage;
pub mod validation;

pub use config::Config;
pub use id::{ClockIdGenerator, IdGenerator, SequenceIdGenerator};
pub use models::{DocumentRecord, FontDescriptor, Registry, RegistryEntry, StyleSettings};
pub use notify::{Notification, NotificationSink, RecordingSink, TracingSink};
pub use registry::{
    DocumentRegistry, ExportFile, ImportOutcome, ImportRejection, RegistryError, RegistryResult,
    EXPORT_FILE_NAME,
};
pub use session::{ActiveDocument, ActivePointer, EditingSession};
pub use storage::{FileStore, KeyValueStore, MemoryStore, RecordStore, StorageError};
pub use validation::{validate_registry, ValidationError};
