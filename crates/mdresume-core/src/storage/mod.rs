//! Storage layer
//!
//! ## Architecture
//!
//! - **KeyValueStore**: async get/set of text blobs by key
//! - **RecordStore**: the whole registry, serialized as JSON under one key
//!
//! Every registry operation is a full read-modify-write through the
//! record store; nothing is updated per record.

pub mod backend;
pub mod error;
pub mod file;
pub mod memory;
pub mod record_store;

pub use backend::KeyValueStore;
pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use record_store::{RecordStore, REGISTRY_KEY};
