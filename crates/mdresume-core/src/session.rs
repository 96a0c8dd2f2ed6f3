//! Editing session
//!
//! The active document is transient state held by whoever edits it; it is
//! not part of the registry. `DocumentRegistry::switch_active` pushes a
//! record into an `EditingSession`, and the session hands edits back
//! through `DocumentRegistry::save`.
//!
//! `ActivePointer` lets a short-lived process (the CLI) remember which
//! resume was switched to last, in a file next to the data store.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::id::now_token;
use crate::models::{DocumentRecord, StyleSettings};

/// Receiver of the document selected by `switch_active`
pub trait EditingSession: Send {
    /// Load a record as the active document, replacing any previous one
    fn load_active_document(&mut self, id: &str, record: &DocumentRecord);
}

/// In-memory editing state for one active document
#[derive(Debug, Default, Clone)]
pub struct ActiveDocument {
    current: Option<(String, DocumentRecord)>,
}

impl ActiveDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the active document
    pub fn id(&self) -> Option<&str> {
        self.current.as_ref().map(|(id, _)| id.as_str())
    }

    /// The active document's current state
    pub fn record(&self) -> Option<&DocumentRecord> {
        self.current.as_ref().map(|(_, record)| record)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        if let Some((_, record)) = self.current.as_mut() {
            record.name = name.into();
        }
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        if let Some((_, record)) = self.current.as_mut() {
            record.content = content.into();
            record.updated_at = Some(now_token());
        }
    }

    pub fn set_style_sheet(&mut self, style_sheet: impl Into<String>) {
        if let Some((_, record)) = self.current.as_mut() {
            record.style_sheet = style_sheet.into();
            record.updated_at = Some(now_token());
        }
    }

    pub fn set_styles(&mut self, styles: StyleSettings) {
        if let Some((_, record)) = self.current.as_mut() {
            record.styles = styles;
            record.updated_at = Some(now_token());
        }
    }

    /// Id and record to hand back to `DocumentRegistry::save`
    pub fn to_save(&self) -> Option<(&str, &DocumentRecord)> {
        self.current
            .as_ref()
            .map(|(id, record)| (id.as_str(), record))
    }
}

impl EditingSession for ActiveDocument {
    fn load_active_document(&mut self, id: &str, record: &DocumentRecord) {
        self.current = Some((id.to_string(), record.clone()));
    }
}

/// File remembering the id of the last active document
#[derive(Debug, Clone)]
pub struct ActivePointer {
    path: PathBuf,
}

impl ActivePointer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the remembered id
    ///
    /// Returns `None` if nothing has been remembered yet.
    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read active document from {:?}", self.path))?;
        let id = content.trim();

        Ok((!id.is_empty()).then(|| id.to_string()))
    }

    /// Remember `id` as the active document
    pub fn store(&self, id: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        fs::write(&self.path, id)
            .with_context(|| format!("Failed to save active document to {:?}", self.path))
    }

    /// Forget the remembered id
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to delete {:?}", self.path))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_active_document_load_and_edit() {
        let mut session = ActiveDocument::new();
        assert!(session.id().is_none());
        assert!(session.to_save().is_none());

        let mut record = DocumentRecord::with_defaults();
        record.updated_at = Some("1600000000000".to_string());
        session.load_active_document("100", &record);

        assert_eq!(session.id(), Some("100"));
        assert_eq!(session.record(), Some(&record));

        session.set_content("# Updated");
        session.set_name("Renamed");

        let (id, edited) = session.to_save().unwrap();
        assert_eq!(id, "100");
        assert_eq!(edited.content, "# Updated");
        assert_eq!(edited.name, "Renamed");

        let token = edited.updated_at.as_deref().unwrap();
        assert_ne!(token, "1600000000000");
        assert_eq!(token.len(), 13);
        assert!(token.bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn test_rename_alone_keeps_token() {
        let mut session = ActiveDocument::new();
        let mut record = DocumentRecord::with_defaults();
        record.updated_at = Some("1600000000000".to_string());
        session.load_active_document("100", &record);

        session.set_name("Renamed");

        let (_, edited) = session.to_save().unwrap();
        assert_eq!(edited.updated_at.as_deref(), Some("1600000000000"));
    }

    #[test]
    fn test_edits_without_active_document_are_ignored() {
        let mut session = ActiveDocument::new();
        session.set_content("ignored");
        session.set_styles(StyleSettings::default());
        assert!(session.record().is_none());
    }

    #[test]
    fn test_loading_replaces_previous_document() {
        let mut session = ActiveDocument::new();
        let mut first = DocumentRecord::with_defaults();
        first.name = "First".to_string();
        let mut second = DocumentRecord::with_defaults();
        second.name = "Second".to_string();

        session.load_active_document("1", &first);
        session.load_active_document("2", &second);

        assert_eq!(session.id(), Some("2"));
        assert_eq!(session.record().unwrap().name, "Second");
    }

    #[test]
    fn test_active_pointer_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let pointer = ActivePointer::new(temp_dir.path().join("nested").join("active_document"));

        assert!(pointer.load().unwrap().is_none());

        pointer.store("1700000000000").unwrap();
        assert_eq!(pointer.load().unwrap().as_deref(), Some("1700000000000"));

        pointer.clear().unwrap();
        assert!(pointer.load().unwrap().is_none());
    }
}
