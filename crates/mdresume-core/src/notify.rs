//! Operation notifications
//!
//! The registry reports the outcome of each mutating operation to a
//! `NotificationSink`. Sinks are fire-and-forget: the registry never waits
//! on them or inspects what they do.

use std::sync::{Arc, Mutex};

use tracing::info;

/// Receiver of operation outcomes
pub trait NotificationSink: Send + Sync {
    fn notify_saved(&self);
    fn notify_created(&self);
    fn notify_deleted(&self, name: &str);
    fn notify_switched(&self, name: &str);
    fn notify_duplicated(&self, original_name: &str);
    fn notify_import_result(&self, success: bool);
}

/// Sink that logs every notification through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify_saved(&self) {
        info!("resume saved");
    }

    fn notify_created(&self) {
        info!("resume created");
    }

    fn notify_deleted(&self, name: &str) {
        info!(name, "resume deleted");
    }

    fn notify_switched(&self, name: &str) {
        info!(name, "switched resume");
    }

    fn notify_duplicated(&self, original_name: &str) {
        info!(original_name, "resume duplicated");
    }

    fn notify_import_result(&self, success: bool) {
        info!(success, "import finished");
    }
}

/// A single recorded notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Saved,
    Created,
    Deleted(String),
    Switched(String),
    Duplicated(String),
    Imported(bool),
}

/// Sink that records notifications in memory
///
/// Clones share the same log, so a test can keep one handle and give
/// another to the registry.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    log: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications received so far, oldest first
    pub fn notifications(&self) -> Vec<Notification> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        if let Ok(mut log) = self.log.lock() {
            log.clear();
        }
    }

    fn push(&self, notification: Notification) {
        if let Ok(mut log) = self.log.lock() {
            log.push(notification);
        }
    }
}

impl NotificationSink for RecordingSink {
    fn notify_saved(&self) {
        self.push(Notification::Saved);
    }

    fn notify_created(&self) {
        self.push(Notification::Created);
    }

    fn notify_deleted(&self, name: &str) {
        self.push(Notification::Deleted(name.to_string()));
    }

    fn notify_switched(&self, name: &str) {
        self.push(Notification::Switched(name.to_string()));
    }

    fn notify_duplicated(&self, original_name: &str) {
        self.push(Notification::Duplicated(original_name.to_string()));
    }

    fn notify_import_result(&self, success: bool) {
        self.push(Notification::Imported(success));
    }
}
