//! Terminal notifications
//!
//! Shows registry notifications as one-line status messages. Only human
//! output gets them; JSON and quiet modes report results from the command
//! handlers instead.

use mdresume_core::NotificationSink;

use crate::output::{Output, OutputFormat};

/// Notification sink printing to the terminal
pub struct OutputSink {
    output: Output,
}

impl OutputSink {
    pub fn new(output: Output) -> Self {
        Self { output }
    }

    fn show(&self, message: &str) {
        if self.output.format == OutputFormat::Human {
            self.output.success(message);
        }
    }
}

impl NotificationSink for OutputSink {
    fn notify_saved(&self) {
        self.show("Saved");
    }

    fn notify_created(&self) {
        self.show("Created a new resume");
    }

    fn notify_deleted(&self, name: &str) {
        self.show(&format!("Deleted \"{}\"", name));
    }

    fn notify_switched(&self, name: &str) {
        self.show(&format!("Switched to \"{}\"", name));
    }

    fn notify_duplicated(&self, original_name: &str) {
        self.show(&format!("Duplicated \"{}\"", original_name));
    }

    fn notify_import_result(&self, success: bool) {
        if self.output.format != OutputFormat::Human {
            return;
        }
        if success {
            self.output.success("Import succeeded");
        } else {
            self.output.failure("Import failed");
        }
    }
}
