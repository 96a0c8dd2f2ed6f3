//! External editor round-trip
//!
//! A resume has two editable bodies, its markdown and its stylesheet. The
//! chosen body goes into a temp file named after the resume with a suffix
//! matching its language, so editors pick the right syntax mode, and is
//! read back once the editor exits.

use std::env;
use std::fs;
use std::process::Command;

use anyhow::{bail, Context, Result};

use mdresume_core::{ActiveDocument, DocumentRecord};

#[cfg(windows)]
const FALLBACK_EDITOR: &str = "notepad";
#[cfg(not(windows))]
const FALLBACK_EDITOR: &str = "vi";

/// Which body of a resume is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Markdown,
    StyleSheet,
}

impl EditTarget {
    pub fn from_css_flag(css: bool) -> Self {
        if css {
            EditTarget::StyleSheet
        } else {
            EditTarget::Markdown
        }
    }

    /// Temp file suffix
    pub fn extension(self) -> &'static str {
        match self {
            EditTarget::Markdown => "md",
            EditTarget::StyleSheet => "css",
        }
    }

    /// The body this target edits
    pub fn current(self, record: &DocumentRecord) -> &str {
        match self {
            EditTarget::Markdown => &record.content,
            EditTarget::StyleSheet => &record.style_sheet,
        }
    }

    /// Write edited text back into the active document
    pub fn apply(self, session: &mut ActiveDocument, text: String) {
        match self {
            EditTarget::Markdown => session.set_content(text),
            EditTarget::StyleSheet => session.set_style_sheet(text),
        }
    }
}

/// Editor program plus any arguments given in the environment
///
/// `EDITOR="code --wait"` runs `code` with `--wait` before the file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    program: String,
    args: Vec<String>,
}

impl EditorCommand {
    /// `$VISUAL`, then `$EDITOR`, then the platform fallback
    pub fn from_env() -> Self {
        ["VISUAL", "EDITOR"]
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find_map(|value| Self::parse(&value))
            .unwrap_or_else(|| Self {
                program: FALLBACK_EDITOR.to_string(),
                args: Vec::new(),
            })
    }

    fn parse(value: &str) -> Option<Self> {
        let mut words = value.split_whitespace().map(str::to_string);
        let program = words.next()?;
        Some(Self {
            program,
            args: words.collect(),
        })
    }

    /// Open one body of resume `id` and return the edited text
    pub fn edit(&self, id: &str, target: EditTarget, text: &str) -> Result<String> {
        let path = tempfile::Builder::new()
            .prefix(&format!("mdresume-{}-", id))
            .suffix(&format!(".{}", target.extension()))
            .tempfile()
            .context("Failed to create temp file")?
            .into_temp_path();

        fs::write(&path, text)
            .with_context(|| format!("Failed to write temp file: {:?}", path))?;

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(&path)
            .status()
            .with_context(|| format!("Failed to run editor: {}", self.program))?;

        if !status.success() {
            bail!(
                "Editor '{}' exited with {}. Set $VISUAL or $EDITOR to a working editor.",
                self.program,
                status
            );
        }

        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read edited file: {:?}", path))
    }
}
