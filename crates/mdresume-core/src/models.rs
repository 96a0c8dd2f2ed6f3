//! Data models for mdresume
//!
//! Defines the persisted shapes: `DocumentRecord`, `StyleSettings` and
//! `FontDescriptor`, plus the `Registry` mapping that holds them. Field
//! names on the wire are camelCase. Fields this crate does not know about
//! are kept in `extra` maps so a decode and encode cycle loses nothing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The full persisted mapping from document id to record
///
/// A `BTreeMap` keeps the serialized output stable between writes; display
/// order is derived at read time by [`crate::DocumentRegistry::list`].
pub type Registry = BTreeMap<String, DocumentRecord>;

/// Display name given to freshly created resumes
pub const DEFAULT_NAME: &str = "New Resume";

/// Markdown source given to freshly created resumes
pub const DEFAULT_MD_CONTENT: &str = r#"---
name: Your Name
header:
  - text: |
      <span style="font-size: 1.2em; font-weight: bold;">Software Engineer</span>
  - text: <span class="iconify" data-icon="tabler:phone"></span> (+1) 123-456-7890
    newLine: true
  - text: <span class="iconify" data-icon="tabler:mail"></span> you@example.com
    link: mailto:you@example.com
---

## Education

**University of Somewhere**
  ~ City, Country

B.Sc. in Computer Science
  ~ 2016 - 2020

## Experience

**Some Company**
  ~ 2020 - Present

Software Engineer

- Built things that people use
- Kept them running

## Skills

- **Languages:** Rust, TypeScript, Python
- **Tools:** Git, Docker, Linux
"#;

/// Stylesheet source given to freshly created resumes
pub const DEFAULT_CSS_CONTENT: &str = r#"/* Back to basics */
.resume-header {
  text-align: center;
}

.resume-header h1 {
  text-align: center;
  line-height: 1;
  margin-bottom: 8px;
}

.resume-header-item:not(.no-separator)::after {
  content: " | ";
}

[data-scope="vue-smart-pages"][data-part="page"] {
  background-color: white;
}

.markdown-body h2 {
  border-bottom: 1px solid;
}
"#;

/// One resume: markdown content, stylesheet and style settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Display name
    pub name: String,
    /// Markdown source
    pub content: String,
    /// CSS source applied on top of the theme
    pub style_sheet: String,
    /// Structured style settings
    pub styles: StyleSettings,
    /// Freshness token; when absent the record's id is used for ordering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DocumentRecord {
    /// Create a record with default content, stylesheet and styles
    pub fn with_defaults() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            content: DEFAULT_MD_CONTENT.to_string(),
            style_sheet: DEFAULT_CSS_CONTENT.to_string(),
            styles: StyleSettings::default(),
            updated_at: None,
            extra: Map::new(),
        }
    }

    /// Key used to order records: `updated_at`, falling back to the id
    pub fn sort_key<'a>(&'a self, id: &'a str) -> &'a str {
        self.updated_at.as_deref().unwrap_or(id)
    }
}

/// Page and typography settings for a resume
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StyleSettings {
    pub font_size: f64,
    pub line_height: f64,
    pub margin_h: f64,
    pub margin_v: f64,
    pub paragraph_space: f64,
    /// Paper size identifier, e.g. "A4" or "letter"
    pub paper: String,
    /// Accent color token, e.g. "#377bb5"
    pub theme_color: String,
    #[serde(rename = "fontCJK")]
    pub font_cjk: FontDescriptor,
    #[serde(rename = "fontEN")]
    pub font_en: FontDescriptor,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            font_size: 15.0,
            line_height: 1.3,
            margin_h: 45.0,
            margin_v: 45.0,
            paragraph_space: 5.0,
            paper: "A4".to_string(),
            theme_color: "#377bb5".to_string(),
            font_cjk: FontDescriptor::new("华康宋体").with_field("fontFamily", "HKST"),
            font_en: FontDescriptor::new("Minion Pro"),
            extra: Map::new(),
        }
    }
}

/// A font choice
///
/// Only `name` is interpreted; every other field (family, source URL,
/// weights) is carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FontDescriptor {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FontDescriptor {
    /// Create a descriptor with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// Attach an additional field
    ///
    /// `name` is not an extra field: a string value replaces the
    /// descriptor's name and any other value is ignored.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        if key == "name" {
            if let Value::String(name) = value {
                self.name = name;
            }
        } else {
            self.extra.insert(key, value);
        }
        self
    }
}

/// A record decorated with its id, as returned by listing
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegistryEntry {
    pub id: String,
    #[serde(flatten)]
    pub record: DocumentRecord,
}
