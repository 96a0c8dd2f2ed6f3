//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use std::io::{self, Write};

use anyhow::Result;
use chrono::{Local, TimeZone};

use mdresume_core::{DocumentRecord, RegistryEntry};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
#[derive(Debug, Clone, Copy)]
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if output is JSON
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a single resume
    pub fn print_resume(&self, id: &str, record: &DocumentRecord, active: bool) {
        match self.format {
            OutputFormat::Human => {
                let styles = &record.styles;
                println!("ID:          {}{}", id, if active { " (active)" } else { "" });
                println!("Name:        {}", record.name);
                println!("Updated:     {}", format_token(record.sort_key(id)));
                println!(
                    "Paper:       {}  font {}px  line {}  margins {}x{}",
                    styles.paper,
                    styles.font_size,
                    styles.line_height,
                    styles.margin_h,
                    styles.margin_v
                );
                println!(
                    "Fonts:       {} / {}",
                    styles.font_en.name, styles.font_cjk.name
                );
                println!("Theme:       {}", styles.theme_color);
                println!();
                println!("── Markdown ({} lines) ──", record.content.lines().count());
                for line in record.content.lines().take(10) {
                    println!("{}", line);
                }
                if record.content.lines().count() > 10 {
                    println!("...");
                }
            }
            OutputFormat::Json => {
                let mut value = serde_json::to_value(record).unwrap_or_default();
                if let Some(object) = value.as_object_mut() {
                    object.insert("id".to_string(), id.into());
                    object.insert("active".to_string(), active.into());
                }
                println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
            }
            OutputFormat::Quiet => {
                println!("{}", id);
            }
        }
    }

    /// Print a list of resumes, marking the active one
    pub fn print_resumes(&self, entries: &[RegistryEntry], active: Option<&str>) {
        match self.format {
            OutputFormat::Human => {
                if entries.is_empty() {
                    println!("No resumes found. Create one with `mdresume new`.");
                    return;
                }
                for entry in entries {
                    let marker = if active == Some(entry.id.as_str()) { "*" } else { " " };
                    println!(
                        "{} {} | {} | {}",
                        marker,
                        entry.id,
                        truncate(&entry.record.name, 40),
                        format_token(entry.record.sort_key(&entry.id))
                    );
                }
                println!("\n{} resume(s)", entries.len());
            }
            OutputFormat::Json => {
                let rows: Vec<_> = entries
                    .iter()
                    .map(|entry| {
                        serde_json::json!({
                            "id": entry.id,
                            "name": entry.record.name,
                            "updatedAt": entry.record.updated_at,
                            "active": active == Some(entry.id.as_str()),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows).unwrap_or_default());
            }
            OutputFormat::Quiet => {
                for entry in entries {
                    println!("{}", entry.id);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a failure message to stderr
    pub fn failure(&self, message: &str) {
        match self.format {
            OutputFormat::Human => eprintln!("✗ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "error", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Ask a yes/no question on the terminal
    ///
    /// Scripted formats never prompt and count as yes. Without a TTY on
    /// stdin the answer is no.
    pub fn confirm(&self, prompt: &str) -> Result<bool> {
        if !self.should_prompt() {
            return Ok(true);
        }
        if !atty::is(atty::Stream::Stdin) {
            return Ok(false);
        }

        print!("{} [y/N] ", prompt);
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Render an update token for people
///
/// Millisecond timestamps become local date and time; anything else is
/// shown as-is.
pub fn format_token(token: &str) -> String {
    token
        .parse::<i64>()
        .ok()
        .and_then(|millis| Local.timestamp_millis_opt(millis).single())
        .map(|time| time.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| token.to_string())
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
