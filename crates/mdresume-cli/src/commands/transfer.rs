//! Export and import command handlers

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use mdresume_core::{DocumentRegistry, ImportOutcome};

use crate::output::{Output, OutputFormat};

/// Write every resume to a JSON file
///
/// Defaults to the standard export file name in the current directory.
/// `-` writes to stdout.
pub async fn export(
    registry: &DocumentRegistry,
    destination: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let file = registry
        .export_all()
        .await
        .context("Failed to export resumes")?;

    let path = destination.unwrap_or_else(|| PathBuf::from(&file.file_name));

    if path.as_os_str() == "-" {
        println!("{}", file.contents);
        return Ok(());
    }

    std::fs::write(&path, &file.contents)
        .with_context(|| format!("Failed to write export file: {:?}", path))?;

    if output.is_json() {
        println!("{}", serde_json::json!({ "path": path }));
    } else {
        output.success(&format!("Exported resumes to {}", path.display()));
    }
    Ok(())
}

/// Merge resumes from an exported JSON file
///
/// A single malformed record rejects the whole file.
pub async fn import(registry: &DocumentRegistry, source: PathBuf, output: &Output) -> Result<()> {
    let blob = std::fs::read_to_string(&source)
        .with_context(|| format!("Failed to read import file: {:?}", source))?;

    let outcome = registry
        .import_merge_with(&blob, || {
            if let Some(notice) = merge_notice(output, &source) {
                output.message(&notice);
            }
        })
        .await
        .context("Failed to import resumes")?;

    if let ImportOutcome::Merged { imported } = outcome {
        if output.is_json() {
            println!("{}", serde_json::json!({ "imported": imported }));
        } else if output.is_quiet() {
            println!("{}", imported);
        }
    }

    outcome
        .into_result()
        .with_context(|| format!("Could not import {:?}", source))?;
    Ok(())
}

/// Line announcing a finished merge
///
/// Only human output gets one; JSON and quiet output report the count.
fn merge_notice(output: &Output, source: &Path) -> Option<String> {
    match output.format {
        OutputFormat::Human => Some(format!("Merged resumes from {}", source.display())),
        OutputFormat::Json | OutputFormat::Quiet => None,
    }
}
