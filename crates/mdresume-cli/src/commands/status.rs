//! Status command handler

use anyhow::Result;
use serde::Serialize;

use mdresume_core::{ActivePointer, Config, DocumentRegistry, FileStore};

use crate::output::{Output, OutputFormat};

#[derive(Debug, Serialize)]
struct StatusReport {
    data_dir: String,
    store_file: String,
    store_size: Option<u64>,
    resumes: usize,
    active_id: Option<String>,
    active_name: Option<String>,
}

/// Show status information
pub async fn show(
    registry: &DocumentRegistry,
    pointer: &ActivePointer,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let store = FileStore::from_config(config);
    let key = registry.record_store().key();

    let active_id = pointer.load()?;
    let active_name = match active_id.as_deref() {
        Some(id) => registry.get(id).await?.map(|record| record.name),
        None => None,
    };

    let report = StatusReport {
        data_dir: config.data_dir.display().to_string(),
        store_file: store.path_for(key).display().to_string(),
        store_size: store.size_of(key).await?,
        resumes: registry.count().await?,
        active_id,
        active_name,
    };

    match output.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Quiet => {
            println!("{}", report.resumes);
        }
        OutputFormat::Human => {
            println!("mdresume Status");
            println!("===============");
            println!();
            println!("Storage:");
            println!("  Location: {}", report.data_dir);
            println!("  File:     {}", report.store_file);
            println!(
                "  Size:     {}",
                report
                    .store_size
                    .map(human_size)
                    .unwrap_or_else(|| "(nothing stored yet)".to_string())
            );
            println!();
            println!("Contents:");
            println!("  Resumes: {}", report.resumes);
            match (&report.active_id, &report.active_name) {
                (Some(id), Some(name)) => println!("  Active:  {} ({})", name, id),
                (Some(id), None) => println!("  Active:  {} (missing)", id),
                _ => println!("  Active:  (none)"),
            }
        }
    }

    Ok(())
}

fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(2048), "2.0 KB");
        assert_eq!(human_size(3 * 1024 * 1024), "3.0 MB");
    }
}
