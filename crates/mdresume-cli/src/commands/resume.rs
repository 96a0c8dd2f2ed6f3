//! Resume command handlers

use anyhow::{bail, Context, Result};

use mdresume_core::{ActiveDocument, ActivePointer, DocumentRegistry};

use crate::editor::{EditTarget, EditorCommand};
use crate::output::Output;

/// List all resumes, most recently updated first
pub async fn list(
    registry: &DocumentRegistry,
    pointer: &ActivePointer,
    output: &Output,
) -> Result<()> {
    let entries = registry.list().await.context("Failed to list resumes")?;
    let active = pointer.load()?;

    output.print_resumes(&entries, active.as_deref());
    Ok(())
}

/// Create a resume with default content and make it active
pub async fn create(
    registry: &DocumentRegistry,
    pointer: &ActivePointer,
    name: Option<String>,
    output: &Output,
) -> Result<()> {
    let id = registry.create().await.context("Failed to create resume")?;

    if let Some(name) = name {
        registry
            .rename(&id, name)
            .await
            .context("Failed to name resume")?;
    }
    pointer.store(&id)?;

    if output.is_json() {
        println!("{}", serde_json::json!({ "id": id }));
    } else if output.is_quiet() {
        println!("{}", id);
    } else {
        output.message(&format!("ID: {}", id));
    }

    Ok(())
}

/// Show a single resume
pub async fn show(
    registry: &DocumentRegistry,
    pointer: &ActivePointer,
    id: Option<String>,
    output: &Output,
) -> Result<()> {
    let id = resolve_or_active(registry, pointer, id).await?;

    let record = registry
        .get(&id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Resume not found: {}", id))?;

    let active = pointer.load()?;
    output.print_resume(&id, &record, active.as_deref() == Some(id.as_str()));
    Ok(())
}

/// Rename a resume
pub async fn rename(
    registry: &DocumentRegistry,
    id: String,
    name: String,
    output: &Output,
) -> Result<()> {
    let id = resolve_id(registry, &id).await?;

    registry
        .rename(&id, name.clone())
        .await
        .context("Failed to rename resume")?;

    if output.is_json() {
        println!("{}", serde_json::json!({ "id": id, "name": name }));
    }
    Ok(())
}

/// Duplicate a resume
pub async fn duplicate(registry: &DocumentRegistry, id: String, output: &Output) -> Result<()> {
    let id = resolve_id(registry, &id).await?;

    let Some(new_id) = registry
        .duplicate(&id)
        .await
        .context("Failed to duplicate resume")?
    else {
        bail!("Resume not found: {}", id);
    };

    if output.is_json() {
        println!("{}", serde_json::json!({ "id": new_id, "source": id }));
    } else if output.is_quiet() {
        println!("{}", new_id);
    } else {
        output.message(&format!("ID: {}", new_id));
    }

    Ok(())
}

/// Delete a resume
pub async fn delete(
    registry: &DocumentRegistry,
    pointer: &ActivePointer,
    id: String,
    output: &Output,
) -> Result<()> {
    let id = resolve_id(registry, &id).await?;

    if let Some(record) = registry.get(&id).await? {
        if !output.confirm(&format!("Delete resume {} - {}?", id, record.name))? {
            output.message("Cancelled.");
            return Ok(());
        }
    }

    let removed = registry
        .delete(&id)
        .await
        .context("Failed to delete resume")?;

    if pointer.load()?.as_deref() == Some(id.as_str()) {
        pointer.clear()?;
    }

    if output.is_json() {
        println!(
            "{}",
            serde_json::json!({ "id": id, "deleted": removed.is_some() })
        );
    }
    Ok(())
}

/// Make a resume the active one
pub async fn switch(
    registry: &DocumentRegistry,
    pointer: &ActivePointer,
    id: String,
    output: &Output,
) -> Result<()> {
    let id = resolve_id(registry, &id).await?;
    let mut session = ActiveDocument::new();

    if !registry.switch_active(&id, &mut session).await? {
        bail!("Resume not found: {}. It may have been deleted.", id);
    }
    pointer.store(&id)?;

    if output.is_json() {
        println!("{}", serde_json::json!({ "active": id }));
    } else if output.is_quiet() {
        println!("{}", id);
    }
    Ok(())
}

/// Edit the markdown or stylesheet of a resume in $EDITOR
///
/// Without an id the active resume is edited.
pub async fn edit(
    registry: &DocumentRegistry,
    pointer: &ActivePointer,
    id: Option<String>,
    css: bool,
    output: &Output,
) -> Result<()> {
    let id = resolve_or_active(registry, pointer, id).await?;
    let mut session = ActiveDocument::new();

    if !registry.switch_active(&id, &mut session).await? {
        bail!("Resume not found: {}", id);
    }
    pointer.store(&id)?;

    let Some(record) = session.record() else {
        bail!("Resume not found: {}", id);
    };

    let target = EditTarget::from_css_flag(css);
    let original = target.current(record).to_string();
    let edited = EditorCommand::from_env()
        .edit(&id, target, &original)
        .context("Failed to edit resume")?;
    if edited == original {
        output.message("No changes.");
        return Ok(());
    }

    target.apply(&mut session, edited);

    if let Some((active_id, record)) = session.to_save() {
        registry
            .save(active_id, record.clone())
            .await
            .context("Failed to save resume")?;
    }

    Ok(())
}

/// Use the given id, or the active resume when none is given
async fn resolve_or_active(
    registry: &DocumentRegistry,
    pointer: &ActivePointer,
    id: Option<String>,
) -> Result<String> {
    match id {
        Some(id) => resolve_id(registry, &id).await,
        None => pointer.load()?.ok_or_else(|| {
            anyhow::anyhow!("No active resume. Pick one with `mdresume switch <id>`.")
        }),
    }
}

/// Resolve a resume id (supports full id or unique prefix)
pub async fn resolve_id(registry: &DocumentRegistry, id: &str) -> Result<String> {
    let entries = registry.list().await?;

    if entries.iter().any(|e| e.id == id) {
        return Ok(id.to_string());
    }

    let matches: Vec<_> = entries.iter().filter(|e| e.id.starts_with(id)).collect();

    match matches.len() {
        0 => bail!("No resume found matching: {}", id),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple resumes match '{}':", id);
            for entry in &matches {
                eprintln!("  {} - {}", entry.id, entry.record.name);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}
