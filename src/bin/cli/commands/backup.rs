use std::path::Path;

use anyhow::{Context, Result};

use mneme_lib::backup::{BackupMetadata, backup_info, create_backup, restore_backup};
use mneme_lib::streaks::StreakStorage;

use crate::app::App;
use crate::OutputFormat;

pub fn run_create(app: &App, output: &Path, format: &OutputFormat, _use_color: bool) -> Result<()> {
    let metadata = create_backup(app.store.data_dir(), output)
        .with_context(|| format!("Failed to create backup at {}", output.display()))?;

    match format {
        OutputFormat::Json => print_metadata_json(&metadata, Some(output))?,
        OutputFormat::Plain => {
            println!("Backup written to {}", output.display());
            println!("  Topics:      {}", metadata.topic_count);
            println!("  Review logs: {}", metadata.review_log_count);
        }
    }

    Ok(())
}

pub fn run_restore(app: &App, archive: &Path, format: &OutputFormat, _use_color: bool) -> Result<()> {
    let metadata = restore_backup(archive, app.store.data_dir())
        .with_context(|| format!("Failed to restore backup from {}", archive.display()))?;

    // Archives from older builds carry no streak state; recover it by
    // replaying the restored review logs
    let streaks = StreakStorage::new(app.store.data_dir());
    if streaks.load()?.last_review_date.is_none() {
        app.store.rebuild_streaks()
            .context("Failed to rebuild streak tracker")?;
    }

    match format {
        OutputFormat::Json => print_metadata_json(&metadata, None)?,
        OutputFormat::Plain => {
            println!("Restored {} into {}", archive.display(), app.store.data_dir().display());
            println!("  Topics:      {}", metadata.topic_count);
            println!("  Review logs: {}", metadata.review_log_count);
        }
    }

    Ok(())
}

pub fn run_info(archive: &Path, format: &OutputFormat, _use_color: bool) -> Result<()> {
    let metadata = backup_info(archive)
        .with_context(|| format!("Failed to read backup {}", archive.display()))?;

    match format {
        OutputFormat::Json => print_metadata_json(&metadata, None)?,
        OutputFormat::Plain => {
            println!("Backup {}", archive.display());
            println!("  Version:     {}", metadata.version);
            println!("  Created:     {}", metadata.created_at.format("%Y-%m-%d %H:%M"));
            println!("  Topics:      {}", metadata.topic_count);
            println!("  Review logs: {}", metadata.review_log_count);
        }
    }

    Ok(())
}

fn print_metadata_json(metadata: &BackupMetadata, path: Option<&Path>) -> Result<()> {
    let mut output = serde_json::to_value(metadata)?;
    if let (Some(obj), Some(path)) = (output.as_object_mut(), path) {
        obj.insert(
            "path".to_string(),
            serde_json::Value::String(path.to_string_lossy().to_string()),
        );
    }
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
