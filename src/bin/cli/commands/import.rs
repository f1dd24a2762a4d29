use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use walkdir::WalkDir;

use mneme_lib::markdown::parse_topic_markdown;
use mneme_lib::topics::Topic;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, path: &Path, format: &OutputFormat, _use_color: bool) -> Result<()> {
    if !path.exists() {
        bail!("Path '{}' does not exist", path.display());
    }

    let mut imported = Vec::new();
    let mut skipped = Vec::new();

    if path.is_dir() {
        for entry in WalkDir::new(path).follow_links(true).into_iter().filter_map(|e| e.ok()) {
            let file_path = entry.path();
            if !file_path.is_file() {
                continue;
            }

            let extension = file_path.extension()
                .map(|e| e.to_string_lossy().to_lowercase());
            if !matches!(extension.as_deref(), Some("md") | Some("markdown")) {
                continue;
            }

            match import_file(app, file_path) {
                Ok(topic) => imported.push(topic),
                Err(e) => {
                    log::warn!("Skipping {}: {}", file_path.display(), e);
                    skipped.push((file_path.to_path_buf(), e.to_string()));
                }
            }
        }
    } else {
        imported.push(import_file(app, path)?);
    }

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "imported": imported.iter().map(|t| {
                    serde_json::json!({
                        "id": t.id.to_string(),
                        "title": t.title,
                        "stage": t.review.current_stage,
                    })
                }).collect::<Vec<_>>(),
                "skipped": skipped.iter().map(|(p, reason)| {
                    serde_json::json!({
                        "path": p.to_string_lossy(),
                        "reason": reason,
                    })
                }).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for topic in &imported {
                println!("Imported \"{}\" (stage {})", topic.title, topic.review.current_stage);
            }
            for (path, reason) in &skipped {
                println!("Skipped {}: {}", path.display(), reason);
            }
            println!("\n{} topics imported", imported.len());
        }
    }

    Ok(())
}

fn import_file(app: &App, path: &Path) -> Result<Topic> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let fallback_title = path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Imported Topic".to_string());

    let draft = parse_topic_markdown(&content, &fallback_title);
    app.import_draft(draft)
}
