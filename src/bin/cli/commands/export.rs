use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use mneme_lib::markdown::{export_file_name, topic_to_markdown};

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &App,
    needle: Option<&str>,
    all: bool,
    out: &Path,
    format: &OutputFormat,
    _use_color: bool,
) -> Result<()> {
    let topics = if all {
        app.list_topics()?
    } else if let Some(needle) = needle {
        vec![app.find_topic(needle)?]
    } else {
        bail!("Specify a topic or use --all");
    };

    if topics.is_empty() {
        println!("No topics to export.");
        return Ok(());
    }

    fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output directory {}", out.display()))?;

    let mut exported = Vec::new();
    for topic in &topics {
        let content = app.read_content(topic.id)?;
        let path = out.join(export_file_name(topic));
        fs::write(&path, topic_to_markdown(topic, &content))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        exported.push((topic.title.clone(), path));
    }

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = exported.iter().map(|(title, path)| {
                serde_json::json!({
                    "title": title,
                    "path": path.to_string_lossy(),
                })
            }).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for (title, path) in &exported {
                println!("Exported \"{}\" \u{2192} {}", title, path.display());
            }
            println!("\n{} topics exported", exported.len());
        }
    }

    Ok(())
}
