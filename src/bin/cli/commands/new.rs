use anyhow::Result;

use mneme_lib::topics::CreateTopicRequest;

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &App,
    title: &str,
    tags: Option<&str>,
    content: Option<String>,
    format: &OutputFormat,
    _use_color: bool,
) -> Result<()> {
    let tags = tags
        .map(|t| {
            t.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let topic = app.create_topic(CreateTopicRequest {
        title: title.to_string(),
        tags,
        content,
    })?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": topic.id.to_string(),
                "title": topic.title,
                "tags": topic.tags,
                "stage": topic.review.current_stage,
                "nextReview": topic.review.next_review_date.to_rfc3339(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Created topic \"{}\"", topic.title);
            if !topic.tags.is_empty() {
                println!("  Tags: {}", topic.tags.iter().map(|t| format!("#{}", t)).collect::<Vec<_>>().join(" "));
            }
            println!("  First review: {}", topic.review.next_review_date.format("%Y-%m-%d"));
            println!("  ID: {}", topic.id);
        }
    }

    Ok(())
}
