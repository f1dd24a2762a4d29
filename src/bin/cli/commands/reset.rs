use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, needle: &str, format: &OutputFormat, _use_color: bool) -> Result<()> {
    let before = app.find_topic(needle)?;
    let topic = app.reset_topic(before.id)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": topic.id.to_string(),
                "title": topic.title,
                "stageBefore": before.review.current_stage,
                "stageAfter": topic.review.current_stage,
                "nextReview": topic.review.next_review_date.to_rfc3339(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Reset \"{}\" to stage 0 (was stage {})",
                topic.title, before.review.current_stage);
            println!("  Next review: {}", topic.review.next_review_date.format("%Y-%m-%d"));
        }
    }

    Ok(())
}
