use anyhow::Result;

use mneme_lib::scheduler::{format_interval, interval_for_stage};

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, needle: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let before = app.find_topic(needle)?;
    let topic = app.submit_review(before.id)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": topic.id.to_string(),
                "title": topic.title,
                "stageBefore": before.review.current_stage,
                "stageAfter": topic.review.current_stage,
                "reviewCount": topic.review.review_count,
                "nextReview": topic.review.next_review_date.to_rfc3339(),
                "mastered": topic.is_mastered(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Reviewed \"{}\": stage {} \u{2192} {}",
                topic.title, before.review.current_stage, topic.review.current_stage);

            if topic.is_mastered() {
                let label = if use_color {
                    format!("{}mastered{}", terminal::Color::GREEN, terminal::Color::RESET)
                } else {
                    "mastered".to_string()
                };
                println!("  Topic completed the final stage and is now {}.", label);
                println!("  Reset it to put it back into the review rotation.");
            } else {
                println!("  Next review in {} ({})",
                    format_interval(interval_for_stage(topic.review.current_stage)),
                    topic.review.next_review_date.format("%Y-%m-%d"));
            }
            println!("  Total reviews: {}", topic.review.review_count);
        }
    }

    Ok(())
}
