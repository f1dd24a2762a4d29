use anyhow::Result;

use mneme_lib::scheduler::format_interval;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, needle: &str, format: &OutputFormat, _use_color: bool) -> Result<()> {
    let topic = app.find_topic(needle)?;
    let records = app.review_history(topic.id)?;

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = records.iter().map(|r| {
                serde_json::json!({
                    "reviewedAt": r.reviewed_at.to_rfc3339(),
                    "stageBefore": r.stage_before,
                    "stageAfter": r.stage_after,
                    "intervalDays": r.interval_days,
                })
            }).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if records.is_empty() {
                println!("No reviews recorded for \"{}\".", topic.title);
                return Ok(());
            }

            println!("Review history for \"{}\"", topic.title);
            println!();
            println!("{:<17} {:<12} Interval", "Reviewed", "Stage");
            println!("{} {} {}",
                "\u{2500}".repeat(17),
                "\u{2500}".repeat(12),
                "\u{2500}".repeat(8));

            for record in &records {
                println!("{:<17} {:<12} {}",
                    record.reviewed_at.format("%Y-%m-%d %H:%M"),
                    format!("{} \u{2192} {}", record.stage_before, record.stage_after),
                    format_interval(record.interval_days));
            }

            println!("\n{} reviews total", records.len());
        }
    }

    Ok(())
}
