use anyhow::Result;

use mneme_lib::scheduler::{DueStatus, classify};

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let today = app.store.today();
    let topics = app.due_topics()?;

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = topics.iter().map(|t| {
                let status = classify(t.review.next_review_date, today);
                serde_json::json!({
                    "id": t.id.to_string(),
                    "title": t.title,
                    "stage": t.review.current_stage,
                    "nextReview": t.review.next_review_date.to_rfc3339(),
                    "status": serde_json::to_value(status).unwrap_or_default(),
                    "daysLate": (today - t.review.next_review_date.date_naive()).num_days().max(0),
                })
            }).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if topics.is_empty() {
                println!("Nothing due. All caught up.");
                return Ok(());
            }

            let overdue: Vec<_> = topics.iter()
                .filter(|t| classify(t.review.next_review_date, today) == DueStatus::Overdue)
                .collect();
            let due_today: Vec<_> = topics.iter()
                .filter(|t| classify(t.review.next_review_date, today) == DueStatus::DueToday)
                .collect();

            if !overdue.is_empty() {
                let header = if use_color {
                    format!("{}Overdue{}", terminal::Color::RED, terminal::Color::RESET)
                } else {
                    "Overdue".to_string()
                };
                println!("{}", header);
                for topic in &overdue {
                    let days_late = (today - topic.review.next_review_date.date_naive()).num_days();
                    let late = if days_late == 1 {
                        "1 day late".to_string()
                    } else {
                        format!("{} days late", days_late)
                    };
                    println!("  {} (stage {}, {})", topic.title, topic.review.current_stage, late);
                }
            }

            if !due_today.is_empty() {
                if !overdue.is_empty() {
                    println!();
                }
                let header = if use_color {
                    format!("{}Due today{}", terminal::Color::YELLOW, terminal::Color::RESET)
                } else {
                    "Due today".to_string()
                };
                println!("{}", header);
                for topic in &due_today {
                    println!("  {} (stage {})", topic.title, topic.review.current_stage);
                }
            }

            println!("\n{} topics to review", topics.len());
        }
    }

    Ok(())
}
