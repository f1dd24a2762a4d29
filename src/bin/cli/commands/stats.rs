use anyhow::Result;

use mneme_lib::scheduler::{STAGE_INTERVAL_DAYS, format_interval};

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let stats = app.stats()?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Plain => {
            println!("Topics:        {} ({} mastered)", stats.total_topics, stats.mastered_topics);
            for (stage, count) in stats.stage_counts.iter().enumerate() {
                println!("  Stage {} ({:>3}): {}",
                    stage, format_interval(STAGE_INTERVAL_DAYS[stage]), count);
            }

            println!();
            let overdue = if use_color && stats.overdue > 0 {
                format!("{}{} overdue{}", terminal::Color::RED, stats.overdue, terminal::Color::RESET)
            } else {
                format!("{} overdue", stats.overdue)
            };
            println!("Queue:         {}, {} due today, {} upcoming",
                overdue, stats.due_today, stats.upcoming);
            println!("Reviews today: {}", stats.reviews_today);

            let streak = match stats.current_streak {
                0 => "none".to_string(),
                1 => "1 day".to_string(),
                n => format!("{} days", n),
            };
            println!("Streak:        {} (longest {})", streak, stats.longest_streak);
        }
    }

    Ok(())
}
