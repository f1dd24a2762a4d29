use anyhow::Result;

use mneme_lib::scheduler::{DueStatus, format_interval, interval_for_stage};

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(
    app: &App,
    tag: Option<&str>,
    due_only: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let mut entries = app.classified()?;

    // Filter by tag if specified
    if let Some(tag) = tag {
        let tag_lower = tag.to_lowercase();
        entries.retain(|e| e.topic.tags.iter().any(|t| t.to_lowercase() == tag_lower));
    }

    if due_only {
        entries.retain(|e| !e.topic.is_mastered() && e.status != DueStatus::Upcoming);
    }

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = entries.iter().map(|e| {
                serde_json::json!({
                    "id": e.topic.id.to_string(),
                    "title": e.topic.title,
                    "tags": e.topic.tags,
                    "stage": e.topic.review.current_stage,
                    "reviewCount": e.topic.review.review_count,
                    "nextReview": e.topic.review.next_review_date.to_rfc3339(),
                    "status": serde_json::to_value(e.status).unwrap_or_default(),
                    "mastered": e.topic.is_mastered(),
                })
            }).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if entries.is_empty() {
                println!("No topics found.");
                return Ok(());
            }

            // Calculate column widths
            let title_width = entries.iter().map(|e| e.topic.title.len()).max().unwrap_or(5).min(40).max(5);
            let stage_width = 7;
            let due_width = 10;
            let status_width = 9;

            // Header
            println!("{:<title_w$} {:<stage_w$} {:<due_w$} {:<status_w$} Tags",
                "Title", "Stage", "Due", "Status",
                title_w = title_width, stage_w = stage_width, due_w = due_width, status_w = status_width);
            println!("{} {} {} {} {}",
                "\u{2500}".repeat(title_width),
                "\u{2500}".repeat(stage_width),
                "\u{2500}".repeat(due_width),
                "\u{2500}".repeat(status_width),
                "\u{2500}".repeat(10));

            for entry in &entries {
                let topic = &entry.topic;
                let title = truncate_title(&topic.title, title_width);

                let stage = format!("{}/{}",
                    topic.review.current_stage,
                    format_interval(interval_for_stage(topic.review.current_stage)));

                let due = topic.review.next_review_date.format("%Y-%m-%d").to_string();

                let status = if topic.is_mastered() {
                    "mastered".to_string()
                } else {
                    terminal::due_badge(entry.status, use_color)
                };
                // ANSI codes inflate the string length, so pad manually
                let status_pad = status_width.saturating_sub(
                    if topic.is_mastered() { 8 } else { badge_len(entry.status) });

                let tags = topic.tags.iter()
                    .map(|t| format!("#{}", t))
                    .collect::<Vec<_>>()
                    .join(" ");

                println!("{:<title_w$} {:<stage_w$} {:<due_w$} {}{} {}",
                    title, stage, due, status, " ".repeat(status_pad), tags,
                    title_w = title_width, stage_w = stage_width, due_w = due_width);
            }

            println!("\n{} topics total", entries.len());
        }
    }

    Ok(())
}

fn badge_len(status: DueStatus) -> usize {
    match status {
        DueStatus::Overdue => "overdue".len(),
        DueStatus::DueToday => "due today".len(),
        DueStatus::Upcoming => "upcoming".len(),
    }
}

/// Truncate a title to the column width without splitting a character
fn truncate_title(title: &str, width: usize) -> String {
    if title.len() <= width {
        return title.to_string();
    }

    // Back the cut off to the nearest char boundary so multibyte titles
    // never split mid-character
    let mut cut = width.saturating_sub(3);
    while cut > 0 && !title.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &title[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_title_short_passes_through() {
        assert_eq!(truncate_title("Ohm's law", 40), "Ohm's law");
    }

    #[test]
    fn test_truncate_title_long_ascii() {
        let title = "a".repeat(50);
        let truncated = truncate_title(&title, 40);

        assert_eq!(truncated.len(), 40);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_truncate_title_multibyte_does_not_split_char() {
        // 41 two-byte characters: the naive byte cut at width - 3 lands
        // inside one of them
        let title = "é".repeat(41);
        let truncated = truncate_title(&title, 40);

        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 40);
        assert_eq!(truncated.trim_end_matches("..."), "é".repeat(18));
    }

    #[test]
    fn test_truncate_title_mixed_script() {
        let title = format!("熱力学第二法則 {}", "x".repeat(40));
        let truncated = truncate_title(&title, 40);

        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 40);
    }
}
