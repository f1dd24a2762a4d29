use anyhow::Result;

use mneme_lib::scheduler::{format_interval, interval_for_stage};

use crate::app::App;
use crate::render::terminal;

pub fn run(app: &App, needle: &str, use_color: bool) -> Result<()> {
    let topic = app.find_topic(needle)?;

    // Print header
    if use_color {
        println!("{}{}{}", terminal::Color::BOLD, topic.title, terminal::Color::RESET);
    } else {
        println!("{}", topic.title);
    }

    if !topic.tags.is_empty() {
        let tags = topic.tags.iter()
            .map(|t| format!("#{}", t))
            .collect::<Vec<_>>()
            .join(" ");
        if use_color {
            println!("{}{}{}", terminal::Color::DIM, tags, terminal::Color::RESET);
        } else {
            println!("{}", tags);
        }
    }

    println!();
    println!("  Stage:       {} ({} interval)",
        topic.review.current_stage,
        format_interval(interval_for_stage(topic.review.current_stage)));
    println!("  Reviews:     {}", topic.review.review_count);

    let status = if topic.is_mastered() {
        "mastered".to_string()
    } else {
        terminal::due_badge(app.store.status_of(&topic), use_color)
    };
    println!("  Next review: {} ({})",
        topic.review.next_review_date.format("%Y-%m-%d %H:%M"), status);

    if let Some(last) = topic.review.last_reviewed_at {
        println!("  Last review: {}", last.format("%Y-%m-%d %H:%M"));
    }
    println!("  Created:     {}", topic.created_at.format("%Y-%m-%d"));
    println!("  ID:          {}", topic.id);

    let content = app.read_content(topic.id)?;
    if !content.trim().is_empty() {
        println!();
        println!("{}", terminal::render_markdown(&content, use_color));
    }

    Ok(())
}
