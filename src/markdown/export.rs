//! Markdown export with YAML frontmatter

use crate::topics::Topic;

/// Export a topic and its body to markdown with YAML frontmatter
///
/// The frontmatter carries the full review schedule, so an exported file
/// can be imported elsewhere without losing progress.
pub fn topic_to_markdown(topic: &Topic, content: &str) -> String {
    let mut output = String::new();

    output.push_str("---\n");
    output.push_str(&format!(
        "title: \"{}\"\n",
        escape_yaml_string(&topic.title)
    ));

    if !topic.tags.is_empty() {
        output.push_str("tags:\n");
        for tag in &topic.tags {
            output.push_str(&format!("  - \"{}\"\n", escape_yaml_string(tag)));
        }
    }

    output.push_str(&format!("stage: {}\n", topic.review.current_stage));
    output.push_str(&format!("reviewCount: {}\n", topic.review.review_count));
    output.push_str(&format!(
        "nextReview: {}\n",
        topic.review.next_review_date.to_rfc3339()
    ));
    if let Some(last) = topic.review.last_reviewed_at {
        output.push_str(&format!("lastReviewed: {}\n", last.to_rfc3339()));
    }
    if let Some(mastered) = topic.mastered_at {
        output.push_str(&format!("mastered: {}\n", mastered.to_rfc3339()));
    }
    output.push_str(&format!("created: {}\n", topic.created_at.to_rfc3339()));
    output.push_str(&format!("updated: {}\n", topic.updated_at.to_rfc3339()));
    output.push_str("---\n\n");

    let body = content.trim_end();
    if !body.is_empty() {
        output.push_str(body);
        output.push('\n');
    }

    output
}

/// File name for an exported topic, derived from its title
pub fn export_file_name(topic: &Topic) -> String {
    let safe_title = topic
        .title
        .replace(|c: char| !c.is_alphanumeric() && c != '-' && c != '_', "_");
    format!("{}.md", safe_title)
}

/// Escape special characters for YAML strings
fn escape_yaml_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
