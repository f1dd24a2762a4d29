//! Markdown import
//!
//! Parses markdown files with optional YAML frontmatter into topic
//! drafts. Files exported by this application restore their full review
//! schedule; plain markdown from other tools imports with a fresh one.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use regex::Regex;

/// Topic data parsed from a markdown file
///
/// Schedule fields are `None` when the source had no frontmatter for
/// them; the store starts such topics from a fresh stage-0 schedule.
#[derive(Debug, Clone)]
pub struct TopicDraft {
    pub title: String,
    pub tags: Vec<String>,
    /// Markdown body without the frontmatter
    pub body: String,
    pub current_stage: Option<u8>,
    pub review_count: Option<u32>,
    pub next_review_date: Option<DateTime<Utc>>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    pub mastered_at: Option<DateTime<Utc>>,
}

/// Parse a markdown file into a topic draft
///
/// The title comes from frontmatter, then from the first `#` heading,
/// then from `fallback_title`. Tags merge frontmatter tags with inline
/// `#tag` markers in the body.
pub fn parse_topic_markdown(content: &str, fallback_title: &str) -> TopicDraft {
    let (frontmatter, body) = parse_frontmatter(content);

    let mut tags = frontmatter
        .as_ref()
        .map(extract_frontmatter_tags)
        .unwrap_or_default();
    for tag in extract_inline_tags(body) {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    let title = frontmatter
        .as_ref()
        .and_then(|fm| string_value(fm, "title"))
        .or_else(|| extract_title_from_body(body))
        .unwrap_or_else(|| fallback_title.to_string());

    let fm = frontmatter.as_ref();

    TopicDraft {
        title,
        tags,
        body: body.to_string(),
        current_stage: fm.and_then(|m| stage_value(m, "stage")),
        review_count: fm.and_then(|m| count_value(m, "reviewCount")),
        next_review_date: fm.and_then(|m| date_value(m, "nextReview")),
        last_reviewed_at: fm.and_then(|m| date_value(m, "lastReviewed")),
        mastered_at: fm.and_then(|m| date_value(m, "mastered")),
    }
}

/// Parse YAML frontmatter from markdown content
fn parse_frontmatter(content: &str) -> (Option<HashMap<String, serde_yaml::Value>>, &str) {
    if !content.starts_with("---") {
        return (None, content);
    }

    // Find the closing ---
    if let Some(end_idx) = content[3..].find("\n---") {
        let yaml_content = &content[3..3 + end_idx];
        let rest = content[3 + end_idx + 4..].trim_start();

        if let Ok(frontmatter) = serde_yaml::from_str(yaml_content) {
            return (Some(frontmatter), rest);
        }
    }

    (None, content)
}

/// Extract tags from frontmatter
fn extract_frontmatter_tags(frontmatter: &HashMap<String, serde_yaml::Value>) -> Vec<String> {
    let mut tags = Vec::new();

    if let Some(value) = frontmatter.get("tags") {
        match value {
            serde_yaml::Value::Sequence(seq) => {
                for item in seq {
                    if let serde_yaml::Value::String(s) = item {
                        tags.push(s.clone());
                    }
                }
            }
            serde_yaml::Value::String(s) => {
                // Tags might be comma-separated
                for tag in s.split(',') {
                    let tag = tag.trim();
                    if !tag.is_empty() {
                        tags.push(tag.to_string());
                    }
                }
            }
            _ => {}
        }
    }

    tags
}

/// Extract inline tags from content (#tag)
fn extract_inline_tags(content: &str) -> Vec<String> {
    let tag_re = Regex::new(r"(?:^|\s)#([a-zA-Z][a-zA-Z0-9_/-]*)").unwrap();

    tag_re
        .captures_iter(content)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Take the first `#` heading as the title
fn extract_title_from_body(body: &str) -> Option<String> {
    body.lines()
        .map(str::trim)
        .find(|line| line.starts_with("# "))
        .map(|line| line[2..].trim().to_string())
}

fn string_value(frontmatter: &HashMap<String, serde_yaml::Value>, key: &str) -> Option<String> {
    frontmatter
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

fn date_value(
    frontmatter: &HashMap<String, serde_yaml::Value>,
    key: &str,
) -> Option<DateTime<Utc>> {
    frontmatter
        .get(key)
        .and_then(|v| v.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.with_timezone(&Utc))
}

/// Stage values outside u8 saturate so validation can reject them
fn stage_value(frontmatter: &HashMap<String, serde_yaml::Value>, key: &str) -> Option<u8> {
    frontmatter
        .get(key)
        .and_then(|v| v.as_u64())
        .map(|n| u8::try_from(n).unwrap_or(u8::MAX))
}

fn count_value(frontmatter: &HashMap<String, serde_yaml::Value>, key: &str) -> Option<u32> {
    frontmatter
        .get(key)
        .and_then(|v| v.as_u64())
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_full_frontmatter() {
        let content = "---\ntitle: \"Ohm's law\"\ntags:\n  - \"physics\"\nstage: 2\nreviewCount: 5\nnextReview: 2026-03-21T09:30:00+00:00\nlastReviewed: 2026-03-14T09:30:00+00:00\n---\n\nV = IR\n";

        let draft = parse_topic_markdown(content, "fallback");

        assert_eq!(draft.title, "Ohm's law");
        assert_eq!(draft.tags, vec!["physics"]);
        assert_eq!(draft.current_stage, Some(2));
        assert_eq!(draft.review_count, Some(5));
        assert_eq!(
            draft.next_review_date,
            Some(Utc.with_ymd_and_hms(2026, 3, 21, 9, 30, 0).unwrap())
        );
        assert_eq!(
            draft.last_reviewed_at,
            Some(Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap())
        );
        assert!(draft.mastered_at.is_none());
        assert_eq!(draft.body, "V = IR\n");
    }

    #[test]
    fn test_parse_plain_markdown_without_frontmatter() {
        let content = "# Kirchhoff's laws\n\nCurrent in equals current out. #physics\n";
        let draft = parse_topic_markdown(content, "fallback");

        assert_eq!(draft.title, "Kirchhoff's laws");
        assert_eq!(draft.tags, vec!["physics"]);
        assert!(draft.current_stage.is_none());
        assert!(draft.next_review_date.is_none());
        assert_eq!(draft.body, content);
    }

    #[test]
    fn test_title_falls_back_when_no_heading() {
        let draft = parse_topic_markdown("just some text\n", "My Note");
        assert_eq!(draft.title, "My Note");
    }

    #[test]
    fn test_frontmatter_and_inline_tags_merge() {
        let content = "---\ntags:\n  - \"physics\"\n---\n\nBody with #physics and #circuits\n";
        let draft = parse_topic_markdown(content, "fallback");

        assert_eq!(draft.tags, vec!["physics", "circuits"]);
    }

    #[test]
    fn test_comma_separated_tags() {
        let content = "---\ntitle: \"T\"\ntags: physics, circuits\n---\nBody\n";
        let draft = parse_topic_markdown(content, "fallback");

        assert_eq!(draft.tags, vec!["physics", "circuits"]);
    }

    #[test]
    fn test_unclosed_frontmatter_is_body() {
        let content = "---\ntitle: \"Broken\n\nNo closing delimiter\n";
        let draft = parse_topic_markdown(content, "fallback");

        assert_eq!(draft.title, "fallback");
        assert_eq!(draft.body, content);
    }

    #[test]
    fn test_out_of_range_stage_saturates() {
        let content = "---\ntitle: \"T\"\nstage: 999\n---\nBody\n";
        let draft = parse_topic_markdown(content, "fallback");

        assert_eq!(draft.current_stage, Some(u8::MAX));
    }
}
