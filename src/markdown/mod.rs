//! Markdown export and import for topics
//!
//! Topics round-trip through plain markdown files with YAML frontmatter
//! carrying the title, tags, and review schedule.

pub mod export;
pub mod import;

pub use export::{export_file_name, topic_to_markdown};
pub use import::{parse_topic_markdown, TopicDraft};
