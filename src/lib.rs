//! Core library for Mneme, a spaced-repetition study notebook.
//!
//! This crate provides:
//! - Topic management (markdown notes with review scheduling)
//! - Fixed-interval spaced repetition scheduling
//! - Review streak tracking
//! - Markdown export/import with YAML frontmatter
//! - ZIP backup and restore

pub mod backup;
pub mod markdown;
pub mod scheduler;
pub mod settings;
pub mod streaks;
pub mod topics;
