//! Topic management module
//!
//! This module provides:
//! - Topic CRUD over per-topic JSON files
//! - Markdown body storage
//! - Review submission, reset, and due-queue queries
//! - Review history and aggregate statistics

pub mod models;
pub mod storage;

pub use models::*;
pub use storage::{Result, TopicStoreError, TopicStore};
