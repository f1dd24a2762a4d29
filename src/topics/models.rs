//! Data models for study topics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scheduler::{DueStatus, ReviewState, ScheduleResult, STAGE_INTERVAL_DAYS};

/// A study topic: a markdown note with a review schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Spaced repetition state, stored inline with the topic
    #[serde(flatten)]
    pub review: ReviewState,
    /// Set once the topic completes the final stage and leaves the
    /// review rotation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mastered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Topic {
    pub fn new(title: String, review: ReviewState, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            tags: Vec::new(),
            review,
            mastered_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder method to add tags
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Apply a schedule computation to this topic
    pub fn apply_schedule(&mut self, result: &ScheduleResult, now: DateTime<Utc>) {
        self.review = result.state.clone();
        if result.mastered {
            self.mastered_at = Some(now);
        }
        self.updated_at = now;
    }

    /// Whether the topic has left the review rotation
    pub fn is_mastered(&self) -> bool {
        self.mastered_at.is_some()
    }
}

/// A record of a single completed review
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub id: Uuid,
    pub topic_id: Uuid,
    /// Stage before the review
    pub stage_before: u8,
    /// Stage after the review
    pub stage_after: u8,
    /// Interval applied by the review, in days
    pub interval_days: i64,
    /// When the review occurred
    pub reviewed_at: DateTime<Utc>,
}

impl ReviewRecord {
    pub fn new(
        topic_id: Uuid,
        stage_before: u8,
        stage_after: u8,
        interval_days: i64,
        reviewed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            topic_id,
            stage_before,
            stage_after,
            interval_days,
            reviewed_at,
        }
    }
}

/// A topic paired with its due classification, used for list views
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicWithStatus {
    pub topic: Topic,
    pub status: DueStatus,
}

/// Statistics across all topics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_topics: usize,
    /// Topic counts indexed by stage
    pub stage_counts: [usize; STAGE_INTERVAL_DAYS.len()],
    pub mastered_topics: usize,
    pub overdue: usize,
    pub due_today: usize,
    pub upcoming: usize,
    pub reviews_today: usize,
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// Request to create a new topic
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTopicRequest {
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Initial markdown body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Request to update an existing topic
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTopicRequest {
    pub title: Option<String>,
    pub tags: Option<Vec<String>>,
}
