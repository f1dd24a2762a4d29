//! Review state tracked for each topic

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest learning stage
pub const FINAL_STAGE: u8 = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Invalid topic state: {0}")]
    InvalidTopicState(String),
}

/// Current spaced repetition state for a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewState {
    /// Current learning stage (0 through [`FINAL_STAGE`])
    #[serde(default)]
    pub current_stage: u8,
    /// When the topic is next due for review
    pub next_review_date: DateTime<Utc>,
    /// When the topic was last reviewed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
    /// Total number of completed reviews
    #[serde(default)]
    pub review_count: u32,
}

impl ReviewState {
    /// Check that the state is well-formed before scheduling math runs on it
    ///
    /// Stored state can be out of range when a data file was edited by hand
    /// or written by an older build. Schedule computations reject such
    /// state explicitly instead of clamping it into range.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.current_stage > FINAL_STAGE {
            return Err(SchedulerError::InvalidTopicState(format!(
                "stage {} is outside the valid range 0-{}",
                self.current_stage, FINAL_STAGE
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_state(stage: u8) -> ReviewState {
        ReviewState {
            current_stage: stage,
            next_review_date: Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap(),
            last_reviewed_at: None,
            review_count: 0,
        }
    }

    #[test]
    fn test_validate_accepts_all_stages_in_range() {
        for stage in 0..=FINAL_STAGE {
            assert!(sample_state(stage).validate().is_ok());
        }
    }

    #[test]
    fn test_validate_rejects_stage_past_final() {
        let err = sample_state(FINAL_STAGE + 1).validate().unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidTopicState(_)));
    }

    #[test]
    fn test_serde_uses_camel_case_keys() {
        let state = ReviewState {
            current_stage: 2,
            next_review_date: Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap(),
            last_reviewed_at: Some(Utc.with_ymd_and_hms(2026, 3, 8, 9, 0, 0).unwrap()),
            review_count: 5,
        };

        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"currentStage\":2"));
        assert!(json.contains("\"nextReviewDate\""));
        assert!(json.contains("\"lastReviewedAt\""));
        assert!(json.contains("\"reviewCount\":5"));
    }

    #[test]
    fn test_deserialize_fills_missing_fields() {
        let json = r#"{"nextReviewDate":"2026-03-15T12:00:00Z"}"#;
        let state: ReviewState = serde_json::from_str(json).unwrap();

        assert_eq!(state.current_stage, 0);
        assert_eq!(state.review_count, 0);
        assert!(state.last_reviewed_at.is_none());
    }

    #[test]
    fn test_deserialize_rejects_negative_review_count() {
        let json = r#"{"nextReviewDate":"2026-03-15T12:00:00Z","reviewCount":-3}"#;
        assert!(serde_json::from_str::<ReviewState>(json).is_err());
    }
}
