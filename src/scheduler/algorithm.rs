//! Fixed-interval spaced repetition scheduling
//!
//! Topics move through five discrete stages with fixed review intervals:
//! - Stage 0: 1 day
//! - Stage 1: 3 days
//! - Stage 2: 7 days
//! - Stage 3: 14 days
//! - Stage 4: 30 days
//!
//! A successful review advances the stage by one (capped at the final
//! stage) and schedules the next review using the new stage's interval.
//! A reset returns the topic to stage 0 with a fresh 1-day interval,
//! keeping its review count.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::state::{ReviewState, SchedulerError, FINAL_STAGE};

/// Days until the next review, indexed by stage
pub const STAGE_INTERVAL_DAYS: [i64; FINAL_STAGE as usize + 1] = [1, 3, 7, 14, 30];

/// Tunable scheduling behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerConfig {
    /// Whether a topic at the final stage keeps repeating at the final
    /// interval. When false, a review at the final stage completes the
    /// topic instead of scheduling another pass.
    #[serde(default = "default_repeat_final_interval")]
    pub repeat_final_interval: bool,
}

fn default_repeat_final_interval() -> bool {
    true
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            repeat_final_interval: default_repeat_final_interval(),
        }
    }
}

/// Result of applying a review or reset to a topic's state
#[derive(Debug, Clone)]
pub struct ScheduleResult {
    pub state: ReviewState,
    /// Interval that produced the new review date, in days
    pub interval_days: i64,
    /// True when the review completed the final stage and the topic
    /// should leave the review rotation
    pub mastered: bool,
}

/// Interval in days for a given stage
///
/// Stages past the final stage fall back to the final interval. Used for
/// display; the schedule computations validate their input instead of
/// relying on this fallback.
pub fn interval_for_stage(stage: u8) -> i64 {
    STAGE_INTERVAL_DAYS[stage.min(FINAL_STAGE) as usize]
}

/// Apply a successful review to a topic's state
///
/// The stage advances by one, capped at the final stage, and the next
/// review is scheduled using the new stage's interval. The review count
/// goes up by one and the last-reviewed timestamp is set to `now`.
///
/// Fails with `InvalidTopicState` when the stored stage is out of range.
pub fn advance(
    state: &ReviewState,
    now: DateTime<Utc>,
    config: &SchedulerConfig,
) -> Result<ScheduleResult, SchedulerError> {
    state.validate()?;

    let next_stage = (state.current_stage + 1).min(FINAL_STAGE);
    let interval_days = STAGE_INTERVAL_DAYS[next_stage as usize];
    let mastered = !config.repeat_final_interval && state.current_stage == FINAL_STAGE;

    Ok(ScheduleResult {
        state: ReviewState {
            current_stage: next_stage,
            next_review_date: now + Duration::days(interval_days),
            last_reviewed_at: Some(now),
            review_count: state.review_count + 1,
        },
        interval_days,
        mastered,
    })
}

/// Reset a topic back to the first stage
///
/// The review count and last-reviewed timestamp survive a reset; only the
/// stage and next review date change. Reset accepts any input state, so it
/// also repairs topics whose stored stage is out of range.
pub fn reset(state: &ReviewState, now: DateTime<Utc>) -> ScheduleResult {
    let interval_days = STAGE_INTERVAL_DAYS[0];

    ScheduleResult {
        state: ReviewState {
            current_stage: 0,
            next_review_date: now + Duration::days(interval_days),
            last_reviewed_at: state.last_reviewed_at,
            review_count: state.review_count,
        },
        interval_days,
        mastered: false,
    }
}

/// State for a topic that has never been reviewed
///
/// New topics start at stage 0 with the first review due one interval out.
pub fn initial_state(now: DateTime<Utc>) -> ReviewState {
    ReviewState {
        current_stage: 0,
        next_review_date: now + Duration::days(STAGE_INTERVAL_DAYS[0]),
        last_reviewed_at: None,
        review_count: 0,
    }
}

/// Where a review date falls relative to the current day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DueStatus {
    /// The review date fell on an earlier calendar day
    Overdue,
    /// The review date falls on the current calendar day
    DueToday,
    /// The review date falls on a later calendar day
    Upcoming,
}

/// Classify a review date against the current calendar day
///
/// Comparison is by UTC calendar day, not sub-day precision: a topic due
/// at 23:59 today is due today all day, and a topic becomes overdue only
/// once its review day has fully passed.
pub fn classify(next_review_date: DateTime<Utc>, today: NaiveDate) -> DueStatus {
    let due_day = next_review_date.date_naive();
    if due_day < today {
        DueStatus::Overdue
    } else if due_day == today {
        DueStatus::DueToday
    } else {
        DueStatus::Upcoming
    }
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: i64) -> String {
    if days == 0 {
        "now".to_string()
    } else if days == 1 {
        "1d".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        let weeks = days / 7;
        if weeks == 1 {
            "1w".to_string()
        } else {
            format!("{}w", weeks)
        }
    } else if days < 365 {
        let months = days / 30;
        if months == 1 {
            "1mo".to_string()
        } else {
            format!("{}mo", months)
        }
    } else {
        let years = days / 365;
        if years == 1 {
            "1y".to_string()
        } else {
            format!("{}y", years)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
    }

    fn state_at_stage(stage: u8) -> ReviewState {
        ReviewState {
            current_stage: stage,
            next_review_date: fixed_now(),
            last_reviewed_at: None,
            review_count: 7,
        }
    }

    #[test]
    fn test_advance_moves_through_stages() {
        let now = fixed_now();
        let config = SchedulerConfig::default();

        for stage in 0..=FINAL_STAGE {
            let result = advance(&state_at_stage(stage), now, &config).unwrap();
            assert_eq!(result.state.current_stage, (stage + 1).min(FINAL_STAGE));
        }
    }

    #[test]
    fn test_first_review_schedules_three_days() {
        let now = fixed_now();
        let result = advance(&state_at_stage(0), now, &SchedulerConfig::default()).unwrap();

        assert_eq!(result.state.current_stage, 1);
        assert_eq!(result.interval_days, 3);
        assert_eq!(result.state.next_review_date, now + Duration::days(3));
    }

    #[test]
    fn test_final_stage_stays_at_ceiling() {
        let now = fixed_now();
        let result = advance(&state_at_stage(FINAL_STAGE), now, &SchedulerConfig::default()).unwrap();

        assert_eq!(result.state.current_stage, FINAL_STAGE);
        assert_eq!(result.interval_days, 30);
        assert_eq!(result.state.next_review_date, now + Duration::days(30));
        assert!(!result.mastered);
    }

    #[test]
    fn test_advance_increments_review_count_by_one() {
        let now = fixed_now();
        let config = SchedulerConfig::default();

        for stage in 0..=FINAL_STAGE {
            let state = state_at_stage(stage);
            let result = advance(&state, now, &config).unwrap();
            assert_eq!(result.state.review_count, state.review_count + 1);
        }
    }

    #[test]
    fn test_advance_sets_exact_interval_from_now() {
        // The new review date is an exact offset from the review instant,
        // not rounded to a day boundary.
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 23, 59, 58).unwrap();
        let result = advance(&state_at_stage(1), now, &SchedulerConfig::default()).unwrap();

        assert_eq!(result.state.next_review_date, now + Duration::days(7));
        assert_eq!(result.state.last_reviewed_at, Some(now));
    }

    #[test]
    fn test_advance_rejects_out_of_range_stage() {
        let result = advance(
            &state_at_stage(FINAL_STAGE + 1),
            fixed_now(),
            &SchedulerConfig::default(),
        );
        assert!(matches!(result, Err(SchedulerError::InvalidTopicState(_))));
    }

    #[test]
    fn test_advance_marks_mastered_when_repeat_disabled() {
        let now = fixed_now();
        let config = SchedulerConfig {
            repeat_final_interval: false,
        };

        // Reaching the final stage is not mastery yet
        let reaching = advance(&state_at_stage(FINAL_STAGE - 1), now, &config).unwrap();
        assert_eq!(reaching.state.current_stage, FINAL_STAGE);
        assert!(!reaching.mastered);

        // Reviewing at the final stage completes the topic
        let completing = advance(&state_at_stage(FINAL_STAGE), now, &config).unwrap();
        assert!(completing.mastered);
    }

    #[test]
    fn test_reset_returns_to_first_stage() {
        let now = fixed_now();
        let mut state = state_at_stage(3);
        state.last_reviewed_at = Some(now - Duration::days(2));

        let result = reset(&state, now);

        assert_eq!(result.state.current_stage, 0);
        assert_eq!(result.state.next_review_date, now + Duration::days(1));
        assert_eq!(result.state.review_count, state.review_count);
        assert_eq!(result.state.last_reviewed_at, state.last_reviewed_at);
    }

    #[test]
    fn test_reset_repairs_out_of_range_stage() {
        let now = fixed_now();
        let result = reset(&state_at_stage(9), now);

        assert_eq!(result.state.current_stage, 0);
        assert!(result.state.validate().is_ok());
    }

    #[test]
    fn test_initial_state_is_due_in_one_day() {
        let now = fixed_now();
        let state = initial_state(now);

        assert_eq!(state.current_stage, 0);
        assert_eq!(state.next_review_date, now + Duration::days(1));
        assert_eq!(state.review_count, 0);
        assert!(state.last_reviewed_at.is_none());
    }

    #[test]
    fn test_classify_partitions_by_calendar_day() {
        let today = fixed_now().date_naive();

        let yesterday = Utc.with_ymd_and_hms(2026, 3, 13, 23, 59, 59).unwrap();
        assert_eq!(classify(yesterday, today), DueStatus::Overdue);

        // Due late tonight is still due today, even early in the morning
        let tonight = Utc.with_ymd_and_hms(2026, 3, 14, 23, 59, 0).unwrap();
        assert_eq!(classify(tonight, today), DueStatus::DueToday);

        let midnight = Utc.with_ymd_and_hms(2026, 3, 14, 0, 0, 0).unwrap();
        assert_eq!(classify(midnight, today), DueStatus::DueToday);

        let tomorrow = Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap();
        assert_eq!(classify(tomorrow, today), DueStatus::Upcoming);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let today = fixed_now().date_naive();
        let due = Utc.with_ymd_and_hms(2026, 3, 20, 8, 0, 0).unwrap();

        assert_eq!(classify(due, today), classify(due, today));
    }

    #[test]
    fn test_interval_for_stage_matches_table() {
        assert_eq!(interval_for_stage(0), 1);
        assert_eq!(interval_for_stage(1), 3);
        assert_eq!(interval_for_stage(2), 7);
        assert_eq!(interval_for_stage(3), 14);
        assert_eq!(interval_for_stage(4), 30);
        // Display fallback for corrupt stages
        assert_eq!(interval_for_stage(200), 30);
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(0), "now");
        assert_eq!(format_interval(1), "1d");
        assert_eq!(format_interval(3), "3d");
        assert_eq!(format_interval(7), "1w");
        assert_eq!(format_interval(14), "2w");
        assert_eq!(format_interval(30), "1mo");
        assert_eq!(format_interval(365), "1y");
    }
}
