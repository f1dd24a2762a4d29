//! Consecutive-day review streak tracking
//!
//! The streak is an explicit value persisted alongside topics, passed in
//! and out of the code that applies reviews. Reviewing on consecutive
//! calendar days extends it; a full day without reviews breaks it.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Review streak state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakTracker {
    /// Length of the streak that ends on the most recent review day
    #[serde(default)]
    pub current_streak: u32,
    /// Longest streak ever recorded
    #[serde(default)]
    pub longest_streak: u32,
    /// Most recent day with at least one review
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_review_date: Option<NaiveDate>,
}

impl StreakTracker {
    /// Credit a review on the given day
    ///
    /// Multiple reviews on the same day count once. Days earlier than the
    /// last recorded day are ignored; imported history goes through
    /// [`StreakTracker::rebuild`] instead.
    pub fn record_review(&mut self, day: NaiveDate) {
        match self.last_review_date {
            Some(last) if day <= last => return,
            Some(last) if day - last == Duration::days(1) => {
                self.current_streak += 1;
            }
            _ => {
                self.current_streak = 1;
            }
        }
        self.last_review_date = Some(day);
        self.longest_streak = self.longest_streak.max(self.current_streak);
    }

    /// Current streak as seen from `today`
    ///
    /// A streak survives until a full day passes without a review: it
    /// still counts the day after the last review, and is gone the day
    /// after that.
    pub fn current_as_of(&self, today: NaiveDate) -> u32 {
        match self.last_review_date {
            Some(last) if today - last <= Duration::days(1) => self.current_streak,
            _ => 0,
        }
    }

    /// Rebuild a tracker by replaying a full set of review days
    pub fn rebuild(days: &[NaiveDate]) -> Self {
        let mut sorted: Vec<NaiveDate> = days.to_vec();
        sorted.sort();
        sorted.dedup();

        let mut tracker = StreakTracker::default();
        for day in sorted {
            tracker.record_review(day);
        }
        tracker
    }
}
