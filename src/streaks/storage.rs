//! Persistence for the review streak tracker
//!
//! The tracker lives in a single `streaks.json` file at the root of the
//! data directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::topics::Result;

use super::models::StreakTracker;

/// File-backed storage for the streak tracker
pub struct StreakStorage {
    path: PathBuf,
}

impl StreakStorage {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("streaks.json"),
        }
    }

    /// Load the tracker, or a fresh one when none has been saved yet
    pub fn load(&self) -> Result<StreakTracker> {
        if !self.path.exists() {
            return Ok(StreakTracker::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let tracker: StreakTracker = serde_json::from_str(&content)?;
        Ok(tracker)
    }

    /// Save the tracker
    pub fn save(&self, tracker: &StreakTracker) -> Result<()> {
        let content = serde_json::to_string_pretty(tracker)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Credit a review on the given day and persist the result
    pub fn record_review(&self, day: NaiveDate) -> Result<StreakTracker> {
        let mut tracker = self.load()?;
        tracker.record_review(day);
        self.save(&tracker)?;
        Ok(tracker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_load_without_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let storage = StreakStorage::new(temp_dir.path());

        let tracker = storage.load().unwrap();
        assert_eq!(tracker, StreakTracker::default());
    }

    #[test]
    fn test_record_review_persists() {
        let temp_dir = TempDir::new().unwrap();
        let storage = StreakStorage::new(temp_dir.path());

        storage.record_review(day(10)).unwrap();
        let updated = storage.record_review(day(11)).unwrap();
        assert_eq!(updated.current_streak, 2);

        // A fresh handle sees the saved state
        let reloaded = StreakStorage::new(temp_dir.path()).load().unwrap();
        assert_eq!(reloaded.current_streak, 2);
        assert_eq!(reloaded.last_review_date, Some(day(11)));
    }
}
