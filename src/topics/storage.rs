//! Storage operations for topics
//!
//! Directory structure under the data directory:
//! ```text
//! topics/{topic-id}.json    # Topic metadata and review state
//! content/{topic-id}.md     # Markdown body
//! reviews/{topic-id}.json   # Review history (array of records)
//! streaks.json              # Review streak tracker
//! settings.json             # Application settings
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::markdown::TopicDraft;
use crate::scheduler::{
    advance, classify, initial_state, reset, Clock, DueStatus, SchedulerConfig, SchedulerError,
    SystemClock, FINAL_STAGE,
};
use crate::streaks::{StreakStorage, StreakTracker};

use super::models::*;

#[derive(Error, Debug)]
pub enum TopicStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Topic not found: {0}")]
    TopicNotFound(Uuid),

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, TopicStoreError>;

/// File-backed store for topics and their review data
pub struct TopicStore {
    data_dir: PathBuf,
    clock: Box<dyn Clock>,
    config: SchedulerConfig,
}

impl TopicStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self::with_clock(data_dir, Box::new(SystemClock))
    }

    /// Build a store whose schedule computations use the given clock
    pub fn with_clock(data_dir: PathBuf, clock: Box<dyn Clock>) -> Self {
        Self {
            data_dir,
            clock,
            config: SchedulerConfig::default(),
        }
    }

    /// Replace the scheduling configuration
    pub fn set_config(&mut self, config: SchedulerConfig) {
        self.config = config;
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("mneme"))
            .ok_or(TopicStoreError::DataDirNotFound)
    }

    /// Base directory this store reads and writes
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Current calendar day according to the store clock
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Initialize storage directories
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(self.topics_dir())?;
        fs::create_dir_all(self.content_dir())?;
        fs::create_dir_all(self.reviews_dir())?;
        Ok(())
    }

    /// Get the topics directory path
    fn topics_dir(&self) -> PathBuf {
        self.data_dir.join("topics")
    }

    /// Get the content directory path
    fn content_dir(&self) -> PathBuf {
        self.data_dir.join("content")
    }

    /// Get the review logs directory path
    fn reviews_dir(&self) -> PathBuf {
        self.data_dir.join("reviews")
    }

    /// Get the path for a specific topic
    fn topic_path(&self, topic_id: Uuid) -> PathBuf {
        self.topics_dir().join(format!("{}.json", topic_id))
    }

    /// Get the path for a topic's markdown body
    fn content_path(&self, topic_id: Uuid) -> PathBuf {
        self.content_dir().join(format!("{}.md", topic_id))
    }

    /// Get the path for a topic's review log
    fn review_log_path(&self, topic_id: Uuid) -> PathBuf {
        self.reviews_dir().join(format!("{}.json", topic_id))
    }

    // ==================== Topic Operations ====================

    /// List all topics, sorted by next review date
    pub fn list_topics(&self) -> Result<Vec<Topic>> {
        let topics_dir = self.topics_dir();
        if !topics_dir.exists() {
            return Ok(Vec::new());
        }

        let mut topics = Vec::new();
        for entry in fs::read_dir(&topics_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().map_or(false, |ext| ext == "json") {
                match self.load_topic_from_path(&path) {
                    Ok(topic) => topics.push(topic),
                    Err(e) => {
                        log::warn!("Failed to load topic from {:?}: {}", path, e);
                    }
                }
            }
        }

        topics.sort_by(|a, b| a.review.next_review_date.cmp(&b.review.next_review_date));
        Ok(topics)
    }

    /// Load a topic from a file path
    fn load_topic_from_path(&self, path: &Path) -> Result<Topic> {
        let content = fs::read_to_string(path)?;
        let topic: Topic = serde_json::from_str(&content)?;
        Ok(topic)
    }

    /// Get a specific topic
    pub fn get_topic(&self, topic_id: Uuid) -> Result<Topic> {
        let path = self.topic_path(topic_id);
        if !path.exists() {
            return Err(TopicStoreError::TopicNotFound(topic_id));
        }
        self.load_topic_from_path(&path)
    }

    /// Create a new topic with a fresh stage-0 schedule
    pub fn create_topic(&self, request: CreateTopicRequest) -> Result<Topic> {
        self.init()?;
        let now = self.clock.now();

        let topic = Topic::new(request.title, initial_state(now), now).with_tags(request.tags);
        self.save_topic(&topic)?;

        if let Some(content) = request.content {
            self.write_content(topic.id, &content)?;
        }

        Ok(topic)
    }

    /// Update a topic's title and tags
    pub fn update_topic(&self, topic_id: Uuid, request: UpdateTopicRequest) -> Result<Topic> {
        let mut topic = self.get_topic(topic_id)?;

        if let Some(title) = request.title {
            topic.title = title;
        }
        if let Some(tags) = request.tags {
            topic.tags = tags;
        }
        topic.updated_at = self.clock.now();

        self.save_topic(&topic)?;
        Ok(topic)
    }

    /// Delete a topic, its markdown body, and its review log
    pub fn delete_topic(&self, topic_id: Uuid) -> Result<()> {
        let topic_path = self.topic_path(topic_id);
        if !topic_path.exists() {
            return Err(TopicStoreError::TopicNotFound(topic_id));
        }
        fs::remove_file(&topic_path)?;

        let content_path = self.content_path(topic_id);
        if content_path.exists() {
            fs::remove_file(&content_path)?;
        }

        let log_path = self.review_log_path(topic_id);
        if log_path.exists() {
            fs::remove_file(&log_path)?;
        }

        Ok(())
    }

    /// Write a topic to disk
    fn save_topic(&self, topic: &Topic) -> Result<()> {
        fs::create_dir_all(self.topics_dir())?;
        let path = self.topic_path(topic.id);
        fs::write(&path, serde_json::to_string_pretty(topic)?)?;
        Ok(())
    }

    // ==================== Content Operations ====================

    /// Read the markdown body for a topic
    ///
    /// Topics without a content file read as empty.
    pub fn read_content(&self, topic_id: Uuid) -> Result<String> {
        let path = self.content_path(topic_id);
        if !path.exists() {
            return Ok(String::new());
        }
        Ok(fs::read_to_string(&path)?)
    }

    /// Write the markdown body for a topic
    pub fn write_content(&self, topic_id: Uuid, content: &str) -> Result<()> {
        fs::create_dir_all(self.content_dir())?;
        fs::write(self.content_path(topic_id), content)?;
        Ok(())
    }

    // ==================== Review Operations ====================

    /// Apply a successful review to a topic
    ///
    /// Advances the schedule, appends a review record, and credits the
    /// review streak. Mastered topics must be reset before they can be
    /// reviewed again.
    pub fn submit_review(&self, topic_id: Uuid) -> Result<Topic> {
        let mut topic = self.get_topic(topic_id)?;

        if topic.is_mastered() {
            return Err(TopicStoreError::InvalidOperation(format!(
                "topic '{}' is mastered; reset it to resume reviews",
                topic.title
            )));
        }

        let now = self.clock.now();
        let stage_before = topic.review.current_stage;

        let result = advance(&topic.review, now, &self.config)?;
        topic.apply_schedule(&result, now);
        self.save_topic(&topic)?;

        let record = ReviewRecord::new(
            topic.id,
            stage_before,
            topic.review.current_stage,
            result.interval_days,
            now,
        );
        self.append_review(&record)?;

        StreakStorage::new(&self.data_dir).record_review(now.date_naive())?;

        Ok(topic)
    }

    /// Reset a topic back to stage 0 with a 1-day interval
    ///
    /// Clears the mastered marker, so a reset also puts a mastered topic
    /// back into the review rotation. No review record or streak credit
    /// is written.
    pub fn reset_topic(&self, topic_id: Uuid) -> Result<Topic> {
        let mut topic = self.get_topic(topic_id)?;
        let now = self.clock.now();

        let result = reset(&topic.review, now);
        topic.mastered_at = None;
        topic.apply_schedule(&result, now);
        self.save_topic(&topic)?;

        Ok(topic)
    }

    /// Topics that need review now: overdue first, then due today
    ///
    /// Mastered topics are excluded until they are reset.
    pub fn due_topics(&self) -> Result<Vec<Topic>> {
        let today = self.clock.today();
        let topics = self.list_topics()?;

        Ok(topics
            .into_iter()
            .filter(|t| !t.is_mastered())
            .filter(|t| classify(t.review.next_review_date, today) != DueStatus::Upcoming)
            .collect())
    }

    /// All topics paired with their due classification
    pub fn classified(&self) -> Result<Vec<TopicWithStatus>> {
        let today = self.clock.today();
        let topics = self.list_topics()?;

        Ok(topics
            .into_iter()
            .map(|topic| {
                let status = classify(topic.review.next_review_date, today);
                TopicWithStatus { topic, status }
            })
            .collect())
    }

    /// Due classification for a single topic, relative to the store clock
    pub fn status_of(&self, topic: &Topic) -> DueStatus {
        classify(topic.review.next_review_date, self.clock.today())
    }

    /// Review history for a topic, oldest first
    pub fn review_history(&self, topic_id: Uuid) -> Result<Vec<ReviewRecord>> {
        let path = self.review_log_path(topic_id);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let records: Vec<ReviewRecord> = serde_json::from_str(&content)?;
        Ok(records)
    }

    /// Append a record to a topic's review log
    fn append_review(&self, record: &ReviewRecord) -> Result<()> {
        fs::create_dir_all(self.reviews_dir())?;

        let mut records = self.review_history(record.topic_id)?;
        records.push(record.clone());

        let path = self.review_log_path(record.topic_id);
        fs::write(&path, serde_json::to_string_pretty(&records)?)?;
        Ok(())
    }

    /// Count reviews recorded on a given day across all topics
    fn reviews_on(&self, day: NaiveDate) -> Result<usize> {
        let reviews_dir = self.reviews_dir();
        if !reviews_dir.exists() {
            return Ok(0);
        }

        let mut count = 0;
        for entry in fs::read_dir(&reviews_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().map_or(false, |ext| ext == "json") {
                let content = fs::read_to_string(&path)?;
                match serde_json::from_str::<Vec<ReviewRecord>>(&content) {
                    Ok(records) => {
                        count += records
                            .iter()
                            .filter(|r| r.reviewed_at.date_naive() == day)
                            .count();
                    }
                    Err(e) => {
                        log::warn!("Failed to parse review log {:?}: {}", path, e);
                    }
                }
            }
        }
        Ok(count)
    }

    /// Rebuild the streak tracker by replaying every review log
    ///
    /// Recovers streak state for data trees that carry review logs but no
    /// streak file, such as archives created by older builds.
    pub fn rebuild_streaks(&self) -> Result<StreakTracker> {
        let reviews_dir = self.reviews_dir();
        let mut days = Vec::new();

        if reviews_dir.exists() {
            for entry in fs::read_dir(&reviews_dir)? {
                let entry = entry?;
                let path = entry.path();

                if path.extension().map_or(false, |ext| ext == "json") {
                    let content = fs::read_to_string(&path)?;
                    match serde_json::from_str::<Vec<ReviewRecord>>(&content) {
                        Ok(records) => {
                            days.extend(records.iter().map(|r| r.reviewed_at.date_naive()));
                        }
                        Err(e) => {
                            log::warn!("Failed to parse review log {:?}: {}", path, e);
                        }
                    }
                }
            }
        }

        let tracker = StreakTracker::rebuild(&days);
        StreakStorage::new(&self.data_dir).save(&tracker)?;
        Ok(tracker)
    }

    /// Review statistics across all topics
    pub fn stats(&self) -> Result<ReviewStats> {
        let topics = self.list_topics()?;
        let today = self.clock.today();

        let mut stats = ReviewStats {
            total_topics: topics.len(),
            ..Default::default()
        };

        for topic in &topics {
            let stage = topic.review.current_stage.min(FINAL_STAGE) as usize;
            stats.stage_counts[stage] += 1;

            if topic.is_mastered() {
                stats.mastered_topics += 1;
                continue;
            }

            match classify(topic.review.next_review_date, today) {
                DueStatus::Overdue => stats.overdue += 1,
                DueStatus::DueToday => stats.due_today += 1,
                DueStatus::Upcoming => stats.upcoming += 1,
            }
        }

        stats.reviews_today = self.reviews_on(today)?;

        let tracker = StreakStorage::new(&self.data_dir).load()?;
        stats.current_streak = tracker.current_as_of(today);
        stats.longest_streak = tracker.longest_streak;

        Ok(stats)
    }

    // ==================== Import ====================

    /// Import a topic parsed from a markdown file
    ///
    /// Scheduling fields present in the source are restored; anything
    /// missing starts from a fresh stage-0 schedule. An out-of-range
    /// imported stage is rejected, not clamped.
    pub fn import_draft(&self, draft: TopicDraft) -> Result<Topic> {
        self.init()?;
        let now = self.clock.now();

        let mut state = initial_state(now);
        if let Some(stage) = draft.current_stage {
            state.current_stage = stage;
        }
        if let Some(date) = draft.next_review_date {
            state.next_review_date = date;
        }
        if let Some(count) = draft.review_count {
            state.review_count = count;
        }
        state.last_reviewed_at = draft.last_reviewed_at;
        state.validate()?;

        let mut topic = Topic::new(draft.title, state, now).with_tags(draft.tags);
        topic.mastered_at = draft.mastered_at;
        self.save_topic(&topic)?;

        if !draft.body.is_empty() {
            self.write_content(topic.id, &draft.body)?;
        }

        Ok(topic)
    }
}
