use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use mneme_lib::markdown::TopicDraft;
use mneme_lib::scheduler::{Clock, FixedClock, SystemClock};
use mneme_lib::settings::load_settings;
use mneme_lib::topics::{
    CreateTopicRequest, ReviewRecord, ReviewStats, Topic, TopicStore, TopicWithStatus,
};

/// Shared application state for CLI commands
pub struct App {
    pub store: TopicStore,
}

impl App {
    /// Initialize from the given or default data directory
    ///
    /// When `at` is given, every schedule computation runs against that
    /// pinned instant instead of the system clock.
    pub fn new(data_dir: Option<&Path>, at: Option<&str>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => TopicStore::default_data_dir()
                .context("Failed to get data directory")?,
        };

        let clock: Box<dyn Clock> = match at {
            Some(raw) => {
                let pinned = DateTime::parse_from_rfc3339(raw)
                    .with_context(|| format!("Invalid --at timestamp '{}'", raw))?;
                Box::new(FixedClock(pinned.with_timezone(&Utc)))
            }
            None => Box::new(SystemClock),
        };

        let settings = load_settings(&data_dir)
            .context("Failed to load settings")?;

        let mut store = TopicStore::with_clock(data_dir, clock);
        store.set_config(settings.scheduler);

        Ok(Self { store })
    }

    /// Find a topic by id, or by title (case-insensitive prefix match)
    pub fn find_topic(&self, needle: &str) -> Result<Topic> {
        if let Ok(id) = Uuid::parse_str(needle) {
            return self.store.get_topic(id)
                .with_context(|| format!("Failed to get topic {}", id));
        }

        let topics = self.list_topics()?;
        let needle_lower = needle.to_lowercase();

        // Exact match first
        if let Some(t) = topics.iter().find(|t| t.title.to_lowercase() == needle_lower) {
            return Ok(t.clone());
        }

        // Prefix match
        let matches: Vec<&Topic> = topics.iter()
            .filter(|t| t.title.to_lowercase().starts_with(&needle_lower))
            .collect();

        match matches.len() {
            0 => bail!("No topic matching '{}'. Available topics:\n{}", needle,
                topics.iter().map(|t| format!("  - {}", t.title)).collect::<Vec<_>>().join("\n")),
            1 => Ok(matches[0].clone()),
            _ => bail!("Ambiguous topic '{}'. Matches:\n{}", needle,
                matches.iter().map(|t| format!("  - {}", t.title)).collect::<Vec<_>>().join("\n")),
        }
    }

    /// List all topics, sorted by next review date
    pub fn list_topics(&self) -> Result<Vec<Topic>> {
        self.store.list_topics().context("Failed to list topics")
    }

    /// All topics paired with their due classification
    pub fn classified(&self) -> Result<Vec<TopicWithStatus>> {
        self.store.classified().context("Failed to classify topics")
    }

    /// Topics that need review now
    pub fn due_topics(&self) -> Result<Vec<Topic>> {
        self.store.due_topics().context("Failed to list due topics")
    }

    /// Create a new topic
    pub fn create_topic(&self, request: CreateTopicRequest) -> Result<Topic> {
        self.store.create_topic(request).context("Failed to create topic")
    }

    /// Record a successful review
    pub fn submit_review(&self, topic_id: Uuid) -> Result<Topic> {
        self.store.submit_review(topic_id).context("Failed to submit review")
    }

    /// Reset a topic back to stage 0
    pub fn reset_topic(&self, topic_id: Uuid) -> Result<Topic> {
        self.store.reset_topic(topic_id).context("Failed to reset topic")
    }

    /// Delete a topic and its files
    pub fn delete_topic(&self, topic_id: Uuid) -> Result<()> {
        self.store.delete_topic(topic_id).context("Failed to delete topic")
    }

    /// Read a topic's markdown body
    pub fn read_content(&self, topic_id: Uuid) -> Result<String> {
        self.store.read_content(topic_id).context("Failed to read content")
    }

    /// Review history for a topic, oldest first
    pub fn review_history(&self, topic_id: Uuid) -> Result<Vec<ReviewRecord>> {
        self.store.review_history(topic_id).context("Failed to read review history")
    }

    /// Import a topic parsed from a markdown file
    pub fn import_draft(&self, draft: TopicDraft) -> Result<Topic> {
        self.store.import_draft(draft).context("Failed to import topic")
    }

    /// Review statistics across all topics
    pub fn stats(&self) -> Result<ReviewStats> {
        self.store.stats().context("Failed to compute statistics")
    }
}
