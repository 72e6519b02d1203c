//! Engagement history data structures.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// One recorded repost action. Append-only; never mutated afterwards.
///
/// Timestamps carry the local offset so the daily counter, the cap
/// gate and the slot planner all agree on the calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngagementRecord {
    /// Identifier of the source post
    pub post_id: String,

    /// Author of the source post
    pub author: String,

    /// When the action was taken, local time
    pub timestamp: DateTime<Local>,

    /// Whether any image assets were republished with the post
    pub had_images: bool,

    /// Number of image assets republished
    pub image_count: u32,

    /// Comment text that accompanied the repost
    pub comment: String,
}

/// Full engagement history: the record list plus per-day action counts.
///
/// The daily counter resets implicitly when the observed date changes,
/// since counts are keyed by calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct History {
    /// All recorded actions, in append order
    #[serde(default)]
    pub posts: Vec<EngagementRecord>,

    /// Actions taken per calendar day, keyed by `YYYY-MM-DD`
    #[serde(default)]
    pub daily_counts: BTreeMap<String, u32>,
}

impl History {
    /// Whether a post identifier has already been acted on.
    pub fn contains(&self, post_id: &str) -> bool {
        self.posts.iter().any(|r| r.post_id == post_id)
    }

    /// Set of all recorded post identifiers.
    pub fn seen_ids(&self) -> HashSet<&str> {
        self.posts.iter().map(|r| r.post_id.as_str()).collect()
    }

    /// Number of actions recorded on the given calendar day.
    pub fn posted_on(&self, date: NaiveDate) -> u32 {
        self.daily_counts
            .get(&date.format("%Y-%m-%d").to_string())
            .copied()
            .unwrap_or(0)
    }

    /// Append a record and bump the counter for its calendar day.
    pub fn append(&mut self, record: EngagementRecord) {
        let day = record.timestamp.date_naive().format("%Y-%m-%d").to_string();
        *self.daily_counts.entry(day).or_insert(0) += 1;
        self.posts.push(record);
    }

    /// Records whose timestamp falls on the given calendar day.
    pub fn records_on(&self, date: NaiveDate) -> Vec<&EngagementRecord> {
        self.posts
            .iter()
            .filter(|r| r.timestamp.date_naive() == date)
            .collect()
    }
}
