// src/storage/local.rs

//! Local filesystem history store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::error::Result;
use crate::models::{EngagementRecord, History};

use super::HistoryStore;

/// JSON-file-backed history store.
///
/// Writes go to a temporary sibling first and are renamed into place,
/// so a crash mid-write leaves the previous file intact.
pub struct LocalHistory {
    path: PathBuf,
}

impl LocalHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_atomic(&self, history: &History) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let tmp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(history)?;
        fs::write(&tmp_path, json).await?;
        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for LocalHistory {
    async fn load(&self) -> Result<History> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(History::default());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content) {
            Ok(history) => Ok(history),
            Err(e) => {
                log::warn!(
                    "History file {:?} is unreadable ({}); starting empty",
                    self.path,
                    e
                );
                Ok(History::default())
            }
        }
    }

    async fn append(&self, record: EngagementRecord) -> Result<History> {
        let mut history = self.load().await?;
        history.append(record);
        self.write_atomic(&history).await?;
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use tempfile::TempDir;

    fn record(id: &str) -> EngagementRecord {
        EngagementRecord {
            post_id: id.to_string(),
            author: "Author".to_string(),
            timestamp: Local.with_ymd_and_hms(2026, 3, 14, 10, 30, 0).unwrap(),
            had_images: true,
            image_count: 2,
            comment: "Worth sharing".to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = LocalHistory::new(dir.path().join("history.json"));

        let history = store.load().await.unwrap();
        assert!(history.posts.is_empty());
        assert!(history.daily_counts.is_empty());
    }

    #[tokio::test]
    async fn test_append_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = LocalHistory::new(dir.path().join("history.json"));

        store.append(record("p1")).await.unwrap();
        store.append(record("p2")).await.unwrap();

        let history = store.load().await.unwrap();
        assert_eq!(history.posts.len(), 2);
        assert_eq!(history.posts[0].post_id, "p1");
        assert_eq!(history.posts[1].image_count, 2);
        assert_eq!(history.daily_counts.get("2026-03-14"), Some(&2));
    }

    #[tokio::test]
    async fn test_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = LocalHistory::new(&path);
        let history = store.load().await.unwrap();
        assert!(history.posts.is_empty());
    }

    #[tokio::test]
    async fn test_no_tmp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = LocalHistory::new(dir.path().join("history.json"));
        store.append(record("p1")).await.unwrap();

        assert!(!dir.path().join("history.json.tmp").exists());
        assert!(dir.path().join("history.json").exists());
    }

    #[tokio::test]
    async fn test_append_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let store = LocalHistory::new(dir.path().join("nested/deeper/history.json"));

        let history = store.append(record("p1")).await.unwrap();
        assert_eq!(history.posts.len(), 1);
        assert!(store.path().exists());
    }
}
