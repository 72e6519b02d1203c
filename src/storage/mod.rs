// src/storage/mod.rs

//! Engagement history persistence.

mod local;

pub use local::LocalHistory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{EngagementRecord, History};

/// Abstract history store.
///
/// The store owns the authoritative copy on disk; callers read a
/// snapshot, decide, then append. Appends persist before returning so a
/// crash never loses an already-performed action.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Load the full history. A missing file is an empty history.
    async fn load(&self) -> Result<History>;

    /// Append one record and persist the whole history.
    async fn append(&self, record: EngagementRecord) -> Result<History>;
}
