// src/models/mod.rs

//! Domain models for the reshare application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod candidate;
mod config;
mod history;
mod token;

// Re-export all public types
pub use candidate::Candidate;
pub use config::{
    CommentPolicyKind, CommentsConfig, Config, DiscoveryConfig, HttpConfig, PathsConfig,
    PublishConfig, PublishStrategy, ScheduleConfig, SelectorProfile, SlotSpacing, UiSelectors,
};
pub use history::{EngagementRecord, History};
pub use token::StoredToken;

/// Final content of one repost action, handed to a publisher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    /// Identifier of the source post
    pub source_id: String,

    /// Author of the source post
    pub source_author: String,

    /// Permalink of the source post, required by the UI strategy
    pub source_link: Option<String>,

    /// Sanitized text to publish (attribution line + body + comment)
    pub text: String,

    /// Image URLs to republish, in source order
    pub image_urls: Vec<String>,

    /// Comment composed for this action, kept for the history record
    pub comment: String,
}

/// Outcome metadata of a successful publish.
#[derive(Debug, Clone, Default)]
pub struct PublishReceipt {
    /// Platform identifier of the created post, when reported
    pub created_id: Option<String>,

    /// Number of image assets actually republished
    pub image_count: u32,
}
