// src/comment/mod.rs

//! Comment generation strategies.
//!
//! One `CommentPolicy` seam with two concrete policies, so new
//! generation approaches can be added without branching in callers.

mod sentiment;
mod template;

pub use sentiment::SentimentCommenter;
pub use template::TemplateCommenter;

use crate::models::{CommentPolicyKind, CommentsConfig};
use crate::utils::text::{find_topic, sanitize_for_channel};

/// Strategy for producing a short comment from a candidate's body text.
pub trait CommentPolicy: Send + Sync {
    /// Compose a sanitized comment for the given body text.
    fn compose(&self, body: &str) -> String;
}

/// Build the configured comment policy.
pub fn from_config(config: &CommentsConfig, topics: &[String]) -> Box<dyn CommentPolicy> {
    match config.policy {
        CommentPolicyKind::Template => Box::new(TemplateCommenter::new(config, topics)),
        CommentPolicyKind::Sentiment => Box::new(SentimentCommenter::new(config, topics)),
    }
}

/// Resolve the topic to substitute: first configured topic found in the
/// body, else a uniformly random configured topic.
fn resolve_topic(body: &str, topics: &[String]) -> String {
    if let Some(topic) = find_topic(body, topics) {
        return topic.to_string();
    }
    pick(topics).cloned().unwrap_or_default()
}

/// Uniformly random element, or `None` for an empty slice.
fn pick<T>(items: &[T]) -> Option<&T> {
    if items.is_empty() {
        None
    } else {
        items.get(fastrand::usize(..items.len()))
    }
}

/// Substitute the topic and apply channel sanitization.
fn render(template: &str, topic: &str, max_len: usize) -> String {
    sanitize_for_channel(&template.replace("{topic}", topic), max_len)
}
