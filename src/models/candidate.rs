//! Candidate post data structure.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A post discovered during one feed pass.
///
/// Candidates are ephemeral: they live for the duration of a single
/// discovery pass and are never persisted directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Candidate {
    /// Platform-assigned identifier (URN or element id)
    pub id: String,

    /// Author display name (empty string when the element is missing)
    pub author: String,

    /// Body text
    pub body: String,

    /// Reaction count (0 when the counter element is missing)
    pub reactions: u32,

    /// Comment count (0 when the counter element is missing)
    pub comments: u32,

    /// Image URLs attached to the post
    pub image_urls: Vec<String>,

    /// Canonical URL of the post, when resolvable
    pub link: Option<String>,
}

impl Candidate {
    /// Engagement score used for selection: reactions + comments.
    pub fn score(&self) -> u32 {
        self.reactions + self.comments
    }

    /// Stable fallback identifier for posts without a platform id.
    ///
    /// Returns `None` when author and body are both empty, since such
    /// a digest would collide across unrelated placeholder rows.
    pub fn digest_id(author: &str, body: &str) -> Option<String> {
        if author.is_empty() && body.is_empty() {
            return None;
        }
        let mut hasher = Sha256::new();
        hasher.update(author.as_bytes());
        hasher.update(b"\x1f");
        hasher.update(body.as_bytes());
        Some(hex::encode(&hasher.finalize()[..16]))
    }
}
