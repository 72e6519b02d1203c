//! Stored access credential.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bearer access token persisted between runs.
///
/// Acquired out of band (interactive OAuth flow) and captured via the
/// `login` subcommand; read at session start, refreshed by the operator
/// when expired.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    /// Opaque bearer token
    pub access_token: String,

    /// Expiry as epoch seconds
    pub expires_at: i64,
}

impl StoredToken {
    /// Default platform token lifetime: 60 days.
    pub const DEFAULT_LIFETIME_SECS: i64 = 60 * 24 * 60 * 60;

    /// Create a token expiring after the default lifetime.
    pub fn with_default_expiry(access_token: String, now: DateTime<Utc>) -> Self {
        Self {
            access_token,
            expires_at: now.timestamp() + Self::DEFAULT_LIFETIME_SECS,
        }
    }

    /// Whether the token has expired at the given instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now.timestamp()
    }
}
