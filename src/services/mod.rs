// src/services/mod.rs

//! External-service clients: feed scraping, platform REST API,
//! remote browser session, and the stored-token credential.

pub mod api;
pub mod browser;
pub mod feed;
pub mod token;

pub use api::PlatformApi;
pub use browser::BrowserSession;
pub use feed::{ContentSource, FeedScraper};
pub use token::TokenStore;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Config, StoredToken};
use crate::utils::http;

/// An established, authenticated session handle.
///
/// Owned explicitly and passed to each operation; there is no shared
/// implicit driver or client state. One bearer token authorizes both
/// the feed scraper and the REST client.
pub struct Session {
    /// Shared HTTP client (connection pool)
    pub client: reqwest::Client,

    /// Valid bearer credential
    pub token: StoredToken,
}

impl Session {
    /// Establish a session: build the HTTP client and load a valid
    /// token. Fails with an authentication error when the token is
    /// missing or expired; no further actions may be attempted until
    /// the operator re-runs `login`.
    pub fn establish(config: &Config, store: &TokenStore, now: DateTime<Utc>) -> Result<Self> {
        let client = http::create_async_client(&config.http)?;
        let token = store.require_valid(now)?;
        Ok(Self { client, token })
    }
}
