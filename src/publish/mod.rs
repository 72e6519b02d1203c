// src/publish/mod.rs

//! Publish strategies.
//!
//! Two mutually exclusive ways to perform the repost action: a
//! structured post via the platform REST API, or simulated UI
//! interaction through a remote browser session.

mod api;
mod ui;

pub use api::ApiPublisher;
pub use ui::UiPublisher;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Config, PostDraft, PublishReceipt, PublishStrategy};

/// Capability interface for performing one publish action.
///
/// Implementations do not retry; a failed action is abandoned and
/// reported so the caller records nothing.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, draft: &PostDraft) -> Result<PublishReceipt>;
}

/// Build the configured publisher, sharing the session HTTP client.
pub fn from_config(
    client: reqwest::Client,
    config: &Config,
    access_token: String,
) -> Box<dyn Publisher> {
    match config.publish.strategy {
        PublishStrategy::Api => Box::new(ApiPublisher::new(client, config, access_token)),
        PublishStrategy::Ui => Box::new(UiPublisher::new(client, config)),
    }
}
