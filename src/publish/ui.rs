// src/publish/ui.rs

//! Simulated UI publish strategy.
//!
//! Drives a remote browser session through the share dialog of the
//! source post. The first element that fails to appear within the
//! configured bound abandons the whole action; there is no partial
//! repost.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{Config, PostDraft, PublishReceipt, UiSelectors};
use crate::services::browser::BrowserSession;

use super::Publisher;

pub struct UiPublisher {
    client: reqwest::Client,
    webdriver_url: String,
    selectors: UiSelectors,
}

impl UiPublisher {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            webdriver_url: config.publish.webdriver_url.clone(),
            selectors: config.selectors.ui.clone(),
        }
    }

    async fn walk_share_dialog(&self, session: &BrowserSession, draft: &PostDraft) -> Result<()> {
        let link = draft.source_link.as_deref().ok_or_else(|| {
            AppError::publish("ui", format!("post {} has no permalink", draft.source_id))
        })?;
        let bound = Duration::from_secs(self.selectors.element_wait_secs);

        session.navigate(link).await?;

        let share = session
            .wait_for_element(&self.selectors.share_button, bound)
            .await?;
        session.click(&share).await?;

        let repost = session
            .wait_for_element(&self.selectors.repost_button, bound)
            .await?;
        session.click(&repost).await?;

        let comment_box = session
            .wait_for_element(&self.selectors.comment_box, bound)
            .await?;
        session.click(&comment_box).await?;
        session.send_keys(&comment_box, &draft.comment).await?;

        let submit = session
            .wait_for_element(&self.selectors.submit_button, bound)
            .await?;
        session.click(&submit).await?;

        Ok(())
    }
}

#[async_trait]
impl Publisher for UiPublisher {
    async fn publish(&self, draft: &PostDraft) -> Result<PublishReceipt> {
        let session = BrowserSession::start(self.client.clone(), &self.webdriver_url).await?;

        let outcome = self.walk_share_dialog(&session, draft).await;
        session.quit().await;
        outcome?;

        log::info!("Published repost of {} via UI", draft.source_id);

        // The UI flow does not report a created post id.
        Ok(PublishReceipt {
            created_id: None,
            image_count: 0,
        })
    }
}
