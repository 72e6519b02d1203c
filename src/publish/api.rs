// src/publish/api.rs

//! REST API publish strategy.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Config, PostDraft, PublishReceipt};
use crate::services::api::PlatformApi;

use super::Publisher;

/// Publishes a structured post through the platform REST API,
/// optionally republishing the source images as fresh assets.
pub struct ApiPublisher {
    api: PlatformApi,
    visibility: String,
    upload_images: bool,
}

impl ApiPublisher {
    pub fn new(client: reqwest::Client, config: &Config, access_token: String) -> Self {
        Self {
            api: PlatformApi::new(client, &config.publish.api_base, access_token),
            visibility: config.publish.visibility.clone(),
            upload_images: config.publish.upload_images,
        }
    }

    /// Re-upload one source image, returning the new asset id.
    async fn republish_image(&self, owner_urn: &str, url: &str) -> Result<String> {
        let registered = self.api.register_upload(owner_urn).await?;
        let bytes = self.api.fetch_bytes(url).await?;
        self.api.upload_asset(registered.upload_url(), bytes).await?;
        Ok(registered.asset_id)
    }
}

#[async_trait]
impl Publisher for ApiPublisher {
    async fn publish(&self, draft: &PostDraft) -> Result<PublishReceipt> {
        let identity = self.api.me().await?;
        let owner_urn = identity.person_urn();

        // A failed image stays out of the post; the post itself still
        // goes out.
        let mut asset_ids = Vec::new();
        if self.upload_images {
            for url in &draft.image_urls {
                match self.republish_image(&owner_urn, url).await {
                    Ok(asset_id) => asset_ids.push(asset_id),
                    Err(e) => log::warn!("Skipping image {}: {}", url, e),
                }
            }
        }

        let created_id = self
            .api
            .create_post(&owner_urn, &draft.text, &asset_ids, &self.visibility)
            .await?;

        log::info!(
            "Published repost of {} via API ({} image(s))",
            draft.source_id,
            asset_ids.len()
        );

        Ok(PublishReceipt {
            created_id,
            image_count: asset_ids.len() as u32,
        })
    }
}
