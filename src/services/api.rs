// src/services/api.rs

//! Platform REST API client.
//!
//! Covers the three endpoints the repost flow consumes: acting-identity
//! lookup, two-step image asset upload, and post creation. Every call
//! carries the bearer credential; any non-success status surfaces as an
//! API error with the response body attached.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AppError, Result};

/// Protocol version header required by the platform API.
const RESTLI_HEADER: (&str, &str) = ("X-Restli-Protocol-Version", "2.0.0");

/// Header carrying the created post id on a 201 response.
const CREATED_ID_HEADER: &str = "X-RestLi-Id";

/// The acting identity behind API publishes.
#[derive(Debug, Clone, Deserialize)]
pub struct Identity {
    /// Platform member id (URN tail)
    pub id: String,
}

impl Identity {
    /// Person URN used as post author and upload owner.
    pub fn person_urn(&self) -> String {
        format!("urn:li:person:{}", self.id)
    }
}

/// Result of registering an upload: where to stream the bytes and the
/// asset identifier to reference from the post.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisteredUpload {
    #[serde(rename = "asset")]
    pub asset_id: String,

    #[serde(rename = "uploadMechanism")]
    upload_mechanism: UploadMechanism,
}

impl RegisteredUpload {
    /// URL to stream the image bytes to.
    pub fn upload_url(&self) -> &str {
        &self.upload_mechanism.media_upload.upload_url
    }
}

#[derive(Debug, Clone, Deserialize)]
struct UploadMechanism {
    #[serde(rename = "com.linkedin.digitalmedia.uploading.MediaUploadHttpRequest")]
    media_upload: MediaUploadRequest,
}

#[derive(Debug, Clone, Deserialize)]
struct MediaUploadRequest {
    #[serde(rename = "uploadUrl")]
    upload_url: String,
}

#[derive(Debug, Deserialize)]
struct RegisterUploadResponse {
    value: RegisteredUpload,
}

/// A media entry in a post creation request.
#[derive(Debug, Serialize)]
struct MediaEntry<'a> {
    status: &'static str,
    media: &'a str,
}

/// REST client bound to one base URL and one bearer token.
pub struct PlatformApi {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl PlatformApi {
    /// Create a client sharing the session HTTP client.
    pub fn new(client: reqwest::Client, base_url: &str, access_token: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
        }
    }

    /// Resolve the acting identity.
    pub async fn me(&self) -> Result<Identity> {
        let url = format!("{}/v2/me", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .header(RESTLI_HEADER.0, RESTLI_HEADER.1)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::api(status.as_u16(), body));
        }
        Ok(response.json().await?)
    }

    /// Register an image upload intent for the given owner.
    pub async fn register_upload(&self, owner_urn: &str) -> Result<RegisteredUpload> {
        let url = format!("{}/v2/assets?action=registerUpload", self.base_url);
        let body = json!({
            "registerUploadRequest": {
                "recipes": ["urn:li:digitalmediaRecipe:feedshare-image"],
                "owner": owner_urn,
                "serviceRelationships": [{
                    "relationshipType": "OWNER",
                    "identifier": "urn:li:userGeneratedContent"
                }]
            }
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .header(RESTLI_HEADER.0, RESTLI_HEADER.1)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::api(status.as_u16(), body));
        }

        let parsed: RegisterUploadResponse = response.json().await?;
        Ok(parsed.value)
    }

    /// Stream image bytes to a previously registered upload URL.
    pub async fn upload_asset(&self, upload_url: &str, bytes: Vec<u8>) -> Result<()> {
        let response = self
            .client
            .post(upload_url)
            .bearer_auth(&self.access_token)
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::api(status.as_u16(), body));
        }
        Ok(())
    }

    /// Fetch raw bytes from a source image URL.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::api(status.as_u16(), format!("GET {url}")));
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Submit a post. Only a 201 response counts as success; the
    /// created post id is taken from the response header when present.
    pub async fn create_post(
        &self,
        author_urn: &str,
        text: &str,
        asset_ids: &[String],
        visibility: &str,
    ) -> Result<Option<String>> {
        let url = format!("{}/v2/ugcPosts", self.base_url);

        let mut share_content = json!({
            "shareCommentary": { "text": text },
            "shareMediaCategory": "NONE"
        });
        if !asset_ids.is_empty() {
            let media: Vec<_> = asset_ids
                .iter()
                .map(|asset| MediaEntry {
                    status: "READY",
                    media: asset,
                })
                .collect();
            share_content["shareMediaCategory"] = json!("IMAGE");
            share_content["media"] = serde_json::to_value(media)?;
        }

        let body = json!({
            "author": author_urn,
            "lifecycleState": "PUBLISHED",
            "specificContent": { "com.linkedin.ugc.ShareContent": share_content },
            "visibility": { "com.linkedin.ugc.MemberNetworkVisibility": visibility }
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .header(RESTLI_HEADER.0, RESTLI_HEADER.1)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() != 201 {
            let body = response.text().await.unwrap_or_default();
            log::error!("Post creation failed ({}): {}", status, body);
            return Err(AppError::api(status.as_u16(), body));
        }

        let created_id = response
            .headers()
            .get(CREATED_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Ok(created_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_urn_format() {
        let identity = Identity { id: "AbC123".into() };
        assert_eq!(identity.person_urn(), "urn:li:person:AbC123");
    }

    #[test]
    fn test_register_upload_response_shape() {
        let raw = r#"{
            "value": {
                "asset": "urn:li:digitalmediaAsset:XYZ",
                "uploadMechanism": {
                    "com.linkedin.digitalmedia.uploading.MediaUploadHttpRequest": {
                        "uploadUrl": "https://upload.example.com/slot/1"
                    }
                }
            }
        }"#;

        let parsed: RegisterUploadResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.value.asset_id, "urn:li:digitalmediaAsset:XYZ");
        assert_eq!(parsed.value.upload_url(), "https://upload.example.com/slot/1");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = PlatformApi::new(reqwest::Client::new(), "https://api.example.com/", "t".into());
        assert_eq!(api.base_url, "https://api.example.com");
    }
}
