// src/services/browser.rs

//! Remote browser session client.
//!
//! A narrow WebDriver-protocol client covering exactly the element
//! interactions the UI publish flow needs: navigate, locate, click,
//! type. The remote browser profile is assumed to be authenticated
//! already; session login is out of scope.

use std::time::Duration;

use serde_json::{Value, json};
use tokio::time::{Instant, sleep};

use crate::error::{AppError, Result};

/// W3C WebDriver element identifier key.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Poll interval while waiting for an element to appear.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Handle to a located element.
#[derive(Debug, Clone)]
pub struct ElementHandle(String);

/// A live session against a remote WebDriver endpoint.
pub struct BrowserSession {
    client: reqwest::Client,
    base_url: String,
    session_id: String,
}

impl BrowserSession {
    /// Start a new session.
    pub async fn start(client: reqwest::Client, webdriver_url: &str) -> Result<Self> {
        let base_url = webdriver_url.trim_end_matches('/').to_string();
        let body = json!({ "capabilities": { "alwaysMatch": {} } });

        let response = client
            .post(format!("{base_url}/session"))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::api(status.as_u16(), body));
        }

        let value: Value = response.json().await?;
        let session_id = value["value"]["sessionId"]
            .as_str()
            .ok_or_else(|| AppError::api(200, "session response missing sessionId"))?
            .to_string();

        Ok(Self {
            client,
            base_url,
            session_id,
        })
    }

    fn session_url(&self, suffix: &str) -> String {
        format!("{}/session/{}{}", self.base_url, self.session_id, suffix)
    }

    /// Navigate the session to a URL.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        let response = self
            .client
            .post(self.session_url("/url"))
            .json(&json!({ "url": url }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::api(status.as_u16(), body));
        }
        Ok(())
    }

    /// Try to locate an element by CSS selector. `Ok(None)` means the
    /// element is not present yet.
    pub async fn find_element(&self, selector: &str) -> Result<Option<ElementHandle>> {
        let body = json!({ "using": "css selector", "value": selector });
        let response = self
            .client
            .post(self.session_url("/element"))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::api(status.as_u16(), body));
        }

        let value: Value = response.json().await?;
        Ok(value["value"][ELEMENT_KEY]
            .as_str()
            .map(|id| ElementHandle(id.to_string())))
    }

    /// Poll for an element until the bound elapses. Exceeding the bound
    /// is element-not-found, not a distinct timeout kind.
    pub async fn wait_for_element(&self, selector: &str, bound: Duration) -> Result<ElementHandle> {
        let deadline = Instant::now() + bound;
        loop {
            if let Some(handle) = self.find_element(selector).await? {
                return Ok(handle);
            }
            if Instant::now() >= deadline {
                return Err(AppError::element_not_found(selector));
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Click a located element.
    pub async fn click(&self, element: &ElementHandle) -> Result<()> {
        let url = self.session_url(&format!("/element/{}/click", element.0));
        let response = self.client.post(url).json(&json!({})).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::api(status.as_u16(), body));
        }
        Ok(())
    }

    /// Type text into a located element.
    pub async fn send_keys(&self, element: &ElementHandle, text: &str) -> Result<()> {
        let url = self.session_url(&format!("/element/{}/value", element.0));
        let response = self
            .client
            .post(url)
            .json(&json!({ "text": text }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::api(status.as_u16(), body));
        }
        Ok(())
    }

    /// End the session. Best effort; teardown failures are logged, not
    /// propagated.
    pub async fn quit(self) {
        let url = self.session_url("");
        if let Err(e) = self.client.delete(url).send().await {
            log::warn!("Browser session teardown failed: {}", e);
        }
    }
}
