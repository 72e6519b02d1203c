// src/services/feed.rs

//! Feed content source.
//!
//! Fetches the platform search page for a topic and extracts candidate
//! posts using configured CSS selectors.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Candidate, Config, SelectorProfile};
use crate::utils::text::parse_count;
use crate::utils::{build_search_url, resolve_url};

/// Capability interface for candidate discovery.
///
/// Keeps the brittle selector-coupled lookup logic swappable without
/// touching selection or scheduling.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// List candidate posts for a topic. Per-field extraction failures
    /// degrade to empty/zero values; only transport-level failures are
    /// errors.
    async fn list_candidates(&self, topic: &str) -> Result<Vec<Candidate>>;
}

/// Selector-driven content source over the platform search page.
pub struct FeedScraper {
    client: reqwest::Client,
    search_url: String,
    selectors: SelectorProfile,
    access_token: String,
}

impl FeedScraper {
    /// Create a feed scraper sharing the session HTTP client.
    pub fn new(client: reqwest::Client, config: &Config, access_token: String) -> Self {
        Self {
            client,
            search_url: config.discovery.search_url.clone(),
            selectors: config.selectors.clone(),
            access_token,
        }
    }

    /// Extract candidates from a fetched search page.
    fn parse_page(&self, html: &str, base_url: &Url) -> Result<Vec<Candidate>> {
        let document = Html::parse_document(html);

        let post_sel = parse_selector(&self.selectors.post_selector)?;
        let author_sel = parse_selector(&self.selectors.author_selector)?;
        let body_sel = parse_selector(&self.selectors.body_selector)?;
        let reactions_sel = parse_selector(&self.selectors.reactions_selector)?;
        let comments_sel = parse_selector(&self.selectors.comments_selector)?;
        let image_sel = parse_selector(&self.selectors.image_selector)?;
        let link_sel = parse_selector(&self.selectors.link_selector)?;

        let mut candidates = Vec::new();
        for post in document.select(&post_sel) {
            if let Some(candidate) = self.parse_post(
                &post,
                &author_sel,
                &body_sel,
                &reactions_sel,
                &comments_sel,
                &image_sel,
                &link_sel,
                base_url,
            ) {
                candidates.push(candidate);
            }
        }
        Ok(candidates)
    }

    /// Extract a single candidate from a post container.
    ///
    /// Missing author, body or counter elements default to empty/zero.
    /// A post is dropped only when no identifier can be derived at all.
    #[allow(clippy::too_many_arguments)]
    fn parse_post(
        &self,
        post: &ElementRef,
        author_sel: &Selector,
        body_sel: &Selector,
        reactions_sel: &Selector,
        comments_sel: &Selector,
        image_sel: &Selector,
        link_sel: &Selector,
        base_url: &Url,
    ) -> Option<Candidate> {
        let author = select_text(post, author_sel);
        let body = select_text(post, body_sel);

        let id = post
            .value()
            .attr(&self.selectors.id_attr)
            .or_else(|| post.value().attr("id"))
            .map(str::to_string)
            .or_else(|| Candidate::digest_id(&author, &body))?;

        let reactions = parse_count(&select_text(post, reactions_sel));
        let comments = parse_count(&select_text(post, comments_sel));

        let image_urls = post
            .select(image_sel)
            .filter_map(|img| img.value().attr(self.selectors.image_attr.as_str()))
            .map(|src| resolve_url(base_url, src))
            .collect();

        let link = post
            .select(link_sel)
            .next()
            .and_then(|a| a.value().attr(self.selectors.link_attr.as_str()))
            .map(|href| resolve_url(base_url, href));

        Some(Candidate {
            id,
            author,
            body,
            reactions,
            comments,
            image_urls,
            link,
        })
    }
}

#[async_trait]
impl ContentSource for FeedScraper {
    async fn list_candidates(&self, topic: &str) -> Result<Vec<Candidate>> {
        let url = build_search_url(&self.search_url, topic);
        log::info!("Searching feed for topic '{}'", topic);

        let html = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let base_url = Url::parse(&url)?;
        let candidates = self.parse_page(&html, &base_url)?;
        log::info!("Found {} candidate posts for '{}'", candidates.len(), topic);
        Ok(candidates)
    }
}

/// Join all text nodes under the first match of a selector.
fn select_text(post: &ElementRef, selector: &Selector) -> String {
    post.select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Config;

    fn scraper() -> FeedScraper {
        let mut config = Config::default();
        config.selectors.post_selector = "div.post".into();
        config.selectors.id_attr = "data-urn".into();
        config.selectors.author_selector = "span.author".into();
        config.selectors.body_selector = "p.body".into();
        config.selectors.reactions_selector = "span.reactions".into();
        config.selectors.comments_selector = "span.comments".into();
        config.selectors.image_selector = "img.media".into();
        config.selectors.image_attr = "src".into();
        config.selectors.link_selector = "a.permalink".into();
        config.selectors.link_attr = "href".into();
        FeedScraper::new(reqwest::Client::new(), &config, "tok".into())
    }

    fn base() -> Url {
        Url::parse("https://example.com/search?keywords=farming").unwrap()
    }

    #[test]
    fn test_parse_full_post() {
        let html = r#"
            <div class="post" data-urn="urn:li:activity:1">
              <span class="author">Ada</span>
              <p class="body">Precision farming update</p>
              <span class="reactions">1,234</span>
              <span class="comments">56 comments</span>
              <img class="media" src="/img/a.jpg">
              <a class="permalink" href="/posts/1">link</a>
            </div>
        "#;

        let candidates = scraper().parse_page(html, &base()).unwrap();
        assert_eq!(candidates.len(), 1);

        let c = &candidates[0];
        assert_eq!(c.id, "urn:li:activity:1");
        assert_eq!(c.author, "Ada");
        assert_eq!(c.reactions, 1234);
        assert_eq!(c.comments, 56);
        assert_eq!(c.image_urls, vec!["https://example.com/img/a.jpg"]);
        assert_eq!(c.link.as_deref(), Some("https://example.com/posts/1"));
    }

    #[test]
    fn test_missing_counters_default_to_zero() {
        let html = r#"
            <div class="post" data-urn="urn:li:activity:2">
              <span class="author">Bob</span>
              <p class="body">No counters rendered yet</p>
            </div>
        "#;

        let candidates = scraper().parse_page(html, &base()).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].reactions, 0);
        assert_eq!(candidates[0].comments, 0);
        assert_eq!(candidates[0].score(), 0);
    }

    #[test]
    fn test_id_falls_back_to_element_id_then_digest() {
        let html = r#"
            <div class="post" id="ember123">
              <span class="author">Cara</span>
              <p class="body">Body</p>
            </div>
            <div class="post">
              <span class="author">Dan</span>
              <p class="body">Another body</p>
            </div>
        "#;

        let candidates = scraper().parse_page(html, &base()).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id, "ember123");
        assert_eq!(
            candidates[1].id,
            Candidate::digest_id("Dan", "Another body").unwrap()
        );
    }

    #[test]
    fn test_unidentifiable_post_dropped() {
        let html = r#"<div class="post"></div>"#;
        let candidates = scraper().parse_page(html, &base()).unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_invalid_selector_is_config_error() {
        let mut config = Config::default();
        config.selectors.post_selector = "[[broken".into();
        let scraper = FeedScraper::new(reqwest::Client::new(), &config, "tok".into());
        assert!(matches!(
            scraper.parse_page("<div></div>", &base()),
            Err(AppError::Selector { .. })
        ));
    }
}
