//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP client behavior settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Feed discovery settings
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// CSS selectors for feed post extraction
    #[serde(default)]
    pub selectors: SelectorProfile,

    /// Comment generation settings
    #[serde(default)]
    pub comments: CommentsConfig,

    /// Publish strategy settings
    #[serde(default)]
    pub publish: PublishConfig,

    /// Daily scheduling settings
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// File names inside the storage directory
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.discovery.topics.is_empty() {
            return Err(AppError::validation("No discovery topics defined"));
        }
        if !self.discovery.search_url.contains("{query}") {
            return Err(AppError::validation(
                "discovery.search_url must contain the {query} placeholder",
            ));
        }
        if self.selectors.post_selector.trim().is_empty() {
            return Err(AppError::validation("selectors.post_selector is empty"));
        }
        if self.comments.max_length == 0 {
            return Err(AppError::validation("comments.max_length must be > 0"));
        }
        match self.comments.policy {
            CommentPolicyKind::Template if self.comments.templates.is_empty() => {
                return Err(AppError::validation(
                    "comments.templates is empty for the template policy",
                ));
            }
            CommentPolicyKind::Sentiment
                if self.comments.positive_templates.is_empty()
                    || self.comments.neutral_templates.is_empty()
                    || self.comments.negative_templates.is_empty() =>
            {
                return Err(AppError::validation(
                    "sentiment policy requires positive, neutral and negative templates",
                ));
            }
            _ => {}
        }
        if self.schedule.max_posts_per_day == 0 {
            return Err(AppError::validation(
                "schedule.max_posts_per_day must be > 0",
            ));
        }
        if self.schedule.max_posts_per_day > 1440 {
            return Err(AppError::validation(
                "schedule.max_posts_per_day must be <= 1440",
            ));
        }
        if self.schedule.window_start_hour >= self.schedule.window_end_hour {
            return Err(AppError::validation(
                "schedule.window_start_hour must be before window_end_hour",
            ));
        }
        if self.schedule.window_end_hour > 24 {
            return Err(AppError::validation("schedule.window_end_hour must be <= 24"));
        }
        if self.schedule.spacing == SlotSpacing::Fixed && self.schedule.interval_minutes == 0 {
            return Err(AppError::validation(
                "schedule.interval_minutes must be > 0 for fixed spacing",
            ));
        }
        Ok(())
    }
}

/// HTTP client behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Feed discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Content search URL with a `{query}` placeholder
    #[serde(default = "defaults::search_url")]
    pub search_url: String,

    /// Topics to search for, in priority order
    #[serde(default = "defaults::topics")]
    pub topics: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            search_url: defaults::search_url(),
            topics: defaults::topics(),
        }
    }
}

/// CSS selectors for extracting posts from the feed markup.
///
/// Selector lookups are brittle by nature; an upstream markup change is
/// a config edit, not a code change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorProfile {
    /// Selector for a post container element
    #[serde(default = "defaults::post_selector")]
    pub post_selector: String,

    /// Attribute on the container carrying the platform id
    #[serde(default = "defaults::id_attr")]
    pub id_attr: String,

    /// Selector for the author name element
    #[serde(default = "defaults::author_selector")]
    pub author_selector: String,

    /// Selector for the body text element
    #[serde(default = "defaults::body_selector")]
    pub body_selector: String,

    /// Selector for the reaction counter element
    #[serde(default = "defaults::reactions_selector")]
    pub reactions_selector: String,

    /// Selector for the comment counter element
    #[serde(default = "defaults::comments_selector")]
    pub comments_selector: String,

    /// Selector for attached image elements
    #[serde(default = "defaults::image_selector")]
    pub image_selector: String,

    /// Attribute on image elements carrying the source URL
    #[serde(default = "defaults::image_attr")]
    pub image_attr: String,

    /// Selector for the permalink element
    #[serde(default = "defaults::link_selector")]
    pub link_selector: String,

    /// Attribute on the permalink element carrying the URL
    #[serde(default = "defaults::link_attr")]
    pub link_attr: String,

    /// UI publish flow selectors, in interaction order
    #[serde(default)]
    pub ui: UiSelectors,
}

impl Default for SelectorProfile {
    fn default() -> Self {
        Self {
            post_selector: defaults::post_selector(),
            id_attr: defaults::id_attr(),
            author_selector: defaults::author_selector(),
            body_selector: defaults::body_selector(),
            reactions_selector: defaults::reactions_selector(),
            comments_selector: defaults::comments_selector(),
            image_selector: defaults::image_selector(),
            image_attr: defaults::image_attr(),
            link_selector: defaults::link_selector(),
            link_attr: defaults::link_attr(),
            ui: UiSelectors::default(),
        }
    }
}

/// Selectors driving the simulated-UI publish flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSelectors {
    /// Share control on the source post
    #[serde(default = "defaults::share_selector")]
    pub share_button: String,

    /// Repost option in the share menu
    #[serde(default = "defaults::repost_selector")]
    pub repost_button: String,

    /// Comment entry box
    #[serde(default = "defaults::comment_box_selector")]
    pub comment_box: String,

    /// Final submit control
    #[serde(default = "defaults::submit_selector")]
    pub submit_button: String,

    /// Bounded wait for each element to appear, in seconds
    #[serde(default = "defaults::element_wait")]
    pub element_wait_secs: u64,
}

impl Default for UiSelectors {
    fn default() -> Self {
        Self {
            share_button: defaults::share_selector(),
            repost_button: defaults::repost_selector(),
            comment_box: defaults::comment_box_selector(),
            submit_button: defaults::submit_selector(),
            element_wait_secs: defaults::element_wait(),
        }
    }
}

/// Which comment generation policy to use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommentPolicyKind {
    /// Uniformly random template with topic substitution
    #[default]
    Template,
    /// Sentiment-bucketed templates with topic substitution
    Sentiment,
}

/// Comment generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentsConfig {
    /// Generation policy
    #[serde(default)]
    pub policy: CommentPolicyKind,

    /// Templates for the template policy; `{topic}` is substituted
    #[serde(default = "defaults::templates")]
    pub templates: Vec<String>,

    /// Templates for positively-scored bodies
    #[serde(default = "defaults::positive_templates")]
    pub positive_templates: Vec<String>,

    /// Templates for neutral bodies
    #[serde(default = "defaults::neutral_templates")]
    pub neutral_templates: Vec<String>,

    /// Templates for negatively-scored bodies
    #[serde(default = "defaults::negative_templates")]
    pub negative_templates: Vec<String>,

    /// Words that raise the sentiment score
    #[serde(default = "defaults::positive_words")]
    pub positive_words: Vec<String>,

    /// Words that lower the sentiment score
    #[serde(default = "defaults::negative_words")]
    pub negative_words: Vec<String>,

    /// Maximum comment length in characters, post-sanitization
    #[serde(default = "defaults::comment_max_length")]
    pub max_length: usize,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            policy: CommentPolicyKind::default(),
            templates: defaults::templates(),
            positive_templates: defaults::positive_templates(),
            neutral_templates: defaults::neutral_templates(),
            negative_templates: defaults::negative_templates(),
            positive_words: defaults::positive_words(),
            negative_words: defaults::negative_words(),
            max_length: defaults::comment_max_length(),
        }
    }
}

/// Which publish strategy to use. The two strategies are mutually
/// exclusive per run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PublishStrategy {
    /// Structured post via the platform REST API
    #[default]
    Api,
    /// Simulated UI interaction through a remote browser session
    Ui,
}

/// Publish strategy settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Strategy selection
    #[serde(default)]
    pub strategy: PublishStrategy,

    /// Base URL of the platform REST API
    #[serde(default = "defaults::api_base")]
    pub api_base: String,

    /// WebDriver endpoint for the UI strategy
    #[serde(default = "defaults::webdriver_url")]
    pub webdriver_url: String,

    /// Post visibility for API publishes
    #[serde(default = "defaults::visibility")]
    pub visibility: String,

    /// Whether to republish image assets found on the source post
    #[serde(default = "defaults::upload_images")]
    pub upload_images: bool,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            strategy: PublishStrategy::default(),
            api_base: defaults::api_base(),
            webdriver_url: defaults::webdriver_url(),
            visibility: defaults::visibility(),
            upload_images: defaults::upload_images(),
        }
    }
}

/// How slots are spaced across the daily window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SlotSpacing {
    /// Equal gaps across the remaining window, with bounded jitter
    #[default]
    Even,
    /// Constant interval from the start of the remaining window
    Fixed,
}

/// Daily scheduling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Hard cap on actions per calendar day
    #[serde(default = "defaults::max_posts_per_day")]
    pub max_posts_per_day: u32,

    /// Window start hour, local time (inclusive)
    #[serde(default = "defaults::window_start_hour")]
    pub window_start_hour: u32,

    /// Window end hour, local time (exclusive)
    #[serde(default = "defaults::window_end_hour")]
    pub window_end_hour: u32,

    /// Slot spacing policy
    #[serde(default)]
    pub spacing: SlotSpacing,

    /// Interval between slots for fixed spacing, in minutes
    #[serde(default = "defaults::interval_minutes")]
    pub interval_minutes: u32,

    /// Maximum jitter applied to even slots, in minutes
    #[serde(default = "defaults::jitter_minutes")]
    pub jitter_minutes: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            max_posts_per_day: defaults::max_posts_per_day(),
            window_start_hour: defaults::window_start_hour(),
            window_end_hour: defaults::window_end_hour(),
            spacing: SlotSpacing::default(),
            interval_minutes: defaults::interval_minutes(),
            jitter_minutes: defaults::jitter_minutes(),
        }
    }
}

/// File names inside the storage directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Engagement history file
    #[serde(default = "defaults::history_file")]
    pub history_file: String,

    /// Stored access token file
    #[serde(default = "defaults::token_file")]
    pub token_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            history_file: defaults::history_file(),
            token_file: defaults::token_file(),
        }
    }
}

mod defaults {
    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; reshare/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Discovery defaults
    pub fn search_url() -> String {
        "https://www.linkedin.com/search/results/content/?keywords={query}".into()
    }
    pub fn topics() -> Vec<String> {
        vec![
            "agricultural technology".into(),
            "precision farming".into(),
            "sustainable agriculture".into(),
        ]
    }

    // Selector defaults
    pub fn post_selector() -> String {
        "div.feed-shared-update-v2".into()
    }
    pub fn id_attr() -> String {
        "data-urn".into()
    }
    pub fn author_selector() -> String {
        "div.update-components-actor__meta span.update-components-actor__title span".into()
    }
    pub fn body_selector() -> String {
        "div.feed-shared-update-v2__description span.break-words".into()
    }
    pub fn reactions_selector() -> String {
        "button.social-details-social-counts__reactions-count span".into()
    }
    pub fn comments_selector() -> String {
        "button.social-details-social-counts__comments span".into()
    }
    pub fn image_selector() -> String {
        "div.feed-shared-image__container img".into()
    }
    pub fn image_attr() -> String {
        "src".into()
    }
    pub fn link_selector() -> String {
        "a.app-aware-link".into()
    }
    pub fn link_attr() -> String {
        "href".into()
    }

    // UI publish flow defaults
    pub fn share_selector() -> String {
        "button.social-reshare-button".into()
    }
    pub fn repost_selector() -> String {
        "div.artdeco-dropdown__item--is-dropdown".into()
    }
    pub fn comment_box_selector() -> String {
        "div.share-creation-state__text-editor div[contenteditable]".into()
    }
    pub fn submit_selector() -> String {
        "button.share-actions__primary-action".into()
    }
    pub fn element_wait() -> u64 {
        15
    }

    // Comment defaults
    pub fn templates() -> Vec<String> {
        vec![
            "Great insights on {topic}! Sharing with my network.".into(),
            "Worth a read for anyone following {topic}.".into(),
            "Interesting perspective on {topic}.".into(),
            "This is where {topic} is heading. Reposting.".into(),
        ]
    }
    pub fn positive_templates() -> Vec<String> {
        vec![
            "Exciting progress in {topic} - well worth sharing.".into(),
            "Encouraging news for everyone working on {topic}!".into(),
        ]
    }
    pub fn neutral_templates() -> Vec<String> {
        vec![
            "A balanced look at {topic}.".into(),
            "Useful context on {topic} here.".into(),
        ]
    }
    pub fn negative_templates() -> Vec<String> {
        vec![
            "An important challenge facing {topic}.".into(),
            "A sobering read on the state of {topic}.".into(),
        ]
    }
    pub fn positive_words() -> Vec<String> {
        vec![
            "growth".into(),
            "success".into(),
            "innovative".into(),
            "breakthrough".into(),
            "opportunity".into(),
            "improved".into(),
        ]
    }
    pub fn negative_words() -> Vec<String> {
        vec![
            "crisis".into(),
            "decline".into(),
            "shortage".into(),
            "failure".into(),
            "loss".into(),
            "threat".into(),
        ]
    }
    pub fn comment_max_length() -> usize {
        280
    }

    // Publish defaults
    pub fn api_base() -> String {
        "https://api.linkedin.com".into()
    }
    pub fn webdriver_url() -> String {
        "http://127.0.0.1:4444".into()
    }
    pub fn visibility() -> String {
        "PUBLIC".into()
    }
    pub fn upload_images() -> bool {
        true
    }

    // Schedule defaults
    pub fn max_posts_per_day() -> u32 {
        5
    }
    pub fn window_start_hour() -> u32 {
        9
    }
    pub fn window_end_hour() -> u32 {
        17
    }
    pub fn interval_minutes() -> u32 {
        90
    }
    pub fn jitter_minutes() -> u32 {
        10
    }

    // Path defaults
    pub fn history_file() -> String {
        "history.json".into()
    }
    pub fn token_file() -> String {
        "token.json".into()
    }
}
