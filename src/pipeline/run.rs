// src/pipeline/run.rs

//! One engagement cycle: discover, select, compose, publish, record.

use chrono::{DateTime, Local};

use crate::comment::CommentPolicy;
use crate::error::Result;
use crate::models::{Candidate, Config, EngagementRecord, PostDraft};
use crate::publish::Publisher;
use crate::services::ContentSource;
use crate::storage::HistoryStore;
use crate::utils::text::sanitize_for_channel;

use super::select_best;

/// Platform character limit for a post body.
const POST_MAX_CHARS: usize = 3000;

/// What one cycle did. Finding nothing to act on is a normal outcome,
/// not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// One post was republished and recorded.
    Published {
        post_id: String,
        created_id: Option<String>,
    },
    /// No unseen candidate was found across any topic.
    NoCandidate,
    /// The daily action cap was already reached.
    CapReached,
}

/// Run one cycle at the given instant. At most one publish action is
/// performed; the history record is appended only after the publish
/// succeeds.
pub async fn run_cycle(
    config: &Config,
    source: &dyn ContentSource,
    policy: &dyn CommentPolicy,
    publisher: &dyn Publisher,
    store: &dyn HistoryStore,
    now: DateTime<Local>,
) -> Result<CycleOutcome> {
    let history = store.load().await?;

    let posted_today = history.posted_on(now.date_naive());
    if posted_today >= config.schedule.max_posts_per_day {
        log::info!(
            "Daily cap reached ({}/{}); skipping cycle",
            posted_today,
            config.schedule.max_posts_per_day
        );
        return Ok(CycleOutcome::CapReached);
    }

    let Some(candidate) = discover(config, source, &history).await else {
        log::info!("No unseen candidate found in any topic");
        return Ok(CycleOutcome::NoCandidate);
    };

    let comment = policy.compose(&candidate.body);
    let draft = build_draft(&candidate, &comment);

    log::info!(
        "Publishing repost of {} by '{}' (score {})",
        candidate.id,
        candidate.author,
        candidate.score()
    );
    let receipt = publisher.publish(&draft).await?;

    store
        .append(EngagementRecord {
            post_id: candidate.id.clone(),
            author: candidate.author.clone(),
            timestamp: now,
            had_images: receipt.image_count > 0,
            image_count: receipt.image_count,
            comment,
        })
        .await?;

    Ok(CycleOutcome::Published {
        post_id: candidate.id,
        created_id: receipt.created_id,
    })
}

/// Walk the configured topics in order and return the first topic's
/// best unseen candidate. A failed topic search is logged and the next
/// topic is tried.
async fn discover(
    config: &Config,
    source: &dyn ContentSource,
    history: &crate::models::History,
) -> Option<Candidate> {
    for topic in &config.discovery.topics {
        match source.list_candidates(topic).await {
            Ok(candidates) => {
                if let Some(best) = select_best(&candidates, history) {
                    return Some(best.clone());
                }
            }
            Err(e) => log::warn!("Search for topic '{}' failed: {}", topic, e),
        }
    }
    None
}

/// Assemble the outgoing post text with source attribution.
fn build_draft(candidate: &Candidate, comment: &str) -> PostDraft {
    let attribution = if candidate.author.is_empty() {
        "Repost:".to_string()
    } else {
        format!("Repost from {}:", candidate.author)
    };
    let text = sanitize_for_channel(
        &format!("{}\n\n{}\n\n{}", attribution, candidate.body, comment),
        POST_MAX_CHARS,
    );

    PostDraft {
        source_id: candidate.id.clone(),
        source_author: candidate.author.clone(),
        source_link: candidate.link.clone(),
        text,
        image_urls: candidate.image_urls.clone(),
        comment: comment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{History, PublishReceipt};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::Mutex;

    struct FixedSource {
        candidates: Vec<Candidate>,
    }

    #[async_trait]
    impl ContentSource for FixedSource {
        async fn list_candidates(&self, _topic: &str) -> Result<Vec<Candidate>> {
            Ok(self.candidates.clone())
        }
    }

    struct FixedComment;

    impl CommentPolicy for FixedComment {
        fn compose(&self, _body: &str) -> String {
            "Great read.".to_string()
        }
    }

    struct RecordingPublisher {
        drafts: Mutex<Vec<PostDraft>>,
        fail: bool,
    }

    #[async_trait]
    impl Publisher for RecordingPublisher {
        async fn publish(&self, draft: &PostDraft) -> Result<PublishReceipt> {
            self.drafts.lock().unwrap().push(draft.clone());
            if self.fail {
                return Err(crate::error::AppError::publish("test", "forced failure"));
            }
            Ok(PublishReceipt {
                created_id: Some("urn:li:share:9".into()),
                image_count: 0,
            })
        }
    }

    struct MemoryStore {
        history: Mutex<History>,
    }

    #[async_trait]
    impl HistoryStore for MemoryStore {
        async fn load(&self) -> Result<History> {
            Ok(self.history.lock().unwrap().clone())
        }

        async fn append(&self, record: EngagementRecord) -> Result<History> {
            let mut history = self.history.lock().unwrap();
            history.append(record);
            Ok(history.clone())
        }
    }

    fn candidate(id: &str, reactions: u32) -> Candidate {
        Candidate {
            id: id.to_string(),
            author: "Ada".to_string(),
            body: "Precision farming scales up".to_string(),
            reactions,
            comments: 0,
            image_urls: vec![],
            link: Some("https://example.com/posts/1".into()),
        }
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 14, 10, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_cycle_publishes_best_and_records() {
        let config = Config::default();
        let source = FixedSource {
            candidates: vec![candidate("low", 1), candidate("high", 50)],
        };
        let publisher = RecordingPublisher {
            drafts: Mutex::new(vec![]),
            fail: false,
        };
        let store = MemoryStore {
            history: Mutex::new(History::default()),
        };

        let outcome = run_cycle(&config, &source, &FixedComment, &publisher, &store, now())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            CycleOutcome::Published {
                post_id: "high".into(),
                created_id: Some("urn:li:share:9".into()),
            }
        );

        let drafts = publisher.drafts.lock().unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(
            drafts[0].text,
            "Repost from Ada:\n\nPrecision farming scales up\n\nGreat read."
        );

        let history = store.load().await.unwrap();
        assert!(history.contains("high"));
        assert_eq!(history.posted_on(now().date_naive()), 1);
    }

    #[tokio::test]
    async fn test_cycle_respects_daily_cap() {
        let mut config = Config::default();
        config.schedule.max_posts_per_day = 1;

        let mut history = History::default();
        history.append(EngagementRecord {
            post_id: "earlier".into(),
            author: "Ada".into(),
            timestamp: now(),
            had_images: false,
            image_count: 0,
            comment: String::new(),
        });

        let source = FixedSource {
            candidates: vec![candidate("fresh", 10)],
        };
        let publisher = RecordingPublisher {
            drafts: Mutex::new(vec![]),
            fail: false,
        };
        let store = MemoryStore {
            history: Mutex::new(history),
        };

        let outcome = run_cycle(&config, &source, &FixedComment, &publisher, &store, now())
            .await
            .unwrap();

        assert_eq!(outcome, CycleOutcome::CapReached);
        assert!(publisher.drafts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_day_matches_cap_day() {
        // The appended record and the cap gate key on the same local
        // calendar day, even late in the evening.
        let mut config = Config::default();
        config.schedule.max_posts_per_day = 1;
        let late = Local.with_ymd_and_hms(2026, 3, 14, 23, 30, 0).unwrap();

        let source = FixedSource {
            candidates: vec![candidate("p1", 5), candidate("p2", 3)],
        };
        let publisher = RecordingPublisher {
            drafts: Mutex::new(vec![]),
            fail: false,
        };
        let store = MemoryStore {
            history: Mutex::new(History::default()),
        };

        let first = run_cycle(&config, &source, &FixedComment, &publisher, &store, late)
            .await
            .unwrap();
        assert!(matches!(first, CycleOutcome::Published { .. }));

        let history = store.load().await.unwrap();
        assert_eq!(history.posted_on(late.date_naive()), 1);

        let second = run_cycle(&config, &source, &FixedComment, &publisher, &store, late)
            .await
            .unwrap();
        assert_eq!(second, CycleOutcome::CapReached);
    }

    #[tokio::test]
    async fn test_cycle_without_candidates_is_normal() {
        let config = Config::default();
        let source = FixedSource { candidates: vec![] };
        let publisher = RecordingPublisher {
            drafts: Mutex::new(vec![]),
            fail: false,
        };
        let store = MemoryStore {
            history: Mutex::new(History::default()),
        };

        let outcome = run_cycle(&config, &source, &FixedComment, &publisher, &store, now())
            .await
            .unwrap();
        assert_eq!(outcome, CycleOutcome::NoCandidate);
    }

    #[tokio::test]
    async fn test_failed_publish_records_nothing() {
        let config = Config::default();
        let source = FixedSource {
            candidates: vec![candidate("p", 5)],
        };
        let publisher = RecordingPublisher {
            drafts: Mutex::new(vec![]),
            fail: true,
        };
        let store = MemoryStore {
            history: Mutex::new(History::default()),
        };

        let result = run_cycle(&config, &source, &FixedComment, &publisher, &store, now()).await;
        assert!(result.is_err());

        let history = store.load().await.unwrap();
        assert!(history.posts.is_empty());
    }

    #[test]
    fn test_draft_attribution_without_author() {
        let mut c = candidate("p", 1);
        c.author = String::new();
        let draft = build_draft(&c, "Nice.");
        assert!(draft.text.starts_with("Repost:\n\n"));
    }
}
