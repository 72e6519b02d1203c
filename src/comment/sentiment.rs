// src/comment/sentiment.rs

//! Sentiment-keyed comment policy.
//!
//! A small lexicon scores the body text; the sign of the score picks
//! the positive, neutral or negative template bucket.

use regex::Regex;

use crate::models::CommentsConfig;

use super::{CommentPolicy, pick, render, resolve_topic};

/// Sentiment bucket derived from the lexicon score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// Scores the body against positive/negative word lists and picks a
/// template from the matching bucket.
pub struct SentimentCommenter {
    positive: Vec<Regex>,
    negative: Vec<Regex>,
    positive_templates: Vec<String>,
    neutral_templates: Vec<String>,
    negative_templates: Vec<String>,
    topics: Vec<String>,
    max_length: usize,
}

impl SentimentCommenter {
    pub fn new(config: &CommentsConfig, topics: &[String]) -> Self {
        Self {
            positive: compile_lexicon(&config.positive_words),
            negative: compile_lexicon(&config.negative_words),
            positive_templates: config.positive_templates.clone(),
            neutral_templates: config.neutral_templates.clone(),
            negative_templates: config.negative_templates.clone(),
            topics: topics.to_vec(),
            max_length: config.max_length,
        }
    }

    /// Classify the body: occurrences of positive words minus
    /// occurrences of negative words, bucketed by sign.
    pub fn classify(&self, body: &str) -> Sentiment {
        let positive_hits: usize = self.positive.iter().map(|re| re.find_iter(body).count()).sum();
        let negative_hits: usize = self.negative.iter().map(|re| re.find_iter(body).count()).sum();

        match positive_hits.cmp(&negative_hits) {
            std::cmp::Ordering::Greater => Sentiment::Positive,
            std::cmp::Ordering::Less => Sentiment::Negative,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        }
    }

    fn bucket(&self, sentiment: Sentiment) -> &[String] {
        match sentiment {
            Sentiment::Positive => &self.positive_templates,
            Sentiment::Neutral => &self.neutral_templates,
            Sentiment::Negative => &self.negative_templates,
        }
    }
}

impl CommentPolicy for SentimentCommenter {
    fn compose(&self, body: &str) -> String {
        let topic = resolve_topic(body, &self.topics);
        let bucket = self.bucket(self.classify(body));
        let template = pick(bucket).cloned().unwrap_or_default();
        render(&template, &topic, self.max_length)
    }
}

/// Compile case-insensitive whole-word matchers for a word list.
/// Words that fail to compile (pathological config) are skipped.
fn compile_lexicon(words: &[String]) -> Vec<Regex> {
    words
        .iter()
        .filter_map(|word| {
            Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word)))
                .map_err(|e| log::warn!("Skipping lexicon word '{}': {}", word, e))
                .ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commenter() -> SentimentCommenter {
        let config = CommentsConfig {
            positive_words: vec!["growth".into(), "success".into()],
            negative_words: vec!["crisis".into(), "shortage".into()],
            positive_templates: vec!["Upbeat take on {topic}.".into()],
            neutral_templates: vec!["A look at {topic}.".into()],
            negative_templates: vec!["Hard times for {topic}.".into()],
            ..CommentsConfig::default()
        };
        SentimentCommenter::new(&config, &["farming".to_string()])
    }

    #[test]
    fn test_classify_positive() {
        let c = commenter();
        assert_eq!(
            c.classify("Record growth and more growth despite one crisis"),
            Sentiment::Positive
        );
    }

    #[test]
    fn test_classify_negative() {
        let c = commenter();
        assert_eq!(
            c.classify("Water shortage deepens the crisis"),
            Sentiment::Negative
        );
    }

    #[test]
    fn test_classify_neutral_on_balance_or_silence() {
        let c = commenter();
        assert_eq!(c.classify("Nothing loaded here"), Sentiment::Neutral);
        assert_eq!(c.classify("growth meets crisis"), Sentiment::Neutral);
    }

    #[test]
    fn test_whole_word_matching_only() {
        let c = commenter();
        // "regrowth" must not count as "growth"
        assert_eq!(c.classify("regrowth of hedgerows"), Sentiment::Neutral);
    }

    #[test]
    fn test_compose_uses_bucket_template() {
        let c = commenter();
        let comment = c.compose("Strong growth in farming exports");
        assert_eq!(comment, "Upbeat take on farming.");
    }
}
