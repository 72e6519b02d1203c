// src/comment/template.rs

//! Fixed-template comment policy.

use crate::models::CommentsConfig;

use super::{CommentPolicy, pick, render, resolve_topic};

/// Picks a uniformly random template and substitutes the topic.
pub struct TemplateCommenter {
    templates: Vec<String>,
    topics: Vec<String>,
    max_length: usize,
}

impl TemplateCommenter {
    pub fn new(config: &CommentsConfig, topics: &[String]) -> Self {
        Self {
            templates: config.templates.clone(),
            topics: topics.to_vec(),
            max_length: config.max_length,
        }
    }
}

impl CommentPolicy for TemplateCommenter {
    fn compose(&self, body: &str) -> String {
        let topic = resolve_topic(body, &self.topics);
        let template = pick(&self.templates).cloned().unwrap_or_default();
        render(&template, &topic, self.max_length)
    }
}
