// src/pipeline/select.rs

//! Candidate selection.

use crate::models::{Candidate, History};

/// Pick the best unseen candidate: highest engagement score, with the
/// first-discovered candidate winning ties. Already-engaged posts are
/// excluded before scoring.
pub fn select_best<'a>(candidates: &'a [Candidate], history: &History) -> Option<&'a Candidate> {
    let seen = history.seen_ids();

    let mut best: Option<&Candidate> = None;
    for candidate in candidates {
        if seen.contains(candidate.id.as_str()) {
            continue;
        }
        match best {
            Some(current) if candidate.score() <= current.score() => {}
            _ => best = Some(candidate),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EngagementRecord;
    use chrono::Local;

    fn candidate(id: &str, reactions: u32, comments: u32) -> Candidate {
        Candidate {
            id: id.to_string(),
            author: "Author".to_string(),
            body: "Body".to_string(),
            reactions,
            comments,
            image_urls: vec![],
            link: None,
        }
    }

    fn history_with(ids: &[&str]) -> History {
        let mut history = History::default();
        for id in ids {
            history.append(EngagementRecord {
                post_id: id.to_string(),
                author: "Author".to_string(),
                timestamp: Local::now(),
                had_images: false,
                image_count: 0,
                comment: String::new(),
            });
        }
        history
    }

    #[test]
    fn test_picks_highest_score() {
        let candidates = vec![
            candidate("a", 5, 1),
            candidate("b", 10, 4),
            candidate("c", 2, 0),
        ];
        let best = select_best(&candidates, &History::default()).unwrap();
        assert_eq!(best.id, "b");
    }

    #[test]
    fn test_first_seen_wins_ties() {
        let candidates = vec![
            candidate("first", 3, 3),
            candidate("second", 4, 2),
            candidate("third", 6, 0),
        ];
        let best = select_best(&candidates, &History::default()).unwrap();
        assert_eq!(best.id, "first");
    }

    #[test]
    fn test_excludes_already_engaged() {
        let candidates = vec![candidate("a", 100, 0), candidate("b", 1, 0)];
        let history = history_with(&["a"]);
        let best = select_best(&candidates, &history).unwrap();
        assert_eq!(best.id, "b");
    }

    #[test]
    fn test_none_when_all_engaged() {
        let candidates = vec![candidate("a", 1, 0)];
        let history = history_with(&["a"]);
        assert!(select_best(&candidates, &history).is_none());
    }

    #[test]
    fn test_none_on_empty_input() {
        assert!(select_best(&[], &History::default()).is_none());
    }

    #[test]
    fn test_zero_score_candidate_still_selectable() {
        let candidates = vec![candidate("a", 0, 0)];
        let best = select_best(&candidates, &History::default()).unwrap();
        assert_eq!(best.id, "a");
    }
}
