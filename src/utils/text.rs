// src/utils/text.rs

//! Text helpers: counter parsing, topic matching, channel sanitization.

use unicode_segmentation::UnicodeSegmentation;

/// Parse an engagement counter from element text.
///
/// Counter text comes in shapes like "1,234", "87 comments" or
/// "12 reactions"; every non-digit is ignored. Empty or digit-free
/// text yields 0 rather than an error, so partial data never aborts
/// a discovery pass.
pub fn parse_count(text: &str) -> u32 {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Find the first configured topic that appears in the body,
/// case-insensitively. Topics are checked in configured order.
pub fn find_topic<'a>(body: &str, topics: &'a [String]) -> Option<&'a str> {
    let lower = body.to_lowercase();
    topics
        .iter()
        .find(|topic| lower.contains(&topic.to_lowercase()))
        .map(|topic| topic.as_str())
}

/// Sanitize text for the publish channel: drop characters outside the
/// Basic Multilingual Plane, then truncate to `max_len` characters on a
/// grapheme boundary.
pub fn sanitize_for_channel(text: &str, max_len: usize) -> String {
    let bmp_only: String = text.chars().filter(|c| (*c as u32) <= 0xFFFF).collect();

    let mut out = String::new();
    let mut chars = 0usize;
    for grapheme in bmp_only.graphemes(true) {
        let grapheme_chars = grapheme.chars().count();
        if chars + grapheme_chars > max_len {
            break;
        }
        out.push_str(grapheme);
        chars += grapheme_chars;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_plain() {
        assert_eq!(parse_count("42"), 42);
    }

    #[test]
    fn test_parse_count_grouped() {
        assert_eq!(parse_count("1,234"), 1234);
    }

    #[test]
    fn test_parse_count_with_label() {
        assert_eq!(parse_count("87 comments"), 87);
    }

    #[test]
    fn test_parse_count_missing_defaults_to_zero() {
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("no reactions yet"), 0);
    }

    #[test]
    fn test_find_topic_case_insensitive() {
        let topics = vec!["Precision Farming".to_string(), "drones".to_string()];
        let body = "New advances in PRECISION farming this year";
        assert_eq!(find_topic(body, &topics), Some("Precision Farming"));
    }

    #[test]
    fn test_find_topic_configured_order_wins() {
        let topics = vec!["farming".to_string(), "drones".to_string()];
        let body = "drones for farming";
        assert_eq!(find_topic(body, &topics), Some("farming"));
    }

    #[test]
    fn test_find_topic_no_match() {
        let topics = vec!["hydroponics".to_string()];
        assert_eq!(find_topic("unrelated text", &topics), None);
    }

    #[test]
    fn test_sanitize_strips_non_bmp() {
        // U+1F600 (emoji) is outside the BMP and must be dropped
        let text = "Great\u{1F600} news";
        assert_eq!(sanitize_for_channel(text, 100), "Great news");
    }

    #[test]
    fn test_sanitize_truncates() {
        assert_eq!(sanitize_for_channel("abcdef", 4), "abcd");
    }

    #[test]
    fn test_sanitize_keeps_bmp_text() {
        let text = "스마트 농업 소식";
        assert_eq!(sanitize_for_channel(text, 100), text);
    }
}
