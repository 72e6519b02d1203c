//! Utility functions and helpers.

pub mod http;
pub mod text;

use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Build a search URL by substituting the encoded query into the
/// configured `{query}` placeholder.
pub fn build_search_url(template: &str, query: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
    template.replace("{query}", &encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://example.com/feed/").unwrap();
        assert_eq!(
            resolve_url(&base, "post.html"),
            "https://example.com/feed/post.html"
        );
        assert_eq!(
            resolve_url(&base, "/root.html"),
            "https://example.com/root.html"
        );
        assert_eq!(
            resolve_url(&base, "https://other.com/x"),
            "https://other.com/x"
        );
    }

    #[test]
    fn test_build_search_url_encodes_query() {
        let url = build_search_url(
            "https://example.com/search?keywords={query}",
            "precision farming",
        );
        assert_eq!(url, "https://example.com/search?keywords=precision+farming");
    }
}
