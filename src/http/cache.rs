//! HTTP cache control module
//!
//! `ETag` generation and `If-None-Match` handling for conditional
//! requests.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a quoted `ETag` from content using fast hashing.
#[must_use]
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// Whether the client's `If-None-Match` header matches `etag`.
///
/// Handles a single `ETag`, a comma-separated list, and the `*`
/// wildcard. A match means the response should be 304.
#[must_use]
pub fn if_none_match(header: Option<&str>, etag: &str) -> bool {
    header.is_some_and(|candidates| {
        candidates.split(',').any(|candidate| {
            let candidate = candidate.trim();
            candidate == etag || candidate == "*"
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn etag_is_quoted() {
        let etag = generate_etag(b"hello world");
        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        assert!(etag.len() > 2);
    }

    #[test]
    fn etag_is_stable_for_equal_content() {
        assert_eq!(generate_etag(b"same content"), generate_etag(b"same content"));
    }

    #[test]
    fn etag_differs_for_different_content() {
        assert_ne!(generate_etag(b"content a"), generate_etag(b"content b"));
    }

    #[test]
    fn if_none_match_variants() {
        let etag = "\"abc123\"";
        assert!(if_none_match(Some("\"abc123\""), etag));
        assert!(if_none_match(Some("\"xyz\", \"abc123\""), etag));
        assert!(if_none_match(Some("*"), etag));
        assert!(!if_none_match(Some("\"different\""), etag));
        assert!(!if_none_match(None, etag));
    }
}
