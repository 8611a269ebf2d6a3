//! Listing (item) domain rules: field limits, tag derivation, and
//! availability-window validation.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::types::Timestamp;

/// Maximum item title length in characters.
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum item description length in characters.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Maximum number of auto-derived tags per item.
pub const MAX_TAGS: usize = 10;

fn tag_word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\w{3,}\b").expect("tag regex is valid"))
}

fn image_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^https?://.+\.(jpg|jpeg|png|gif|webp)$").expect("image url regex is valid")
    })
}

/// An acceptable image URL: http(s) and a supported image extension.
pub fn is_valid_image_url(url: &str) -> bool {
    image_url_regex().is_match(url)
}

/// Derive search tags from an item's title and description.
///
/// Lowercases the combined text, extracts words of at least three
/// characters, deduplicates, and keeps at most [`MAX_TAGS`] tags in first-seen
/// order. Tags feed the `C`-weighted portion of the search vector.
pub fn derive_tags(title: &str, description: &str) -> Vec<String> {
    let text = format!("{title} {description}").to_lowercase();

    let mut seen = BTreeSet::new();
    let mut tags = Vec::new();
    for word in tag_word_regex().find_iter(&text) {
        let word = word.as_str();
        if seen.insert(word.to_string()) {
            tags.push(word.to_string());
            if tags.len() == MAX_TAGS {
                break;
            }
        }
    }
    tags
}

/// Validate an item's availability window.
///
/// - `start` must not be in the past relative to `now` (new listings only;
///   pass the stored start when editing other fields).
/// - `end`, when present, must be strictly after `start`.
pub fn validate_availability(
    start: Timestamp,
    end: Option<Timestamp>,
    now: Timestamp,
) -> Result<(), String> {
    if start < now {
        return Err("Start date must not be in the past".to_string());
    }
    if let Some(end) = end {
        if end <= start {
            return Err("End date must be after start date".to_string());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    // -- derive_tags ---------------------------------------------------------

    #[test]
    fn tags_come_from_title_and_description() {
        let tags = derive_tags("Cordless Drill", "Barely used power tool");
        assert_eq!(
            tags,
            vec!["cordless", "drill", "barely", "used", "power", "tool"]
        );
    }

    #[test]
    fn tags_drop_short_words() {
        let tags = derive_tags("A TV on an old cart", "");
        assert_eq!(tags, vec!["old", "cart"]);
    }

    #[test]
    fn tags_are_deduplicated() {
        let tags = derive_tags("ladder ladder", "tall ladder");
        assert_eq!(tags, vec!["ladder", "tall"]);
    }

    #[test]
    fn tags_capped_at_max() {
        let description = "alpha bravo charlie delta echo foxtrot golf hotel india juliett kilo";
        let tags = derive_tags("", description);
        assert_eq!(tags.len(), MAX_TAGS);
        assert_eq!(tags[0], "alpha");
        assert!(!tags.contains(&"kilo".to_string()));
    }

    #[test]
    fn tags_empty_input_yields_no_tags() {
        assert!(derive_tags("", "").is_empty());
    }

    // -- is_valid_image_url --------------------------------------------------

    #[test]
    fn image_urls_with_supported_extensions_pass() {
        assert!(is_valid_image_url("https://example.com/drill.jpg"));
        assert!(is_valid_image_url("http://example.com/photos/ladder.webp"));
        assert!(is_valid_image_url("https://cdn.example.com/a/b/C.PNG"));
    }

    #[test]
    fn non_http_schemes_are_rejected() {
        assert!(!is_valid_image_url("ftp://example.com/drill.jpg"));
        assert!(!is_valid_image_url("javascript:alert(1)"));
        assert!(!is_valid_image_url("file:///tmp/drill.png"));
    }

    #[test]
    fn unsupported_extensions_are_rejected() {
        assert!(!is_valid_image_url("https://example.com/drill.exe"));
        assert!(!is_valid_image_url("https://example.com/drill"));
        assert!(!is_valid_image_url("https://example.com/drill.svg"));
    }

    // -- validate_availability -----------------------------------------------

    #[test]
    fn future_window_is_valid() {
        let now = Utc::now();
        let start = now + Duration::days(1);
        let end = now + Duration::days(7);
        assert!(validate_availability(start, Some(end), now).is_ok());
    }

    #[test]
    fn open_ended_window_is_valid() {
        let now = Utc::now();
        assert!(validate_availability(now + Duration::hours(1), None, now).is_ok());
    }

    #[test]
    fn past_start_is_rejected() {
        let now = Utc::now();
        let err = validate_availability(now - Duration::hours(1), None, now).unwrap_err();
        assert!(err.contains("Start date"));
    }

    #[test]
    fn end_before_start_is_rejected() {
        let now = Utc::now();
        let start = now + Duration::days(5);
        let end = now + Duration::days(2);
        let err = validate_availability(start, Some(end), now).unwrap_err();
        assert!(err.contains("End date"));
    }

    #[test]
    fn end_equal_to_start_is_rejected() {
        let now = Utc::now();
        let start = now + Duration::days(1);
        assert!(validate_availability(start, Some(start), now).is_err());
    }
}
