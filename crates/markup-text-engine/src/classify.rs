//! Cheap classifiers that decide how a string should be treated before any
//! markup parsing happens.

use std::sync::OnceLock;

use regex::Regex;

/// Heuristic check for tag-like syntax: `<`, a letter, anything but `>`, `>`.
///
/// This is a pre-check, not a parser. It exists so plain text containing
/// comparison operators (`a <= 10 and b > 10`) is left alone. The `regex`
/// crate matches in linear time, so adversarial input cannot trigger
/// backtracking.
pub fn is_probably_html(text: &str) -> bool {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    let tag_regex =
        TAG_REGEX.get_or_init(|| Regex::new(r"(?i)<[a-z][^>]*>").expect("Invalid tag regex"));

    tag_regex.is_match(text)
}

/// True iff the trimmed text is exactly one JSON value.
///
/// Objects, arrays, strings, numbers, booleans and `null` all count.
/// Trailing characters (`12345abc`) and empty input do not.
pub fn is_json_string(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && serde_json::from_str::<serde::de::IgnoredAny>(trimmed).is_ok()
}
