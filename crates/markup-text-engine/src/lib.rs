//! # markup-text-engine
//!
//! Classification, sanitization and plain-text extraction for strings that
//! may or may not contain HTML.
//!
//! Every operation is a pure function over `&str`. None of them fail or
//! panic on malformed input; each degrades to a documented fallback.
//!
//! | Operation | Result |
//! |-----------|--------|
//! | [`is_probably_html`] | cheap tag-pattern check |
//! | [`sanitize_html`] / [`sanitize_html_with`] | markup safe to inject |
//! | [`sanitize_html_if_needed`] | sanitized markup, or the text untouched |
//! | [`safe_html_span`] | [`SafeHtml`] tagged for the rendering surface |
//! | [`remove_html_tags`] | text content with every tag removed |
//! | [`is_json_string`] | whether the text is one JSON value |
//! | [`paragraph_contents`] | `p1`, `p2`, ... paragraph texts |
//!
//! Markup is parsed with the lossless syntax tree from `markup-text-syntax`;
//! only [`is_probably_html`] uses a regular expression.

pub mod classify;
pub mod config;
pub mod sanitize;
pub mod text;

// Re-export key types for easier usage
pub use classify::{is_json_string, is_probably_html};
pub use config::{SanitizerConfig, SanitizerConfigError};
pub use sanitize::{
    SafeHtml, SanitizedHtml, default_config, safe_html_span, safe_html_span_with, sanitize_html,
    sanitize_html_if_needed, sanitize_html_if_needed_with, sanitize_html_with,
};
pub use text::{ParagraphContents, paragraph_contents, remove_html_tags};
