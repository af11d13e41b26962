//! # HTML Sanitization
//!
//! Turns untrusted markup into markup that is safe to inject into a page.
//!
//! ## How it works
//!
//! The input is parsed into the lossless syntax tree and written back out
//! by [`cleaner`], keeping only what the [`SanitizerConfig`] allows:
//!
//! - elements on the drop list (always including `<script>`) vanish with
//!   their content
//! - elements not on the allow list are unwrapped: their content stays
//! - attributes not on the allow list, all `on*` handlers and URLs with a
//!   scheme outside the allow list are removed
//! - comments, doctypes and broken tags are removed
//!
//! Output is canonical (lowercase names, double-quoted values, explicit end
//! tags), so feeding it back in reproduces it. The pass is repeated until
//! that holds, which makes [`sanitize_html`] idempotent even for inputs
//! whose repaired structure only settles after a second parse. If it does
//! not settle within [`MAX_PASSES`], the escaped text outside dropped
//! elements is returned.

mod cleaner;
mod url;

use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

use log::debug;
use serde::Serialize;

use crate::classify::is_probably_html;
use crate::config::SanitizerConfig;

/// Upper bound on sanitizing passes before falling back to plain text.
pub const MAX_PASSES: usize = 4;

/// The built-in allow-list, built once.
pub fn default_config() -> &'static SanitizerConfig {
    static DEFAULT: OnceLock<SanitizerConfig> = OnceLock::new();
    DEFAULT.get_or_init(SanitizerConfig::default)
}

/// Sanitize with the default allow-list.
///
/// ```
/// use markup_text_engine::sanitize_html;
///
/// let clean = sanitize_html(r#"<div onclick="steal()"><b>Hi</b><script>alert(1)</script></div>"#);
/// assert_eq!(clean, "<div><b>Hi</b></div>");
/// ```
pub fn sanitize_html(html: &str) -> String {
    sanitize_html_with(html, default_config())
}

/// Sanitize with a caller-supplied allow-list.
pub fn sanitize_html_with(html: &str, config: &SanitizerConfig) -> String {
    let mut current = cleaner::clean(html, config);
    for _ in 1..MAX_PASSES {
        let next = cleaner::clean(&current, config);
        if next == current {
            return current;
        }
        current = next;
    }

    debug!("markup did not settle after {MAX_PASSES} passes, returning plain text");
    cleaner::escaped_text(html, config)
}

/// Sanitize only text that looks like markup; anything else is returned
/// untouched.
pub fn sanitize_html_if_needed(text: &str) -> Cow<'_, str> {
    sanitize_html_if_needed_with(text, default_config())
}

/// [`sanitize_html_if_needed`] with `config` as the allow-list.
///
/// ```
/// use markup_text_engine::{SanitizerConfig, sanitize_html_if_needed_with};
///
/// let config = SanitizerConfig::default().with_allowed_tags(["p"]);
/// assert_eq!(sanitize_html_if_needed_with("<p><b>hi</b></p>", &config), "<p>hi</p>");
/// assert_eq!(sanitize_html_if_needed_with("a <= b", &config), "a <= b");
/// ```
pub fn sanitize_html_if_needed_with<'a>(text: &'a str, config: &SanitizerConfig) -> Cow<'a, str> {
    if is_probably_html(text) {
        Cow::Owned(sanitize_html_with(text, config))
    } else {
        Cow::Borrowed(text)
    }
}

/// Wrap text for a rendering surface: markup is sanitized and tagged as
/// such, plain text is passed through for the caller to escape.
pub fn safe_html_span(text: &str) -> SafeHtml {
    safe_html_span_with(text, default_config())
}

/// [`safe_html_span`] with `config` as the allow-list for markup.
pub fn safe_html_span_with(text: &str, config: &SanitizerConfig) -> SafeHtml {
    if is_probably_html(text) {
        SafeHtml::SanitizedMarkup(SanitizedHtml(sanitize_html_with(text, config)))
    } else {
        SafeHtml::Plain(text.to_string())
    }
}

/// Markup produced by the sanitizer.
///
/// There is no public constructor, so holding one proves the sanitizer ran.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SanitizedHtml(String);

impl SanitizedHtml {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for SanitizedHtml {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SanitizedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Text ready for display, tagged with how it must be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum SafeHtml {
    /// Not markup; insert as text.
    Plain(String),
    /// Sanitized markup; safe to insert as HTML.
    SanitizedMarkup(SanitizedHtml),
}

impl SafeHtml {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::SanitizedMarkup(html) => html.as_str(),
        }
    }

    pub fn is_markup(&self) -> bool {
        matches!(self, Self::SanitizedMarkup(_))
    }

    pub fn into_inner(self) -> String {
        match self {
            Self::Plain(text) => text,
            Self::SanitizedMarkup(html) => html.into_string(),
        }
    }
}

impl fmt::Display for SafeHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
