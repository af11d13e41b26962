//! UniFFI bindings for markup-text
//!
//! Exposes the engine operations to Kotlin and Swift UI shells. Strings
//! cross the boundary by value; results come back as plain records so the
//! host language never sees engine types.

use markup_text_engine::{
    ParagraphContents, SafeHtml, SanitizerConfig, is_json_string as engine_is_json_string,
    is_probably_html as engine_is_probably_html, paragraph_contents as engine_paragraph_contents,
    remove_html_tags as engine_remove_html_tags, safe_html_span_with, sanitize_html_if_needed_with,
    sanitize_html_with,
};

uniffi::setup_scaffolding!();

// ============ Errors ============

/// Errors that can cross the FFI boundary
/// Note: Field is named `reason` not `message` to avoid conflict with Throwable.message in Kotlin
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("Invalid sanitizer settings: {reason}")]
    InvalidConfig { reason: String },
}

// ============ Sanitizer Handle ============

/// A sanitizer with caller-chosen allow-lists.
///
/// The settings are fixed at construction, so one handle can be shared
/// between threads.
#[derive(uniffi::Object)]
pub struct SanitizerHandle {
    config: SanitizerConfig,
}

#[uniffi::export]
impl SanitizerHandle {
    /// A sanitizer using the built-in allow-lists.
    #[uniffi::constructor]
    pub fn new() -> Self {
        Self {
            config: SanitizerConfig::default(),
        }
    }

    /// A sanitizer allowing exactly the given elements, global attributes
    /// and URL schemes. Per-element attributes keep their defaults.
    #[uniffi::constructor]
    pub fn with_allow_lists(
        allowed_tags: Vec<String>,
        global_attributes: Vec<String>,
        url_schemes: Vec<String>,
    ) -> Result<Self, FfiError> {
        let config = SanitizerConfig::default()
            .with_allowed_tags(allowed_tags)
            .with_global_attributes(global_attributes)
            .with_url_schemes(url_schemes);
        config.validate().map_err(|e| FfiError::InvalidConfig {
            reason: e.to_string(),
        })?;

        Ok(Self { config })
    }

    pub fn sanitize_html(&self, html: String) -> String {
        sanitize_html_with(&html, &self.config)
    }

    pub fn sanitize_html_if_needed(&self, text: String) -> String {
        sanitize_html_if_needed_with(&text, &self.config).into_owned()
    }

    pub fn safe_html_span(&self, text: String) -> SafeHtmlDto {
        SafeHtmlDto::from_engine(safe_html_span_with(&text, &self.config))
    }
}

impl Default for SanitizerHandle {
    fn default() -> Self {
        Self::new()
    }
}

// ============ DTOs ============

/// Display-ready text and how to insert it.
#[derive(Debug, PartialEq, uniffi::Record)]
pub struct SafeHtmlDto {
    /// "plain" (insert as text) or "sanitized_markup" (insert as HTML)
    pub kind: String,
    pub content: String,
}

impl SafeHtmlDto {
    fn from_engine(span: SafeHtml) -> Self {
        let kind = if span.is_markup() {
            "sanitized_markup"
        } else {
            "plain"
        };
        Self {
            kind: kind.to_string(),
            content: span.into_inner(),
        }
    }
}

/// One paragraph's text with its `p<N>` key.
#[derive(Debug, PartialEq, uniffi::Record)]
pub struct ParagraphDto {
    pub key: String,
    pub text: String,
}

impl ParagraphDto {
    fn from_engine(paragraphs: &ParagraphContents) -> Vec<Self> {
        paragraphs
            .iter()
            .map(|(key, text)| Self {
                key,
                text: text.to_string(),
            })
            .collect()
    }
}

// ============ Standalone Functions ============

#[uniffi::export]
pub fn is_probably_html(text: String) -> bool {
    engine_is_probably_html(&text)
}

/// Sanitize with the built-in allow-lists.
#[uniffi::export]
pub fn sanitize_html(html: String) -> String {
    markup_text_engine::sanitize_html(&html)
}

#[uniffi::export]
pub fn sanitize_html_if_needed(text: String) -> String {
    markup_text_engine::sanitize_html_if_needed(&text).into_owned()
}

#[uniffi::export]
pub fn safe_html_span(text: String) -> SafeHtmlDto {
    SafeHtmlDto::from_engine(markup_text_engine::safe_html_span(&text))
}

#[uniffi::export]
pub fn remove_html_tags(html: String) -> String {
    engine_remove_html_tags(&html)
}

#[uniffi::export]
pub fn is_json_string(text: String) -> bool {
    engine_is_json_string(&text)
}

/// Paragraph texts in document order, or None when the input is not HTML
/// or has no paragraphs.
#[uniffi::export]
pub fn paragraph_contents(html: String) -> Option<Vec<ParagraphDto>> {
    engine_paragraph_contents(&html).map(|paragraphs| ParagraphDto::from_engine(&paragraphs))
}
