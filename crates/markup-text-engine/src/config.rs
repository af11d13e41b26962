//! Sanitizer allow-lists.
//!
//! A [`SanitizerConfig`] is an immutable value passed to the sanitizer at
//! call time. The [`Default`] is deliberately small: formatting and
//! structural tags, a handful of descriptive attributes, and web/mail/phone
//! links. Two rules hold whatever a config says: `<script>` is always
//! removed with its content, and `on*` event-handler attributes are always
//! removed.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

const DEFAULT_ALLOWED_TAGS: &[&str] = &[
    "a", "abbr", "b", "blockquote", "br", "caption", "code", "col", "colgroup", "dd", "del", "div",
    "dl", "dt", "em", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "i", "img", "ins", "kbd", "li",
    "mark", "ol", "p", "pre", "q", "s", "small", "span", "strike", "strong", "sub", "sup", "table",
    "tbody", "td", "tfoot", "th", "thead", "tr", "u", "ul",
];

const DEFAULT_DROPPED_TAGS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "applet", "noscript", "template", "title",
    "textarea", "xmp", "noembed", "noframes", "frame", "frameset", "base", "link", "meta", "svg",
    "math", "select", "option", "button", "form", "input",
];

const DEFAULT_GLOBAL_ATTRIBUTES: &[&str] = &["class", "title", "lang", "dir"];

const DEFAULT_TAG_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("a", &["href", "name", "target", "rel"]),
    ("img", &["src", "alt", "width", "height"]),
    ("td", &["colspan", "rowspan", "align"]),
    ("th", &["colspan", "rowspan", "align"]),
    ("ol", &["start", "type"]),
    ("col", &["span"]),
    ("colgroup", &["span"]),
    ("blockquote", &["cite"]),
    ("q", &["cite"]),
    ("del", &["cite"]),
    ("ins", &["cite"]),
];

const DEFAULT_URL_ATTRIBUTES: &[&str] = &[
    "href",
    "src",
    "cite",
    "action",
    "formaction",
    "background",
    "poster",
];

const DEFAULT_URL_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Elements that are removed with their content whatever the config says.
pub const ALWAYS_DROPPED_TAGS: &[&str] = &["script"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SanitizerConfigError {
    #[error("the <{0}> element cannot be allowed")]
    ForbiddenTag(String),

    #[error("event handler attribute `{0}` cannot be allowed")]
    EventHandlerAttribute(String),
}

/// Which elements, attributes and URL schemes survive sanitization.
///
/// Names are stored lowercased. Builder methods consume and return the
/// value, so a config is never mutated once shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizerConfig {
    allowed_tags: BTreeSet<String>,
    dropped_tags: BTreeSet<String>,
    global_attributes: BTreeSet<String>,
    tag_attributes: BTreeMap<String, BTreeSet<String>>,
    url_attributes: BTreeSet<String>,
    url_schemes: BTreeSet<String>,
}

fn name_set<I, S>(names: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| name.as_ref().trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect()
}

pub(crate) fn is_event_handler(attribute: &str) -> bool {
    attribute.starts_with("on")
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            allowed_tags: name_set(DEFAULT_ALLOWED_TAGS),
            dropped_tags: name_set(DEFAULT_DROPPED_TAGS),
            global_attributes: name_set(DEFAULT_GLOBAL_ATTRIBUTES),
            tag_attributes: DEFAULT_TAG_ATTRIBUTES
                .iter()
                .map(|(tag, attributes)| (tag.to_string(), name_set(*attributes)))
                .collect(),
            url_attributes: name_set(DEFAULT_URL_ATTRIBUTES),
            url_schemes: name_set(DEFAULT_URL_SCHEMES),
        }
    }
}

impl SanitizerConfig {
    /// Replace the set of elements kept in the output.
    pub fn with_allowed_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_tags = name_set(tags);
        self
    }

    /// Keep one more element in the output.
    pub fn allow_tag(mut self, tag: &str) -> Self {
        self.allowed_tags.extend(name_set([tag]));
        self
    }

    /// Replace the set of elements removed together with their content.
    pub fn with_dropped_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.dropped_tags = name_set(tags);
        self
    }

    /// Replace the attributes allowed on every kept element.
    pub fn with_global_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.global_attributes = name_set(attributes);
        self
    }

    /// Replace the attributes allowed on one element.
    pub fn with_tag_attributes<I, S>(mut self, tag: &str, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tag_attributes
            .insert(tag.trim().to_ascii_lowercase(), name_set(attributes));
        self
    }

    /// Replace the URL schemes allowed in URL attributes. Relative URLs are
    /// always allowed.
    pub fn with_url_schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.url_schemes = name_set(schemes);
        self
    }

    /// Reject configs that ask for something the sanitizer will never do.
    pub fn validate(&self) -> Result<(), SanitizerConfigError> {
        if let Some(tag) = self
            .allowed_tags
            .iter()
            .find(|tag| ALWAYS_DROPPED_TAGS.contains(&tag.as_str()))
        {
            return Err(SanitizerConfigError::ForbiddenTag(tag.clone()));
        }

        let mut attributes = self
            .global_attributes
            .iter()
            .chain(self.tag_attributes.values().flatten());
        if let Some(attribute) = attributes.find(|a| is_event_handler(a)) {
            return Err(SanitizerConfigError::EventHandlerAttribute(
                attribute.clone(),
            ));
        }

        Ok(())
    }

    pub fn allowed_tags(&self) -> &BTreeSet<String> {
        &self.allowed_tags
    }

    pub fn dropped_tags(&self) -> &BTreeSet<String> {
        &self.dropped_tags
    }

    pub fn global_attributes(&self) -> &BTreeSet<String> {
        &self.global_attributes
    }

    pub fn tag_attributes(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.tag_attributes
    }

    pub fn url_schemes(&self) -> &BTreeSet<String> {
        &self.url_schemes
    }

    /// Whether the element and everything inside it is removed.
    pub fn drops_tag(&self, tag: &str) -> bool {
        ALWAYS_DROPPED_TAGS.contains(&tag) || self.dropped_tags.contains(tag)
    }

    /// Whether the element itself is written to the output.
    pub fn allows_tag(&self, tag: &str) -> bool {
        !self.drops_tag(tag) && self.allowed_tags.contains(tag)
    }

    pub fn allows_attribute(&self, tag: &str, attribute: &str) -> bool {
        if is_event_handler(attribute) {
            return false;
        }
        self.global_attributes.contains(attribute)
            || self
                .tag_attributes
                .get(tag)
                .is_some_and(|attributes| attributes.contains(attribute))
    }

    pub fn is_url_attribute(&self, attribute: &str) -> bool {
        self.url_attributes.contains(attribute)
    }

    pub fn allows_scheme(&self, scheme: &str) -> bool {
        self.url_schemes.contains(&scheme.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_allows_formatting_tags() {
        let config = SanitizerConfig::default();
        for tag in ["div", "b", "p", "a", "img", "table"] {
            assert!(config.allows_tag(tag), "{tag} should be allowed");
        }
        assert!(!config.allows_tag("script"));
        assert!(config.drops_tag("script"));
        assert!(config.drops_tag("style"));
        assert!(!config.allows_tag("custom-element"));
        assert!(!config.drops_tag("custom-element"));
    }

    #[test]
    fn default_attributes() {
        let config = SanitizerConfig::default();
        assert!(config.allows_attribute("a", "href"));
        assert!(config.allows_attribute("span", "class"));
        assert!(!config.allows_attribute("span", "href"));
        assert!(!config.allows_attribute("div", "style"));
        assert!(!config.allows_attribute("img", "onerror"));
        assert!(config.is_url_attribute("src"));
        assert!(config.allows_scheme("HTTPS"));
        assert!(!config.allows_scheme("javascript"));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn script_is_dropped_even_when_allowed() {
        let config = SanitizerConfig::default()
            .allow_tag("SCRIPT")
            .with_dropped_tags(Vec::<String>::new());
        assert!(!config.allows_tag("script"));
        assert!(config.drops_tag("script"));
        assert_eq!(
            config.validate(),
            Err(SanitizerConfigError::ForbiddenTag("script".to_string()))
        );
    }

    #[test]
    fn event_handlers_are_never_allowed() {
        let config = SanitizerConfig::default().with_tag_attributes("img", ["src", "OnLoad"]);
        assert!(!config.allows_attribute("img", "onload"));
        assert_eq!(
            config.validate(),
            Err(SanitizerConfigError::EventHandlerAttribute(
                "onload".to_string()
            ))
        );
    }

    #[test]
    fn builder_normalizes_names() {
        let config = SanitizerConfig::default()
            .with_allowed_tags([" P ", "B", ""])
            .with_global_attributes(["ID"])
            .with_url_schemes(["HTTPS"]);
        assert_eq!(
            config.allowed_tags().iter().collect::<Vec<_>>(),
            vec!["b", "p"]
        );
        assert!(config.allows_attribute("p", "id"));
        assert!(config.allows_scheme("https"));
        assert!(!config.allows_scheme("http"));
    }
}
