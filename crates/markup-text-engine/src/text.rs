//! Plain-text extraction: tag stripping and paragraph contents.

use html_escape::decode_html_entities;
use markup_text_syntax::ast::Element;
use markup_text_syntax::elements::is_escapable_raw_text;
use markup_text_syntax::{SyntaxKind, SyntaxNode, SyntaxToken, parse};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::classify::is_probably_html;

/// Text of the document with every tag removed.
///
/// Text runs are concatenated in document order with nothing inserted
/// between them, and character references are decoded. Comments, doctypes
/// and tags cut off by the end of input contribute nothing. The contents of
/// `<script>` and `<style>` are raw text: they are returned as text, never
/// interpreted.
///
/// ```
/// use markup_text_engine::remove_html_tags;
///
/// assert_eq!(remove_html_tags("<p>Hello, <strong>World!</strong></p>"), "Hello, World!");
/// assert_eq!(remove_html_tags("<div><h1>Unclosed tag"), "Unclosed tag");
/// ```
pub fn remove_html_tags(html: &str) -> String {
    text_content(&parse(html))
}

/// Concatenated text of every text token below `node`.
pub(crate) fn text_content(node: &SyntaxNode) -> String {
    let mut out = String::new();
    for token in node
        .descendants_with_tokens()
        .filter_map(|element| element.into_token())
    {
        match token.kind() {
            SyntaxKind::TEXT => out.push_str(&decode_html_entities(token.text())),
            SyntaxKind::RAW_TEXT => out.push_str(&raw_text(&token)),
            _ => {}
        }
    }
    out
}

/// The text carried by a `RAW_TEXT` token. Only `<textarea>` and `<title>`
/// decode character references.
pub(crate) fn raw_text(token: &SyntaxToken) -> String {
    let escapable = token
        .parent()
        .and_then(Element::cast)
        .is_some_and(|element| is_escapable_raw_text(&element.name()));
    if escapable {
        decode_html_entities(token.text()).into_owned()
    } else {
        token.text().to_string()
    }
}

/// Text of each `<p>` element, keyed `p1`, `p2`, ... in document order.
///
/// Returns `None` when the input does not look like markup at all, and when
/// it contains no `<p>` element, so an absent result is never confused with
/// paragraphs that happen to be empty.
///
/// ```
/// use markup_text_engine::paragraph_contents;
///
/// let paragraphs = paragraph_contents("<p>First</p><p>Second</p>").unwrap();
/// assert_eq!(paragraphs.get("p2"), Some("Second"));
/// assert!(paragraph_contents("plain text").is_none());
/// ```
pub fn paragraph_contents(html: &str) -> Option<ParagraphContents> {
    if !is_probably_html(html) {
        return None;
    }

    let texts: Vec<String> = parse(html)
        .descendants()
        .filter_map(Element::cast)
        .filter(|element| element.name() == "p")
        .map(|element| text_content(element.syntax()))
        .collect();

    if texts.is_empty() {
        None
    } else {
        Some(ParagraphContents { texts })
    }
}

/// Ordered paragraph texts, addressed by `p<N>` keys starting at `p1`.
///
/// Always holds at least one paragraph. Serializes as a JSON object whose
/// keys keep document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphContents {
    texts: Vec<String>,
}

impl ParagraphContents {
    /// Text stored under `key`, e.g. `"p1"`.
    pub fn get(&self, key: &str) -> Option<&str> {
        let index: usize = key.strip_prefix('p')?.parse().ok()?;
        if index == 0 || key.len() != format!("p{index}").len() {
            return None;
        }
        self.texts.get(index - 1).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// `(key, text)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        self.texts
            .iter()
            .enumerate()
            .map(|(i, text)| (format!("p{}", i + 1), text.as_str()))
    }

    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        self.texts.iter().map(String::as_str)
    }
}

impl Serialize for ParagraphContents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, text) in self.iter() {
            map.serialize_entry(&key, text)?;
        }
        map.end()
    }
}
