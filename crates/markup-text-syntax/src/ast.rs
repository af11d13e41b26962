//! Typed views over the untyped Rowan tree.
//!
//! Each wrapper is a cheap handle around a [`SyntaxNode`] of one kind, with
//! accessors that hide token-level details (quotes, whitespace, case).
//! Values are returned as written in the source: entity references are
//! *not* decoded here.

use crate::lexer::tag_name;
use crate::syntax_kind::{SyntaxElement, SyntaxKind, SyntaxNode};

/// An `ELEMENT` node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element(SyntaxNode);

impl Element {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        (node.kind() == SyntaxKind::ELEMENT).then_some(Self(node))
    }

    pub fn syntax(&self) -> &SyntaxNode {
        &self.0
    }

    pub fn start_tag(&self) -> Option<StartTag> {
        self.0.children().find_map(StartTag::cast)
    }

    /// Lowercased element name.
    pub fn name(&self) -> String {
        self.start_tag().map(|tag| tag.name()).unwrap_or_default()
    }

    pub fn attributes(&self) -> impl Iterator<Item = Attribute> + use<> {
        self.start_tag()
            .into_iter()
            .flat_map(|tag| tag.attributes())
    }

    /// Element content: everything between the start tag and the end tag.
    pub fn content(&self) -> impl Iterator<Item = SyntaxElement> + use<> {
        self.0.children_with_tokens().filter(|child| {
            !matches!(
                child.kind(),
                SyntaxKind::START_TAG | SyntaxKind::END_TAG
            )
        })
    }
}

/// A `START_TAG` node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StartTag(SyntaxNode);

impl StartTag {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        (node.kind() == SyntaxKind::START_TAG).then_some(Self(node))
    }

    pub fn syntax(&self) -> &SyntaxNode {
        &self.0
    }

    /// Lowercased tag name.
    pub fn name(&self) -> String {
        self.0
            .first_token()
            .map(|token| tag_name(token.text()))
            .unwrap_or_default()
    }

    pub fn attributes(&self) -> impl Iterator<Item = Attribute> + use<> {
        self.0.children().filter_map(Attribute::cast)
    }
}

/// An `ATTRIBUTE` node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute(SyntaxNode);

impl Attribute {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        (node.kind() == SyntaxKind::ATTRIBUTE).then_some(Self(node))
    }

    pub fn syntax(&self) -> &SyntaxNode {
        &self.0
    }

    /// Lowercased attribute name.
    pub fn name(&self) -> String {
        self.token_text(SyntaxKind::ATTR_NAME)
            .map(|name| name.to_ascii_lowercase())
            .unwrap_or_default()
    }

    /// The value with surrounding quotes removed; `None` for a bare
    /// attribute such as `hidden`.
    pub fn raw_value(&self) -> Option<String> {
        let value = self.token_text(SyntaxKind::ATTR_VALUE)?;
        Some(unquote(&value).to_string())
    }

    fn token_text(&self, kind: SyntaxKind) -> Option<String> {
        self.0
            .children_with_tokens()
            .filter_map(|child| child.into_token())
            .find(|token| token.kind() == kind)
            .map(|token| token.text().to_string())
    }
}

/// Strip one pair of matching quotes. An unterminated quote (value cut off
/// by end of input) only loses its opening quote.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote) {
            return inner.strip_suffix(quote).unwrap_or(inner);
        }
    }
    value
}
