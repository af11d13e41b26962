//! SyntaxKind enum for all tokens and nodes in the HTML CST.
//!
//! Following the rust-analyzer model, all tokens and nodes share a single enum.
//! Every byte in the source must appear as a token in the tree.

/// All syntax kinds for the HTML CST.
///
/// This enum represents both tokens (lexer output) and composite nodes (parser output).
/// The `repr(u16)` ensures efficient storage in rowan's green tree.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens (lexer output) ===
    /// Character data between tags, including a lone `<` that opens nothing
    TEXT,
    /// Contents of a raw-text element such as `<script>` or `<style>`
    RAW_TEXT,
    /// `<!-- ... -->`, possibly unterminated
    COMMENT,
    /// `<!DOCTYPE ...>`
    DOCTYPE,
    /// `<!...>`, `<?...>` or `</` not followed by a letter
    BOGUS_COMMENT,
    /// `<name` opening a start tag
    TAG_OPEN,
    /// `</name` opening an end tag
    END_TAG_OPEN,
    /// Whitespace inside a tag
    WHITESPACE,
    /// Attribute name
    ATTR_NAME,
    /// `=` between an attribute name and its value
    EQ,
    /// Attribute value, quotes included when present
    ATTR_VALUE,
    /// A `/` inside a tag that does not end it
    SLASH,
    /// `>` closing a tag
    GT,
    /// `/>` closing a tag
    SLASH_GT,
    /// End of file marker
    EOF,

    // === Composite Nodes (parser output) ===
    /// Root document node
    ROOT,
    /// An element: start tag, children, and end tag when one was written
    ELEMENT,
    /// `<name attr=value>`
    START_TAG,
    /// `</name>`
    END_TAG,
    /// `name`, `name=value`
    ATTRIBUTE,

    /// Error recovery node: stray end tags and tags cut off by end of input
    ERROR,
}

impl SyntaxKind {
    /// Returns true if this kind represents a token (lexer output).
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::EOF as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns true if this kind is trivia (whitespace inside tags).
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE)
    }

    /// Returns true for markup that never contributes content: comments,
    /// doctypes and other `<!`/`<?` declarations.
    pub fn is_declaration(self) -> bool {
        matches!(self, Self::COMMENT | Self::DOCTYPE | Self::BOGUS_COMMENT)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HtmlLang {}

impl rowan::Language for HtmlLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::ERROR as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<HtmlLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<HtmlLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<HtmlLang>;

#[cfg(test)]
mod tests {
    use super::*;
    use rowan::Language;

    #[test]
    fn token_kinds_are_tokens() {
        assert!(SyntaxKind::TEXT.is_token());
        assert!(SyntaxKind::TAG_OPEN.is_token());
        assert!(SyntaxKind::EOF.is_token());
    }

    #[test]
    fn node_kinds_are_nodes() {
        assert!(SyntaxKind::ROOT.is_node());
        assert!(SyntaxKind::ELEMENT.is_node());
        assert!(SyntaxKind::ATTRIBUTE.is_node());
    }

    #[test]
    fn trivia_detection() {
        assert!(SyntaxKind::WHITESPACE.is_trivia());
        assert!(!SyntaxKind::TEXT.is_trivia());
    }

    #[test]
    fn declarations() {
        assert!(SyntaxKind::COMMENT.is_declaration());
        assert!(SyntaxKind::DOCTYPE.is_declaration());
        assert!(!SyntaxKind::RAW_TEXT.is_declaration());
    }

    #[test]
    fn rowan_conversion_roundtrip() {
        let kind = SyntaxKind::ELEMENT;
        let raw: rowan::SyntaxKind = kind.into();
        let back = HtmlLang::kind_from_raw(raw);
        assert_eq!(kind, back);
    }
}
