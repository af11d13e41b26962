//! # Lexer - Tokenizing HTML Source
//!
//! This module provides the first stage of parsing: breaking source text into
//! tokens using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! The most important property of this lexer is that **every byte in the input
//! appears in exactly one token**. We never skip or discard characters, even
//! for garbage input. This is what makes round-tripping possible:
//!
//! ```
//! use markup_text_syntax::lexer::lex;
//!
//! let input = "<p class=\"x\">a <= b</p>";
//! let tokens = lex(input);
//!
//! // Concatenating all token texts gives back the original
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Two Lexing Modes
//!
//! HTML is not context-free at the token level: `"` is plain text between
//! tags but starts a quoted value inside one. We therefore run two Logos
//! enums and [`morph`](logos::Lexer::morph) between them:
//!
//! - [`ContentToken`] - between tags: text runs, tag openers, comments
//! - [`TagToken`] - inside a tag, up to the closing `>` or `/>`
//!
//! Three constructs are scanned by hand because Logos has no lazy matching:
//!
//! - comment bodies (up to `-->`)
//! - attribute values after `=` (quoted or unquoted)
//! - the contents of raw-text elements such as `<script>` (up to the
//!   matching end tag)
//!
//! ## Token Design Philosophy
//!
//! Tokens stay **context-free within their mode**. The lexer doesn't know
//! whether `</div>` closes anything - that's the parser's job. The only
//! structural knowledge here is which element names switch to raw text.
//!
//! ## Public API
//!
//! - [`lex`] - Tokenize input, returning `Vec<Token>`
//! - [`lex_with_spans`] - Tokenize with byte offset spans
//! - [`Token`] - A token with its kind and text slice

use std::ops::Range;

use logos::{Lexer, Logos};

use crate::elements;
use crate::syntax_kind::SyntaxKind;

/// Tokens recognised between tags.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentToken {
    /// A run of character data
    #[regex(r"[^<]+")]
    Text,

    /// A `<` that does not open a tag (`a <= b`, `1 < 2`)
    #[token("<")]
    Lt,

    /// `<` directly followed by a letter, plus the rest of the tag name
    #[regex(r"<[a-zA-Z][^\t\n\f\r />]*")]
    TagOpen,

    /// `</` directly followed by a letter, plus the rest of the tag name
    #[regex(r"</[a-zA-Z][^\t\n\f\r />]*")]
    EndTagOpen,

    /// `<!--`; the body is scanned by hand
    #[token("<!--")]
    CommentOpen,

    /// `<!`, `<?` or `</` not followed by a letter; runs to the next `>`
    #[token("<!")]
    #[token("<?")]
    #[token("</")]
    DeclarationOpen,
}

/// Tokens recognised inside a start or end tag.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagToken {
    #[regex(r"[\t\n\f\r ]+")]
    Whitespace,

    #[token(">")]
    Gt,

    #[token("/>")]
    SlashGt,

    #[token("/")]
    Slash,

    /// `=`; the value that follows is scanned by hand
    #[token("=")]
    Eq,

    #[regex(r"[^\t\n\f\r />=]+")]
    Name,
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    lex_with_spans(input)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// Lex and return tokens along with their byte spans.
pub fn lex_with_spans(input: &str) -> Vec<(Token<'_>, Range<usize>)> {
    let mut out = Output {
        input,
        tokens: Vec::new(),
    };
    let mut content = ContentToken::lexer(input);

    while let Some(result) = content.next() {
        // Logos error means unrecognized input - treat as TEXT
        match result.unwrap_or(ContentToken::Text) {
            ContentToken::Text | ContentToken::Lt => out.push(SyntaxKind::TEXT, content.span()),
            ContentToken::CommentOpen => {
                let len = comment_body_len(content.remainder());
                content.bump(len);
                out.push(SyntaxKind::COMMENT, content.span());
            }
            ContentToken::DeclarationOpen => {
                let rest = content.remainder();
                let len = rest.find('>').map_or(rest.len(), |i| i + 1);
                content.bump(len);
                let kind = if is_doctype(content.slice()) {
                    SyntaxKind::DOCTYPE
                } else {
                    SyntaxKind::BOGUS_COMMENT
                };
                out.push(kind, content.span());
            }
            opener @ (ContentToken::TagOpen | ContentToken::EndTagOpen) => {
                let is_start = opener == ContentToken::TagOpen;
                let kind = if is_start {
                    SyntaxKind::TAG_OPEN
                } else {
                    SyntaxKind::END_TAG_OPEN
                };
                out.push(kind, content.span());
                let name = tag_name(content.slice());

                let mut tag = content.morph::<TagToken>();
                let closed = lex_tag(&mut tag, &mut out);
                content = tag.morph();

                if closed && is_start && elements::is_raw_text(&name) {
                    let len = raw_text_len(content.remainder(), &name);
                    if len > 0 {
                        let start = content.span().end;
                        out.push(SyntaxKind::RAW_TEXT, start..start + len);
                        content.bump(len);
                    }
                }
            }
        }
    }

    out.tokens
}

/// Returns the lowercased element name carried by a `TAG_OPEN` or
/// `END_TAG_OPEN` token.
pub fn tag_name(text: &str) -> String {
    text.strip_prefix("</")
        .or_else(|| text.strip_prefix('<'))
        .unwrap_or(text)
        .to_ascii_lowercase()
}

struct Output<'a> {
    input: &'a str,
    tokens: Vec<(Token<'a>, Range<usize>)>,
}

impl<'a> Output<'a> {
    fn push(&mut self, kind: SyntaxKind, span: Range<usize>) {
        let text = &self.input[span.clone()];
        self.tokens.push((Token { kind, text }, span));
    }
}

/// Lex the inside of a tag. Returns false if input ended before `>`.
fn lex_tag<'a>(tag: &mut Lexer<'a, TagToken>, out: &mut Output<'a>) -> bool {
    while let Some(result) = tag.next() {
        match result.unwrap_or(TagToken::Name) {
            TagToken::Gt => {
                out.push(SyntaxKind::GT, tag.span());
                return true;
            }
            TagToken::SlashGt => {
                out.push(SyntaxKind::SLASH_GT, tag.span());
                return true;
            }
            TagToken::Whitespace => out.push(SyntaxKind::WHITESPACE, tag.span()),
            TagToken::Slash => out.push(SyntaxKind::SLASH, tag.span()),
            TagToken::Name => out.push(SyntaxKind::ATTR_NAME, tag.span()),
            TagToken::Eq => {
                out.push(SyntaxKind::EQ, tag.span());
                let start = tag.span().end;
                let (ws, value) = attr_value_len(tag.remainder());
                if ws > 0 {
                    out.push(SyntaxKind::WHITESPACE, start..start + ws);
                }
                if value > 0 {
                    out.push(SyntaxKind::ATTR_VALUE, start + ws..start + ws + value);
                }
                tag.bump(ws + value);
            }
        }
    }
    false
}

fn is_html_whitespace(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | b'\x0C' | b'\r' | b' ')
}

/// Length of leading whitespace and of the attribute value after it.
///
/// Quoted values run to the matching quote (or end of input); unquoted
/// values run to whitespace or `>`.
fn attr_value_len(rest: &str) -> (usize, usize) {
    let bytes = rest.as_bytes();
    let ws = bytes.iter().take_while(|b| is_html_whitespace(**b)).count();
    let after = &bytes[ws..];

    let value = match after.first() {
        Some(&quote @ (b'"' | b'\'')) => after[1..]
            .iter()
            .position(|b| *b == quote)
            .map_or(after.len(), |i| i + 2),
        Some(_) => after
            .iter()
            .take_while(|b| !is_html_whitespace(**b) && **b != b'>')
            .count(),
        None => 0,
    };

    (ws, value)
}

/// Length of a comment body following `<!--`, including the closing `-->`.
///
/// `<!-->` and `<!--->` close immediately; an unterminated comment runs to
/// the end of input.
fn comment_body_len(rest: &str) -> usize {
    if rest.starts_with('>') {
        1
    } else if rest.starts_with("->") {
        2
    } else {
        rest.find("-->").map_or(rest.len(), |i| i + 3)
    }
}

fn is_doctype(text: &str) -> bool {
    text.get(2..9)
        .is_some_and(|word| word.eq_ignore_ascii_case("doctype"))
}

/// Length of raw text before the end tag `</name` (case-insensitive) that
/// closes it, or the rest of the input if there is none.
fn raw_text_len(rest: &str, name: &str) -> usize {
    let bytes = rest.as_bytes();
    let mut from = 0;

    while let Some(offset) = rest[from..].find("</") {
        let at = from + offset;
        let after = &bytes[at + 2..];
        if after.len() >= name.len() && after[..name.len()].eq_ignore_ascii_case(name.as_bytes()) {
            match after.get(name.len()) {
                None => return at,
                Some(b) if is_html_whitespace(*b) || *b == b'/' || *b == b'>' => return at,
                Some(_) => {}
            }
        }
        from = at + 2;
    }

    rest.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(kind: SyntaxKind, text: &str) -> Token<'_> {
        Token { kind, text }
    }

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        lex(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lex_empty_input() {
        assert_eq!(lex(""), vec![]);
    }

    #[test]
    fn lex_plain_text() {
        let tokens = lex("hello world");
        assert_eq!(tokens, vec![token(SyntaxKind::TEXT, "hello world")]);
    }

    #[test]
    fn lex_comparison_operators_stay_text() {
        let tokens = lex("a <= 10 and b > 10");
        assert_eq!(
            tokens,
            vec![
                token(SyntaxKind::TEXT, "a "),
                token(SyntaxKind::TEXT, "<"),
                token(SyntaxKind::TEXT, "= 10 and b > 10"),
            ]
        );
    }

    #[test]
    fn lex_simple_element() {
        let tokens = lex("<b>bold</b>");
        assert_eq!(
            tokens,
            vec![
                token(SyntaxKind::TAG_OPEN, "<b"),
                token(SyntaxKind::GT, ">"),
                token(SyntaxKind::TEXT, "bold"),
                token(SyntaxKind::END_TAG_OPEN, "</b"),
                token(SyntaxKind::GT, ">"),
            ]
        );
    }

    #[test]
    fn lex_attributes() {
        let tokens = lex(r#"<img src="a.png" alt='x y' width=10 hidden/>"#);
        assert_eq!(
            tokens,
            vec![
                token(SyntaxKind::TAG_OPEN, "<img"),
                token(SyntaxKind::WHITESPACE, " "),
                token(SyntaxKind::ATTR_NAME, "src"),
                token(SyntaxKind::EQ, "="),
                token(SyntaxKind::ATTR_VALUE, "\"a.png\""),
                token(SyntaxKind::WHITESPACE, " "),
                token(SyntaxKind::ATTR_NAME, "alt"),
                token(SyntaxKind::EQ, "="),
                token(SyntaxKind::ATTR_VALUE, "'x y'"),
                token(SyntaxKind::WHITESPACE, " "),
                token(SyntaxKind::ATTR_NAME, "width"),
                token(SyntaxKind::EQ, "="),
                token(SyntaxKind::ATTR_VALUE, "10"),
                token(SyntaxKind::WHITESPACE, " "),
                token(SyntaxKind::ATTR_NAME, "hidden"),
                token(SyntaxKind::SLASH_GT, "/>"),
            ]
        );
    }

    #[test]
    fn lex_quoted_value_may_contain_gt_and_quotes() {
        let tokens = lex(r#"<a title="1 > 0 'ok'">"#);
        assert_eq!(
            tokens,
            vec![
                token(SyntaxKind::TAG_OPEN, "<a"),
                token(SyntaxKind::WHITESPACE, " "),
                token(SyntaxKind::ATTR_NAME, "title"),
                token(SyntaxKind::EQ, "="),
                token(SyntaxKind::ATTR_VALUE, "\"1 > 0 'ok'\""),
                token(SyntaxKind::GT, ">"),
            ]
        );
    }

    #[test]
    fn lex_spaces_around_equals() {
        assert_eq!(
            kinds("<a href = x>"),
            vec![
                SyntaxKind::TAG_OPEN,
                SyntaxKind::WHITESPACE,
                SyntaxKind::ATTR_NAME,
                SyntaxKind::WHITESPACE,
                SyntaxKind::EQ,
                SyntaxKind::WHITESPACE,
                SyntaxKind::ATTR_VALUE,
                SyntaxKind::GT,
            ]
        );
    }

    #[test]
    fn lex_quotes_outside_tags_are_text() {
        let tokens = lex(r#""hello <b>x</b>""#);
        assert_eq!(tokens[0], token(SyntaxKind::TEXT, "\"hello "));
        assert_eq!(tokens[1], token(SyntaxKind::TAG_OPEN, "<b"));
        assert_eq!(tokens[6], token(SyntaxKind::TEXT, "\""));
    }

    #[test]
    fn lex_comments() {
        assert_eq!(
            lex("<!-- note -->x"),
            vec![
                token(SyntaxKind::COMMENT, "<!-- note -->"),
                token(SyntaxKind::TEXT, "x"),
            ]
        );
        assert_eq!(lex("<!-->x")[0], token(SyntaxKind::COMMENT, "<!-->"));
        assert_eq!(
            lex("<!-- never closed <b>"),
            vec![token(SyntaxKind::COMMENT, "<!-- never closed <b>")]
        );
    }

    #[test]
    fn lex_declarations() {
        assert_eq!(
            kinds("<!DOCTYPE html><?xml version=\"1.0\"?></ 3>"),
            vec![
                SyntaxKind::DOCTYPE,
                SyntaxKind::BOGUS_COMMENT,
                SyntaxKind::BOGUS_COMMENT,
            ]
        );
    }

    #[test]
    fn lex_script_body_is_raw_text() {
        let tokens = lex("<script>if (a<b) { x = '</p>'; }</script>");
        assert_eq!(
            tokens,
            vec![
                token(SyntaxKind::TAG_OPEN, "<script"),
                token(SyntaxKind::GT, ">"),
                token(SyntaxKind::RAW_TEXT, "if (a<b) { x = '</p>'; }"),
                token(SyntaxKind::END_TAG_OPEN, "</script"),
                token(SyntaxKind::GT, ">"),
            ]
        );
    }

    #[test]
    fn lex_raw_text_end_tag_is_case_insensitive() {
        let tokens = lex("<style>b{}</STYLE >");
        assert_eq!(tokens[2], token(SyntaxKind::RAW_TEXT, "b{}"));
        assert_eq!(tokens[3], token(SyntaxKind::END_TAG_OPEN, "</STYLE"));
    }

    #[test]
    fn lex_unterminated_raw_text_runs_to_end() {
        let tokens = lex("<script>alert(1)</scripty");
        assert_eq!(tokens.last(), Some(&token(SyntaxKind::RAW_TEXT, "alert(1)</scripty")));
    }

    #[test]
    fn lex_unterminated_tag() {
        assert_eq!(
            lex("<div><h1>Unclosed tag"),
            vec![
                token(SyntaxKind::TAG_OPEN, "<div"),
                token(SyntaxKind::GT, ">"),
                token(SyntaxKind::TAG_OPEN, "<h1"),
                token(SyntaxKind::GT, ">"),
                token(SyntaxKind::TEXT, "Unclosed tag"),
            ]
        );
        assert_eq!(
            kinds("text <b class"),
            vec![
                SyntaxKind::TEXT,
                SyntaxKind::TAG_OPEN,
                SyntaxKind::WHITESPACE,
                SyntaxKind::ATTR_NAME,
            ]
        );
    }

    #[test]
    fn lex_with_spans_reports_offsets() {
        let tokens = lex_with_spans("a<i>");
        let spans: Vec<_> = tokens.into_iter().map(|(_, span)| span).collect();
        assert_eq!(spans, vec![0..1, 1..3, 3..4]);
    }

    #[test]
    fn tag_name_is_lowercased() {
        assert_eq!(tag_name("<DIV"), "div");
        assert_eq!(tag_name("</Script"), "script");
    }

    #[test]
    fn all_bytes_preserved() {
        let input = "<p>Hello, <strong>World!</strong></p>";
        let tokens = lex(input);
        let reconstructed: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(input, reconstructed);
    }

    #[test]
    fn all_bytes_preserved_garbage() {
        let inputs = [
            "<a href=\"unterminated",
            "<<<>>> </> <!-- <![CDATA[x]]> <? ?>",
            "<img src=x onerror=alert(1)//>",
            "<scr<script>ipt>alert(1)</script>",
            "héllo <é> wörld <b title='ü'>",
            "<textarea></textarea><title>&amp;</title>",
        ];
        for input in inputs {
            let reconstructed: String = lex(input).iter().map(|t| t.text).collect();
            assert_eq!(input, reconstructed, "Roundtrip failed for: {input:?}");
        }
    }
}
