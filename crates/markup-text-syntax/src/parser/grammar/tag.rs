//! Start tags, end tags and attributes.

use crate::parser::{CompletedMarker, Parser};
use crate::syntax_kind::SyntaxKind;

fn is_tag_interior(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::WHITESPACE
            | SyntaxKind::ATTR_NAME
            | SyntaxKind::EQ
            | SyntaxKind::ATTR_VALUE
            | SyntaxKind::SLASH
    )
}

/// Whether the tag opened by the current token reaches a `>` or `/>`.
pub(super) fn is_terminated(p: &Parser<'_, '_>) -> bool {
    let mut n = 1;
    loop {
        match p.nth(n) {
            SyntaxKind::GT | SyntaxKind::SLASH_GT => return true,
            kind if is_tag_interior(kind) => n += 1,
            _ => return false,
        }
    }
}

/// Wrap the current tag, whatever it contains, in an ERROR node.
pub(super) fn error_tag(p: &mut Parser<'_, '_>) {
    let m = p.open();
    p.bump();
    while is_tag_interior(p.current()) {
        p.bump();
    }
    if !p.eat(SyntaxKind::GT) {
        p.eat(SyntaxKind::SLASH_GT);
    }
    m.complete(p, SyntaxKind::ERROR);
}

/// `<name attr=value ...>`
pub(super) fn start_tag(p: &mut Parser<'_, '_>) -> CompletedMarker {
    let m = p.open();
    p.bump();
    tag_body(p);
    m.complete(p, SyntaxKind::START_TAG)
}

/// `</name>`; anything between the name and `>` is kept but has no meaning.
pub(super) fn end_tag(p: &mut Parser<'_, '_>) {
    let m = p.open();
    p.bump();
    tag_body(p);
    m.complete(p, SyntaxKind::END_TAG);
}

fn tag_body(p: &mut Parser<'_, '_>) {
    loop {
        match p.current() {
            SyntaxKind::GT | SyntaxKind::SLASH_GT => {
                p.bump();
                return;
            }
            SyntaxKind::ATTR_NAME => attribute(p),
            SyntaxKind::EQ => {
                // `<a =x>`: a value with no name
                let m = p.open();
                p.bump();
                p.eat(SyntaxKind::WHITESPACE);
                p.eat(SyntaxKind::ATTR_VALUE);
                m.complete(p, SyntaxKind::ERROR);
            }
            kind if is_tag_interior(kind) => p.bump(),
            _ => return,
        }
    }
}

/// `name`, `name=value`, `name = "value"`
fn attribute(p: &mut Parser<'_, '_>) {
    let m = p.open();
    p.bump();
    if p.at(SyntaxKind::WHITESPACE) && p.nth(1) == SyntaxKind::EQ {
        p.bump();
    }
    if p.eat(SyntaxKind::EQ) {
        p.eat(SyntaxKind::WHITESPACE);
        p.eat(SyntaxKind::ATTR_VALUE);
    }
    m.complete(p, SyntaxKind::ATTRIBUTE);
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use crate::syntax_kind::SyntaxKind;
    use pretty_assertions::assert_eq;

    fn attribute_texts(input: &str) -> Vec<String> {
        parse(input)
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::ATTRIBUTE)
            .map(|n| n.text().to_string())
            .collect()
    }

    #[test]
    fn attributes_are_grouped() {
        assert_eq!(
            attribute_texts(r#"<a href = "x" target=_blank download>"#),
            vec![r#"href = "x""#, "target=_blank", "download"]
        );
    }

    #[test]
    fn value_without_name_is_an_error() {
        let tree = parse("<a =x title=y>");
        let start_tag = tree
            .descendants()
            .find(|n| n.kind() == SyntaxKind::START_TAG)
            .unwrap();
        let kinds: Vec<_> = start_tag.children().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec![SyntaxKind::ERROR, SyntaxKind::ATTRIBUTE]);
    }

    #[test]
    fn end_tag_junk_is_kept() {
        let tree = parse("<b>x</b foo>");
        let end_tag = tree
            .descendants()
            .find(|n| n.kind() == SyntaxKind::END_TAG)
            .unwrap();
        assert_eq!(end_tag.text().to_string(), "</b foo>");
    }
}
