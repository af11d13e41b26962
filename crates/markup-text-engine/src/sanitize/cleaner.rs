//! One sanitizing pass: walk the syntax tree and write back only what the
//! config allows, in canonical form.
//!
//! Nothing from the source is copied through unchecked. Text is decoded and
//! re-escaped, kept elements are rebuilt from their name and their allowed
//! attributes, and every kept non-void element gets an explicit end tag.

use std::collections::BTreeSet;

use html_escape::{decode_html_entities, encode_double_quoted_attribute, encode_text};
use log::debug;
use markup_text_syntax::ast::Element;
use markup_text_syntax::elements::{is_escapable_raw_text, is_raw_text, is_void};
use markup_text_syntax::{SyntaxKind, SyntaxToken, parse};
use rowan::{NodeOrToken, WalkEvent};

use super::url::is_allowed_url;
use crate::config::SanitizerConfig;
use crate::text::raw_text;

pub(super) fn clean(html: &str, config: &SanitizerConfig) -> String {
    let tree = parse(html);
    let mut out = String::with_capacity(html.len());
    let mut walk = tree.preorder_with_tokens();

    while let Some(event) = walk.next() {
        match event {
            WalkEvent::Enter(NodeOrToken::Node(node)) => match node.kind() {
                SyntaxKind::ROOT => {}
                SyntaxKind::ELEMENT => {
                    let Some(element) = Element::cast(node) else {
                        continue;
                    };
                    let name = element.name();
                    if config.drops_tag(&name) {
                        debug!("dropping <{name}> and its content");
                        walk.skip_subtree();
                    } else if is_kept(&name, config) {
                        write_start_tag(&mut out, &element, &name, config);
                    } else {
                        debug!("unwrapping <{name}>");
                    }
                }
                // Tags are rebuilt from ELEMENT; ERROR nodes carry no content.
                _ => walk.skip_subtree(),
            },
            WalkEvent::Enter(NodeOrToken::Token(token)) => match token.kind() {
                SyntaxKind::TEXT => {
                    out.push_str(&encode_text(&decode_html_entities(token.text())));
                }
                SyntaxKind::RAW_TEXT => {
                    if let Some(text) = kept_raw_text(&token, config) {
                        out.push_str(&encode_text(&text));
                    }
                }
                _ => {}
            },
            WalkEvent::Leave(NodeOrToken::Node(node)) => {
                if let Some(element) = Element::cast(node) {
                    let name = element.name();
                    if is_kept(&name, config) && !is_void(&name) {
                        out.push_str("</");
                        out.push_str(&name);
                        out.push('>');
                    }
                }
            }
            WalkEvent::Leave(NodeOrToken::Token(_)) => {}
        }
    }

    out
}

fn is_kept(name: &str, config: &SanitizerConfig) -> bool {
    is_valid_name(name) && config.allows_tag(name)
}

/// Names written to the output are restricted to characters that cannot
/// end a tag or open a value.
fn is_valid_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_alphabetic())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

fn write_start_tag(
    out: &mut String,
    element: &Element,
    name: &str,
    config: &SanitizerConfig,
) {
    out.push('<');
    out.push_str(name);

    let mut seen = BTreeSet::new();
    for attribute in element.attributes() {
        let attribute_name = attribute.name();
        // The first occurrence of a repeated attribute wins.
        if !seen.insert(attribute_name.clone()) {
            continue;
        }
        if !is_valid_name(&attribute_name) || !config.allows_attribute(name, &attribute_name) {
            debug!("removing attribute `{attribute_name}` from <{name}>");
            continue;
        }

        let Some(raw_value) = attribute.raw_value() else {
            out.push(' ');
            out.push_str(&attribute_name);
            continue;
        };
        let value = decode_html_entities(&raw_value);
        if config.is_url_attribute(&attribute_name) && !is_allowed_url(&value, config) {
            debug!("removing `{attribute_name}` from <{name}>: URL scheme not allowed");
            continue;
        }

        out.push(' ');
        out.push_str(&attribute_name);
        out.push_str("=\"");
        out.push_str(&encode_double_quoted_attribute(&value));
        out.push('"');
    }

    out.push('>');
}

/// Escaped text of everything outside dropped elements, with no markup.
/// The result of a document that never settles.
pub(super) fn escaped_text(html: &str, config: &SanitizerConfig) -> String {
    let tree = parse(html);
    let mut text = String::new();
    let mut walk = tree.preorder_with_tokens();

    while let Some(event) = walk.next() {
        match event {
            WalkEvent::Enter(NodeOrToken::Node(node)) => {
                if Element::cast(node).is_some_and(|element| config.drops_tag(&element.name())) {
                    walk.skip_subtree();
                }
            }
            WalkEvent::Enter(NodeOrToken::Token(token)) => match token.kind() {
                SyntaxKind::TEXT => text.push_str(&decode_html_entities(token.text())),
                SyntaxKind::RAW_TEXT => {
                    if let Some(raw) = kept_raw_text(&token, config) {
                        text.push_str(&raw);
                    }
                }
                _ => {}
            },
            WalkEvent::Leave(_) => {}
        }
    }

    encode_text(&text).into_owned()
}

/// Contents of `<textarea>` and `<title>` stay as text. Other raw text
/// inside a kept element is dropped since it is only safe in the context it
/// was written for. Raw text of an unwrapped element becomes ordinary text.
fn kept_raw_text(token: &SyntaxToken, config: &SanitizerConfig) -> Option<String> {
    let parent = token.parent().and_then(Element::cast);
    let parent_name = parent.as_ref().map(Element::name).unwrap_or_default();

    if is_kept(&parent_name, config)
        && is_raw_text(&parent_name)
        && !is_escapable_raw_text(&parent_name)
    {
        debug!("dropping raw text inside <{parent_name}>");
        return None;
    }

    Some(raw_text(token))
}
