//! # Grammar Rules
//!
//! Each rule takes the `&mut Parser`, looks at tokens with `current`/`nth`,
//! consumes them with `bump`/`eat`/`bump_run` and brackets nodes with
//! `open` and `complete`.
//!
//! ## Module Structure
//!
//! - this module - the document loop and the stack of open elements
//! - [`tag`] - start tags, end tags and attributes
//!
//! ## Tree Construction
//!
//! HTML does not require end tags to match. The document loop keeps a stack
//! of open elements and follows a pragmatic subset of the HTML rules:
//!
//! - void elements (`<img>`, `<br>`) never take children
//! - a block start tag closes an open `<p>`, `<li>` closes `<li>`, `<dt>`/`<dd>`
//!   close `<dt>`/`<dd>`, `<option>` closes `<option>`, a heading closes a
//!   heading that is the current element
//! - an end tag closes every element above the nearest open element of the
//!   same name
//! - whatever is still open at end of input is closed there
//!
//! ## Error Recovery
//!
//! Grammar functions never fail. Stray end tags and tags cut off by the end
//! of input are wrapped in ERROR nodes, which consumers ignore. The tree
//! always preserves every input byte.

mod tag;

use crate::elements;
use crate::lexer::tag_name;
use crate::parser::{Marker, Parser};
use crate::syntax_kind::SyntaxKind;

/// Parse the root document.
///
/// This is the entry point for parsing. It creates a ROOT node containing
/// all top-level content.
pub fn root(p: &mut Parser<'_, '_>) {
    let m = p.open();
    let mut open = OpenElements::default();

    while !p.at_end() {
        match p.current() {
            SyntaxKind::TAG_OPEN => start_tag(p, &mut open),
            SyntaxKind::END_TAG_OPEN => end_tag(p, &mut open),
            SyntaxKind::TEXT => p.bump_run(),
            _ => p.bump(),
        }
    }

    open.close_from(p, 0);
    m.complete(p, SyntaxKind::ROOT);
}

fn start_tag(p: &mut Parser<'_, '_>, open: &mut OpenElements) {
    if !tag::is_terminated(p) {
        tag::error_tag(p);
        return;
    }

    let name = tag_name(p.current_text());
    open.close_implied_by(p, &name);
    if open.stack.len() >= elements::MAX_NESTING {
        open.close_from(p, open.stack.len() - 1);
    }

    let start = tag::start_tag(p);
    let element = start.precede(p);
    if elements::is_void(&name) {
        element.complete(p, SyntaxKind::ELEMENT);
    } else {
        open.stack.push(OpenElement {
            name,
            marker: element,
        });
    }
}

fn end_tag(p: &mut Parser<'_, '_>, open: &mut OpenElements) {
    if !tag::is_terminated(p) {
        tag::error_tag(p);
        return;
    }

    let name = tag_name(p.current_text());
    let Some(index) = open.position(&name) else {
        tag::error_tag(p);
        return;
    };

    open.close_from(p, index + 1);
    tag::end_tag(p);
    open.close_from(p, index);
}

struct OpenElement {
    name: String,
    marker: Marker,
}

#[derive(Default)]
struct OpenElements {
    stack: Vec<OpenElement>,
}

impl OpenElements {
    /// Index of the innermost open element called `name`.
    fn position(&self, name: &str) -> Option<usize> {
        self.stack.iter().rposition(|el| el.name == name)
    }

    /// Index of the innermost open element in `targets`, unless a scope
    /// boundary or one of `boundaries` is open inside it.
    fn in_scope(&self, targets: &[&str], boundaries: &[&str]) -> Option<usize> {
        for (index, el) in self.stack.iter().enumerate().rev() {
            let name = el.name.as_str();
            if targets.contains(&name) {
                return Some(index);
            }
            if boundaries.contains(&name) || elements::is_scope_boundary(name) {
                return None;
            }
        }
        None
    }

    /// Complete every element at `index` and above, innermost first.
    fn close_from(&mut self, p: &mut Parser<'_, '_>, index: usize) {
        if index >= self.stack.len() {
            return;
        }
        for el in self.stack.split_off(index).into_iter().rev() {
            el.marker.complete(p, SyntaxKind::ELEMENT);
        }
    }

    /// Close the elements a start tag called `name` implicitly ends.
    fn close_implied_by(&mut self, p: &mut Parser<'_, '_>, name: &str) {
        let implied = match name {
            "li" => self.in_scope(&["li"], &["ol", "ul"]),
            "dt" | "dd" => self.in_scope(&["dt", "dd"], &["dl"]),
            "option" => self.in_scope(&["option"], &["select", "datalist", "optgroup"]),
            _ if elements::is_heading(name) => self
                .stack
                .last()
                .filter(|el| elements::is_heading(&el.name))
                .map(|_| self.stack.len() - 1),
            _ => None,
        };
        if let Some(index) = implied {
            self.close_from(p, index);
        }

        if elements::closes_paragraph(name)
            && let Some(index) = self.in_scope(&["p"], &[])
        {
            self.close_from(p, index);
        }
    }
}
