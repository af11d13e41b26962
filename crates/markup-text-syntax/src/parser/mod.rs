//! # Parser
//!
//! Turns the lexer's flat token list into a tree of ELEMENT, START_TAG,
//! END_TAG, ATTRIBUTE and ERROR nodes.
//!
//! The grammar never touches Rowan. It records [`Event`]s: `Open` a node,
//! add a `Token`, `Close` the node. The [`Sink`] replays them into a green
//! tree once the whole input has been read.
//!
//! ## Elements
//!
//! An element cannot be opened when its `<` is seen. Until the tag's `>` is
//! found it might be an unterminated tag (an ERROR), and a start tag may
//! first implicitly close other elements (`<p>a<div>` closes the `<p>`).
//! So the grammar:
//!
//! 1. parses the start tag on its own as a START_TAG node
//! 2. calls [`CompletedMarker::precede`] on it, which reserves a slot for an
//!    ELEMENT node and links the START_TAG to it
//! 3. pushes that open ELEMENT [`Marker`] on its stack of open elements
//!
//! Children are parsed while the marker sits on the stack. An end tag, an
//! implied close or the end of input completes it. The sink follows the
//! link, so the ELEMENT opens before its START_TAG in the final tree.
//!
//! Open elements are a `Vec` in the grammar, never call frames, so nesting
//! depth in the input never becomes recursion depth.
//!
//! ## Text
//!
//! The lexer splits character data at every stray `<` (`a <= b` is three
//! tokens). [`Parser::bump_run`] merges such a run back into one TEXT token.
//!
//! ```
//! use markup_text_syntax::parse;
//!
//! let tree = parse("<p>Hello</p>");
//! assert_eq!(tree.text().to_string(), "<p>Hello</p>");
//! ```

pub mod event;
pub mod sink;

mod grammar;

use crate::lexer::{Token, lex};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::Sink;

/// Cursor over the token list plus the events recorded so far.
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    pos: usize,
    events: Vec<Event>,
}

impl<'t, 'input> Parser<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>]) -> Self {
        Self {
            tokens,
            pos: 0,
            events: Vec::with_capacity(tokens.len() * 2),
        }
    }

    /// Reserve a slot for a node whose kind is decided when it completes.
    pub fn open(&mut self) -> Marker {
        let slot = self.events.len();
        self.events.push(Event::Pending);
        Marker::new(slot)
    }

    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Kind of the token `n` places ahead; EOF past the end.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map_or(SyntaxKind::EOF, |token| token.kind)
    }

    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Text of the current token, e.g. `<div` for a TAG_OPEN.
    pub fn current_text(&self) -> &'input str {
        self.tokens.get(self.pos).map_or("", |token| token.text)
    }

    pub fn bump(&mut self) {
        if !self.at_end() {
            self.events.push(Event::token(self.current()));
            self.pos += 1;
        }
    }

    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        let matched = self.at(kind);
        if matched {
            self.bump();
        }
        matched
    }

    /// Consume the current token and every following token of the same kind
    /// as a single tree token.
    pub fn bump_run(&mut self) {
        let kind = self.current();
        let len = self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .take_while(|token| token.kind == kind)
            .count();
        if len > 0 {
            self.events.push(Event::Token { kind, len });
            self.pos += len;
        }
    }

    fn finish(self, source: &str) -> SyntaxNode {
        Sink::new(source, self.tokens, self.events).finish()
    }
}

/// An open node. Dropping one without completing it is a grammar bug and
/// panics.
#[must_use = "an open node must be completed"]
pub struct Marker {
    slot: usize,
    done: bool,
}

impl Marker {
    fn new(slot: usize) -> Self {
        Self { slot, done: false }
    }

    /// Close the node as `kind`, wrapping every event recorded since it was
    /// opened.
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) -> CompletedMarker {
        self.done = true;
        debug_assert!(matches!(p.events[self.slot], Event::Pending));
        p.events[self.slot] = Event::open(kind);
        p.events.push(Event::Close);
        CompletedMarker { slot: self.slot }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.done && !std::thread::panicking() {
            panic!("node opened at event {} was never completed", self.slot);
        }
    }
}

/// A node that is already closed but can still be given a parent.
#[derive(Debug, Clone, Copy)]
pub struct CompletedMarker {
    slot: usize,
}

impl CompletedMarker {
    /// Open a node that will become this node's parent. Used to put a
    /// START_TAG inside the ELEMENT whose children follow it.
    pub fn precede(self, p: &mut Parser<'_, '_>) -> Marker {
        let parent = p.open();
        if let Event::Open { wrapper, .. } = &mut p.events[self.slot] {
            *wrapper = Some(parent.slot);
        }
        parent
    }
}

/// Parse HTML source into a syntax tree.
///
/// Never fails: malformed input produces a tree with ERROR nodes, and the
/// tree's text is always exactly `source`.
pub fn parse(source: &str) -> SyntaxNode {
    let tokens = lex(source);
    let mut parser = Parser::new(&tokens);
    grammar::root(&mut parser);
    parser.finish(source)
}
