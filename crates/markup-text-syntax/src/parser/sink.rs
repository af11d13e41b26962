//! Replays parser events into a Rowan green tree.

use rowan::GreenNodeBuilder;

use crate::lexer::Token;
use crate::parser::event::Event;
use crate::syntax_kind::{SyntaxKind, SyntaxNode};

/// Builds the tree. Token text is sliced from `source`, which is what the
/// tokens were lexed from, so merged runs are never reallocated.
pub struct Sink<'t, 'input> {
    builder: GreenNodeBuilder<'static>,
    source: &'input str,
    tokens: &'t [Token<'input>],
    /// Next unconsumed lexer token
    cursor: usize,
    /// Byte offset of `tokens[cursor]` in `source`
    offset: usize,
    events: Vec<Event>,
}

impl<'t, 'input> Sink<'t, 'input> {
    pub fn new(source: &'input str, tokens: &'t [Token<'input>], events: Vec<Event>) -> Self {
        Self {
            builder: GreenNodeBuilder::new(),
            source,
            tokens,
            cursor: 0,
            offset: 0,
            events,
        }
    }

    pub fn finish(mut self) -> SyntaxNode {
        for index in 0..self.events.len() {
            match std::mem::replace(&mut self.events[index], Event::Pending) {
                Event::Open { kind, wrapper } => self.open(kind, wrapper),
                Event::Token { kind, len } => self.token(kind, len),
                Event::Close => self.builder.finish_node(),
                Event::Pending => {}
            }
        }
        SyntaxNode::new_root(self.builder.finish())
    }

    /// Start `kind` and the chain of nodes that wrap it, outermost first.
    /// Each wrapper's slot is cleared so it is not started twice.
    fn open(&mut self, kind: SyntaxKind, mut wrapper: Option<usize>) {
        let mut chain = vec![kind];
        while let Some(slot) = wrapper {
            let Event::Open {
                kind,
                wrapper: next,
            } = std::mem::replace(&mut self.events[slot], Event::Pending)
            else {
                break;
            };
            chain.push(kind);
            wrapper = next;
        }
        for kind in chain.into_iter().rev() {
            self.builder.start_node(kind.into());
        }
    }

    fn token(&mut self, kind: SyntaxKind, len: usize) {
        let end = (self.cursor + len).min(self.tokens.len());
        let bytes: usize = self.tokens[self.cursor..end]
            .iter()
            .map(|token| token.text.len())
            .sum();
        let text = &self.source[self.offset..self.offset + bytes];
        self.builder.token(kind.into(), text);
        self.cursor = end;
        self.offset += bytes;
    }
}
