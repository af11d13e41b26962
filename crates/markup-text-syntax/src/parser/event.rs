//! What the grammar records instead of building nodes directly.
//!
//! `<b>x</b>` becomes:
//!
//! ```text
//! 0  Open ROOT
//! 1  Open START_TAG  wrapper: 5
//! 2    Token TAG_OPEN "<b"
//! 3    Token GT ">"
//! 4  Close
//! 5  Open ELEMENT              (reserved by precede, completed by </b>)
//! 6    Token TEXT "x"
//! 7    Open END_TAG
//! 8      Token END_TAG_OPEN "</b"
//! 9      Token GT ">"
//! 10   Close
//! 11 Close                     (ELEMENT)
//! 12 Close                     (ROOT)
//! ```
//!
//! The sink opens event 5 when it reaches event 1, so ELEMENT ends up
//! around START_TAG, and skips event 5 when it gets there.

use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Start a node. `wrapper` is the slot of an `Open` that must be started
    /// first, as this node's parent.
    Open {
        kind: SyntaxKind,
        wrapper: Option<usize>,
    },

    /// One tree token made of `len` consecutive lexer tokens.
    Token { kind: SyntaxKind, len: usize },

    Close,

    /// A slot reserved by an open marker, or one the sink already used.
    Pending,
}

impl Event {
    pub fn open(kind: SyntaxKind) -> Self {
        Event::Open {
            kind,
            wrapper: None,
        }
    }

    pub fn token(kind: SyntaxKind) -> Self {
        Event::Token { kind, len: 1 }
    }
}
