//! # markup-text-syntax
//!
//! A lossless, error-tolerant HTML syntax tree using [Rowan] + [Logos],
//! following the [rust-analyzer] architecture model.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! ## What is a Lossless CST?
//!
//! Unlike a DOM, which discards the exact spelling of the markup, a Concrete
//! Syntax Tree (CST) preserves **every byte** of the original source: quotes,
//! whitespace inside tags, stray `<` characters, broken tags - everything.
//! This matters for untrusted input:
//!
//! - **No silent repair**: Malformed constructs are kept as ERROR nodes, so
//!   consumers decide what to do with them rather than inheriting a guess
//! - **No execution**: Parsing only classifies bytes; scripts are raw text
//! - **Accurate diagnostics**: Every node maps exactly to a source range
//!
//! ## Architecture Overview
//!
//! The parsing pipeline has three stages:
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Events → Sink → Rowan Tree
//!               (Logos)          (Grammar)        (GreenNodeBuilder)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! The lexer uses [Logos] to tokenize input into a flat sequence of tokens,
//! switching between content mode and tag mode.
//!
//! ```text
//! "<b class=x>Hi</b>" → [TAG_OPEN, WHITESPACE, ATTR_NAME, EQ, ATTR_VALUE, GT,
//!                        TEXT, END_TAG_OPEN, GT]
//! ```
//!
//! ### 2. Parser ([`parser`] module)
//!
//! The parser consumes tokens and emits **events** (Open, Token, Close).
//! It keeps the open elements on an explicit stack, so nesting depth never
//! becomes recursion depth.
//!
//! ### 3. Sink ([`parser::sink`] module)
//!
//! The sink consumes events and builds a Rowan green tree using
//! `GreenNodeBuilder`. The resulting tree is immutable and can be
//! cheaply cloned (it's reference-counted internally).
//!
//! ## Module Structure
//!
//! ```text
//! markup-text-syntax/
//! ├── lib.rs           # This file - public API and integration tests
//! ├── syntax_kind.rs   # SyntaxKind enum (tokens + nodes) and Rowan integration
//! ├── elements.rs      # Void, raw-text and implied-close element tables
//! ├── lexer.rs         # Logos-based tokenizer
//! ├── ast.rs           # Typed Element / StartTag / Attribute views
//! └── parser/
//!     ├── mod.rs       # Parser cursor, markers, public parse() function
//!     ├── event.rs     # Event enum (Open, Token, Close, Pending)
//!     ├── sink.rs      # Converts events to Rowan GreenNode
//!     └── grammar/
//!         ├── mod.rs   # Document loop and open-element stack
//!         └── tag.rs   # Start tags, end tags, attributes
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use markup_text_syntax::{parse, SyntaxKind};
//! use markup_text_syntax::ast::Element;
//!
//! let tree = parse("<p>Hello</p>");
//!
//! // The tree preserves all text
//! assert_eq!(tree.text().to_string(), "<p>Hello</p>");
//!
//! // Navigate the tree structure
//! assert_eq!(tree.kind(), SyntaxKind::ROOT);
//! let element = tree.children().find_map(Element::cast).unwrap();
//! assert_eq!(element.name(), "p");
//! ```

pub mod ast;
pub mod elements;
pub mod lexer;
pub mod parser;
pub mod syntax_kind;

pub use parser::parse;
pub use syntax_kind::{HtmlLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
