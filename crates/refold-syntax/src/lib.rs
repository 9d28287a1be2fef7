//! Syntax tree and parsing primitives for Refold's reference front-end.
//!
//! The front-end covers a small C#-flavoured language: classes with base lists, methods,
//! properties, fields, blocks, `if`/`else`, `while`, `return`, locals, and expressions with
//! the usual precedence. It exists so that the refactorings in `refold-refactor` run against
//! real, lossless trees:
//! - [`parse`]: produces a full-fidelity rowan tree. Every byte of input, trivia included,
//!   ends up in exactly one token.
//! - [`ast`]: typed wrappers over the raw [`SyntaxNode`]s.
//! - [`make`]: green-tree constructors used by refactorings to synthesize new nodes.
//! - [`edit`]: persistent "replace one node, keep the rest" operations.

pub mod ast;
pub mod edit;
mod lexer;
pub mod make;
mod parser;
mod syntax_kind;

pub use ast::*;
pub use lexer::{lex, lex_with_errors, LexError, Lexer, Token};
pub use parser::{parse, Parse, SyntaxElement, SyntaxNode, SyntaxToken};
pub use syntax_kind::{CSharpLanguage, SyntaxKind};

pub use rowan::{GreenNode, GreenToken, NodeOrToken, TokenAtOffset};
pub use text_size::{TextRange, TextSize};

/// A syntax error recorded while parsing. Parsing never fails; errors are collected next to
/// the (still lossless) tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {range:?}")]
pub struct ParseError {
    pub message: String,
    pub range: TextRange,
}
