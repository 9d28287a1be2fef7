//! Language hooks for the refactoring algorithms.
//!
//! The algorithms in this crate never look at concrete syntax kinds. They ask a facts object
//! instead, so the same code runs over any rowan [`Language`] that provides these traits.

use rowan::{GreenNode, GreenNodeData, GreenToken, Language};

use refold_syntax::edit::GreenElement;

mod csharp;

pub use csharp::CSharpFacts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriviaKind {
    Whitespace,
    EndOfLine,
    Comment,
    Directive,
}

pub trait SyntaxFacts {
    type Language: Language;

    /// Parameter list of a method-like declaration.
    fn parameter_list(
        &self,
        method: &rowan::SyntaxNode<Self::Language>,
    ) -> Option<rowan::SyntaxNode<Self::Language>>;

    /// Classifies a token kind; `None` for significant tokens.
    fn trivia_kind(&self, kind: <Self::Language as Language>::Kind) -> Option<TriviaKind>;

    fn whitespace_token(&self, text: &str) -> GreenToken;

    fn end_of_line_token(&self) -> GreenToken;

    fn is_trivia(&self, kind: <Self::Language as Language>::Kind) -> bool {
        self.trivia_kind(kind).is_some()
    }

    fn is_whitespace_or_end_of_line_trivia(
        &self,
        kind: <Self::Language as Language>::Kind,
    ) -> bool {
        matches!(
            self.trivia_kind(kind),
            Some(TriviaKind::Whitespace | TriviaKind::EndOfLine)
        )
    }

    fn is_end_of_line_trivia(&self, kind: <Self::Language as Language>::Kind) -> bool {
        self.trivia_kind(kind) == Some(TriviaKind::EndOfLine)
    }

    fn is_directive_trivia(&self, kind: <Self::Language as Language>::Kind) -> bool {
        self.trivia_kind(kind) == Some(TriviaKind::Directive)
    }

    /// Kind of a green token of this language.
    fn token_kind(&self, token: &rowan::GreenTokenData) -> <Self::Language as Language>::Kind {
        <Self::Language as Language>::kind_from_raw(token.kind())
    }
}

/// Conditional statements (`if`) and their pieces.
///
/// Builders take and return green nodes so results can be assembled before anything is
/// attached to a tree.
pub trait ConditionalFacts: SyntaxFacts {
    /// The guard expression of a conditional statement.
    fn condition(
        &self,
        stmt: &rowan::SyntaxNode<Self::Language>,
    ) -> Option<rowan::SyntaxNode<Self::Language>>;

    /// The statement guarded by the condition.
    fn body(
        &self,
        stmt: &rowan::SyntaxNode<Self::Language>,
    ) -> Option<rowan::SyntaxNode<Self::Language>>;

    /// `stmt` as a plain conditional statement without alternative branches.
    fn to_conditional_form(&self, stmt: &rowan::SyntaxNode<Self::Language>) -> GreenNode;

    /// Replace the guard of a conditional statement.
    fn with_guard(&self, stmt: &GreenNodeData, guard: GreenNode) -> GreenNode;

    /// Replace the body of a conditional statement.
    fn with_body(&self, stmt: &GreenNodeData, body: GreenNode) -> GreenNode;

    /// A block statement around `items`, with `trailing` trivia after the closing brace.
    fn wrap_in_block(&self, items: Vec<GreenElement>, trailing: Vec<GreenToken>) -> GreenNode;

    fn is_logical_and(&self, expr: &rowan::SyntaxNode<Self::Language>) -> bool;

    /// Text of the statement's leading keyword (`if`).
    fn keyword_text(&self, stmt: &rowan::SyntaxNode<Self::Language>) -> Option<String>;
}
