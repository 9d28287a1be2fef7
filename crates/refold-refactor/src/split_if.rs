//! Split `if (a && b) body` into `if (a) { if (b) body }`.

use rowan::{GreenNode, GreenToken, NodeOrToken};
use text_size::TextRange;
use tokio_util::sync::CancellationToken;

use refold_config::FormattingConfig;
use refold_syntax::edit::{self, green_children};
use refold_syntax::{
    AstNode, BinaryExpression, IfStatement, SyntaxKind, SyntaxNode, SyntaxToken, TokenAtOffset,
};

use crate::action::{check_cancelled, TransformAction};
use crate::document::{AnnotationKind, Document};
use crate::facts::{CSharpFacts, ConditionalFacts, TriviaKind};
use crate::trivia;

/// The two halves of an `if` guard around one `&&` operator.
#[derive(Debug, Clone)]
pub struct SplitCondition {
    pub statement: IfStatement,
    /// Everything left of the operator, without surrounding trivia.
    pub left: GreenNode,
    /// Everything right of the operator, without surrounding trivia.
    pub right: GreenNode,
}

/// Split the guard of the enclosing `if` at `token`.
///
/// `token` must be an `&&` that is part of the top-level `&&` chain of an `if` condition. In
/// `a && b && c`, splitting at the first operator gives `a` and `b && c`; at the second,
/// `a && b` and `c`. Parentheses and other operators break the chain.
pub fn split_condition(token: &SyntaxToken) -> Option<SplitCondition> {
    if token.kind() != SyntaxKind::AmpAmp {
        return None;
    }
    let binary = token.parent().and_then(BinaryExpression::cast)?;
    if binary.op_token().as_ref() != Some(token) {
        return None;
    }

    let left = binary.lhs()?;
    let mut right = binary.rhs()?.syntax().green().into_owned();

    // Re-parent the right operand under every enclosing `&&` whose left side we came from,
    // reusing their operator tokens and trivia.
    let mut current = binary.syntax().clone();
    loop {
        let parent = current.parent()?;
        if let Some(statement) = IfStatement::cast(parent.clone()) {
            let is_condition = statement
                .condition()
                .is_some_and(|condition| *condition.syntax() == current);
            if !is_condition {
                return None;
            }
            let facts = CSharpFacts;
            return Some(SplitCondition {
                statement,
                left: trivia::trim_trivia(&facts, &left.syntax().green()),
                right: trivia::trim_trivia(&facts, &right),
            });
        }

        let outer = BinaryExpression::cast(parent)?;
        let came_from_lhs = outer
            .lhs()
            .is_some_and(|lhs| *lhs.syntax() == current);
        if !outer.is_logical_and() || !came_from_lhs {
            return None;
        }

        let outer_green = outer.syntax().green();
        let mut children = green_children(&outer_green);
        children[current.index()] = NodeOrToken::Node(right);
        right = GreenNode::new(outer_green.kind(), children);
        current = outer.syntax().clone();
    }
}

/// Replace `stmt` inside `root` by two nested statements guarded by `left` and `right`.
///
/// The outer statement keeps `stmt`'s leading trivia and gets a new block. The inner statement
/// is indented one `indent_unit` deeper than `stmt` and keeps the original body untouched. The
/// new block's `}` gets a copy of `stmt`'s trailing trivia. The result carries a formatter
/// annotation over the outer statement.
///
/// # Panics
///
/// Panics if `stmt` does not belong to `root` or its guard is not a logical AND.
pub fn split_into_nested<F: ConditionalFacts>(
    facts: &F,
    root: &rowan::SyntaxNode<F::Language>,
    stmt: &rowan::SyntaxNode<F::Language>,
    left: GreenNode,
    right: GreenNode,
    indent_unit: &str,
) -> Document {
    assert!(
        stmt.ancestors().last().as_ref() == Some(root),
        "statement does not belong to the given root"
    );
    let guard = facts
        .condition(stmt)
        .expect("conditional statement without a guard");
    assert!(
        facts.is_logical_and(&guard),
        "guard must be a logical AND to be split"
    );

    let stmt_green = stmt.green();
    let leading = trivia::leading_trivia(facts, &stmt_green);
    let trailing = trivia::trailing_trivia(facts, &stmt_green);
    let indent = indentation(facts, &leading);

    let inner = facts.with_guard(&facts.to_conditional_form(stmt), right);
    let inner = trivia::with_leading_trivia(
        facts,
        &inner,
        [facts.whitespace_token(&format!("{indent}{indent_unit}"))],
    );
    // The inner statement, and with it the original body, stays as it is; a missing line
    // break before the closing brace gets a token of its own.
    let inner_ends_line = trivia::trailing_trivia(facts, &inner)
        .last()
        .is_some_and(|token| facts.is_end_of_line_trivia(facts.token_kind(token)));

    let mut items = vec![
        NodeOrToken::Token(facts.end_of_line_token()),
        NodeOrToken::Node(inner),
    ];
    if !inner_ends_line {
        items.push(NodeOrToken::Token(facts.end_of_line_token()));
    }
    if !indent.is_empty() {
        items.push(NodeOrToken::Token(facts.whitespace_token(&indent)));
    }
    let block = facts.wrap_in_block(items, trailing);
    // The new block sits where the old body was, so it takes over its leading trivia.
    let body_leading = facts
        .body(stmt)
        .map(|body| trivia::leading_trivia(facts, &body.green()))
        .unwrap_or_default();
    let block = trivia::with_leading_trivia(facts, &block, body_leading);
    let outer = facts.with_guard(&facts.with_body(&stmt_green, block), left);

    let range = TextRange::at(stmt.text_range().start(), outer.text_len());
    let new_root = edit::replace_node(stmt, outer);
    tracing::debug!(?range, "split conditional into nested statements");

    Document::from_root(&new_root).with_annotation(AnnotationKind::Formatter, range)
}

/// Whitespace after the last line break of a leading trivia run.
fn indentation<F: ConditionalFacts>(facts: &F, leading: &[GreenToken]) -> String {
    let mut indent: Vec<&str> = leading
        .iter()
        .rev()
        .take_while(|token| {
            facts.trivia_kind(facts.token_kind(token)) == Some(TriviaKind::Whitespace)
        })
        .map(|token| token.text())
        .collect();
    indent.reverse();
    indent.concat()
}

/// Offer "split into nested if" for the `&&` under the caret.
///
/// Not offered when the statement has an `else` clause: splitting would change which inputs
/// reach it.
pub fn split_into_nested_if_action(
    document: &Document,
    selection: TextRange,
    formatting: &FormattingConfig,
) -> Option<TransformAction> {
    let root = document.syntax();
    if !root.text_range().contains_range(selection) {
        return None;
    }

    let token = and_token_at(&root, selection)?;
    let split = split_condition(&token)?;
    if split.statement.else_clause().is_some() {
        tracing::debug!("not offering split: statement has an else clause");
        return None;
    }

    let facts = CSharpFacts;
    let keyword = facts.keyword_text(split.statement.syntax())?;
    let label = format!("Split into nested '{keyword}' statements");
    tracing::debug!(%label, "offering split");

    let green = document.green().clone();
    let range = split.statement.syntax().text_range();
    let SplitCondition { left, right, .. } = split;
    let indent_unit = formatting.indent_unit();

    Some(TransformAction::new(
        label,
        move |cancel: &CancellationToken| {
            check_cancelled(cancel)?;
            let root = SyntaxNode::new_root(green.clone());
            let stmt = root
                .descendants()
                .find(|node| node.kind() == SyntaxKind::IfStatement && node.text_range() == range)
                .expect("statement captured when the action was created");

            let document = split_into_nested(
                &facts,
                &root,
                &stmt,
                left.clone(),
                right.clone(),
                &indent_unit,
            );
            check_cancelled(cancel)?;
            Ok(document)
        },
    ))
}

fn and_token_at(root: &SyntaxNode, selection: TextRange) -> Option<SyntaxToken> {
    let is_and = |token: &SyntaxToken| token.kind() == SyntaxKind::AmpAmp;
    if selection.is_empty() {
        return match root.token_at_offset(selection.start()) {
            TokenAtOffset::None => None,
            TokenAtOffset::Single(token) => Some(token).filter(is_and),
            TokenAtOffset::Between(left, right) => {
                Some(right).filter(is_and).or(Some(left).filter(is_and))
            }
        };
    }

    // A non-empty selection must lie within the operator.
    root.token_at_offset(selection.start())
        .right_biased()
        .filter(|token| is_and(token) && token.text_range().contains_range(selection))
}
