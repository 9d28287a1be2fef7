use rowan::{GreenNode, GreenNodeData, GreenToken, Language, NodeOrToken};

use refold_syntax::edit::{green_children, GreenElement};
use refold_syntax::{
    make, AstNode, BinaryExpression, CSharpLanguage, IfStatement, MethodDeclaration, SyntaxKind,
    SyntaxNode,
};

use super::{ConditionalFacts, SyntaxFacts, TriviaKind};

/// Facts for the reference front-end in `refold-syntax`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpFacts;

impl SyntaxFacts for CSharpFacts {
    type Language = CSharpLanguage;

    fn parameter_list(&self, method: &SyntaxNode) -> Option<SyntaxNode> {
        MethodDeclaration::cast(method.clone())?
            .parameter_list()
            .map(|list| list.syntax().clone())
    }

    fn trivia_kind(&self, kind: SyntaxKind) -> Option<TriviaKind> {
        match kind {
            SyntaxKind::Whitespace => Some(TriviaKind::Whitespace),
            SyntaxKind::Newline => Some(TriviaKind::EndOfLine),
            SyntaxKind::LineComment | SyntaxKind::BlockComment | SyntaxKind::DocComment => {
                Some(TriviaKind::Comment)
            }
            SyntaxKind::Directive => Some(TriviaKind::Directive),
            _ => None,
        }
    }

    fn whitespace_token(&self, text: &str) -> GreenToken {
        make::whitespace(text)
    }

    fn end_of_line_token(&self) -> GreenToken {
        make::newline("\n")
    }
}

impl ConditionalFacts for CSharpFacts {
    fn condition(&self, stmt: &SyntaxNode) -> Option<SyntaxNode> {
        IfStatement::cast(stmt.clone())?
            .condition()
            .map(|expr| expr.syntax().clone())
    }

    fn body(&self, stmt: &SyntaxNode) -> Option<SyntaxNode> {
        IfStatement::cast(stmt.clone())?
            .then_branch()
            .map(|body| body.syntax().clone())
    }

    fn to_conditional_form(&self, stmt: &SyntaxNode) -> GreenNode {
        let green = stmt.green();
        let children = green_children(&green)
            .into_iter()
            .filter(|child| kind_of(child) != SyntaxKind::ElseClause);
        GreenNode::new(green.kind(), children.collect::<Vec<_>>())
    }

    fn with_guard(&self, stmt: &GreenNodeData, guard: GreenNode) -> GreenNode {
        replace_first_child(stmt, SyntaxKind::is_expression, guard)
    }

    fn with_body(&self, stmt: &GreenNodeData, body: GreenNode) -> GreenNode {
        replace_first_child(stmt, SyntaxKind::is_statement, body)
    }

    fn wrap_in_block(&self, items: Vec<GreenElement>, trailing: Vec<GreenToken>) -> GreenNode {
        make::block(items, trailing)
    }

    fn is_logical_and(&self, expr: &SyntaxNode) -> bool {
        BinaryExpression::cast(expr.clone()).is_some_and(|binary| binary.is_logical_and())
    }

    fn keyword_text(&self, stmt: &SyntaxNode) -> Option<String> {
        IfStatement::cast(stmt.clone())?.keyword_text()
    }
}

fn kind_of(element: &GreenElement) -> SyntaxKind {
    let raw = match element {
        NodeOrToken::Node(node) => node.kind(),
        NodeOrToken::Token(token) => token.kind(),
    };
    CSharpLanguage::kind_from_raw(raw)
}

/// Replace the first child node whose kind matches `pred`.
///
/// Panics when there is no such child: the caller handed in a node of the wrong shape.
fn replace_first_child(
    node: &GreenNodeData,
    pred: fn(SyntaxKind) -> bool,
    replacement: GreenNode,
) -> GreenNode {
    let mut children = green_children(node);
    let slot = children
        .iter()
        .position(|child| child.as_node().is_some() && pred(kind_of(child)))
        .unwrap_or_else(|| {
            panic!(
                "{:?} has no child to replace",
                CSharpLanguage::kind_from_raw(node.kind())
            )
        });
    children[slot] = NodeOrToken::Node(replacement);
    GreenNode::new(node.kind(), children)
}
