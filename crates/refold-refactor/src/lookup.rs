use rowan::{NodeOrToken, TokenAtOffset};
use text_size::TextRange;

use refold_syntax::{AstNode, MethodDeclaration, SyntaxNode, SyntaxToken};

/// The nearest node of type `N` around `selection`.
///
/// An empty selection looks at the token under the caret; between two tokens the right one is
/// tried first. A non-empty selection starts from the element covering it.
pub fn find_enclosing_node<N: AstNode>(root: &SyntaxNode, selection: TextRange) -> Option<N> {
    if !root.text_range().contains_range(selection) {
        return None;
    }

    if selection.is_empty() {
        return match root.token_at_offset(selection.start()) {
            TokenAtOffset::None => None,
            TokenAtOffset::Single(token) => enclosing(&token),
            TokenAtOffset::Between(left, right) => {
                enclosing(&right).or_else(|| enclosing(&left))
            }
        };
    }

    match root.covering_element(selection) {
        NodeOrToken::Node(node) => node.ancestors().find_map(N::cast),
        NodeOrToken::Token(token) => enclosing(&token),
    }
}

fn enclosing<N: AstNode>(token: &SyntaxToken) -> Option<N> {
    token.parent_ancestors().find_map(N::cast)
}

/// The method whose header (everything before the body's `{`) contains the caret.
pub fn relevant_method_declaration(
    root: &SyntaxNode,
    selection: TextRange,
) -> Option<MethodDeclaration> {
    let method = find_enclosing_node::<MethodDeclaration>(root, selection)?;
    if selection.start() > method.header_end() {
        tracing::trace!("selection is inside the method body");
        return None;
    }
    Some(method)
}
