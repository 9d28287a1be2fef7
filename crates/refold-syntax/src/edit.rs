//! Persistent tree edits.
//!
//! Every edit returns a new root. Green nodes of untouched subtrees are shared with the input
//! tree, and only the spine from the edited node up to the root is reallocated. The input tree
//! stays valid and unchanged.

use rowan::{GreenNode, GreenNodeData, GreenToken, Language, NodeOrToken};

pub type GreenElement = NodeOrToken<GreenNode, GreenToken>;

/// Replace `old` with `new` and return the root of the resulting tree.
pub fn replace_node<L: Language>(
    old: &rowan::SyntaxNode<L>,
    new: GreenNode,
) -> rowan::SyntaxNode<L> {
    rowan::SyntaxNode::new_root(old.replace_with(new))
}

/// Rebuild `parent` by mapping each direct child. `map` receives the child's index and element
/// and returns the replacement, or `None` to drop the child.
pub fn map_children<L: Language>(
    parent: &rowan::SyntaxNode<L>,
    mut map: impl FnMut(usize, GreenElement) -> Option<GreenElement>,
) -> rowan::SyntaxNode<L> {
    let green = parent.green();
    let children: Vec<GreenElement> = green
        .children()
        .enumerate()
        .filter_map(|(idx, child)| map(idx, to_owned_element(child)))
        .collect();
    let rebuilt = GreenNode::new(green.kind(), children);
    replace_node(parent, rebuilt)
}

/// Owned copy of the children of a green node.
pub fn green_children(node: &GreenNodeData) -> Vec<GreenElement> {
    node.children().map(to_owned_element).collect()
}

pub fn to_owned_element(
    element: NodeOrToken<&GreenNodeData, &rowan::GreenTokenData>,
) -> GreenElement {
    match element {
        NodeOrToken::Node(node) => NodeOrToken::Node(node.to_owned()),
        NodeOrToken::Token(token) => NodeOrToken::Token(token.to_owned()),
    }
}
