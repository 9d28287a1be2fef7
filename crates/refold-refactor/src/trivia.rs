//! Leading and trailing trivia of green nodes.
//!
//! Trivia are ordinary tokens in a rowan tree. A node's leading trivia is the run of trivia
//! tokens before its first significant token, at any depth; its trailing trivia is the run after
//! its last significant token. Rewrites only rebuild the spine down to that token and share
//! every other subtree with the input.

use rowan::{GreenNode, GreenNodeData, GreenToken, NodeOrToken};

use refold_syntax::edit::{to_owned_element, GreenElement};

use crate::facts::SyntaxFacts;

pub fn leading_trivia<F: SyntaxFacts>(facts: &F, node: &GreenNodeData) -> Vec<GreenToken> {
    let mut out = Vec::new();
    collect_leading(facts, node, &mut out);
    out
}

pub fn trailing_trivia<F: SyntaxFacts>(facts: &F, node: &GreenNodeData) -> Vec<GreenToken> {
    let mut out = Vec::new();
    collect_trailing(facts, node, &mut out);
    out.reverse();
    out
}

/// `node` with its leading trivia replaced by `trivia`.
///
/// The new trivia is placed right before the first significant token, inside the innermost node
/// that holds it.
pub fn with_leading_trivia<F: SyntaxFacts>(
    facts: &F,
    node: &GreenNodeData,
    trivia: impl IntoIterator<Item = GreenToken>,
) -> GreenNode {
    let mut pending = Some(trivia.into_iter().collect::<Vec<_>>());
    let (rebuilt, _) = replace_leading(facts, node, &mut pending);
    match pending {
        // Nothing significant to attach to.
        Some(trivia) if !trivia.is_empty() => {
            let mut children: Vec<GreenElement> =
                trivia.into_iter().map(NodeOrToken::Token).collect();
            children.extend(rebuilt.children().map(to_owned_element));
            GreenNode::new(rebuilt.kind(), children)
        }
        _ => rebuilt,
    }
}

/// `node` with its trailing trivia replaced by `trivia`.
pub fn with_trailing_trivia<F: SyntaxFacts>(
    facts: &F,
    node: &GreenNodeData,
    trivia: impl IntoIterator<Item = GreenToken>,
) -> GreenNode {
    let mut pending = Some(trivia.into_iter().collect::<Vec<_>>());
    let (rebuilt, _) = replace_trailing(facts, node, &mut pending);
    match pending {
        Some(trivia) if !trivia.is_empty() => {
            let mut children: Vec<GreenElement> =
                rebuilt.children().map(to_owned_element).collect();
            children.extend(trivia.into_iter().map(NodeOrToken::Token));
            GreenNode::new(rebuilt.kind(), children)
        }
        _ => rebuilt,
    }
}

pub fn strip_leading_trivia<F: SyntaxFacts>(facts: &F, node: &GreenNodeData) -> GreenNode {
    with_leading_trivia(facts, node, Vec::new())
}

pub fn strip_trailing_trivia<F: SyntaxFacts>(facts: &F, node: &GreenNodeData) -> GreenNode {
    with_trailing_trivia(facts, node, Vec::new())
}

/// Strips both ends, leaving the node's significant text with its inner trivia.
pub fn trim_trivia<F: SyntaxFacts>(facts: &F, node: &GreenNodeData) -> GreenNode {
    let node = strip_leading_trivia(facts, node);
    strip_trailing_trivia(facts, &node)
}

/// Drops whitespace and line breaks before the first comment or directive of the leading
/// trivia. From there on the run is kept, including the layout up to the first token.
pub fn trim_leading_layout<F: SyntaxFacts>(facts: &F, node: &GreenNodeData) -> GreenNode {
    let leading = leading_trivia(facts, node);
    let kept = match leading.iter().position(|token| !is_layout(facts, token)) {
        Some(first) => leading[first..].to_vec(),
        None => Vec::new(),
    };
    with_leading_trivia(facts, node, kept)
}

/// Drops whitespace and line breaks after the last comment or directive of the trailing
/// trivia. The first line break after that comment stays so a line comment still ends its
/// line.
pub fn trim_trailing_layout<F: SyntaxFacts>(facts: &F, node: &GreenNodeData) -> GreenNode {
    let trailing = trailing_trivia(facts, node);
    let kept = match trailing.iter().rposition(|token| !is_layout(facts, token)) {
        Some(last) => {
            let end = trailing[last + 1..]
                .iter()
                .position(|token| facts.is_end_of_line_trivia(facts.token_kind(token)))
                .map_or(last + 1, |eol| last + eol + 2);
            trailing[..end].to_vec()
        }
        None => Vec::new(),
    };
    with_trailing_trivia(facts, node, kept)
}

/// Like [`trim_trivia`], but comments and directives at either end are kept.
pub fn trim_layout<F: SyntaxFacts>(facts: &F, node: &GreenNodeData) -> GreenNode {
    let node = trim_leading_layout(facts, node);
    trim_trailing_layout(facts, &node)
}

/// Concatenated text of a trivia run.
pub fn trivia_text(trivia: &[GreenToken]) -> String {
    trivia.iter().map(|token| token.text()).collect()
}

fn is_trivia<F: SyntaxFacts>(facts: &F, token: &rowan::GreenTokenData) -> bool {
    facts.is_trivia(facts.token_kind(token))
}

fn is_layout<F: SyntaxFacts>(facts: &F, token: &rowan::GreenTokenData) -> bool {
    facts.is_whitespace_or_end_of_line_trivia(facts.token_kind(token))
}

// Returns `true` once a significant token was reached.
fn collect_leading<F: SyntaxFacts>(
    facts: &F,
    node: &GreenNodeData,
    out: &mut Vec<GreenToken>,
) -> bool {
    for child in node.children() {
        match child {
            NodeOrToken::Token(token) if is_trivia(facts, token) => out.push(token.to_owned()),
            NodeOrToken::Token(_) => return true,
            NodeOrToken::Node(node) => {
                if collect_leading(facts, node, out) {
                    return true;
                }
            }
        }
    }
    false
}

// Pushes in reverse order.
fn collect_trailing<F: SyntaxFacts>(
    facts: &F,
    node: &GreenNodeData,
    out: &mut Vec<GreenToken>,
) -> bool {
    let children: Vec<_> = node.children().collect();
    for child in children.into_iter().rev() {
        match child {
            NodeOrToken::Token(token) if is_trivia(facts, token) => out.push(token.to_owned()),
            NodeOrToken::Token(_) => return true,
            NodeOrToken::Node(node) => {
                if collect_trailing(facts, node, out) {
                    return true;
                }
            }
        }
    }
    false
}

fn replace_leading<F: SyntaxFacts>(
    facts: &F,
    node: &GreenNodeData,
    pending: &mut Option<Vec<GreenToken>>,
) -> (GreenNode, bool) {
    let mut children: Vec<GreenElement> = Vec::new();
    let mut rest = node.children();
    let mut found = false;

    for child in rest.by_ref() {
        match child {
            NodeOrToken::Token(token) if is_trivia(facts, token) => {}
            NodeOrToken::Token(token) => {
                let trivia = pending.take().unwrap_or_default();
                children.extend(trivia.into_iter().map(NodeOrToken::Token));
                children.push(NodeOrToken::Token(token.to_owned()));
                found = true;
                break;
            }
            NodeOrToken::Node(inner) => {
                let (rebuilt, done) = replace_leading(facts, inner, pending);
                children.push(NodeOrToken::Node(rebuilt));
                if done {
                    found = true;
                    break;
                }
            }
        }
    }

    children.extend(rest.map(to_owned_element));
    (GreenNode::new(node.kind(), children), found)
}

fn replace_trailing<F: SyntaxFacts>(
    facts: &F,
    node: &GreenNodeData,
    pending: &mut Option<Vec<GreenToken>>,
) -> (GreenNode, bool) {
    let children: Vec<_> = node.children().collect();
    // Rebuilt children after the split point, last first.
    let mut tail: Vec<GreenElement> = Vec::new();

    for idx in (0..children.len()).rev() {
        let split = match children[idx] {
            NodeOrToken::Token(token) if is_trivia(facts, token) => continue,
            NodeOrToken::Token(token) => {
                let mut split = vec![NodeOrToken::Token(token.to_owned())];
                let trivia = pending.take().unwrap_or_default();
                split.extend(trivia.into_iter().map(NodeOrToken::Token));
                split
            }
            NodeOrToken::Node(inner) => {
                let (rebuilt, done) = replace_trailing(facts, inner, pending);
                if !done {
                    tail.push(NodeOrToken::Node(rebuilt));
                    continue;
                }
                vec![NodeOrToken::Node(rebuilt)]
            }
        };

        let mut out: Vec<GreenElement> = children[..idx]
            .iter()
            .map(|child| to_owned_element(child.clone()))
            .collect();
        out.extend(split);
        out.extend(tail.into_iter().rev());
        return (GreenNode::new(node.kind(), out), true);
    }

    tail.reverse();
    (GreenNode::new(node.kind(), tail), false)
}
