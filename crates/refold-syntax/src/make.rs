//! Green-tree constructors for synthesized syntax.
//!
//! Constructors never add formatting beyond single spaces between tokens; callers decide the
//! surrounding trivia. Nodes passed in are embedded as-is, so their green data is shared with
//! whatever tree they came from.

use rowan::{GreenNode, GreenToken, NodeOrToken};

use crate::edit::GreenElement;
use crate::SyntaxKind;

pub fn token(kind: SyntaxKind, text: &str) -> GreenToken {
    GreenToken::new(kind.into(), text)
}

/// A token whose text is fixed by its kind (`{`, `&&`, `get`, ...).
pub fn punct(kind: SyntaxKind) -> GreenToken {
    let text = kind
        .static_text()
        .unwrap_or_else(|| panic!("{kind:?} has no fixed text"));
    token(kind, text)
}

pub fn ident(name: &str) -> GreenToken {
    token(SyntaxKind::Identifier, name)
}

pub fn whitespace(text: &str) -> GreenToken {
    token(SyntaxKind::Whitespace, text)
}

pub fn newline(text: &str) -> GreenToken {
    token(SyntaxKind::Newline, text)
}

fn space() -> GreenElement {
    NodeOrToken::Token(whitespace(" "))
}

/// `{ <items> }` followed by `trailing` trivia. `items` must carry their own trivia.
pub fn block(
    items: impl IntoIterator<Item = GreenElement>,
    trailing: impl IntoIterator<Item = GreenToken>,
) -> GreenNode {
    let mut children: Vec<GreenElement> = vec![NodeOrToken::Token(punct(SyntaxKind::LBrace))];
    children.extend(items);
    children.push(NodeOrToken::Token(punct(SyntaxKind::RBrace)));
    children.extend(trailing.into_iter().map(NodeOrToken::Token));
    GreenNode::new(SyntaxKind::Block.into(), children)
}

/// `get <body>` / `set <body>`.
pub fn accessor_declaration(keyword: SyntaxKind, body: GreenNode) -> GreenNode {
    assert!(
        matches!(keyword, SyntaxKind::GetKw | SyntaxKind::SetKw),
        "accessor keyword must be `get` or `set`, got {keyword:?}"
    );
    GreenNode::new(
        SyntaxKind::AccessorDeclaration.into(),
        vec![
            NodeOrToken::Node(GreenNode::new(
                SyntaxKind::Modifiers.into(),
                Vec::<GreenElement>::new(),
            )),
            NodeOrToken::Token(punct(keyword)),
            space(),
            NodeOrToken::Node(body),
        ],
    )
}

/// `<modifiers> <ty> <name> { <accessors> }` followed by `trailing` trivia.
///
/// `modifiers` and `ty` are embedded unchanged, so any trivia they carry (for example the space
/// after the type) is kept.
pub fn property_declaration(
    modifiers: GreenNode,
    ty: GreenNode,
    name: &str,
    accessors: impl IntoIterator<Item = GreenNode>,
    trailing: impl IntoIterator<Item = GreenToken>,
) -> GreenNode {
    let mut list: Vec<GreenElement> = vec![NodeOrToken::Token(punct(SyntaxKind::LBrace))];
    for accessor in accessors {
        list.push(space());
        list.push(NodeOrToken::Node(accessor));
    }
    list.push(space());
    list.push(NodeOrToken::Token(punct(SyntaxKind::RBrace)));
    list.extend(trailing.into_iter().map(NodeOrToken::Token));

    GreenNode::new(
        SyntaxKind::PropertyDeclaration.into(),
        vec![
            NodeOrToken::Node(modifiers),
            NodeOrToken::Node(ty),
            NodeOrToken::Token(ident(name)),
            space(),
            NodeOrToken::Node(GreenNode::new(SyntaxKind::AccessorList.into(), list)),
        ],
    )
}
