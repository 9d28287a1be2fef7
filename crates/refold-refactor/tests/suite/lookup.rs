use refold_refactor::{
    find_enclosing_node, relevant_method_declaration, Document, TextRange, TextSize,
};
use refold_syntax::{AstNode, ClassDeclaration, IfStatement, MethodDeclaration};

use super::caret_at;

const SRC: &str = "\
class C {
    int GetFoo() {
        if (a) { return 1; }
        return 2;
    }
}
";

#[test]
fn caret_on_name_finds_method() {
    let root = Document::parse(SRC).syntax();
    let method = relevant_method_declaration(&root, caret_at(SRC, "GetFoo", 2)).expect("method");
    assert_eq!(method.name().as_deref(), Some("GetFoo"));
}

#[test]
fn caret_right_before_body_brace_is_still_header() {
    let root = Document::parse(SRC).syntax();
    let method = relevant_method_declaration(&root, caret_at(SRC, "{\n        if", 0));
    assert!(method.is_some());
}

#[test]
fn caret_inside_body_is_not_header() {
    let root = Document::parse(SRC).syntax();
    assert!(relevant_method_declaration(&root, caret_at(SRC, "{\n        if", 1)).is_none());
    assert!(relevant_method_declaration(&root, caret_at(SRC, "return 2", 0)).is_none());
}

#[test]
fn enclosing_node_walks_up_from_caret() {
    let root = Document::parse(SRC).syntax();
    let stmt: IfStatement = find_enclosing_node(&root, caret_at(SRC, "(a)", 1)).expect("if");
    assert_eq!(stmt.syntax().to_string().trim(), "if (a) { return 1; }");

    let class: ClassDeclaration =
        find_enclosing_node(&root, caret_at(SRC, "C {", 0)).expect("class");
    assert_eq!(class.name().as_deref(), Some("C"));
}

#[test]
fn non_empty_selection_uses_covering_element() {
    let root = Document::parse(SRC).syntax();
    let start = SRC.find("GetFoo").unwrap() as u32;
    let selection = TextRange::new(TextSize::from(start), TextSize::from(start + 3));
    let method: MethodDeclaration = find_enclosing_node(&root, selection).expect("method");
    assert_eq!(method.name().as_deref(), Some("GetFoo"));
}

#[test]
fn selection_outside_the_tree_finds_nothing() {
    let root = Document::parse(SRC).syntax();
    let past_end = TextRange::empty(TextSize::from(SRC.len() as u32 + 10));
    assert!(find_enclosing_node::<MethodDeclaration>(&root, past_end).is_none());
}
