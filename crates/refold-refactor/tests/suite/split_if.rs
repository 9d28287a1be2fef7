use pretty_assertions::assert_eq;
use refold_config::FormattingConfig;
use refold_refactor::{
    split_condition, split_into_nested, split_into_nested_if_action, CSharpFacts,
    CancellationToken, Cancelled, Document, TextRange,
};
use refold_syntax::{AstNode, IfStatement, SyntaxKind, SyntaxNode};

use super::{annotated_text, caret_at};

fn method_body(statements: &str) -> String {
    format!("class C {{\n    void M() {{\n{statements}    }}\n}}\n")
}

fn apply_split(src: &str, selection: TextRange) -> Document {
    let document = Document::parse(src);
    let action = split_into_nested_if_action(&document, selection, &FormattingConfig::default())
        .expect("split offered");
    action
        .apply(&CancellationToken::new())
        .expect("not cancelled")
}

fn halves(src: &str, nth_and: usize) -> Option<(String, String)> {
    let root = Document::parse(src).syntax();
    let token = root
        .descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| token.kind() == SyntaxKind::AmpAmp)
        .nth(nth_and)
        .expect("&& token");
    let split = split_condition(&token)?;
    Some((
        SyntaxNode::new_root(split.left).to_string(),
        SyntaxNode::new_root(split.right).to_string(),
    ))
}

#[test]
fn split_condition_at_each_operator_of_a_chain() {
    let src = method_body("        if (a && b && c) { x(); }\n");
    assert_eq!(
        halves(&src, 0),
        Some(("a".to_string(), "b && c".to_string()))
    );
    assert_eq!(
        halves(&src, 1),
        Some(("a && b".to_string(), "c".to_string()))
    );
}

#[test]
fn split_condition_in_a_four_way_chain_keeps_operator_trivia() {
    let src = method_body("        if (a && b  &&  c && d) { x(); }\n");
    assert_eq!(
        halves(&src, 1),
        Some(("a && b".to_string(), "c && d".to_string()))
    );
}

#[test]
fn parentheses_and_other_operators_break_the_chain() {
    let parenthesized = method_body("        if ((a && b) && c) { x(); }\n");
    assert_eq!(halves(&parenthesized, 0), None);
    assert_eq!(
        halves(&parenthesized, 1),
        Some(("(a && b)".to_string(), "c".to_string()))
    );

    let mixed = method_body("        if (a || b && c) { x(); }\n");
    assert_eq!(halves(&mixed, 0), None);

    let outside_if = method_body("        bool ok = a && b;\n");
    assert_eq!(halves(&outside_if, 0), None);
}

#[test]
fn splits_braced_body_into_nested_statements() {
    let src = method_body("        if (a && b) {\n            x();\n        }\n");
    let document = apply_split(&src, caret_at(&src, "&&", 0));

    assert_eq!(
        document.text(),
        method_body(
            "        if (a) {\n            if (b) {\n            x();\n        }\n        }\n"
        )
    );
}

#[test]
fn block_on_its_own_line_keeps_its_indentation() {
    let src = method_body("        if (a && b)\n        {\n            x();\n        }\n");
    let document = apply_split(&src, caret_at(&src, "&&", 1));

    assert_eq!(
        document.text(),
        method_body(concat!(
            "        if (a)\n",
            "        {\n",
            "            if (b)\n",
            "        {\n",
            "            x();\n",
            "        }\n",
            "        }\n",
        ))
    );
}

#[test]
fn embedded_statement_body_is_kept_verbatim() {
    let src = method_body("        if (a && b)\n            x();\n");
    let document = apply_split(&src, caret_at(&src, "&&", 0));

    assert_eq!(
        document.text(),
        method_body(concat!(
            "        if (a)\n",
            "            {\n",
            "            if (b)\n",
            "            x();\n",
            "        }\n",
        ))
    );
}

#[test]
fn guards_rejoin_to_the_original_condition() {
    let src = method_body("        if (ready && count > 0 && !done) { go(); }\n");
    let document = apply_split(&src, caret_at(&src, "&& !done", 0));

    let outer = document
        .syntax()
        .descendants()
        .find_map(IfStatement::cast)
        .expect("outer if");
    let inner = outer
        .then_branch()
        .expect("block")
        .syntax()
        .descendants()
        .find_map(IfStatement::cast)
        .expect("inner if");

    let outer_guard = outer.condition().expect("outer guard").syntax().to_string();
    let inner_guard = inner.condition().expect("inner guard").syntax().to_string();
    assert_eq!(format!("{outer_guard} && {inner_guard}"), "ready && count > 0 && !done");
}

#[test]
fn label_names_the_statement_keyword() {
    let src = method_body("        if (a && b) { x(); }\n");
    let document = Document::parse(&src);
    let action = split_into_nested_if_action(
        &document,
        caret_at(&src, "&&", 0),
        &FormattingConfig::default(),
    )
    .expect("split offered");
    assert_eq!(action.label(), "Split into nested 'if' statements");
}

#[test]
fn not_offered_away_from_the_operator_or_with_else() {
    let formatting = FormattingConfig::default();

    let offered = |src: &str, needle: &str| {
        let document = Document::parse(src);
        split_into_nested_if_action(&document, caret_at(src, needle, 0), &formatting).is_some()
    };

    let src = method_body("        if (a && b) { x(); }\n");
    assert!(offered(&src, "&&"));
    assert!(!offered(&src, "a &&"));
    assert!(!offered(&src, "x()"));

    let with_else = method_body("        if (a && b) { x(); } else { y(); }\n");
    assert!(!offered(&with_else, "&&"));
}

#[test]
fn result_carries_a_formatter_annotation_over_the_new_statement() {
    let src = method_body("        if (a && b) {\n            x();\n        }\n");
    let document = apply_split(&src, caret_at(&src, "&&", 0));

    let ranges: Vec<_> = document.formatter_ranges().collect();
    assert_eq!(ranges.len(), 1);
    assert_eq!(
        annotated_text(&document, ranges[0]),
        "        if (a) {\n            if (b) {\n            x();\n        }\n        }\n"
    );
    assert_eq!(document.warnings().count(), 0);
}

#[test]
fn applying_leaves_the_input_untouched_and_is_repeatable() {
    let src = method_body("        if (a && b) { x(); }\n");
    let document = Document::parse(&src);
    let action = split_into_nested_if_action(
        &document,
        caret_at(&src, "&&", 0),
        &FormattingConfig::default(),
    )
    .expect("split offered");

    let first = action.apply(&CancellationToken::new()).expect("applied");
    let second = action.apply(&CancellationToken::new()).expect("applied");
    assert_eq!(first, second);
    assert_eq!(document.text(), src);
}

#[test]
fn tab_indentation_follows_formatting_config() {
    let src = method_body("        if (a && b) {\n            x();\n        }\n");
    let document = Document::parse(&src);
    let formatting = FormattingConfig {
        use_tabs: true,
        ..FormattingConfig::default()
    };
    let action = split_into_nested_if_action(&document, caret_at(&src, "&&", 0), &formatting)
        .expect("split offered");
    let document = action.apply(&CancellationToken::new()).expect("applied");
    assert!(document.text().contains("        \tif (b) {"));
}

#[test]
fn cancelled_token_stops_apply() {
    let src = method_body("        if (a && b) { x(); }\n");
    let document = Document::parse(&src);
    let action = split_into_nested_if_action(
        &document,
        caret_at(&src, "&&", 0),
        &FormattingConfig::default(),
    )
    .expect("split offered");

    let cancel = CancellationToken::new();
    cancel.cancel();
    assert_eq!(action.apply(&cancel), Err(Cancelled));
}

#[test]
#[should_panic(expected = "logical AND")]
fn splitting_a_non_and_guard_panics() {
    let src = method_body("        if (a || b) { x(); }\n");
    let document = Document::parse(&src);
    let root = document.syntax();
    let stmt = root
        .descendants()
        .find(|node| node.kind() == SyntaxKind::IfStatement)
        .expect("if");
    let left = refold_syntax::parse("a").green;
    let right = refold_syntax::parse("b").green;
    split_into_nested(&CSharpFacts, &root, &stmt, left, right, "    ");
}

#[test]
fn original_body_is_shared_with_the_inner_statement() {
    let src = method_body("        if (a && b) {\n            x();\n        }\n");
    let document = Document::parse(&src);
    let before = document
        .syntax()
        .descendants()
        .find_map(IfStatement::cast)
        .and_then(|stmt| stmt.then_branch())
        .expect("body");

    let after = apply_split(&src, caret_at(&src, "&&", 0));
    let inner = after
        .syntax()
        .descendants()
        .filter_map(IfStatement::cast)
        .nth(1)
        .and_then(|stmt| stmt.then_branch())
        .expect("inner body");

    assert_eq!(inner.syntax().to_string(), before.syntax().to_string());
    assert!(std::ptr::eq(
        &*inner.syntax().green(),
        &*before.syntax().green()
    ));
}

#[test]
fn one_line_statement_keeps_its_body_untouched() {
    let src = "class C { void M() { if (a && b) { x(); } } }";
    let document = Document::parse(src);
    let before = document
        .syntax()
        .descendants()
        .find_map(IfStatement::cast)
        .and_then(|stmt| stmt.then_branch())
        .expect("body");

    let after = apply_split(src, caret_at(src, "&&", 0));
    assert_eq!(
        after.text(),
        "class C { void M() { if (a) {\n    if (b) { x(); } \n} } }"
    );

    let inner = after
        .syntax()
        .descendants()
        .filter_map(IfStatement::cast)
        .nth(1)
        .and_then(|stmt| stmt.then_branch())
        .expect("inner body");
    assert_eq!(inner.syntax().to_string(), "{ x(); } ");
    assert!(std::ptr::eq(
        &*inner.syntax().green(),
        &*before.syntax().green()
    ));
}
