use std::sync::Arc;

use pretty_assertions::assert_eq;
use refold_refactor::trivia::{leading_trivia, trailing_trivia, trivia_text};
use refold_refactor::{
    merge_leading_trivia, CSharpFacts, Document, FileId, GetAndSetMethods, Location,
    MethodSymbol, TextRange,
};
use refold_syntax::{AstNode, CSharpLanguage, MethodDeclaration, SyntaxNode};

fn symbol(name: &str) -> Arc<MethodSymbol> {
    Arc::new(MethodSymbol {
        name: name.to_string(),
        containing_type: "C".to_string(),
        arity: 0,
        overridden: None,
        locations: vec![Location::Source {
            file: FileId::new("C.cs"),
            range: TextRange::default(),
        }],
    })
}

fn methods(src: &str) -> Vec<SyntaxNode> {
    Document::parse(src)
        .syntax()
        .descendants()
        .filter_map(MethodDeclaration::cast)
        .map(|method| method.syntax().clone())
        .collect()
}

fn pair(getter: SyntaxNode, setter: Option<SyntaxNode>) -> GetAndSetMethods<CSharpLanguage> {
    GetAndSetMethods {
        get_method: symbol("GetFoo"),
        get_declaration: getter,
        set_method: setter.as_ref().map(|_| symbol("SetFoo")),
        set_declaration: setter,
    }
}

/// Leading trivia that `merge_leading_trivia` puts on a copy of the getter.
fn merged(src: &str) -> String {
    let mut methods = methods(src).into_iter();
    let getter = methods.next().expect("getter");
    let setter = methods.next();
    let pair = pair(getter.clone(), setter);

    let result = merge_leading_trivia(&CSharpFacts, &pair, &getter);
    trivia_text(&leading_trivia(&CSharpFacts, &result.green()))
}

#[test]
fn getter_only_keeps_its_leading_trivia() {
    let src = "class C {\n    /// Docs.\n    int GetFoo() { return 1; }\n}\n";
    assert_eq!(merged(src), "    /// Docs.\n    ");
}

#[test]
fn same_line_comment_after_parameter_list_is_kept() {
    let src = "class C {\n    int GetFoo() // note\n    { return 1; }\n}\n";
    assert_eq!(merged(src), "     // note\n");
}

#[test]
fn plain_layout_after_parameter_lists_is_dropped() {
    let src = concat!(
        "class C {\n",
        "    int GetFoo()\n",
        "    { return 1; }\n",
        "    void SetFoo(int v)   \n",
        "    { }\n",
        "}\n",
    );
    assert_eq!(merged(src), "        ");
}

#[test]
fn pieces_are_ordered_getter_then_setter() {
    let src = "\
class C {
    // g
    int GetFoo() /* g2 */ { return 1; }
    // s
    void SetFoo(int v) // s2
    { }
}
";
    let expected = [
        "    // g\n    ",
        " /* g2 */ ",
        "    // s\n    ",
        " // s2\n",
    ]
    .concat();
    assert_eq!(merged(src), expected);
}

#[test]
fn setter_line_breaks_before_its_first_token_are_skipped() {
    let src = "class C {\n    int GetFoo() { return 1; }\n\n\n    void SetFoo(int v) { }\n}\n";
    assert_eq!(merged(src), "        ");
}

#[test]
fn directives_are_dropped_from_the_setter_only() {
    let src = "\
class C {
#if DEBUG
    int GetFoo() { return 1; }
#endif
    void SetFoo(int v) { }
}
";
    assert_eq!(merged(src), "#if DEBUG\n    \n    ");
}

#[test]
fn target_keeps_everything_but_its_leading_trivia() {
    let src = "class C {\n    // lead\n    int GetFoo() { return 1; } // tail\n}\n";
    let getter = methods(src).remove(0);
    let pair = pair(getter.clone(), None);

    let result = merge_leading_trivia(&CSharpFacts, &pair, &getter);
    assert_eq!(result.to_string(), getter.to_string());
    assert_eq!(
        trivia_text(&trailing_trivia(&CSharpFacts, &result.green())),
        " // tail\n"
    );
}
