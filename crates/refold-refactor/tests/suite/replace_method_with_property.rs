use pretty_assertions::assert_eq;
use refold_config::AccessorConfig;
use refold_refactor::{
    replace_method_with_property_action, CancellationToken, Cancelled, Document, FileId,
    MetadataMethod, MetadataType, SymbolIndex, TextRange, TransformAction,
    METHOD_OVERRIDES_METADATA_WARNING,
};

use super::{annotated_text, caret_at};

struct Fixture {
    file: FileId,
    document: Document,
    index: SymbolIndex,
}

impl Fixture {
    fn new(src: &str) -> Self {
        let file = FileId::new("Widget.cs");
        let document = Document::parse(src);
        let mut index = SymbolIndex::new();
        index.add_file(file.clone(), document.green().clone());
        Self {
            file,
            document,
            index,
        }
    }

    fn action(&self, selection: TextRange) -> Option<TransformAction> {
        self.action_with(selection, &AccessorConfig::default())
    }

    fn action_with(
        &self,
        selection: TextRange,
        config: &AccessorConfig,
    ) -> Option<TransformAction> {
        replace_method_with_property_action(
            &self.file,
            &self.document,
            &self.index,
            selection,
            config,
        )
    }
}

fn apply(action: &TransformAction) -> Document {
    action
        .apply(&CancellationToken::new())
        .expect("not cancelled")
}

#[test]
fn getter_and_setter_become_one_property() {
    let src = "\
class C
{
    // Gets foo.
    public int GetFoo() // note
    {
        return foo;
    }

    public void SetFoo(int v)
    {
        foo = v;
    }
}
";
    let fixture = Fixture::new(src);
    let action = fixture
        .action(caret_at(src, "GetFoo", 0))
        .expect("replacement offered");
    assert_eq!(action.label(), "Replace 'GetFoo' and 'SetFoo' with property");

    let document = apply(&action);
    assert_eq!(
        document.text(),
        "\
class C
{
    // Gets foo.
     // note
    public int Foo { get {
        return foo;
    } set {
        foo = value;
    } }
}
"
    );
    assert_eq!(document.warnings().count(), 0);
}

#[test]
fn getter_without_setter_becomes_read_only_property() {
    let src = "class C {\n    int GetCount() { return count; }\n}\n";
    let fixture = Fixture::new(src);
    let action = fixture
        .action(caret_at(src, "GetCount", 3))
        .expect("replacement offered");
    assert_eq!(action.label(), "Replace 'GetCount' with property");

    let document = apply(&action);
    assert_eq!(
        document.text(),
        "class C {\n    int Count { get { return count; } }\n}\n"
    );

    let ranges: Vec<_> = document.formatter_ranges().collect();
    assert_eq!(ranges.len(), 1);
    assert_eq!(
        annotated_text(&document, ranges[0]),
        "    int Count { get { return count; } }\n"
    );
}

#[test]
fn setter_declared_first_is_still_merged() {
    let src = "\
class C {
    void SetFoo(int v) { foo = v; }
    int GetFoo() { return foo; }
}
";
    let fixture = Fixture::new(src);
    let document = apply(&fixture.action(caret_at(src, "GetFoo", 0)).expect("offered"));

    let property = "        int Foo { get { return foo; } set { foo = value; } }\n";
    assert_eq!(document.text(), format!("class C {{\n{property}}}\n"));
    let range = document.formatter_ranges().next().expect("formatter annotation");
    assert_eq!(annotated_text(&document, range), property);
}

#[test]
fn setter_parameter_is_renamed_but_member_names_are_not() {
    let src = "\
class C {
    int GetV() { return v; }
    void SetV(int v) { this.v = v; }
}
";
    let fixture = Fixture::new(src);
    let document = apply(&fixture.action(caret_at(src, "GetV", 0)).expect("offered"));
    assert!(
        document.text().contains("set { this.v = value; }"),
        "{}",
        document.text()
    );
}

#[test]
fn setter_with_mismatched_parameter_type_is_ignored() {
    let src = "\
class C {
    int GetFoo() { return foo; }
    void SetFoo(string v) { }
}
";
    let fixture = Fixture::new(src);
    let action = fixture
        .action(caret_at(src, "GetFoo", 0))
        .expect("replacement offered");
    assert_eq!(action.label(), "Replace 'GetFoo' with property");
    assert!(apply(&action).text().contains("void SetFoo(string v) { }"));
}

#[test]
fn configured_prefixes_are_used() {
    let src = "\
class C {
    bool IsReady() { return ready; }
    void MarkReady(bool r) { ready = r; }
}
";
    let fixture = Fixture::new(src);
    let config = AccessorConfig {
        get_prefixes: vec!["Get".to_string(), "Is".to_string()],
        set_prefixes: vec!["Set".to_string(), "Mark".to_string()],
    };

    assert!(fixture.action(caret_at(src, "IsReady", 0)).is_none());
    let action = fixture
        .action_with(caret_at(src, "IsReady", 0), &config)
        .expect("replacement offered");
    assert_eq!(action.label(), "Replace 'IsReady' and 'MarkReady' with property");
    assert!(apply(&action)
        .text()
        .contains("bool Ready { get { return ready; } set { ready = value; } }"));
}

#[test]
fn override_of_metadata_method_adds_a_warning() {
    let src = "class Derived : Base {\n    public override int GetValue() { return 1; }\n}\n";
    let mut fixture = Fixture::new(src);
    fixture.index.add_metadata_type(MetadataType {
        name: "Base".to_string(),
        module: "Lib.dll".to_string(),
        base: None,
        methods: vec![MetadataMethod::new("GetValue", 0)],
    });

    let document = apply(&fixture.action(caret_at(src, "GetValue", 0)).expect("offered"));
    assert_eq!(
        document.warnings().collect::<Vec<_>>(),
        vec![METHOD_OVERRIDES_METADATA_WARNING]
    );
    assert_eq!(
        document.text(),
        "class Derived : Base {\n    public override int Value { get { return 1; } }\n}\n"
    );
}

#[test]
fn not_offered_for_non_getters() {
    let cases = [
        ("class C { int Foo() { return 1; } }", "Foo"),
        ("class C { int Get() { return 1; } }", "Get"),
        ("class C { void GetFoo() { } }", "GetFoo"),
        ("class C { int GetFoo(int i) { return i; } }", "GetFoo"),
        ("class C { int GetFoo(); }", "GetFoo"),
    ];
    for (src, needle) in cases {
        let fixture = Fixture::new(src);
        assert!(fixture.action(caret_at(src, needle, 0)).is_none(), "{src}");
    }
}

#[test]
fn not_offered_from_inside_the_body() {
    let src = "class C { int GetFoo() { return foo; } }";
    let fixture = Fixture::new(src);
    assert!(fixture.action(caret_at(src, "{ return", 0)).is_some());
    assert!(fixture.action(caret_at(src, "return", 0)).is_none());
}

#[test]
fn not_offered_without_a_symbol() {
    let src = "class C { int GetFoo() { return foo; } }";
    let fixture = Fixture {
        file: FileId::new("Widget.cs"),
        document: Document::parse(src),
        index: SymbolIndex::new(),
    };
    assert!(fixture.action(caret_at(src, "GetFoo", 0)).is_none());
}

#[test]
fn cancelled_token_stops_apply() {
    let src = "class C { int GetFoo() { return foo; } }";
    let fixture = Fixture::new(src);
    let action = fixture.action(caret_at(src, "GetFoo", 0)).expect("offered");

    let cancel = CancellationToken::new();
    cancel.cancel();
    assert_eq!(action.apply(&cancel), Err(Cancelled));
    assert_eq!(fixture.document.text(), src);
}

#[test]
fn comment_after_setter_body_is_kept() {
    let src = "\
class C {
    int GetFoo() { return f; }
    void SetFoo(int v) { f = v; } // keep setter note
}
";
    let fixture = Fixture::new(src);
    let document = apply(&fixture.action(caret_at(src, "GetFoo", 0)).expect("offered"));
    assert_eq!(
        document.text(),
        "\
class C {
        int Foo { get { return f; } set { f = value; } // keep setter note
 }
}
"
    );
}

#[test]
fn comment_before_getter_body_is_kept() {
    let src = "\
class C {
    int GetFoo()
    // about body
    {
        return f;
    }
}
";
    let fixture = Fixture::new(src);
    let document = apply(&fixture.action(caret_at(src, "GetFoo", 0)).expect("offered"));
    assert_eq!(
        document.text(),
        "\
class C {
    int Foo { get // about body
    {
        return f;
    } }
}
"
    );
}

#[test]
fn comment_after_getter_is_not_duplicated() {
    let src = "class C {\n    int GetFoo() { return f; } // tail\n}\n";
    let fixture = Fixture::new(src);
    let document = apply(&fixture.action(caret_at(src, "GetFoo", 0)).expect("offered"));
    assert_eq!(
        document.text(),
        "class C {\n    int Foo { get { return f; } } // tail\n}\n"
    );
}
