use super::support;
use crate::ast::AstNode;
use crate::SyntaxKind;

impl super::Type {
    /// Source text of the type without trivia (`int`, `System.String`, `int[]`).
    pub fn text(&self) -> String {
        support::significant_text(self.syntax())
    }

    pub fn is_void(&self) -> bool {
        support::token(self.syntax(), SyntaxKind::VoidKw).is_some()
    }
}

impl super::MethodDeclaration {
    pub fn name(&self) -> Option<String> {
        self.name_token().map(|tok| tok.text().to_string())
    }

    pub fn parameters(&self) -> impl Iterator<Item = super::Parameter> + '_ {
        // `flat_map(|list| list.parameters())` does not compile because the iterator borrows
        // the moved `list`. Collect into a small buffer instead.
        self.parameter_list()
            .into_iter()
            .flat_map(|list| list.parameters().collect::<Vec<_>>())
    }

    pub fn is_override(&self) -> bool {
        self.modifiers()
            .is_some_and(|mods| mods.has(SyntaxKind::OverrideKw))
    }

    pub fn returns_void(&self) -> bool {
        self.return_type().is_some_and(|ty| ty.is_void())
    }

    /// Offset where the header ends: the body's `{`, or the end of a bodiless method.
    pub fn header_end(&self) -> text_size::TextSize {
        let body = self.body();
        match body.as_ref().and_then(|body| body.l_brace_token()) {
            Some(brace) => brace.text_range().start(),
            None => body
                .map(|body| body.syntax().text_range().start())
                .unwrap_or_else(|| self.syntax().text_range().end()),
        }
    }
}

impl super::ClassDeclaration {
    pub fn name(&self) -> Option<String> {
        self.name_token().map(|tok| tok.text().to_string())
    }

    pub fn methods(&self) -> impl Iterator<Item = super::MethodDeclaration> + '_ {
        self.body()
            .into_iter()
            .flat_map(|body| body.members().collect::<Vec<_>>())
            .filter_map(|member| match member {
                super::Member::MethodDeclaration(method) => Some(method),
                _ => None,
            })
    }

    /// Names of the base types listed after `:`.
    pub fn base_type_names(&self) -> Vec<String> {
        self.base_list()
            .map(|list| list.types().map(|ty| ty.text()).collect())
            .unwrap_or_default()
    }
}

impl super::CompilationUnit {
    /// All classes in the file, including nested ones, in source order.
    pub fn classes(&self) -> impl Iterator<Item = super::ClassDeclaration> + '_ {
        self.syntax()
            .descendants()
            .filter_map(super::ClassDeclaration::cast)
    }
}

impl super::BinaryExpression {
    pub fn op_kind(&self) -> Option<SyntaxKind> {
        self.op_token().map(|tok| tok.kind())
    }

    pub fn is_logical_and(&self) -> bool {
        self.op_kind() == Some(SyntaxKind::AmpAmp)
    }
}

impl super::IfStatement {
    /// The text of the leading keyword, used to label refactorings (`if`).
    pub fn keyword_text(&self) -> Option<String> {
        self.if_token().map(|tok| tok.text().to_string())
    }
}

impl super::AccessorDeclaration {
    pub fn is_getter(&self) -> bool {
        self.keyword_token()
            .is_some_and(|tok| tok.kind() == SyntaxKind::GetKw)
    }

    pub fn is_setter(&self) -> bool {
        self.keyword_token()
            .is_some_and(|tok| tok.kind() == SyntaxKind::SetKw)
    }
}
