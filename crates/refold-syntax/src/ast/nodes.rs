//! Typed wrappers for every node kind the parser produces.

use super::support;
use crate::ast::AstNode;
use crate::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($($name:ident),* $(,)?) => {
        $(
            #[derive(Debug, Clone, PartialEq, Eq, Hash)]
            pub struct $name {
                syntax: SyntaxNode,
            }

            impl AstNode for $name {
                fn can_cast(kind: SyntaxKind) -> bool {
                    kind == SyntaxKind::$name
                }

                fn cast(syntax: SyntaxNode) -> Option<Self> {
                    Self::can_cast(syntax.kind()).then_some(Self { syntax })
                }

                fn syntax(&self) -> &SyntaxNode {
                    &self.syntax
                }
            }
        )*
    };
}

macro_rules! ast_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant($variant),)*
        }

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                matches!(kind, $(SyntaxKind::$variant)|*)
            }

            fn cast(syntax: SyntaxNode) -> Option<Self> {
                match syntax.kind() {
                    $(SyntaxKind::$variant => Some($name::$variant($variant { syntax })),)*
                    _ => None,
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                match self {
                    $($name::$variant(it) => it.syntax(),)*
                }
            }
        }

        $(
            impl From<$variant> for $name {
                fn from(node: $variant) -> Self {
                    $name::$variant(node)
                }
            }
        )*
    };
}

ast_node!(
    CompilationUnit,
    Modifiers,
    ClassDeclaration,
    BaseList,
    ClassBody,
    FieldDeclaration,
    MethodDeclaration,
    PropertyDeclaration,
    AccessorList,
    AccessorDeclaration,
    ParameterList,
    Parameter,
    Type,
    Block,
    IfStatement,
    ElseClause,
    WhileStatement,
    ReturnStatement,
    LocalVariableDeclarationStatement,
    ExpressionStatement,
    EmptyStatement,
    ArgumentList,
    LiteralExpression,
    NameExpression,
    ThisExpression,
    ParenthesizedExpression,
    CallExpression,
    MemberAccessExpression,
    UnaryExpression,
    BinaryExpression,
    AssignmentExpression,
);

ast_enum!(
    /// A declaration inside a class body (or at the top level).
    Member {
        ClassDeclaration,
        FieldDeclaration,
        MethodDeclaration,
        PropertyDeclaration,
    }
);

ast_enum!(Statement {
    Block,
    IfStatement,
    WhileStatement,
    ReturnStatement,
    LocalVariableDeclarationStatement,
    ExpressionStatement,
    EmptyStatement,
});

ast_enum!(Expression {
    LiteralExpression,
    NameExpression,
    ThisExpression,
    ParenthesizedExpression,
    CallExpression,
    MemberAccessExpression,
    UnaryExpression,
    BinaryExpression,
    AssignmentExpression,
});

impl CompilationUnit {
    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        support::children::<Member>(&self.syntax)
    }
}

impl Modifiers {
    pub fn keywords(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.syntax()
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| !t.kind().is_trivia())
    }

    pub fn has(&self, kind: SyntaxKind) -> bool {
        self.keywords().any(|t| t.kind() == kind)
    }
}

impl ClassDeclaration {
    pub fn modifiers(&self) -> Option<Modifiers> {
        support::child::<Modifiers>(&self.syntax)
    }

    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::ident_token(&self.syntax)
    }

    pub fn base_list(&self) -> Option<BaseList> {
        support::child::<BaseList>(&self.syntax)
    }

    pub fn body(&self) -> Option<ClassBody> {
        support::child::<ClassBody>(&self.syntax)
    }
}

impl BaseList {
    pub fn types(&self) -> impl Iterator<Item = Type> + '_ {
        support::children::<Type>(&self.syntax)
    }
}

impl ClassBody {
    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        support::children::<Member>(&self.syntax)
    }

    pub fn l_brace_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::LBrace)
    }

    pub fn r_brace_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::RBrace)
    }
}

impl FieldDeclaration {
    pub fn modifiers(&self) -> Option<Modifiers> {
        support::child::<Modifiers>(&self.syntax)
    }

    pub fn ty(&self) -> Option<Type> {
        support::child::<Type>(&self.syntax)
    }

    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::ident_token(&self.syntax)
    }

    pub fn initializer(&self) -> Option<Expression> {
        support::child::<Expression>(&self.syntax)
    }
}

impl MethodDeclaration {
    pub fn modifiers(&self) -> Option<Modifiers> {
        support::child::<Modifiers>(&self.syntax)
    }

    pub fn return_type(&self) -> Option<Type> {
        support::child::<Type>(&self.syntax)
    }

    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::ident_token(&self.syntax)
    }

    pub fn parameter_list(&self) -> Option<ParameterList> {
        support::child::<ParameterList>(&self.syntax)
    }

    pub fn body(&self) -> Option<Block> {
        support::child::<Block>(&self.syntax)
    }
}

impl PropertyDeclaration {
    pub fn modifiers(&self) -> Option<Modifiers> {
        support::child::<Modifiers>(&self.syntax)
    }

    pub fn ty(&self) -> Option<Type> {
        support::child::<Type>(&self.syntax)
    }

    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::ident_token(&self.syntax)
    }

    pub fn accessor_list(&self) -> Option<AccessorList> {
        support::child::<AccessorList>(&self.syntax)
    }
}

impl AccessorList {
    pub fn accessors(&self) -> impl Iterator<Item = AccessorDeclaration> + '_ {
        support::children::<AccessorDeclaration>(&self.syntax)
    }
}

impl AccessorDeclaration {
    pub fn keyword_token(&self) -> Option<SyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| matches!(t.kind(), SyntaxKind::GetKw | SyntaxKind::SetKw))
    }

    pub fn body(&self) -> Option<Block> {
        support::child::<Block>(&self.syntax)
    }
}

impl ParameterList {
    pub fn parameters(&self) -> impl Iterator<Item = Parameter> + '_ {
        support::children::<Parameter>(&self.syntax)
    }
}

impl Parameter {
    pub fn ty(&self) -> Option<Type> {
        support::child::<Type>(&self.syntax)
    }

    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::ident_token(&self.syntax)
    }
}

impl Block {
    pub fn statements(&self) -> impl Iterator<Item = Statement> + '_ {
        support::children::<Statement>(&self.syntax)
    }

    pub fn l_brace_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::LBrace)
    }

    pub fn r_brace_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::RBrace)
    }
}

impl IfStatement {
    pub fn if_token(&self) -> Option<SyntaxToken> {
        support::token(&self.syntax, SyntaxKind::IfKw)
    }

    pub fn condition(&self) -> Option<Expression> {
        support::child::<Expression>(&self.syntax)
    }

    pub fn then_branch(&self) -> Option<Statement> {
        support::child::<Statement>(&self.syntax)
    }

    pub fn else_clause(&self) -> Option<ElseClause> {
        support::child::<ElseClause>(&self.syntax)
    }
}

impl ElseClause {
    pub fn statement(&self) -> Option<Statement> {
        support::child::<Statement>(&self.syntax)
    }
}

impl WhileStatement {
    pub fn condition(&self) -> Option<Expression> {
        support::child::<Expression>(&self.syntax)
    }

    pub fn body(&self) -> Option<Statement> {
        support::child::<Statement>(&self.syntax)
    }
}

impl ReturnStatement {
    pub fn expression(&self) -> Option<Expression> {
        support::child::<Expression>(&self.syntax)
    }
}

impl LocalVariableDeclarationStatement {
    pub fn ty(&self) -> Option<Type> {
        support::child::<Type>(&self.syntax)
    }

    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::ident_token(&self.syntax)
    }

    pub fn initializer(&self) -> Option<Expression> {
        support::child::<Expression>(&self.syntax)
    }
}

impl ExpressionStatement {
    pub fn expression(&self) -> Option<Expression> {
        support::child::<Expression>(&self.syntax)
    }
}

impl ArgumentList {
    pub fn arguments(&self) -> impl Iterator<Item = Expression> + '_ {
        support::children::<Expression>(&self.syntax)
    }
}

impl LiteralExpression {
    pub fn token(&self) -> Option<SyntaxToken> {
        support::first_significant_token(&self.syntax)
    }
}

impl NameExpression {
    pub fn ident_token(&self) -> Option<SyntaxToken> {
        support::ident_token(&self.syntax)
    }
}

impl ParenthesizedExpression {
    pub fn expression(&self) -> Option<Expression> {
        support::child::<Expression>(&self.syntax)
    }
}

impl CallExpression {
    pub fn callee(&self) -> Option<Expression> {
        support::child::<Expression>(&self.syntax)
    }

    pub fn argument_list(&self) -> Option<ArgumentList> {
        support::child::<ArgumentList>(&self.syntax)
    }
}

impl MemberAccessExpression {
    pub fn receiver(&self) -> Option<Expression> {
        support::child::<Expression>(&self.syntax)
    }

    pub fn name_token(&self) -> Option<SyntaxToken> {
        support::ident_token(&self.syntax)
    }
}

impl UnaryExpression {
    pub fn op_token(&self) -> Option<SyntaxToken> {
        support::first_significant_token(&self.syntax)
    }

    pub fn operand(&self) -> Option<Expression> {
        support::child::<Expression>(&self.syntax)
    }
}

impl BinaryExpression {
    pub fn lhs(&self) -> Option<Expression> {
        support::child::<Expression>(&self.syntax)
    }

    pub fn rhs(&self) -> Option<Expression> {
        support::children::<Expression>(&self.syntax).nth(1)
    }

    pub fn op_token(&self) -> Option<SyntaxToken> {
        support::first_significant_token(&self.syntax)
    }
}

impl AssignmentExpression {
    pub fn lhs(&self) -> Option<Expression> {
        support::child::<Expression>(&self.syntax)
    }

    pub fn rhs(&self) -> Option<Expression> {
        support::children::<Expression>(&self.syntax).nth(1)
    }

    pub fn op_token(&self) -> Option<SyntaxToken> {
        support::first_significant_token(&self.syntax)
    }
}
