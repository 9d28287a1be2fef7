use rowan::Language;
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Unified syntax kind for both tokens and AST nodes.
///
/// Trivia kinds come first so that classification helpers stay cheap range checks
/// when the front-end grows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize_repr, Deserialize_repr,
)]
#[repr(u16)]
pub enum SyntaxKind {
    // --- Trivia ---
    Whitespace,
    /// `\n` or `\r\n`.
    Newline,
    LineComment,
    BlockComment,
    /// `/// ...` documentation comment.
    DocComment,
    /// A `#`-line (`#if`, `#region`, ...). The token spans up to, but excluding, the newline.
    Directive,

    // --- Identifiers & literals ---
    Identifier,
    IntLiteral,
    StringLiteral,
    CharLiteral,

    // --- Keywords (reserved) ---
    AbstractKw,
    BoolKw,
    ClassKw,
    ElseKw,
    FalseKw,
    IfKw,
    IntKw,
    InternalKw,
    NullKw,
    OverrideKw,
    PrivateKw,
    ProtectedKw,
    PublicKw,
    ReturnKw,
    SealedKw,
    StaticKw,
    StringKw,
    ThisKw,
    TrueKw,
    VirtualKw,
    VoidKw,
    WhileKw,

    // --- Contextual keywords ---
    GetKw,
    SetKw,
    VarKw,

    // --- Operators / punctuation ---
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Dot,
    Colon,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,

    Eq,
    EqEq,
    BangEq,

    Less,
    LessEq,
    Greater,
    GreaterEq,

    AmpAmp,
    PipePipe,

    PlusEq,
    MinusEq,

    // --- Special ---
    Error,
    Eof,

    // --- Nodes ---
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

    // Expressions
    LiteralExpression,
    NameExpression,
    ThisExpression,
    ParenthesizedExpression,
    CallExpression,
    MemberAccessExpression,
    UnaryExpression,
    BinaryExpression,
    AssignmentExpression,

    __Last,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::Whitespace
                | SyntaxKind::Newline
                | SyntaxKind::LineComment
                | SyntaxKind::BlockComment
                | SyntaxKind::DocComment
                | SyntaxKind::Directive
        )
    }

    pub fn is_comment(self) -> bool {
        matches!(
            self,
            SyntaxKind::LineComment | SyntaxKind::BlockComment | SyntaxKind::DocComment
        )
    }

    pub fn is_contextual_keyword(self) -> bool {
        matches!(self, SyntaxKind::GetKw | SyntaxKind::SetKw | SyntaxKind::VarKw)
    }

    pub fn is_identifier_like(self) -> bool {
        self == SyntaxKind::Identifier || self.is_contextual_keyword()
    }

    pub fn is_keyword(self) -> bool {
        (SyntaxKind::AbstractKw as u16..=SyntaxKind::VarKw as u16).contains(&(self as u16))
    }

    pub fn is_modifier_keyword(self) -> bool {
        matches!(
            self,
            SyntaxKind::AbstractKw
                | SyntaxKind::InternalKw
                | SyntaxKind::OverrideKw
                | SyntaxKind::PrivateKw
                | SyntaxKind::ProtectedKw
                | SyntaxKind::PublicKw
                | SyntaxKind::SealedKw
                | SyntaxKind::StaticKw
                | SyntaxKind::VirtualKw
        )
    }

    pub fn is_predefined_type_keyword(self) -> bool {
        matches!(
            self,
            SyntaxKind::BoolKw | SyntaxKind::IntKw | SyntaxKind::StringKw | SyntaxKind::VoidKw
        )
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::IntLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::CharLiteral
                | SyntaxKind::TrueKw
                | SyntaxKind::FalseKw
                | SyntaxKind::NullKw
        )
    }

    pub fn is_statement(self) -> bool {
        matches!(
            self,
            SyntaxKind::Block
                | SyntaxKind::IfStatement
                | SyntaxKind::WhileStatement
                | SyntaxKind::ReturnStatement
                | SyntaxKind::LocalVariableDeclarationStatement
                | SyntaxKind::ExpressionStatement
                | SyntaxKind::EmptyStatement
        )
    }

    pub fn is_expression(self) -> bool {
        matches!(
            self,
            SyntaxKind::LiteralExpression
                | SyntaxKind::NameExpression
                | SyntaxKind::ThisExpression
                | SyntaxKind::ParenthesizedExpression
                | SyntaxKind::CallExpression
                | SyntaxKind::MemberAccessExpression
                | SyntaxKind::UnaryExpression
                | SyntaxKind::BinaryExpression
                | SyntaxKind::AssignmentExpression
        )
    }

    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        Some(match text {
            // Reserved keywords.
            "abstract" => SyntaxKind::AbstractKw,
            "bool" => SyntaxKind::BoolKw,
            "class" => SyntaxKind::ClassKw,
            "else" => SyntaxKind::ElseKw,
            "false" => SyntaxKind::FalseKw,
            "if" => SyntaxKind::IfKw,
            "int" => SyntaxKind::IntKw,
            "internal" => SyntaxKind::InternalKw,
            "null" => SyntaxKind::NullKw,
            "override" => SyntaxKind::OverrideKw,
            "private" => SyntaxKind::PrivateKw,
            "protected" => SyntaxKind::ProtectedKw,
            "public" => SyntaxKind::PublicKw,
            "return" => SyntaxKind::ReturnKw,
            "sealed" => SyntaxKind::SealedKw,
            "static" => SyntaxKind::StaticKw,
            "string" => SyntaxKind::StringKw,
            "this" => SyntaxKind::ThisKw,
            "true" => SyntaxKind::TrueKw,
            "virtual" => SyntaxKind::VirtualKw,
            "void" => SyntaxKind::VoidKw,
            "while" => SyntaxKind::WhileKw,

            // Contextual.
            "get" => SyntaxKind::GetKw,
            "set" => SyntaxKind::SetKw,
            "var" => SyntaxKind::VarKw,

            _ => return None,
        })
    }

    /// Fixed source text of punctuation and keyword kinds.
    pub fn static_text(self) -> Option<&'static str> {
        Some(match self {
            SyntaxKind::LParen => "(",
            SyntaxKind::RParen => ")",
            SyntaxKind::LBrace => "{",
            SyntaxKind::RBrace => "}",
            SyntaxKind::LBracket => "[",
            SyntaxKind::RBracket => "]",
            SyntaxKind::Semicolon => ";",
            SyntaxKind::Comma => ",",
            SyntaxKind::Dot => ".",
            SyntaxKind::Colon => ":",
            SyntaxKind::Plus => "+",
            SyntaxKind::Minus => "-",
            SyntaxKind::Star => "*",
            SyntaxKind::Slash => "/",
            SyntaxKind::Percent => "%",
            SyntaxKind::Bang => "!",
            SyntaxKind::Eq => "=",
            SyntaxKind::EqEq => "==",
            SyntaxKind::BangEq => "!=",
            SyntaxKind::Less => "<",
            SyntaxKind::LessEq => "<=",
            SyntaxKind::Greater => ">",
            SyntaxKind::GreaterEq => ">=",
            SyntaxKind::AmpAmp => "&&",
            SyntaxKind::PipePipe => "||",
            SyntaxKind::PlusEq => "+=",
            SyntaxKind::MinusEq => "-=",
            SyntaxKind::IfKw => "if",
            SyntaxKind::ElseKw => "else",
            SyntaxKind::GetKw => "get",
            SyntaxKind::SetKw => "set",
            SyntaxKind::VoidKw => "void",
            SyntaxKind::ReturnKw => "return",
            _ => return None,
        })
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(value: SyntaxKind) -> Self {
        rowan::SyntaxKind(value as u16)
    }
}

/// Rowan language marker for the C#-flavoured reference front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CSharpLanguage {}

impl Language for CSharpLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> SyntaxKind {
        if raw.0 < SyntaxKind::__Last as u16 {
            // SAFETY: We've verified the numeric value is within the enum range.
            unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
        } else {
            SyntaxKind::Error
        }
    }

    fn kind_to_raw(kind: SyntaxKind) -> rowan::SyntaxKind {
        kind.into()
    }
}
