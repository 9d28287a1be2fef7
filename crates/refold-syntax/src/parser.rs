use std::collections::VecDeque;

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder};
use text_size::{TextRange, TextSize};

use crate::lexer::{lex_with_errors, Token};
use crate::syntax_kind::{CSharpLanguage, SyntaxKind};
use crate::ParseError;

pub type SyntaxNode = rowan::SyntaxNode<CSharpLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<CSharpLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<CSharpLanguage>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<ParseError>,
}

impl Parse {
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn token_at_offset(&self, offset: u32) -> rowan::TokenAtOffset<SyntaxToken> {
        self.syntax().token_at_offset(TextSize::from(offset))
    }

    pub fn covering_element(&self, range: TextRange) -> SyntaxElement {
        self.syntax().covering_element(range)
    }
}

/// Parse a compilation unit.
///
/// The tree is lossless: `parse(text).syntax().to_string() == text` for any input, including
/// inputs with errors.
///
/// Trivia is attached the way Roslyn does it. After a token is consumed, whitespace and
/// comments up to and including the first newline become its trailing trivia. Everything else
/// is leading trivia of the next token and lands inside the innermost node that starts there.
pub fn parse(input: &str) -> Parse {
    Parser::new(input).parse()
}

struct Parser<'a> {
    input: &'a str,
    tokens: VecDeque<Token>,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let (tokens, lex_errors) = lex_with_errors(input);
        let errors = lex_errors
            .into_iter()
            .map(|err| ParseError {
                message: err.message,
                range: err.range,
            })
            .collect();
        Self {
            input,
            tokens: VecDeque::from(tokens),
            builder: GreenNodeBuilder::new(),
            errors,
        }
    }

    fn parse(mut self) -> Parse {
        self.builder.start_node(SyntaxKind::CompilationUnit.into());

        while !self.at(SyntaxKind::Eof) {
            if self.at_member_start() {
                self.parse_member();
            } else {
                self.error_and_bump("expected class declaration");
            }
        }

        // Trivia after the last token belongs to the compilation unit.
        while !self.tokens.is_empty() {
            self.bump_any();
        }
        self.builder.finish_node();
        tracing::trace!(errors = self.errors.len(), "parsed compilation unit");

        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // --- Declarations ---

    fn at_member_start(&mut self) -> bool {
        let kind = self.current();
        kind == SyntaxKind::ClassKw
            || kind.is_modifier_keyword()
            || kind.is_predefined_type_keyword()
            || kind.is_identifier_like()
    }

    fn parse_member(&mut self) {
        let checkpoint = self.builder.checkpoint();
        self.parse_modifiers();

        if self.at(SyntaxKind::ClassKw) {
            self.parse_class_decl(checkpoint);
            return;
        }

        self.parse_type();
        if self.current().is_identifier_like() {
            self.bump();
        } else {
            self.error_here("expected member name");
        }

        match self.current() {
            SyntaxKind::LParen => {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::MethodDeclaration.into());
                self.parse_parameter_list();
                if self.at(SyntaxKind::LBrace) {
                    self.parse_block();
                } else {
                    self.expect(SyntaxKind::Semicolon, "expected method body or `;`");
                }
            }
            SyntaxKind::LBrace => {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::PropertyDeclaration.into());
                self.parse_accessor_list();
            }
            _ => {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::FieldDeclaration.into());
                if self.at(SyntaxKind::Eq) {
                    self.bump();
                    self.parse_expression();
                }
                self.expect(SyntaxKind::Semicolon, "expected `;` after field declaration");
            }
        }
        self.builder.finish_node();
    }

    fn parse_modifiers(&mut self) {
        self.builder.start_node(SyntaxKind::Modifiers.into());
        while self.current().is_modifier_keyword() {
            self.bump();
        }
        self.builder.finish_node();
    }

    fn parse_class_decl(&mut self, checkpoint: Checkpoint) {
        self.builder
            .start_node_at(checkpoint, SyntaxKind::ClassDeclaration.into());
        self.bump(); // class
        if self.current().is_identifier_like() {
            self.bump();
        } else {
            self.error_here("expected class name");
        }

        if self.at(SyntaxKind::Colon) {
            self.builder.start_node(SyntaxKind::BaseList.into());
            self.bump();
            self.parse_type();
            while self.at(SyntaxKind::Comma) {
                self.bump();
                self.parse_type();
            }
            self.builder.finish_node();
        }

        self.builder.start_node(SyntaxKind::ClassBody.into());
        if self.expect(SyntaxKind::LBrace, "expected `{` to open class body") {
            while !matches!(self.current(), SyntaxKind::RBrace | SyntaxKind::Eof) {
                if self.at_member_start() {
                    self.parse_member();
                } else {
                    self.error_and_bump("expected member declaration");
                }
            }
            self.expect(SyntaxKind::RBrace, "expected `}` to close class body");
        }
        self.builder.finish_node();

        self.builder.finish_node();
    }

    fn parse_type(&mut self) {
        self.builder.start_node(SyntaxKind::Type.into());
        let kind = self.current();
        if kind.is_predefined_type_keyword() || kind.is_identifier_like() {
            self.bump();
            while self.at(SyntaxKind::Dot) && self.nth(1).is_some_and(|k| k.is_identifier_like())
            {
                self.bump(); // .
                self.bump(); // segment
            }
            while self.at(SyntaxKind::LBracket) && self.nth(1) == Some(SyntaxKind::RBracket) {
                self.bump();
                self.bump();
            }
        } else {
            self.error_here("expected type");
        }
        self.builder.finish_node();
    }

    fn parse_parameter_list(&mut self) {
        self.builder.start_node(SyntaxKind::ParameterList.into());
        self.expect(SyntaxKind::LParen, "expected `(`");
        if !self.at(SyntaxKind::RParen) {
            loop {
                self.builder.start_node(SyntaxKind::Parameter.into());
                self.parse_type();
                if self.current().is_identifier_like() {
                    self.bump();
                } else {
                    self.error_here("expected parameter name");
                }
                self.builder.finish_node();

                if self.at(SyntaxKind::Comma) {
                    self.bump();
                } else {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::RParen, "expected `)` to close parameter list");
        self.builder.finish_node();
    }

    fn parse_accessor_list(&mut self) {
        self.builder.start_node(SyntaxKind::AccessorList.into());
        self.bump(); // {
        while !matches!(self.current(), SyntaxKind::RBrace | SyntaxKind::Eof) {
            let checkpoint = self.builder.checkpoint();
            self.parse_modifiers();
            if matches!(self.current(), SyntaxKind::GetKw | SyntaxKind::SetKw) {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::AccessorDeclaration.into());
                self.bump();
                if self.at(SyntaxKind::LBrace) {
                    self.parse_block();
                } else {
                    self.expect(SyntaxKind::Semicolon, "expected accessor body or `;`");
                }
                self.builder.finish_node();
            } else {
                self.builder.start_node_at(checkpoint, SyntaxKind::Error.into());
                self.error_here("expected `get` or `set` accessor");
                if !matches!(self.current(), SyntaxKind::RBrace | SyntaxKind::Eof) {
                    self.bump();
                }
                self.builder.finish_node();
            }
        }
        self.expect(SyntaxKind::RBrace, "expected `}` to close accessor list");
        self.builder.finish_node();
    }

    // --- Statements ---

    fn parse_block(&mut self) {
        self.builder.start_node(SyntaxKind::Block.into());
        self.expect(SyntaxKind::LBrace, "expected `{`");
        while !matches!(self.current(), SyntaxKind::RBrace | SyntaxKind::Eof) {
            let before = self.tokens.len();
            self.parse_statement();
            if self.tokens.len() == before {
                self.error_and_bump("expected statement");
            }
        }
        self.expect(SyntaxKind::RBrace, "expected `}` to close block");
        self.builder.finish_node();
    }

    fn parse_statement(&mut self) {
        match self.current() {
            SyntaxKind::LBrace => self.parse_block(),
            SyntaxKind::IfKw => self.parse_if_statement(),
            SyntaxKind::WhileKw => {
                self.builder.start_node(SyntaxKind::WhileStatement.into());
                self.bump();
                self.parse_parenthesized_condition();
                self.parse_embedded_statement();
                self.builder.finish_node();
            }
            SyntaxKind::ReturnKw => {
                self.builder.start_node(SyntaxKind::ReturnStatement.into());
                self.bump();
                if !self.at(SyntaxKind::Semicolon) {
                    self.parse_expression();
                }
                self.expect(SyntaxKind::Semicolon, "expected `;` after return statement");
                self.builder.finish_node();
            }
            SyntaxKind::Semicolon => {
                self.builder.start_node(SyntaxKind::EmptyStatement.into());
                self.bump();
                self.builder.finish_node();
            }
            _ if self.at_local_declaration() => {
                self.builder
                    .start_node(SyntaxKind::LocalVariableDeclarationStatement.into());
                self.parse_type();
                self.bump(); // name
                if self.at(SyntaxKind::Eq) {
                    self.bump();
                    self.parse_expression();
                }
                self.expect(SyntaxKind::Semicolon, "expected `;` after local declaration");
                self.builder.finish_node();
            }
            SyntaxKind::RBrace | SyntaxKind::Eof => {
                self.error_here("expected statement");
            }
            _ => {
                self.builder.start_node(SyntaxKind::ExpressionStatement.into());
                self.parse_expression();
                self.expect(SyntaxKind::Semicolon, "expected `;` after expression");
                self.builder.finish_node();
            }
        }
    }

    fn at_local_declaration(&mut self) -> bool {
        let first = self.current();
        let second = self.nth(1);
        (first.is_predefined_type_keyword() || first.is_identifier_like())
            && second.is_some_and(|k| k.is_identifier_like())
    }

    fn parse_if_statement(&mut self) {
        self.builder.start_node(SyntaxKind::IfStatement.into());
        self.bump(); // if
        self.parse_parenthesized_condition();
        self.parse_embedded_statement();
        if self.at(SyntaxKind::ElseKw) {
            self.builder.start_node(SyntaxKind::ElseClause.into());
            self.bump();
            self.parse_embedded_statement();
            self.builder.finish_node();
        }
        self.builder.finish_node();
    }

    fn parse_parenthesized_condition(&mut self) {
        self.expect(SyntaxKind::LParen, "expected `(`");
        self.parse_expression();
        self.expect(SyntaxKind::RParen, "expected `)`");
    }

    fn parse_embedded_statement(&mut self) {
        if matches!(self.current(), SyntaxKind::RBrace | SyntaxKind::Eof) {
            self.error_here("expected statement");
        } else {
            self.parse_statement();
        }
    }

    // --- Expressions ---

    fn parse_expression(&mut self) {
        let checkpoint = self.builder.checkpoint();
        self.parse_binary(0);
        if matches!(
            self.current(),
            SyntaxKind::Eq | SyntaxKind::PlusEq | SyntaxKind::MinusEq
        ) {
            self.builder
                .start_node_at(checkpoint, SyntaxKind::AssignmentExpression.into());
            self.bump();
            self.parse_expression();
            self.builder.finish_node();
        }
    }

    fn parse_binary(&mut self, min_bp: u8) {
        let checkpoint = self.builder.checkpoint();
        self.parse_unary();
        while let Some(bp) = infix_binding_power(self.current()) {
            if bp < min_bp {
                break;
            }
            self.builder
                .start_node_at(checkpoint, SyntaxKind::BinaryExpression.into());
            self.bump(); // operator
            self.parse_binary(bp + 1);
            self.builder.finish_node();
        }
    }

    fn parse_unary(&mut self) {
        if matches!(self.current(), SyntaxKind::Bang | SyntaxKind::Minus) {
            self.builder.start_node(SyntaxKind::UnaryExpression.into());
            self.bump();
            self.parse_unary();
            self.builder.finish_node();
        } else {
            self.parse_postfix();
        }
    }

    fn parse_postfix(&mut self) {
        let checkpoint = self.builder.checkpoint();
        self.parse_primary();
        loop {
            match self.current() {
                SyntaxKind::LParen => {
                    self.builder
                        .start_node_at(checkpoint, SyntaxKind::CallExpression.into());
                    self.parse_argument_list();
                    self.builder.finish_node();
                }
                SyntaxKind::Dot => {
                    self.builder
                        .start_node_at(checkpoint, SyntaxKind::MemberAccessExpression.into());
                    self.bump();
                    if self.current().is_identifier_like() {
                        self.bump();
                    } else {
                        self.error_here("expected member name after `.`");
                    }
                    self.builder.finish_node();
                }
                _ => break,
            }
        }
    }

    fn parse_primary(&mut self) {
        let kind = self.current();
        match kind {
            _ if kind.is_literal() => {
                self.builder.start_node(SyntaxKind::LiteralExpression.into());
                self.bump();
                self.builder.finish_node();
            }
            _ if kind.is_identifier_like() => {
                self.builder.start_node(SyntaxKind::NameExpression.into());
                self.bump();
                self.builder.finish_node();
            }
            SyntaxKind::ThisKw => {
                self.builder.start_node(SyntaxKind::ThisExpression.into());
                self.bump();
                self.builder.finish_node();
            }
            SyntaxKind::LParen => {
                self.builder
                    .start_node(SyntaxKind::ParenthesizedExpression.into());
                self.bump();
                self.parse_expression();
                self.expect(SyntaxKind::RParen, "expected `)`");
                self.builder.finish_node();
            }
            SyntaxKind::Semicolon
            | SyntaxKind::RParen
            | SyntaxKind::RBrace
            | SyntaxKind::Comma
            | SyntaxKind::Eof => {
                self.error_here("expected expression");
            }
            _ => self.error_and_bump("expected expression"),
        }
    }

    fn parse_argument_list(&mut self) {
        self.builder.start_node(SyntaxKind::ArgumentList.into());
        self.bump(); // (
        if !self.at(SyntaxKind::RParen) {
            loop {
                self.parse_expression();
                if self.at(SyntaxKind::Comma) {
                    self.bump();
                } else {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::RParen, "expected `)` to close argument list");
        self.builder.finish_node();
    }

    // --- Token plumbing ---

    fn current(&self) -> SyntaxKind {
        self.nth(0).unwrap_or(SyntaxKind::Eof)
    }

    fn nth(&self, n: usize) -> Option<SyntaxKind> {
        self.tokens
            .iter()
            .filter(|tok| !tok.kind.is_trivia())
            .nth(n)
            .map(|tok| tok.kind)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the next significant token with its leading and trailing trivia.
    fn bump(&mut self) {
        while self.tokens.front().is_some_and(|t| t.kind.is_trivia()) {
            self.bump_any();
        }
        self.bump_any();

        while let Some(tok) = self.tokens.front() {
            match tok.kind {
                SyntaxKind::Newline => {
                    self.bump_any();
                    break;
                }
                SyntaxKind::Directive => break,
                kind if kind.is_trivia() => self.bump_any(),
                _ => break,
            }
        }
    }

    fn bump_any(&mut self) {
        if let Some(tok) = self.tokens.pop_front() {
            let text = tok.text(self.input);
            self.builder.token(tok.kind.into(), text);
        }
    }

    fn expect(&mut self, kind: SyntaxKind, message: &str) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            self.error_here(message);
            false
        }
    }

    fn error_and_bump(&mut self, message: &str) {
        self.error_here(message);
        if self.at(SyntaxKind::Eof) {
            return;
        }
        self.builder.start_node(SyntaxKind::Error.into());
        self.bump();
        self.builder.finish_node();
    }

    fn error_here(&mut self, message: &str) {
        let range = self.current_range();
        self.errors.push(ParseError {
            message: message.to_string(),
            range,
        });
    }

    fn current_range(&self) -> TextRange {
        self.tokens
            .iter()
            .find(|t| !t.kind.is_trivia())
            .map(|t| t.range)
            .unwrap_or_else(|| {
                let end = TextSize::from(self.input.len() as u32);
                TextRange::empty(end)
            })
    }
}

fn infix_binding_power(kind: SyntaxKind) -> Option<u8> {
    Some(match kind {
        SyntaxKind::PipePipe => 1,
        SyntaxKind::AmpAmp => 2,
        SyntaxKind::EqEq | SyntaxKind::BangEq => 3,
        SyntaxKind::Less | SyntaxKind::LessEq | SyntaxKind::Greater | SyntaxKind::GreaterEq => 4,
        SyntaxKind::Plus | SyntaxKind::Minus => 5,
        SyntaxKind::Star | SyntaxKind::Slash | SyntaxKind::Percent => 6,
        _ => return None,
    })
}
