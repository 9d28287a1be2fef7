use text_size::{TextRange, TextSize};

use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub range: TextRange,
}

impl Token {
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.range]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub range: TextRange,
}

/// Tokenize `input`, including trivia. The concatenated token texts always equal `input`.
pub fn lex(input: &str) -> Vec<Token> {
    lex_with_errors(input).0
}

pub fn lex_with_errors(input: &str) -> (Vec<Token>, Vec<LexError>) {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token() {
        tokens.push(token);
    }
    (tokens, lexer.errors)
}

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    /// Only whitespace has been seen since the last newline (or start of input).
    at_line_start: bool,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            at_line_start: true,
            errors: Vec::new(),
        }
    }

    pub fn next_token(&mut self) -> Option<Token> {
        let start = self.pos;
        let c = self.peek()?;

        let kind = match c {
            ' ' | '\t' => {
                self.eat_while(|c| c == ' ' || c == '\t');
                SyntaxKind::Whitespace
            }
            '\r' => {
                self.bump_char();
                if self.peek() == Some('\n') {
                    self.bump_char();
                }
                SyntaxKind::Newline
            }
            '\n' => {
                self.bump_char();
                SyntaxKind::Newline
            }
            '#' if self.at_line_start => {
                self.eat_until_newline();
                SyntaxKind::Directive
            }
            '/' if self.peek_nth(1) == Some('/') => {
                let doc = self.rest().starts_with("///") && !self.rest().starts_with("////");
                self.eat_until_newline();
                if doc {
                    SyntaxKind::DocComment
                } else {
                    SyntaxKind::LineComment
                }
            }
            '/' if self.peek_nth(1) == Some('*') => {
                self.pos += 2;
                match self.rest().find("*/") {
                    Some(end) => self.pos += end + 2,
                    None => {
                        self.pos = self.input.len();
                        self.error(start, "unterminated block comment");
                    }
                }
                SyntaxKind::BlockComment
            }
            '"' => {
                self.lex_quoted('"');
                SyntaxKind::StringLiteral
            }
            '\'' => {
                self.lex_quoted('\'');
                SyntaxKind::CharLiteral
            }
            c if c.is_ascii_digit() => {
                self.eat_while(|c| c.is_ascii_digit() || c == '_');
                SyntaxKind::IntLiteral
            }
            c if c == '_' || unicode_ident::is_xid_start(c) => {
                self.eat_while(unicode_ident::is_xid_continue);
                SyntaxKind::from_keyword(&self.input[start..self.pos])
                    .unwrap_or(SyntaxKind::Identifier)
            }
            _ => self.lex_punctuation(),
        };

        self.at_line_start = match kind {
            SyntaxKind::Newline => true,
            SyntaxKind::Whitespace => self.at_line_start,
            _ => false,
        };

        Some(Token {
            kind,
            range: TextRange::new(TextSize::from(start as u32), TextSize::from(self.pos as u32)),
        })
    }

    fn lex_punctuation(&mut self) -> SyntaxKind {
        const TWO_CHAR: &[(&str, SyntaxKind)] = &[
            ("==", SyntaxKind::EqEq),
            ("!=", SyntaxKind::BangEq),
            ("<=", SyntaxKind::LessEq),
            (">=", SyntaxKind::GreaterEq),
            ("&&", SyntaxKind::AmpAmp),
            ("||", SyntaxKind::PipePipe),
            ("+=", SyntaxKind::PlusEq),
            ("-=", SyntaxKind::MinusEq),
        ];
        for (text, kind) in TWO_CHAR {
            if self.rest().starts_with(text) {
                self.pos += text.len();
                return *kind;
            }
        }

        let start = self.pos;
        let c = self.bump_char();
        match c {
            '(' => SyntaxKind::LParen,
            ')' => SyntaxKind::RParen,
            '{' => SyntaxKind::LBrace,
            '}' => SyntaxKind::RBrace,
            '[' => SyntaxKind::LBracket,
            ']' => SyntaxKind::RBracket,
            ';' => SyntaxKind::Semicolon,
            ',' => SyntaxKind::Comma,
            '.' => SyntaxKind::Dot,
            ':' => SyntaxKind::Colon,
            '+' => SyntaxKind::Plus,
            '-' => SyntaxKind::Minus,
            '*' => SyntaxKind::Star,
            '/' => SyntaxKind::Slash,
            '%' => SyntaxKind::Percent,
            '!' => SyntaxKind::Bang,
            '=' => SyntaxKind::Eq,
            '<' => SyntaxKind::Less,
            '>' => SyntaxKind::Greater,
            _ => {
                self.error(start, "unexpected character");
                SyntaxKind::Error
            }
        }
    }

    fn lex_quoted(&mut self, quote: char) {
        let start = self.pos;
        self.bump_char();
        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    self.bump_char();
                    return;
                }
                Some('\\') => {
                    self.bump_char();
                    if matches!(self.peek(), Some(c) if c != '\n' && c != '\r') {
                        self.bump_char();
                    }
                }
                Some('\n') | Some('\r') | None => {
                    self.error(start, "unterminated literal");
                    return;
                }
                Some(_) => {
                    self.bump_char();
                }
            }
        }
    }

    fn error(&mut self, start: usize, message: &str) {
        self.errors.push(LexError {
            message: message.to_string(),
            range: TextRange::new(TextSize::from(start as u32), TextSize::from(self.pos as u32)),
        });
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump_char(&mut self) -> char {
        let c = self.peek().unwrap_or('\0');
        self.pos += c.len_utf8();
        c
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn eat_until_newline(&mut self) {
        self.eat_while(|c| c != '\n' && c != '\r');
    }
}
