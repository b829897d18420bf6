//! Token definitions for the style tokenizer
//!
//! A [`Token`] records the exact lexeme together with its position in the
//! left-trimmed source line.  Structural fields ([`Token::matching`],
//! [`Token::paren_depth`], [`Token::brace_depth`]) are filled in later by
//! [`super::structure`].

use std::fmt;

/// Lexical category of a token.
///
/// Comments and preprocessor lines are consumed by the lexer and never
/// become tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    String,
    Char,
    Identifier,
    FloatLiteral,
    IntLiteral,
    Punctuation,
}

/// Identifiers the style rules care about, classified once at lex time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    If,
    Else,
    For,
    While,
    Do,
    Switch,
    Return,
    Case,
    Goto,
}

impl Keyword {
    pub fn from_ident(ident: &str) -> Option<Self> {
        let keyword = match ident {
            "if" => Keyword::If,
            "else" => Keyword::Else,
            "for" => Keyword::For,
            "while" => Keyword::While,
            "do" => Keyword::Do,
            "switch" => Keyword::Switch,
            "return" => Keyword::Return,
            "case" => Keyword::Case,
            "goto" => Keyword::Goto,
            _ => return None,
        };
        Some(keyword)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::For => "for",
            Keyword::While => "while",
            Keyword::Do => "do",
            Keyword::Switch => "switch",
            Keyword::Return => "return",
            Keyword::Case => "case",
            Keyword::Goto => "goto",
        }
    }

    /// Keywords introducing a parenthesised condition: `if for while switch`
    pub fn is_control(self) -> bool {
        matches!(
            self,
            Keyword::If | Keyword::For | Keyword::While | Keyword::Switch
        )
    }

    /// Keywords that take a plain expression: `return case goto`
    pub fn is_jump(self) -> bool {
        matches!(self, Keyword::Return | Keyword::Case | Keyword::Goto)
    }
}

/// One lexical unit of a C source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Zero-based source line.
    pub line: usize,
    /// Zero-based column in the left-trimmed line.
    pub column: usize,
    /// One column past the last character of the token.
    pub end: usize,
    pub keyword: Option<Keyword>,
    /// Index of the partner bracket, for `( ) { } [ ]` only.
    pub matching: Option<usize>,
    pub paren_depth: usize,
    pub brace_depth: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: String, line: usize, column: usize) -> Self {
        let end = column + text.chars().count();
        let keyword = match kind {
            TokenKind::Identifier => Keyword::from_ident(&text),
            _ => None,
        };
        Self {
            kind,
            text,
            line,
            column,
            end,
            keyword,
            matching: None,
            paren_depth: 0,
            brace_depth: 0,
        }
    }

    pub fn is_punct(&self, text: &str) -> bool {
        self.kind == TokenKind::Punctuation && self.text == text
    }

    pub fn is_ident(&self, text: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text == text
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword == Some(keyword)
    }

    /// True when `next` starts exactly where this token ends on the same line.
    pub fn is_flush_with(&self, next: &Token) -> bool {
        self.line == next.line && self.end == next.column
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::String => write!(f, "string literal {}", self.text),
            TokenKind::Char => write!(f, "char literal {}", self.text),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::FloatLiteral => {
                write!(f, "float literal {}", self.text)
            }
            TokenKind::IntLiteral => write!(f, "int literal {}", self.text),
            TokenKind::Punctuation => write!(f, "'{}'", self.text),
        }
    }
}
