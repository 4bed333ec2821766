use std::fmt;
use std::rc::Rc;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum TokenKind {
    // Single-character tokens
    Plus,
    Minus,
    Star,
    Slash,
    Equal,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Comma,
    Period,
    Semicolon,
    Colon,

    // One or two character tokens
    Less,
    LessEqual,
    NotEqual,
    Greater,
    GreaterEqual,
    Assign,
    DotDot,

    // Literals
    Identifier,
    String,
    Char,
    Integer,
    Real,

    // Keywords
    And,
    Array,
    Begin,
    Case,
    Const,
    Div,
    Do,
    Downto,
    Else,
    End,
    File,
    For,
    Function,
    Goto,
    If,
    In,
    Label,
    Mod,
    Nil,
    Not,
    Of,
    Or,
    Packed,
    Procedure,
    Program,
    Record,
    Repeat,
    Set,
    Then,
    To,
    Type,
    Until,
    Var,
    While,
    With,

    Eof,
}

/// Typed payload attached to literal and identifier tokens. Structural
/// tokens and keywords carry no payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    /// Identifier or string text, interned so equal lexemes share storage.
    Text(Rc<str>),
    Char(char),
    Int(i64),
    Real(f64),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "\"{s}\""),
            Self::Char(c) => write!(f, "'{c}'"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(span.offset.into(), span.len)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: Option<Literal>,
    pub span: Span,
    /// 1-based source line the lexeme started on.
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, literal: Option<Literal>, span: Span, line: usize) -> Self {
        Self {
            kind,
            literal,
            span,
            line,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Some(literal) => write!(f, "{} {}", self.kind, literal),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Keyword spellings are matched exactly, in lowercase only.
pub fn keyword_kind(ident: &str) -> Option<TokenKind> {
    match ident {
        "and" => Some(TokenKind::And),
        "array" => Some(TokenKind::Array),
        "begin" => Some(TokenKind::Begin),
        "case" => Some(TokenKind::Case),
        "const" => Some(TokenKind::Const),
        "div" => Some(TokenKind::Div),
        "do" => Some(TokenKind::Do),
        "downto" => Some(TokenKind::Downto),
        "else" => Some(TokenKind::Else),
        "end" => Some(TokenKind::End),
        "file" => Some(TokenKind::File),
        "for" => Some(TokenKind::For),
        "function" => Some(TokenKind::Function),
        "goto" => Some(TokenKind::Goto),
        "if" => Some(TokenKind::If),
        "in" => Some(TokenKind::In),
        "label" => Some(TokenKind::Label),
        "mod" => Some(TokenKind::Mod),
        "nil" => Some(TokenKind::Nil),
        "not" => Some(TokenKind::Not),
        "of" => Some(TokenKind::Of),
        "or" => Some(TokenKind::Or),
        "packed" => Some(TokenKind::Packed),
        "procedure" => Some(TokenKind::Procedure),
        "program" => Some(TokenKind::Program),
        "record" => Some(TokenKind::Record),
        "repeat" => Some(TokenKind::Repeat),
        "set" => Some(TokenKind::Set),
        "then" => Some(TokenKind::Then),
        "to" => Some(TokenKind::To),
        "type" => Some(TokenKind::Type),
        "until" => Some(TokenKind::Until),
        "var" => Some(TokenKind::Var),
        "while" => Some(TokenKind::While),
        "with" => Some(TokenKind::With),
        _ => None,
    }
}
