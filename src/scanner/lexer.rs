use winnow::combinator::alt;
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::stream::{LocatingSlice, Location};
use winnow::token::{any, take_while};

use crate::error::{Diagnostics, ScanError};
use crate::scanner::intern::Interner;
use crate::scanner::token::{Literal, Span, Token, TokenKind, keyword_kind};

type Input<'a> = LocatingSlice<&'a str>;

/// A recognized lexeme before interning, carrying its parsed payload.
#[derive(Debug)]
enum RawToken {
    Plain(TokenKind),
    Ident(String),
    Text(String),
    Char(char),
    Int(i64),
    Real(f64),
}

impl RawToken {
    fn into_token(self, span: Span, line: usize, interner: &mut Interner) -> Token {
        let (kind, literal) = match self {
            Self::Plain(kind) => (kind, None),
            Self::Ident(text) => (
                TokenKind::Identifier,
                Some(Literal::Text(interner.intern(&text))),
            ),
            Self::Text(text) => (
                TokenKind::String,
                Some(Literal::Text(interner.intern(&text))),
            ),
            Self::Char(c) => (TokenKind::Char, Some(Literal::Char(c))),
            Self::Int(v) => (TokenKind::Integer, Some(Literal::Int(v))),
            Self::Real(v) => (TokenKind::Real, Some(Literal::Real(v))),
        };
        Token::new(kind, literal, span, line)
    }
}

/// Outcome of one lexeme parser: a token, or a discarded lexeme whose
/// diagnostic the scan loop will report.
#[derive(Debug)]
enum Scanned {
    Lexeme(RawToken),
    Malformed { message: &'static str },
}

fn whitespace_and_comments<'a>(input: &mut Input<'a>) -> ModalResult<()> {
    loop {
        let before = input.current_token_start();
        take_while(0.., |c: char| {
            c == ' ' || c == '\t' || c == '\r' || c == '\n'
        })
        .void()
        .parse_next(input)?;

        if input.starts_with("//") {
            // A comment goes until the end of the line.
            take_while(0.., |c: char| c != '\n')
                .void()
                .parse_next(input)?;
        } else if input.current_token_start() == before {
            break;
        }
    }
    Ok(())
}

fn string_or_char_literal<'a>(input: &mut Input<'a>) -> ModalResult<(Scanned, Span)> {
    let start = input.current_token_start();
    '\''.parse_next(input)?;
    let mut text = String::new();
    loop {
        let next: Result<char, ErrMode<ContextError>> = any.parse_next(input);
        match next {
            Ok('\'') => break,
            Ok(c) => text.push(c),
            Err(_) => {
                // Ran off the end of input before the closing quote.
                let end = input.current_token_start();
                return Ok((
                    Scanned::Malformed {
                        message: "unterminated string",
                    },
                    Span::new(start, end - start),
                ));
            }
        }
    }
    let end = input.current_token_start();
    let span = Span::new(start, end - start);

    let mut chars = text.chars();
    let raw = match (chars.next(), chars.next()) {
        (Some(c), None) => RawToken::Char(c),
        _ => RawToken::Text(text),
    };
    Ok((Scanned::Lexeme(raw), span))
}

fn number_literal<'a>(input: &mut Input<'a>) -> ModalResult<(Scanned, Span)> {
    let start = input.current_token_start();
    let whole: &str = take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    let mut lexeme = whole.to_string();
    let mut is_real = false;

    // The fractional branch is only taken when a digit follows the period,
    // so `3.` stays an integer and `1..10` keeps its range token.
    let checkpoint = input.checkpoint();
    let dot_result: Result<char, ErrMode<ContextError>> = '.'.parse_next(input);
    if dot_result.is_ok() {
        match take_while::<_, _, ContextError>(1.., |c: char| c.is_ascii_digit()).parse_next(input)
        {
            Ok(frac) => {
                lexeme.push('.');
                lexeme.push_str(frac);
                is_real = true;
            }
            Err(_) => {
                input.reset(&checkpoint);
            }
        }
    }

    let end = input.current_token_start();
    let span = Span::new(start, end - start);
    let scanned = if is_real {
        match lexeme.parse::<f64>() {
            Ok(value) if value.is_finite() => Scanned::Lexeme(RawToken::Real(value)),
            _ => Scanned::Malformed {
                message: "value out of range",
            },
        }
    } else {
        match lexeme.parse::<i64>() {
            Ok(value) => Scanned::Lexeme(RawToken::Int(value)),
            Err(_) => Scanned::Malformed {
                message: "value out of range",
            },
        }
    };
    Ok((scanned, span))
}

fn identifier_or_keyword<'a>(input: &mut Input<'a>) -> ModalResult<(Scanned, Span)> {
    let start = input.current_token_start();
    let first: char = any.verify(|c: &char| c.is_alphabetic()).parse_next(input)?;
    let rest: &str = take_while(0.., |c: char| c.is_alphanumeric()).parse_next(input)?;
    let end = input.current_token_start();
    let mut lexeme = String::with_capacity(first.len_utf8() + rest.len());
    lexeme.push(first);
    lexeme.push_str(rest);
    let raw = match keyword_kind(&lexeme) {
        Some(kind) => RawToken::Plain(kind),
        None => RawToken::Ident(lexeme),
    };
    Ok((Scanned::Lexeme(raw), Span::new(start, end - start)))
}

fn two_char_token<'a>(input: &mut Input<'a>) -> ModalResult<(Scanned, Span)> {
    let start = input.current_token_start();
    let kind = alt((
        ":=".value(TokenKind::Assign),
        "<=".value(TokenKind::LessEqual),
        "<>".value(TokenKind::NotEqual),
        ">=".value(TokenKind::GreaterEqual),
        "..".value(TokenKind::DotDot),
    ))
    .parse_next(input)?;
    Ok((
        Scanned::Lexeme(RawToken::Plain(kind)),
        Span::new(start, 2),
    ))
}

fn single_char_token<'a>(input: &mut Input<'a>) -> ModalResult<(Scanned, Span)> {
    let start = input.current_token_start();
    let c = any
        .verify(|c: &char| "+-*/=<>()[],.;:".contains(*c))
        .parse_next(input)?;
    let kind = match c {
        '+' => TokenKind::Plus,
        '-' => TokenKind::Minus,
        '*' => TokenKind::Star,
        '/' => TokenKind::Slash,
        '=' => TokenKind::Equal,
        '<' => TokenKind::Less,
        '>' => TokenKind::Greater,
        '(' => TokenKind::LeftParen,
        ')' => TokenKind::RightParen,
        '[' => TokenKind::LeftBracket,
        ']' => TokenKind::RightBracket,
        ',' => TokenKind::Comma,
        '.' => TokenKind::Period,
        ';' => TokenKind::Semicolon,
        ':' => TokenKind::Colon,
        _ => unreachable!("verify guarantees valid char"),
    };
    Ok((
        Scanned::Lexeme(RawToken::Plain(kind)),
        Span::new(start, 1),
    ))
}

fn scan_lexeme<'a>(input: &mut Input<'a>) -> ModalResult<(Scanned, Span)> {
    alt((
        string_or_char_literal,
        number_literal,
        identifier_or_keyword,
        two_char_token,
        single_char_token,
    ))
    .parse_next(input)
}

/// Incremental byte-offset to 1-based line translation. Offsets must be
/// queried in non-decreasing order, which the scan loop guarantees.
struct LineTracker<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> LineTracker<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, offset: usize) -> usize {
        let upto = offset.min(self.source.len());
        if upto > self.pos {
            self.line += self.source[self.pos..upto]
                .bytes()
                .filter(|&b| b == b'\n')
                .count();
            self.pos = upto;
        }
        self.line
    }
}

/// Scan the whole source, returning every recognized token plus the
/// diagnostics for discarded lexemes. Never fails: malformed input is
/// reported and skipped, and the token list always ends with `Eof`.
pub fn scan_all(source: &str) -> (Vec<Token>, Diagnostics) {
    let mut input = LocatingSlice::new(source);
    let mut tokens = Vec::new();
    let mut diagnostics = Diagnostics::new();
    let mut interner = Interner::new();
    let mut lines = LineTracker::new(source);

    loop {
        if whitespace_and_comments(&mut input).is_err() {
            break;
        }
        if input.is_empty() {
            break;
        }
        match scan_lexeme(&mut input) {
            Ok((Scanned::Lexeme(raw), span)) => {
                let line = lines.line_at(span.offset);
                tokens.push(raw.into_token(span, line, &mut interner));
            }
            Ok((Scanned::Malformed { message }, span)) => {
                let line = lines.line_at(span.offset + span.len);
                diagnostics.report(ScanError::new(message, span, line));
            }
            Err(_) => {
                let offset = input.current_token_start();
                let c = any::<_, ContextError>.parse_next(&mut input).ok();
                let ch = c.unwrap_or('?');
                let span = Span::new(offset, ch.len_utf8());
                let line = lines.line_at(offset);
                diagnostics.report(ScanError::new(
                    format!("unknown character '{ch}'"),
                    span,
                    line,
                ));
            }
        }
    }

    let eof_line = lines.line_at(source.len());
    tokens.push(Token::new(
        TokenKind::Eof,
        None,
        Span::new(source.len(), 0),
        eof_line,
    ));
    (tokens, diagnostics)
}
