//! Expression tokenizer and implicit-multiplication rewriting.
//!
//! The engineering shorthand users type (`3t`, `2u(t)`, `)(`) is resolved
//! here as a token-adjacency pass rather than text substitution: the
//! source is lexed once, a multiplication token is inserted between every
//! adjacent pair matching one of the shorthand contexts, and the token
//! stream is rendered back to canonical text (`^` becomes `**`,
//! whitespace is dropped). Inserting `*` breaks every adjacency pattern,
//! so the rewrite is idempotent by construction.
//!
//! Safety screening also happens here: identifiers outside the primitive
//! set and any attribute-access attempt (`.` not starting a number) are
//! rejected before anything is evaluated.

use crate::ast::Primitive;
use crate::error::CompileError;
use nom::{
    branch::alt,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{opt, recognize},
    sequence::pair,
    IResult, Parser,
};
use std::fmt;

/// One lexed element of an expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// Numeric literal, stored with its original spelling.
    Number(String),
    /// The free variable, carrying its letter.
    Var(char),
    /// A named primitive (`sin`, `u`, `d`, ...).
    Func(Primitive),
    /// The constant `pi`.
    Pi,
    Plus,
    Minus,
    Star,
    Slash,
    /// Exponentiation; both `^` and `**` lex to this.
    Power,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(text) => f.write_str(text),
            Token::Var(letter) => write!(f, "{}", letter),
            Token::Func(p) => f.write_str(p.name()),
            Token::Pi => f.write_str("pi"),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::Power => f.write_str("**"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

/// A token with the 1-based source column it started at.
#[derive(Clone, Debug, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub column: usize,
}

/// Numeric literal: `2`, `2.`, `2.5`, `.5`, with an optional exponent.
fn lex_number(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
        opt(recognize((one_of("eE"), opt(one_of("+-")), digit1))),
    ))
    .parse(input)
}

fn classify_word(word: &str, variable: char) -> Result<Token, CompileError> {
    let mut chars = word.chars();
    if chars.next() == Some(variable) && chars.next().is_none() {
        return Ok(Token::Var(variable));
    }
    if word == "pi" {
        return Ok(Token::Pi);
    }
    if let Some(primitive) = Primitive::from_name(word) {
        return Ok(Token::Func(primitive));
    }
    Err(CompileError::unsafe_expr(format!("unknown name '{}'", word)))
}

/// Lex an expression into spanned tokens.
///
/// Rejects anything outside the closed grammar: unknown identifiers,
/// underscored names, and attribute access are `Unsafe`; stray characters
/// are `Syntax`.
pub fn tokenize(source: &str, variable: char) -> Result<Vec<Spanned>, CompileError> {
    let mut tokens = Vec::new();
    let mut rest = source;

    loop {
        rest = rest.trim_start();
        let column = source.len() - rest.len() + 1;

        let Some(c) = rest.chars().next() else {
            break;
        };

        let (token, consumed) = match c {
            '+' => (Token::Plus, 1),
            '-' => (Token::Minus, 1),
            '*' => {
                if rest[1..].starts_with('*') {
                    (Token::Power, 2)
                } else {
                    (Token::Star, 1)
                }
            }
            '^' => (Token::Power, 1),
            '/' => (Token::Slash, 1),
            '(' => (Token::LParen, 1),
            ')' => (Token::RParen, 1),
            '0'..='9' => {
                let (after, text) = lex_number(rest).map_err(|_| {
                    CompileError::syntax(column, format!("malformed number starting at '{}'", c))
                })?;
                (Token::Number(text.to_string()), rest.len() - after.len())
            }
            '.' => {
                // A dot can only start a fractional literal; anything else
                // is an attribute-access attempt on a preceding name.
                if rest[1..].starts_with(|d: char| d.is_ascii_digit()) {
                    let (after, text) = lex_number(rest).map_err(|_| {
                        CompileError::syntax(column, "malformed number".to_string())
                    })?;
                    (Token::Number(text.to_string()), rest.len() - after.len())
                } else {
                    return Err(CompileError::unsafe_expr(
                        "attribute access is not allowed",
                    ));
                }
            }
            '_' => {
                return Err(CompileError::unsafe_expr(
                    "underscored names are not allowed",
                ));
            }
            c if c.is_ascii_alphabetic() => {
                let word: String = rest.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
                let token = classify_word(&word, variable)?;
                let len = word.len();
                (token, len)
            }
            other => {
                return Err(CompileError::syntax(
                    column,
                    format!("unexpected character '{}'", other),
                ));
            }
        };

        tokens.push(Spanned { token, column });
        rest = &rest[consumed..];
    }

    Ok(tokens)
}

/// The adjacency contexts where a multiplication is implied.
fn needs_star(prev: &Token, next: &Token) -> bool {
    use Token::*;
    matches!(
        (prev, next),
        (Number(_), Var(_))
            | (RParen, Var(_))
            | (Var(_), LParen)
            | (Var(_), Number(_))
            | (Number(_) | RParen, Func(_) | Pi)
            | (RParen, LParen)
    )
}

/// Insert a `*` between every adjacent token pair matching a shorthand rule.
pub fn insert_implicit_mul(tokens: Vec<Spanned>) -> Vec<Spanned> {
    let mut out: Vec<Spanned> = Vec::with_capacity(tokens.len());
    for spanned in tokens {
        if let Some(prev) = out.last() {
            if needs_star(&prev.token, &spanned.token) {
                out.push(Spanned {
                    token: Token::Star,
                    column: spanned.column,
                });
            }
        }
        out.push(spanned);
    }
    out
}

/// Render a token stream back to canonical text.
///
/// A space is kept between two word-like tokens so re-lexing the output
/// yields the same token stream (`t u` must not glue into `tu`).
pub fn render(tokens: &[Spanned]) -> String {
    let mut out = String::new();
    for spanned in tokens {
        let text = spanned.token.to_string();
        if wordlike_boundary(&out, &text) {
            out.push(' ');
        }
        out.push_str(&text);
    }
    out
}

fn wordlike_boundary(out: &str, next: &str) -> bool {
    let Some(prev) = out.chars().last() else {
        return false;
    };
    let Some(first) = next.chars().next() else {
        return false;
    };
    let wordish = |c: char| c.is_ascii_alphanumeric() || c == '.';
    wordish(prev) && wordish(first)
}

/// Normalize an expression: lex, insert implicit multiplication, render.
///
/// The result is what the parser actually consumes, exposed so callers
/// can show users how their shorthand was read.
pub fn normalize(source: &str, variable: char) -> Result<String, CompileError> {
    let tokens = insert_implicit_mul(tokenize(source, variable)?);
    Ok(render(&tokens))
}
