// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Formula tokenizer

use super::parser::ParseError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Unsigned literal; the sign is handled by the parser
    Int(u64),
    Ident(String),
    LParen,
    RParen,
    Bang,
    Minus,
    Plus,
    Star,
    Slash,
    Percent,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    AndAnd,
    OrOr,
    Question,
    Colon,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Int(i) => return write!(f, "{}", i),
            TokenKind::Ident(name) => return f.write_str(name),
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Bang => "!",
            TokenKind::Minus => "-",
            TokenKind::Plus => "+",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Question => "?",
            TokenKind::Colon => ":",
        };
        f.write_str(s)
    }
}

/// A token and its byte offset in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: usize,
}

/// Split formula text into tokens
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        if ch.is_whitespace() {
            continue;
        }

        let kind = match ch {
            '0'..='9' => {
                let mut end = pos + ch.len_utf8();
                while let Some(&(i, c)) = chars.peek() {
                    if !c.is_ascii_digit() {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }
                let value = source[pos..end]
                    .parse::<u64>()
                    .map_err(|_| ParseError::IntegerOverflow { pos })?;
                Some(TokenKind::Int(value))
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut end = pos + c.len_utf8();
                while let Some(&(i, c)) = chars.peek() {
                    if !(c.is_ascii_alphanumeric() || c == '_') {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }
                Some(TokenKind::Ident(source[pos..end].to_string()))
            }
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '*' => Some(TokenKind::Star),
            '/' => Some(TokenKind::Slash),
            '%' => Some(TokenKind::Percent),
            '?' => Some(TokenKind::Question),
            ':' => Some(TokenKind::Colon),
            '!' => pair(&mut chars, '=', TokenKind::NotEq, Some(TokenKind::Bang)),
            '<' => pair(&mut chars, '=', TokenKind::Le, Some(TokenKind::Lt)),
            '>' => pair(&mut chars, '=', TokenKind::Ge, Some(TokenKind::Gt)),
            '=' => pair(&mut chars, '=', TokenKind::EqEq, None),
            '&' => pair(&mut chars, '&', TokenKind::AndAnd, None),
            '|' => pair(&mut chars, '|', TokenKind::OrOr, None),
            _ => None,
        }
        .ok_or(ParseError::UnexpectedChar { ch, pos })?;

        tokens.push(Token { kind, pos });
    }

    Ok(tokens)
}

/// Two-character operator if `second` follows, otherwise the single form
fn pair(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    second: char,
    double: TokenKind,
    single: Option<TokenKind>,
) -> Option<TokenKind> {
    if chars.peek().is_some_and(|&(_, c)| c == second) {
        chars.next();
        Some(double)
    } else {
        single
    }
}

#[cfg(test)]
#[path = "lexer_tests.rs"]
mod tests;
