// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recursive-descent formula parser
//!
//! Precedence, lowest first: `?:` (right associative), `||`, `&&`,
//! comparisons (non associative), `+ -`, `* / %`, unary `! -`.

use super::lexer::{tokenize, Token, TokenKind};
use super::node::{BinaryOp, FormulaRoot, Node};
use crate::tick::SignalField;
use thiserror::Error;

/// Errors that can occur while parsing formula text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty formula")]
    Empty,
    #[error("unexpected character '{ch}' at {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("unexpected token '{found}' at {pos}")]
    UnexpectedToken { found: String, pos: usize },
    #[error("unexpected end of formula, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
    #[error("unknown identifier '{name}' at {pos}")]
    UnknownIdentifier { name: String, pos: usize },
    #[error("integer literal out of range at {pos}")]
    IntegerOverflow { pos: usize },
}

/// Parse formula text into a tree
pub fn parse_formula(source: &str) -> Result<FormulaRoot, ParseError> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parser = Parser { tokens, index: 0 };
    let body = parser.expr()?;
    if let Some(token) = parser.peek() {
        return Err(unexpected(token));
    }
    Ok(FormulaRoot::new(body))
}

struct Parser {
    tokens: Vec<Token>,
    index: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<(), ParseError> {
        match self.next() {
            Some(token) if token.kind == kind => Ok(()),
            Some(token) => Err(unexpected(&token)),
            None => Err(ParseError::UnexpectedEnd { expected }),
        }
    }

    fn expr(&mut self) -> Result<Node, ParseError> {
        self.conditional()
    }

    fn conditional(&mut self) -> Result<Node, ParseError> {
        let cond = self.or()?;
        if self.peek_kind() != Some(&TokenKind::Question) {
            return Ok(cond);
        }
        self.next();
        let then = self.expr()?;
        self.expect(TokenKind::Colon, "':'")?;
        let otherwise = self.conditional()?;
        Ok(Node::conditional(cond, then, otherwise))
    }

    fn or(&mut self) -> Result<Node, ParseError> {
        let mut lhs = self.and()?;
        while self.peek_kind() == Some(&TokenKind::OrOr) {
            self.next();
            let rhs = self.and()?;
            lhs = Node::binary(BinaryOp::Or, lhs, rhs);
        }
        Ok(lhs)
    }

    fn and(&mut self) -> Result<Node, ParseError> {
        let mut lhs = self.comparison()?;
        while self.peek_kind() == Some(&TokenKind::AndAnd) {
            self.next();
            let rhs = self.comparison()?;
            lhs = Node::binary(BinaryOp::And, lhs, rhs);
        }
        Ok(lhs)
    }

    fn comparison(&mut self) -> Result<Node, ParseError> {
        let lhs = self.sum()?;
        let op = match self.peek_kind() {
            Some(TokenKind::EqEq) => BinaryOp::Eq,
            Some(TokenKind::NotEq) => BinaryOp::Ne,
            Some(TokenKind::Lt) => BinaryOp::Lt,
            Some(TokenKind::Le) => BinaryOp::Le,
            Some(TokenKind::Gt) => BinaryOp::Gt,
            Some(TokenKind::Ge) => BinaryOp::Ge,
            _ => return Ok(lhs),
        };
        self.next();
        let rhs = self.sum()?;
        Ok(Node::binary(op, lhs, rhs))
    }

    fn sum(&mut self) -> Result<Node, ParseError> {
        let mut lhs = self.product()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.next();
            let rhs = self.product()?;
            lhs = Node::binary(op, lhs, rhs);
        }
    }

    fn product(&mut self) -> Result<Node, ParseError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                Some(TokenKind::Percent) => BinaryOp::Rem,
                _ => return Ok(lhs),
            };
            self.next();
            let rhs = self.unary()?;
            lhs = Node::binary(op, lhs, rhs);
        }
    }

    fn unary(&mut self) -> Result<Node, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::Bang) => {
                self.next();
                Ok(Node::not(self.unary()?))
            }
            Some(TokenKind::Minus) => {
                self.next();
                // Fold `-<literal>` so that i64::MIN is expressible
                if let Some(Token {
                    kind: TokenKind::Int(value),
                    pos,
                }) = self.peek().cloned()
                {
                    self.next();
                    let negated = -i128::from(value);
                    return i64::try_from(negated)
                        .map(Node::Int)
                        .map_err(|_| ParseError::IntegerOverflow { pos });
                }
                Ok(Node::neg(self.unary()?))
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Node, ParseError> {
        let token = self.next().ok_or(ParseError::UnexpectedEnd {
            expected: "a value",
        })?;

        match token.kind {
            TokenKind::Int(value) => i64::try_from(value)
                .map(Node::Int)
                .map_err(|_| ParseError::IntegerOverflow { pos: token.pos }),
            TokenKind::Ident(name) => identifier(name, token.pos),
            TokenKind::LParen => {
                let inner = self.expr()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(Node::wrapped(inner))
            }
            _ => Err(unexpected(&token)),
        }
    }
}

fn identifier(name: String, pos: usize) -> Result<Node, ParseError> {
    match name.as_str() {
        "true" => return Ok(Node::Bool(true)),
        "false" => return Ok(Node::Bool(false)),
        _ => {}
    }

    if let Some(field) = SignalField::from_name(&name) {
        return Ok(Node::Signal(field));
    }

    if let Some(digits) = name.strip_prefix("arg") {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return digits
                .parse::<usize>()
                .map(Node::Arg)
                .map_err(|_| ParseError::IntegerOverflow { pos });
        }
    }

    Err(ParseError::UnknownIdentifier { name, pos })
}

fn unexpected(token: &Token) -> ParseError {
    ParseError::UnexpectedToken {
        found: token.kind.to_string(),
        pos: token.pos,
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
