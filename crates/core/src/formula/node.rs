// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Formula syntax tree
//!
//! Nodes are immutable and own their children exclusively. Interpretations
//! (formatting, evaluation, analysis) live in sibling modules as free
//! functions that match on [`Node`], so adding one never touches this file.

use crate::tick::SignalField;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime value produced by evaluating a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Bool(bool),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Bool(_) => "boolean",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Binding strength, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Conditional,
    Or,
    And,
    Comparison,
    Sum,
    Product,
    Unary,
    Primary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
        }
    }

    pub fn precedence(self) -> Precedence {
        match self {
            BinaryOp::Or => Precedence::Or,
            BinaryOp::And => Precedence::And,
            BinaryOp::Eq
            | BinaryOp::Ne
            | BinaryOp::Lt
            | BinaryOp::Le
            | BinaryOp::Gt
            | BinaryOp::Ge => Precedence::Comparison,
            BinaryOp::Add | BinaryOp::Sub => Precedence::Sum,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => Precedence::Product,
        }
    }

    /// Comparisons do not chain: `a < b < c` is rejected by the parser
    pub fn is_comparison(self) -> bool {
        self.precedence() == Precedence::Comparison
    }
}

/// A formula syntax tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Integer literal
    Int(i64),
    /// `true` / `false`
    Bool(bool),
    /// Reference to a tick signal field, e.g. `minute`
    Signal(SignalField),
    /// Reference to a job argument, e.g. `arg0`
    Arg(usize),
    /// Logical negation `!x`
    Not(Box<Node>),
    /// Arithmetic negation `-x`
    Neg(Box<Node>),
    /// Explicit parentheses; purely presentational
    Wrapped(Box<Node>),
    Binary {
        op: BinaryOp,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },
    /// `cond ? then : otherwise`
    Conditional {
        cond: Box<Node>,
        then: Box<Node>,
        otherwise: Box<Node>,
    },
}

impl Node {
    pub fn not(child: Node) -> Self {
        Node::Not(Box::new(child))
    }

    pub fn neg(child: Node) -> Self {
        Node::Neg(Box::new(child))
    }

    pub fn wrapped(child: Node) -> Self {
        Node::Wrapped(Box::new(child))
    }

    pub fn binary(op: BinaryOp, lhs: Node, rhs: Node) -> Self {
        Node::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn conditional(cond: Node, then: Node, otherwise: Node) -> Self {
        Node::Conditional {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    /// How tightly this node binds when rendered as text
    pub fn precedence(&self) -> Precedence {
        match self {
            // A negative literal renders with a leading minus
            Node::Int(i) if *i < 0 => Precedence::Unary,
            Node::Int(_) | Node::Bool(_) | Node::Signal(_) | Node::Arg(_) | Node::Wrapped(_) => {
                Precedence::Primary
            }
            Node::Not(_) | Node::Neg(_) => Precedence::Unary,
            Node::Binary { op, .. } => op.precedence(),
            Node::Conditional { .. } => Precedence::Conditional,
        }
    }
}

/// Top of a parsed expression
///
/// Marks where a formatting pass starts and ends; evaluation delegates to
/// the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaRoot {
    body: Node,
}

impl FormulaRoot {
    pub fn new(body: Node) -> Self {
        Self { body }
    }

    pub fn body(&self) -> &Node {
        &self.body
    }

    pub fn into_body(self) -> Node {
        self.body
    }
}
