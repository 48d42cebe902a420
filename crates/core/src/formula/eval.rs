// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Evaluating formulas against a tick signal and job arguments

use super::node::{BinaryOp, FormulaRoot, Node, Value};
use crate::tick::TickSignal;
use thiserror::Error;

/// Errors raised while evaluating a single formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("cannot compare {lhs} with {rhs}")]
    Incomparable { lhs: &'static str, rhs: &'static str },
    #[error("missing argument arg{index} ({provided} provided)")]
    MissingArgument { index: usize, provided: usize },
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in '{op}'")]
    Overflow { op: &'static str },
}

/// Supplies the evaluation environment and value coercions
pub trait EvalVisitor {
    fn signal(&self) -> &TickSignal;

    fn arg(&self, index: usize) -> Result<Value, EvalError>;

    /// Integers are true when non-zero
    fn to_boolean(&self, value: Value) -> bool {
        match value {
            Value::Bool(b) => b,
            Value::Int(i) => i != 0,
        }
    }

    fn to_int(&self, value: Value) -> Result<i64, EvalError> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(EvalError::TypeMismatch {
                expected: "integer",
                found: other.type_name(),
            }),
        }
    }
}

/// Evaluates against one tick and a fixed argument list
#[derive(Debug, Clone, Copy)]
pub struct TickEvalVisitor<'a> {
    signal: &'a TickSignal,
    args: &'a [Value],
}

impl<'a> TickEvalVisitor<'a> {
    pub fn new(signal: &'a TickSignal, args: &'a [Value]) -> Self {
        Self { signal, args }
    }
}

impl EvalVisitor for TickEvalVisitor<'_> {
    fn signal(&self) -> &TickSignal {
        self.signal
    }

    fn arg(&self, index: usize) -> Result<Value, EvalError> {
        self.args
            .get(index)
            .copied()
            .ok_or(EvalError::MissingArgument {
                index,
                provided: self.args.len(),
            })
    }
}

pub fn eval_root<V: EvalVisitor + ?Sized>(root: &FormulaRoot, visitor: &V) -> Result<Value, EvalError> {
    eval_node(root.body(), visitor)
}

/// Evaluate a node; nothing is cached between calls
pub fn eval_node<V: EvalVisitor + ?Sized>(node: &Node, visitor: &V) -> Result<Value, EvalError> {
    match node {
        Node::Int(i) => Ok(Value::Int(*i)),
        Node::Bool(b) => Ok(Value::Bool(*b)),
        Node::Signal(field) => Ok(Value::Int(visitor.signal().field(*field))),
        Node::Arg(index) => visitor.arg(*index),
        Node::Not(child) => {
            let value = eval_node(child, visitor)?;
            Ok(Value::Bool(!visitor.to_boolean(value)))
        }
        Node::Neg(child) => {
            let i = visitor.to_int(eval_node(child, visitor)?)?;
            i.checked_neg()
                .map(Value::Int)
                .ok_or(EvalError::Overflow { op: "-" })
        }
        Node::Wrapped(child) => eval_node(child, visitor),
        Node::Binary { op, lhs, rhs } => eval_binary(*op, lhs, rhs, visitor),
        Node::Conditional {
            cond,
            then,
            otherwise,
        } => {
            if visitor.to_boolean(eval_node(cond, visitor)?) {
                eval_node(then, visitor)
            } else {
                eval_node(otherwise, visitor)
            }
        }
    }
}

fn eval_binary<V: EvalVisitor + ?Sized>(
    op: BinaryOp,
    lhs: &Node,
    rhs: &Node,
    visitor: &V,
) -> Result<Value, EvalError> {
    // Short-circuit operators evaluate the right side lazily
    match op {
        BinaryOp::Or => {
            let left = visitor.to_boolean(eval_node(lhs, visitor)?);
            return Ok(Value::Bool(
                left || visitor.to_boolean(eval_node(rhs, visitor)?),
            ));
        }
        BinaryOp::And => {
            let left = visitor.to_boolean(eval_node(lhs, visitor)?);
            return Ok(Value::Bool(
                left && visitor.to_boolean(eval_node(rhs, visitor)?),
            ));
        }
        _ => {}
    }

    let left = eval_node(lhs, visitor)?;
    let right = eval_node(rhs, visitor)?;

    match op {
        BinaryOp::Eq | BinaryOp::Ne => {
            let equal = match (left, right) {
                (Value::Int(a), Value::Int(b)) => a == b,
                (Value::Bool(a), Value::Bool(b)) => a == b,
                (a, b) => {
                    return Err(EvalError::Incomparable {
                        lhs: a.type_name(),
                        rhs: b.type_name(),
                    })
                }
            };
            Ok(Value::Bool(if op == BinaryOp::Eq { equal } else { !equal }))
        }
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let a = visitor.to_int(left)?;
            let b = visitor.to_int(right)?;
            let result = match op {
                BinaryOp::Lt => a < b,
                BinaryOp::Le => a <= b,
                BinaryOp::Gt => a > b,
                _ => a >= b,
            };
            Ok(Value::Bool(result))
        }
        _ => {
            let a = visitor.to_int(left)?;
            let b = visitor.to_int(right)?;
            arithmetic(op, a, b).map(Value::Int)
        }
    }
}

fn arithmetic(op: BinaryOp, a: i64, b: i64) -> Result<i64, EvalError> {
    let overflow = EvalError::Overflow { op: op.symbol() };
    match op {
        BinaryOp::Add => a.checked_add(b).ok_or(overflow),
        BinaryOp::Sub => a.checked_sub(b).ok_or(overflow),
        BinaryOp::Mul => a.checked_mul(b).ok_or(overflow),
        BinaryOp::Div | BinaryOp::Rem if b == 0 => Err(EvalError::DivisionByZero),
        BinaryOp::Div => a.checked_div(b).ok_or(overflow),
        BinaryOp::Rem => a.checked_rem(b).ok_or(overflow),
        _ => Err(EvalError::TypeMismatch {
            expected: "arithmetic operator",
            found: op.symbol(),
        }),
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod tests;
