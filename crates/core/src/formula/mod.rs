// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduling formula language
//!
//! Text such as `minute % 5 == 0 && second == 0` is parsed into a tree of
//! [`Node`]s, rendered back with a [`FormatVisitor`] and evaluated against a
//! [`TickSignal`](crate::tick::TickSignal) with an [`EvalVisitor`].

mod eval;
mod format;
mod inspect;
mod lexer;
mod node;
mod parser;
mod scheduling;

pub use eval::{eval_node, eval_root, EvalError, EvalVisitor, TickEvalVisitor};
pub use format::{format_node, format_root, FormatVisitor, TextFormatVisitor};
pub use inspect::{required_args, signal_fields};
pub use node::{BinaryOp, FormulaRoot, Node, Precedence, Value};
pub use parser::{parse_formula, ParseError};
pub use scheduling::SchedulingFormula;
