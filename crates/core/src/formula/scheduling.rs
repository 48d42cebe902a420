// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parsed scheduling formulas

use super::eval::{eval_root, EvalError, EvalVisitor, TickEvalVisitor};
use super::format::{format_root, FormatVisitor, TextFormatVisitor};
use super::inspect;
use super::node::{FormulaRoot, Node, Value};
use super::parser::{parse_formula, ParseError};
use crate::tick::{SignalField, TickSignal};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An immutable formula deciding whether a tick is accepted
///
/// Serialized as its canonical text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SchedulingFormula {
    root: FormulaRoot,
}

impl SchedulingFormula {
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        parse_formula(source).map(Self::new)
    }

    pub fn new(root: FormulaRoot) -> Self {
        Self { root }
    }

    pub fn from_node(body: Node) -> Self {
        Self::new(FormulaRoot::new(body))
    }

    pub fn root(&self) -> &FormulaRoot {
        &self.root
    }

    /// Evaluate against one tick
    pub fn eval(&self, signal: &TickSignal, args: &[Value]) -> Result<Value, EvalError> {
        eval_root(&self.root, &TickEvalVisitor::new(signal, args))
    }

    /// Evaluate and coerce the result to a boolean
    pub fn matches(&self, signal: &TickSignal, args: &[Value]) -> Result<bool, EvalError> {
        let visitor = TickEvalVisitor::new(signal, args);
        let value = eval_root(&self.root, &visitor)?;
        Ok(visitor.to_boolean(value))
    }

    /// Minimum argument list length
    pub fn required_args(&self) -> usize {
        inspect::required_args(self.root.body())
    }

    pub fn signal_fields(&self) -> Vec<SignalField> {
        inspect::signal_fields(self.root.body())
    }
}

impl fmt::Display for SchedulingFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut visitor = TextFormatVisitor::new();
        format_root(&self.root, &mut visitor);
        f.write_str(visitor.text())
    }
}

impl FromStr for SchedulingFormula {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SchedulingFormula {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<SchedulingFormula> for String {
    fn from(formula: SchedulingFormula) -> Self {
        formula.to_string()
    }
}

#[cfg(test)]
#[path = "scheduling_tests.rs"]
mod tests;
