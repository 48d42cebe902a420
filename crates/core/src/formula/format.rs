// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rendering formulas back to source text
//!
//! The output re-parses to a tree that evaluates identically: parentheses
//! are inserted wherever a hand-built tree would otherwise bind differently.

use super::node::{FormulaRoot, Node, Precedence};

/// Accumulates the textual form of a tree
///
/// One visitor serves one pass at a time: `start` discards whatever an
/// unfinished previous pass had buffered.
pub trait FormatVisitor {
    /// Reset the buffer for a new pass
    fn start(&mut self);
    /// Append raw text
    fn print(&mut self, text: &str);
    /// Finish the pass and publish the buffer
    fn end(&mut self);
    /// Text of the last finished pass
    fn text(&self) -> &str;
}

/// Plain string-building visitor
#[derive(Debug, Default)]
pub struct TextFormatVisitor {
    buffer: String,
    text: String,
}

impl TextFormatVisitor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FormatVisitor for TextFormatVisitor {
    fn start(&mut self) {
        self.buffer.clear();
    }

    fn print(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn end(&mut self) {
        self.text = std::mem::take(&mut self.buffer);
    }

    fn text(&self) -> &str {
        &self.text
    }
}

/// Run one complete formatting pass over a root
pub fn format_root<V: FormatVisitor + ?Sized>(root: &FormulaRoot, visitor: &mut V) {
    visitor.start();
    format_node(root.body(), visitor);
    visitor.end();
}

/// Render a node (and its children) into the visitor's buffer
pub fn format_node<V: FormatVisitor + ?Sized>(node: &Node, visitor: &mut V) {
    match node {
        Node::Int(i) => visitor.print(&i.to_string()),
        Node::Bool(b) => visitor.print(if *b { "true" } else { "false" }),
        Node::Signal(field) => visitor.print(field.name()),
        Node::Arg(index) => visitor.print(&format!("arg{}", index)),
        Node::Not(child) => {
            visitor.print("!");
            format_operand(child, child.precedence() < Precedence::Unary, visitor);
        }
        Node::Neg(child) => {
            visitor.print("-");
            format_operand(child, child.precedence() < Precedence::Unary, visitor);
        }
        Node::Wrapped(child) => format_operand(child, true, visitor),
        Node::Binary { op, lhs, rhs } => {
            let prec = op.precedence();
            let lhs_parens = lhs.precedence() < prec
                || (op.is_comparison() && lhs.precedence() == prec);
            format_operand(lhs, lhs_parens, visitor);
            visitor.print(" ");
            visitor.print(op.symbol());
            visitor.print(" ");
            format_operand(rhs, rhs.precedence() <= prec, visitor);
        }
        Node::Conditional {
            cond,
            then,
            otherwise,
        } => {
            format_operand(cond, cond.precedence() <= Precedence::Conditional, visitor);
            visitor.print(" ? ");
            format_node(then, visitor);
            visitor.print(" : ");
            format_node(otherwise, visitor);
        }
    }
}

fn format_operand<V: FormatVisitor + ?Sized>(node: &Node, parens: bool, visitor: &mut V) {
    if parens {
        visitor.print("(");
        format_node(node, visitor);
        visitor.print(")");
    } else {
        format_node(node, visitor);
    }
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
