// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Static analysis over formula trees

use super::node::Node;
use crate::tick::SignalField;

/// Number of arguments a tree needs: one past the highest `argN` it reads
pub fn required_args(node: &Node) -> usize {
    match node {
        Node::Int(_) | Node::Bool(_) | Node::Signal(_) => 0,
        Node::Arg(index) => index.saturating_add(1),
        Node::Not(child) | Node::Neg(child) | Node::Wrapped(child) => required_args(child),
        Node::Binary { lhs, rhs, .. } => required_args(lhs).max(required_args(rhs)),
        Node::Conditional {
            cond,
            then,
            otherwise,
        } => required_args(cond)
            .max(required_args(then))
            .max(required_args(otherwise)),
    }
}

/// Signal fields referenced anywhere in the tree, in first-use order
pub fn signal_fields(node: &Node) -> Vec<SignalField> {
    let mut fields = Vec::new();
    collect_fields(node, &mut fields);
    fields
}

fn collect_fields(node: &Node, out: &mut Vec<SignalField>) {
    match node {
        Node::Signal(field) => {
            if !out.contains(field) {
                out.push(*field);
            }
        }
        Node::Int(_) | Node::Bool(_) | Node::Arg(_) => {}
        Node::Not(child) | Node::Neg(child) | Node::Wrapped(child) => collect_fields(child, out),
        Node::Binary { lhs, rhs, .. } => {
            collect_fields(lhs, out);
            collect_fields(rhs, out);
        }
        Node::Conditional {
            cond,
            then,
            otherwise,
        } => {
            collect_fields(cond, out);
            collect_fields(then, out);
            collect_fields(otherwise, out);
        }
    }
}

#[cfg(test)]
#[path = "inspect_tests.rs"]
mod tests;
