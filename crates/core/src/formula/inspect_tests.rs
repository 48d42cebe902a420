// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::formula::parser::parse_formula;
use yare::parameterized;

fn body(source: &str) -> Node {
    parse_formula(source).unwrap().into_body()
}

#[parameterized(
    no_args = { "second == 0", 0 },
    first_arg = { "arg0", 1 },
    highest_wins = { "arg3 > arg1", 4 },
    nested_in_conditional = { "true ? 1 : -(arg7)", 8 },
    under_not = { "!arg2", 3 },
)]
fn counts_required_args(source: &str, expected: usize) {
    assert_eq!(required_args(&body(source)), expected);
}

#[test]
fn collects_signal_fields_once_in_order() {
    let fields = signal_fields(&body("minute % 5 == 0 && second == 0 && minute > 1"));
    assert_eq!(fields, vec![SignalField::Minute, SignalField::Second]);
}

#[test]
fn literal_formula_has_no_fields() {
    assert!(signal_fields(&body("!(1)")).is_empty());
}
