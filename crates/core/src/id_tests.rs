// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::Arc;

#[test]
fn uuid_run_ids_are_unique() {
    let ids = UuidRunIds;
    let a = ids.next_run_id();
    let b = ids.next_run_id();
    assert_ne!(a, b);
    assert_eq!(a.0.len(), 36);
}

#[test]
fn sequential_run_ids_are_predictable() {
    let ids = SequentialRunIds::new("tick");
    assert_eq!(ids.next_run_id().to_string(), "tick-1");
    assert_eq!(ids.next_run_id().to_string(), "tick-2");
}

#[test]
fn sequential_run_ids_are_shared_behind_trait_object() {
    let ids: Arc<dyn RunIdGen> = Arc::new(SequentialRunIds::default());
    let other = Arc::clone(&ids);
    assert_eq!(ids.next_run_id().0, "run-1");
    assert_eq!(other.next_run_id().0, "run-2");
}
