// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run identifiers for dispatched job executions
//!
//! Every time the scheduler hands a job to a worker task it tags the run
//! with an id so the log lines of one execution can be correlated.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of a single job run
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunId(pub String);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generates run identifiers
pub trait RunIdGen: Send + Sync {
    fn next_run_id(&self) -> RunId;
}

/// UUID-based run ids for production use
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidRunIds;

impl RunIdGen for UuidRunIds {
    fn next_run_id(&self) -> RunId {
        RunId(uuid::Uuid::new_v4().to_string())
    }
}

/// Sequential run ids (`run-1`, `run-2`, ...) for tests
#[derive(Debug)]
pub struct SequentialRunIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialRunIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(1),
        }
    }
}

impl Default for SequentialRunIds {
    fn default() -> Self {
        Self::new("run")
    }
}

impl RunIdGen for SequentialRunIds {
    fn next_run_id(&self) -> RunId {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        RunId(format!("{}-{}", self.prefix, n))
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
