// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job identity and lifecycle flags
//!
//! A job is registered under a `(group, job)` key. Its lifecycle is tracked
//! with two flags that both the scheduler and the job body touch from
//! different tasks, so they are atomics rather than fields behind a lock.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Composite key identifying a job within a scheduler
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobKey {
    pub group_id: String,
    pub job_id: String,
}

impl JobKey {
    pub fn new(group_id: impl Into<String>, job_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            job_id: job_id.into(),
        }
    }

    /// Check the key against optional filters; `None` matches anything
    pub fn matches(&self, group_id: Option<&str>, job_id: Option<&str>) -> bool {
        group_id.is_none_or(|g| g == self.group_id) && job_id.is_none_or(|j| j == self.job_id)
    }
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group_id, self.job_id)
    }
}

/// Observable state of a registered job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    /// Waiting for a tick it accepts
    Registered,
    /// `run` is executing
    Running,
    /// Marked for removal; terminal
    Disposed,
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobState::Registered => "registered",
            JobState::Running => "running",
            JobState::Disposed => "disposed",
        };
        write!(f, "{}", s)
    }
}

/// Disposal and interrupt flags shared between a job and its scheduler
#[derive(Debug, Default)]
pub struct JobLifecycle {
    disposed: AtomicBool,
    interrupted: AtomicBool,
}

impl JobLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the job disposed. Returns true only for the call that flipped
    /// the flag; later calls are no-ops.
    pub fn dispose(&self) -> bool {
        !self.disposed.swap(true, Ordering::SeqCst)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Ask a running job to stop at its next check
    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    /// Reset the interrupt flag before a new run
    pub fn clear_interrupt(&self) {
        self.interrupted.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
