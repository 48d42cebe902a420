// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the scheduler and job runs

use std::time::Duration;
use thiserror::Error;
use tick_core::{EvalError, JobKey};

/// Errors returned by scheduler operations
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("job already registered: {0}")]
    DuplicateJob(JobKey),
    #[error("scheduler already started")]
    AlreadyStarted,
    #[error("no tokio runtime available")]
    NoRuntime,
    #[error("job {key}: formula needs {required} argument(s), {provided} given")]
    MissingArguments {
        key: JobKey,
        required: usize,
        provided: usize,
    },
}

/// Errors returned from a job run
///
/// These never leave the dispatch boundary; the scheduler logs them.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("{0}")]
    Failed(String),
    #[error("formula evaluation failed: {0}")]
    Eval(#[from] EvalError),
    #[error("interrupted")]
    Interrupted,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}
