// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Tick scheduler engine

mod error;
mod formula_job;
mod job;
mod scheduler;
mod tick_loop;

pub use error::{JobError, SchedulerError};
pub use formula_job::FormulaJob;
pub use job::{Job, JobAction};
pub use scheduler::Scheduler;
