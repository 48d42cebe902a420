// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job service provider interface

use crate::{JobError, Scheduler};
use async_trait::async_trait;
use tick_core::{JobKey, JobLifecycle, TickSignal};

/// A unit of recurring work owned by a [`Scheduler`]
///
/// `accept_tick` is called once per tick from the tick loop and must be
/// cheap and free of side effects. `run` executes on its own tokio task and
/// may take arbitrarily long; the scheduler does not dispatch the same job
/// again until it returns.
#[async_trait]
pub trait Job: Send + Sync + 'static {
    fn key(&self) -> &JobKey;

    fn lifecycle(&self) -> &JobLifecycle;

    /// Decide whether this tick should start a run
    fn accept_tick(&self, signal: &TickSignal) -> bool;

    async fn run(&self, scheduler: &Scheduler, signal: &TickSignal) -> Result<(), JobError>;

    fn group_id(&self) -> &str {
        &self.key().group_id
    }

    fn job_id(&self) -> &str {
        &self.key().job_id
    }

    /// Request removal. The job leaves the registry once it is idle.
    fn dispose(&self) -> bool {
        self.lifecycle().dispose()
    }

    fn is_disposed(&self) -> bool {
        self.lifecycle().is_disposed()
    }

    /// Set by [`Scheduler::interrupt_jobs`]; long runs should poll it
    fn is_interrupted(&self) -> bool {
        self.lifecycle().is_interrupted()
    }
}

/// The work a [`FormulaJob`](crate::FormulaJob) performs when its formula matches
#[async_trait]
pub trait JobAction: Send + Sync + 'static {
    async fn execute(&self, key: &JobKey, signal: &TickSignal) -> Result<(), JobError>;
}
