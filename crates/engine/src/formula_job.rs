// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jobs scheduled by a formula

use crate::{Job, JobAction, JobError, Scheduler, SchedulerError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tick_core::{JobKey, JobLifecycle, SchedulingFormula, TickSignal, Value};

/// How often a run checks its interrupt flag
const INTERRUPT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A job that accepts every tick its formula matches
pub struct FormulaJob<A> {
    key: JobKey,
    lifecycle: JobLifecycle,
    formula: SchedulingFormula,
    args: Vec<Value>,
    action: A,
    once: bool,
    /// Set while evaluation keeps failing, so only the first failure warns
    failing: AtomicBool,
}

impl<A: JobAction> FormulaJob<A> {
    /// Fails when the formula references more arguments than given
    pub fn new(
        key: JobKey,
        formula: SchedulingFormula,
        args: Vec<Value>,
        action: A,
    ) -> Result<Self, SchedulerError> {
        let required = formula.required_args();
        if args.len() < required {
            return Err(SchedulerError::MissingArguments {
                key,
                required,
                provided: args.len(),
            });
        }
        Ok(Self {
            key,
            lifecycle: JobLifecycle::new(),
            formula,
            args,
            action,
            once: false,
            failing: AtomicBool::new(false),
        })
    }

    /// Dispose the job when its first run starts
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    pub fn is_once(&self) -> bool {
        self.once
    }

    pub fn formula(&self) -> &SchedulingFormula {
        &self.formula
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn action(&self) -> &A {
        &self.action
    }

    /// Whether the last evaluation of the formula failed
    pub fn is_failing(&self) -> bool {
        self.failing.load(Ordering::Relaxed)
    }

    async fn interrupted(&self) {
        while !self.lifecycle.is_interrupted() {
            tokio::time::sleep(INTERRUPT_POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl<A: JobAction> Job for FormulaJob<A> {
    fn key(&self) -> &JobKey {
        &self.key
    }

    fn lifecycle(&self) -> &JobLifecycle {
        &self.lifecycle
    }

    fn accept_tick(&self, signal: &TickSignal) -> bool {
        match self.formula.matches(signal, &self.args) {
            Ok(accepted) => {
                if self.failing.swap(false, Ordering::Relaxed) {
                    tracing::info!(job = %self.key, "formula evaluates again");
                }
                accepted
            }
            Err(e) => {
                if self.failing.swap(true, Ordering::Relaxed) {
                    tracing::debug!(job = %self.key, error = %e, "formula evaluation still failing");
                } else {
                    tracing::warn!(
                        job = %self.key,
                        formula = %self.formula,
                        error = %e,
                        "formula evaluation failed, tick not accepted"
                    );
                }
                false
            }
        }
    }

    async fn run(&self, _scheduler: &Scheduler, signal: &TickSignal) -> Result<(), JobError> {
        if self.once {
            self.dispose();
        }
        tokio::select! {
            biased;
            result = self.action.execute(&self.key, signal) => result,
            _ = self.interrupted() => Err(JobError::Interrupted),
        }
    }
}

#[cfg(test)]
#[path = "formula_job_tests.rs"]
mod tests;
