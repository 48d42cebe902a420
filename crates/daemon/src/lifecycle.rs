// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle: startup and graceful shutdown

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tick_engine::{Scheduler, SchedulerError};
use tracing::{info, warn};

use crate::config::{Config, ConfigError};

/// How long shutdown waits for in-flight runs after interrupting them
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Errors that can occur during daemon lifecycle
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid log file path: {}", .0.display())]
    InvalidLogPath(PathBuf),
    #[error("logging setup failed: {0}")]
    Logging(String),
}

/// Register every configured job and start ticking
pub fn startup(config: &Config) -> Result<Scheduler, LifecycleError> {
    let jobs = config.build_jobs()?;
    let scheduler = Scheduler::new(config.scheduler.granularity);
    for job in jobs {
        scheduler.add_job(job)?;
    }
    scheduler.start()?;
    info!(
        granularity = %scheduler.granularity(),
        jobs = scheduler.get_job_count(),
        "scheduler running"
    );
    Ok(scheduler)
}

/// Stop ticking, interrupt running jobs and wait up to `grace` for them
///
/// Returns the number of runs still in flight when the grace period ended.
pub async fn shutdown(scheduler: &Scheduler, grace: Duration) -> usize {
    scheduler.stop().await;

    let interrupted = scheduler.interrupt_jobs(None, None);
    if interrupted > 0 {
        info!(interrupted, "waiting for running jobs");
    }

    let deadline = tokio::time::Instant::now() + grace;
    while scheduler.get_running_job_count() > 0 && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let remaining = scheduler.get_running_job_count();
    if remaining > 0 {
        warn!(remaining, "jobs still running at shutdown");
    }
    remaining
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
