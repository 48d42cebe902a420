// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell command job action

use async_trait::async_trait;
use std::time::Duration;
use tick_core::{JobKey, TickSignal};
use tick_engine::{JobAction, JobError};
use tokio::process::Command;

/// Runs a shell command for every accepted tick
///
/// The command sees the job and tick through `TICK_GROUP`, `TICK_JOB`,
/// `TICK_TIME` and `TICK_SIGNAL` (the full signal as JSON).
#[derive(Debug, Clone)]
pub struct CommandAction {
    command: String,
    timeout: Option<Duration>,
}

impl CommandAction {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn build(&self, key: &JobKey, signal: &TickSignal) -> Result<Command, JobError> {
        let signal_json =
            serde_json::to_string(signal).map_err(|e| JobError::Failed(e.to_string()))?;
        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(&self.command)
            .env("TICK_GROUP", &key.group_id)
            .env("TICK_JOB", &key.job_id)
            .env("TICK_TIME", signal.time().format("%Y-%m-%dT%H:%M:%S").to_string())
            .env("TICK_SIGNAL", signal_json)
            // Dropping the run (timeout, interrupt) kills the child
            .kill_on_drop(true);
        Ok(cmd)
    }
}

#[async_trait]
impl JobAction for CommandAction {
    async fn execute(&self, key: &JobKey, signal: &TickSignal) -> Result<(), JobError> {
        let mut cmd = self.build(key, signal)?;
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| JobError::Timeout(limit))??,
            None => cmd.output().await?,
        };

        if !output.stdout.is_empty() {
            tracing::info!(
                job = %key,
                stdout = %String::from_utf8_lossy(&output.stdout),
                "command stdout"
            );
        }
        if !output.stderr.is_empty() {
            tracing::warn!(
                job = %key,
                stderr = %String::from_utf8_lossy(&output.stderr),
                "command stderr"
            );
        }

        match output.status.code() {
            Some(0) => Ok(()),
            Some(code) => Err(JobError::Failed(format!("command exited with code {}", code))),
            None => Err(JobError::Failed("command killed by signal".to_string())),
        }
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
