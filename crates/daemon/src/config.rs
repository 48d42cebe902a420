// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration file
//!
//! ```toml
//! [scheduler]
//! granularity = "minute"
//!
//! [log]
//! level = "debug"
//! file = "/var/log/tickd.log"
//!
//! [[job]]
//! group = "reports"
//! id = "nightly"
//! formula = "hour == arg0 && minute == 0"
//! args = [2]
//! command = "generate-report"
//! timeout = "10m"
//! ```

use crate::command::CommandAction;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tick_core::{Granularity, JobKey, ParseError, SchedulingFormula, Value};
use tick_engine::{FormulaJob, SchedulerError};

/// Errors that can occur while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("job {index}: {field} must not be empty")]
    EmptyField { index: usize, field: &'static str },
    #[error("duplicate job: {0}")]
    DuplicateJob(JobKey),
    #[error("job {key}: invalid formula: {source}")]
    Formula { key: JobKey, source: ParseError },
    #[error(transparent)]
    Job(#[from] SchedulerError),
    #[error("invalid log level {level:?}: {message}")]
    LogLevel { level: String, message: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default, rename = "job")]
    pub jobs: Vec<JobConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SchedulerConfig {
    pub granularity: Granularity,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::Second,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Log file; stderr when absent
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// One `[[job]]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    #[serde(default = "default_group")]
    pub group: String,
    pub id: String,
    pub formula: String,
    #[serde(default)]
    pub args: Vec<Value>,
    /// Shell command run through `sh -c`
    pub command: String,
    #[serde(with = "humantime_serde", default)]
    pub timeout: Option<Duration>,
    /// Remove the job after its first run
    #[serde(default)]
    pub once: bool,
}

fn default_group() -> String {
    "default".to_string()
}

impl JobConfig {
    pub fn key(&self) -> JobKey {
        JobKey::new(&self.group, &self.id)
    }
}

impl Config {
    /// Read and parse a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Validate the job tables and build the jobs they describe
    pub fn build_jobs(&self) -> Result<Vec<FormulaJob<CommandAction>>, ConfigError> {
        let mut seen = BTreeSet::new();
        let mut jobs = Vec::with_capacity(self.jobs.len());
        for (index, raw) in self.jobs.iter().enumerate() {
            for (field, value) in [
                ("group", &raw.group),
                ("id", &raw.id),
                ("command", &raw.command),
            ] {
                if value.trim().is_empty() {
                    return Err(ConfigError::EmptyField { index, field });
                }
            }

            let key = raw.key();
            if !seen.insert(key.clone()) {
                return Err(ConfigError::DuplicateJob(key));
            }

            let formula = SchedulingFormula::parse(&raw.formula).map_err(|source| {
                ConfigError::Formula {
                    key: key.clone(),
                    source,
                }
            })?;
            let action = CommandAction::new(&raw.command).with_timeout(raw.timeout);
            let job = FormulaJob::new(key, formula, raw.args.clone(), action)?;
            jobs.push(if raw.once { job.once() } else { job });
        }
        Ok(jobs)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
