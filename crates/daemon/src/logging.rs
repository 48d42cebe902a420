// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing subscriber setup

use crate::config::{ConfigError, LogConfig};
use crate::lifecycle::LifecycleError;
use tracing_appender::non_blocking::WorkerGuard;

/// Build the filter: `RUST_LOG` wins over the configured level
pub fn log_filter(config: &LogConfig) -> Result<tracing_subscriber::EnvFilter, ConfigError> {
    use tracing_subscriber::EnvFilter;

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|e| ConfigError::LogLevel {
        level: config.level.clone(),
        message: e.to_string(),
    })
}

/// Install the global subscriber. Keep the guard alive until exit so
/// buffered lines are flushed.
pub fn setup_logging(config: &LogConfig) -> Result<WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*};

    let filter = log_filter(config)?;

    let (non_blocking, guard) = match &config.file {
        Some(path) => {
            let dir = match path.parent() {
                Some(dir) if !dir.as_os_str().is_empty() => dir,
                _ => std::path::Path::new("."),
            };
            std::fs::create_dir_all(dir)?;
            let file_name = path
                .file_name()
                .ok_or_else(|| LifecycleError::InvalidLogPath(path.clone()))?;
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name))
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(config.file.is_none()),
        )
        .try_init()
        .map_err(|e| LifecycleError::Logging(e.to_string()))?;

    Ok(guard)
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
