// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tickd: host process for the tick scheduler

pub mod command;
pub mod config;
pub mod lifecycle;
pub mod logging;

pub use command::CommandAction;
pub use config::{Config, ConfigError, JobConfig, LogConfig, SchedulerConfig};
pub use lifecycle::{shutdown, startup, LifecycleError, SHUTDOWN_GRACE};
pub use logging::setup_logging;
