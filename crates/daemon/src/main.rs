// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tick scheduler daemon (tickd)
//!
//! Loads a job configuration and runs the scheduler until SIGINT/SIGTERM.

use std::path::PathBuf;
use std::process::ExitCode;

use tick_daemon::{setup_logging, shutdown, startup, Config, LifecycleError, SHUTDOWN_GRACE};
use tick_engine::Job;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

const USAGE: &str = "usage: tickd [--check] <config.toml>";

#[tokio::main]
async fn main() -> ExitCode {
    // Parse arguments
    let mut check = false;
    let mut config_path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--check" => check = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return ExitCode::SUCCESS;
            }
            _ if arg.starts_with('-') || config_path.is_some() => {
                eprintln!("{}", USAGE);
                return ExitCode::from(2);
            }
            _ => config_path = Some(PathBuf::from(&arg)),
        }
    }
    let Some(config_path) = config_path else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("tickd: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = if check {
        check_config(&config)
    } else {
        run(&config).await
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tickd: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Validate the configuration and list the jobs it defines
fn check_config(config: &Config) -> Result<(), LifecycleError> {
    let jobs = config.build_jobs()?;
    for job in &jobs {
        println!(
            "{}\t{}\t{}{}",
            job.key(),
            job.formula(),
            job.action().command(),
            if job.is_once() { "\t(once)" } else { "" }
        );
    }
    println!(
        "ok: {} job(s), granularity {}",
        jobs.len(),
        config.scheduler.granularity
    );
    Ok(())
}

async fn run(config: &Config) -> Result<(), LifecycleError> {
    // Set up logging
    let _log_guard = setup_logging(&config.log)?;

    info!(pid = std::process::id(), "starting tickd");

    // Set up signal handlers before any job can run
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let scheduler = match startup(config) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            error!("Failed to start: {}", e);
            return Err(e);
        }
    };

    tokio::select! {
        _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        _ = sigint.recv() => info!("Received SIGINT, shutting down..."),
    }

    shutdown(&scheduler, SHUTDOWN_GRACE).await;
    info!("tickd stopped");
    Ok(())
}
