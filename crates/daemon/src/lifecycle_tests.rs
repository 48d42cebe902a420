// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

async fn wait_for(mut condition: impl FnMut() -> bool) {
    for _ in 0..500 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached in time");
}

fn job_config(id: &str, command: &str) -> String {
    format!(
        "[[job]]\ngroup = \"test\"\nid = \"{}\"\nformula = \"true\"\ncommand = '{}'\nonce = true\n",
        id, command
    )
}

#[tokio::test]
async fn startup_runs_configured_jobs() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("ran");
    let config = Config::parse(&job_config(
        "touch",
        &format!("echo \"$TICK_JOB\" > {}", marker.display()),
    ))
    .unwrap();

    let scheduler = startup(&config).unwrap();
    assert!(scheduler.is_started());

    wait_for(|| scheduler.get_job_count() == 0).await;
    assert_eq!(std::fs::read_to_string(&marker).unwrap().trim(), "touch");
    assert_eq!(shutdown(&scheduler, Duration::from_secs(1)).await, 0);
    assert!(!scheduler.is_started());
}

#[tokio::test]
async fn startup_rejects_invalid_jobs() {
    let config = Config::parse(&format!(
        "{}{}",
        job_config("same", "true"),
        job_config("same", "true")
    ))
    .unwrap();
    assert!(matches!(
        startup(&config),
        Err(LifecycleError::Config(ConfigError::DuplicateJob(_)))
    ));
}

#[tokio::test]
async fn shutdown_interrupts_running_jobs() {
    let config = Config::parse(&job_config("slow", "sleep 30")).unwrap();
    let scheduler = startup(&config).unwrap();
    wait_for(|| scheduler.get_running_job_count() == 1).await;

    assert_eq!(shutdown(&scheduler, Duration::from_secs(5)).await, 0);
    assert_eq!(scheduler.get_running_job_count(), 0);
}
