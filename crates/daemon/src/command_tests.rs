// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::NaiveDate;
use tick_core::Granularity;

fn key() -> JobKey {
    JobKey::new("reports", "nightly")
}

fn signal() -> TickSignal {
    let time = NaiveDate::from_ymd_opt(2026, 3, 14)
        .unwrap()
        .and_hms_opt(2, 30, 0)
        .unwrap();
    TickSignal::at(time, Granularity::Minute)
}

#[tokio::test]
async fn exports_job_and_tick_environment() {
    let action = CommandAction::new(
        r#"test "$TICK_GROUP/$TICK_JOB" = "reports/nightly" && test "$TICK_TIME" = "2026-03-14T02:30:00""#,
    );
    action.execute(&key(), &signal()).await.unwrap();
}

#[tokio::test]
async fn signal_is_exported_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("signal.json");
    let action = CommandAction::new(format!("printf '%s' \"$TICK_SIGNAL\" > '{}'", out.display()));
    action.execute(&key(), &signal()).await.unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["hour"], 2);
    assert_eq!(json["minute"], 30);
    assert_eq!(json["dayOfWeek"], 6);
    assert_eq!(json["granularity"], "minute");
}

#[tokio::test]
async fn nonzero_exit_fails_the_run() {
    let err = CommandAction::new("exit 3")
        .execute(&key(), &signal())
        .await
        .err()
        .unwrap();
    assert!(matches!(err, JobError::Failed(ref msg) if msg.contains("code 3")));
}

#[tokio::test]
async fn slow_command_times_out() {
    let action = CommandAction::new("sleep 5").with_timeout(Some(Duration::from_millis(100)));
    let err = action.execute(&key(), &signal()).await.err().unwrap();
    assert!(matches!(err, JobError::Timeout(d) if d == Duration::from_millis(100)));
}

#[tokio::test]
async fn fast_command_within_timeout_succeeds() {
    let action = CommandAction::new("true").with_timeout(Some(Duration::from_secs(5)));
    action.execute(&key(), &signal()).await.unwrap();
}
