// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tick_engine::Job;
use yare::parameterized;

const FULL: &str = r#"
[scheduler]
granularity = "minute"

[log]
level = "debug"
file = "/tmp/tickd.log"

[[job]]
group = "reports"
id = "nightly"
formula = "hour == arg0 && minute == 0"
args = [2]
command = "generate-report"
timeout = "10m"

[[job]]
id = "heartbeat"
formula = "true"
command = "echo alive"
once = true
"#;

#[test]
fn parses_full_config() {
    let config = Config::parse(FULL).unwrap();
    assert_eq!(config.scheduler.granularity, Granularity::Minute);
    assert_eq!(config.log.level, "debug");
    assert_eq!(config.log.file, Some(PathBuf::from("/tmp/tickd.log")));
    assert_eq!(config.jobs.len(), 2);

    let nightly = &config.jobs[0];
    assert_eq!(nightly.key(), JobKey::new("reports", "nightly"));
    assert_eq!(nightly.args, vec![Value::Int(2)]);
    assert_eq!(nightly.timeout, Some(Duration::from_secs(600)));
    assert!(!nightly.once);

    let heartbeat = &config.jobs[1];
    assert_eq!(heartbeat.group, "default");
    assert!(heartbeat.once);
    assert_eq!(heartbeat.timeout, None);
}

#[test]
fn empty_config_uses_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config.scheduler.granularity, Granularity::Second);
    assert_eq!(config.log.level, "info");
    assert!(config.log.file.is_none());
    assert!(config.build_jobs().unwrap().is_empty());
}

#[test]
fn builds_jobs_from_tables() {
    let jobs = Config::parse(FULL).unwrap().build_jobs().unwrap();
    assert_eq!(jobs.len(), 2);

    assert_eq!(jobs[0].key().to_string(), "reports/nightly");
    assert_eq!(jobs[0].formula().to_string(), "hour == arg0 && minute == 0");
    assert_eq!(jobs[0].action().command(), "generate-report");
    assert_eq!(jobs[0].action().timeout(), Some(Duration::from_secs(600)));
    assert!(!jobs[0].is_once());

    assert_eq!(jobs[1].key().to_string(), "default/heartbeat");
    assert!(jobs[1].is_once());
}

#[parameterized(
    top_level = { "verbose = true" },
    scheduler = { "[scheduler]\ntick = \"second\"" },
    job = { "[[job]]\nid = \"a\"\nformula = \"true\"\ncommand = \"x\"\nretries = 3" },
    granularity = { "[scheduler]\ngranularity = \"fortnight\"" },
    bad_timeout = { "[[job]]\nid = \"a\"\nformula = \"true\"\ncommand = \"x\"\ntimeout = \"soon\"" },
    missing_command = { "[[job]]\nid = \"a\"\nformula = \"true\"" },
)]
fn rejects_malformed_toml(content: &str) {
    assert!(matches!(Config::parse(content), Err(ConfigError::Toml(_))));
}

#[test]
fn duplicate_keys_are_rejected() {
    let config = Config::parse(
        r#"
[[job]]
group = "g"
id = "a"
formula = "true"
command = "x"

[[job]]
group = "g"
id = "a"
formula = "false"
command = "y"
"#,
    )
    .unwrap();
    let err = config.build_jobs().err();
    assert!(matches!(err, Some(ConfigError::DuplicateJob(ref key)) if key.to_string() == "g/a"));
}

#[test]
fn bad_formula_names_the_job() {
    let config = Config::parse(
        r#"
[[job]]
id = "a"
formula = "minute =="
command = "x"
"#,
    )
    .unwrap();
    let err = config.build_jobs().err().unwrap();
    assert!(matches!(err, ConfigError::Formula { .. }));
    assert!(err.to_string().starts_with("job default/a: invalid formula"));
}

#[test]
fn missing_arguments_are_reported() {
    let config = Config::parse(
        r#"
[[job]]
id = "a"
formula = "minute == arg1"
args = [5]
command = "x"
"#,
    )
    .unwrap();
    assert!(matches!(
        config.build_jobs().err(),
        Some(ConfigError::Job(SchedulerError::MissingArguments {
            required: 2,
            provided: 1,
            ..
        }))
    ));
}

#[parameterized(
    id = { "id = \"\"\ncommand = \"x\"", "id" },
    command = { "id = \"a\"\ncommand = \"  \"", "command" },
)]
fn empty_fields_are_rejected(body: &str, expected: &str) {
    let config = Config::parse(&format!("[[job]]\nformula = \"true\"\n{}", body)).unwrap();
    assert!(matches!(
        config.build_jobs().err(),
        Some(ConfigError::EmptyField { index: 0, field }) if field == expected
    ));
}

#[test]
fn load_reports_missing_file() {
    let err = Config::load(Path::new("/nonexistent/tickd.toml")).err().unwrap();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("/nonexistent/tickd.toml"));
}
