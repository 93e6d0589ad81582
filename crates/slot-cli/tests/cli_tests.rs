//! Integration tests for the `slots` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to run the dates, times and batch
//! subcommands against the JSON fixtures, including file output, config
//! loading, timezone overrides and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Helper: path to the single-service snapshot fixture.
fn salon_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/salon.json")
}

/// Helper: directory of `<service_id>.json` snapshots.
fn snapshots_dir() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/snapshots")
}

fn queries_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/queries.json")
}

fn slots() -> Command {
    let mut cmd = Command::cargo_bin("slots").unwrap();
    cmd.env_remove("SLOTS_TIMEZONE").env_remove("RUST_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout must be JSON")
}

fn labels(times: &Value) -> Vec<String> {
    times
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["time"].as_str().unwrap().to_string())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// times
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn times_merges_stations_in_time_order() {
    let times = stdout_json(slots().args(["times", "-s", salon_path(), "--date", "2026-03-16"]));

    assert_eq!(
        labels(&times),
        vec![
            "09:00", "11:00", "12:00", "13:00", "13:00", "13:30", "14:00", "14:00", "14:30",
            "15:00", "16:00"
        ]
    );
    // tub-1 is booked 10:00-11:00.
    assert!(!labels(&times).contains(&"10:00".to_string()));

    let table: Vec<&Value> = times
        .as_array()
        .unwrap()
        .iter()
        .filter(|t| t["stationId"] == "table-2")
        .collect();
    assert_eq!(table.len(), 4);
    assert!(table.iter().all(|t| t["requiresStaffApproval"] == true));
    assert!(table.iter().all(|t| t["duration"] == 30));
}

#[test]
fn times_with_duration_override() {
    let times = stdout_json(slots().args([
        "times",
        "-s",
        salon_path(),
        "--date",
        "2026-03-16",
        "--duration",
        "120",
    ]));
    let all = labels(&times);
    // tub-1: 11:00-17:00 fits 120 minutes from 11:00 to 15:00; table-2 fits 13:00 only.
    assert_eq!(all, vec!["11:00", "12:00", "13:00", "13:00", "14:00", "15:00"]);
}

#[test]
fn times_rejects_duration_below_granularity() {
    slots()
        .args([
            "times",
            "-s",
            salon_path(),
            "--date",
            "2026-03-16",
            "--duration",
            "5",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("below the minimum"));
}

#[test]
fn times_on_blocked_day_is_empty_list() {
    // Tuesday: tub-1 is on vacation and table-2 only works Mondays.
    slots()
        .args(["times", "-s", salon_path(), "--date", "2026-03-17"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[]"));
}

// ─────────────────────────────────────────────────────────────────────────────
// dates
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn dates_skip_weekends_and_blocked_days() {
    let dates = stdout_json(slots().args(["dates", "-s", salon_path(), "--from", "2026-03-16"]));

    let days: Vec<&str> = dates
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["date"].as_str().unwrap())
        .collect();
    // daysAhead in the snapshot is 6: Mon 16 through Sun 22.
    assert_eq!(days, vec!["2026-03-16", "2026-03-18", "2026-03-19", "2026-03-20"]);

    assert_eq!(dates[0]["slots"], 11);
    assert_eq!(dates[0]["stationId"], "tub-1");
    assert_eq!(dates[0]["available"], true);
}

#[test]
fn dates_days_ahead_flag_overrides_snapshot() {
    let dates = stdout_json(slots().args([
        "dates",
        "-s",
        salon_path(),
        "--from",
        "2026-03-16",
        "--days-ahead",
        "0",
    ]));
    assert_eq!(dates.as_array().unwrap().len(), 1);
}

#[test]
fn dates_for_month() {
    let dates = stdout_json(slots().args(["dates", "-s", salon_path(), "--month", "2026-03"]));
    // 22 weekdays in March 2026, minus the blocked Tuesday 17th.
    assert_eq!(dates.as_array().unwrap().len(), 21);
}

#[test]
fn dates_month_conflicts_with_from() {
    slots()
        .args([
            "dates",
            "-s",
            salon_path(),
            "--month",
            "2026-03",
            "--from",
            "2026-03-16",
        ])
        .assert()
        .failure();
}

#[test]
fn dates_invalid_month() {
    slots()
        .args(["dates", "-s", salon_path(), "--month", "2026-13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn dates_written_to_file() {
    let output_path = std::env::temp_dir().join("slots-test-dates-output.json");
    let _ = std::fs::remove_file(&output_path);

    slots()
        .args(["dates", "-s", salon_path(), "--from", "2026-03-16"])
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let dates: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(dates.as_array().unwrap().len(), 4);

    let _ = std::fs::remove_file(&output_path);
}

// ─────────────────────────────────────────────────────────────────────────────
// timezone and config
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn timezone_flag_reinterprets_appointments() {
    // 10:00-11:00Z is 06:00-07:00 in New York, before opening.
    let times = stdout_json(slots().args([
        "--timezone",
        "America/New_York",
        "times",
        "-s",
        salon_path(),
        "--date",
        "2026-03-16",
    ]));
    assert_eq!(times.as_array().unwrap().len(), 12);
    assert!(labels(&times).contains(&"10:00".to_string()));
}

#[test]
fn timezone_from_environment() {
    let times = stdout_json(
        slots()
            .env("SLOTS_TIMEZONE", "America/New_York")
            .args(["times", "-s", salon_path(), "--date", "2026-03-16"]),
    );
    assert_eq!(times.as_array().unwrap().len(), 12);
}

#[test]
fn invalid_timezone_fails() {
    slots()
        .args(["--timezone", "Mars/Base", "dates", "-s", salon_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone"));
}

#[test]
fn config_file_sets_granularity() {
    let config_path = std::env::temp_dir().join("slots-test-config.json");
    std::fs::write(&config_path, r#"{"min_granularity_minutes": 60}"#).unwrap();

    slots()
        .arg("--config")
        .arg(&config_path)
        .args([
            "times",
            "-s",
            salon_path(),
            "--date",
            "2026-03-16",
            "--duration",
            "30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("minimum of 60 minutes"));

    let _ = std::fs::remove_file(&config_path);
}

#[test]
fn missing_snapshot_file_fails() {
    slots()
        .args(["dates", "-s", "/nonexistent/snapshot.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read snapshot"));
}

// ─────────────────────────────────────────────────────────────────────────────
// batch
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn batch_answers_each_query() {
    let responses = stdout_json(slots().args(["batch", "--snapshots", snapshots_dir(), "-i", queries_path()]));
    let responses = responses.as_array().unwrap();
    assert_eq!(responses.len(), 4);

    assert_eq!(responses[0]["success"], true);
    assert_eq!(responses[0]["availableTimes"].as_array().unwrap().len(), 11);

    assert_eq!(responses[1]["success"], true);
    assert_eq!(responses[1]["availableDates"].as_array().unwrap().len(), 4);

    // A snapshot that cannot be parsed is an upstream failure, not "no slots".
    assert_eq!(responses[2]["success"], false);
    assert!(responses[2]["error"]
        .as_str()
        .unwrap()
        .starts_with("Upstream unavailable"));
    assert!(responses[2].get("availableDates").is_none());

    assert_eq!(responses[3]["success"], false);
    assert!(responses[3]["error"].as_str().unwrap().contains("below the minimum"));
}

#[test]
fn batch_reads_queries_from_stdin() {
    let input = r#"[{"serviceId":"missing","date":"2026-03-16"}]"#;
    let responses = stdout_json(
        slots()
            .args(["batch", "--snapshots", snapshots_dir()])
            .write_stdin(input),
    );
    assert_eq!(responses[0]["success"], false);
    assert_eq!(responses[0]["error"], "Unknown service: missing");
}

#[test]
fn batch_rejects_malformed_queries() {
    slots()
        .args(["batch", "--snapshots", snapshots_dir()])
        .write_stdin("{not a list}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse queries"));
}
