//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a temporary data directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_focusboard"))
        .args(args)
        .env("FOCUSBOARD_DATA_DIR", data_dir)
        .env_remove("FOCUSBOARD_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_ok(data_dir: &Path, args: &[&str]) -> String {
    let (code, stdout, stderr) = run_cli(data_dir, args);
    assert_eq!(code, 0, "command {args:?} failed: {stderr}");
    stdout
}

fn parse_json(text: &str) -> serde_json::Value {
    serde_json::from_str(text).expect("Failed to parse JSON output")
}

#[test]
fn test_timer_status_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let status = parse_json(&run_ok(dir.path(), &["timer", "status"]));
    assert_eq!(status["type"], "state_snapshot");
    assert_eq!(status["state"], "idle");
    assert_eq!(status["category"], "focus");
    assert_eq!(status["target_secs"], 1500);
}

#[test]
fn test_start_stop_records_session() {
    let dir = tempfile::tempdir().unwrap();
    let started = parse_json(&run_ok(dir.path(), &["timer", "start", "--category", "work"]));
    assert_eq!(started["type"], "timer_started");
    assert_eq!(started["category"], "work");

    let session = parse_json(&run_ok(
        dir.path(),
        &["timer", "stop", "--name", "Review", "--tags", "pr,code"],
    ));
    assert_eq!(session["category"], "work");
    assert_eq!(session["name"], "Review");
    assert_eq!(session["satisfaction"], 3);
    assert_eq!(session["tags"], serde_json::json!(["pr", "code"]));

    let list = parse_json(&run_ok(dir.path(), &["session", "list"]));
    assert_eq!(list.as_array().unwrap().len(), 1);

    let streak = parse_json(&run_ok(dir.path(), &["streak"]));
    assert_eq!(streak["count"], 1);
}

#[test]
fn test_stop_without_session() {
    let dir = tempfile::tempdir().unwrap();
    let out = parse_json(&run_ok(dir.path(), &["timer", "stop"]));
    assert_eq!(out["type"], "no_active_session");
}

#[test]
fn test_session_add_update_delete() {
    let dir = tempfile::tempdir().unwrap();
    let added = parse_json(&run_ok(
        dir.path(),
        &["session", "add", "--category", "study", "--length", "45m"],
    ));
    assert_eq!(added["duration"], 2700);
    let id = added["id"].as_str().unwrap().to_string();

    let updated = parse_json(&run_ok(
        dir.path(),
        &["session", "update", &id, "--satisfaction", "5"],
    ));
    assert_eq!(updated["satisfaction"], 5);

    let (code, _, stderr) = run_cli(dir.path(), &["session", "update", &id, "--satisfaction", "9"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("satisfaction"));

    let deleted = parse_json(&run_ok(dir.path(), &["session", "delete", &id]));
    assert_eq!(deleted["deleted"], id.as_str());
    let list = parse_json(&run_ok(dir.path(), &["session", "list"]));
    assert!(list.as_array().unwrap().is_empty());

    let (code, _, _) = run_cli(dir.path(), &["session", "delete", &id]);
    assert_eq!(code, 1);
}

#[test]
fn test_preset_is_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let stored = parse_json(&run_ok(dir.path(), &["preset", "set", "break", "10s"]));
    assert_eq!(stored["break"], 60);
    let presets = parse_json(&run_ok(dir.path(), &["preset", "list"]));
    assert_eq!(presets["break"], 60);
    assert_eq!(presets["focus"], 1500);
}

#[test]
fn test_goal_set_and_show() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["goal", "set", "daily", "2h"]);
    let progress = parse_json(&run_ok(dir.path(), &["goal", "show"]));
    assert_eq!(progress[0]["period"], "daily");
    assert_eq!(progress[0]["target_secs"], 7200);

    let (code, _, _) = run_cli(dir.path(), &["goal", "set", "daily", "30h"]);
    assert_eq!(code, 1);
}

#[test]
fn test_export_csv_and_import_json() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["session", "add", "--category", "focus", "--length", "25m"]);
    run_ok(dir.path(), &["session", "add", "--category", "break", "--length", "5m"]);

    let csv = run_ok(dir.path(), &["export", "--format", "csv"]);
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("\"ID\",\"Start Time\""));
    assert_eq!(lines.count(), 2);

    let export_path = dir.path().join("sessions.json");
    run_ok(
        dir.path(),
        &["export", "--format", "json", "--output", export_path.to_str().unwrap()],
    );

    let other = tempfile::tempdir().unwrap();
    let out = parse_json(&run_ok(other.path(), &["import", export_path.to_str().unwrap()]));
    assert_eq!(out["imported"], 2);
    let again = parse_json(&run_ok(other.path(), &["import", export_path.to_str().unwrap()]));
    assert_eq!(again["imported"], 0);
    assert_eq!(again["skipped"], 2);
}

#[test]
fn test_settings_and_config() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["settings", "set", "timerMode", "stopwatch"]);
    assert_eq!(run_ok(dir.path(), &["settings", "get", "timerMode"]).trim(), "stopwatch");

    let (code, _, _) = run_cli(dir.path(), &["settings", "set", "timerMode", "sandglass"]);
    assert_eq!(code, 1);

    let set = parse_json(&run_ok(
        dir.path(),
        &["config", "set", "storage.save_interval_secs", "10"],
    ));
    assert_eq!(set["value"], "10");
    assert_eq!(
        run_ok(dir.path(), &["config", "get", "storage.save_interval_secs"]).trim(),
        "10"
    );
    let (code, _, _) = run_cli(dir.path(), &["config", "get", "ui.theme"]);
    assert_eq!(code, 1);
}

#[test]
fn test_category_switch_reports_discard() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["timer", "start"]);
    let changed = parse_json(&run_ok(dir.path(), &["timer", "category", "break"]));
    assert_eq!(changed["type"], "category_changed");
    assert_eq!(changed["from"], "focus");
    assert_eq!(changed["to"], "break");

    let status = parse_json(&run_ok(dir.path(), &["timer", "status"]));
    assert_eq!(status["state"], "idle");
    assert_eq!(status["target_secs"], 300);
}

#[test]
fn test_session_add_rejects_huge_length() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(
        dir.path(),
        &["session", "add", "--category", "focus", "--length", "10000000000000000s"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("length"));

    let (code, _, _) = run_cli(
        dir.path(),
        &["session", "add", "--category", "focus", "--length", "9223372036854775s"],
    );
    assert_eq!(code, 1);

    let (code, _, _) = run_cli(
        dir.path(),
        &["session", "add", "--category", "focus", "--length", "99999999999999999999s"],
    );
    assert_eq!(code, 1);

    let list = parse_json(&run_ok(dir.path(), &["session", "list"]));
    assert!(list.as_array().unwrap().is_empty());
}

#[test]
fn test_session_clear_requires_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["session", "add", "--category", "work", "--length", "50m"]);

    let (code, _, _) = run_cli(dir.path(), &["session", "clear"]);
    assert_eq!(code, 1);

    let cleared = parse_json(&run_ok(dir.path(), &["session", "clear", "--yes"]));
    assert_eq!(cleared["deleted"], 1);
}

#[test]
fn test_stats_days_is_bounded() {
    let dir = tempfile::tempdir().unwrap();
    let summary = parse_json(&run_ok(dir.path(), &["stats", "--days", "366"]));
    assert_eq!(summary["daily"].as_array().unwrap().len(), 366);

    let (code, _, _) = run_cli(dir.path(), &["stats", "--days", "4294967295"]);
    assert_ne!(code, 0);
}
