//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(dir: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_liquid-cli"))
        .env("LIQUID_DATA_DIR", dir.path())
        .env_remove("LIQUID_ENV")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_today_starts_empty() {
    let dir = TempDir::new().unwrap();
    let snap = run_json(&dir, &["today"]);
    assert_eq!(snap["total_oz"], 0);
    assert_eq!(snap["goal_oz"], 64);
    assert_eq!(snap["cup_size_oz"], 8);
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_drink_and_remove() {
    let dir = TempDir::new().unwrap();
    let date = "2024-05-01";
    run_json(&dir, &["drink", "amount", "16", "--date", date]);
    run_json(&dir, &["drink", "amount", "16", "--date", date]);
    let snap = run_json(&dir, &["drink", "remove", "--date", date]);
    assert_eq!(snap["total_oz"], 24);
    assert_eq!(snap["progress_pct"], 37);

    let snap = run_json(&dir, &["drink", "amount", "-50", "--date", date]);
    assert_eq!(snap["total_oz"], 0);
}

#[test]
fn test_quarter_cup_with_tiny_cup_is_noop() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(&dir, &["cup", "set", "2"]);
    assert_eq!(code, 0);

    let (stdout, stderr, code) = run_cli(&dir, &["drink", "quarter", "--date", "2024-05-01"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("nothing logged"));
    let snap: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snap["total_oz"], 0);
}

#[test]
fn test_cup_round_trip() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, &["cup", "set", "12"]);
    let (stdout, _, code) = run_cli(&dir, &["cup", "get"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "12");
}

#[test]
fn test_invalid_goal_fails() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["goal", "set", "0"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid goal"));
}

#[test]
fn test_goal_from_date() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, &["goal", "set", "80", "--from", "2024-05-10"]);
    let (before, _, _) = run_cli(&dir, &["goal", "get", "--date", "2024-05-09"]);
    let (after, _, _) = run_cli(&dir, &["goal", "get", "--date", "2024-05-11"]);
    assert_eq!(before.trim(), "64");
    assert_eq!(after.trim(), "80");
}

#[test]
fn test_history_range() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, &["drink", "amount", "64", "--date", "2024-05-01"]);
    run_cli(&dir, &["drink", "amount", "32", "--date", "2024-05-03"]);

    let report = run_json(&dir, &["history", "--from", "2024-05-01", "--to", "2024-05-03"]);
    let entries = report["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["date"], "2024-05-03");
    assert_eq!(report["stats"]["average_oz"], 48);
    assert_eq!(report["stats"]["percent_on_target"], 50);
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["config", "get", "reminder.day_start"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "07:00");

    let (_, _, code) = run_cli(&dir, &["config", "set", "goal.default_goal_oz", "96"]);
    assert_eq!(code, 0);
    let snap = run_json(&dir, &["today"]);
    assert_eq!(snap["goal_oz"], 96);

    let (_, _, code) = run_cli(&dir, &["config", "set", "no.such.key", "1"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_rejects_non_positive_defaults() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["config", "set", "goal.default_goal_oz", "-5"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("goal.default_goal_oz"));

    let (_, _, code) = run_cli(&dir, &["config", "set", "intake.default_cup_size_oz", "0"]);
    assert_ne!(code, 0);

    let (stdout, _, _) = run_cli(&dir, &["config", "get", "goal.default_goal_oz"]);
    assert_eq!(stdout.trim(), "64");
}

#[test]
fn test_history_with_huge_day_window() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, &["drink", "full"]);

    let report = run_json(&dir, &["history", "--days", "4294967295"]);
    assert_eq!(report["entries"].as_array().unwrap().len(), 1);
    assert_eq!(report["stats"]["days_logged"], 1);
}

#[test]
fn test_remind_check_quiet_hours() {
    let dir = TempDir::new().unwrap();
    let decision = run_json(&dir, &["remind", "check", "--at", "23:30"]);
    assert_eq!(decision["status"], "quiet_hours");
}

#[test]
fn test_remind_check_behind() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_cli(&dir, &["remind", "check", "--at", "20:00"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("Hydration Reminder"));
    let decision: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(decision["status"], "behind");
}
