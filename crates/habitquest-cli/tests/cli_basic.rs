//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run with an isolated HOME so no
//! real user data is touched.

use std::path::Path;
use std::process::Command;

fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "habitquest-cli", "--"])
        .args(args)
        .env("HOME", home)
        .env("HABITQUEST_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn init_then_status_reports_level_one() {
    let home = tempfile::tempdir().unwrap();
    let (_stdout, stderr, code) = run_cli(home.path(), &["init"]);
    assert_eq!(code, 0, "init failed: {stderr}");

    let (stdout, _stderr, code) = run_cli(home.path(), &["status", "--json"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["level"], 1);
    assert_eq!(json["total_xp"], 0);
    assert_eq!(json["title"], "New Traveler");
    assert_eq!(json["stars"], 1);
}

#[test]
fn completing_twice_same_day_fails_the_second_time() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["init"]);

    let (stdout, stderr, code) = run_cli(home.path(), &["complete", "Strength"]);
    assert_eq!(code, 0, "first completion failed: {stderr}");
    assert!(stdout.contains("+1 XP"));

    let (_stdout, stderr, code) = run_cli(home.path(), &["complete", "Strength"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Already completed today!"), "stderr: {stderr}");
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["init"]);
    let (_stdout, stderr, code) = run_cli(home.path(), &["init"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("--force"), "stderr: {stderr}");

    let (_stdout, _stderr, code) = run_cli(home.path(), &["init", "--force"]);
    assert_eq!(code, 0);
}

#[test]
fn titles_table_lists_every_tier() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _stderr, code) = run_cli(home.path(), &["titles"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("New Traveler"));
    assert!(stdout.contains("Shadow Monarch"));
}

#[test]
fn reconcile_reports_consistent_state_after_init() {
    let home = tempfile::tempdir().unwrap();
    run_cli(home.path(), &["init"]);
    let (stdout, _stderr, code) = run_cli(home.path(), &["reconcile"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("matches"), "stdout: {stdout}");
}
