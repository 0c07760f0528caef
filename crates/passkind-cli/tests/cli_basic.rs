//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Only the
//! offline commands are covered here; anything that talks to the backend
//! needs a live server.

use std::process::Command;

/// Run a CLI command against the dev data directory and return
/// (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "passkind-cli", "--"])
        .args(args)
        .env("PASSKIND_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_generate_respects_length() {
    let (stdout, _, code) = run_cli(&["generate", "--length", "20"]);
    assert_eq!(code, 0, "generate failed");
    assert_eq!(stdout.trim().chars().count(), 20);
}

#[test]
fn test_generate_count() {
    let (stdout, _, code) = run_cli(&["generate", "--count", "3", "--length", "12"]);
    assert_eq!(code, 0, "generate --count failed");
    assert_eq!(stdout.trim().lines().count(), 3);
}

#[test]
fn test_generate_digits_only() {
    let (stdout, _, code) = run_cli(&[
        "generate",
        "--length",
        "32",
        "--no-uppercase",
        "--no-lowercase",
        "--no-symbols",
    ]);
    assert_eq!(code, 0);
    assert!(stdout.trim().chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_generate_rejects_empty_charset() {
    let (_, _, code) = run_cli(&[
        "generate",
        "--no-uppercase",
        "--no-lowercase",
        "--no-digits",
        "--no-symbols",
    ]);
    assert_ne!(code, 0, "empty charset should be rejected");
}

#[test]
fn test_generate_strength_column() {
    let (stdout, _, code) = run_cli(&["generate", "--length", "24", "--strength"]);
    assert_eq!(code, 0);
    assert!(stdout.contains('\t'), "expected a strength column");
}

#[test]
fn test_config_get() {
    let (stdout, _, code) = run_cli(&["config", "get", "generator.length"]);
    assert_eq!(code, 0, "config get failed");
    assert!(stdout.trim().parse::<u64>().is_ok());
}

#[test]
fn test_config_set_and_get() {
    let (_, _, code) = run_cli(&["config", "set", "ui.dark_mode", "true"]);
    assert_eq!(code, 0, "config set failed");
    let (stdout, _, code) = run_cli(&["config", "get", "ui.dark_mode"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "true");
}

#[test]
fn test_config_set_unknown_key_fails() {
    let (_, _, code) = run_cli(&["config", "set", "nope.key", "1"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_list_is_json() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "config list failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("config list not JSON");
    assert!(parsed.get("generator").is_some());
}

#[test]
fn test_auth_status_reports_auto_lock() {
    let (stdout, _, code) = run_cli(&["auth", "status"]);
    assert_eq!(code, 0, "auth status failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("status not JSON");
    assert!(parsed.get("authenticated").is_some());
    assert!(parsed.get("auto_lock").is_some());
}

#[test]
fn test_lock_status() {
    let (stdout, _, code) = run_cli(&["lock", "status"]);
    assert_eq!(code, 0, "lock status failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("status not JSON");
    assert!(parsed.get("duration_minutes").is_some());
}

#[test]
fn test_lock_set_minutes() {
    let (_, _, code) = run_cli(&["lock", "set", "--minutes", "5"]);
    assert_eq!(code, 0, "lock set failed");
    let (stdout, _, _) = run_cli(&["lock", "status"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["duration_minutes"], 5);
}

#[test]
fn test_completions_bash() {
    let (stdout, _, code) = run_cli(&["completions", "bash"]);
    assert_eq!(code, 0, "completions failed");
    assert!(stdout.contains("passkind"));
}
