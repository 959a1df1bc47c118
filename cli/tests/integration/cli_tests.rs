//! Argument parsing, help text and setup-error exit codes.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn oas(config_dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("oas"));
    cmd.env("NO_COLOR", "true")
        .env("OAS_CONFIG", config_dir.path().join("config.yaml"))
        .env_remove("OAS_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write fixture");
    path
}

// --- Help and version ---

#[test]
fn test_no_args_shows_help_and_exits_two() {
    let dir = tempfile::tempdir().expect("tempdir");
    oas(&dir)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_help_lists_every_operation() {
    let dir = tempfile::tempdir().expect("tempdir");
    oas(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("session"))
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("enable"))
        .stdout(predicate::str::contains("modify"))
        .stdout(predicate::str::contains("subject-areas"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_flag_shows_binary_name() {
    let dir = tempfile::tempdir().expect("tempdir");
    oas(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("oas"));
}

#[test]
fn test_modify_help_mentions_no_backup() {
    let dir = tempfile::tempdir().expect("tempdir");
    oas(&dir)
        .args(["modify", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-backup"))
        .stdout(predicate::str::contains("--input-file"));
}

#[test]
fn test_unknown_log_level_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    oas(&dir)
        .args(["--log-level", "TRACE", "session"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}

// --- Setup failures exit 1 ---

#[test]
fn test_missing_host_is_a_setup_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    oas(&dir)
        .args(["-P", "9502", "-u", "admin", "-p", "pw", "session"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing host"))
        .stderr(predicate::str::contains("--host"));
}

#[test]
fn test_missing_password_is_a_setup_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    oas(&dir)
        .args(["-H", "localhost", "-P", "9502", "-u", "admin", "session"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing password"));
}

#[test]
fn test_unreachable_server_fails_logon() {
    let dir = tempfile::tempdir().expect("tempdir");
    oas(&dir)
        .args(["-H", "127.0.0.1", "-P", "1", "-u", "admin", "-p", "pw", "session"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Authentication failed for user 'admin'"));
}

#[test]
fn test_missing_input_file_is_a_setup_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    oas(&dir)
        .args(["enable", "--input-file"])
        .arg(dir.path().join("absent.csv"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot open input file"));
}

#[test]
fn test_input_file_is_validated_before_connection_settings() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_file(&dir, "agents.csv", "path\n/shared/A\n");
    oas(&dir)
        .args(["enable", "--input-file"])
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("agentEnabled"));
}

#[test]
fn test_relative_path_row_names_line() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_file(&dir, "modify.csv", "path,runAs\nshared/A,u\n");
    oas(&dir)
        .args(["modify", "--input-file"])
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_empty_input_file_finishes_without_connecting() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_file(&dir, "agents.csv", "path,agentEnabled\n");
    oas(&dir)
        .args(["--json", "enable", "--input-file"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"attempted\": 0"));
}

#[test]
fn test_invalid_report_root_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    oas(&dir)
        .args(["report", "--path", "shared"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid --path"));
}

#[test]
fn test_json_mode_reports_setup_error_as_object() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = oas(&dir)
        .args(["--json", "session"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "INVALID_INPUT");
}
