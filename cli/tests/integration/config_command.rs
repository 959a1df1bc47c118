//! `oas config` against a temporary config file.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn oas(config: &std::path::Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("oas"));
    cmd.env("NO_COLOR", "true").env("OAS_CONFIG", config);
    cmd
}

#[test]
fn test_config_show_without_file_prints_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("config.yaml");
    oas(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("connection.host:"))
        .stdout(predicate::str::contains("(not set)"));
    assert!(!config.exists());
}

#[test]
fn test_config_set_persists_value() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("config.yaml");
    oas(&config)
        .args(["config", "set", "connection.host", "analytics.example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set connection.host = analytics.example.com"));

    let content = std::fs::read_to_string(&config).expect("config written");
    assert!(content.contains("analytics.example.com"));

    oas(&config)
        .args(["--json", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"host\": \"analytics.example.com\""));
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("config.yaml");
    oas(&config)
        .args(["config", "set", "connection.password", "secret"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown setting"));
    assert!(!config.exists());
}

#[test]
fn test_config_set_rejects_bad_port() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("config.yaml");
    oas(&config)
        .args(["config", "set", "connection.port", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid value for connection.port"));
}

#[test]
fn test_flags_override_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("config.yaml");
    std::fs::write(
        &config,
        "connection:\n  host: analytics.example.com\n  port: 9502\n  username: admin\n",
    )
    .expect("seed config");
    oas(&config)
        .env_remove("OAS_PASSWORD")
        .args(["-H", "127.0.0.1", "-P", "1", "-p", "pw", "session"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("127.0.0.1:1"));
}
