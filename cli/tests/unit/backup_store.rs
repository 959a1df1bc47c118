//! Backups through the filesystem snapshot sink.

#![allow(clippy::expect_used)]

use chrono::NaiveDate;
use oas_cli::application::ports::{SilentProgress, SnapshotSink};
use oas_cli::application::services::backup::backup_item;
use oas_cli::application::services::batch::{self, ItemOutcome};
use oas_cli::domain::ChangeRow;
use oas_cli::infra::fs::LocalBackupStore;
use oas_common::{CatalogPath, EnableRow, ModifyRow};

use crate::fakes::{AGENT_XML, FakeAnalytics, token};

fn store(root: &std::path::Path) -> LocalBackupStore {
    let started = NaiveDate::from_ymd_opt(2025, 3, 4)
        .and_then(|d| d.and_hms_opt(5, 6, 7))
        .expect("timestamp");
    LocalBackupStore::new(root, &started)
}

#[test]
fn test_backup_item_mirrors_catalog_folders() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sink = store(dir.path());
    let api = FakeAnalytics::new();
    let path = CatalogPath::parse("/shared/Sales/Daily Agent").expect("path");

    let record = backup_item(&api, &token(), &sink, &path).expect("backup");

    let expected = dir
        .path()
        .join("backup_2025-03-04_05-06-07")
        .join("shared")
        .join("Sales")
        .join("Daily Agent.snapshot");
    assert_eq!(record.destination_file, expected);
    assert_eq!(
        std::fs::read(&expected).expect("snapshot on disk"),
        b"archive of /shared/Sales/Daily Agent"
    );
    assert_eq!(record.snapshot_bytes, "archive of /shared/Sales/Daily Agent".len());
}

#[test]
fn test_escaped_slash_in_name_stays_in_one_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sink = store(dir.path());
    let api = FakeAnalytics::new();
    let path = CatalogPath::parse(r"/shared/Sales\/Ops").expect("path");

    let record = backup_item(&api, &token(), &sink, &path).expect("backup");
    assert_eq!(
        record.destination_file,
        sink.run_directory().join("shared").join("Sales_Ops.snapshot")
    );
}

#[test]
fn test_one_run_directory_for_the_whole_batch() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sink = store(dir.path());
    let api = FakeAnalytics::new();
    let rows: Vec<ChangeRow> = ["/shared/A", "/shared/Team/B"]
        .iter()
        .map(|p| {
            ChangeRow::from_enable(&EnableRow {
                path: (*p).to_string(),
                agent_enabled: "true".to_string(),
            })
            .expect("row")
        })
        .collect();

    let results = batch::run(&api, &token(), &rows, Some(&sink), &SilentProgress);

    for result in &results {
        match &result.outcome {
            ItemOutcome::Applied { backup: Some(record) } => {
                assert!(record.destination_file.starts_with(sink.run_directory()));
                assert!(record.destination_file.exists());
            }
            other => panic!("expected backed-up change, got {other:?}"),
        }
    }
    let runs = std::fs::read_dir(dir.path()).expect("list").count();
    assert_eq!(runs, 1);
}

#[test]
fn test_names_that_sanitize_alike_keep_separate_snapshots() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sink = store(dir.path());
    let api = FakeAnalytics::new();
    let colon = CatalogPath::parse("/shared/Q1:Sales").expect("path");
    let underscore = CatalogPath::parse("/shared/Q1_Sales").expect("path");

    let first = backup_item(&api, &token(), &sink, &colon).expect("first backup");
    let second = backup_item(&api, &token(), &sink, &underscore).expect("second backup");

    assert_ne!(first.destination_file, second.destination_file);
    assert_eq!(
        std::fs::read(&first.destination_file).expect("first snapshot"),
        b"archive of /shared/Q1:Sales"
    );
    assert_eq!(
        std::fs::read(&second.destination_file).expect("second snapshot"),
        b"archive of /shared/Q1_Sales"
    );
    assert_eq!(
        second.destination_file,
        sink.run_directory().join("shared").join("Q1_Sales~2.snapshot")
    );
}

#[test]
fn test_repeated_row_keeps_the_true_pre_change_copy() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sink = store(dir.path());
    let api = FakeAnalytics::new()
        .object("/shared/MyAgent", AGENT_XML)
        .snapshots_with_body();
    let rows: Vec<ChangeRow> = ["first", "second"]
        .iter()
        .map(|user| {
            ChangeRow::from_modify(&ModifyRow {
                path: "/shared/MyAgent".to_string(),
                run_as: (*user).to_string(),
                specific_recipients: String::new(),
                email_recipients: String::new(),
            })
            .expect("row")
        })
        .collect();

    let results = batch::run(&api, &token(), &rows, Some(&sink), &SilentProgress);

    let records: Vec<_> = results
        .iter()
        .map(|r| match &r.outcome {
            ItemOutcome::Applied { backup: Some(record) } => record.clone(),
            other => panic!("expected backed-up change, got {other:?}"),
        })
        .collect();
    assert_ne!(records[0].destination_file, records[1].destination_file);

    let original = std::fs::read_to_string(&records[0].destination_file).expect("first copy");
    assert_eq!(original, AGENT_XML);
    let intermediate = std::fs::read_to_string(&records[1].destination_file).expect("second copy");
    assert!(intermediate.contains(r#"runAs="first""#));
}
