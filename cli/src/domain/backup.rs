//! Snapshot file layout: `backup_<timestamp>/<catalog folders>/<name>.snapshot`.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use oas_common::CatalogPath;

pub const SNAPSHOT_EXTENSION: &str = "snapshot";
pub const RUN_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Directory name for one run's snapshots.
#[must_use]
pub fn run_directory_name(started: &NaiveDateTime) -> String {
    format!("backup_{}", started.format(RUN_TIMESTAMP_FORMAT))
}

/// Snapshot location relative to the run directory, mirroring the catalog
/// folders of `path`.
#[must_use]
pub fn snapshot_relative_path(path: &CatalogPath) -> PathBuf {
    let mut relative: PathBuf = path.folders().iter().map(|s| sanitize_segment(s)).collect();
    relative.push(format!("{}.{SNAPSHOT_EXTENSION}", sanitize_segment(path.name())));
    relative
}

/// The `attempt`-th alternative for a snapshot whose first choice is
/// taken: `Agent.snapshot` becomes `Agent~2.snapshot`, `Agent~3.snapshot`.
#[must_use]
pub fn numbered_variant(relative: &Path, attempt: u32) -> PathBuf {
    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    relative.with_file_name(format!("{stem}~{attempt}.{SNAPSHOT_EXTENSION}"))
}

/// Replace characters that are not portable in file names.
fn sanitize_segment(segment: &str) -> String {
    segment
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// One persisted pre-change snapshot.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupRecord {
    pub source_path: String,
    pub snapshot_bytes: usize,
    pub destination_file: PathBuf,
}
