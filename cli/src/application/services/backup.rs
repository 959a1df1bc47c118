//! Backup store: export a snapshot and persist it before any mutation.

use oas_common::CatalogPath;

use crate::application::ports::{CatalogApi, SessionToken, SnapshotSink};
use crate::domain::BackupError;
use crate::domain::backup::{BackupRecord, snapshot_relative_path};

/// Export the object at `path` and persist it through `sink`.
///
/// Returns only after the snapshot is on disk.
///
/// # Errors
///
/// [`BackupError::Snapshot`] when the export call fails,
/// [`BackupError::Persist`] when the file cannot be written.
pub fn backup_item<A: CatalogApi + ?Sized>(
    api: &A,
    token: &SessionToken,
    sink: &dyn SnapshotSink,
    path: &CatalogPath,
) -> Result<BackupRecord, BackupError> {
    let bytes = api
        .copy_snapshot(path.as_str(), token)
        .map_err(BackupError::Snapshot)?;
    let relative = snapshot_relative_path(path);
    let destination_file = sink
        .persist(&relative, &bytes)
        .map_err(|e| BackupError::Persist(format!("{e:#}")))?;

    tracing::info!(
        path = %path,
        bytes = bytes.len(),
        file = %destination_file.display(),
        "Backup saved"
    );
    Ok(BackupRecord {
        source_path: path.to_string(),
        snapshot_bytes: bytes.len(),
        destination_file,
    })
}
