//! Filesystem infrastructure: snapshot persistence and atomic file writes.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;

use crate::application::ports::SnapshotSink;
use crate::domain::backup::{numbered_variant, run_directory_name};

/// Upper bound on `~N` variants tried for one snapshot name.
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Production implementation of `SnapshotSink` rooted at
/// `<root>/backup_<run timestamp>/`.
///
/// The run directory is created lazily by the first snapshot, so a run
/// that backs nothing up leaves no empty directory behind. Existing files
/// are never replaced: a taken name gets a `~N` suffix instead.
pub struct LocalBackupStore {
    run_dir: PathBuf,
}

impl LocalBackupStore {
    #[must_use]
    pub fn new(root: &Path, started: &NaiveDateTime) -> Self {
        Self {
            run_dir: root.join(run_directory_name(started)),
        }
    }
}

impl SnapshotSink for LocalBackupStore {
    fn persist(&self, relative: &Path, bytes: &[u8]) -> Result<PathBuf> {
        let destination = self.run_dir.join(relative);
        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating backup directory {}", parent.display()))?;
        }
        for attempt in 1..=MAX_NAME_ATTEMPTS {
            let candidate = if attempt == 1 {
                destination.clone()
            } else {
                self.run_dir.join(numbered_variant(relative, attempt))
            };
            if write_new(&candidate, bytes)? {
                if attempt > 1 {
                    tracing::warn!(
                        wanted = %destination.display(),
                        written = %candidate.display(),
                        "Snapshot name already taken; writing a numbered copy"
                    );
                }
                return Ok(candidate);
            }
        }
        anyhow::bail!(
            "no free snapshot name for {} after {MAX_NAME_ATTEMPTS} attempts",
            destination.display()
        )
    }

    fn run_directory(&self) -> &Path {
        &self.run_dir
    }
}

/// Write `bytes` to `path` via a temp file in the same directory, then
/// rename. A failed write leaves no partial file at `path`.
///
/// # Errors
///
/// Returns an error if the temp file cannot be created, written, or renamed.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    temp.write_all(bytes)
        .with_context(|| format!("writing temp file for {}", path.display()))?;
    temp.as_file()
        .sync_all()
        .with_context(|| format!("flushing temp file for {}", path.display()))?;
    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("finalizing {}", path.display()))?;
    Ok(())
}

/// Like [`write_atomic`], but never replaces an existing file. Returns
/// `false` when `path` is already taken.
fn write_new(path: &Path, bytes: &[u8]) -> Result<bool> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    temp.write_all(bytes)
        .with_context(|| format!("writing temp file for {}", path.display()))?;
    temp.as_file()
        .sync_all()
        .with_context(|| format!("flushing temp file for {}", path.display()))?;
    match temp.persist_noclobber(path) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.error).with_context(|| format!("finalizing {}", path.display())),
    }
}
