//! Per-run counts and failure list shared by every operation.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::{ItemError, TraversalError};

/// One failed item or folder.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FailureRecord {
    pub path: String,
    pub kind: String,
    pub message: String,
}

impl FailureRecord {
    #[must_use]
    pub fn from_item(path: &str, err: &ItemError) -> Self {
        Self {
            path: path.to_string(),
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }

    #[must_use]
    pub fn from_traversal(err: &TraversalError) -> Self {
        Self {
            path: err.folder.clone(),
            kind: "traversal".to_string(),
            message: err.source.to_string(),
        }
    }
}

/// What a run did. Rendered as a final log line, a human summary, or JSON.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RunSummary {
    pub operation: &'static str,
    pub attempted: usize,
    pub applied: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<FailureRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unlisted_folders: Vec<FailureRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_directory: Option<PathBuf>,
}

impl RunSummary {
    #[must_use]
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            attempted: 0,
            applied: 0,
            skipped: 0,
            failed: 0,
            failures: Vec::new(),
            unlisted_folders: Vec::new(),
            output_file: None,
            backup_directory: None,
        }
    }

    pub fn record_applied(&mut self) {
        self.attempted += 1;
        self.applied += 1;
    }

    pub fn record_skipped(&mut self) {
        self.attempted += 1;
        self.skipped += 1;
    }

    pub fn record_failed(&mut self, path: &str, err: &ItemError) {
        self.attempted += 1;
        self.failed += 1;
        self.failures.push(FailureRecord::from_item(path, err));
    }

    pub fn record_traversal(&mut self, failures: &[TraversalError]) {
        self.unlisted_folders
            .extend(failures.iter().map(FailureRecord::from_traversal));
    }

    /// Emit the final count line.
    pub fn log(&self) {
        tracing::info!(
            operation = self.operation,
            attempted = self.attempted,
            applied = self.applied,
            skipped = self.skipped,
            failed = self.failed,
            unlisted_folders = self.unlisted_folders.len(),
            "Processed {} item(s): {} applied, {} skipped, {} failed",
            self.attempted,
            self.applied,
            self.skipped,
            self.failed
        );
    }
}
