//! Batch driver: apply change rows one at a time, isolating failures.
//!
//! Per row: optional backup → fetch → patch → write back. A failure at any
//! step ends that row only; earlier rows stay committed and later rows still
//! run.

use crate::application::ports::{AgentApi, CatalogApi, ProgressReporter, SessionToken, SnapshotSink};
use crate::application::services::backup::backup_item;
use crate::application::services::summary::RunSummary;
use crate::domain::backup::BackupRecord;
use crate::domain::change::{AgentChange, ChangeKind, ChangeRow};
use crate::domain::{Document, ItemError};

/// How one row ended.
#[derive(Debug)]
pub enum ItemOutcome {
    Applied { backup: Option<BackupRecord> },
    Skipped { reason: String },
    Failed(ItemError),
}

/// Outcome for one row, in input order.
#[derive(Debug)]
pub struct ItemResult {
    pub path: String,
    pub outcome: ItemOutcome,
}

impl ItemResult {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, ItemOutcome::Failed(_))
    }
}

/// Process every row in order. Never returns early.
///
/// With `backup` set, each row that will issue a mutation is snapshotted
/// first; a backup failure fails the row without mutating it.
pub fn run<A: CatalogApi + AgentApi + ?Sized>(
    api: &A,
    token: &SessionToken,
    rows: &[ChangeRow],
    backup: Option<&dyn SnapshotSink>,
    progress: &dyn ProgressReporter,
) -> Vec<ItemResult> {
    let total = rows.len();
    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            progress.step(&format!("[{}/{total}] {}", idx + 1, row.path));
            let outcome = match process_row(api, token, row, backup) {
                Ok(outcome) => outcome,
                Err(err) => ItemOutcome::Failed(err),
            };
            log_outcome(row, &outcome, progress);
            ItemResult {
                path: row.path.to_string(),
                outcome,
            }
        })
        .collect()
}

/// Fold results into a summary.
#[must_use]
pub fn summarize(operation: &'static str, results: &[ItemResult]) -> RunSummary {
    let mut summary = RunSummary::new(operation);
    for result in results {
        match &result.outcome {
            ItemOutcome::Applied { .. } => summary.record_applied(),
            ItemOutcome::Skipped { .. } => summary.record_skipped(),
            ItemOutcome::Failed(err) => summary.record_failed(&result.path, err),
        }
    }
    summary
}

fn process_row<A: CatalogApi + AgentApi + ?Sized>(
    api: &A,
    token: &SessionToken,
    row: &ChangeRow,
    backup: Option<&dyn SnapshotSink>,
) -> Result<ItemOutcome, ItemError> {
    if let ChangeKind::Modify(change) = &row.kind
        && change.is_empty()
    {
        return Ok(ItemOutcome::Skipped {
            reason: "row requests no change".to_string(),
        });
    }

    let record = match backup {
        Some(sink) => Some(backup_item(api, token, sink, &row.path)?),
        None => None,
    };

    match &row.kind {
        ChangeKind::SetEnabled(enabled) => api
            .set_enabled(row.path.as_str(), *enabled, token)
            .map_err(ItemError::Write)?,
        ChangeKind::Modify(change) => modify_agent(api, token, row.path.as_str(), change)?,
    }

    Ok(ItemOutcome::Applied { backup: record })
}

fn modify_agent<A: CatalogApi + AgentApi + ?Sized>(
    api: &A,
    token: &SessionToken,
    path: &str,
    change: &AgentChange,
) -> Result<(), ItemError> {
    let raw = api.read_object(path, token).map_err(ItemError::Read)?;
    let mut doc = Document::decode(&raw)?;
    change.apply(&mut doc)?;
    api.write_agent(path, &doc.encode(), token)
        .map_err(ItemError::Write)
}

fn log_outcome(row: &ChangeRow, outcome: &ItemOutcome, progress: &dyn ProgressReporter) {
    let path = row.path.as_str();
    match outcome {
        ItemOutcome::Applied { .. } => {
            let action = match &row.kind {
                ChangeKind::SetEnabled(true) => "Enabled",
                ChangeKind::SetEnabled(false) => "Disabled",
                ChangeKind::Modify(_) => "Updated",
            };
            tracing::info!(path, "{action} agent");
            progress.success(&format!("{action} {path}"));
        }
        ItemOutcome::Skipped { reason } => {
            tracing::info!(path, reason = %reason, "Skipped");
        }
        ItemOutcome::Failed(err) => {
            tracing::error!(path, kind = err.kind(), error = %err, "Item failed");
            progress.warn(&format!("{path}: {err}"));
        }
    }
}
