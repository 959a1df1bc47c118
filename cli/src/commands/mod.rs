//! Command implementations
//!
//! Every remote command follows the same shape: validate local inputs,
//! resolve the connection, log `Starting`, do the work inside one session,
//! then log the summary and `Completed`. Per-item failures never change the
//! exit code.

pub mod config;
pub mod enable;
pub mod modify;
pub mod report;
pub mod session;
pub mod subject_areas;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use chrono::Local;

use crate::app::AppContext;
use crate::application::ports::SnapshotSink;
use crate::application::services::batch::{self, ItemOutcome};
use crate::application::services::session::with_session;
use crate::application::services::summary::RunSummary;
use crate::domain::change::ChangeRow;
use crate::infra::fs::LocalBackupStore;

/// Log and render the final summary.
pub(crate) fn finish(app: &AppContext, summary: &RunSummary) -> Result<ExitCode> {
    summary.log();
    app.renderer().render_summary(summary)?;
    tracing::info!(operation = summary.operation, "Completed");
    Ok(ExitCode::SUCCESS)
}

/// Run a batch of change rows in one session.
///
/// `backup` selects whether each row is snapshotted before it is changed;
/// `backup_path` overrides the configured backup root.
pub(crate) fn apply_rows(
    app: &AppContext,
    operation: &'static str,
    rows: &[ChangeRow],
    backup: bool,
    backup_path: Option<PathBuf>,
) -> Result<ExitCode> {
    if rows.is_empty() {
        tracing::info!(operation, "Starting");
        if !app.is_json() {
            app.output.warn("Input file has no rows; nothing to do");
        }
        return finish(app, &RunSummary::new(operation));
    }

    let conn = app.connect()?;
    tracing::info!(
        operation,
        rows = rows.len(),
        backup,
        endpoint = %conn.endpoint.base_url(),
        "Starting"
    );

    let store = backup.then(|| {
        LocalBackupStore::new(
            &conn.config.backup.resolve_root(backup_path),
            &Local::now().naive_local(),
        )
    });
    let sink = store.as_ref().map(|s| s as &dyn SnapshotSink);

    let results = {
        let reporter = app.reporter();
        with_session(&conn.client, &conn.credentials, |token| {
            batch::run(&conn.client, token, rows, sink, reporter.as_ref())
        })?
    };

    let mut summary = batch::summarize(operation, &results);
    let backed_up = results
        .iter()
        .any(|r| matches!(r.outcome, ItemOutcome::Applied { backup: Some(_) }));
    if backed_up {
        summary.backup_directory = sink.map(|s| s.run_directory().to_path_buf());
    }
    finish(app, &summary)
}
