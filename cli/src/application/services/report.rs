//! Agent status report: traverse, query status, optionally read details.

use oas_common::{AGENT_SIGNATURE, AgentReportRow, StatusDetails};

use crate::application::ports::{AgentApi, CatalogApi, ProgressReporter, SessionToken};
use crate::application::services::catalog_walk;
use crate::application::services::summary::RunSummary;
use crate::domain::{Document, ItemError, extract_status_details};

/// Rows for the status CSV plus the run summary.
#[derive(Debug)]
pub struct AgentReport {
    pub rows: Vec<AgentReportRow>,
    pub summary: RunSummary,
}

/// Build the status report for every agent under `root`.
///
/// An agent whose status query fails is logged and left out. A detail
/// read failure is logged and the row keeps empty detail cells.
pub fn build<A: CatalogApi + AgentApi + ?Sized>(
    api: &A,
    token: &SessionToken,
    root: &str,
    with_details: bool,
    progress: &dyn ProgressReporter,
) -> AgentReport {
    progress.step(&format!("Scanning {root} for agents"));
    let walk = catalog_walk::traverse(api, token, root, AGENT_SIGNATURE);

    let mut summary = RunSummary::new("report");
    summary.record_traversal(&walk.failures);
    let mut rows = Vec::with_capacity(walk.entries.len());

    let total = walk.entries.len();
    for (idx, entry) in walk.entries.iter().enumerate() {
        progress.step(&format!("[{}/{total}] {}", idx + 1, entry.path));
        let status = match api.agent_status(&entry.path, token) {
            Ok(status) => status,
            Err(source) => {
                let err = ItemError::Status(source);
                tracing::error!(path = %entry.path, kind = err.kind(), error = %err, "Item failed");
                summary.record_failed(&entry.path, &err);
                continue;
            }
        };

        let details = if with_details {
            match read_details(api, token, &entry.path) {
                Ok(details) => Some(details),
                Err(err) => {
                    tracing::warn!(
                        path = %entry.path,
                        kind = err.kind(),
                        error = %err,
                        "Details unavailable; leaving detail columns empty"
                    );
                    None
                }
            }
        } else {
            None
        };

        tracing::info!(path = %entry.path, "Status retrieved");
        summary.record_applied();
        rows.push(AgentReportRow {
            path: entry.path.clone(),
            status,
            details,
        });
    }

    AgentReport { rows, summary }
}

fn read_details<A: CatalogApi + ?Sized>(
    api: &A,
    token: &SessionToken,
    path: &str,
) -> Result<StatusDetails, ItemError> {
    let raw = api.read_object(path, token).map_err(ItemError::Read)?;
    let doc = Document::decode(&raw)?;
    Ok(extract_status_details(&doc))
}
