//! Analysis inventory: which subject area each analysis queries.

use oas_common::{ANALYSIS_SIGNATURE, SubjectAreaRow};

use crate::application::ports::{CatalogApi, ProgressReporter, SessionToken};
use crate::application::services::catalog_walk;
use crate::application::services::summary::RunSummary;
use crate::domain::agent::SUBJECT_AREA_UNKNOWN;
use crate::domain::{Document, ItemError, extract_subject_area};

#[derive(Debug)]
pub struct SubjectAreaInventory {
    pub rows: Vec<SubjectAreaRow>,
    pub summary: RunSummary,
}

/// Read every analysis under `root` and record its subject area.
///
/// Analyses without criteria report [`SUBJECT_AREA_UNKNOWN`]; unreadable
/// ones are logged and skipped.
pub fn build<A: CatalogApi + ?Sized>(
    api: &A,
    token: &SessionToken,
    root: &str,
    progress: &dyn ProgressReporter,
) -> SubjectAreaInventory {
    progress.step(&format!("Scanning {root} for analyses"));
    let walk = catalog_walk::traverse(api, token, root, ANALYSIS_SIGNATURE);

    let mut summary = RunSummary::new("subject-areas");
    summary.record_traversal(&walk.failures);
    let mut rows = Vec::with_capacity(walk.entries.len());

    let total = walk.entries.len();
    for (idx, entry) in walk.entries.iter().enumerate() {
        progress.step(&format!("[{}/{total}] {}", idx + 1, entry.path));
        match subject_area(api, token, &entry.path) {
            Ok(area) => {
                tracing::info!(path = %entry.path, subject_area = %area, "Analysis read");
                summary.record_applied();
                rows.push(SubjectAreaRow {
                    analysis: entry.path.clone(),
                    subject_area: area,
                });
            }
            Err(err) => {
                tracing::error!(path = %entry.path, kind = err.kind(), error = %err, "Item failed");
                summary.record_failed(&entry.path, &err);
            }
        }
    }

    SubjectAreaInventory { rows, summary }
}

fn subject_area<A: CatalogApi + ?Sized>(
    api: &A,
    token: &SessionToken,
    path: &str,
) -> Result<String, ItemError> {
    let raw = api.read_object(path, token).map_err(ItemError::Read)?;
    let doc = Document::decode(&raw)?;
    Ok(extract_subject_area(&doc).unwrap_or_else(|| SUBJECT_AREA_UNKNOWN.to_string()))
}
