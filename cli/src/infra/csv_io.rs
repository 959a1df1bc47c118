//! CSV input parsing and report output.
//!
//! Input files are read completely and validated before any remote call.
//! Output files are written atomically.

use std::path::Path;

use anyhow::{Context, Result};
use oas_common::{AgentReportRow, EnableRow, ModifyRow, SubjectAreaRow};
use serde::de::DeserializeOwned;

use crate::domain::ConfigError;
use crate::domain::change::ChangeRow;
use crate::infra::fs::write_atomic;

const ENABLE_COLUMNS: &[&str] = &["path", "agentEnabled"];
const MODIFY_COLUMNS: &[&str] = &["path"];
const SUBJECT_AREA_HEADER: [&str; 2] = ["Analysis", "Subject Area"];

/// Load an enable/disable list (`path,agentEnabled`).
///
/// # Errors
///
/// Returns an error if the file cannot be read, a required column is
/// missing, or a row has an invalid path.
pub fn read_enable_rows(path: &Path) -> Result<Vec<ChangeRow>> {
    read_rows::<EnableRow>(path, ENABLE_COLUMNS, ChangeRow::from_enable)
}

/// Load a modify list (`path,runAs,specificRecipients,emailRecipients`).
/// Only `path` is required; absent columns read as empty.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has no `path` column, or a
/// row has an invalid path.
pub fn read_modify_rows(path: &Path) -> Result<Vec<ChangeRow>> {
    read_rows::<ModifyRow>(path, MODIFY_COLUMNS, ChangeRow::from_modify)
}

fn read_rows<R: DeserializeOwned>(
    path: &Path,
    required: &[&str],
    convert: impl Fn(&R) -> Result<ChangeRow, String>,
) -> Result<Vec<ChangeRow>> {
    let file = path.display().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("cannot open input file {file}"))?;

    let headers = reader
        .headers()
        .with_context(|| format!("cannot read header of {file}"))?
        .clone();
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(ConfigError::InvalidRow {
                file,
                line: 1,
                reason: format!("missing required column '{column}'"),
            }
            .into());
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("cannot read {file}"))?;
        let line = record.position().map_or(0, csv::Position::line);
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let raw: R = record
            .deserialize(Some(&headers))
            .map_err(|e| ConfigError::InvalidRow {
                file: file.clone(),
                line,
                reason: e.to_string(),
            })?;
        let row = convert(&raw).map_err(|reason| ConfigError::InvalidRow {
            file: file.clone(),
            line,
            reason,
        })?;
        rows.push(row);
    }

    if rows.is_empty() {
        tracing::warn!(file = %file, "Input file has no rows");
    }
    tracing::debug!(file = %file, rows = rows.len(), "input loaded");
    Ok(rows)
}

/// Write the agent status report. Nothing is left at `path` on failure.
///
/// # Errors
///
/// Returns an error if the CSV cannot be produced or the file written.
pub fn write_agent_report(path: &Path, rows: &[AgentReportRow], with_details: bool) -> Result<()> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(AgentReportRow::header(with_details))
        .context("encoding report header")?;
    for row in rows {
        writer
            .write_record(row.record(with_details))
            .with_context(|| format!("encoding report row {}", row.path))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(csv::IntoInnerError::into_error)
        .context("encoding report")?;
    write_atomic(path, &bytes)
}

/// Write the analysis inventory (`Analysis,Subject Area`).
///
/// # Errors
///
/// Returns an error if the CSV cannot be produced or the file written.
pub fn write_subject_areas(path: &Path, rows: &[SubjectAreaRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(SUBJECT_AREA_HEADER)
        .context("encoding inventory header")?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("encoding inventory row {}", row.analysis))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(csv::IntoInnerError::into_error)
        .context("encoding inventory")?;
    write_atomic(path, &bytes)
}
