//! `oas subject-areas`: which subject area each analysis queries.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use oas_common::CatalogPath;

use crate::app::AppContext;
use crate::application::services::session::with_session;
use crate::application::services::subject_areas;
use crate::infra::csv_io;

pub const DEFAULT_INVENTORY_FILE: &str = "analyses_subject_areas.csv";

/// Arguments for the subject-areas command.
#[derive(Args)]
pub struct SubjectAreasArgs {
    /// Catalog folder to scan recursively
    #[arg(long, default_value = "/shared")]
    pub path: String,

    /// Where to write the inventory
    #[arg(short, long, default_value = DEFAULT_INVENTORY_FILE)]
    pub output_file: PathBuf,
}

/// Run the subject-areas command.
///
/// # Errors
///
/// Returns an error on setup failures, or when the inventory file cannot
/// be written.
pub fn run(app: &AppContext, args: SubjectAreasArgs) -> Result<ExitCode> {
    let root = CatalogPath::parse(&args.path).context("invalid --path")?;
    let conn = app.connect()?;
    tracing::info!(
        operation = "subject-areas",
        root = %root,
        endpoint = %conn.endpoint.base_url(),
        "Starting"
    );

    let inventory = {
        let reporter = app.reporter();
        with_session(&conn.client, &conn.credentials, |token| {
            subject_areas::build(&conn.client, token, root.as_str(), reporter.as_ref())
        })?
    };

    csv_io::write_subject_areas(&args.output_file, &inventory.rows)
        .with_context(|| format!("writing inventory to {}", args.output_file.display()))?;

    let mut summary = inventory.summary;
    summary.output_file = Some(args.output_file);
    super::finish(app, &summary)
}
