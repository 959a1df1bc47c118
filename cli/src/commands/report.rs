//! `oas report`: status CSV for every agent under a catalog folder.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use oas_common::CatalogPath;

use crate::app::AppContext;
use crate::application::services::report;
use crate::application::services::session::with_session;
use crate::infra::csv_io;

pub const DEFAULT_REPORT_FILE: &str = "agents_status.csv";

/// Arguments for the report command.
#[derive(Args)]
pub struct ReportArgs {
    /// Catalog folder to scan recursively
    #[arg(long, default_value = "/shared")]
    pub path: String,

    /// Also read run-as identity and recipients from each agent
    #[arg(long)]
    pub details: bool,

    /// Where to write the report
    #[arg(short, long, default_value = DEFAULT_REPORT_FILE)]
    pub output_file: PathBuf,
}

/// Run the report command.
///
/// # Errors
///
/// Returns an error on setup failures, or when the report file cannot be
/// written.
pub fn run(app: &AppContext, args: ReportArgs) -> Result<ExitCode> {
    let root = CatalogPath::parse(&args.path).context("invalid --path")?;
    let conn = app.connect()?;
    tracing::info!(
        operation = "report",
        root = %root,
        details = args.details,
        endpoint = %conn.endpoint.base_url(),
        "Starting"
    );

    let built = {
        let reporter = app.reporter();
        with_session(&conn.client, &conn.credentials, |token| {
            report::build(&conn.client, token, root.as_str(), args.details, reporter.as_ref())
        })?
    };

    csv_io::write_agent_report(&args.output_file, &built.rows, args.details)
        .with_context(|| format!("writing report to {}", args.output_file.display()))?;
    tracing::info!(file = %args.output_file.display(), rows = built.rows.len(), "Report written");

    let mut summary = built.summary;
    summary.output_file = Some(args.output_file);
    super::finish(app, &summary)
}
