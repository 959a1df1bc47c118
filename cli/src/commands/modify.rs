//! `oas modify`: rewrite run-as identity and recipients of listed agents.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::infra::csv_io;

/// Arguments for the modify command.
#[derive(Args)]
pub struct ModifyArgs {
    /// CSV with `path,runAs,specificRecipients,emailRecipients` columns
    #[arg(short, long)]
    pub input_file: PathBuf,

    /// Change agents without snapshotting them first
    #[arg(long)]
    pub no_backup: bool,

    /// Directory that receives the backup run folder
    #[arg(long, conflicts_with = "no_backup")]
    pub backup_path: Option<PathBuf>,
}

/// Run the modify command.
///
/// # Errors
///
/// Returns an error if the input file is unusable, the connection settings
/// are incomplete, or logon fails.
pub fn run(app: &AppContext, args: ModifyArgs) -> Result<ExitCode> {
    let rows = csv_io::read_modify_rows(&args.input_file)?;
    super::apply_rows(app, "modify", &rows, !args.no_backup, args.backup_path)
}
