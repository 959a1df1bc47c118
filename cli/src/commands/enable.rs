//! `oas enable`: enable or disable agents listed in a CSV file.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::infra::csv_io;

/// Arguments for the enable command.
#[derive(Args)]
pub struct EnableArgs {
    /// CSV with `path,agentEnabled` columns (a status report works as-is)
    #[arg(short, long)]
    pub input_file: PathBuf,

    /// Snapshot each agent before changing it
    #[arg(long)]
    pub backup: bool,

    /// Directory that receives the backup run folder
    #[arg(long, requires = "backup")]
    pub backup_path: Option<PathBuf>,
}

/// Run the enable command.
///
/// # Errors
///
/// Returns an error if the input file is unusable, the connection settings
/// are incomplete, or logon fails.
pub fn run(app: &AppContext, args: EnableArgs) -> Result<ExitCode> {
    let rows = csv_io::read_enable_rows(&args.input_file)?;
    super::apply_rows(app, "enable", &rows, args.backup, args.backup_path)
}
