//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, ConnectionFlags, OutputFlags};
use crate::commands;
use crate::domain::config::ConnectionOverrides;
use crate::logging::{self, LogLevel};

/// Bulk maintenance of analytics catalog agents and analyses
#[derive(Parser)]
#[command(
    name = "oas",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Analytics server host name
    #[arg(short = 'H', long, global = true)]
    pub host: Option<String>,

    /// Analytics server port
    #[arg(short = 'P', long, global = true)]
    pub port: Option<u16>,

    /// User to log on as
    #[arg(short, long, global = true)]
    pub username: Option<String>,

    /// Password for --username
    #[arg(short, long, global = true, env = "OAS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Connect over HTTPS
    #[arg(long, global = true)]
    pub ssl: bool,

    /// Log verbosity (DEBUG, INFO, WARNING, ERROR, CRITICAL)
    #[arg(
        long,
        global = true,
        value_enum,
        ignore_case = true,
        default_value_t = LogLevel::Info
    )]
    pub log_level: LogLevel,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log on and off to check connectivity and credentials
    Session,

    /// Write a status report for every agent under a folder
    Report(commands::report::ReportArgs),

    /// Enable or disable the agents listed in a CSV file
    Enable(commands::enable::EnableArgs),

    /// Change run-as user and recipients of the agents listed in a CSV file
    Modify(commands::modify::ModifyArgs),

    /// List the subject area behind every analysis under a folder
    SubjectAreas(commands::subject_areas::SubjectAreasArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error for setup failures: bad input files, incomplete
    /// connection settings, rejected logon, or an unwritable output file.
    pub fn run(self) -> Result<ExitCode> {
        logging::init(self.log_level);

        let app = AppContext::new(AppFlags {
            output: OutputFlags {
                no_color: self.no_color,
                quiet: self.quiet,
                json: self.json,
            },
            connection: ConnectionFlags {
                overrides: ConnectionOverrides {
                    host: self.host,
                    port: self.port,
                    username: self.username,
                    ssl: self.ssl,
                },
                password: self.password,
            },
        });

        match self.command {
            Command::Session => commands::session::run(&app),
            Command::Report(args) => commands::report::run(&app, args),
            Command::Enable(args) => commands::enable::run(&app, args),
            Command::Modify(args) => commands::modify::run(&app, args),
            Command::SubjectAreas(args) => commands::subject_areas::run(&app, args),
            Command::Config(cmd) => commands::config::run(&app, cmd),
        }
    }
}
