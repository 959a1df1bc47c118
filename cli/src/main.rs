//! `oas`: bulk maintenance of analytics catalog agents and analyses

use std::process::ExitCode;

use clap::Parser;
use oas_cli::cli::Cli;
use oas_cli::output::json;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json_mode = cli.json;
    match cli.run() {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Run aborted");
            if json_mode
                && let Ok(text) = json::format_error(&format!("{e:#}"), json::error_code(&e))
            {
                println!("{text}");
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}
