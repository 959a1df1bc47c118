//! Human-readable terminal renderer.

use std::path::Path;

use owo_colors::OwoColorize as _;

use crate::application::services::summary::RunSummary;
use crate::domain::config::{DEFAULT_BACKUP_PATH, DEFAULT_TIMEOUT_SECS, OasConfig};
use crate::infra::config::CONFIG_ENV;
use crate::output::OutputContext;

/// Renders results as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the end-of-run counts and failure list.
    ///
    /// Failures go to stderr and survive `--quiet`.
    pub fn render_summary(&self, summary: &RunSummary) {
        if !self.ctx.quiet {
            println!();
            self.ctx.header(&format!("{} summary", title(summary.operation)));
            self.ctx.kv("Attempted:", &summary.attempted.to_string());
            self.ctx.kv("Applied:  ", &summary.applied.to_string());
            self.ctx.kv("Skipped:  ", &summary.skipped.to_string());
            self.ctx.kv("Failed:   ", &summary.failed.to_string());
        }

        let styles = &self.ctx.styles;
        for failure in &summary.failures {
            self.ctx.error(&format!(
                "{} {}: {}",
                failure.path.style(styles.catalog_path),
                format!("[{}]", failure.kind).style(styles.failure_kind),
                failure.message
            ));
        }
        for folder in &summary.unlisted_folders {
            self.ctx.warn(&format!(
                "Could not list {}: {}",
                folder.path.style(styles.catalog_path),
                folder.message
            ));
        }

        if let Some(file) = &summary.output_file {
            self.ctx.success(&format!("Wrote {}", file.display()));
        }
        if let Some(dir) = &summary.backup_directory {
            self.ctx.info(&format!("Backups in {}", dir.display()));
        }
    }

    /// Report a successful logon check.
    pub fn render_session(&self, username: &str, endpoint: &str) {
        self.ctx
            .success(&format!("Logged on to {endpoint} as {username}"));
    }

    /// Render the stored configuration, with defaults for unset keys.
    pub fn render_config(&self, config: &OasConfig, path: &Path) {
        if self.ctx.quiet {
            return;
        }
        let conn = &config.connection;
        let unset = "(not set)".to_string();

        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        println!(
            "  {:<26} {}",
            "connection.host:",
            conn.host.clone().unwrap_or_else(|| unset.clone())
        );
        println!(
            "  {:<26} {}",
            "connection.port:",
            conn.port.map_or_else(|| unset.clone(), |p| p.to_string())
        );
        println!(
            "  {:<26} {}",
            "connection.username:",
            conn.username.clone().unwrap_or_else(|| unset.clone())
        );
        println!(
            "  {:<26} {}",
            "connection.ssl:",
            conn.ssl.unwrap_or(false)
        );
        println!(
            "  {:<26} {}",
            "connection.timeout_secs:",
            conn.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
        );
        println!(
            "  {:<26} {}",
            "backup.path:",
            config
                .backup
                .path
                .as_ref()
                .map_or_else(|| DEFAULT_BACKUP_PATH.to_string(), |p| p.display().to_string())
        );
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.header));
        println!(
            "    {:<18} {}",
            format!("{CONFIG_ENV}:"),
            std::env::var(CONFIG_ENV).unwrap_or_else(|_| unset.clone())
        );
        println!(
            "    {:<18} {}",
            "OAS_PASSWORD:",
            if std::env::var_os("OAS_PASSWORD").is_some() {
                "(set)"
            } else {
                "(not set)"
            }
        );
    }
}

fn title(operation: &str) -> String {
    let mut chars = operation.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
