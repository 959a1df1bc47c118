//! JSON output helpers.
//!
//! `--json` reserves stdout for exactly one JSON document per run: the
//! run summary on completion, or an error object on a setup failure.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::application::services::summary::RunSummary;
use crate::domain::{ConfigError, SessionError};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Renders results as pretty-printed JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// # Errors
    ///
    /// Returns an error if the summary cannot be serialized.
    pub fn render_summary(&self, summary: &RunSummary) -> Result<()> {
        print_pretty(summary)
    }

    /// Report a successful logon check.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_session(&self, username: &str, endpoint: &str) -> Result<()> {
        print_pretty(&serde_json::json!({
            "operation": "session",
            "authenticated": true,
            "username": username,
            "endpoint": endpoint,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config<T: Serialize>(&self, config: &T, path: &std::path::Path) -> Result<()> {
        print_pretty(&serde_json::json!({
            "path": path.display().to_string(),
            "config": config,
        }))
    }
}

fn print_pretty<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{text}");
    Ok(())
}

/// Stable code for the `--json` error object.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if err.downcast_ref::<SessionError>().is_some() {
        "AUTH_FAILED"
    } else if err.downcast_ref::<ConfigError>().is_some() {
        "INVALID_INPUT"
    } else {
        "RUN_FAILED"
    }
}
