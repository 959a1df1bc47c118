//! `oas session`: log on and off again to check connectivity.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::session;
use crate::output::progress;

/// Run the session check.
///
/// # Errors
///
/// Returns an error if the connection settings are incomplete or logon
/// fails.
pub fn run(app: &AppContext) -> Result<ExitCode> {
    let conn = app.connect()?;
    let url = conn.endpoint.base_url();
    tracing::info!(operation = "session", endpoint = %url, "Starting");

    let spinner = (app.output.show_progress() && !app.is_json())
        .then(|| progress::spinner(&format!("Logging on to {url}")));

    let token = match session::login(&conn.client, &conn.credentials) {
        Ok(token) => token,
        Err(e) => {
            if let Some(pb) = &spinner {
                progress::finish_error(pb, "Logon failed");
            }
            return Err(e.into());
        }
    };
    session::logout(&conn.client, &token);
    if let Some(pb) = &spinner {
        progress::finish_ok(pb, "Logged on and off");
    }

    app.renderer()
        .render_session(&conn.credentials.username, &url)?;
    tracing::info!(operation = "session", "Completed");
    Ok(ExitCode::SUCCESS)
}
