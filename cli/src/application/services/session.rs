//! Session lifecycle: logon, run, best-effort logoff.

use crate::application::ports::{SessionApi, SessionToken};
use crate::domain::SessionError;
use crate::domain::config::Credentials;

/// Authenticate and return the run's token.
///
/// # Errors
///
/// Any logon failure, rejected credentials or unreachable endpoint alike,
/// is a [`SessionError::Auth`].
pub fn login<A: SessionApi + ?Sized>(
    api: &A,
    credentials: &Credentials,
) -> Result<SessionToken, SessionError> {
    let token = api
        .logon(&credentials.username, &credentials.password)
        .map_err(|source| SessionError::Auth {
            username: credentials.username.clone(),
            source,
        })?;
    tracing::info!(username = %credentials.username, "Session established");
    tracing::debug!(?token, "session token issued");
    Ok(token)
}

/// Invalidate the token. Failure is logged and swallowed.
pub fn logout<A: SessionApi + ?Sized>(api: &A, token: &SessionToken) {
    match api.logoff(token) {
        Ok(()) => tracing::info!("Session closed"),
        Err(e) => tracing::warn!(error = %e, "Logoff failed; ignoring"),
    }
}

/// Log on, run `work` with the token, then always log off.
///
/// # Errors
///
/// Returns [`SessionError`] only when logon fails; `work` is not run then.
pub fn with_session<A, T, F>(api: &A, credentials: &Credentials, work: F) -> Result<T, SessionError>
where
    A: SessionApi + ?Sized,
    F: FnOnce(&SessionToken) -> T,
{
    let token = login(api, credentials)?;
    let result = work(&token);
    logout(api, &token);
    Ok(result)
}
