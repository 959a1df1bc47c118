//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and shared types, never from
//! `crate::infra`, `crate::commands`, or `crate::output`.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;
use oas_common::{AgentStatus, CatalogEntry};

use crate::domain::RemoteError;
use crate::domain::config::OasConfig;

// ── Value Types ───────────────────────────────────────────────────────────────

/// Opaque capability returned by logon and required by every remote call.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw token for the wire. Never log this.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken(<{} chars>)", self.0.len())
    }
}

// ── Remote Service Ports ──────────────────────────────────────────────────────

/// Session establishment against the analytics service.
#[cfg_attr(test, mockall::automock)]
pub trait SessionApi {
    /// Authenticate and return a fresh token.
    fn logon(&self, username: &str, password: &str) -> Result<SessionToken, RemoteError>;
    /// Invalidate a token.
    fn logoff(&self, token: &SessionToken) -> Result<(), RemoteError>;
}

/// Catalog reads.
pub trait CatalogApi {
    /// Immediate children of `folder`, each classified folder or leaf.
    fn list_children(
        &self,
        folder: &str,
        token: &SessionToken,
    ) -> Result<Vec<CatalogEntry>, RemoteError>;

    /// Raw XML body of the object at `path`.
    fn read_object(&self, path: &str, token: &SessionToken) -> Result<Vec<u8>, RemoteError>;

    /// Portable export of the object at `path`, used for backups.
    fn copy_snapshot(&self, path: &str, token: &SessionToken) -> Result<Vec<u8>, RemoteError>;
}

/// Scheduled-agent operations.
pub trait AgentApi {
    /// Overwrite the agent at `path` with `body`.
    fn write_agent(&self, path: &str, body: &[u8], token: &SessionToken) -> Result<(), RemoteError>;

    fn agent_status(&self, path: &str, token: &SessionToken) -> Result<AgentStatus, RemoteError>;

    fn set_enabled(&self, path: &str, enabled: bool, token: &SessionToken)
    -> Result<(), RemoteError>;
}

/// Composite trait: everything a run needs from the remote service.
pub trait AnalyticsApi: SessionApi + CatalogApi + AgentApi {}

/// Blanket implementation: any type implementing all three sub-traits is an `AnalyticsApi`.
impl<T> AnalyticsApi for T where T: SessionApi + CatalogApi + AgentApi {}

// ── Local Storage Ports ───────────────────────────────────────────────────────

/// Persists pre-change snapshots under one run-scoped directory.
pub trait SnapshotSink {
    /// Write `bytes` at `relative` below the run directory, creating
    /// intermediate directories. Never replaces an earlier snapshot; the
    /// returned path is the file actually written.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    fn persist(&self, relative: &Path, bytes: &[u8]) -> Result<PathBuf>;

    /// Run directory every snapshot lands under.
    fn run_directory(&self) -> &Path;
}

/// Configuration persistence.
pub trait ConfigStore {
    /// Load the config, or defaults when no file exists.
    fn load(&self) -> Result<OasConfig>;
    /// Persist the config.
    fn save(&self, config: &OasConfig) -> Result<()>;
    /// Location of the config file.
    fn path(&self) -> Result<PathBuf>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

/// Reporter that discards everything.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn step(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
}
