//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, or `std::net`. All error types implement
//! `thiserror::Error` and convert to `anyhow::Error` via the `?` operator.

use std::fmt;

use oas_common::CatalogPathError;
use thiserror::Error;

// ── Remote errors ─────────────────────────────────────────────────────────────

/// Failure of a single remote service call.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("cannot reach {endpoint}: {reason}")]
    Transport { endpoint: String, reason: String },

    #[error("HTTP {status} from {endpoint}")]
    Http { endpoint: String, status: u16 },

    #[error("service fault [{code}]: {message}")]
    Fault { code: String, message: String },

    #[error("unexpected response to {operation}: {reason}")]
    UnexpectedResponse { operation: String, reason: String },
}

// ── Session errors ────────────────────────────────────────────────────────────

/// Errors establishing an authenticated session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Authentication failed for user '{username}': {source}")]
    Auth {
        username: String,
        #[source]
        source: RemoteError,
    },
}

// ── Traversal errors ──────────────────────────────────────────────────────────

/// A folder whose listing could not be fetched; its subtree is skipped.
#[derive(Debug, Error)]
#[error("cannot list folder {folder}: {source}")]
pub struct TraversalError {
    pub folder: String,
    #[source]
    pub source: RemoteError,
}

// ── Item errors ───────────────────────────────────────────────────────────────

/// The object body is not well-formed XML.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("malformed object: {reason}")]
pub struct MalformedObjectError {
    pub reason: String,
}

impl MalformedObjectError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The element a patch edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchTarget {
    DataVisibility,
    SpecificRecipients,
    EmailRecipients,
}

impl fmt::Display for PatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DataVisibility => "dataVisibility",
            Self::SpecificRecipients => "recipients/specificRecipients",
            Self::EmailRecipients => "emailRecipients",
        })
    }
}

/// A requested patch found no element to edit.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("no {0} element in the agent definition")]
pub struct PatchTargetMissingError(pub PatchTarget);

/// Failure taking a pre-change snapshot.
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("snapshot export failed: {0}")]
    Snapshot(#[source] RemoteError),

    #[error("cannot derive snapshot location: {0}")]
    InvalidPath(#[from] CatalogPathError),

    #[error("cannot persist snapshot: {0}")]
    Persist(String),
}

/// Failure processing one catalog item. Never aborts the batch.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("cannot read object: {0}")]
    Read(#[source] RemoteError),

    #[error(transparent)]
    Malformed(#[from] MalformedObjectError),

    #[error(transparent)]
    PatchTargetMissing(#[from] PatchTargetMissingError),

    #[error("write rejected: {0}")]
    Write(#[source] RemoteError),

    #[error("backup failed, item left unchanged: {0}")]
    Backup(#[from] BackupError),

    #[error("status query failed: {0}")]
    Status(#[source] RemoteError),
}

impl ItemError {
    /// Stable short tag used in logs and JSON output.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Read(_) => "read",
            Self::Malformed(_) => "malformed",
            Self::PatchTargetMissing(_) => "patch-target-missing",
            Self::Write(_) => "write",
            Self::Backup(_) => "backup",
            Self::Status(_) => "status",
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors resolving connection settings and input files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Missing {setting}: pass {flag} or set {key} in the config file")]
    MissingSetting {
        setting: &'static str,
        flag: &'static str,
        key: &'static str,
    },

    #[error("Missing password: pass --password or set OAS_PASSWORD")]
    MissingPassword,

    #[error("Invalid value for {key}: {value}\n\nExpected: {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },

    #[error("Input file {file}, line {line}: {reason}")]
    InvalidRow {
        file: String,
        line: u64,
        reason: String,
    },
}
