//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, or `std::net`. All functions are
//! synchronous and take data in, returning data out.

pub mod agent;
pub mod backup;
pub mod change;
pub mod config;
pub mod document;
pub mod error;

pub use agent::{
    AgentDefinition, extract_status_details, extract_subject_area, find_run_as_node,
    replace_email_recipients, replace_specific_recipients, set_run_as,
};
pub use change::{AgentChange, ChangeKind, ChangeRow};
pub use document::{Document, Element};
pub use error::{
    BackupError, ConfigError, ItemError, MalformedObjectError, PatchTargetMissingError,
    RemoteError, SessionError, TraversalError,
};
