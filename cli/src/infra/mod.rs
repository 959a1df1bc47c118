//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: SOAP calls, CSV files,
//! snapshot files, and the config file.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod config;
pub mod csv_io;
pub mod fs;
pub mod soap;
