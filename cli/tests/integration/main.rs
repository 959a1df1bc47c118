//! Integration tests for the oas CLI
//!
//! These tests spawn the actual binary and test end-to-end behavior.
//! None of them need a reachable analytics server.

mod cli_tests;
mod config_command;
