//! Application context: unified state passed to every command handler.
//!
//! `AppContext` is built once in `Cli::run()` from the global flags. It owns
//! the output context, the config store, and the connection flags, and turns
//! them into a ready-to-use [`Connection`] on demand.

use anyhow::Result;

use crate::application::ports::{ProgressReporter, SilentProgress};
use crate::application::services::config_service;
use crate::domain::ConfigError;
use crate::domain::config::{
    ConnectionOverrides, Credentials, Endpoint, OasConfig, resolve_endpoint, resolve_username,
};
use crate::infra::config::YamlConfigStore;
use crate::infra::soap::SoapClient;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer, TerminalReporter};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Connection flags from the command line. Unset values fall back to the
/// config file.
#[derive(Default)]
pub struct ConnectionFlags {
    pub overrides: ConnectionOverrides,
    pub password: Option<String>,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Connection options.
    pub connection: ConnectionFlags,
}

/// Everything a remote operation needs, resolved from flags and config.
pub struct Connection {
    pub client: SoapClient,
    pub endpoint: Endpoint,
    pub credentials: Credentials,
    pub config: OasConfig,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Where `~/.oas/config.yaml` (or `$OAS_CONFIG`) lives.
    pub config_store: YamlConfigStore,
    connection: ConnectionFlags,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: AppFlags) -> Self {
        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            mode,
            config_store: YamlConfigStore::new(),
            connection: flags.connection,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Per-item progress sink. Silent in JSON mode so stdout carries only
    /// the final document.
    #[must_use]
    pub fn reporter(&self) -> Box<dyn ProgressReporter + '_> {
        match self.mode {
            OutputMode::Human => Box::new(TerminalReporter::new(&self.output)),
            OutputMode::Json => Box::new(SilentProgress),
        }
    }

    /// Load the config file and merge the connection flags over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is unreadable, or host, port,
    /// username or password is set nowhere.
    pub fn connect(&self) -> Result<Connection> {
        let config = config_service::load_config(&self.config_store)?;
        let flags = &self.connection.overrides;

        let endpoint = resolve_endpoint(&config.connection, flags)?;
        let username = resolve_username(&config.connection, flags)?;
        let password = self
            .connection
            .password
            .clone()
            .filter(|p| !p.is_empty())
            .ok_or(ConfigError::MissingPassword)?;

        tracing::debug!(url = %endpoint.base_url(), username = %username, "connection resolved");
        Ok(Connection {
            client: SoapClient::new(&endpoint),
            endpoint,
            credentials: Credentials { username, password },
            config,
        })
    }
}
