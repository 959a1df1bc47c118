//! Config schema and connection resolution.
//!
//! Pure functions only: no I/O, no filesystem access.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_BACKUP_PATH: &str = "./";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.oas/config.yaml`.
///
/// Every key is optional; command-line flags take precedence.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct OasConfig {
    pub connection: ConnectionConfig,
    pub backup: BackupConfig,
}

/// Connection defaults. The password is never read from the file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ConnectionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BackupConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl BackupConfig {
    /// Backup root: the flag, then the file, then the working directory.
    #[must_use]
    pub fn resolve_root(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BACKUP_PATH))
    }
}

// ── Resolution ───────────────────────────────────────────────────────────────

/// Connection values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub ssl: bool,
}

/// Where the analytics web services live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub ssl: bool,
    pub timeout: Duration,
}

impl Endpoint {
    /// `http[s]://host:port/analytics-ws/saw.dll`
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.ssl { "https" } else { "http" };
        format!("{scheme}://{}:{}/analytics-ws/saw.dll", self.host, self.port)
    }
}

/// Username and password for one run.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Merge flags over file values into an [`Endpoint`].
///
/// # Errors
///
/// Returns [`ConfigError::MissingSetting`] when host or port is set
/// nowhere, and [`ConfigError::InvalidValue`] for a host carrying a scheme
/// or path.
pub fn resolve_endpoint(
    file: &ConnectionConfig,
    flags: &ConnectionOverrides,
) -> Result<Endpoint, ConfigError> {
    let host = flags
        .host
        .clone()
        .or_else(|| file.host.clone())
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .ok_or(ConfigError::MissingSetting {
            setting: "host",
            flag: "--host",
            key: "connection.host",
        })?;
    validate_host(&host)?;

    let port = flags
        .port
        .or(file.port)
        .ok_or(ConfigError::MissingSetting {
            setting: "port",
            flag: "--port",
            key: "connection.port",
        })?;

    Ok(Endpoint {
        host,
        port,
        ssl: flags.ssl || file.ssl.unwrap_or(false),
        timeout: Duration::from_secs(file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
    })
}

/// # Errors
///
/// Returns [`ConfigError::MissingSetting`] when no username is given.
pub fn resolve_username(
    file: &ConnectionConfig,
    flags: &ConnectionOverrides,
) -> Result<String, ConfigError> {
    flags
        .username
        .clone()
        .or_else(|| file.username.clone())
        .filter(|u| !u.trim().is_empty())
        .ok_or(ConfigError::MissingSetting {
            setting: "username",
            flag: "--username",
            key: "connection.username",
        })
}

// ── Settings ─────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "connection.host",
    "connection.port",
    "connection.username",
    "connection.ssl",
    "connection.timeout_secs",
    "backup.path",
];

/// Validate and store one `key = value` setting.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownKey`] for keys outside
/// [`VALID_CONFIG_KEYS`] and [`ConfigError::InvalidValue`] for values that
/// do not parse.
pub fn apply_setting(config: &mut OasConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |expected: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    };
    let conn = &mut config.connection;
    match key {
        "connection.host" => {
            validate_host(value)?;
            conn.host = Some(value.to_string());
        }
        "connection.port" => {
            conn.port = Some(
                value
                    .parse::<u16>()
                    .ok()
                    .filter(|p| *p != 0)
                    .ok_or_else(|| invalid("a port number between 1 and 65535"))?,
            );
        }
        "connection.username" => conn.username = Some(value.to_string()),
        "connection.ssl" => {
            conn.ssl = Some(value.parse::<bool>().map_err(|_| invalid("true or false"))?);
        }
        "connection.timeout_secs" => {
            conn.timeout_secs = Some(
                value
                    .parse::<u64>()
                    .ok()
                    .filter(|t| *t > 0)
                    .ok_or_else(|| invalid("a positive number of seconds"))?,
            );
        }
        "backup.path" => config.backup.path = Some(PathBuf::from(value)),
        _ => {
            return Err(ConfigError::UnknownKey {
                key: key.to_string(),
                valid: VALID_CONFIG_KEYS.join(", "),
            });
        }
    }
    Ok(())
}

fn validate_host(host: &str) -> Result<(), ConfigError> {
    if host.contains("://") || host.contains('/') || host.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidValue {
            key: "connection.host".to_string(),
            value: host.to_string(),
            expected: "a bare host name or address, e.g. analytics.example.com".to_string(),
        });
    }
    Ok(())
}
