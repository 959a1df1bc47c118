//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::{OasConfig, apply_setting};

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<OasConfig> {
    store.load()
}

/// Validate a setting, store it, and return the updated config.
///
/// # Errors
///
/// Returns an error for an unknown key, an invalid value, or a store failure.
/// Nothing is written unless the setting is valid.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<OasConfig> {
    let mut config = store.load()?;
    apply_setting(&mut config, key, value)?;
    store.save(&config)?;
    Ok(config)
}
