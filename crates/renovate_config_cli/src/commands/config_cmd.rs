use std::path::Path;

use clap::Subcommand;
use tracing::{debug, error, info, instrument};

use crate::config::CliConfig;
use crate::errors::Error;

#[cfg(test)]
#[path = "config_cmd_tests.rs"]
mod tests;

/// Subcommands for the config command
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Create initial settings file
    Init,

    /// Show current settings
    Get {
        /// Settings key to get (document, require_env_secrets, warnings_as_errors)
        key: Option<String>,
    },

    /// Update a settings value
    Set {
        /// Settings key to set
        key: String,

        /// Value to set
        value: String,
    },
}

/// Execute the config command against the settings file at `config_path`
#[instrument]
pub fn execute(cmd: &ConfigCommands, config_path: &Path) -> Result<(), Error> {
    match cmd {
        ConfigCommands::Init => init_config(config_path),
        ConfigCommands::Get { key } => {
            println!("{}", get_config(config_path, key.as_deref())?);
            Ok(())
        }
        ConfigCommands::Set { key, value } => set_config(config_path, key, value),
    }
}

/// Initialize a new settings file
#[instrument]
fn init_config(config_path: &Path) -> Result<(), Error> {
    debug!(message = "Initializing settings", path = ?config_path);

    if config_path.exists() {
        let err = Error::Config(format!("Settings file already exists at {:?}", config_path));
        error!(
            message = "Settings file already exists",
            path = ?config_path,
            error = ?err
        );
        return Err(err);
    }

    CliConfig::default().save(config_path)?;

    info!(message = "Settings initialized", path = ?config_path);
    println!("Settings initialized at {:?}", config_path);
    Ok(())
}

/// Render one setting, or the whole settings file
#[instrument]
fn get_config(config_path: &Path, key: Option<&str>) -> Result<String, Error> {
    debug!(message = "Getting settings", path = ?config_path, key = ?key);

    let config = CliConfig::load_or_default(config_path)?;
    match key {
        Some(key) => Ok(format!("{}: {}", key, config.get_value(key)?)),
        None => toml::to_string_pretty(&config)
            .map_err(|e| Error::Config(format!("Failed to serialize settings: {}", e))),
    }
}

/// Set a settings value
#[instrument]
fn set_config(config_path: &Path, key: &str, value: &str) -> Result<(), Error> {
    debug!(
        message = "Setting value",
        path = ?config_path,
        key = key,
        value = value
    );

    let mut config = CliConfig::load_or_default(config_path)?;

    if let Err(e) = config.set_value(key, value) {
        error!(message = "Failed to set settings value", key = key, value = value, error = ?e);
        return Err(e);
    }

    config.save(config_path)?;

    info!(message = "Settings updated", key = key, value = value);
    println!("Settings updated: {} = {}", key, value);
    Ok(())
}
