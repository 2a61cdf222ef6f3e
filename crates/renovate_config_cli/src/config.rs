//! Settings for the renovate-config CLI.
//!
//! The settings file is TOML and lives in the current directory unless
//! `--config` names another path. A missing file means default settings.
//!
//! ```toml
//! document = "renovate.json"
//! require_env_secrets = false
//! warnings_as_errors = false
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::Error;

/// Default settings file name
pub const DEFAULT_CONFIG_FILENAME: &str = "renovate-config.toml";

/// Default configuration document path
pub const DEFAULT_DOCUMENT: &str = "renovate.json";

/// Keys accepted by `config get` and `config set`.
pub const CONFIG_KEYS: &[&str] = &["document", "require_env_secrets", "warnings_as_errors"];

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Document used when a command is run without `--document`.
    #[serde(default = "CliConfig::default_document")]
    pub document: String,

    /// Fail validation when a secret placeholder names an unset
    /// environment variable.
    #[serde(default)]
    pub require_env_secrets: bool,

    /// Treat validation warnings as failures.
    #[serde(default)]
    pub warnings_as_errors: bool,
}

impl CliConfig {
    fn default_document() -> String {
        DEFAULT_DOCUMENT.to_string()
    }

    /// Loads settings from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file doesn't exist or can't be read,
    /// and `Error::ParseTomlFile` if it is not valid settings TOML.
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading settings from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!("Settings file not found: {:?}", path)));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read settings file: {}", e)))?;

        toml::from_str(&content).map_err(Error::ParseTomlFile)
    }

    /// Loads settings from `path`, or returns the defaults when no file
    /// exists there.
    pub fn load_or_default(path: &Path) -> Result<Self, Error> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No settings file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Saves the settings to a TOML file, creating parent directories and
    /// overwriting an existing file.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        debug!("Saving settings to {:?}", path);

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize settings: {}", e)))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| Error::Config(format!("Failed to create directory: {}", e)))?;
            }
        }

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write settings file: {}", e)))?;

        info!("Settings saved to {:?}", path);
        Ok(())
    }

    /// Returns a setting by key as a string.
    pub fn get_value(&self, key: &str) -> Result<String, Error> {
        match key {
            "document" => Ok(self.document.clone()),
            "require_env_secrets" => Ok(self.require_env_secrets.to_string()),
            "warnings_as_errors" => Ok(self.warnings_as_errors.to_string()),
            _ => Err(invalid_key(key)),
        }
    }

    /// Sets a setting by key from its string form.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), Error> {
        match key {
            "document" => {
                if value.trim().is_empty() {
                    return Err(Error::InvalidArguments(
                        "document cannot be empty".to_string(),
                    ));
                }
                self.document = value.to_string();
            }
            "require_env_secrets" => self.require_env_secrets = parse_bool(key, value)?,
            "warnings_as_errors" => self.warnings_as_errors = parse_bool(key, value)?,
            _ => return Err(invalid_key(key)),
        }
        Ok(())
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            document: Self::default_document(),
            require_env_secrets: false,
            warnings_as_errors: false,
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, Error> {
    value.parse::<bool>().map_err(|_| {
        Error::InvalidArguments(format!(
            "Invalid value for {}: '{}' (expected true or false)",
            key, value
        ))
    })
}

fn invalid_key(key: &str) -> Error {
    Error::InvalidArguments(format!(
        "Invalid configuration key: {} (expected one of: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

/// Resolves the path to the settings file.
///
/// Uses `config_path` when given, otherwise `renovate-config.toml` in the
/// current directory.
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}
