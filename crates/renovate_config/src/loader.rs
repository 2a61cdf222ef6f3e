//! Reading configuration documents from disk.
//!
//! Documents are JSON (`renovate.json`, the native format of the update
//! automation tool) or TOML with the same field names. Both are parsed into
//! a `serde_json::Value` so validation treats them identically.

use crate::config::UpdateAutomationConfig;
use crate::errors::{ConfigurationError, ConfigurationResult};
use crate::validator::ConfigurationValidator;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

/// Supported document encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// Determines the format from the file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::UnsupportedFormat` for any extension
    /// other than `.json` and `.toml`.
    pub fn from_path(path: &Path) -> ConfigurationResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ConfigurationError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

/// Parses document text in the given format.
///
/// # Errors
///
/// Returns `ConfigurationError::ParseError` if the text is not well formed.
pub fn parse_document(content: &str, format: DocumentFormat) -> ConfigurationResult<Value> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str(content).map_err(|e| ConfigurationError::ParseError {
                reason: format!("Invalid JSON: {}", e),
            })
        }
        DocumentFormat::Toml => {
            toml::from_str(content).map_err(|e| ConfigurationError::ParseError {
                reason: format!("Invalid TOML: {}", e),
            })
        }
    }
}

/// Reads and parses the document at `path` without validating it.
///
/// # Errors
///
/// - `UnsupportedFormat` if the extension is not `.json` or `.toml`
/// - `FileNotFound` if nothing exists at `path`
/// - `FileAccessError` if the file cannot be read
/// - `ParseError` if the content is not well formed
pub fn load_document(path: &Path) -> ConfigurationResult<Value> {
    let format = DocumentFormat::from_path(path)?;

    if !path.exists() {
        return Err(ConfigurationError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    debug!(message = "Reading configuration document", path = ?path, format = ?format);

    let content = std::fs::read_to_string(path).map_err(|e| ConfigurationError::FileAccessError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    parse_document(&content, format).map_err(|e| match e {
        ConfigurationError::ParseError { reason } => ConfigurationError::ParseError {
            reason: format!("{}: {}", path.display(), reason),
        },
        other => other,
    })
}

/// Reads the document at `path` and validates it.
///
/// # Errors
///
/// Any error of [`load_document`], or `ValidationFailed` with the first
/// validation error.
pub fn load_and_validate(
    path: &Path,
    validator: &ConfigurationValidator,
) -> ConfigurationResult<UpdateAutomationConfig> {
    let document = load_document(path)?;
    let config = validator.validate(&document)?;

    info!(
        message = "Loaded configuration",
        path = ?path,
        repositories = config.repositories.len()
    );
    Ok(config)
}
