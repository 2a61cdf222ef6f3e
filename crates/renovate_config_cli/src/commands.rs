//! Command modules for the renovate-config CLI.
//!
//! - `config_cmd`: manages the CLI settings file
//! - `extract_cmd`: previews what the regex managers extract from a tree
//! - `rules_cmd`: lists the package rules that select an update
//! - `schema_cmd`: prints the document JSON Schema
//! - `show_cmd`: prints the validated document
//! - `validate_cmd`: validates a document and reports errors and warnings

use std::path::PathBuf;

use crate::config::CliConfig;
use crate::errors::Error;

pub mod config_cmd;
pub mod extract_cmd;
pub mod rules_cmd;
pub mod schema_cmd;
pub mod show_cmd;
pub mod validate_cmd;

/// Document path from `--document`, falling back to the settings file.
pub fn resolve_document(document: Option<&str>, settings: &CliConfig) -> PathBuf {
    PathBuf::from(document.unwrap_or(&settings.document))
}

/// Checks an output format argument.
pub(crate) fn check_format(format: &str) -> Result<(), Error> {
    match format {
        "text" | "json" => Ok(()),
        _ => Err(Error::InvalidArguments(format!(
            "Invalid format: '{}'. Use 'text' or 'json'.",
            format
        ))),
    }
}

pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> Result<String, Error> {
    serde_json::to_string_pretty(value)
        .map_err(|e| Error::Config(format!("Failed to serialize to JSON: {}", e)))
}
