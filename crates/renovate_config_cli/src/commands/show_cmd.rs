//! `show`: print the validated document.
//!
//! Output is the serialized record, so absent optional fields stay absent
//! and the output is itself a valid document.

use std::path::Path;

use clap::Args;
use renovate_config::{load_and_validate, ConfigurationValidator, ValidationPolicy};
use tracing::instrument;

use crate::commands::{resolve_document, to_json};
use crate::config::CliConfig;
use crate::errors::Error;

#[cfg(test)]
#[path = "show_cmd_tests.rs"]
mod tests;

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Path to the configuration document (.json or .toml)
    #[arg(short, long)]
    pub document: Option<String>,
}

/// Execute the show command
#[instrument(skip(settings))]
pub fn execute(args: &ShowArgs, settings: &CliConfig) -> Result<(), Error> {
    let path = resolve_document(args.document.as_deref(), settings);
    println!("{}", render_document(&path, settings.require_env_secrets)?);
    Ok(())
}

/// Validates the document at `path` and renders it as pretty JSON.
pub fn render_document(path: &Path, require_env: bool) -> Result<String, Error> {
    let validator = ConfigurationValidator::new()?.with_policy(ValidationPolicy {
        require_env_secrets: require_env,
    });
    let config = load_and_validate(path, &validator)?;
    to_json(&config)
}
