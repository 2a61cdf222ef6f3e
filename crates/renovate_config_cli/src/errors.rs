use std::io;

use renovate_config::{ConfigurationError, ExtractionError};
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the renovate-config CLI application.
///
/// This enum represents all possible error conditions that can arise during
/// CLI operations, including settings file problems, invalid arguments and
/// documents that fail validation.
#[derive(Error, Debug)]
pub enum Error {
    /// Error in the CLI settings file.
    ///
    /// Returned when the settings file cannot be read, written or
    /// serialized, or when a settings key or value is not recognized.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid command-line arguments were provided.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Failed to load a file from the filesystem.
    ///
    /// Wraps I/O errors raised while reading files during extraction.
    #[error("Failed to load file.")]
    LoadFile(io::Error),

    /// Failed to parse the TOML settings file.
    #[error("Failed to parse TOML configuration file.")]
    ParseTomlFile(toml::de::Error),

    /// The configuration document could not be loaded, or the validator
    /// could not be built.
    #[error(transparent)]
    Document(#[from] ConfigurationError),

    /// A regex manager could not be applied to a file.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// The document was checked and rejected.
    ///
    /// The report has already been printed; this only carries the counts.
    #[error("Validation failed with {errors} error(s) and {warnings} warning(s)")]
    ValidationFailed { errors: usize, warnings: usize },
}
