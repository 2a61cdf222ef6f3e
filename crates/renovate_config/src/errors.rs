//! Configuration system error types.
//!
//! Domain-specific errors for loading configuration documents and for
//! validating them before they reach the update automation tool.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors produced while turning a raw document into a validated
/// [`UpdateAutomationConfig`](crate::UpdateAutomationConfig).
///
/// Every variant names the offending field with a dot/bracket path such as
/// `regexManagers[1].matchStrings[0]`. Validation is all-or-nothing: any of
/// these errors rejects the whole document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A field is missing, unexpected, of the wrong type, outside its
    /// allowed values, or otherwise malformed.
    #[error("Schema error at '{field_path}': {reason}")]
    SchemaError { field_path: String, reason: String },

    /// A regular expression does not compile.
    #[error("Invalid regular expression at '{field_path}' (rule {rule_index}): '{pattern}' - {reason}")]
    RegexCompileError {
        field_path: String,
        rule_index: usize,
        pattern: String,
        reason: String,
    },

    /// A template refers to a capture group its patterns do not produce.
    #[error("Template at '{field_path}' (rule {rule_index}) references capture group '{group}' which is not defined by matchStrings: '{template}'")]
    TemplateReferenceError {
        field_path: String,
        rule_index: usize,
        template: String,
        group: String,
    },

    /// A credential field holds something other than an environment
    /// variable placeholder.
    #[error("Secret policy violation at '{field_path}': {reason}")]
    SecretPolicyError { field_path: String, reason: String },
}

impl ValidationError {
    /// Path of the field that failed validation.
    pub fn field_path(&self) -> &str {
        match self {
            Self::SchemaError { field_path, .. }
            | Self::RegexCompileError { field_path, .. }
            | Self::TemplateReferenceError { field_path, .. }
            | Self::SecretPolicyError { field_path, .. } => field_path,
        }
    }

    /// Index of the offending rule, for errors raised inside a rule list.
    pub fn rule_index(&self) -> Option<usize> {
        match self {
            Self::RegexCompileError { rule_index, .. }
            | Self::TemplateReferenceError { rule_index, .. } => Some(*rule_index),
            Self::SchemaError { .. } | Self::SecretPolicyError { .. } => None,
        }
    }

    /// The error category.
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::SchemaError { .. } => ValidationErrorKind::Schema,
            Self::RegexCompileError { .. } => ValidationErrorKind::RegexCompile,
            Self::TemplateReferenceError { .. } => ValidationErrorKind::TemplateReference,
            Self::SecretPolicyError { .. } => ValidationErrorKind::SecretPolicy,
        }
    }

    pub(crate) fn schema(field_path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SchemaError {
            field_path: field_path.into(),
            reason: reason.into(),
        }
    }
}

/// Validation error categories.
///
/// Used to classify validation errors for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    Schema,
    RegexCompile,
    TemplateReference,
    SecretPolicy,
}

impl std::fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Schema => write!(f, "SchemaError"),
            Self::RegexCompile => write!(f, "RegexCompileError"),
            Self::TemplateReference => write!(f, "TemplateReferenceError"),
            Self::SecretPolicy => write!(f, "SecretPolicyError"),
        }
    }
}

/// Errors raised while reading configuration documents from disk or
/// preparing the validator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to access configuration file: {path} - {reason}")]
    FileAccessError { path: String, reason: String },

    #[error("Failed to parse configuration: {reason}")]
    ParseError { reason: String },

    #[error("Unsupported configuration format for {path}: expected a .json or .toml file")]
    UnsupportedFormat { path: String },

    #[error("Schema generation failed: {reason}")]
    SchemaGeneration { reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Result type alias for configuration operations.
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;
