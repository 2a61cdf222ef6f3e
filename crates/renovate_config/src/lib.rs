//! Configuration schema and validation for a dependency update automation
//! tool.
//!
//! A configuration document (the tool's `renovate.json`) declares which
//! platform and repositories the tool works on, how it opens pull requests,
//! which custom regex managers extract dependencies from arbitrary files and
//! which package rules change the behavior for selected updates.
//!
//! This crate turns such a document into a strongly-typed
//! [`UpdateAutomationConfig`] and rejects anything malformed before it
//! reaches the tool:
//!
//! - unknown fields and unknown enum values
//! - malformed repository identifiers and duplicate list entries
//! - regular expressions that do not compile
//! - templates that read capture groups their patterns never define
//! - credentials that are literal values instead of `${ENV_VAR}`
//!   placeholders
//!
//! It also previews what the regex managers would extract from a file and
//! which package rules would apply to an update.

pub mod config;
pub mod errors;
pub mod extractor;
pub mod loader;
pub mod package_rule;
pub mod regex_manager;
pub mod repository_name;
pub mod schema;
pub mod secret_reference;
pub mod templates;
pub mod types;
pub mod validator;


pub use config::{NpmConfig, OnboardingConfig, UpdateAutomationConfig};
pub use errors::{
    ConfigurationError, ConfigurationResult, ValidationError, ValidationErrorKind,
};
pub use extractor::{ExtractedDependency, ExtractionError, RegexExtractor, SkipReason};
pub use loader::{load_and_validate, load_document, parse_document, DocumentFormat};
pub use package_rule::{NamePattern, PackageRule, PackageUpdate};
pub use regex_manager::RegexManager;
pub use repository_name::RepositoryName;
pub use schema::SchemaValidator;
pub use secret_reference::SecretReference;
pub use types::{
    AutomergeType, BinarySource, GitUrl, MatchStringsStrategy, Platform, PrCreation,
    RebaseWhen, RequireConfig, RequireConfigMode, UpdateType,
};
pub use validator::{
    validate, ConfigurationValidator, ValidationPolicy, ValidationReport, ValidationWarning,
};
