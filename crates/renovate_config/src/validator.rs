//! Configuration validation.
//!
//! Validation runs in three stages and stops after the first stage that
//! finds problems:
//!
//! 1. **Schema**: the raw document is checked against the generated JSON
//!    Schema (required and unknown fields, types, enum values).
//! 2. **Typed**: the document is deserialized into
//!    [`UpdateAutomationConfig`].
//! 3. **Semantic**: repository identifiers, list uniqueness, regular
//!    expressions, template references and the secret placeholder policy.
//!
//! [`ConfigurationValidator::check`] collects every error of the failing
//! stage plus non-blocking warnings; [`validate`] returns the first error in
//! field declaration order.
//!
//! # Examples
//!
//! ```rust
//! use renovate_config::{validate, ValidationError};
//! use serde_json::json;
//!
//! let config = validate(&json!({
//!     "platform": "bitbucket",
//!     "password": "${BITBUCKET_PASSWORD}",
//!     "repositories": ["gangsplit/api-gateway"]
//! }))
//! .unwrap();
//! assert_eq!(config.repositories.len(), 1);
//!
//! let error = validate(&json!({
//!     "platform": "bitbucket",
//!     "password": "hunter2",
//!     "repositories": ["gangsplit/api-gateway"]
//! }))
//! .unwrap_err();
//! assert!(matches!(error, ValidationError::SecretPolicyError { .. }));
//! ```

use crate::config::UpdateAutomationConfig;
use crate::errors::{ConfigurationResult, ValidationError};
use crate::package_rule::{regex_literal, NamePattern, PackageRule};
use crate::regex_manager::RegexManager;
use crate::repository_name::RepositoryName;
use crate::schema::{SchemaValidator, ROOT_FIELD_PATH};
use crate::secret_reference::SecretReference;
use crate::templates::template_references;
use crate::types::MatchStringsStrategy;
use chrono_tz::Tz;
use regex::Regex;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, warn};

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

/// Non-blocking validation finding.
///
/// Warnings point at configuration the tool accepts but which probably
/// does not do what the author meant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Dot-separated path to the field that triggered the warning.
    pub field_path: String,
    /// Human-readable warning message.
    pub message: String,
    /// Optional recommendation for how to address it.
    pub recommendation: Option<String>,
}

/// Outcome of [`ConfigurationValidator::check`].
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Blocking problems, in the order they were found.
    pub errors: Vec<ValidationError>,
    /// Non-blocking findings.
    pub warnings: Vec<ValidationWarning>,
    /// The validated record; present only when there are no errors.
    pub config: Option<UpdateAutomationConfig>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// The validated record, or the first error.
    pub fn into_result(self) -> Result<UpdateAutomationConfig, ValidationError> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }

        self.config
            .ok_or_else(|| ValidationError::schema(ROOT_FIELD_PATH, "Document was not validated"))
    }
}

/// Optional policies on top of the structural rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Fail when a secret placeholder names an environment variable that is
    /// not set.
    pub require_env_secrets: bool,
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Validates update automation documents.
pub struct ConfigurationValidator {
    schema: SchemaValidator,
    policy: ValidationPolicy,
    env_lookup: EnvLookup,
}

impl ConfigurationValidator {
    /// Create a validator with the default policy.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::SchemaGeneration` if the document schema
    /// cannot be built.
    pub fn new() -> ConfigurationResult<Self> {
        Ok(Self {
            schema: SchemaValidator::new()?,
            policy: ValidationPolicy::default(),
            env_lookup: Box::new(|name| std::env::var(name).ok()),
        })
    }

    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the environment lookup used by `require_env_secrets`.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env_lookup = Box::new(lookup);
        self
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Validates `document`, returning the typed record or the first error in
    /// field declaration order.
    pub fn validate(&self, document: &Value) -> Result<UpdateAutomationConfig, ValidationError> {
        self.check(document).into_result()
    }

    /// Validates `document`, collecting all errors and warnings.
    pub fn check(&self, document: &Value) -> ValidationReport {
        let mut report = ValidationReport::new();

        let schema_errors = self.schema.validate(document);
        if !schema_errors.is_empty() {
            debug!(
                message = "Document failed schema validation",
                error_count = schema_errors.len()
            );
            report.errors = schema_errors;
            return report;
        }

        let config: UpdateAutomationConfig = match serde_json::from_value(document.clone()) {
            Ok(config) => config,
            Err(e) => {
                report.add_error(ValidationError::schema(ROOT_FIELD_PATH, e.to_string()));
                return report;
            }
        };

        check_endpoint(&mut report, config.endpoint.as_deref());
        check_timezone(&mut report, config.timezone.as_deref());
        self.check_secret(&mut report, "password", config.password.as_ref());
        self.check_secret(&mut report, "token", config.token.as_ref());
        check_labels(&mut report, config.labels.as_deref());
        check_repositories(&mut report, &config.repositories);
        check_base_branches(&mut report, config.base_branches.as_deref());
        check_schedule(&mut report, "schedule", config.schedule.as_deref());
        check_onboarding(&mut report, &config);

        for (index, manager) in config.regex_managers().iter().enumerate() {
            check_regex_manager(&mut report, index, manager);
        }

        for (index, rule) in config.package_rules().iter().enumerate() {
            check_package_rule(&mut report, index, rule);
        }

        for warning in &report.warnings {
            warn!(
                message = "Configuration warning",
                field = %warning.field_path,
                warning = %warning.message
            );
        }

        if report.is_valid() {
            info!(
                message = "Configuration is valid",
                platform = %config.platform,
                repositories = config.repositories.len(),
                warnings = report.warnings.len()
            );
            report.config = Some(config);
        } else {
            debug!(
                message = "Configuration is invalid",
                error_count = report.errors.len()
            );
        }

        report
    }

    fn check_secret(
        &self,
        report: &mut ValidationReport,
        field: &str,
        secret: Option<&SecretReference>,
    ) {
        let Some(secret) = secret else {
            return;
        };

        match secret.variable_name() {
            None => report.add_error(ValidationError::SecretPolicyError {
                field_path: field.to_string(),
                reason: "Credential must be an environment variable placeholder of the form ${NAME}, not a literal value".to_string(),
            }),
            Some(name) if self.policy.require_env_secrets && (self.env_lookup)(name).is_none() => {
                report.add_error(ValidationError::SecretPolicyError {
                    field_path: field.to_string(),
                    reason: format!("Environment variable '{}' is not set", name),
                })
            }
            Some(_) => {}
        }
    }
}

/// Validates `document` with the default policy.
///
/// Returns the strongly-typed record, or the first problem found in field
/// declaration order. Nothing is coerced: unknown enum values, unknown
/// fields, explicit `null`s and malformed rules all fail.
pub fn validate(document: &Value) -> Result<UpdateAutomationConfig, ValidationError> {
    let validator = ConfigurationValidator::new().map_err(|e| {
        ValidationError::schema(ROOT_FIELD_PATH, format!("Validator unavailable: {}", e))
    })?;
    validator.validate(document)
}

// ============================================================================
// Top-level field checks
// ============================================================================

fn check_endpoint(report: &mut ValidationReport, endpoint: Option<&str>) {
    if let Some(endpoint) = endpoint {
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            report.add_error(ValidationError::schema(
                "endpoint",
                format!("Endpoint '{}' must start with http:// or https://", endpoint),
            ));
        }
    }
}

fn check_timezone(report: &mut ValidationReport, timezone: Option<&str>) {
    if let Some(timezone) = timezone {
        if timezone.parse::<Tz>().is_err() {
            report.add_error(ValidationError::schema(
                "timezone",
                format!(
                    "'{}' is not an IANA time zone name such as 'Europe/Madrid' or 'UTC'",
                    timezone
                ),
            ));
        }
    }
}

fn check_labels(report: &mut ValidationReport, labels: Option<&[String]>) {
    check_unique_strings(report, "labels", "Label", labels.unwrap_or_default());
}

fn check_base_branches(report: &mut ValidationReport, branches: Option<&[String]>) {
    let Some(branches) = branches else {
        return;
    };

    if branches.is_empty() {
        report.add_error(ValidationError::schema(
            "baseBranches",
            "Base branch list cannot be empty; omit the field to use the default branch",
        ));
        return;
    }

    check_unique_strings(report, "baseBranches", "Base branch", branches);
}

/// Rejects empty entries and repeated entries in a list that acts as a set.
fn check_unique_strings(report: &mut ValidationReport, field: &str, what: &str, values: &[String]) {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (index, value) in values.iter().enumerate() {
        let field_path = format!("{}[{}]", field, index);
        if value.trim().is_empty() {
            report.add_error(ValidationError::schema(
                field_path,
                format!("{} cannot be empty", what),
            ));
            continue;
        }

        if let Some(first) = seen.get(value.as_str()) {
            report.add_error(ValidationError::schema(
                field_path,
                format!(
                    "Duplicate {} '{}' (first listed at {}[{}])",
                    what.to_lowercase(),
                    value,
                    field,
                    first
                ),
            ));
        } else {
            seen.insert(value, index);
        }
    }
}

fn check_repositories(report: &mut ValidationReport, repositories: &[RepositoryName]) {
    if repositories.is_empty() {
        report.add_error(ValidationError::schema(
            "repositories",
            "At least one repository is required",
        ));
        return;
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (index, repository) in repositories.iter().enumerate() {
        let field_path = format!("repositories[{}]", index);
        if let Err(reason) = RepositoryName::check(repository) {
            report.add_error(ValidationError::schema(field_path, reason));
            continue;
        }

        if let Some(first) = seen.get(repository.as_str()) {
            report.add_error(ValidationError::schema(
                field_path,
                format!(
                    "Duplicate repository '{}' (first listed at repositories[{}]); repository identifiers must be unique",
                    repository, first
                ),
            ));
        } else {
            seen.insert(repository.as_str(), index);
        }
    }
}

fn check_schedule(report: &mut ValidationReport, field: &str, schedule: Option<&[String]>) {
    for (index, entry) in schedule.unwrap_or_default().iter().enumerate() {
        if entry.trim().is_empty() {
            report.add_error(ValidationError::schema(
                format!("{}[{}]", field, index),
                "Schedule entry cannot be empty",
            ));
        }
    }
}

fn check_onboarding(report: &mut ValidationReport, config: &UpdateAutomationConfig) {
    if config.onboarding == Some(false) && config.onboarding_config.is_some() {
        report.add_warning(ValidationWarning {
            field_path: "onboardingConfig".to_string(),
            message: "onboardingConfig has no effect while onboarding is disabled".to_string(),
            recommendation: Some(
                "Enable onboarding or remove onboardingConfig".to_string(),
            ),
        });
    }
}

// ============================================================================
// Regex manager checks
// ============================================================================

fn check_regex_manager(report: &mut ValidationReport, index: usize, manager: &RegexManager) {
    let prefix = format!("regexManagers[{}]", index);

    if manager.file_match.is_empty() {
        report.add_error(ValidationError::schema(
            format!("{}.fileMatch", prefix),
            "At least one fileMatch pattern is required",
        ));
    }
    for (pattern_index, pattern) in manager.file_match.iter().enumerate() {
        let field_path = format!("{}.fileMatch[{}]", prefix, pattern_index);
        if let Err(error) = compile_rule_regex(&field_path, index, pattern) {
            report.add_error(error);
        }
    }

    if manager.match_strings.is_empty() {
        report.add_error(ValidationError::schema(
            format!("{}.matchStrings", prefix),
            "At least one matchStrings pattern is required",
        ));
        return;
    }

    let mut pattern_groups: Vec<BTreeSet<String>> = Vec::new();
    for (pattern_index, pattern) in manager.match_strings.iter().enumerate() {
        let field_path = format!("{}.matchStrings[{}]", prefix, pattern_index);
        match compile_rule_regex(&field_path, index, pattern) {
            Ok(re) => pattern_groups.push(
                re.capture_names()
                    .flatten()
                    .map(|name| name.to_string())
                    .collect(),
            ),
            Err(error) => report.add_error(error),
        }
    }

    // Group availability is only meaningful once every pattern compiled.
    if pattern_groups.len() != manager.match_strings.len() {
        return;
    }

    let strategy = manager.strategy();
    let is_available = |group: &str| match strategy {
        MatchStringsStrategy::Any => pattern_groups.iter().all(|groups| groups.contains(group)),
        MatchStringsStrategy::Recursive | MatchStringsStrategy::Combination => {
            pattern_groups.iter().any(|groups| groups.contains(group))
        }
    };

    for (field, template) in manager.templates() {
        let field_path = format!("{}.{}", prefix, field);
        match template_references(template) {
            Ok(references) => {
                for group in references.into_iter().filter(|group| !is_available(group)) {
                    report.add_error(ValidationError::TemplateReferenceError {
                        field_path: field_path.clone(),
                        rule_index: index,
                        template: template.to_string(),
                        group,
                    });
                }
            }
            Err(e) => report.add_error(ValidationError::schema(field_path, e.to_string())),
        }
    }

    let has_source = |groups: &[&str], template: Option<&str>| {
        template.is_some()
            || groups
                .iter()
                .any(|group| pattern_groups.iter().any(|names| names.contains(*group)))
    };

    let outputs: [(&str, &[&str], Option<&str>); 3] = [
        ("depName", &["depName"], manager.dep_name_template.as_deref()),
        (
            "currentValue",
            &["currentValue", "currentDigest"],
            manager.current_value_template.as_deref(),
        ),
        ("datasource", &["datasource"], manager.datasource_template.as_deref()),
    ];
    for (output, groups, template) in outputs {
        if !has_source(groups, template) {
            report.add_warning(ValidationWarning {
                field_path: format!("{}.matchStrings", prefix),
                message: format!(
                    "No capture group or template provides '{}'; extracted dependencies will be skipped",
                    output
                ),
                recommendation: Some(format!(
                    "Add a (?<{}>...) group to matchStrings or set {}Template",
                    output, output
                )),
            });
        }
    }
}

fn compile_rule_regex(
    field_path: &str,
    rule_index: usize,
    pattern: &str,
) -> Result<Regex, ValidationError> {
    Regex::new(pattern).map_err(|e| ValidationError::RegexCompileError {
        field_path: field_path.to_string(),
        rule_index,
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

// ============================================================================
// Package rule checks
// ============================================================================

fn check_package_rule(report: &mut ValidationReport, index: usize, rule: &PackageRule) {
    let prefix = format!("packageRules[{}]", index);

    for (field, names) in [
        ("matchPackageNames", &rule.match_package_names),
        ("excludePackageNames", &rule.exclude_package_names),
    ] {
        for (name_index, name) in names.as_deref().unwrap_or_default().iter().enumerate() {
            let field_path = format!("{}.{}[{}]", prefix, field, name_index);
            if name.trim().is_empty() {
                report.add_error(ValidationError::schema(
                    field_path,
                    "Package name cannot be empty",
                ));
                continue;
            }

            if let Err(reason) = NamePattern::parse(name) {
                let pattern = regex_literal(name).map_or(name.as_str(), |(expression, _)| expression);
                report.add_error(ValidationError::RegexCompileError {
                    field_path,
                    rule_index: index,
                    pattern: pattern.to_string(),
                    reason,
                });
            }
        }
    }

    check_schedule(report, &format!("{}.schedule", prefix), rule.schedule.as_deref());

    if !rule.has_matchers() {
        report.add_warning(ValidationWarning {
            field_path: prefix.clone(),
            message: "Package rule has no matchers and applies to every package".to_string(),
            recommendation: Some(
                "Add matchPackageNames, excludePackageNames or matchUpdateTypes if this is not intended"
                    .to_string(),
            ),
        });
    }

    if rule.enabled == Some(false) && rule.has_effects_besides_enabled() {
        report.add_warning(ValidationWarning {
            field_path: format!("{}.enabled", prefix),
            message: "Package rule disables updates, so its other settings have no effect"
                .to_string(),
            recommendation: Some("Move the other settings to a separate rule".to_string()),
        });
    }
}
