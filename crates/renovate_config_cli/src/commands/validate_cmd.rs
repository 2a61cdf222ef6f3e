//! `validate`: check a configuration document and report the outcome.
//!
//! ```bash
//! renovate-config validate --document renovate.json
//! renovate-config validate --require-env --format json
//! ```

use std::path::Path;

use clap::Args;
use colored::Colorize;
use renovate_config::{
    load_document, ConfigurationValidator, ValidationPolicy, ValidationReport,
};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::commands::{check_format, resolve_document, to_json};
use crate::config::CliConfig;
use crate::errors::Error;

#[cfg(test)]
#[path = "validate_cmd_tests.rs"]
mod tests;

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the configuration document (.json or .toml)
    #[arg(short, long)]
    pub document: Option<String>,

    /// Fail when a secret placeholder names an unset environment variable
    #[arg(long)]
    pub require_env: bool,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

/// Validation outcome in display form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOutput {
    pub document: String,
    pub valid: bool,
    pub errors: Vec<ErrorOutput>,
    pub warnings: Vec<WarningOutput>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub kind: String,
    pub field_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_index: Option<usize>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningOutput {
    pub field_path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl ReportOutput {
    pub fn from_report(document: &str, report: &ValidationReport) -> Self {
        Self {
            document: document.to_string(),
            valid: report.is_valid(),
            errors: report
                .errors
                .iter()
                .map(|e| ErrorOutput {
                    kind: e.kind().to_string(),
                    field_path: e.field_path().to_string(),
                    rule_index: e.rule_index(),
                    message: e.to_string(),
                })
                .collect(),
            warnings: report
                .warnings
                .iter()
                .map(|w| WarningOutput {
                    field_path: w.field_path.clone(),
                    message: w.message.clone(),
                    recommendation: w.recommendation.clone(),
                })
                .collect(),
        }
    }
}

/// Execute the validate command
#[instrument(skip(settings))]
pub fn execute(args: &ValidateArgs, settings: &CliConfig) -> Result<(), Error> {
    check_format(&args.format)?;

    let path = resolve_document(args.document.as_deref(), settings);
    let require_env = args.require_env || settings.require_env_secrets;
    let report = check_document(&path, require_env)?;

    let output = ReportOutput::from_report(&path.display().to_string(), &report);
    println!("{}", format_report(&output, &args.format)?);

    outcome(&report, settings.warnings_as_errors)
}

/// Loads the document at `path` and runs every validation stage on it.
pub fn check_document(path: &Path, require_env: bool) -> Result<ValidationReport, Error> {
    debug!(message = "Validating document", path = ?path, require_env = require_env);

    let document = load_document(path)?;
    let validator = ConfigurationValidator::new()?.with_policy(ValidationPolicy {
        require_env_secrets: require_env,
    });

    let report = validator.check(&document);
    info!(
        message = "Validation finished",
        path = ?path,
        errors = report.errors.len(),
        warnings = report.warnings.len()
    );
    Ok(report)
}

/// Maps a report to the command result.
pub fn outcome(report: &ValidationReport, warnings_as_errors: bool) -> Result<(), Error> {
    let failed = !report.is_valid() || (warnings_as_errors && !report.warnings.is_empty());
    if failed {
        return Err(Error::ValidationFailed {
            errors: report.errors.len(),
            warnings: report.warnings.len(),
        });
    }
    Ok(())
}

/// Format a report for display.
pub fn format_report(output: &ReportOutput, format: &str) -> Result<String, Error> {
    match format {
        "json" => to_json(output),
        "text" => Ok(format_report_text(output)),
        _ => Err(Error::InvalidArguments(format!(
            "Invalid format: '{}'. Use 'text' or 'json'.",
            format
        ))),
    }
}

fn format_report_text(output: &ReportOutput) -> String {
    let mut text = String::new();

    text.push_str(&format!(
        "\n{} {}\n\n",
        "Validating:".bold(),
        output.document.bright_cyan()
    ));

    if output.valid {
        text.push_str(&format!("{}\n", "✓ Configuration is VALID".green().bold()));
    } else {
        text.push_str(&format!(
            "{} ({} error(s))\n",
            "✗ Configuration is INVALID".red().bold(),
            output.errors.len()
        ));
    }

    if !output.errors.is_empty() {
        text.push_str(&format!("\n{}\n", "Errors:".bold()));
        for error in &output.errors {
            text.push_str(&format!(
                "  {} [{}] {}\n",
                "✗".red(),
                error.kind,
                error.field_path.bold()
            ));
            text.push_str(&format!("    {}\n", error.message));
        }
    }

    if !output.warnings.is_empty() {
        text.push_str(&format!("\n{}\n", "Warnings:".bold()));
        for warning in &output.warnings {
            text.push_str(&format!(
                "  {} {}: {}\n",
                "!".yellow(),
                warning.field_path.bold(),
                warning.message
            ));
            if let Some(recommendation) = &warning.recommendation {
                text.push_str(&format!("    {}\n", recommendation.dimmed()));
            }
        }
    }

    text
}
