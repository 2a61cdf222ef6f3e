//! `rules`: list the package rules that select an update.
//!
//! ```bash
//! renovate-config rules --package postgres --update-type major
//! ```

use std::str::FromStr;

use clap::Args;
use colored::Colorize;
use renovate_config::{
    load_and_validate, ConfigurationValidator, PackageRule, PackageUpdate,
    UpdateAutomationConfig, UpdateType,
};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::commands::{check_format, resolve_document, to_json};
use crate::config::CliConfig;
use crate::errors::Error;

#[cfg(test)]
#[path = "rules_cmd_tests.rs"]
mod tests;

/// Arguments for the rules command
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Path to the configuration document (.json or .toml)
    #[arg(short, long)]
    pub document: Option<String>,

    /// Package name of the update
    #[arg(short, long)]
    pub package: String,

    /// Kind of update (major, minor, patch, pin, digest, ...)
    #[arg(short, long)]
    pub update_type: Option<String>,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

/// A package rule selected by an update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMatch {
    pub index: usize,
    pub rule: PackageRule,
}

/// Execute the rules command
#[instrument(skip(settings))]
pub fn execute(args: &RulesArgs, settings: &CliConfig) -> Result<(), Error> {
    check_format(&args.format)?;
    let update = parse_update(&args.package, args.update_type.as_deref())?;

    let path = resolve_document(args.document.as_deref(), settings);
    let config = load_and_validate(&path, &ConfigurationValidator::new()?)?;
    let matches = matching_rules(&config, &update);

    match args.format.as_str() {
        "json" => println!("{}", to_json(&matches)?),
        _ => println!("{}", format_matches_text(&update, &matches)),
    }
    Ok(())
}

/// Builds the update to match from command-line arguments.
pub fn parse_update(package: &str, update_type: Option<&str>) -> Result<PackageUpdate, Error> {
    if package.trim().is_empty() {
        return Err(Error::InvalidArguments(
            "--package cannot be empty".to_string(),
        ));
    }

    let update_type = update_type
        .map(UpdateType::from_str)
        .transpose()
        .map_err(Error::InvalidArguments)?;

    Ok(PackageUpdate::new(package, update_type))
}

pub fn matching_rules(config: &UpdateAutomationConfig, update: &PackageUpdate) -> Vec<RuleMatch> {
    let matches: Vec<RuleMatch> = config
        .matching_package_rules(update)
        .into_iter()
        .map(|(index, rule)| RuleMatch {
            index,
            rule: rule.clone(),
        })
        .collect();

    debug!(
        message = "Matched package rules",
        package = %update.package_name,
        matches = matches.len()
    );
    matches
}

fn format_matches_text(update: &PackageUpdate, matches: &[RuleMatch]) -> String {
    let update_type = update
        .update_type
        .map(|t| t.to_string())
        .unwrap_or_else(|| "any".to_string());

    let mut text = format!(
        "\n{} {} ({})\n\n",
        "Package rules for".bold(),
        update.package_name.bright_cyan(),
        update_type
    );

    if matches.is_empty() {
        text.push_str(&format!("  {}\n", "(no rules match)".dimmed()));
        return text;
    }

    for m in matches {
        let label = m
            .rule
            .description
            .clone()
            .unwrap_or_else(|| format!("packageRules[{}]", m.index));
        let state = match m.rule.enabled {
            Some(false) => "[disabled]".red().to_string(),
            _ => "[enabled]".green().to_string(),
        };
        text.push_str(&format!("  #{} {} {}\n", m.index, label.bold(), state));
    }

    text
}
