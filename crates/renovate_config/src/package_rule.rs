//! Package rules (`packageRules`).
//!
//! A package rule pairs a filter (package names, update types) with an
//! effect (enable/disable, schedule, commit metadata, merge behavior). The
//! update automation tool owns the precedence between matching rules; this
//! module only answers which rules select a given update.

use crate::types::{AutomergeType, UpdateType};
use regex::{Regex, RegexBuilder};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "package_rule_tests.rs"]
mod tests;

/// One entry of `packageRules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PackageRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    // Filter
    /// Exact package names or `/regex/` literals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_package_names: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_package_names: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_update_types: Option<Vec<UpdateType>>,

    // Effect
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Presets merged into this rule, e.g. `schedule:daily`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separate_multiple_major: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separate_minor_patch: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability_days: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_commit_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_body: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automerge: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automerge_type: Option<AutomergeType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versioning: Option<String>,
}

/// The update a rule filter is evaluated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageUpdate {
    pub package_name: String,
    /// `None` when the kind of update is not known.
    pub update_type: Option<UpdateType>,
}

impl PackageUpdate {
    pub fn new(package_name: impl Into<String>, update_type: Option<UpdateType>) -> Self {
        Self {
            package_name: package_name.into(),
            update_type,
        }
    }
}

/// A package name filter entry.
#[derive(Debug, Clone)]
pub enum NamePattern {
    Exact(String),
    Regex(Regex),
}

impl NamePattern {
    /// Parses an entry of `matchPackageNames`/`excludePackageNames`.
    ///
    /// `/expr/` and `/expr/i` are regular expressions; anything else is an
    /// exact name.
    ///
    /// # Errors
    ///
    /// Returns the regex compile error message for a malformed `/expr/`.
    pub fn parse(entry: &str) -> Result<Self, String> {
        match regex_literal(entry) {
            Some((expression, case_insensitive)) => RegexBuilder::new(expression)
                .case_insensitive(case_insensitive)
                .build()
                .map(Self::Regex)
                .map_err(|e| e.to_string()),
            None => Ok(Self::Exact(entry.to_string())),
        }
    }

    pub fn matches(&self, package_name: &str) -> bool {
        match self {
            Self::Exact(name) => name == package_name,
            Self::Regex(re) => re.is_match(package_name),
        }
    }
}

/// Splits a `/expr/` or `/expr/i` literal into its expression and
/// case-insensitivity flag.
pub(crate) fn regex_literal(entry: &str) -> Option<(&str, bool)> {
    let body = entry.strip_prefix('/')?;
    if let Some(expression) = body.strip_suffix("/i") {
        return Some((expression, true));
    }
    body.strip_suffix('/').map(|expression| (expression, false))
}

impl PackageRule {
    /// Whether the rule has any filter at all.
    pub fn has_matchers(&self) -> bool {
        self.match_package_names.is_some()
            || self.exclude_package_names.is_some()
            || self.match_update_types.is_some()
    }

    /// Whether the rule carries effect fields besides `enabled`.
    pub(crate) fn has_effects_besides_enabled(&self) -> bool {
        self.extends.is_some()
            || self.schedule.is_some()
            || self.separate_multiple_major.is_some()
            || self.separate_minor_patch.is_some()
            || self.stability_days.is_some()
            || self.semantic_commit_type.is_some()
            || self.commit_body.is_some()
            || self.automerge.is_some()
            || self.automerge_type.is_some()
            || self.versioning.is_some()
    }

    /// Whether every present filter accepts `update`.
    ///
    /// A rule with `matchUpdateTypes` does not match an update whose type is
    /// unknown. Malformed `/regex/` entries never match; the validator
    /// rejects them before a rule gets here.
    pub fn matches(&self, update: &PackageUpdate) -> bool {
        if let Some(names) = &self.match_package_names {
            if !any_name_matches(names, &update.package_name) {
                return false;
            }
        }

        if let Some(names) = &self.exclude_package_names {
            if any_name_matches(names, &update.package_name) {
                return false;
            }
        }

        if let Some(types) = &self.match_update_types {
            match update.update_type {
                Some(update_type) if types.contains(&update_type) => {}
                _ => return false,
            }
        }

        true
    }
}

fn any_name_matches(entries: &[String], package_name: &str) -> bool {
    entries.iter().any(|entry| {
        NamePattern::parse(entry)
            .map(|pattern| pattern.matches(package_name))
            .unwrap_or(false)
    })
}
