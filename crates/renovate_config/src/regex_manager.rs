//! Regex-based dependency extractors (`regexManagers`).
//!
//! A regex manager locates dependency versions in files the update
//! automation tool has no built-in support for, such as `ENV FOO_VERSION=`
//! lines in Dockerfiles. It is declarative: file path patterns, content
//! patterns with named capture groups, and optional templates that compute
//! outputs from those groups.

use crate::types::MatchStringsStrategy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "regex_manager_tests.rs"]
mod tests;

/// Capture group names the tool turns into dependency fields.
pub const OUTPUT_GROUPS: &[&str] = &[
    "depName",
    "packageName",
    "currentValue",
    "currentDigest",
    "datasource",
    "versioning",
    "extractVersion",
    "registryUrl",
    "depType",
];

/// One entry of `regexManagers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegexManager {
    /// Regular expressions over repository-relative file paths.
    pub file_match: Vec<String>,

    /// Regular expressions over file content, with named capture groups.
    pub match_strings: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_strings_strategy: Option<MatchStringsStrategy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dep_name_template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name_template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value_template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasource_template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versioning_template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract_version_template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_url_template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dep_type_template: Option<String>,
}

impl RegexManager {
    /// Effective pattern combination strategy.
    pub fn strategy(&self) -> MatchStringsStrategy {
        self.match_strings_strategy.unwrap_or_default()
    }

    /// Template for an output group, if one is configured.
    ///
    /// `output` is a capture group name such as `datasource`.
    pub fn template_for(&self, output: &str) -> Option<&str> {
        let template = match output {
            "depName" => &self.dep_name_template,
            "packageName" => &self.package_name_template,
            "currentValue" => &self.current_value_template,
            "datasource" => &self.datasource_template,
            "versioning" => &self.versioning_template,
            "extractVersion" => &self.extract_version_template,
            "registryUrl" => &self.registry_url_template,
            "depType" => &self.dep_type_template,
            _ => return None,
        };
        template.as_deref()
    }

    /// All configured templates as `(field name, template)` pairs, in
    /// declaration order.
    pub fn templates(&self) -> Vec<(&'static str, &str)> {
        [
            ("depNameTemplate", &self.dep_name_template),
            ("packageNameTemplate", &self.package_name_template),
            ("currentValueTemplate", &self.current_value_template),
            ("datasourceTemplate", &self.datasource_template),
            ("versioningTemplate", &self.versioning_template),
            ("extractVersionTemplate", &self.extract_version_template),
            ("registryUrlTemplate", &self.registry_url_template),
            ("depTypeTemplate", &self.dep_type_template),
        ]
        .into_iter()
        .filter_map(|(field, template)| template.as_deref().map(|t| (field, t)))
        .collect()
    }
}
