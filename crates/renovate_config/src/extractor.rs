//! Extraction preview for regex managers.
//!
//! Runs the `regexManagers` of a validated configuration over file content
//! and reports the dependencies the update automation tool would find. This
//! is a preview: no datasource is queried and nothing is updated.
//!
//! # Examples
//!
//! ```rust
//! use renovate_config::extractor::RegexExtractor;
//! use renovate_config::validate;
//! use serde_json::json;
//!
//! let config = validate(&json!({
//!     "platform": "github",
//!     "repositories": ["a/b"],
//!     "regexManagers": [{
//!         "fileMatch": ["\\.tf$"],
//!         "matchStrings": ["container_image\\s*=\\s*\"(?<depName>.*?):(?<currentValue>.*?)\""],
//!         "datasourceTemplate": "docker"
//!     }]
//! }))
//! .unwrap();
//!
//! let extractor = RegexExtractor::new(&config).unwrap();
//! let deps = extractor
//!     .extract("ecs/main.tf", "container_image = \"nginx:1.25.3\"\n")
//!     .unwrap();
//!
//! assert_eq!(deps.len(), 1);
//! assert_eq!(deps[0].dep_name.as_deref(), Some("nginx"));
//! assert_eq!(deps[0].current_value.as_deref(), Some("1.25.3"));
//! assert_eq!(deps[0].datasource.as_deref(), Some("docker"));
//! ```

use crate::config::UpdateAutomationConfig;
use crate::errors::ValidationError;
use crate::regex_manager::{RegexManager, OUTPUT_GROUPS};
use crate::templates::TemplateRenderer;
use crate::types::MatchStringsStrategy;
use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, trace};

#[cfg(test)]
#[path = "extractor_tests.rs"]
mod tests;

type Groups = BTreeMap<String, String>;

/// Extraction failed for a manager.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Manager {manager_index}: failed to render {field} for '{file}': {message}")]
    TemplateRender {
        manager_index: usize,
        field: String,
        file: String,
        message: String,
    },
}

/// Why the update automation tool would skip an extracted dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    MissingDepName,
    MissingCurrentValue,
    MissingDatasource,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDepName => write!(f, "missing depName"),
            Self::MissingCurrentValue => write!(f, "missing currentValue"),
            Self::MissingDatasource => write!(f, "missing datasource"),
        }
    }
}

/// A dependency found by a regex manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDependency {
    pub file: String,
    pub manager_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dep_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_digest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versioning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extract_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dep_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<SkipReason>,
}

struct CompiledManager {
    manager: RegexManager,
    file_match: Vec<Regex>,
    match_strings: Vec<Regex>,
}

/// Compiled regex managers of one configuration.
pub struct RegexExtractor {
    managers: Vec<CompiledManager>,
    renderer: TemplateRenderer,
}

impl RegexExtractor {
    /// Compiles every manager of `config`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::RegexCompileError` for a pattern that does
    /// not compile. Configurations returned by [`crate::validate`] never
    /// fail here.
    pub fn new(config: &UpdateAutomationConfig) -> Result<Self, ValidationError> {
        let mut managers = Vec::new();
        for (index, manager) in config.regex_managers().iter().enumerate() {
            let prefix = format!("regexManagers[{}]", index);
            managers.push(CompiledManager {
                manager: manager.clone(),
                file_match: compile_all(&format!("{}.fileMatch", prefix), index, &manager.file_match)?,
                match_strings: compile_all(
                    &format!("{}.matchStrings", prefix),
                    index,
                    &manager.match_strings,
                )?,
            });
        }

        debug!(message = "Compiled regex managers", count = managers.len());
        Ok(Self {
            managers,
            renderer: TemplateRenderer::new(),
        })
    }

    pub fn manager_count(&self) -> usize {
        self.managers.len()
    }

    /// Whether any `fileMatch` pattern of the manager matches `path`.
    ///
    /// Returns `false` for an unknown manager index.
    pub fn matches_file(&self, manager_index: usize, path: &str) -> bool {
        self.managers
            .get(manager_index)
            .is_some_and(|m| m.file_match.iter().any(|re| re.is_match(path)))
    }

    /// Runs every manager whose `fileMatch` selects `path` over `content`.
    ///
    /// Dependencies are returned in manager order, then in match order.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::TemplateRender` if a template fails to
    /// render.
    pub fn extract(
        &self,
        path: &str,
        content: &str,
    ) -> Result<Vec<ExtractedDependency>, ExtractionError> {
        let mut dependencies = Vec::new();

        for (index, compiled) in self.managers.iter().enumerate() {
            if !self.matches_file(index, path) {
                continue;
            }

            let group_sets = match compiled.manager.strategy() {
                MatchStringsStrategy::Any => any_matches(&compiled.match_strings, content),
                MatchStringsStrategy::Combination => {
                    combination_matches(&compiled.match_strings, content)
                }
                MatchStringsStrategy::Recursive => {
                    let mut found = Vec::new();
                    recursive_matches(&compiled.match_strings, content, &Groups::new(), &mut found);
                    found
                }
            };

            trace!(
                message = "Manager matched file",
                manager = index,
                file = path,
                matches = group_sets.len()
            );

            for groups in group_sets {
                dependencies.push(self.build_dependency(index, compiled, path, &groups)?);
            }
        }

        Ok(dependencies)
    }

    fn build_dependency(
        &self,
        manager_index: usize,
        compiled: &CompiledManager,
        path: &str,
        groups: &Groups,
    ) -> Result<ExtractedDependency, ExtractionError> {
        let mut outputs: BTreeMap<&str, String> = BTreeMap::new();
        for &output in OUTPUT_GROUPS {
            let value = match compiled.manager.template_for(output) {
                Some(template) => self.renderer.render(template, groups).map_err(|e| {
                    ExtractionError::TemplateRender {
                        manager_index,
                        field: format!("{}Template", output),
                        file: path.to_string(),
                        message: e.message,
                    }
                })?,
                None => groups.get(output).cloned().unwrap_or_default(),
            };

            if !value.is_empty() {
                outputs.insert(output, value);
            }
        }

        let mut dependency = ExtractedDependency {
            file: path.to_string(),
            manager_index,
            dep_name: outputs.remove("depName"),
            package_name: outputs.remove("packageName"),
            current_value: outputs.remove("currentValue"),
            current_digest: groups.get("currentDigest").filter(|d| !d.is_empty()).cloned(),
            datasource: outputs.remove("datasource"),
            versioning: outputs.remove("versioning"),
            extract_version: outputs.remove("extractVersion"),
            registry_url: outputs.remove("registryUrl"),
            dep_type: outputs.remove("depType"),
            skip_reason: None,
        };

        dependency.skip_reason = if dependency.dep_name.is_none() {
            Some(SkipReason::MissingDepName)
        } else if dependency.current_value.is_none() && dependency.current_digest.is_none() {
            Some(SkipReason::MissingCurrentValue)
        } else if dependency.datasource.is_none() {
            Some(SkipReason::MissingDatasource)
        } else {
            None
        };

        Ok(dependency)
    }
}

fn compile_all(
    field_prefix: &str,
    rule_index: usize,
    patterns: &[String],
) -> Result<Vec<Regex>, ValidationError> {
    patterns
        .iter()
        .enumerate()
        .map(|(i, pattern)| {
            Regex::new(pattern).map_err(|e| ValidationError::RegexCompileError {
                field_path: format!("{}[{}]", field_prefix, i),
                rule_index,
                pattern: pattern.clone(),
                reason: e.to_string(),
            })
        })
        .collect()
}

fn named_groups(re: &Regex, captures: &Captures<'_>) -> Groups {
    re.capture_names()
        .flatten()
        .filter_map(|name| {
            captures
                .name(name)
                .map(|m| (name.to_string(), m.as_str().to_string()))
        })
        .collect()
}

/// Every match of every pattern is its own dependency.
fn any_matches(patterns: &[Regex], content: &str) -> Vec<Groups> {
    patterns
        .iter()
        .flat_map(|re| re.captures_iter(content).map(move |c| named_groups(re, &c)))
        .collect()
}

/// All matches of all patterns merge into one dependency; later groups win.
fn combination_matches(patterns: &[Regex], content: &str) -> Vec<Groups> {
    let mut merged = Groups::new();
    let mut matched = false;
    for re in patterns {
        for captures in re.captures_iter(content) {
            matched = true;
            merged.extend(named_groups(re, &captures));
        }
    }

    if matched {
        vec![merged]
    } else {
        Vec::new()
    }
}

/// Each pattern searches the text matched by the previous one.
fn recursive_matches(patterns: &[Regex], text: &str, inherited: &Groups, found: &mut Vec<Groups>) {
    let Some((re, rest)) = patterns.split_first() else {
        found.push(inherited.clone());
        return;
    };

    for captures in re.captures_iter(text) {
        let mut groups = inherited.clone();
        groups.extend(named_groups(re, &captures));
        let matched = captures.get(0).map_or("", |m| m.as_str());
        recursive_matches(rest, matched, &groups, found);
    }
}
