//! The update automation configuration record.
//!
//! Field names are the camelCase keys the update automation tool reads.
//! Optional fields stay `None` when absent so that serializing a validated
//! record reproduces the document it came from.

use crate::package_rule::{PackageRule, PackageUpdate};
use crate::regex_manager::RegexManager;
use crate::repository_name::RepositoryName;
use crate::secret_reference::SecretReference;
use crate::types::{BinarySource, GitUrl, Platform, PrCreation, RebaseWhen, RequireConfig};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Configuration consumed by the update automation tool.
///
/// Obtain one through [`validate`](crate::validate); deserializing directly
/// skips the repository, regex, template and secret checks.
///
/// # Example document
///
/// ```json
/// {
///   "platform": "bitbucket",
///   "username": "jenkins",
///   "password": "${BITBUCKET_PASSWORD}",
///   "repositories": ["gangsplit/api-gateway"],
///   "baseBranches": ["develop"],
///   "rebaseWhen": "behind-base-branch"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateAutomationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary_source: Option<BinarySource>,

    /// Suppress side-effecting actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_config: Option<bool>,

    pub platform: Platform,

    /// API endpoint override for self-hosted platforms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// IANA time zone used to interpret schedules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<SecretReference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<SecretReference>,

    /// Labels applied to every change the tool opens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npm: Option<NpmConfig>,

    /// Target repositories, processed in order.
    pub repositories: Vec<RepositoryName>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_url: Option<GitUrl>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding_config: Option<OnboardingConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persist_repo_data: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_config: Option<RequireConfig>,

    /// Candidate base branches in priority order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_branches: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rebase_when: Option<RebaseWhen>,

    /// Time windows in which the tool may act. Absent means any time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_creation: Option<PrCreation>,

    /// Bitbucket only: request the repository's default reviewers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bb_use_default_reviewers: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewers_from_code_owners: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_internal_deps: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex_managers: Option<Vec<RegexManager>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_rules: Option<Vec<PackageRule>>,
}

/// Settings applied when onboarding a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OnboardingConfig {
    /// Presets written into the onboarding config, e.g. `config:base`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Vec<String>>,
}

/// npm manager settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NpmConfig {
    /// Commands run after an update, e.g. `npmDedupe`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_update_options: Option<Vec<String>>,
}

impl UpdateAutomationConfig {
    pub fn regex_managers(&self) -> &[RegexManager] {
        self.regex_managers.as_deref().unwrap_or_default()
    }

    pub fn package_rules(&self) -> &[PackageRule] {
        self.package_rules.as_deref().unwrap_or_default()
    }

    /// Package rules whose filters select `update`, with their index, in
    /// document order.
    ///
    /// The tool decides how matching rules combine; later rules usually
    /// override earlier ones.
    pub fn matching_package_rules(&self, update: &PackageUpdate) -> Vec<(usize, &PackageRule)> {
        self.package_rules()
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.matches(update))
            .collect()
    }
}
