//! Enumerated configuration values.
//!
//! Spellings match the values accepted by the update automation tool
//! exactly. Unknown values are rejected rather than mapped to a default.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;

/// How the tool obtains the runtime binaries it needs (npm, docker, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BinarySource {
    Global,
    Docker,
    Install,
    Hermit,
}

/// Code hosting platform the tool talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    Azure,
    Bitbucket,
    BitbucketServer,
    Codecommit,
    Forgejo,
    Gerrit,
    Gitea,
    Github,
    Gitlab,
    Local,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Azure => "azure",
            Self::Bitbucket => "bitbucket",
            Self::BitbucketServer => "bitbucket-server",
            Self::Codecommit => "codecommit",
            Self::Forgejo => "forgejo",
            Self::Gerrit => "gerrit",
            Self::Gitea => "gitea",
            Self::Github => "github",
            Self::Gitlab => "gitlab",
            Self::Local => "local",
        };
        write!(f, "{}", name)
    }
}

/// Transport used to clone target repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GitUrl {
    Default,
    Ssh,
    Https,
    Endpoint,
}

/// When an existing update branch gets rebased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RebaseWhen {
    Auto,
    Never,
    Conflicted,
    BehindBaseBranch,
    Automerging,
}

/// When a pull request is opened for an update branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PrCreation {
    Immediate,
    NotPending,
    StatusSuccess,
    Approval,
}

/// Whether target repositories must carry their own config file.
///
/// Older documents use a plain boolean; both spellings are accepted and
/// written back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RequireConfig {
    Flag(bool),
    Mode(RequireConfigMode),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequireConfigMode {
    Required,
    Optional,
    Ignored,
}

/// Kind of version change an update represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum UpdateType {
    Major,
    Minor,
    Patch,
    Pin,
    Digest,
    PinDigest,
    LockFileMaintenance,
    Rollback,
    Bump,
    Replacement,
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
            Self::Pin => "pin",
            Self::Digest => "digest",
            Self::PinDigest => "pinDigest",
            Self::LockFileMaintenance => "lockFileMaintenance",
            Self::Rollback => "rollback",
            Self::Bump => "bump",
            Self::Replacement => "replacement",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for UpdateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| format!("unknown update type '{}'", s))
    }
}

/// How an approved update gets merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AutomergeType {
    Branch,
    Pr,
    PrComment,
}

/// How the patterns of a regex manager combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MatchStringsStrategy {
    /// Every match of every pattern is a separate dependency.
    #[default]
    Any,
    /// Each pattern runs inside the matches of the previous one.
    Recursive,
    /// Groups from all matches are merged into a single dependency.
    Combination,
}
