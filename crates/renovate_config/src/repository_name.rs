//! Repository identifier validation.
//!
//! Provides a branded type for the `owner/name` identifiers listed under
//! `repositories`.

use crate::ValidationError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

#[cfg(test)]
#[path = "repository_name_tests.rs"]
mod tests;

/// A repository identifier of the form `owner/name`.
///
/// Identifiers must:
/// - Contain an owner and at least one further path segment, separated by `/`
/// - Have no empty segments (no leading, trailing or doubled slashes)
/// - Use only ASCII letters, digits, `.`, `_` and `-` in each segment
/// - Not use `.` or `..` as a segment
///
/// Nested groups (`group/subgroup/project`) are accepted because GitLab
/// style platforms address repositories that way.
///
/// Deserialization keeps the raw string; [`RepositoryName::try_new`] is
/// applied by the validator so the error can name the list position.
///
/// # Examples
///
/// ```
/// use renovate_config::RepositoryName;
///
/// let name = RepositoryName::try_new("gangsplit/api-gateway").unwrap();
/// assert_eq!(name.owner(), "gangsplit");
/// assert_eq!(name.name(), "api-gateway");
///
/// assert!(RepositoryName::try_new("api-gateway").is_err());
/// assert!(RepositoryName::try_new("gangsplit/").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Create a new RepositoryName from a string.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::SchemaError` for the `repositories` field if
    /// the identifier is empty or not shaped like `owner/name`.
    pub fn try_new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        Self::check(&name).map_err(|reason| ValidationError::schema("repositories", reason))?;
        Ok(Self(name))
    }

    /// Returns the reason the identifier is malformed, if it is.
    pub(crate) fn check(name: &str) -> Result<(), String> {
        if name.is_empty() {
            return Err("Repository identifier cannot be empty".to_string());
        }

        let segments: Vec<&str> = name.split('/').collect();
        if segments.len() < 2 {
            return Err(format!(
                "Repository identifier '{}' must have the form 'owner/name'",
                name
            ));
        }

        for segment in &segments {
            if segment.is_empty() {
                return Err(format!(
                    "Repository identifier '{}' contains an empty path segment",
                    name
                ));
            }

            if *segment == "." || *segment == ".." {
                return Err(format!(
                    "Repository identifier '{}' cannot contain '{}' as a path segment",
                    name, segment
                ));
            }

            if !segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            {
                return Err(format!(
                    "Repository identifier '{}' contains invalid characters (only letters, digits, '.', '_' and '-' allowed)",
                    name
                ));
            }
        }

        Ok(())
    }

    /// Owner (user, workspace or top-level group) part of the identifier.
    pub fn owner(&self) -> &str {
        self.0.split('/').next().unwrap_or_default()
    }

    /// Repository part of the identifier, including any subgroups.
    pub fn name(&self) -> &str {
        self.0
            .split_once('/')
            .map(|(_, name)| name)
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RepositoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for RepositoryName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Borrow<str> for RepositoryName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<RepositoryName> for String {
    fn from(name: RepositoryName) -> String {
        name.0
    }
}
