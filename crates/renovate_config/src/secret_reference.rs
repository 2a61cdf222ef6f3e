//! Deferred credential references.
//!
//! Credential fields never hold the secret itself. They hold a `${NAME}`
//! placeholder that the update automation tool resolves from its
//! environment when it loads the document.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(test)]
#[path = "secret_reference_tests.rs"]
mod tests;

/// A credential field value.
///
/// Deserialization keeps the raw string so the validator can report a
/// literal credential as a policy violation with its field path; use
/// [`SecretReference::variable_name`] to check the placeholder shape.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SecretReference(String);

impl SecretReference {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Builds the placeholder for an environment variable.
    pub fn from_env_var(name: &str) -> Self {
        Self(format!("${{{}}}", name))
    }

    /// Name of the referenced environment variable, or `None` when the
    /// value is not a well-formed `${NAME}` placeholder.
    ///
    /// # Examples
    ///
    /// ```
    /// use renovate_config::SecretReference;
    ///
    /// let secret = SecretReference::new("${BITBUCKET_PASSWORD}");
    /// assert_eq!(secret.variable_name(), Some("BITBUCKET_PASSWORD"));
    ///
    /// assert_eq!(SecretReference::new("hunter2").variable_name(), None);
    /// ```
    pub fn variable_name(&self) -> Option<&str> {
        let name = self.0.strip_prefix("${")?.strip_suffix('}')?;
        let mut chars = name.chars();
        let first = chars.next()?;
        if !(first.is_ascii_alphabetic() || first == '_') {
            return None;
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return None;
        }
        Some(name)
    }

    pub fn is_placeholder(&self) -> bool {
        self.variable_name().is_some()
    }

    /// Resolves the placeholder with the given environment lookup.
    ///
    /// Returns `None` for literal values and for unset variables.
    pub fn resolve_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.variable_name().and_then(lookup)
    }

    /// Raw field value as written in the document.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Literal values may be real credentials, so they never reach log output.
impl fmt::Debug for SecretReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variable_name() {
            Some(name) => write!(f, "SecretReference(${{{}}})", name),
            None => write!(f, "SecretReference(<redacted>)"),
        }
    }
}
