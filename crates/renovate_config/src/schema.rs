//! JSON Schema-based structural validation.
//!
//! The schema is generated from the Rust types with `schemars`, so it always
//! agrees with what deserialization accepts: required fields, unknown
//! fields, value types and enum spellings. Documents are checked with
//! `jsonschema` before deserialization so that every structural problem is
//! reported with the path of the offending field.
//!
//! An explicit `null` is never accepted in place of an absent field: the
//! generated schema allows `null` for optional fields, so those members are
//! reported separately.
//!
//! # Examples
//!
//! ```rust
//! use renovate_config::schema::SchemaValidator;
//! use serde_json::json;
//!
//! let validator = SchemaValidator::new().unwrap();
//! let errors = validator.validate(&json!({ "platform": "myspace", "repositories": ["a/b"] }));
//!
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors[0].field_path(), "platform");
//! ```

use crate::config::UpdateAutomationConfig;
use crate::errors::{ConfigurationError, ConfigurationResult, ValidationError};
use jsonschema::error::ValidationErrorKind as SchemaErrorKind;
use schemars::schema_for;
use serde_json::Value;
use tracing::debug;

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

/// Path used for errors that concern the whole document.
pub const ROOT_FIELD_PATH: &str = "(root)";

/// Structural validator for update automation documents.
pub struct SchemaValidator {
    schema: Value,
    validator: jsonschema::Validator,
}

impl SchemaValidator {
    /// Generates and compiles the document schema.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::SchemaGeneration` if the generated schema
    /// cannot be serialized or compiled.
    pub fn new() -> ConfigurationResult<Self> {
        let schema = Self::generate_schema()?;
        let validator =
            jsonschema::validator_for(&schema).map_err(|e| ConfigurationError::SchemaGeneration {
                reason: format!("Failed to compile schema: {}", e),
            })?;

        Ok(Self { schema, validator })
    }

    /// Generates the JSON Schema of [`UpdateAutomationConfig`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::SchemaGeneration` if schema serialization
    /// fails.
    pub fn generate_schema() -> ConfigurationResult<Value> {
        let schema = schema_for!(UpdateAutomationConfig);
        serde_json::to_value(&schema).map_err(|e| ConfigurationError::SchemaGeneration {
            reason: format!("Failed to serialize schema: {}", e),
        })
    }

    /// The generated schema.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Checks `document` against the schema and returns every violation as
    /// a `ValidationError::SchemaError`.
    pub fn validate(&self, document: &Value) -> Vec<ValidationError> {
        let mut errors: Vec<ValidationError> = self
            .validator
            .iter_errors(document)
            .map(|error| {
                let base = pointer_to_field_path(&error.instance_path.to_string());
                let field_path = match &error.kind {
                    SchemaErrorKind::Required { property } => match property.as_str() {
                        Some(name) => join_field_path(&base, name),
                        None => base,
                    },
                    SchemaErrorKind::AdditionalProperties { unexpected } if unexpected.len() == 1 => {
                        join_field_path(&base, &unexpected[0])
                    }
                    _ => base,
                };

                ValidationError::SchemaError {
                    field_path,
                    reason: error.to_string(),
                }
            })
            .collect();

        let mut null_members = Vec::new();
        collect_null_members(document, "", &mut null_members);
        for pointer in null_members {
            let field_path = pointer_to_field_path(&pointer);
            if errors.iter().any(|e| e.field_path() == field_path) {
                continue;
            }
            errors.push(ValidationError::SchemaError {
                reason: format!(
                    "'{}' is null; omit the field instead of setting it to null",
                    field_path
                ),
                field_path,
            });
        }

        debug!(
            message = "Schema validation finished",
            error_count = errors.len()
        );
        errors
    }
}

/// Converts a JSON pointer (`/packageRules/1/enabled`) into the field path
/// notation used in error reports (`packageRules[1].enabled`).
pub fn pointer_to_field_path(pointer: &str) -> String {
    let mut path = String::new();
    for segment in pointer.split('/').skip(1) {
        let segment = segment.replace("~1", "/").replace("~0", "~");
        if !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()) {
            path.push_str(&format!("[{}]", segment));
        } else {
            if !path.is_empty() {
                path.push('.');
            }
            path.push_str(&segment);
        }
    }

    if path.is_empty() {
        ROOT_FIELD_PATH.to_string()
    } else {
        path
    }
}

/// Collects the JSON pointers of every object member whose value is `null`.
fn collect_null_members(value: &Value, pointer: &str, found: &mut Vec<String>) {
    match value {
        Value::Object(members) => {
            for (key, member) in members {
                let member_pointer =
                    format!("{}/{}", pointer, key.replace('~', "~0").replace('/', "~1"));
                if member.is_null() {
                    found.push(member_pointer);
                } else {
                    collect_null_members(member, &member_pointer, found);
                }
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                collect_null_members(item, &format!("{}/{}", pointer, index), found);
            }
        }
        _ => {}
    }
}

fn join_field_path(base: &str, field: &str) -> String {
    if base == ROOT_FIELD_PATH {
        field.to_string()
    } else {
        format!("{}.{}", base, field)
    }
}
