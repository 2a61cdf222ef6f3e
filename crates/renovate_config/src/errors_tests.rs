//! Tests for configuration error types.

use super::*;

#[test]
fn validation_error_accessors_for_regex_compile_error() {
    let error = ValidationError::RegexCompileError {
        field_path: "regexManagers[2].matchStrings[0]".to_string(),
        rule_index: 2,
        pattern: "(?<depName".to_string(),
        reason: "unclosed group".to_string(),
    };

    assert_eq!(error.field_path(), "regexManagers[2].matchStrings[0]");
    assert_eq!(error.rule_index(), Some(2));
    assert_eq!(error.kind(), ValidationErrorKind::RegexCompile);
}

#[test]
fn validation_error_schema_has_no_rule_index() {
    let error = ValidationError::schema("platform", "unknown value");

    assert_eq!(error.rule_index(), None);
    assert_eq!(error.kind(), ValidationErrorKind::Schema);
    assert_eq!(
        error.to_string(),
        "Schema error at 'platform': unknown value"
    );
}

#[test]
fn template_reference_error_message_names_group_and_template() {
    let error = ValidationError::TemplateReferenceError {
        field_path: "regexManagers[0].versioningTemplate".to_string(),
        rule_index: 0,
        template: "{{versioning}}".to_string(),
        group: "versioning".to_string(),
    };

    let message = error.to_string();
    assert!(message.contains("'versioning'"));
    assert!(message.contains("{{versioning}}"));
    assert!(message.contains("rule 0"));
}

#[test]
fn validation_error_kind_display() {
    assert_eq!(ValidationErrorKind::Schema.to_string(), "SchemaError");
    assert_eq!(
        ValidationErrorKind::RegexCompile.to_string(),
        "RegexCompileError"
    );
    assert_eq!(
        ValidationErrorKind::TemplateReference.to_string(),
        "TemplateReferenceError"
    );
    assert_eq!(
        ValidationErrorKind::SecretPolicy.to_string(),
        "SecretPolicyError"
    );
}

#[test]
fn configuration_error_wraps_validation_error() {
    let inner = ValidationError::SecretPolicyError {
        field_path: "password".to_string(),
        reason: "literal credential".to_string(),
    };
    let error: ConfigurationError = inner.clone().into();

    match error {
        ConfigurationError::ValidationFailed(e) => assert_eq!(e, inner),
        _ => panic!("Expected ValidationFailed"),
    }
}

#[test]
fn configuration_error_file_not_found_message() {
    let error = ConfigurationError::FileNotFound {
        path: "renovate.json".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Configuration file not found: renovate.json"
    );
}
