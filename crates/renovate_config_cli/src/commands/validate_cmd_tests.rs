//! Tests for the validate command.

use super::*;
use renovate_config::ConfigurationError;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const FIXTURE: &str = include_str!("../../../renovate_config/fixtures/renovate.json");

fn write_document(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write document");
    path
}

#[test]
fn test_fixture_is_valid_with_one_warning() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_document(&temp_dir, "renovate.json", FIXTURE);

    let report = check_document(&path, false).expect("document should load");

    assert!(report.is_valid());
    assert_eq!(report.warnings.len(), 1);
    assert!(outcome(&report, false).is_ok());
}

#[test]
fn test_warnings_as_errors_fails_the_fixture() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_document(&temp_dir, "renovate.json", FIXTURE);
    let report = check_document(&path, false).unwrap();

    match outcome(&report, true) {
        Err(Error::ValidationFailed { errors, warnings }) => {
            assert_eq!(errors, 0);
            assert_eq!(warnings, 1);
        }
        other => panic!("Expected ValidationFailed, got {:?}", other),
    }
}

#[test]
fn test_invalid_document_reports_errors() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_document(
        &temp_dir,
        "renovate.json",
        r#"{ "platform": "github", "token": "ghp_literal", "repositories": ["a/b", "a/b"] }"#,
    );

    let report = check_document(&path, false).unwrap();
    assert_eq!(report.errors.len(), 2);
    assert!(matches!(
        outcome(&report, false),
        Err(Error::ValidationFailed { errors: 2, .. })
    ));
}

#[test]
fn test_require_env_flags_unset_variables() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_document(
        &temp_dir,
        "renovate.json",
        r#"{
            "platform": "github",
            "token": "${RENOVATE_CONFIG_TEST_VARIABLE_THAT_IS_NEVER_SET}",
            "repositories": ["a/b"]
        }"#,
    );

    assert!(check_document(&path, false).unwrap().is_valid());

    let report = check_document(&path, true).unwrap();
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].field_path(), "token");
}

#[test]
fn test_missing_document_is_a_load_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = check_document(&temp_dir.path().join("renovate.json"), false);

    assert!(matches!(
        result,
        Err(Error::Document(ConfigurationError::FileNotFound { .. }))
    ));
}

#[test]
fn test_json_report_shape() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_document(
        &temp_dir,
        "renovate.json",
        r#"{ "platform": "myspace", "repositories": ["a/b"] }"#,
    );
    let report = check_document(&path, false).unwrap();
    let output = ReportOutput::from_report("renovate.json", &report);

    let json: serde_json::Value =
        serde_json::from_str(&format_report(&output, "json").unwrap()).unwrap();
    assert_eq!(json["document"], "renovate.json");
    assert_eq!(json["valid"], false);
    assert_eq!(json["errors"][0]["kind"], "SchemaError");
    assert_eq!(json["errors"][0]["fieldPath"], "platform");
    assert!(json["errors"][0].get("ruleIndex").is_none());
}

#[test]
fn test_text_report_lists_errors_and_warnings() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_document(&temp_dir, "renovate.json", FIXTURE);
    let report = check_document(&path, false).unwrap();
    let output = ReportOutput::from_report("renovate.json", &report);

    let text = format_report(&output, "text").unwrap();
    assert!(text.contains("Configuration is VALID"));
    assert!(text.contains("onboardingConfig"));
}

#[test]
fn test_unknown_format_is_rejected() {
    let args = ValidateArgs {
        document: Some("renovate.json".to_string()),
        require_env: false,
        format: "yaml".to_string(),
    };

    let result = execute(&args, &CliConfig::default());
    assert!(matches!(result, Err(Error::InvalidArguments(_))));
}

#[test]
fn test_execute_uses_settings_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_document(&temp_dir, "custom.json", FIXTURE);
    let settings = CliConfig {
        document: path.display().to_string(),
        ..CliConfig::default()
    };
    let args = ValidateArgs {
        document: None,
        require_env: false,
        format: "text".to_string(),
    };

    assert!(execute(&args, &settings).is_ok());
}
