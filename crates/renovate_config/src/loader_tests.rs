//! Tests for document loading.

use super::*;
use crate::errors::ValidationError;
use std::fs;
use tempfile::TempDir;

const FIXTURE: &str = include_str!("../fixtures/renovate.json");

fn validator() -> ConfigurationValidator {
    ConfigurationValidator::new().expect("validator should build")
}

#[test]
fn format_is_taken_from_the_extension() {
    assert_eq!(
        DocumentFormat::from_path(Path::new("renovate.json")).unwrap(),
        DocumentFormat::Json
    );
    assert_eq!(
        DocumentFormat::from_path(Path::new("conf/Renovate.TOML")).unwrap(),
        DocumentFormat::Toml
    );
    assert!(matches!(
        DocumentFormat::from_path(Path::new("renovate.yaml")),
        Err(ConfigurationError::UnsupportedFormat { .. })
    ));
    assert!(DocumentFormat::from_path(Path::new("renovate")).is_err());
}

#[test]
fn loads_json_fixture() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("renovate.json");
    fs::write(&path, FIXTURE).unwrap();

    let config = load_and_validate(&path, &validator()).unwrap();
    assert_eq!(config.repositories.len(), 13);
}

#[test]
fn loads_toml_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("renovate.toml");
    fs::write(
        &path,
        r#"
platform = "gitlab"
repositories = ["group/project"]
labels = ["dependencies"]

[[packageRules]]
matchPackageNames = ["postgres"]
enabled = false
"#,
    )
    .unwrap();

    let config = load_and_validate(&path, &validator()).unwrap();
    assert_eq!(config.repositories[0].as_str(), "group/project");
    assert_eq!(config.package_rules()[0].enabled, Some(false));
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let result = load_document(&dir.path().join("renovate.json"));

    assert!(matches!(result, Err(ConfigurationError::FileNotFound { .. })));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("renovate.json");
    fs::write(&path, "{ \"platform\": ").unwrap();

    match load_document(&path) {
        Err(ConfigurationError::ParseError { reason }) => {
            assert!(reason.contains("renovate.json"));
        }
        other => panic!("expected ParseError, got {:?}", other),
    }
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let result = parse_document("platform = ", DocumentFormat::Toml);
    assert!(matches!(result, Err(ConfigurationError::ParseError { .. })));
}

#[test]
fn invalid_document_reports_the_validation_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("renovate.json");
    fs::write(
        &path,
        r#"{ "platform": "github", "password": "hunter2", "repositories": ["a/b"] }"#,
    )
    .unwrap();

    match load_and_validate(&path, &validator()) {
        Err(ConfigurationError::ValidationFailed(ValidationError::SecretPolicyError {
            field_path,
            ..
        })) => assert_eq!(field_path, "password"),
        other => panic!("expected SecretPolicyError, got {:?}", other),
    }
}
