use super::*;
use renovate_config::{ConfigurationError, ValidationError};
use std::fs;
use tempfile::TempDir;

const FIXTURE: &str = include_str!("../../../renovate_config/fixtures/renovate.json");

#[test]
fn test_render_reproduces_the_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("renovate.json");
    fs::write(&path, FIXTURE).unwrap();

    let rendered = render_document(&path, false).expect("fixture should render");

    let original: serde_json::Value = serde_json::from_str(FIXTURE).unwrap();
    let shown: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(shown, original);
}

#[test]
fn test_render_converts_toml_to_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("renovate.toml");
    fs::write(
        &path,
        "platform = \"github\"\nrepositories = [\"a/b\"]\ndryRun = true\n",
    )
    .unwrap();

    let shown: serde_json::Value =
        serde_json::from_str(&render_document(&path, false).unwrap()).unwrap();
    assert_eq!(
        shown,
        serde_json::json!({ "platform": "github", "repositories": ["a/b"], "dryRun": true })
    );
}

#[test]
fn test_render_refuses_invalid_documents() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("renovate.json");
    fs::write(&path, r#"{ "platform": "github", "repositories": [] }"#).unwrap();

    let result = render_document(&path, false);
    assert!(matches!(
        result,
        Err(Error::Document(ConfigurationError::ValidationFailed(
            ValidationError::SchemaError { .. }
        )))
    ));
}
