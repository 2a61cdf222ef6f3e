//! Tests for the extraction preview.

use super::*;
use crate::validate;
use serde_json::{json, Value};

const FIXTURE: &str = include_str!("../fixtures/renovate.json");

fn fixture_extractor() -> RegexExtractor {
    let document: Value = serde_json::from_str(FIXTURE).unwrap();
    let config = validate(&document).expect("fixture should validate");
    RegexExtractor::new(&config).expect("fixture managers should compile")
}

fn extractor_for(manager: Value) -> RegexExtractor {
    let config: UpdateAutomationConfig = serde_json::from_value(json!({
        "platform": "github",
        "repositories": ["a/b"],
        "regexManagers": [manager]
    }))
    .unwrap();
    RegexExtractor::new(&config).unwrap()
}

#[test]
fn file_match_selects_managers() {
    let extractor = fixture_extractor();

    assert_eq!(extractor.manager_count(), 2);
    assert!(extractor.matches_file(0, "Dockerfile"));
    assert!(extractor.matches_file(0, "images/builder/Dockerfile"));
    assert!(!extractor.matches_file(0, "Dockerfile.bak"));
    assert!(extractor.matches_file(1, "infra/ecs/main.tf"));
    assert!(!extractor.matches_file(1, "main.tfvars"));
    assert!(!extractor.matches_file(7, "Dockerfile"));
}

#[test]
fn dockerfile_annotation_uses_versioning_fallback() {
    let content = "FROM alpine:3.18\n# renovate: datasource=github-releases depName=hashicorp/terraform\nENV TERRAFORM_VERSION=1.5.7\n";
    let deps = fixture_extractor().extract("Dockerfile", content).unwrap();

    assert_eq!(deps.len(), 1);
    let dep = &deps[0];
    assert_eq!(dep.manager_index, 0);
    assert_eq!(dep.dep_name.as_deref(), Some("hashicorp/terraform"));
    assert_eq!(dep.datasource.as_deref(), Some("github-releases"));
    assert_eq!(dep.current_value.as_deref(), Some("1.5.7"));
    assert_eq!(dep.versioning.as_deref(), Some("semver"));
    assert_eq!(dep.skip_reason, None);
}

#[test]
fn dockerfile_annotation_with_explicit_versioning() {
    let content = "# renovate: datasource=docker depName=node versioning=docker\nARG NODE_VERSION=18.17.1\n";
    let deps = fixture_extractor().extract("Dockerfile", content).unwrap();

    assert_eq!(deps.len(), 1);
    assert_eq!(deps[0].dep_name.as_deref(), Some("node"));
    assert_eq!(deps[0].versioning.as_deref(), Some("docker"));
    assert_eq!(deps[0].current_value.as_deref(), Some("18.17.1"));
}

#[test]
fn terraform_images_use_the_datasource_template() {
    let content = "resource \"x\" {\n  container_image = \"nginx:1.25.3\"\n  container_image = \"redis:7.2\"\n}\n";
    let deps = fixture_extractor().extract("ecs/main.tf", content).unwrap();

    let names: Vec<_> = deps.iter().map(|d| d.dep_name.as_deref()).collect();
    assert_eq!(names, vec![Some("nginx"), Some("redis")]);
    assert!(deps.iter().all(|d| d.datasource.as_deref() == Some("docker")));
    assert_eq!(deps[1].current_value.as_deref(), Some("7.2"));
}

#[test]
fn unselected_file_yields_nothing() {
    let content = "container_image = \"nginx:1.25.3\"\n";
    let deps = fixture_extractor().extract("README.md", content).unwrap();
    assert!(deps.is_empty());
}

#[test]
fn missing_datasource_is_reported_as_skipped() {
    let extractor = extractor_for(json!({
        "fileMatch": ["versions\\.txt$"],
        "matchStrings": ["(?<depName>\\w+)==(?<currentValue>\\S+)"]
    }));

    let deps = extractor.extract("versions.txt", "requests==2.31.0\n").unwrap();
    assert_eq!(deps.len(), 1);
    assert_eq!(deps[0].skip_reason, Some(SkipReason::MissingDatasource));
}

#[test]
fn digest_satisfies_current_value() {
    let extractor = extractor_for(json!({
        "fileMatch": ["\\.yaml$"],
        "matchStrings": ["image: (?<depName>[^@\\s]+)@(?<currentDigest>sha256:[a-f0-9]+)"],
        "datasourceTemplate": "docker"
    }));

    let deps = extractor
        .extract("deploy.yaml", "image: nginx@sha256:abc123\n")
        .unwrap();
    assert_eq!(deps[0].current_value, None);
    assert_eq!(deps[0].current_digest.as_deref(), Some("sha256:abc123"));
    assert_eq!(deps[0].skip_reason, None);
}

#[test]
fn combination_merges_all_matches() {
    let extractor = extractor_for(json!({
        "fileMatch": ["\\.env$"],
        "matchStrings": ["IMAGE=(?<depName>\\S+)", "TAG=(?<currentValue>\\S+)"],
        "matchStringsStrategy": "combination",
        "datasourceTemplate": "docker"
    }));

    let deps = extractor
        .extract("app.env", "IMAGE=postgres\nOTHER=1\nTAG=15.4\n")
        .unwrap();
    assert_eq!(deps.len(), 1);
    assert_eq!(deps[0].dep_name.as_deref(), Some("postgres"));
    assert_eq!(deps[0].current_value.as_deref(), Some("15.4"));
}

#[test]
fn combination_without_matches_yields_nothing() {
    let extractor = extractor_for(json!({
        "fileMatch": ["\\.env$"],
        "matchStrings": ["IMAGE=(?<depName>\\S+)"],
        "matchStringsStrategy": "combination"
    }));

    assert!(extractor.extract("app.env", "NOTHING=here\n").unwrap().is_empty());
}

#[test]
fn recursive_narrows_and_inherits_groups() {
    let extractor = extractor_for(json!({
        "fileMatch": ["deps\\.txt$"],
        "matchStrings": [
            "(?<datasource>npm) deps \\{[^}]*\\}",
            "(?<depName>\\w+)=(?<currentValue>\\d+)"
        ],
        "matchStringsStrategy": "recursive"
    }));

    let content = "outside=9\nnpm deps {left=1 right=2}\n";
    let deps = extractor.extract("deps.txt", content).unwrap();

    let pairs: Vec<_> = deps
        .iter()
        .map(|d| (d.dep_name.as_deref(), d.current_value.as_deref()))
        .collect();
    assert_eq!(pairs, vec![(Some("left"), Some("1")), (Some("right"), Some("2"))]);
    assert!(deps.iter().all(|d| d.datasource.as_deref() == Some("npm")));
}

#[test]
fn templates_override_capture_groups() {
    let extractor = extractor_for(json!({
        "fileMatch": ["\\.txt$"],
        "matchStrings": ["(?<depName>\\S+) (?<currentValue>\\S+)"],
        "depNameTemplate": "{{lowercase depName}}",
        "datasourceTemplate": "pypi"
    }));

    let deps = extractor.extract("req.txt", "Django 4.2.7\n").unwrap();
    assert_eq!(deps[0].dep_name.as_deref(), Some("django"));
}

#[test]
fn render_failure_is_an_extraction_error() {
    let extractor = extractor_for(json!({
        "fileMatch": ["\\.txt$"],
        "matchStrings": ["(?<depName>\\S+) (?<currentValue>\\S+)"],
        "depNameTemplate": "{{lowercase}}"
    }));

    let error = extractor.extract("req.txt", "Django 4.2.7\n").unwrap_err();
    let ExtractionError::TemplateRender { field, file, .. } = error;
    assert_eq!(field, "depNameTemplate");
    assert_eq!(file, "req.txt");
}

#[test]
fn invalid_pattern_fails_to_compile() {
    let config: UpdateAutomationConfig = serde_json::from_value(json!({
        "platform": "github",
        "repositories": ["a/b"],
        "regexManagers": [{ "fileMatch": ["("], "matchStrings": ["x"] }]
    }))
    .unwrap();

    match RegexExtractor::new(&config) {
        Err(ValidationError::RegexCompileError { field_path, .. }) => {
            assert_eq!(field_path, "regexManagers[0].fileMatch[0]");
        }
        Err(other) => panic!("expected RegexCompileError, got {:?}", other),
        Ok(_) => panic!("expected RegexCompileError"),
    }
}

#[test]
fn serialized_dependency_omits_absent_fields() {
    let dep = ExtractedDependency {
        file: "Dockerfile".to_string(),
        dep_name: Some("node".to_string()),
        skip_reason: Some(SkipReason::MissingCurrentValue),
        ..Default::default()
    };

    assert_eq!(
        serde_json::to_value(&dep).unwrap(),
        json!({
            "file": "Dockerfile",
            "managerIndex": 0,
            "depName": "node",
            "skipReason": "missing-current-value"
        })
    );
}
