use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_init_writes_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("renovate-config.toml");

    execute(&ConfigCommands::Init, &path).expect("init should succeed");

    let config = CliConfig::load(&path).unwrap();
    assert_eq!(config, CliConfig::default());
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("renovate-config.toml");
    fs::write(&path, "document = \"mine.json\"\n").unwrap();

    let result = execute(&ConfigCommands::Init, &path);

    assert!(matches!(result, Err(Error::Config(_))));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "document = \"mine.json\"\n"
    );
}

#[test]
fn test_set_creates_file_and_get_reads_it() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("renovate-config.toml");

    execute(
        &ConfigCommands::Set {
            key: "warnings_as_errors".to_string(),
            value: "true".to_string(),
        },
        &path,
    )
    .expect("set should succeed");

    assert_eq!(
        get_config(&path, Some("warnings_as_errors")).unwrap(),
        "warnings_as_errors: true"
    );
    assert_eq!(
        get_config(&path, Some("document")).unwrap(),
        "document: renovate.json"
    );
}

#[test]
fn test_get_without_file_shows_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("renovate-config.toml");

    let rendered = get_config(&path, None).unwrap();
    assert!(rendered.contains("document = \"renovate.json\""));
    assert!(!path.exists());
}

#[test]
fn test_set_rejects_unknown_key() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("renovate-config.toml");

    let result = execute(
        &ConfigCommands::Set {
            key: "colour".to_string(),
            value: "blue".to_string(),
        },
        &path,
    );

    assert!(matches!(result, Err(Error::InvalidArguments(_))));
    assert!(!path.exists());
}
