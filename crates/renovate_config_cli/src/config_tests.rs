use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_config_default() {
    let config = CliConfig::default();

    assert_eq!(config.document, "renovate.json");
    assert!(!config.require_env_secrets);
    assert!(!config.warnings_as_errors);
}

#[test]
fn test_cli_config_load_nonexistent_file() {
    let nonexistent_path = PathBuf::from("nonexistent_settings.toml");
    let result = CliConfig::load(&nonexistent_path);

    if let Err(Error::Config(msg)) = result {
        assert!(msg.contains("Settings file not found"));
    } else {
        panic!("Expected Config error");
    }
}

#[test]
fn test_cli_config_load_or_default_without_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config = CliConfig::load_or_default(&temp_dir.path().join(DEFAULT_CONFIG_FILENAME))
        .expect("defaults expected");

    assert_eq!(config, CliConfig::default());
}

#[test]
fn test_cli_config_load_invalid_toml() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("invalid.toml");
    fs::write(&config_path, "invalid = toml = syntax").expect("Failed to write invalid TOML");

    let result = CliConfig::load(&config_path);
    assert!(matches!(result, Err(Error::ParseTomlFile(_))));
}

#[test]
fn test_cli_config_rejects_unknown_keys() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("settings.toml");
    fs::write(&config_path, "colour = true\n").expect("Failed to write settings");

    assert!(CliConfig::load(&config_path).is_err());
}

#[test]
fn test_cli_config_partial_file_uses_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("settings.toml");
    fs::write(&config_path, "warnings_as_errors = true\n").expect("Failed to write settings");

    let config = CliConfig::load(&config_path).expect("Failed to load settings");
    assert_eq!(config.document, DEFAULT_DOCUMENT);
    assert!(config.warnings_as_errors);
}

#[test]
fn test_cli_config_save_and_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("settings.toml");

    let original = CliConfig {
        document: "config/renovate.toml".to_string(),
        require_env_secrets: true,
        warnings_as_errors: false,
    };
    original.save(&config_path).expect("Failed to save settings");

    let loaded = CliConfig::load(&config_path).expect("Failed to load settings");
    assert_eq!(loaded, original);
}

#[test]
fn test_get_and_set_values() {
    let mut config = CliConfig::default();

    config.set_value("document", "other.json").unwrap();
    config.set_value("require_env_secrets", "true").unwrap();

    assert_eq!(config.get_value("document").unwrap(), "other.json");
    assert_eq!(config.get_value("require_env_secrets").unwrap(), "true");
    assert_eq!(config.get_value("warnings_as_errors").unwrap(), "false");
}

#[test]
fn test_set_value_rejects_bad_input() {
    let mut config = CliConfig::default();

    assert!(matches!(
        config.set_value("require_env_secrets", "yes"),
        Err(Error::InvalidArguments(_))
    ));
    assert!(matches!(
        config.set_value("document", " "),
        Err(Error::InvalidArguments(_))
    ));
    assert!(matches!(
        config.get_value("colour"),
        Err(Error::InvalidArguments(_))
    ));
    assert_eq!(config, CliConfig::default());
}

#[test]
fn test_get_config_path() {
    assert_eq!(
        get_config_path(Some("custom.toml")),
        PathBuf::from("custom.toml")
    );
    assert!(get_config_path(None).ends_with(DEFAULT_CONFIG_FILENAME));
}
