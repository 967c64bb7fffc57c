//! Integration tests for configuration management

use ccrm::config::{Config, ConfigOverrides, CONFIG_KEYS};
use ccrm::EnrollmentPolicy;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("nested").join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.paths.data_dir.is_empty(),
        "Default data_dir should not be empty"
    );
    assert!(
        !config.paths.backups_dir.is_empty(),
        "Default backups_dir should not be empty"
    );
    assert_eq!(config.enrollment.max_credits_per_semester, 18);
    assert!(config.enrollment.allow_grade_changes);
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[enrollment]
max_credits_per_semester = 24
allow_grade_changes = false

[paths]
data_dir = "./data"
backups_dir = "./backups"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.enrollment.max_credits_per_semester, 24);
    assert!(!config.enrollment.allow_grade_changes);
    assert_eq!(config.paths.data_dir, "./data");
    assert_eq!(config.paths.backups_dir, "./backups");
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"

[paths]
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.enrollment_policy(), EnrollmentPolicy::default());
    assert_eq!(config.paths.data_dir, "");
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$CCRM/test.log"

[paths]
data_dir = "$CCRM/data"
backups_dir = "/absolute/backups"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("ccrm"));
    assert!(!config.logging.file.contains("$CCRM"));
    assert!(config.paths.data_dir.ends_with("data"));
    assert!(!config.paths.data_dir.contains("$CCRM"));
    assert_eq!(config.paths.backups_dir, "/absolute/backups");
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "DEBUG").expect("Failed to set level");
    assert_eq!(config.get("level").as_deref(), Some("debug"));

    config.set("verbose", "true").expect("Failed to set verbose");
    assert_eq!(config.get("verbose").as_deref(), Some("true"));
    assert!(config.logging.verbose);

    config.set("max_credits", "21").expect("Failed to set max_credits");
    assert_eq!(config.get("max_credits_per_semester").as_deref(), Some("21"));
    assert_eq!(config.enrollment_policy().max_credits_per_semester, 21);

    config
        .set("allow_grade_changes", "false")
        .expect("Failed to set allow_grade_changes");
    assert!(!config.enrollment_policy().allow_grade_changes);

    config.set("data-dir", "/srv/data").expect("Failed to set data_dir");
    assert_eq!(config.data_dir(), PathBuf::from("/srv/data"));

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_set_rejects_bad_values() {
    let mut config = Config::from_defaults();

    assert!(config.set("level", "loud").is_err());
    assert!(config.set("verbose", "maybe").is_err());
    assert!(config.set("max_credits", "0").is_err());
    assert!(config.set("max_credits", "-3").is_err());
    assert!(config.set("allow_grade_changes", "sometimes").is_err());
    assert_eq!(config, Config::from_defaults());
}

#[test]
fn test_every_documented_key_is_readable() {
    let config = Config::from_defaults();
    for key in CONFIG_KEYS {
        assert!(config.get(key).is_some(), "key {key} should be readable");
    }
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("level", "error").expect("Failed to set level");
    config.set("max_credits", "30").expect("Failed to set max_credits");

    config.unset("level", &defaults).expect("Failed to unset level");
    config
        .unset("max_credits", &defaults)
        .expect("Failed to unset max_credits");
    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(
        config.enrollment.max_credits_per_semester,
        defaults.enrollment.max_credits_per_semester
    );
    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config.set("max_credits", "20").expect("Failed to set max_credits");
    config.save_to(&config_file).expect("Failed to save config");

    let loaded = Config::load_from(&config_file);
    assert_eq!(loaded.logging.level, "info");
    assert_eq!(loaded.enrollment.max_credits_per_semester, 20);
}

#[test]
fn test_load_from_missing_file_writes_defaults() {
    let (_temp_dir, config_file) = setup_temp_config();

    let loaded = Config::load_from(&config_file);

    assert_eq!(loaded, Config::from_defaults());
    assert!(config_file.exists());
}

#[test]
fn test_load_from_fills_new_fields() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::create_dir_all(config_file.parent().expect("parent")).expect("Failed to create dir");
    fs::write(&config_file, "[logging]\nlevel = \"error\"\n").expect("Failed to write config");

    let loaded = Config::load_from(&config_file);
    let defaults = Config::from_defaults();

    assert_eq!(loaded.logging.level, "error");
    assert_eq!(loaded.paths.data_dir, defaults.paths.data_dir);
    let rewritten = fs::read_to_string(&config_file).expect("Failed to read config");
    assert!(rewritten.contains("data_dir"));
}

#[test]
fn test_load_from_unparsable_file_uses_defaults() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::create_dir_all(config_file.parent().expect("parent")).expect("Failed to create dir");
    fs::write(&config_file, "this is = = not toml").expect("Failed to write config");

    assert_eq!(Config::load_from(&config_file), Config::from_defaults());
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        max_credits: Some(12),
        data_dir: Some("./custom_data".to_string()),
        backups_dir: Some("./custom_backups".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.enrollment_policy().max_credits_per_semester, 12);
    assert_eq!(config.paths.data_dir, "./custom_data");
    assert_eq!(config.paths.backups_dir, "./custom_backups");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths, defaults.paths);
    assert_eq!(config.enrollment, defaults.enrollment);
}

#[test]
fn test_config_display_format() {
    let config = Config::from_defaults();
    let display_str = format!("{config}");

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[enrollment]"));
    assert!(display_str.contains("[paths]"));

    assert!(display_str.contains("level"));
    assert!(display_str.contains("max_credits_per_semester = 18"));
    assert!(display_str.contains("data_dir"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false

[enrollment]
max_credits_per_semester = 0

[paths]
data_dir = ""
backups_dir = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    let changed = config.merge_defaults(&defaults);

    assert!(
        changed,
        "merge_defaults should return true when fields are added"
    );
    assert_eq!(config.enrollment.max_credits_per_semester, 18);
    assert_eq!(config.paths.backups_dir, defaults.paths.backups_dir);
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[enrollment]
max_credits_per_semester = 15

[paths]
data_dir = "/my/data"
backups_dir = "/my/backups"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    assert!(!config.merge_defaults(&defaults));

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.enrollment.max_credits_per_semester, 15);
    assert_eq!(config.paths.data_dir, "/my/data");
}

#[test]
fn test_get_ccrm_dir() {
    let dir = Config::get_ccrm_dir();

    assert!(dir.to_string_lossy().contains("ccrm"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
