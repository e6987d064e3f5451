//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

#[test]
fn default_config_path_names_flashlight_config_toml() {
    if let Some(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(
            path_str.contains("flashlight") && path_str.ends_with("config.toml"),
            "Path should contain 'flashlight' and end with 'config.toml', got: {}",
            path_str
        );
    }
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("flashlight_test_config.toml");

    let toml_content = r#"
margin = 6.0
row_aspect_ratio_threshold = 4.5
section_rows = 3
"#;

    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.margin, Some(6.0));
    assert_eq!(config.row_aspect_ratio_threshold, Some(4.5));
    assert_eq!(config.section_rows, Some(3));
    assert_eq!(config.log_file_path, None);

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("flashlight_test_invalid.toml");
    fs::write(&config_path, "margin = [not toml").expect("Failed to write test config");

    let result = load_config_file(&config_path);
    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Invalid TOML should return ParseError, got {:?}",
        result
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_rejects_unknown_fields() {
    let config_path = env::temp_dir().join("flashlight_test_unknown.toml");
    fs::write(&config_path, "gutter = 4.0\n").expect("Failed to write test config");

    let result = load_config_file(&config_path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));

    fs::remove_file(config_path).ok();
}

#[test]
fn merge_config_none_returns_defaults() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_partial_file_keeps_other_defaults() {
    let file = ConfigFile {
        row_aspect_ratio_threshold: Some(7.0),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(file));
    assert_eq!(resolved.row_aspect_ratio_threshold, 7.0);
    assert_eq!(resolved.margin, 3.0);
    assert_eq!(resolved.section_rows, 5);
}

#[test]
fn grid_options_reflect_resolved_values() {
    let resolved = ResolvedConfig {
        margin: 1.0,
        row_aspect_ratio_threshold: 2.0,
        section_rows: 9,
        ..ResolvedConfig::default()
    };

    let options = resolved.grid_options();
    assert_eq!(options.margin, 1.0);
    assert_eq!(options.row_aspect_ratio_threshold, 2.0);
    assert_eq!(options.section_rows, 9);
}

#[test]
#[serial(flashlight_env)]
fn env_overrides_margin_and_threshold() {
    env::set_var("FLASHLIGHT_MARGIN", "10");
    env::set_var("FLASHLIGHT_ROW_ASPECT_RATIO_THRESHOLD", "3.5");

    let config = apply_env_overrides(ResolvedConfig::default());

    env::remove_var("FLASHLIGHT_MARGIN");
    env::remove_var("FLASHLIGHT_ROW_ASPECT_RATIO_THRESHOLD");

    assert_eq!(config.margin, 10.0);
    assert_eq!(config.row_aspect_ratio_threshold, 3.5);
}

#[test]
#[serial(flashlight_env)]
fn env_override_ignores_unparseable_value() {
    env::set_var("FLASHLIGHT_MARGIN", "wide");

    let config = apply_env_overrides(ResolvedConfig::default());

    env::remove_var("FLASHLIGHT_MARGIN");

    assert_eq!(config.margin, 3.0);
}

#[test]
#[serial(flashlight_env)]
fn explicit_path_takes_precedence_over_env_var() {
    let temp_dir = env::temp_dir();
    let explicit_path = temp_dir.join("flashlight_explicit.toml");
    let env_path = temp_dir.join("flashlight_env.toml");

    fs::write(&explicit_path, "margin = 1.0\n").expect("write explicit");
    fs::write(&env_path, "margin = 2.0\n").expect("write env");
    env::set_var("FLASHLIGHT_CONFIG", &env_path);

    let config = load_config_with_precedence(Some(explicit_path.clone()))
        .expect("load")
        .expect("some config");

    env::remove_var("FLASHLIGHT_CONFIG");
    fs::remove_file(explicit_path).ok();
    fs::remove_file(env_path).ok();

    assert_eq!(config.margin, Some(1.0));
}

#[test]
#[serial(flashlight_env)]
fn env_var_path_used_without_explicit_path() {
    let env_path = env::temp_dir().join("flashlight_env_only.toml");
    fs::write(&env_path, "section_rows = 2\n").expect("write env");
    env::set_var("FLASHLIGHT_CONFIG", &env_path);

    let config = load_config_with_precedence(None)
        .expect("load")
        .expect("some config");

    env::remove_var("FLASHLIGHT_CONFIG");
    fs::remove_file(env_path).ok();

    assert_eq!(config.section_rows, Some(2));
}

#[test]
fn cli_overrides_win_over_everything() {
    let base = ResolvedConfig {
        margin: 5.0,
        ..ResolvedConfig::default()
    };

    let config = apply_cli_overrides(base, Some(0.0), Some(6.0), Some(1));
    assert_eq!(config.margin, 0.0);
    assert_eq!(config.row_aspect_ratio_threshold, 6.0);
    assert_eq!(config.section_rows, 1);
}

#[test]
fn cli_overrides_absent_keep_values() {
    let base = ResolvedConfig::default();
    let config = apply_cli_overrides(base.clone(), None, None, None);
    assert_eq!(config, base);
}

#[test]
fn merge_config_drops_invalid_margin_and_threshold() {
    let file = ConfigFile {
        margin: Some(-2.0),
        row_aspect_ratio_threshold: Some(0.0),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(file));
    assert_eq!(resolved.margin, 3.0);
    assert_eq!(resolved.row_aspect_ratio_threshold, 5.0);
}

#[test]
#[serial(flashlight_env)]
fn env_override_ignores_invalid_threshold() {
    env::set_var("FLASHLIGHT_ROW_ASPECT_RATIO_THRESHOLD", "NaN");
    env::set_var("FLASHLIGHT_MARGIN", "-1");

    let config = apply_env_overrides(ResolvedConfig::default());

    env::remove_var("FLASHLIGHT_ROW_ASPECT_RATIO_THRESHOLD");
    env::remove_var("FLASHLIGHT_MARGIN");

    assert_eq!(config.row_aspect_ratio_threshold, 5.0);
    assert_eq!(config.margin, 3.0);
}

#[test]
fn cli_overrides_ignore_invalid_values() {
    let base = ResolvedConfig {
        margin: 5.0,
        row_aspect_ratio_threshold: 4.0,
        ..ResolvedConfig::default()
    };

    let config = apply_cli_overrides(base, Some(f64::INFINITY), Some(-3.0), None);
    assert_eq!(config.margin, 5.0);
    assert_eq!(config.row_aspect_ratio_threshold, 4.0);
}
