//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

/// RAII guard to ensure environment variable cleanup even under test parallelism.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(name);
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

// ===== Paths =====

#[test]
fn default_config_path_ends_with_app_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("country-picker") && path_str.ends_with("config.toml"),
        "got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_app_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("country-picker.log"),
        "got: {:?}",
        path
    );
}

// ===== Loading =====

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(result, Ok(None));
}

#[test]
fn load_config_file_parses_valid_toml() {
    let path = write_temp(
        "country_picker_test_config.toml",
        r#"
mode = "nationality"
label = "Nationality"
field_name = "nationality"
required = true
hint = "As shown on your passport"
debounce_ms = 250
trigger_style = "input"

[placement]
max_height = 12
"#,
    );

    let config = load_config_file(&path)
        .expect("Should parse valid TOML")
        .expect("File exists");

    assert_eq!(config.mode.as_deref(), Some("nationality"));
    assert_eq!(config.label.as_deref(), Some("Nationality"));
    assert_eq!(config.field_name.as_deref(), Some("nationality"));
    assert_eq!(config.required, Some(true));
    assert_eq!(config.debounce_ms, Some(250));
    assert_eq!(config.trigger_style, Some(TriggerStyle::Input));
    assert_eq!(
        config.placement,
        Some(PlacementSection {
            padding: None,
            min_height: None,
            max_height: Some(12),
        })
    );

    fs::remove_file(path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let path = write_temp("country_picker_test_invalid.toml", "this is not valid TOML ][}{");

    match load_config_file(&path) {
        Err(ConfigError::ParseError { path: p, .. }) => assert_eq!(p, path),
        other => panic!("Expected ParseError, got {:?}", other),
    }

    fs::remove_file(path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("theme = \"dark\"");
    assert!(result.is_err(), "Unknown keys should be rejected");
}

#[test]
fn config_file_rejects_unknown_trigger_style() {
    let result: Result<ConfigFile, _> = toml::from_str("trigger_style = \"dropdown\"");
    assert!(result.is_err());
}

// ===== Merging =====

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), Ok(ResolvedConfig::default()));
}

#[test]
fn resolved_config_default_has_expected_values() {
    let config = ResolvedConfig::default();
    assert_eq!(config.mode, SelectorMode::DialCode);
    assert_eq!(config.timing.debounce, Duration::from_millis(500));
    assert_eq!(config.timing.blur_grace, Duration::from_millis(200));
    assert_eq!(config.placement, PlacementLimits::TERMINAL);
    assert_eq!(config.trigger_style, TriggerStyle::Button);
    assert!(config.catalog_path.is_none());
}

#[test]
fn merge_config_overrides_with_config_file_values() {
    let file = ConfigFile {
        mode: Some("nationality".to_string()),
        placeholder: Some("Pick one".to_string()),
        catalog: Some(PathBuf::from("/data/countries.json")),
        blur_grace_ms: Some(50),
        placement: Some(PlacementSection {
            padding: Some(0),
            ..PlacementSection::default()
        }),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(file)).expect("valid config");

    assert_eq!(resolved.mode, SelectorMode::Nationality);
    assert_eq!(resolved.placeholder.as_deref(), Some("Pick one"));
    assert_eq!(
        resolved.catalog_path,
        Some(PathBuf::from("/data/countries.json"))
    );
    assert_eq!(resolved.timing.blur_grace, Duration::from_millis(50));
    assert_eq!(resolved.timing.debounce, Duration::from_millis(500));
    assert_eq!(resolved.placement.padding, 0);
    assert_eq!(resolved.placement.max_height, 20);
}

#[test]
fn merge_config_rejects_unknown_mode() {
    let file = ConfigFile {
        mode: Some("passport".to_string()),
        ..ConfigFile::default()
    };
    assert!(matches!(
        merge_config(Some(file)),
        Err(ConfigError::InvalidMode { .. })
    ));
}

#[test]
fn config_file_log_path_overrides_default() {
    let custom_path = PathBuf::from("/custom/path/to/app.log");
    let file = ConfigFile {
        log_file_path: Some(custom_path.clone()),
        ..ConfigFile::default()
    };
    let resolved = merge_config(Some(file)).expect("valid config");
    assert_eq!(resolved.log_file_path, custom_path);
}

#[test]
fn picker_options_carry_display_settings_without_value() {
    let config = ResolvedConfig {
        mode: SelectorMode::Nationality,
        label: Some("Nationality".to_string()),
        required: true,
        hint: Some("hint".to_string()),
        ..ResolvedConfig::default()
    };
    let options = config.picker_options();
    assert_eq!(options.mode, SelectorMode::Nationality);
    assert_eq!(options.label.as_deref(), Some("Nationality"));
    assert!(options.required);
    assert_eq!(options.hint_text.as_deref(), Some("hint"));
    assert_eq!(options.value, None);
    assert_eq!(options.default_value, None);
}

// ===== Environment =====

#[test]
#[serial(picker_mode)]
fn apply_env_overrides_respects_mode_variable() {
    let _guard = EnvGuard::new(MODE_ENV_VAR);
    env::set_var(MODE_ENV_VAR, "nationality");

    let result = apply_env_overrides(ResolvedConfig::default()).expect("valid mode");
    assert_eq!(result.mode, SelectorMode::Nationality);
}

#[test]
#[serial(picker_mode)]
fn apply_env_overrides_rejects_unknown_mode() {
    let _guard = EnvGuard::new(MODE_ENV_VAR);
    env::set_var(MODE_ENV_VAR, "visa");

    match apply_env_overrides(ResolvedConfig::default()) {
        Err(ConfigError::InvalidMode { origin, .. }) => assert_eq!(origin, MODE_ENV_VAR),
        other => panic!("Expected InvalidMode, got {:?}", other),
    }
}

#[test]
#[serial(picker_mode)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    let _guard = EnvGuard::new(MODE_ENV_VAR);
    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), Ok(base));
}

#[test]
#[serial(picker_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);
    let explicit = write_temp("country_picker_explicit.toml", "label = \"explicit\"");
    let from_env = write_temp("country_picker_env.toml", "label = \"env\"");
    env::set_var(CONFIG_ENV_VAR, &from_env);

    let config = load_config_with_precedence(Some(explicit.clone()))
        .expect("valid")
        .expect("exists");
    assert_eq!(config.label.as_deref(), Some("explicit"));

    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();
}

#[test]
#[serial(picker_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);
    let from_env = write_temp("country_picker_env_only.toml", "label = \"env\"");
    env::set_var(CONFIG_ENV_VAR, &from_env);

    let config = load_config_with_precedence(None)
        .expect("valid")
        .expect("exists");
    assert_eq!(config.label.as_deref(), Some("env"));

    fs::remove_file(from_env).ok();
}

#[test]
#[serial(picker_config)]
fn load_config_with_precedence_rejects_empty_env_var() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);
    env::set_var(CONFIG_ENV_VAR, "");
    assert!(matches!(
        load_config_with_precedence(None),
        Err(ConfigError::InvalidPath(_))
    ));
}

// ===== CLI =====

#[test]
fn apply_cli_overrides_no_overrides() {
    let base = ResolvedConfig::default();
    assert_eq!(apply_cli_overrides(base.clone(), CliOverrides::default()), base);
}

#[test]
#[serial(picker_mode)]
fn precedence_chain_file_then_env_then_cli() {
    let _guard = EnvGuard::new(MODE_ENV_VAR);
    let file = ConfigFile {
        mode: Some("nationality".to_string()),
        label: Some("from file".to_string()),
        ..ConfigFile::default()
    };
    env::set_var(MODE_ENV_VAR, "dial-code");

    let merged = merge_config(Some(file)).expect("valid");
    assert_eq!(merged.mode, SelectorMode::Nationality);

    let with_env = apply_env_overrides(merged).expect("valid");
    assert_eq!(with_env.mode, SelectorMode::DialCode);

    let final_config = apply_cli_overrides(
        with_env,
        CliOverrides {
            mode: Some(SelectorMode::Nationality),
            disabled: true,
            trigger_style: Some(TriggerStyle::Input),
            ..CliOverrides::default()
        },
    );
    assert_eq!(final_config.mode, SelectorMode::Nationality);
    assert_eq!(final_config.label.as_deref(), Some("from file"));
    assert!(final_config.disabled);
    assert_eq!(final_config.trigger_style, TriggerStyle::Input);
}

#[test]
fn trigger_style_parses_case_insensitively() {
    assert_eq!(" Input ".parse(), Ok(TriggerStyle::Input));
    assert_eq!("button".parse(), Ok(TriggerStyle::Button));
    assert!("combo".parse::<TriggerStyle>().is_err());
}
