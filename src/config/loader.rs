//! Configuration file loading with precedence handling.

use crate::model::{PickerOptions, SelectorMode};
use crate::state::{PickerTiming, PlacementLimits};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "COUNTRY_PICKER_CONFIG";

/// Environment variable overriding the selector mode.
pub const MODE_ENV_VAR: &str = "COUNTRY_PICKER_MODE";

const APP_DIR: &str = "country-picker";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A mode string from the file or environment is not a known mode.
    #[error("Invalid mode from {origin}: {reason}")]
    InvalidMode {
        /// Where the value came from (`config file` or the variable name).
        origin: String,
        /// Parse error details.
        reason: String,
    },
}

// ===== TriggerStyle =====

/// How the picker's trigger is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerStyle {
    /// Read-only trigger; the search box lives inside the dropdown.
    #[default]
    Button,
    /// Editable trigger that doubles as the search box.
    Input,
}

impl fmt::Display for TriggerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TriggerStyle::Button => "button",
            TriggerStyle::Input => "input",
        })
    }
}

/// Error for unrecognised trigger style strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown trigger style {0:?} (expected \"button\" or \"input\")")]
pub struct InvalidTriggerStyle(pub String);

impl FromStr for TriggerStyle {
    type Err = InvalidTriggerStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "button" => Ok(TriggerStyle::Button),
            "input" => Ok(TriggerStyle::Input),
            other => Err(InvalidTriggerStyle(other.to_string())),
        }
    }
}

// ===== ConfigFile =====

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/country-picker/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// `dial-code` or `nationality`.
    #[serde(default)]
    pub mode: Option<String>,

    /// Label shown above the trigger.
    #[serde(default)]
    pub label: Option<String>,

    /// Hidden form field name.
    #[serde(default)]
    pub field_name: Option<String>,

    /// Mark the field as required.
    #[serde(default)]
    pub required: Option<bool>,

    /// Start disabled.
    #[serde(default)]
    pub disabled: Option<bool>,

    /// Trigger placeholder; mode default when unset.
    #[serde(default)]
    pub placeholder: Option<String>,

    /// Search box placeholder; mode default when unset.
    #[serde(default)]
    pub search_placeholder: Option<String>,

    /// Hint shown above the search box.
    #[serde(default)]
    pub hint: Option<String>,

    /// Catalog JSON file; the bundled sample when unset.
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Quiet period before the search loading flag clears.
    #[serde(default)]
    pub debounce_ms: Option<u64>,

    /// Delay between search blur and the blur commit.
    #[serde(default)]
    pub blur_grace_ms: Option<u64>,

    /// `button` or `input`.
    #[serde(default)]
    pub trigger_style: Option<TriggerStyle>,

    /// Placement limits section.
    #[serde(default)]
    pub placement: Option<PlacementSection>,
}

/// Placement limits from TOML, in terminal rows.
///
/// ```toml
/// [placement]
/// padding = 1
/// min_height = 6
/// max_height = 20
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PlacementSection {
    /// Gap kept to the screen edge.
    #[serde(default)]
    pub padding: Option<u32>,
    /// Smallest dropdown height.
    #[serde(default)]
    pub min_height: Option<u32>,
    /// Largest dropdown height.
    #[serde(default)]
    pub max_height: Option<u32>,
}

// ===== ResolvedConfig =====

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// What the picker selects.
    pub mode: SelectorMode,
    /// Label shown above the trigger.
    pub label: Option<String>,
    /// Hidden form field name.
    pub field_name: Option<String>,
    /// Whether the field is required.
    pub required: bool,
    /// Whether the picker starts disabled.
    pub disabled: bool,
    /// Trigger placeholder override.
    pub placeholder: Option<String>,
    /// Search box placeholder override.
    pub search_placeholder: Option<String>,
    /// Hint shown above the search box.
    pub hint: Option<String>,
    /// Catalog file; `None` uses the bundled sample.
    pub catalog_path: Option<PathBuf>,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Debounce and blur grace delays.
    pub timing: PickerTiming,
    /// Dropdown placement limits, in rows.
    pub placement: PlacementLimits,
    /// Button or editable-input trigger.
    pub trigger_style: TriggerStyle,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            mode: SelectorMode::DialCode,
            label: None,
            field_name: None,
            required: false,
            disabled: false,
            placeholder: None,
            search_placeholder: None,
            hint: None,
            catalog_path: None,
            log_file_path: default_log_path(),
            timing: PickerTiming::default(),
            placement: PlacementLimits::TERMINAL,
            trigger_style: TriggerStyle::Button,
        }
    }
}

impl ResolvedConfig {
    /// Picker options carrying everything but the value binding.
    pub fn picker_options(&self) -> PickerOptions {
        PickerOptions {
            mode: self.mode,
            label: self.label.clone(),
            field_name: self.field_name.clone(),
            required: self.required,
            disabled: self.disabled,
            placeholder_text: self.placeholder.clone(),
            search_placeholder_text: self.search_placeholder.clone(),
            hint_text: self.hint.clone(),
            ..PickerOptions::default()
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/country-picker/country-picker.log` on Unix-like
/// systems, or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join(APP_DIR).join("country-picker.log")
    } else {
        PathBuf::from("country-picker.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/country-picker/config.toml` on Unix, appropriate path
/// on other platforms. Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `COUNTRY_PICKER_CONFIG` environment variable
/// 3. Default path `~/.config/country-picker/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    match std::env::var(CONFIG_ENV_VAR) {
        Ok(env_path) if env_path.is_empty() => {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV_VAR} is empty")));
        }
        Ok(env_path) => return load_config_file(PathBuf::from(env_path)),
        Err(_) => {}
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidMode`] for an unknown `mode` string.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let mode = match config.mode {
        Some(raw) => raw.parse::<SelectorMode>().map_err(|e| {
            ConfigError::InvalidMode {
                origin: "config file".to_string(),
                reason: e.to_string(),
            }
        })?,
        None => defaults.mode,
    };

    let timing = PickerTiming {
        debounce: config
            .debounce_ms
            .map_or(defaults.timing.debounce, Duration::from_millis),
        blur_grace: config
            .blur_grace_ms
            .map_or(defaults.timing.blur_grace, Duration::from_millis),
    };

    let section = config.placement.unwrap_or_default();
    let placement = PlacementLimits {
        padding: section.padding.unwrap_or(defaults.placement.padding),
        min_height: section.min_height.unwrap_or(defaults.placement.min_height),
        max_height: section.max_height.unwrap_or(defaults.placement.max_height),
    };

    Ok(ResolvedConfig {
        mode,
        label: config.label.or(defaults.label),
        field_name: config.field_name.or(defaults.field_name),
        required: config.required.unwrap_or(defaults.required),
        disabled: config.disabled.unwrap_or(defaults.disabled),
        placeholder: config.placeholder.or(defaults.placeholder),
        search_placeholder: config.search_placeholder.or(defaults.search_placeholder),
        hint: config.hint.or(defaults.hint),
        catalog_path: config.catalog.or(defaults.catalog_path),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        timing,
        placement,
        trigger_style: config.trigger_style.unwrap_or(defaults.trigger_style),
    })
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `COUNTRY_PICKER_MODE`: Override selector mode
///
/// # Errors
///
/// Returns [`ConfigError::InvalidMode`] if the variable holds an unknown mode.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(raw) = std::env::var(MODE_ENV_VAR) {
        config.mode = raw.parse::<SelectorMode>().map_err(|e| {
            ConfigError::InvalidMode {
                origin: MODE_ENV_VAR.to_string(),
                reason: e.to_string(),
            }
        })?;
    }

    Ok(config)
}

/// CLI flags that override configuration. `None`/`false` leaves the
/// configured value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--mode`
    pub mode: Option<SelectorMode>,
    /// `--catalog`
    pub catalog: Option<PathBuf>,
    /// `--name`
    pub field_name: Option<String>,
    /// `--label`
    pub label: Option<String>,
    /// `--required` (only ever turns it on)
    pub required: bool,
    /// `--disabled` (only ever turns it on)
    pub disabled: bool,
    /// `--trigger-style`
    pub trigger_style: Option<TriggerStyle>,
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(catalog) = cli.catalog {
        config.catalog_path = Some(catalog);
    }
    if let Some(name) = cli.field_name {
        config.field_name = Some(name);
    }
    if let Some(label) = cli.label {
        config.label = Some(label);
    }
    if cli.required {
        config.required = true;
    }
    if cli.disabled {
        config.disabled = true;
    }
    if let Some(style) = cli.trigger_style {
        config.trigger_style = style;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
