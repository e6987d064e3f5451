//! Configuration file loading with precedence handling.

use super::{is_valid_margin, is_valid_threshold, GridOptions};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/flashlight/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Gap between items and rows in pixels.
    #[serde(default)]
    pub margin: Option<f64>,

    /// Row fullness threshold (sum of aspect ratios).
    #[serde(default)]
    pub row_aspect_ratio_threshold: Option<f64>,

    /// Rows per section.
    #[serde(default)]
    pub section_rows: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Margin in pixels.
    pub margin: f64,
    /// Row aspect ratio threshold.
    pub row_aspect_ratio_threshold: f64,
    /// Rows per section.
    pub section_rows: usize,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        let options = GridOptions::default();
        Self {
            margin: options.margin,
            row_aspect_ratio_threshold: options.row_aspect_ratio_threshold,
            section_rows: options.section_rows,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Grid options carried by this configuration.
    pub fn grid_options(&self) -> GridOptions {
        GridOptions {
            margin: self.margin,
            row_aspect_ratio_threshold: self.row_aspect_ratio_threshold,
            section_rows: self.section_rows,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/flashlight/flashlight.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("flashlight").join("flashlight.log")
    } else {
        PathBuf::from("flashlight.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
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
/// Returns `~/.config/flashlight/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("flashlight").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (like CLI `--config`)
/// 2. `FLASHLIGHT_CONFIG` environment variable
/// 3. Default path `~/.config/flashlight/config.toml`
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

    if let Ok(env_path) = std::env::var("FLASHLIGHT_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `FLASHLIGHT_MARGIN`: Override margin
/// - `FLASHLIGHT_ROW_ASPECT_RATIO_THRESHOLD`: Override threshold
///
/// Values that do not parse as numbers are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(margin) =
        env_f64("FLASHLIGHT_MARGIN").and_then(|m| accept_margin("FLASHLIGHT_MARGIN", m))
    {
        config.margin = margin;
    }

    if let Some(threshold) = env_f64("FLASHLIGHT_ROW_ASPECT_RATIO_THRESHOLD")
        .and_then(|t| accept_threshold("FLASHLIGHT_ROW_ASPECT_RATIO_THRESHOLD", t))
    {
        config.row_aspect_ratio_threshold = threshold;
    }

    config
}

fn env_f64(name: &str) -> Option<f64> {
    std::env::var(name).ok()?.trim().parse().ok()
}

fn accept_margin(source: &str, margin: f64) -> Option<f64> {
    if is_valid_margin(margin) {
        Some(margin)
    } else {
        warn!("Ignoring invalid margin {} from {}", margin, source);
        None
    }
}

fn accept_threshold(source: &str, threshold: f64) -> Option<f64> {
    if is_valid_threshold(threshold) {
        Some(threshold)
    } else {
        warn!("Ignoring invalid row aspect ratio threshold {} from {}", threshold, source);
        None
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
/// Invalid margin or threshold values are ignored.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        margin: config
            .margin
            .and_then(|m| accept_margin("config file", m))
            .unwrap_or(defaults.margin),
        row_aspect_ratio_threshold: config
            .row_aspect_ratio_threshold
            .and_then(|t| accept_threshold("config file", t))
            .unwrap_or(defaults.row_aspect_ratio_threshold),
        section_rows: config.section_rows.unwrap_or(defaults.section_rows),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
/// Invalid margin or threshold values are ignored.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    margin_override: Option<f64>,
    threshold_override: Option<f64>,
    section_rows_override: Option<usize>,
) -> ResolvedConfig {
    if let Some(margin) = margin_override.and_then(|m| accept_margin("command line", m)) {
        config.margin = margin;
    }

    if let Some(threshold) = threshold_override.and_then(|t| accept_threshold("command line", t)) {
        config.row_aspect_ratio_threshold = threshold;
    }

    if let Some(rows) = section_rows_override {
        config.section_rows = rows;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
