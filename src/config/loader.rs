//! Configuration loading and discovery for `huecurve.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::HuecurveConfig;
use crate::color::ColorSpace;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for during discovery.
pub const CONFIG_FILE: &str = "huecurve.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse huecurve.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override the share link base address
    pub base_url: Option<String>,
    /// Override swatches per palette
    pub steps: Option<usize>,
    /// Override the color space
    pub color_space: Option<ColorSpace>,
    /// Override JSON pretty printing
    pub pretty: Option<bool>,
}

/// Find huecurve.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for huecurve.toml
/// 2. Check XDG_CONFIG_HOME/huecurve/huecurve.toml (or ~/.config/huecurve/huecurve.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find huecurve.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("huecurve").join(CONFIG_FILE);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find huecurve.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a huecurve.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("palettes/huecurve.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<HuecurveConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(HuecurveConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<HuecurveConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: HuecurveConfig = toml::from_str(&contents)?;
    tracing::debug!(path = %path.display(), "loaded config");

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut HuecurveConfig, overrides: &CliOverrides) {
    if let Some(ref base_url) = overrides.base_url {
        config.share.base_url = base_url.clone();
    }

    if let Some(steps) = overrides.steps {
        config.defaults.steps = steps;
    }

    if let Some(color_space) = overrides.color_space {
        config.defaults.color_space = color_space;
    }

    if let Some(pretty) = overrides.pretty {
        config.output.pretty = pretty;
    }
}
