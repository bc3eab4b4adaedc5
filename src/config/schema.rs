//! Configuration schema types for `huecurve.toml`
//!
//! Defines the structure and validation rules for huecurve configuration.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::color::ColorSpace;
use crate::models::{DEFAULT_STEPS, MAX_NUM_OF_PALETTES, MAX_STEPS};
use crate::session::SessionOptions;

/// Share link settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Base address share links are built on
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:5173/".to_string()
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self { base_url: default_base_url() }
    }
}

/// Defaults for a fresh palette set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Swatches per palette
    #[serde(default = "default_steps")]
    pub steps: usize,
    /// Color space palettes are generated in
    #[serde(default)]
    pub color_space: ColorSpace,
    /// Maximum number of palettes in a set
    #[serde(default = "default_max_palettes")]
    pub max_palettes: usize,
}

fn default_steps() -> usize {
    DEFAULT_STEPS
}

fn default_max_palettes() -> usize {
    MAX_NUM_OF_PALETTES
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            color_space: ColorSpace::default(),
            max_palettes: default_max_palettes(),
        }
    }
}

/// Output formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty print JSON output
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Complete huecurve.toml configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HuecurveConfig {
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "defaults.steps")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "huecurve.toml: '{}' {}", self.field, self.message)
    }
}

impl HuecurveConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        match Url::parse(&self.share.base_url) {
            Ok(url) if url.cannot_be_a_base() => errors.push(ConfigValidationError {
                field: "share.base_url".to_string(),
                message: "must be a hierarchical URL such as https://host/app".to_string(),
            }),
            Ok(_) => {}
            Err(e) => errors.push(ConfigValidationError {
                field: "share.base_url".to_string(),
                message: format!("must be an absolute URL ({})", e),
            }),
        }

        if self.defaults.steps == 0 {
            errors.push(ConfigValidationError {
                field: "defaults.steps".to_string(),
                message: "must be a positive integer".to_string(),
            });
        } else if self.defaults.steps > MAX_STEPS {
            errors.push(ConfigValidationError {
                field: "defaults.steps".to_string(),
                message: format!("must be at most {}", MAX_STEPS),
            });
        }

        if self.defaults.max_palettes == 0 {
            errors.push(ConfigValidationError {
                field: "defaults.max_palettes".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Session defaults described by this configuration.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            base_url: self.share.base_url.clone(),
            steps: self.defaults.steps,
            max_palettes: self.defaults.max_palettes,
            color_space: self.defaults.color_space,
            pretty: self.output.pretty,
        }
    }
}
