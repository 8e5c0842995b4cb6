//! Plugin configuration.
//!
//! The host passes a [`PluginConfig`] into every lifecycle hook. Hosts with a
//! TOML configuration file can hand their plugin section to
//! [`PluginConfig::from_toml`], which warns about unknown keys instead of
//! silently dropping them.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::log;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parsing error")]
    Toml(#[from] toml::de::Error),
}

/// Host-facing plugin configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Site output root the compiled asset is written under
    pub site_dir: PathBuf,

    /// Directory scanned for the stylesheet entry point, relative to the
    /// process working directory
    pub styles_dir: PathBuf,

    /// Treat compile failures as fatal instead of building without the
    /// stylesheet
    pub strict: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            site_dir: PathBuf::from("site"),
            styles_dir: PathBuf::from("extra_sass"),
            strict: false,
        }
    }
}

impl PluginConfig {
    /// Create a configuration for the given site output directory, with the
    /// default styles directory and non-strict failure handling.
    pub fn new(site_dir: impl Into<PathBuf>) -> Self {
        Self {
            site_dir: site_dir.into(),
            ..Self::default()
        }
    }

    /// Override the styles source directory.
    pub fn with_styles_dir(mut self, styles_dir: impl Into<PathBuf>) -> Self {
        self.styles_dir = styles_dir.into();
        self
    }

    /// Set strict failure handling.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Parse a TOML configuration section, warning about unknown fields.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;

        if !ignored.is_empty() {
            log!("warning"; "unknown config fields ignored: {}", ignored.join(", "));
        }

        Ok(config)
    }
}
