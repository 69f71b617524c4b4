//! Session configuration, loadable from TOML.

use crate::core::error::{CollagerError, CollagerResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default JPEG quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Options for a command session and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Quality used when saving JPEG files, 1..=100.
    pub jpeg_quality: u8,
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Whether to echo each command before running it.
    pub echo_commands: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            log_level: "warn".to_string(),
            echo_commands: false,
        }
    }
}

impl SessionConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text. Missing keys keep their defaults.
    pub fn from_toml(text: &str) -> CollagerResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| CollagerError::Config(e.to_string()))?;
        Ok(config.normalized())
    }

    /// Read a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> CollagerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CollagerError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&text)
    }

    /// Set the JPEG quality, clamped to 1..=100.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Set the fallback log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable/disable command echo.
    pub fn with_echo_commands(mut self, echo: bool) -> Self {
        self.echo_commands = echo;
        self
    }

    fn normalized(self) -> Self {
        let quality = self.jpeg_quality;
        self.with_jpeg_quality(quality)
    }
}
