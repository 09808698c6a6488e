//! Shim configuration (nya_shim.toml)
//!
//! Every field has a default, so an empty or missing file yields a working
//! configuration. On Android the file is read from the APK's assets.

use serde::{Deserialize, Serialize};

use crate::error::{PlatformError, Result};
use crate::keyboard::ImeAction;

/// Asset name the Android runner looks for
pub const CONFIG_ASSET: &str = "nya_shim.toml";

/// Top-level shim configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ShimConfig {
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub keyboard: KeyboardConfig,
}

/// Native engine library
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// Library name without `lib` prefix and `.so` suffix
    #[serde(default = "default_library_name")]
    pub name: String,
    /// Explicit library path, overriding `name`
    #[serde(default)]
    pub path: Option<String>,
}

fn default_library_name() -> String {
    "nya_native".to_string()
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            name: default_library_name(),
            path: None,
        }
    }
}

impl LibraryConfig {
    /// File name or path handed to the dynamic loader
    pub fn file_name(&self) -> String {
        match &self.path {
            Some(path) => path.clone(),
            None => format!("lib{}.so", self.name),
        }
    }
}

/// Log output
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Logcat tag
    #[serde(default = "default_tag")]
    pub tag: String,
    /// One of `error`, `warn`, `info`, `debug`, `trace`
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_tag() -> String {
    "nya".to_string()
}

fn default_level() -> String {
    "debug".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            tag: default_tag(),
            level: default_level(),
        }
    }
}

impl LoggingConfig {
    /// Parsed level, falling back to `debug` for unknown names
    pub fn level_filter(&self) -> tracing::Level {
        self.level.parse().unwrap_or(tracing::Level::DEBUG)
    }
}

/// Soft keyboard defaults
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct KeyboardConfig {
    /// IME action reported in every input connection descriptor
    #[serde(default)]
    pub ime_action: ImeAction,
}

impl ShimConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| PlatformError::Config(e.to_string()))
    }

    /// Parse raw file bytes, e.g. an asset read from the APK
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let content = std::str::from_utf8(bytes)
            .map_err(|e| PlatformError::Config(format!("Config is not UTF-8: {}", e)))?;
        Self::from_toml_str(content)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| PlatformError::Config(e.to_string()))
    }
}
