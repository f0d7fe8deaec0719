//! Configuration system for structprobe.
//!
//! This module provides the configuration structure for the `structprobe`
//! command with sensible defaults and support for deserialization via serde.
//! Configuration is loaded from a TOML file and overridden by command-line
//! arguments.
//!
//! # Example
//!
//! ```
//! use structprobe::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.comparator, "strict");
//! assert_eq!(config.output_format, "json");
//!
//! // Create custom configuration
//! let custom = Config {
//!     output_format: "yaml".to_string(),
//!     ..Config::default()
//! };
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the structprobe command.
///
/// All fields have defaults via `Config::default()`, and any subset of them
/// may appear in the config file.
///
/// # Fields
///
/// * `comparator` - Comparator used by `find-value`: "strict" or "structural" (default: "strict")
/// * `output_format` - Output format for printed values: "json" or "yaml" (default: "json")
/// * `pretty` - Pretty-print JSON output (default: true)
/// * `log_level` - Default log filter when `RUST_LOG` is unset (default: "warn")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Comparator used by `find-value` when `--compare` is not given
    #[serde(default = "default_comparator")]
    pub comparator: String,

    /// Output format for printed values
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Default log filter
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_comparator() -> String {
    "strict".to_string()
}

fn default_output_format() -> String {
    "json".to_string()
}

fn default_pretty() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            comparator: default_comparator(),
            output_format: default_output_format(),
            pretty: default_pretty(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/structprobe/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("structprobe");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// A missing file yields the default configuration; an unreadable or
    /// malformed one is an error, which callers may log before falling back
    /// to `Config::default()`.
    pub fn try_load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)
                .with_context(|| format!("in {}", path.display())),
            _ => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let contents =
            std::fs::read_to_string(path.as_ref()).context("Failed to read config file")?;
        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text; missing keys take their defaults.
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        toml::from_str(contents).context("Failed to parse config file")
    }
}
