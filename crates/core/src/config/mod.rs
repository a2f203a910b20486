//! Configuration for reference search frameworks and bridges
//!
//! Configuration can be loaded from TOML files and/or environment variables.

mod defaults;
mod loading;

#[cfg(test)]
mod tests;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use defaults::*;

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.refsearch/config.toml`.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".refsearch").join("config.toml"))
}

/// What a bridge does with a result that has no form in the receiving framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedResultPolicy {
    /// Drop the item silently and keep searching
    Skip,
    /// Log a warning, drop the item and keep searching
    Log,
    /// Abort the search with [`Error::UnsupportedResult`]
    Fail,
}

impl fmt::Display for UnsupportedResultPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Skip => "skip",
            Self::Log => "log",
            Self::Fail => "fail",
        };
        f.write_str(name)
    }
}

/// Bridge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Whether bridges forward requests at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Handling of results the bridge cannot adapt
    #[serde(default = "default_unsupported_results")]
    pub unsupported_results: UnsupportedResultPolicy,
}

/// Search framework configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameworkConfig {
    /// Deepest chain of nested searches a framework accepts
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter level when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Bridge configuration
    #[serde(default)]
    pub bridge: BridgeConfig,

    /// Search framework configuration
    #[serde(default)]
    pub framework: FrameworkConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            unsupported_results: default_unsupported_results(),
        }
    }
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: default_max_nesting_depth(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Creates a config from a TOML string (useful for testing)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        let depth = self.framework.max_nesting_depth;
        if depth == 0 || depth > MAX_NESTING_DEPTH_LIMIT {
            return Err(Error::config(format!(
                "Invalid max_nesting_depth {depth}. Must be between 1 and {MAX_NESTING_DEPTH_LIMIT}"
            )));
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(Error::config(format!(
                "Invalid log level '{}'. Must be one of: {:?}",
                self.logging.level, VALID_LOG_LEVELS
            )));
        }

        Ok(())
    }

    /// Saves the configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, toml_string)
            .map_err(|e| Error::config(format!("Failed to write config file: {e}")))?;

        Ok(())
    }
}
