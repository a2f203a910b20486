//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, ConfigBuilder as LibConfigBuilder, Environment, File};
use std::path::Path;

use super::defaults::*;
use super::Config;

/// Helper to set a config default with consistent error mapping
fn set_config_default<T: Into<config::Value>>(
    builder: LibConfigBuilder<config::builder::DefaultState>,
    key: &str,
    value: T,
) -> Result<LibConfigBuilder<config::builder::DefaultState>> {
    builder
        .set_default(key, value)
        .map_err(|e| Error::config(format!("Failed to set {key} default: {e}")))
}

impl Config {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// Environment variables are prefixed with `REFSEARCH_` and use double
    /// underscores for nested values. For example:
    /// - `REFSEARCH_BRIDGE__UNSUPPORTED_RESULTS=fail`
    /// - `REFSEARCH_FRAMEWORK__MAX_NESTING_DEPTH=4`
    pub fn from_file(path: &Path) -> Result<Self> {
        let builder = ConfigLib::builder();

        // config crate doesn't apply serde defaults for missing sections
        let builder = set_config_default(builder, "bridge.enabled", default_true())?;
        let builder = set_config_default(
            builder,
            "bridge.unsupported_results",
            default_unsupported_results().to_string(),
        )?;
        let builder = set_config_default(
            builder,
            "framework.max_nesting_depth",
            default_max_nesting_depth() as i64,
        )?;
        let mut builder = set_config_default(builder, "logging.level", default_log_level())?;

        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("REFSEARCH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build config: {e}")))?;

        let config: Config = config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }
}
