/// Configuration management for RevX
///
/// RevX reads optional defaults from ~/.revx/config.toml. Command-line flags
/// always win over values from the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# RevX Configuration File
# Created by 'revx --init-config'
#
# Values set here can be overridden by command-line flags.

[reverse]
# Reverse each whitespace-delimited word instead of the whole line (default: false)
# Same as passing -s/--separate.
#separate = false

[processing]
# Cancel the run after this many seconds (optional, must be positive)
#timeout_secs = 30

[logging]
# Write debug logs to ~/.revx/revx.log (default: false)
#debug = false

# Log level used when debug logging is enabled:
# "error", "warn", "info", "debug", or "trace" (default: "info")
#level = "info"
"#;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// RevX configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Reversal settings
    #[serde(default)]
    pub reverse: ReverseConfig,

    /// Processing settings
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReverseConfig {
    /// Reverse per word rather than per line
    #[serde(default)]
    pub separate: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Cancel the run after this many seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable file logging
    #[serde(default)]
    pub debug: bool,

    /// Level filter for file logging
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

/// Directory holding RevX's config and log files
pub fn revx_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home_dir.join(".revx"))
}

/// Get the configuration file path
pub fn config_file_path() -> Result<PathBuf> {
    Ok(revx_dir()?.join("config.toml"))
}

/// Load configuration from the default location
///
/// A missing file is not an error: defaults are returned.
pub fn load_config() -> Result<Config> {
    load_config_from(&config_file_path()?)
}

/// Load and validate configuration from `path`
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&config_str)
        .with_context(|| format!("Malformed config file: {}", path.display()))?;

    validate_config(&config)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    Ok(config)
}

/// Write the commented default configuration to `path`, creating parents
pub fn save_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write default config file: {}", path.display()))?;

    Ok(())
}

/// Render a configuration as TOML
pub fn to_toml(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize config")
}

/// Validate configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    if config.processing.timeout_secs == Some(0) {
        anyhow::bail!("Invalid timeout_secs: 0 (must be positive)");
    }

    let level = config.logging.level.as_str();
    if !LOG_LEVELS.contains(&level) {
        anyhow::bail!(
            "Invalid log level: {} (must be one of {})",
            level,
            LOG_LEVELS.join(", ")
        );
    }

    Ok(())
}
