/// Configuration management for exline
///
/// exline stores configuration in ~/.exline/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// exline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: Option<String>,

    /// Colorize text output when stdout is a terminal
    #[serde(default = "default_color")]
    pub color: Option<bool>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: Some("text".to_string()),
            color: Some(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write debug logs to a file
    #[serde(default = "default_debug")]
    pub debug: Option<bool>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { debug: Some(false) }
    }
}

// Default functions for serde
fn default_format() -> Option<String> { Some("text".to_string()) }
fn default_color() -> Option<bool> { Some(true) }
fn default_debug() -> Option<bool> { Some(false) }

/// Get the configuration file path
pub fn config_file_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;

    let config_dir = home_dir.join(".exline");
    fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create config directory: {}", config_dir.display()))?;

    Ok(config_dir.join("config.toml"))
}

/// Get the default configuration file content with comments
fn get_default_config_content() -> &'static str {
    r#"# exline Configuration File
#
# This file controls default behavior for exline. Values set here can be
# overridden by command-line flags.
#
# For more information, run: exline config --help

[output]
# Output format: "text" (default) or "json"
# text - colored, human-readable outline of each parsed command
# json - one JSON document per successfully parsed command
format = "text"

# Colorize text output when stdout is a terminal (default: true)
# NO_COLOR in the environment always disables color.
color = true

[logging]
# Write debug logs to a file (default: false)
# Logs go to /var/log/exline.log if writable, otherwise ~/.exline/exline.log
debug = false
"#
}

/// Save the default commented configuration file
pub fn save_default_config() -> Result<()> {
    let config_path = config_file_path()?;

    fs::write(&config_path, get_default_config_content())
        .with_context(|| format!("Failed to write default config file: {}", config_path.display()))?;

    Ok(())
}

/// Load configuration from file, creating default if needed
///
/// If the config file doesn't exist, creates it with defaults and returns them.
/// If the config file is malformed, recreates it with defaults.
pub fn load_config() -> Result<Config> {
    let config_path = config_file_path()?;

    // Create default config file if it doesn't exist
    if !config_path.exists() {
        save_default_config()?;
    }

    let config_str = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    // Try to parse the config
    let config: Config = match toml::from_str(&config_str) {
        Ok(config) => config,
        Err(_) => {
            // Config is malformed, recreate with defaults
            save_default_config()?;
            return Ok(Config::default());
        }
    };

    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &Config) -> Result<()> {
    let config_path = config_file_path()?;

    let config_str = toml::to_string_pretty(config)
        .context("Failed to serialize config")?;

    fs::write(&config_path, config_str)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    Ok(())
}

/// Validate configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(format) = &config.output.format {
        if !["text", "json"].contains(&format.as_str()) {
            anyhow::bail!("Invalid format: {} (must be 'text' or 'json')", format);
        }
    }

    Ok(())
}
