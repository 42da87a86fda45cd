//! Configuration loader and validator
//!
//! Loads host settings (bus device, polling cadence, retry policy, output
//! format) from TOML files in the configs/ directory.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use log::{info, debug};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Bus settings
    #[serde(default)]
    pub bus: BusSettings,

    /// Polling and retry policy
    #[serde(default)]
    pub session: SessionSettings,

    /// How events are printed
    #[serde(default)]
    pub output: OutputSettings,
}

/// Bus settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusSettings {
    /// I2C character device the Nunchuk is attached to
    #[serde(default = "default_device")]
    pub device: String,
}

impl Default for BusSettings {
    fn default() -> Self {
        Self { device: default_device() }
    }
}

/// Polling and retry policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Time between polls (milliseconds)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Handshake attempts made by `connect`
    #[serde(default = "default_init_attempts")]
    pub init_attempts: u32,

    /// Pause between handshake attempts (milliseconds)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Consecutive poll failures before the handshake is redone (0 = never)
    #[serde(default = "default_reinit_after_failures")]
    pub reinit_after_failures: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            init_attempts: default_init_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            reinit_after_failures: default_reinit_after_failures(),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Event output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human readable lines
    #[default]
    Text,

    /// One JSON object per line
    Json,
}

fn default_device() -> String { "/dev/i2c-1".to_string() }
fn default_poll_interval_ms() -> u64 { 20 }
fn default_init_attempts() -> u32 { 3 }
fn default_retry_delay_ms() -> u64 { 100 }
fn default_reinit_after_failures() -> u32 { 10 }

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        info!("Loading configuration from: {}", path_ref.display());

        let content = std::fs::read_to_string(path_ref)?;
        let config = Self::from_toml(&content)?;

        info!("✓ Config loaded");
        Ok(config)
    }

    /// Load default configuration from configs/default.toml
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load("configs/default.toml")
    }

    /// Parse and validate configuration text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;

        debug!("  - Device: {}", config.bus.device);
        debug!("  - Poll interval: {} ms", config.session.poll_interval_ms);
        debug!("  - Output: {:?}", config.output.format);

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bus.device.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "bus.device must not be empty".into()
            ));
        }

        if self.session.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "session.poll_interval_ms must be positive".into()
            ));
        }

        if self.session.init_attempts == 0 {
            return Err(ConfigError::Invalid(
                "session.init_attempts must be at least 1".into()
            ));
        }

        Ok(())
    }
}
