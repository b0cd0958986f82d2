// src/config.rs

//! Manages client configuration: loading from TOML, defaults and validation.

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::time::Duration;
use tracing::warn;

/// The well-known DICT port (RFC 2229, section 3.1).
pub const DEFAULT_PORT: u16 = 2628;

/// Settings for connecting to a DICT server and for the command-line driver.
#[derive(Deserialize, Debug, Clone)]
pub struct ClientConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Deadline for establishing the TCP connection.
    #[serde(with = "humantime_serde", default = "default_connect_timeout")]
    pub connect_timeout: Duration,

    /// Deadline for each line read from the server. No deadline when unset.
    #[serde(with = "humantime_serde", default)]
    pub read_timeout: Option<Duration>,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Database used by the CLI when none is given on the command line.
    #[serde(default = "default_database")]
    pub default_database: String,

    /// Strategy used by the CLI when none is given on the command line.
    #[serde(default = "default_strategy")]
    pub default_strategy: String,
}

fn default_host() -> String {
    "localhost".to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_database() -> String {
    "*".to_string()
}
fn default_strategy() -> String {
    "prefix".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            connect_timeout: default_connect_timeout(),
            read_timeout: None,
            log_level: default_log_level(),
            default_database: default_database(),
            default_strategy: default_strategy(),
        }
    }
}

impl ClientConfig {
    /// Reads, parses and validates a TOML configuration file.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{path}'"))?;
        Self::from_toml(&contents).with_context(|| format!("Invalid configuration in '{path}'"))
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: ClientConfig =
            toml::from_str(contents).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the settings for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(anyhow!("host cannot be empty"));
        }
        if self.port == 0 {
            return Err(anyhow!("port cannot be 0"));
        }
        if self.connect_timeout.is_zero() {
            return Err(anyhow!("connect_timeout cannot be 0"));
        }
        if self.read_timeout.is_some_and(|t| t.is_zero()) {
            return Err(anyhow!("read_timeout cannot be 0; omit it to disable"));
        }
        if self.default_database.trim().is_empty() {
            return Err(anyhow!("default_database cannot be empty"));
        }
        if self.default_strategy.trim().is_empty() {
            return Err(anyhow!("default_strategy cannot be empty"));
        }
        if self.port != DEFAULT_PORT {
            warn!(
                "port {} differs from the standard DICT port {}",
                self.port, DEFAULT_PORT
            );
        }
        Ok(())
    }
}
