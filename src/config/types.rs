//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::limits::LimitsConfig;
use super::listen::ListenConfig;
use super::validation::{ValidationError, validate};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", format_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Relay configuration.
///
/// Every section is optional; a missing file section falls back to defaults
/// so the daemon can start without any configuration file at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server identity.
    #[serde(default)]
    pub server: ServerConfig,
    /// Network listen configuration.
    #[serde(default)]
    pub listen: ListenConfig,
    /// Line, queue and write limits.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Room lifetime policy.
    #[serde(default)]
    pub rooms: RoomsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name used as the prefix of every server reply (e.g., "irc.example.com").
    #[serde(default = "default_server_name")]
    pub name: String,
    /// Network name shown in the welcome line.
    #[serde(default = "default_network")]
    pub network: String,
    /// Version string advertised in RPL_YOURHOST and RPL_MYINFO.
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            network: default_network(),
            version: default_version(),
        }
    }
}

fn default_server_name() -> String {
    "irc.example.com".to_string()
}

fn default_network() -> String {
    "slrelay".to_string()
}

fn default_version() -> String {
    concat!("slrelay-", env!("CARGO_PKG_VERSION")).to_string()
}

/// Whether rooms outlive their last member.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RoomRetention {
    /// Rooms persist once created, even when empty.
    #[default]
    Keep,
    /// A room is deleted as soon as its last member parts or disconnects.
    PruneEmpty,
}

/// Room configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomsConfig {
    /// Room retention policy (default: keep).
    #[serde(default)]
    pub retention: RoomRetention,
}
