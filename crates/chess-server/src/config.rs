//! Server configuration loaded from a TOML file.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A value parsed but cannot be used.
    #[error("Invalid config: {0}")]
    Invalid(&'static str),
}

/// Settings for the HTTP and WebSocket server.
///
/// Every field has a default, so an empty or missing file is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Address to listen on. Defaults to `127.0.0.1:8080`.
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
    /// Seconds an invite stays valid. Defaults to 10.
    #[serde(default = "default_invite_lifespan_secs")]
    pub invite_lifespan_secs: u64,
    /// Allow any origin, method and header. Defaults to true.
    #[serde(default = "default_cors_permissive")]
    pub cors_permissive: bool,
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

fn default_invite_lifespan_secs() -> u64 {
    10
}

fn default_cors_permissive() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: default_bind(),
            invite_lifespan_secs: default_invite_lifespan_secs(),
            cors_permissive: default_cors_permissive(),
        }
    }
}

impl ServerConfig {
    /// Loads the configuration at `path`, or the defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// [`ConfigError::ParseError`] if it is not valid TOML, or
    /// [`ConfigError::Invalid`] if the invite lifespan is zero.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::parse(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parses a configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(content)?;
        if config.invite_lifespan_secs == 0 {
            return Err(ConfigError::Invalid("invite_lifespan_secs must be positive"));
        }
        Ok(config)
    }

    pub fn invite_lifespan(&self) -> Duration {
        Duration::from_secs(self.invite_lifespan_secs)
    }
}
