//! Configuration for SQLite MCP Server

use anyhow::{ensure, Context, Result};
use mcp_common::HttpConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// SQLite MCP configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SqliteMcpConfig {
    /// Database connection settings
    pub database: DatabaseConfig,

    /// HTTP transport settings (ignored for stdio)
    pub server: HttpConfig,
}

/// Largest busy timeout SQLite accepts, in whole seconds
///
/// The engine takes the timeout as an `i32` count of milliseconds.
pub const MAX_BUSY_TIMEOUT_SECS: u64 = i32::MAX as u64 / 1000;

/// Database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    /// Default: `mcp_data.db` in the working directory
    pub path: PathBuf,

    /// How long a call waits on a locked database before failing
    /// Default: 5
    pub busy_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Config pointing at a specific database file
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Busy timeout, capped at [`MAX_BUSY_TIMEOUT_SECS`]
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.busy_timeout_secs.min(MAX_BUSY_TIMEOUT_SECS))
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.busy_timeout_secs <= MAX_BUSY_TIMEOUT_SECS,
            "database.busy_timeout_secs must be at most {}, got {}",
            MAX_BUSY_TIMEOUT_SECS,
            self.busy_timeout_secs
        );
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("mcp_data.db"),
            busy_timeout_secs: 5,
        }
    }
}

impl SqliteMcpConfig {
    /// Load configuration
    ///
    /// With no path the built-in defaults are used. A given path must exist
    /// and parse; a typo in `--config` should not silently fall back.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content).with_context(|| format!("Failed to parse config from {:?}", path))
    }

    fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config
            .database
            .validate()
            .context("Invalid database settings")?;
        Ok(config)
    }
}
