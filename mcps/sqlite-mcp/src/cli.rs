//! Command-line arguments for the sqlite-mcp binary

use anyhow::Result;
use clap::Parser;
use mcp_common::Transport;
use std::path::PathBuf;

use crate::config::SqliteMcpConfig;

#[derive(Debug, Parser)]
#[command(name = "sqlite-mcp")]
#[command(about = "MCP server with insert and query tools over a SQLite people table")]
#[command(version)]
pub struct Cli {
    /// Transport to serve on
    ///
    /// `sse` serves streamable HTTP at `http://<bind>/mcp` (the path is set by
    /// `[server] path`); there is no separate `/sse` endpoint.
    #[arg(
        long = "server_type",
        value_enum,
        default_value = "sse",
        env = "SQLITE_MCP_SERVER_TYPE"
    )]
    pub server_type: Transport,

    /// TOML config file (defaults are used when omitted)
    #[arg(long, env = "SQLITE_MCP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database file, overriding the config
    #[arg(long, env = "SQLITE_MCP_DB")]
    pub db: Option<PathBuf>,

    /// HTTP bind address for the sse transport, overriding the config
    #[arg(long, env = "SQLITE_MCP_BIND")]
    pub bind: Option<String>,
}

impl Cli {
    /// Load the config file, then apply command-line overrides
    pub fn resolve_config(&self) -> Result<SqliteMcpConfig> {
        let mut config = SqliteMcpConfig::load(self.config.as_deref())?;

        if let Some(db) = &self.db {
            config.database.path = db.clone();
        }
        if let Some(bind) = &self.bind {
            config.server.bind = bind.clone();
        }

        Ok(config)
    }
}
