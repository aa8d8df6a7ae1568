//! SQLite MCP Library
//!
//! Insert and query tools over a single SQLite `people` table, served over
//! stdio or streamable HTTP.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use sqlite_mcp::{DatabaseConfig, SqliteMcpServer};
//!
//! let server = SqliteMcpServer::new(DatabaseConfig::at("mcp_data.db"));
//! // Serve via mcp_common::serve, or call tools in-process through EmbeddableMcp
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod params;
pub mod schema;
pub mod server;
pub mod types;

// Re-export main server type
pub use server::SqliteMcpServer;

pub use config::{DatabaseConfig, SqliteMcpConfig};
pub use error::{GatewayError, GatewayErrorKind};
pub use gateway::{PeopleGateway, DEFAULT_READ_QUERY};
pub use types::{NewPerson, PeopleFilter, Person, QueryRows, Row, SortField};

// Re-export parameter types for direct API usage
pub use params::*;
