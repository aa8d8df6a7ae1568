//! MCP Common - Shared utilities for MCP servers
//!
//! This crate provides the plumbing every server in the workspace needs:
//!
//! - **Tracing**: [`init_tracing`] logs to stderr so stdout stays free for the protocol
//! - **Transports**: [`serve`] binds a server to stdio or streamable HTTP (SSE)
//! - **Results**: [`json_success`] for building `CallToolResult` responses
//! - **Errors**: [`IntoMcpError`] and helpers for MCP-compatible errors
//! - **Embeddable**: [`EmbeddableMcp`] trait for in-process execution
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{serve, HttpConfig, Transport};
//!
//! mcp_common::init_tracing("my_mcp")?;
//! serve(Transport::Stdio, || Ok(MyServer::new()), &HttpConfig::default()).await?;
//! ```

pub mod embeddable;
pub mod error;
pub mod init;
pub mod result;
pub mod transport;

// Re-export commonly used items at crate root
pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use error::{internal_error, invalid_params, IntoMcpError, ResultExt};
pub use init::init_tracing;
pub use result::json_success;
pub use transport::{serve, serve_http, serve_http_on, serve_stdio, HttpConfig, Transport};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Tool},
    ErrorData as McpError,
};

// Re-export async_trait for implementing EmbeddableMcp
pub use async_trait::async_trait;
