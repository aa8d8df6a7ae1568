//! Error types for the people gateway

use mcp_common::{internal_error, invalid_params, IntoMcpError, McpError};
use std::path::PathBuf;
use thiserror::Error;

/// Why a gateway call failed
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("failed to open database at {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to prepare schema: {0}")]
    Schema(#[source] rusqlite::Error),

    #[error("statement rejected: {0}")]
    Statement(#[from] rusqlite::Error),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("database worker failed: {0}")]
    Worker(String),
}

/// Coarse classification used in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// The store file could not be opened or locked
    Resource,
    /// SQLite rejected the statement
    Engine,
    /// Structured arguments failed validation before reaching SQLite
    Validation,
    /// The blocking worker died
    Internal,
}

impl GatewayError {
    pub fn kind(&self) -> GatewayErrorKind {
        match self {
            GatewayError::Open { .. } => GatewayErrorKind::Resource,
            GatewayError::Schema(e) | GatewayError::Statement(e) if is_busy(e) => {
                GatewayErrorKind::Resource
            }
            GatewayError::Schema(_) | GatewayError::Statement(_) => GatewayErrorKind::Engine,
            GatewayError::Validation(_) => GatewayErrorKind::Validation,
            GatewayError::Worker(_) => GatewayErrorKind::Internal,
        }
    }
}

fn is_busy(err: &rusqlite::Error) -> bool {
    matches!(
        err.sqlite_error_code(),
        Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked)
    )
}

impl IntoMcpError for GatewayError {
    fn into_mcp_error(self) -> McpError {
        match self {
            GatewayError::Validation(msg) => invalid_params(msg),
            other => internal_error(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;

    #[test]
    fn test_kind_classification() {
        let engine = GatewayError::Statement(rusqlite::Error::InvalidQuery);
        assert_eq!(engine.kind(), GatewayErrorKind::Engine);

        let open = GatewayError::Open {
            path: PathBuf::from("/nope/mcp_data.db"),
            source: rusqlite::Error::InvalidQuery,
        };
        assert_eq!(open.kind(), GatewayErrorKind::Resource);
        assert!(open.to_string().contains("/nope/mcp_data.db"));

        assert_eq!(
            GatewayError::Validation("name".into()).kind(),
            GatewayErrorKind::Validation
        );
        assert_eq!(
            GatewayError::Worker("panicked".into()).kind(),
            GatewayErrorKind::Internal
        );
    }

    #[test]
    fn test_mcp_error_mapping() {
        let err = GatewayError::Validation("name must not be empty".into()).into_mcp_error();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);

        let err = GatewayError::Statement(rusqlite::Error::InvalidQuery).into_mcp_error();
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    }
}
