//! Result helpers for MCP tool responses

use rmcp::{
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
use serde::Serialize;

/// Create a successful JSON response from any serializable data
///
/// The value is rendered as pretty-printed JSON in a single text content
/// block, which is what MCP clients hand back to the model verbatim.
///
/// ```rust,ignore
/// use mcp_common::json_success;
///
/// fn add_data(&self) -> Result<CallToolResult, McpError> {
///     json_success(&true)
/// }
/// ```
pub fn json_success<T: Serialize>(data: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}
