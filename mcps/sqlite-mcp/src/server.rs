//! SQLite MCP Server implementation
//!
//! `add_data` and `read_data` keep the soft-failure contract: a rejected
//! insert answers `false`, a rejected query answers `[]`, and the reason only
//! goes to the log. `add_person` and `list_people` are the parameterized
//! variants and report failures as MCP errors.

use mcp_common::{
    async_trait, json_success, EmbeddableError, EmbeddableMcp, EmbeddableResult, McpError,
    ResultExt,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router,
};
use serde_json::Value;

use crate::config::DatabaseConfig;
use crate::error::GatewayError;
use crate::gateway::{soften_add, soften_read, PeopleGateway};
use crate::params::*;
use crate::types::{NewPerson, PeopleFilter};

const INSTRUCTIONS: &str = "SQLite people store. Table people(id INTEGER PRIMARY KEY AUTOINCREMENT, \
    name TEXT NOT NULL, age INTEGER NOT NULL, profession TEXT NOT NULL). \
    Use add_data with one INSERT statement and read_data with one SELECT statement; \
    input holding several statements is rejected. \
    add_person and list_people do the same with structured arguments.";

// ============================================================================
// Server Implementation
// ============================================================================

/// SQLite MCP Server
#[derive(Clone)]
pub struct SqliteMcpServer {
    gateway: PeopleGateway,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl SqliteMcpServer {
    /// Create a server over the given database
    ///
    /// Nothing is opened here; every tool call opens its own connection.
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            gateway: PeopleGateway::new(config),
            tool_router: Self::tool_router(),
        }
    }

    pub fn gateway(&self) -> &PeopleGateway {
        &self.gateway
    }

    #[tool(description = "Add new data to the people table using a SQL INSERT statement. \
        Format: INSERT INTO people (name, age, profession) VALUES ('Jhon Doe', 30, 'Engineer'). \
        name (text), age (integer) and profession (text) are required; id is auto-generated. \
        Returns true if the row was added, false otherwise.")]
    async fn add_data(
        &self,
        Parameters(params): Parameters<AddDataParams>,
    ) -> Result<CallToolResult, McpError> {
        let gateway = self.gateway.clone();
        let outcome = blocking(move || gateway.add(&params.query)).await;
        json_success(&soften_add(outcome))
    }

    #[tool(description = "Read data from the people table using a SQL SELECT statement. \
        Defaults to SELECT * FROM people. Examples: SELECT name, age FROM people WHERE age > 25; \
        SELECT * FROM people ORDER BY age DESC. Returns a list of rows, each a list of column \
        values; for the default query a row is [id, name, age, profession]. \
        Returns an empty list when nothing matches or the query fails.")]
    async fn read_data(
        &self,
        Parameters(params): Parameters<ReadDataParams>,
    ) -> Result<CallToolResult, McpError> {
        let gateway = self.gateway.clone();
        let outcome = blocking(move || gateway.read(&params.query)).await;
        json_success(&soften_read(outcome))
    }

    #[tool(description = "Add one person from structured fields (name, age, profession). \
        Leading and trailing whitespace is trimmed from name and profession. Values are bound \
        as parameters, so quotes need no escaping. Returns the stored person including its \
        new id.")]
    async fn add_person(
        &self,
        Parameters(params): Parameters<AddPersonParams>,
    ) -> Result<CallToolResult, McpError> {
        let gateway = self.gateway.clone();
        let person = NewPerson::from(params);
        let stored = blocking(move || gateway.insert_person(&person))
            .await
            .to_mcp_err()?;

        tracing::info!(id = stored.id, "Added person");
        json_success(&stored)
    }

    #[tool(description = "List people with optional filters: min_age, max_age, profession \
        (exact), name_contains (substring), order_by (id, name or age), descending, limit. \
        Returns a list of people objects.")]
    async fn list_people(
        &self,
        Parameters(params): Parameters<ListPeopleParams>,
    ) -> Result<CallToolResult, McpError> {
        let gateway = self.gateway.clone();
        let filter = PeopleFilter::from(params);
        let people = blocking(move || gateway.list_people(&filter))
            .await
            .to_mcp_err()?;

        json_success(&people)
    }
}

/// Run SQLite work on the blocking pool
async fn blocking<T, F>(work: F) -> Result<T, GatewayError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, GatewayError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| GatewayError::Worker(e.to_string()))?
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for SqliteMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for SqliteMcpServer {
    fn server_name(&self) -> &str {
        "sqlite"
    }

    fn server_description(&self) -> Option<&str> {
        Some(INSTRUCTIONS)
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        // Tools without required fields accept a missing argument object
        let params = if params.is_null() {
            Value::Object(Default::default())
        } else {
            params
        };

        match name {
            "add_data" => {
                let params: AddDataParams = serde_json::from_value(params)?;
                self.add_data(Parameters(params)).await.map_err(Into::into)
            }

            "read_data" => {
                let params: ReadDataParams = serde_json::from_value(params)?;
                self.read_data(Parameters(params)).await.map_err(Into::into)
            }

            "add_person" => {
                let params: AddPersonParams = serde_json::from_value(params)?;
                self.add_person(Parameters(params)).await.map_err(Into::into)
            }

            "list_people" => {
                let params: ListPeopleParams = serde_json::from_value(params)?;
                self.list_people(Parameters(params)).await.map_err(Into::into)
            }

            _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
        }
    }
}
