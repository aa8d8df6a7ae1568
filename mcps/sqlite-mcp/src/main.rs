//! SQLite MCP Server
//!
//! Exposes add_data / read_data over a SQLite people table.

use clap::Parser;
use sqlite_mcp::{cli::Cli, SqliteMcpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    mcp_common::init_tracing("sqlite_mcp")?;

    let config = cli.resolve_config()?;

    tracing::info!(
        transport = cli.server_type.as_str(),
        db = %config.database.path.display(),
        "Starting server..."
    );

    let database = config.database.clone();
    mcp_common::serve(
        cli.server_type,
        move || Ok(SqliteMcpServer::new(database.clone())),
        &config.server,
    )
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}
