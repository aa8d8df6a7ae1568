//! Tracing setup shared by all MCP server binaries

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging for an MCP server
///
/// Logs always go to stderr: in stdio mode stdout carries the JSON-RPC stream,
/// and anything else written there corrupts the session.
///
/// - `RUST_LOG` is honoured through [`EnvFilter`]
/// - `<crate_name>=info` is added on top so the server's own events show by default
/// - `LOG_FORMAT=json` switches to structured JSON lines
///
/// # Arguments
///
/// * `crate_name` - The crate's module path name (e.g., "sqlite_mcp")
pub fn init_tracing(crate_name: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("{}=info", crate_name).parse()?)
        .add_directive("mcp_common=info".parse()?);

    let registry = tracing_subscriber::registry().with(filter);

    if json_requested(std::env::var("LOG_FORMAT").ok().as_deref()) {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

fn json_requested(log_format: Option<&str>) -> bool {
    log_format
        .map(|v| v.trim().eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global subscriber can only be installed once per process, so only
    // the format selection is tested here.

    #[test]
    fn test_json_requested() {
        assert!(json_requested(Some("json")));
        assert!(json_requested(Some(" JSON ")));
        assert!(!json_requested(Some("text")));
        assert!(!json_requested(None));
    }
}
