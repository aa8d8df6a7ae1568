//! Transport selection and serving
//!
//! Servers pick one of two transports at startup:
//!
//! - [`Transport::Stdio`]: a persistent JSON-RPC stream over stdin/stdout,
//!   for clients that spawn the server as a child process
//! - [`Transport::Sse`]: MCP streamable HTTP, where clients POST requests and
//!   responses plus server-initiated messages come back as SSE events

use anyhow::Context;
use rmcp::{
    transport::{
        stdio,
        streamable_http_server::{
            session::local::LocalSessionManager, StreamableHttpServerConfig,
            StreamableHttpService,
        },
    },
    ServerHandler, ServiceExt,
};
use serde::Deserialize;

/// Transport a server binds at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// HTTP requests with server-pushed SSE events
    #[default]
    Sse,
    /// Line-delimited JSON-RPC over stdin/stdout
    Stdio,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Sse => "sse",
            Transport::Stdio => "stdio",
        }
    }
}

/// Where the HTTP transport listens
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Socket address to bind, e.g. `127.0.0.1:8000`
    pub bind: String,
    /// URL path the MCP endpoint is mounted on
    pub path: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
            path: "/mcp".to_string(),
        }
    }
}

/// Serve over the selected transport until the client or the process ends it
///
/// `factory` builds one server instance per session. Stdio has exactly one
/// session; the HTTP transport calls it for every new client session.
pub async fn serve<S, F>(transport: Transport, factory: F, http: &HttpConfig) -> anyhow::Result<()>
where
    S: ServerHandler,
    F: Fn() -> Result<S, std::io::Error> + Send + Sync + 'static,
{
    tracing::info!(transport = transport.as_str(), "Starting MCP transport");

    match transport {
        Transport::Stdio => serve_stdio(factory()?).await,
        Transport::Sse => serve_http(factory, http).await,
    }
}

/// Serve a single session over stdin/stdout
pub async fn serve_stdio<S: ServerHandler>(server: S) -> anyhow::Result<()> {
    let service = server
        .serve(stdio())
        .await
        .context("Failed to start stdio transport")?;

    tracing::info!("Server running on stdio, waiting for requests...");

    let reason = service.waiting().await?;

    tracing::info!(?reason, "Stdio session ended");
    Ok(())
}

/// Serve streamable HTTP sessions until Ctrl-C
pub async fn serve_http<S, F>(factory: F, config: &HttpConfig) -> anyhow::Result<()>
where
    S: ServerHandler,
    F: Fn() -> Result<S, std::io::Error> + Send + Sync + 'static,
{
    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    serve_http_on(listener, factory, &config.path, shutdown_signal()).await
}

/// Serve streamable HTTP sessions on an already bound listener
///
/// Returns once `shutdown` resolves and open connections have drained.
pub async fn serve_http_on<S, F, Sd>(
    listener: tokio::net::TcpListener,
    factory: F,
    path: &str,
    shutdown: Sd,
) -> anyhow::Result<()>
where
    S: ServerHandler,
    F: Fn() -> Result<S, std::io::Error> + Send + Sync + 'static,
    Sd: std::future::Future<Output = ()> + Send + 'static,
{
    let service = StreamableHttpService::new(
        factory,
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    // axum refuses to nest at the root
    let router = if path.trim_end_matches('/').is_empty() {
        axum::Router::new().fallback_service(service)
    } else {
        axum::Router::new().nest_service(path, service)
    };

    tracing::info!("Serving MCP on http://{}{}", listener.local_addr()?, path);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("HTTP transport stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn test_transport_default_is_sse() {
        assert_eq!(Transport::default(), Transport::Sse);
        assert_eq!(Transport::default().as_str(), "sse");
    }

    #[test]
    fn test_transport_value_names() {
        assert_eq!(Transport::from_str("stdio", false).unwrap(), Transport::Stdio);
        assert_eq!(Transport::from_str("sse", false).unwrap(), Transport::Sse);
        assert!(Transport::from_str("websocket", false).is_err());
    }

    #[test]
    fn test_http_config_partial() {
        #[derive(Deserialize)]
        struct Wrapper {
            server: HttpConfig,
        }

        let parsed: Wrapper =
            serde_json::from_str(r#"{"server": {"bind": "0.0.0.0:9000"}}"#).unwrap();
        assert_eq!(parsed.server.bind, "0.0.0.0:9000");
        assert_eq!(parsed.server.path, "/mcp");
    }

    #[derive(Clone)]
    struct BareServer;

    impl ServerHandler for BareServer {}

    const INITIALIZE: &str = r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26","capabilities":{},"clientInfo":{"name":"transport-test","version":"0.0.0"}}}"#;

    #[tokio::test]
    async fn test_http_initialize_over_sse() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();

        let server = tokio::spawn(serve_http_on(
            listener,
            || Ok(BareServer),
            "/mcp",
            async move {
                let _ = stop_rx.await;
            },
        ));

        let client = reqwest::Client::new();
        let mut response = client
            .post(format!("http://{}/mcp", addr))
            .header("content-type", "application/json")
            .header("accept", "application/json, text/event-stream")
            .body(INITIALIZE)
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert!(response.headers().contains_key("mcp-session-id"));
        let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/event-stream"), "{}", content_type);

        // The initialize result arrives as an SSE data event
        let mut body = String::new();
        let read = tokio::time::timeout(std::time::Duration::from_secs(5), async {
            while let Some(chunk) = response.chunk().await.unwrap() {
                body.push_str(&String::from_utf8_lossy(&chunk));
                if body.contains("protocolVersion") {
                    break;
                }
            }
        })
        .await;
        assert!(read.is_ok(), "no initialize result within 5s: {}", body);
        assert!(body.contains("data:"));
        assert!(body.contains("\"id\":1"));

        drop(response);
        let _ = stop_tx.send(());
        server.abort();
    }

    #[tokio::test]
    async fn test_http_unknown_path_is_not_found() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(serve_http_on(
            listener,
            || Ok(BareServer),
            "/mcp",
            std::future::pending::<()>(),
        ));

        let response = reqwest::Client::new()
            .post(format!("http://{}/sse", addr))
            .header("content-type", "application/json")
            .body(INITIALIZE)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 404);

        server.abort();
    }
}
