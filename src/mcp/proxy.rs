//! Stdio front end for a remote MCP HTTP endpoint.
//!
//! `initialize` is answered locally; tool methods are forwarded as JSON-RPC
//! POSTs and the remote envelope is returned unchanged.

use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use tokio::io::{self, BufReader};
use tracing::{debug, error, info};

use super::error::RpcError;
use super::handlers::{decode_request, initialize_result};
use super::helpers::{rpc_failure, rpc_success};
use super::models::{methods, JsonRpcRequest, JSONRPC_VERSION};
use super::stdio::serve_lines;

/// Forwards tool calls to a remote `/mcp` endpoint.
#[derive(Debug, Clone)]
pub struct McpProxy {
    client: Client,
    server_url: String,
}

impl McpProxy {
    pub fn new(server_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            server_url: server_url.into(),
        })
    }

    /// Runs the proxy over the process's stdin/stdout.
    pub async fn run(self) -> io::Result<()> {
        info!(server_url = %self.server_url, "Starting MCP proxy");
        serve_lines(BufReader::new(io::stdin()), io::stdout(), |line| {
            let proxy = self.clone();
            async move { proxy.handle_line(&line).await }
        })
        .await
    }

    /// Decodes and answers one line. Notifications produce no response.
    pub async fn handle_line(&self, line: &[u8]) -> Option<Value> {
        match decode_request(line) {
            Ok(req) if req.is_notification() => None,
            Ok(req) => Some(self.handle(req).await),
            Err(err) => Some(rpc_failure(None, &err)),
        }
    }

    pub async fn handle(&self, req: JsonRpcRequest) -> Value {
        debug!(method = %req.method, "proxy received request");
        match req.method.as_str() {
            methods::INITIALIZE => rpc_success(req.id, initialize_result()),
            methods::TOOLS_LIST | methods::TOOLS_CALL => self.forward(req).await,
            other => rpc_failure(req.id, &RpcError::MethodNotFound(other.to_string())),
        }
    }

    async fn forward(&self, req: JsonRpcRequest) -> Value {
        let body = json!({
            "jsonrpc": JSONRPC_VERSION,
            "id": req.id,
            "method": req.method,
            "params": req.params.unwrap_or_else(|| json!({})),
        });

        match self.post(&body).await {
            Ok(envelope) => envelope,
            Err(err) => {
                error!(method = %req.method, "{}", err);
                rpc_failure(req.id, &err)
            }
        }
    }

    async fn post(&self, body: &Value) -> Result<Value, RpcError> {
        let response = self
            .client
            .post(&self.server_url)
            .json(body)
            .send()
            .await
            .map_err(|e| RpcError::Internal(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(RpcError::Internal(format!(
                "HTTP {}: {}",
                status.as_u16(),
                text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| RpcError::Internal(format!("Request failed: {e}")))
    }
}
