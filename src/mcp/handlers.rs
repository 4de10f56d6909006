//! MCP (Model Context Protocol) route handlers
//!
//! Decoding, method dispatch and the HTTP transport. `dispatch` is shared
//! with the stdio transport so both answer identically.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use futures_util::FutureExt;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use super::error::RpcError;
use super::helpers::{rpc_failure, rpc_success};
use super::models::{methods, JsonRpcRequest, ToolCallParams, PROTOCOL_VERSION, SERVER_NAME};
use crate::catalog::handlers::service_info;
use crate::state::{AppState, SharedState};

/// Creates routes for MCP-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", post(handle_mcp).get(service_info)) // Root endpoint
        .route("/mcp", post(handle_mcp).get(handle_mcp_sse)) // Standard endpoint
        .route("/mcp/", post(handle_mcp).get(handle_mcp_sse)) // Trailing slash safety
}

/// Handle SSE (Server-Sent Events) handshake for GET requests
async fn handle_mcp_sse() -> impl IntoResponse {
    (
        [("content-type", "text/event-stream")],
        "event: endpoint\ndata: /mcp\n\n",
    )
}

/// Endpoint: POST /mcp (also / and /mcp/)
/// Handles the Model Context Protocol communication for POST requests.
async fn handle_mcp(State(state): State<SharedState>, body: Bytes) -> Response {
    match decode_request(&body) {
        Ok(req) => Json(dispatch(&state, req).await).into_response(),
        Err(err) => (StatusCode::BAD_REQUEST, Json(rpc_failure(None, &err))).into_response(),
    }
}

/// Decodes one request object. Nothing is dispatched when this fails.
pub fn decode_request(bytes: &[u8]) -> Result<JsonRpcRequest, RpcError> {
    serde_json::from_slice(bytes).map_err(|e| {
        error!("JSON Parse Error: {}", e);
        RpcError::from(e)
    })
}

/// Routes a decoded request and wraps the outcome in an envelope that echoes
/// the request identifier. Panics in a handler become internal errors.
pub async fn dispatch(state: &AppState, req: JsonRpcRequest) -> Value {
    let id = req.id.clone();
    let method = req.method.clone();

    let outcome = AssertUnwindSafe(route(state, req))
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(RpcError::Internal(panic_message(panic.as_ref()))));

    match outcome {
        Ok(result) => rpc_success(id, result),
        Err(err) => {
            warn!(method = %method, code = err.code(), "{}", err);
            rpc_failure(id, &err)
        }
    }
}

async fn route(state: &AppState, req: JsonRpcRequest) -> Result<Value, RpcError> {
    info!(method = %req.method, id = ?req.id, "MCP Call");

    match req.method.as_str() {
        methods::INITIALIZE => Ok(initialize_result()),
        methods::INITIALIZED | methods::PING => Ok(json!({})),
        methods::TOOLS_LIST => Ok(json!({ "tools": state.tools.definitions() })),
        methods::TOOLS_CALL => {
            let params: ToolCallParams =
                serde_json::from_value(req.params.unwrap_or(Value::Null))
                    .map_err(|e| RpcError::Internal(format!("Invalid params: {e}")))?;
            state
                .tools
                .call(state, &params.name, params.arguments)
                .await
        }
        other => Err(RpcError::MethodNotFound(other.to_string())),
    }
}

/// Result of the `initialize` handshake.
pub fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "handler panicked".to_string())
}
