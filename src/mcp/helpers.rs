//! MCP Protocol Helpers
//!
//! This module contains helper functions for JSON-RPC envelopes and
//! tool result content.

use serde_json::{json, Map, Value};

use super::error::RpcError;
use super::models::JSONRPC_VERSION;

/// Builds a JSON-RPC 2.0 success response.
///
/// # Arguments
///
/// * `id` – The request identifier that must be echoed back, if any.
/// * `result` – The payload representing the successful outcome.
pub fn rpc_success(id: Option<Value>, result: Value) -> Value {
    envelope(id, "result", result)
}

/// Builds a JSON-RPC 2.0 error response.
///
/// # Arguments
///
/// * `id` – The request identifier, `None` when the request could not be decoded.
/// * `code` – The JSON-RPC error code (e.g., -32601 for method not found).
/// * `message` – Human-readable description of the error.
pub fn rpc_error(id: Option<Value>, code: i32, message: impl Into<String>) -> Value {
    envelope(
        id,
        "error",
        json!({
            "code": code,
            "message": message.into(),
        }),
    )
}

/// Error envelope for a typed [`RpcError`].
pub fn rpc_failure(id: Option<Value>, err: &RpcError) -> Value {
    rpc_error(id, err.code(), err.to_string())
}

fn envelope(id: Option<Value>, key: &str, body: Value) -> Value {
    let mut map = Map::new();
    map.insert("jsonrpc".into(), json!(JSONRPC_VERSION));
    if let Some(id) = id {
        map.insert("id".into(), id);
    }
    map.insert(key.into(), body);
    Value::Object(map)
}

/// Tool result carrying a single text block.
pub fn text_result(text: impl Into<String>) -> Value {
    json!({
        "content": [{ "type": "text", "text": text.into() }]
    })
}

/// Tool result carrying a JSON payload.
///
/// The payload is serialized into the text block; objects are also exposed
/// as `structuredContent`.
pub fn payload_result(payload: Value) -> Value {
    let mut result = text_result(payload.to_string());
    if payload.is_object() {
        result["structuredContent"] = payload;
    }
    result
}
