//! JSON-RPC error taxonomy.

use thiserror::Error;

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INTERNAL_ERROR: i32 = -32603;

/// Failures surfaced to the client as JSON-RPC errors.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The input could not be decoded into a request. Carries the decoder message.
    #[error("Parse error")]
    Parse(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RpcError {
    pub fn code(&self) -> i32 {
        match self {
            RpcError::Parse(_) => PARSE_ERROR,
            RpcError::MethodNotFound(_) | RpcError::UnknownTool(_) => METHOD_NOT_FOUND,
            RpcError::Internal(_) => INTERNAL_ERROR,
        }
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(err: serde_json::Error) -> Self {
        RpcError::Parse(err.to_string())
    }
}
