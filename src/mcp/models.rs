//! MCP Protocol Models and Constants
//!
//! Wire types and constants for JSON-RPC 2.0 and the Model Context Protocol.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// MCP Constants
// =============================================================================

/// Server identifier reported by `initialize`
pub const SERVER_NAME: &str = "wild-kratts-mcp-server";
/// Human readable service name for the REST endpoints
pub const SERVICE_NAME: &str = "Wild Kratts MCP Server";
/// Protocol version for MCP
pub const PROTOCOL_VERSION: &str = "2024-11-05";
/// JSON-RPC version string
pub const JSONRPC_VERSION: &str = "2.0";

pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const INITIALIZED: &str = "notifications/initialized";
    pub const TOOLS_LIST: &str = "tools/list";
    pub const TOOLS_CALL: &str = "tools/call";
    pub const PING: &str = "ping";

    pub const NOTIFICATION_PREFIX: &str = "notifications/";
}

pub mod tool_names {
    pub const VIEW_LOCATION: &str = "view_location_google_maps";
    pub const SEARCH_PLACES: &str = "search_google_maps";
    pub const DIRECTIONS: &str = "directions_on_google_maps";
    pub const PRODUCTS: &str = "get_wild_kratts_products";
    pub const EPISODES: &str = "get_wild_kratts_episodes";
}

// =============================================================================
// MCP Protocol Models
// =============================================================================

/// Standard JSON-RPC 2.0 Request envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version (should be "2.0")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,

    /// Method name to invoke
    pub method: String,

    /// Parameters for the method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,

    /// Request identifier, absent for notifications
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

impl JsonRpcRequest {
    /// A notification expects no response line.
    pub fn is_notification(&self) -> bool {
        self.id.is_none() && self.method.starts_with(methods::NOTIFICATION_PREFIX)
    }
}

/// `params` of a `tools/call` request
#[derive(Debug, Deserialize)]
pub struct ToolCallParams {
    pub name: String,

    #[serde(default)]
    pub arguments: Value,
}
