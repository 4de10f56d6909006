//! Wild Kratts MCP Library
//!
//! Bridges line-delimited or HTTP JSON-RPC (MCP tool calling) to the Wild
//! Kratts catalog site's product and episode endpoints.

// Domain modules
pub mod catalog;
pub mod mcp;

// Infrastructure
pub mod config;
pub mod router;
pub mod state;
