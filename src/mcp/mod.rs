//! Model Context Protocol (MCP) Module
//!
//! This module contains all MCP protocol implementation, including:
//! - Protocol models (JsonRpcRequest, constants)
//! - Error taxonomy and envelope helpers
//! - Tool registry (map placeholders, catalog tools)
//! - Dispatch plus the HTTP, stdio and proxy transports

pub mod error;
pub mod handlers;
pub mod helpers;
pub mod models;
pub mod proxy;
pub mod stdio;
pub mod tools;

// Re-export commonly used types and functions
pub use handlers::{dispatch, routes};
