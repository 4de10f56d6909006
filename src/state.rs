//! Application State
//!
//! Read-only state shared by every request: the catalog client, the tool
//! registry and the configured payload shape.

use std::sync::Arc;

use crate::catalog::{CatalogClient, CatalogError};
use crate::config::{CatalogConfig, ResponseShape};
use crate::mcp::tools::ToolRegistry;

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub catalog: CatalogClient,
    pub tools: ToolRegistry,
    pub shape: ResponseShape,
}

impl AppState {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let shape = config.shape;
        Ok(Self {
            catalog: CatalogClient::new(config)?,
            tools: ToolRegistry::builtin(),
            shape,
        })
    }
}
