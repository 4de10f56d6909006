//! MCP Tool Registry
//!
//! Tools are looked up by name in a single table shared by every transport.
//! Each entry carries its listing metadata and an async handler.

use std::collections::HashMap;

use futures_util::future::{BoxFuture, FutureExt};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};

use super::error::RpcError;
use super::helpers::{payload_result, text_result};
use super::models::tool_names;
use crate::catalog::models::{EpisodesInput, ProductsInput};
use crate::catalog::{episodes, products, shape};
use crate::state::AppState;

/// Result type for tool execution
pub type ToolResult = Result<Value, RpcError>;

/// Tool handler function type
pub type ToolHandler = for<'a> fn(&'a AppState, Value) -> BoxFuture<'a, ToolResult>;

/// A registered tool with metadata and handler
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: fn() -> Value,
    pub handler: ToolHandler,
}

/// Name-keyed tool table. Listing order is registration order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<ToolSpec>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the map placeholders and the catalog tools.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(ToolSpec {
            name: tool_names::VIEW_LOCATION,
            description: "View a specific geographical location",
            input_schema: || {
                object_schema(
                    json!({ "query": { "type": "string", "description": "Location to view" } }),
                    &["query"],
                )
            },
            handler: view_location,
        });
        registry.register(ToolSpec {
            name: tool_names::SEARCH_PLACES,
            description: "Search for places near a location",
            input_schema: || {
                object_schema(
                    json!({ "search": { "type": "string", "description": "Search query for places" } }),
                    &["search"],
                )
            },
            handler: search_places,
        });
        registry.register(ToolSpec {
            name: tool_names::DIRECTIONS,
            description: "Get directions from origin to destination",
            input_schema: || {
                object_schema(
                    json!({
                        "origin": { "type": "string", "description": "Starting location" },
                        "destination": { "type": "string", "description": "Destination location" }
                    }),
                    &["origin", "destination"],
                )
            },
            handler: directions,
        });
        registry.register(ToolSpec {
            name: tool_names::PRODUCTS,
            description: "Fetch Wild Kratts products with search and filtering capabilities",
            input_schema: || {
                object_schema(
                    json!({
                        "searchTerm": { "type": "string", "description": "Search term to find products" },
                        "category": { "type": "string", "description": "Product category filter" },
                        "page": { "type": "integer", "description": "Page number for pagination", "default": 1 }
                    }),
                    &[],
                )
            },
            handler: get_products,
        });
        registry.register(ToolSpec {
            name: tool_names::EPISODES,
            description: "Fetch Wild Kratts episodes with filtering options",
            input_schema: || {
                object_schema(
                    json!({
                        "seasonNumber": { "type": "integer", "description": "Filter by season number" },
                        "episodeTitle": { "type": "string", "description": "Filter by episode title (partial match)" },
                        "animalsFeatured": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Filter by animals featured"
                        },
                        "fields": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Specific fields to return for efficiency"
                        }
                    }),
                    &[],
                )
            },
            handler: get_episodes,
        });
        registry
    }

    /// Registers a tool, replacing any previous one with the same name.
    pub fn register(&mut self, spec: ToolSpec) {
        match self.index.get(spec.name) {
            Some(&slot) => self.tools[slot] = spec,
            None => {
                self.index.insert(spec.name, self.tools.len());
                self.tools.push(spec);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.index.get(name).map(|&slot| &self.tools[slot])
    }

    /// Tool definitions for `tools/list`.
    pub fn definitions(&self) -> Vec<Value> {
        self.tools
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "inputSchema": (tool.input_schema)(),
                })
            })
            .collect()
    }

    /// Short listing (name, description, argument names) for `GET /tools`.
    pub fn summaries(&self) -> Vec<Value> {
        self.tools
            .iter()
            .map(|tool| {
                let schema = (tool.input_schema)();
                let parameters: Vec<&String> = schema["properties"]
                    .as_object()
                    .map(|props| props.keys().collect())
                    .unwrap_or_default();
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "parameters": parameters,
                })
            })
            .collect()
    }

    /// Runs the named tool.
    pub async fn call(&self, state: &AppState, name: &str, args: Value) -> ToolResult {
        let tool = self
            .get(name)
            .ok_or_else(|| RpcError::UnknownTool(name.to_string()))?;
        (tool.handler)(state, args).await
    }
}

fn object_schema(properties: Value, required: &[&str]) -> Value {
    let mut schema = json!({ "type": "object", "properties": properties });
    if !required.is_empty() {
        schema["required"] = json!(required);
    }
    schema
}

/// Decodes tool arguments; a missing or `null` argument object means "no arguments".
fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, RpcError> {
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|e| RpcError::Internal(format!("Invalid arguments: {e}")))
}

// =============================================================================
// Map Placeholders
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LocationInput {
    query: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchInput {
    search: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DirectionsInput {
    origin: String,
    destination: String,
}

fn view_location(_state: &AppState, args: Value) -> BoxFuture<'_, ToolResult> {
    async move {
        let input: LocationInput = parse_args(args)?;
        Ok(text_result(format!(
            "Information for location: {} would be processed.",
            input.query
        )))
    }
    .boxed()
}

fn search_places(_state: &AppState, args: Value) -> BoxFuture<'_, ToolResult> {
    async move {
        let input: SearchInput = parse_args(args)?;
        Ok(text_result(format!(
            "Search results for: {} would be processed.",
            input.search
        )))
    }
    .boxed()
}

fn directions(_state: &AppState, args: Value) -> BoxFuture<'_, ToolResult> {
    async move {
        let input: DirectionsInput = parse_args(args)?;
        Ok(text_result(format!(
            "Directions from {} to {} would be processed.",
            input.origin, input.destination
        )))
    }
    .boxed()
}

// =============================================================================
// Catalog Tools
// =============================================================================

fn get_products(state: &AppState, args: Value) -> BoxFuture<'_, ToolResult> {
    async move {
        let input: ProductsInput = parse_args(args)?;
        let result = products::search_products(&state.catalog, input).await;
        Ok(payload_result(shape::products_payload(&result, state.shape)))
    }
    .boxed()
}

fn get_episodes(state: &AppState, args: Value) -> BoxFuture<'_, ToolResult> {
    async move {
        let input: EpisodesInput = parse_args(args)?;
        let result = episodes::query_episodes(&state.catalog, input).await;
        Ok(payload_result(shape::episodes_payload(&result, state.shape)))
    }
    .boxed()
}
