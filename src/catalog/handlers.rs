//! REST API handlers for direct catalog access
//!
//! Thin convenience endpoints next to the MCP transport: service info,
//! health, tool summary, product and episode listings.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::helpers::split_list;
use super::models::{EpisodesInput, ProductsInput};
use super::{episodes, products, shape};
use crate::config::ResponseShape;
use crate::mcp::models::SERVICE_NAME;
use crate::state::SharedState;

/// Creates routes for catalog-related operations. `GET /` is registered by
/// the MCP router next to `POST /`.
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/health", get(health))
        .route("/tools", get(list_tools))
        .route("/products", get(get_products))
        .route("/episodes", get(get_episodes))
}

/// Query string of `GET /episodes`. List values are comma-separated.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EpisodesQuery {
    pub season_number: Option<i64>,
    pub episode_title: Option<String>,
    pub animals_featured: Option<String>,
    pub fields: Option<String>,
    /// Entries kept by the simple shape.
    pub limit: Option<usize>,
}

impl From<EpisodesQuery> for EpisodesInput {
    fn from(query: EpisodesQuery) -> Self {
        EpisodesInput {
            season_number: query.season_number,
            episode_title: query.episode_title,
            animals_featured: query.animals_featured.as_deref().map(split_list),
            fields: query.fields.as_deref().map(split_list),
        }
    }
}

/// Endpoint: GET /
pub async fn service_info() -> impl IntoResponse {
    Json(json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "health": "/health",
            "mcp": "/mcp",
            "tools": "/tools",
            "products": "/products",
            "episodes": "/episodes"
        }
    }))
}

/// Endpoint: GET /health
async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Endpoint: GET /tools
async fn list_tools(State(state): State<SharedState>) -> impl IntoResponse {
    Json(json!({ "tools": state.tools.summaries() }))
}

/// Endpoint: GET /products
async fn get_products(
    State(state): State<SharedState>,
    Query(input): Query<ProductsInput>,
) -> impl IntoResponse {
    let result = products::search_products(&state.catalog, input).await;
    Json(shape::products_payload(&result, state.shape))
}

/// Endpoint: GET /episodes
async fn get_episodes(
    State(state): State<SharedState>,
    Query(query): Query<EpisodesQuery>,
) -> impl IntoResponse {
    let limit = query.limit.unwrap_or(shape::SIMPLE_EPISODE_LIMIT);
    let result = episodes::query_episodes(&state.catalog, query.into()).await;
    let payload = match (state.shape, &result) {
        (ResponseShape::Simple, _) => shape::simplify_episodes(&result, limit),
        (ResponseShape::Full, Ok(list)) => json!({ "episodes": list }),
        (ResponseShape::Full, Err(_)) => shape::episodes_payload(&result, state.shape),
    };
    Json(payload)
}
