//! Payload shaping for catalog results.
//!
//! `Full` passes the search results through; `Simple` produces compact
//! summaries with flattened titles and truncated lists.

use serde_json::{json, Value};

use super::error::CatalogError;
use super::models::{
    Episode, ProductSearchResult, FIELD_AIR_DATE, FIELD_BROADCAST_NUMBER, FIELD_SEASON,
};
use crate::config::ResponseShape;

/// Episodes kept in a simplified listing unless the caller asks otherwise.
pub const SIMPLE_EPISODE_LIMIT: usize = 10;
/// Animals kept per simplified episode.
pub const SIMPLE_ANIMAL_LIMIT: usize = 5;

/// Product payload in the requested shape.
pub fn products_payload(result: &ProductSearchResult, shape: ResponseShape) -> Value {
    match shape {
        ResponseShape::Full => json!(result),
        ResponseShape::Simple => simplify_products(result),
    }
}

/// Episode payload in the requested shape.
///
/// The full shape is the bare episode list, or `{"error": ...}` on failure.
pub fn episodes_payload(result: &Result<Vec<Episode>, CatalogError>, shape: ResponseShape) -> Value {
    match (shape, result) {
        (ResponseShape::Simple, _) => simplify_episodes(result, SIMPLE_EPISODE_LIMIT),
        (ResponseShape::Full, Ok(episodes)) => json!(episodes),
        (ResponseShape::Full, Err(err)) => episodes_error(err),
    }
}

fn episodes_error(err: &CatalogError) -> Value {
    json!({ "error": format!("Error fetching episodes: {err}") })
}

pub fn simplify_products(result: &ProductSearchResult) -> Value {
    let products: Vec<Value> = result
        .products
        .iter()
        .map(|p| {
            json!({
                "id": p.id,
                "title": p.title_text(),
                "link": p.link.as_deref().unwrap_or(""),
                "categories": p.categories(),
            })
        })
        .collect();

    let mut payload = json!({
        "count": products.len(),
        "page": result.pagination.current_page,
        "products": products,
    });
    if let Some(error) = &result.error {
        payload["error"] = json!(error);
    }
    payload
}

/// Compact episode listing holding at most `limit` entries.
pub fn simplify_episodes(result: &Result<Vec<Episode>, CatalogError>, limit: usize) -> Value {
    match result {
        Ok(episodes) => {
            let episodes: Vec<Value> = episodes
                .iter()
                .take(limit)
                .map(simplify_episode)
                .collect();
            json!({ "count": episodes.len(), "episodes": episodes })
        }
        Err(err) => {
            let mut payload = episodes_error(err);
            payload["episodes"] = json!([]);
            payload["count"] = json!(0);
            payload
        }
    }
}

fn simplify_episode(episode: &Episode) -> Value {
    let animals: Vec<&str> = episode
        .animals()
        .unwrap_or_default()
        .into_iter()
        .take(SIMPLE_ANIMAL_LIMIT)
        .collect();
    json!({
        "season": episode.get(FIELD_SEASON),
        "episode_number": episode.get(FIELD_BROADCAST_NUMBER),
        "title": episode.title(),
        "air_date": episode.get(FIELD_AIR_DATE).and_then(Value::as_str).unwrap_or(""),
        "animals": animals,
    })
}
