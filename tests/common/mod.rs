//! Shared fixtures: a mocked upstream catalog and app builders.
#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wild_kratts_mcp::config::{CatalogConfig, ResponseShape};
use wild_kratts_mcp::state::{AppState, SharedState};

pub const PRODUCTS_PATH: &str = "/wp/v2/products";
pub const EPISODES_PATH: &str = "/wild-kratts/v1/episodes";

/// Upstream-style product object, including a field we never pass on.
pub fn product(id: u64, title: &str, description: &str, categories: &[&str]) -> Value {
    json!({
        "id": id,
        "slug": format!("product-{id}"),
        "link": format!("https://shop.example/products/{id}"),
        "title": { "rendered": title },
        "description": description,
        "featured_image": format!("https://shop.example/img/{id}.png"),
        "product_categories": categories,
        "retailers": [{ "retailer_name": "PBS Shop", "product_url": "https://shop.example/buy" }]
    })
}

pub fn products_page(page: u32) -> wiremock::MockBuilder {
    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("page", page.to_string()))
}

pub fn page_response(total_items: u64, total_pages: u64, products: Vec<Value>) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("X-WP-Total", total_items.to_string().as_str())
        .insert_header("X-WP-TotalPages", total_pages.to_string().as_str())
        .set_body_json(Value::Array(products))
}

pub async fn mount_products_page(
    server: &MockServer,
    page: u32,
    total_items: u64,
    total_pages: u64,
    products: Vec<Value>,
) {
    products_page(page)
        .respond_with(page_response(total_items, total_pages, products))
        .expect(1)
        .mount(server)
        .await;
}

pub fn episodes() -> Value {
    json!([
        {
            "Season": 1,
            "Episode Number (Broadcast Order)": 1,
            "Episode Number (Internal)": 101,
            "Episode Title": "Whale of a Squid",
            "Air Date": "2011-01-03",
            "imagePath": "/img/whale.png",
            "Summary": "The Kratt brothers dive deep.",
            "Animals Featured": ["Sperm Whale", "Giant Squid"],
            "Creature Powers": [{ "power": "Echolocation", "used_by": "Martin" }],
            "Locations": ["Pacific Ocean"],
            "streamingUrls": { "PBS KIDS": "https://pbskids.example/whale" }
        },
        {
            "Season": 2,
            "Episode Number (Broadcast Order)": 7,
            "Episode Number (Internal)": 207,
            "Episode Title": "Otter Town",
            "Air Date": "2012-05-14",
            "imagePath": "/img/otter.png",
            "Summary": "River otters everywhere.",
            "Animals Featured": ["River Otter", "Red Panda"],
            "Creature Powers": [],
            "Locations": ["North America"],
            "streamingUrls": {}
        }
    ])
}

pub async fn mount_episodes(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(EPISODES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub fn config_for(server: &MockServer, per_page: u32) -> CatalogConfig {
    CatalogConfig {
        per_page,
        ..CatalogConfig::with_base_url(server.uri())
    }
}

pub fn state_for(server: &MockServer) -> SharedState {
    Arc::new(AppState::new(config_for(server, 100)).unwrap())
}

pub fn simple_state_for(server: &MockServer) -> SharedState {
    let config = CatalogConfig {
        shape: ResponseShape::Simple,
        ..config_for(server, 100)
    };
    Arc::new(AppState::new(config).unwrap())
}
