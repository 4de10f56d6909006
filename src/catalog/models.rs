//! Catalog Domain Models
//!
//! Products and episodes as the upstream site serves them, plus the
//! inputs and payloads of the search operations built on top.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::CatalogError;

// =============================================================================
// Episode Field Names
// =============================================================================

pub const FIELD_SEASON: &str = "Season";
pub const FIELD_BROADCAST_NUMBER: &str = "Episode Number (Broadcast Order)";
pub const FIELD_TITLE: &str = "Episode Title";
pub const FIELD_AIR_DATE: &str = "Air Date";
pub const FIELD_ANIMALS: &str = "Animals Featured";

/// Episode keys a caller may project onto.
pub const EPISODE_FIELDS: [&str; 11] = [
    FIELD_SEASON,
    FIELD_BROADCAST_NUMBER,
    "Episode Number (Internal)",
    FIELD_TITLE,
    FIELD_AIR_DATE,
    "imagePath",
    "Summary",
    FIELD_ANIMALS,
    "Creature Powers",
    "Locations",
    "streamingUrls",
];

// =============================================================================
// Products
// =============================================================================

/// A product as listed upstream, reduced to the fields we pass on.
///
/// Every field is optional upstream; absent ones serialize as `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub link: Option<String>,
    /// WordPress-style rendered text (`{"rendered": "..."}`), kept as served.
    #[serde(default)]
    pub title: Option<Value>,
    /// HTML fragment.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub featured_image: Option<Value>,
    #[serde(default)]
    pub product_categories: Option<Vec<String>>,
    #[serde(default)]
    pub retailers: Option<Value>,
}

impl Product {
    pub fn title_text(&self) -> &str {
        self.title
            .as_ref()
            .and_then(|t| t.get("rendered"))
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    pub fn categories(&self) -> &[String] {
        self.product_categories.as_deref().unwrap_or(&[])
    }
}

pub const TOTAL_ITEMS_HEADER: &str = "X-WP-Total";
pub const TOTAL_PAGES_HEADER: &str = "X-WP-TotalPages";

/// One upstream page of products with the pagination headers that came with it.
///
/// Header values are kept raw and only parsed when a caller asks for them.
#[derive(Debug, Clone, Default)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub raw_total_items: Option<String>,
    pub raw_total_pages: Option<String>,
}

impl ProductPage {
    pub fn total_items(&self) -> Result<Option<u64>, CatalogError> {
        parse_total(TOTAL_ITEMS_HEADER, self.raw_total_items.as_deref())
    }

    pub fn total_pages(&self) -> Result<Option<u64>, CatalogError> {
        parse_total(TOTAL_PAGES_HEADER, self.raw_total_pages.as_deref())
    }
}

fn parse_total(name: &'static str, raw: Option<&str>) -> Result<Option<u64>, CatalogError> {
    raw.map(|value| {
        value.trim().parse().map_err(|_| CatalogError::InvalidHeader {
            name,
            value: value.to_string(),
        })
    })
    .transpose()
}

/// Window description attached to every product search result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_items: u64,
    pub total_pages: u64,
    pub items_per_page: u32,
}

/// Product search payload. `error` is set only on failure, with empty products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSearchResult {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

/// Arguments of the product search tool and REST endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductsInput {
    pub search_term: Option<String>,
    pub category: Option<String>,
    pub page: Option<u32>,
}

// =============================================================================
// Episodes
// =============================================================================

/// An episode exactly as served upstream.
///
/// The key set is upstream-defined, so the object is kept as-is and read
/// through the accessors below.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Episode(pub Map<String, Value>);

impl Episode {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn season(&self) -> Option<i64> {
        self.get(FIELD_SEASON).and_then(Value::as_i64)
    }

    pub fn title(&self) -> &str {
        self.get(FIELD_TITLE).and_then(Value::as_str).unwrap_or("")
    }

    /// Featured animals, or `None` when the upstream value is not a list.
    pub fn animals(&self) -> Option<Vec<&str>> {
        self.get(FIELD_ANIMALS)
            .and_then(Value::as_array)
            .map(|list| list.iter().filter_map(Value::as_str).collect())
    }
}

impl From<Value> for Episode {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Episode(map),
            _ => Episode::default(),
        }
    }
}

/// Arguments of the episode query tool.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EpisodesInput {
    pub season_number: Option<i64>,
    pub episode_title: Option<String>,
    pub animals_featured: Option<Vec<String>>,
    pub fields: Option<Vec<String>>,
}
