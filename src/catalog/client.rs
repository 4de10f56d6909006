//! HTTP access to the upstream catalog.

use reqwest::{header::HeaderMap, Client, Response};
use tracing::debug;

use super::error::CatalogError;
use super::models::{Episode, Product, ProductPage, TOTAL_ITEMS_HEADER, TOTAL_PAGES_HEADER};
use crate::config::CatalogConfig;

/// Thin wrapper over a `reqwest::Client` bound to one catalog root.
///
/// Every call is a single GET with the configured timeout and no retry.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    config: CatalogConfig,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("wild-kratts-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn per_page(&self) -> u32 {
        self.config.per_page
    }

    /// Fetches one page of the products listing.
    pub async fn fetch_products_page(&self, page: u32) -> Result<ProductPage, CatalogError> {
        debug!(page, per_page = self.config.per_page, "fetching products page");
        let response = self
            .client
            .get(self.config.products_url())
            .query(&[("per_page", self.config.per_page), ("page", page)])
            .send()
            .await?;
        let response = ensure_success(response)?;

        let raw_total_items = header_text(response.headers(), TOTAL_ITEMS_HEADER);
        let raw_total_pages = header_text(response.headers(), TOTAL_PAGES_HEADER);
        let products: Option<Vec<Product>> = response.json().await?;

        Ok(ProductPage {
            products: products.unwrap_or_default(),
            raw_total_items,
            raw_total_pages,
        })
    }

    /// Fetches the complete episode collection.
    pub async fn fetch_episodes(&self) -> Result<Vec<Episode>, CatalogError> {
        debug!("fetching episodes");
        let response = self
            .client
            .get(self.config.episodes_url())
            .send()
            .await?;
        let response = ensure_success(response)?;
        let episodes: Option<Vec<Episode>> = response.json().await?;
        Ok(episodes.unwrap_or_default())
    }
}

fn ensure_success(response: Response) -> Result<Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(CatalogError::Status(status.as_u16()))
    }
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .map(|raw| String::from_utf8_lossy(raw.as_bytes()).into_owned())
}
