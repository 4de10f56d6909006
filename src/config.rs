//! Runtime configuration shared by every transport.

use std::time::Duration;

/// Default upstream REST root for the catalog site.
pub const DEFAULT_BASE_URL: &str = "https://wildkratts.com/wp-json";
/// Default products page size, also the aggregation match cap.
pub const DEFAULT_PER_PAGE: u32 = 100;
/// Default per-request upstream timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How catalog payloads are shaped before they leave the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ResponseShape {
    /// Upstream objects reduced to the documented field subset.
    #[default]
    Full,
    /// Compact summaries (title strings, counts, truncated lists).
    Simple,
}

/// Settings for talking to the upstream catalog.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub per_page: u32,
    pub shape: ResponseShape,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            per_page: DEFAULT_PER_PAGE,
            shape: ResponseShape::Full,
        }
    }
}

impl CatalogConfig {
    /// Configuration pointing at a different upstream root, everything else default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn products_url(&self) -> String {
        format!("{}/wp/v2/products", self.base_url.trim_end_matches('/'))
    }

    pub fn episodes_url(&self) -> String {
        format!(
            "{}/wild-kratts/v1/episodes",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls_ignore_trailing_slash() {
        let config = CatalogConfig::with_base_url("http://localhost:9000/");
        assert_eq!(
            config.products_url(),
            "http://localhost:9000/wp/v2/products"
        );
        assert_eq!(
            config.episodes_url(),
            "http://localhost:9000/wild-kratts/v1/episodes"
        );
        assert_eq!(config.per_page, DEFAULT_PER_PAGE);
    }
}
