//! Upstream catalog failures.

use thiserror::Error;

/// Anything that can go wrong while fetching from the catalog site.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The upstream answered with a non-success status.
    #[error("API request failed with status {0}")]
    Status(u16),

    /// Connection, timeout or body decoding failure.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// A pagination header was present but not an integer.
    #[error("invalid {name} header: {value:?}")]
    InvalidHeader { name: &'static str, value: String },
}
