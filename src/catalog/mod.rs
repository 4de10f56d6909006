//! Catalog Domain Module
//!
//! Everything that talks to the upstream catalog site:
//! - Domain models (products, episodes, pagination, inputs)
//! - HTTP client and its error type
//! - Product search (single page and multi-page aggregation)
//! - Episode query (filters and field projection)
//! - Payload shaping and the auxiliary REST handlers

pub mod client;
pub mod episodes;
pub mod error;
pub mod handlers;
pub mod helpers;
pub mod models;
pub mod products;
pub mod shape;

// Re-export commonly used types for convenience
pub use client::CatalogClient;
pub use error::CatalogError;
pub use handlers::routes;
