//! Product search over the paginated upstream listing.
//!
//! Without a search term this is a single page fetch. With one, the listing
//! is walked page by page until enough matches are collected or the pages
//! run out.

use tracing::{debug, warn};

use super::client::CatalogClient;
use super::error::CatalogError;
use super::helpers::{matches_category, matches_search_term, non_empty};
use super::models::{Pagination, Product, ProductSearchResult, ProductsInput};

/// Runs a product search. Failures come back inside the result, never as `Err`.
pub async fn search_products(client: &CatalogClient, input: ProductsInput) -> ProductSearchResult {
    let term = non_empty(input.search_term);
    let category = non_empty(input.category);
    let page = input.page.unwrap_or(1);
    let per_page = client.per_page();

    let outcome = match term.as_deref() {
        Some(term) => aggregate_matches(client, term, category.as_deref()).await,
        None => browse_page(client, page, category.as_deref()).await,
    };

    outcome.unwrap_or_else(|err| ProductSearchResult {
        error: Some(format!("Error fetching products: {err}")),
        products: Vec::new(),
        pagination: Pagination {
            current_page: if term.is_some() { 1 } else { page },
            total_items: 0,
            total_pages: 0,
            items_per_page: per_page,
        },
    })
}

/// Single page fetch, optionally narrowed by category. Pagination mirrors the
/// upstream headers, so totals describe the unfiltered listing.
async fn browse_page(
    client: &CatalogClient,
    page: u32,
    category: Option<&str>,
) -> Result<ProductSearchResult, CatalogError> {
    let fetched = client.fetch_products_page(page).await?;
    let total_items = fetched.total_items()?.unwrap_or(0);
    let total_pages = fetched.total_pages()?.unwrap_or(0);
    let products = fetched
        .products
        .into_iter()
        .filter(|p| matches_category(p, category))
        .collect();

    Ok(ProductSearchResult {
        error: None,
        products,
        pagination: Pagination {
            current_page: page,
            total_items,
            total_pages,
            items_per_page: client.per_page(),
        },
    })
}

/// Walks upstream pages from 1 collecting products that match `term`.
///
/// The walk bound comes from the first page's total-pages header; no other
/// header is read in this mode. A failure on page 1 fails the search; a
/// failure on a later page ends the walk and keeps what was already collected.
async fn aggregate_matches(
    client: &CatalogClient,
    term: &str,
    category: Option<&str>,
) -> Result<ProductSearchResult, CatalogError> {
    let per_page = client.per_page();
    let cap = per_page as usize;
    let mut matches: Vec<Product> = Vec::new();
    let mut current_page: u32 = 1;
    let mut total_pages: u64 = 1;

    while u64::from(current_page) <= total_pages && matches.len() < cap {
        let fetched = match client.fetch_products_page(current_page).await {
            Ok(fetched) => fetched,
            Err(err) if current_page == 1 => return Err(err),
            Err(err) => {
                warn!(page = current_page, error = %err, "stopping product walk early");
                break;
            }
        };

        if current_page == 1 {
            total_pages = fetched.total_pages()?.unwrap_or(1);
        }
        if fetched.products.is_empty() {
            break;
        }

        let before = matches.len();
        collect_matches(&mut matches, fetched.products, term, category, cap);
        debug!(
            page = current_page,
            total_pages,
            new_matches = matches.len() - before,
            "scanned products page"
        );

        current_page += 1;
    }

    let total_items = matches.len() as u64;
    Ok(ProductSearchResult {
        error: None,
        products: matches,
        pagination: Pagination {
            current_page: 1,
            total_items,
            total_pages: total_items.div_ceil(u64::from(per_page.max(1))).max(1),
            items_per_page: per_page,
        },
    })
}

/// Appends the products of one page that pass both filters, stopping at `cap`.
fn collect_matches(
    matches: &mut Vec<Product>,
    page: Vec<Product>,
    term: &str,
    category: Option<&str>,
    cap: usize,
) {
    for product in page {
        if matches.len() >= cap {
            break;
        }
        if matches_search_term(&product, term) && matches_category(&product, category) {
            matches.push(product);
        }
    }
}
