//! Catalog
//!
//! Sources of vehicle listings. A [`Catalog`] reports failures as
//! [`CatalogError`]s; the cart never sees them, because callers go through
//! [`fetch_all_products`] and [`fetch_product`], which log the failure and
//! degrade to an empty list or `None`.

use thiserror::Error;
use tracing::{error, warn};

use crate::products::Product;

pub mod fixture;
#[cfg(feature = "http")]
pub mod http;

pub use fixture::FixtureCatalog;
#[cfg(feature = "http")]
pub use http::HttpCatalog;

/// Errors raised while fetching listings.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No listing with the given id.
    #[error("vehicle {0} not found")]
    NotFound(String),

    /// The token was missing or rejected.
    #[error("missing or invalid token")]
    Unauthorized,

    /// Unexpected HTTP status.
    #[error("unexpected status {0}")]
    Status(u16),

    /// The configured base URL cannot address the vehicle endpoints.
    #[error("invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Transport failure.
    #[cfg(feature = "http")]
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed JSON payload.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read a fixture file.
    #[error("failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed YAML fixture.
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// A source of vehicle listings.
pub trait Catalog {
    /// Fetch every listing.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the listings could not be fetched.
    async fn products(&self) -> Result<Vec<Product>, CatalogError>;

    /// Fetch a single listing by backend id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no listing has this id, or another
    /// [`CatalogError`] if the lookup failed.
    async fn product(&self, id: &str) -> Result<Product, CatalogError>;
}

/// Fetch every listing, or an empty list if the catalog fails.
pub async fn fetch_all_products(catalog: &impl Catalog) -> Vec<Product> {
    match catalog.products().await {
        Ok(products) => products,
        Err(CatalogError::Unauthorized) => {
            warn!("missing or invalid token while listing vehicles; check login or AUTOCART_USER_TOKEN");

            Vec::new()
        }
        Err(err) => {
            error!(error = %err, "failed to fetch vehicle list");

            Vec::new()
        }
    }
}

/// Fetch one listing, or `None` if it is missing or the catalog fails.
pub async fn fetch_product(catalog: &impl Catalog, id: &str) -> Option<Product> {
    match catalog.product(id).await {
        Ok(product) => Some(product),
        Err(CatalogError::NotFound(_)) => {
            warn!(id, "vehicle not found");

            None
        }
        Err(CatalogError::Unauthorized) => {
            warn!(id, "missing or invalid token while fetching vehicle; check authentication");

            None
        }
        Err(err) => {
            error!(id, error = %err, "failed to fetch vehicle");

            None
        }
    }
}
