//! Fixture Catalog
//!
//! Listings loaded from YAML files laid out as `<base>/products/<name>.yml`:
//!
//! ```yaml
//! products:
//!   - id: "1"
//!     brand: Fiat
//!     modelName: Uno
//!     year: 2020
//!     type: Hatch
//!     value: 3000000
//! ```

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    catalog::{Catalog, CatalogError},
    products::Product,
};

/// Default directory fixture sets are loaded from.
pub const DEFAULT_FIXTURE_PATH: &str = "./fixtures";

#[derive(Debug, Deserialize)]
struct ProductsFixture {
    products: Vec<Product>,
}

/// In-memory catalog, usually loaded from a fixture file.
#[derive(Debug, Clone, Default)]
pub struct FixtureCatalog {
    products: Vec<Product>,

    /// Backend id -> index of the first listing carrying it
    by_id: FxHashMap<String, usize>,
}

impl FixtureCatalog {
    /// Create a catalog from listings.
    pub fn new(products: impl Into<Vec<Product>>) -> Self {
        let products = products.into();
        let mut by_id = FxHashMap::default();

        for (idx, product) in products.iter().enumerate() {
            if let Some(id) = product.id.as_deref().filter(|id| !id.trim().is_empty()) {
                by_id.entry(id.to_owned()).or_insert(idx);
            }
        }

        Self { products, by_id }
    }

    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Yaml`] if the document is malformed.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: ProductsFixture = serde_norway::from_str(yaml)?;

        Ok(Self::new(fixture.products))
    }

    /// Load `<base_path>/products/<name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(base_path: impl AsRef<Path>, name: &str) -> Result<Self, CatalogError> {
        let file_path = base_path
            .as_ref()
            .join("products")
            .join(format!("{name}.yml"));

        let contents = fs::read_to_string(&file_path)?;

        Self::from_yaml(&contents)
    }

    /// Load a fixture set from [`DEFAULT_FIXTURE_PATH`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_set(name: &str) -> Result<Self, CatalogError> {
        Self::load(DEFAULT_FIXTURE_PATH, name)
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no listings.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Catalog for FixtureCatalog {
    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.clone())
    }

    async fn product(&self, id: &str) -> Result<Product, CatalogError> {
        self.by_id
            .get(id)
            .and_then(|&idx| self.products.get(idx))
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_owned()))
    }
}
