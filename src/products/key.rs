//! Product Keys
//!
//! Backend identifiers are not always present, so the cart identifies products
//! by a resolved key: the id when it has content, otherwise a composite of the
//! listing's brand, model, year and value. Listings without an id that agree on
//! all four fields resolve to the same key and share one cart line.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

use crate::products::Product;

/// Resolved deduplication key of a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductKey(String);

impl ProductKey {
    /// Wrap an already resolved key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ProductKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for ProductKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl PartialEq<str> for ProductKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ProductKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Resolve the deduplication key for a product.
///
/// Returns the id verbatim when it is non-blank after trimming, otherwise
/// `"{brand}-{model_name}-{year}-{value}"`.
pub fn resolve_key(product: &Product) -> ProductKey {
    match product.id.as_deref() {
        Some(id) if !id.trim().is_empty() => ProductKey(id.to_owned()),
        _ => ProductKey(format!(
            "{}-{}-{}-{}",
            product.brand, product.model_name, product.year, product.value
        )),
    }
}
