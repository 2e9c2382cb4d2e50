//! Products

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::pricing::brl;

pub mod key;

pub use key::{ProductKey, resolve_key};

/// Vehicle listing as served by the marketplace catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Backend identifier. May be missing, empty or whitespace.
    #[serde(default)]
    pub id: Option<String>,

    /// Manufacturer, e.g. `"Fiat"`.
    pub brand: String,

    /// Model name, e.g. `"Uno"`.
    pub model_name: String,

    /// Model year
    pub year: u16,

    /// Body type (hatch, sedan, pickup...)
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Price in minor units (centavos).
    pub value: i64,
}

impl Product {
    /// Create a product without a backend identifier.
    pub fn new(
        brand: impl Into<String>,
        model_name: impl Into<String>,
        year: u16,
        value: i64,
    ) -> Self {
        Self {
            id: None,
            brand: brand.into(),
            model_name: model_name.into(),
            year,
            kind: String::new(),
            value,
        }
    }

    /// Set the backend identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the body type.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Name shown to shoppers: brand followed by model.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model_name)
    }

    /// Deduplication key of this product.
    pub fn key(&self) -> ProductKey {
        resolve_key(self)
    }

    /// Unit price in reais.
    pub fn price(&self) -> Money<'static, Currency> {
        brl(self.value)
    }
}
