//! Autocart prelude.
//!
//! Convenience exports for common library consumers.

#[cfg(feature = "http")]
pub use crate::catalog::HttpCatalog;
pub use crate::{
    cart::{
        Cart, CartCommand, CartEvent, CartEventKind, CartObserver, CartStore, LineItem,
        SharedCartStore, SubscriptionKey, Transition,
    },
    catalog::{Catalog, CatalogError, FixtureCatalog, fetch_all_products, fetch_product},
    config::{CatalogConfig, LogFormat, LoggingConfig},
    notifications::{
        Dispatcher, NoopSink, NotificationError, NotificationSink, RecordingSink, TracingSink,
    },
    pricing::{brl, format_brl},
    products::{Product, ProductKey, resolve_key},
    summary::{CartSummary, SummaryError},
};
