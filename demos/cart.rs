//! Cart Example
//!
//! Fills a cart from the vehicle catalog and prints its summary.
//!
//! Use `-f` to load a fixture set by name
//! Use `-a` to add a vehicle by id (repeat to add several, or the same id to merge)
//! Use `-q` to set the quantity added for each id
//! Use `--remote` to fetch vehicles from the marketplace API (`AUTOCART_API_URL`)

use std::io;

use anyhow::Result;

use autocart::{
    cart::CartStore,
    catalog::{Catalog, FixtureCatalog, HttpCatalog, fetch_product},
    config::{LogFormat, LoggingConfig},
    summary::CartSummary,
    utils::ExampleCartArgs,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Cart Example
#[tokio::main]
pub async fn main() -> Result<()> {
    let args = ExampleCartArgs::load()?;

    init_logging(&args.logging)?;

    let mut store = CartStore::new();

    if args.remote {
        fill(&mut store, &HttpCatalog::new(&args.catalog), &args).await;
    } else {
        fill(&mut store, &FixtureCatalog::from_set(&args.fixture)?, &args).await;
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    CartSummary::new(store.cart()).write_to(&mut handle)?;

    Ok(())
}

async fn fill(store: &mut CartStore, catalog: &impl Catalog, args: &ExampleCartArgs) {
    for id in &args.add {
        if let Some(product) = fetch_product(catalog, id).await {
            store.add_quantity(product, args.quantity);
        }
    }

    info!(
        requested = args.add.len(),
        lines = store.cart().len(),
        "cart filled"
    );
}

fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact().with_target(true))
            .try_init()?,
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()?,
    }

    Ok(())
}
