//! Utils

use clap::Parser;

use crate::config::{CatalogConfig, LoggingConfig};

/// Arguments for the cart example
#[derive(Debug, Parser)]
#[command(name = "cart", about = "Fill a cart from the vehicle catalog", long_about = None)]
pub struct ExampleCartArgs {
    /// Fixture set to load vehicles from
    #[clap(short, long, default_value = "showroom")]
    pub fixture: String,

    /// Vehicle id to add; repeat to add several or to merge
    #[clap(short, long = "add")]
    pub add: Vec<String>,

    /// Quantity to add for each id
    #[clap(short, long, default_value_t = 1)]
    pub quantity: u32,

    /// Fetch vehicles from the marketplace API instead of the fixture set
    #[clap(long)]
    pub remote: bool,

    /// Catalog connection settings
    #[command(flatten)]
    pub catalog: CatalogConfig,

    /// Logging settings
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl ExampleCartArgs {
    /// Load arguments, reading a `.env` file first if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
