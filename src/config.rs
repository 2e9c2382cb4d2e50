//! Configuration
//!
//! Settings are read from CLI arguments with environment fallbacks.

use clap::Args;

/// Default marketplace API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost";

/// Marketplace catalog connection settings.
#[derive(Debug, Clone, Args)]
pub struct CatalogConfig {
    /// Marketplace API base URL
    #[arg(long, env = "AUTOCART_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Bearer token for the marketplace API
    #[arg(long, env = "AUTOCART_USER_TOKEN")]
    pub user_token: Option<String>,
}

impl CatalogConfig {
    /// Create a configuration for the given base URL, without a token.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            user_token: None,
        }
    }

    /// Set the configured token.
    #[must_use]
    pub fn with_user_token(mut self, token: impl Into<String>) -> Self {
        self.user_token = Some(token.into());
        self
    }

    /// Base URL without trailing slashes, ready to have paths appended.
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    /// Configured token, if usable.
    pub fn token(&self) -> Option<String> {
        resolve_token(None, self.user_token.as_deref())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

/// Pick the bearer token: a token stored in the shopper's session wins over the
/// configured one. Empty strings and the literal `"undefined"` count as absent.
pub fn resolve_token(stored: Option<&str>, configured: Option<&str>) -> Option<String> {
    stored
        .filter(|token| is_usable(token))
        .or_else(|| configured.filter(|token| is_usable(token)))
        .map(ToOwned::to_owned)
}

fn is_usable(token: &str) -> bool {
    !token.is_empty() && token != "undefined"
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}
