//! HTTP Catalog
//!
//! Client for the marketplace's vehicle endpoints.

use reqwest::{Client, Response, StatusCode, Url};
use serde_json::Value;

use crate::{
    catalog::{Catalog, CatalogError},
    config::{CatalogConfig, resolve_token},
    products::Product,
};

/// Path of the vehicle collection, relative to the API base URL.
pub const VEHICLES_PATH: &str = "/api/veiculos";

/// Catalog backed by the marketplace API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    base_url: String,
    token: Option<String>,
    http: Client,
}

impl HttpCatalog {
    /// Create a client from the given configuration.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            base_url: config.base_url().to_owned(),
            token: config.token(),
            http: Client::new(),
        }
    }

    /// Prefer a token from the shopper's session over the configured one.
    #[must_use]
    pub fn with_session_token(mut self, stored: Option<&str>) -> Self {
        self.token = resolve_token(stored, self.token.as_deref());
        self
    }

    /// Whether requests will carry a bearer token.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Vehicle collection URL, or the URL of one vehicle with `id` encoded as
    /// a single path segment.
    fn vehicles_url(&self, id: Option<&str>) -> Result<Url, CatalogError> {
        let mut url = Url::parse(&self.url(VEHICLES_PATH))
            .map_err(|err| CatalogError::InvalidUrl(err.to_string()))?;

        if let Some(id) = id {
            url.path_segments_mut()
                .map_err(|()| CatalogError::InvalidUrl(self.base_url.clone()))?
                .push(id);
        }

        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<Response, CatalogError> {
        let mut request = self.http.get(url);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(CatalogError::Unauthorized),
            status => Err(CatalogError::Status(status.as_u16())),
        }
    }
}

impl Catalog for HttpCatalog {
    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        let body: Value = self.get(self.vehicles_url(None)?).await?.json().await?;

        // Anything but an array is treated as an empty listing.
        if body.is_array() {
            Ok(serde_json::from_value(body)?)
        } else {
            Ok(Vec::new())
        }
    }

    async fn product(&self, id: &str) -> Result<Product, CatalogError> {
        let response = self
            .get(self.vehicles_url(Some(id))?)
            .await
            .map_err(|err| match err {
                CatalogError::Status(404) => CatalogError::NotFound(id.to_owned()),
                other => other,
            })?;

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use testresult::TestResult;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    use crate::catalog::{fetch_all_products, fetch_product};

    use super::*;

    const UNO_JSON: &str = r#"[{"id":"1","brand":"Fiat","modelName":"Uno","year":2020,"type":"Hatch","value":3000000}]"#;

    /// Answer a single request with a canned response. The task yields the
    /// request head that was received.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> TestResult<(CatalogConfig, JoinHandle<io::Result<String>>)> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let config = CatalogConfig::new(format!("http://{}", listener.local_addr()?));

        let server = tokio::spawn(async move {
            let (mut socket, _peer) = listener.accept().await?;

            let mut head = Vec::new();
            let mut buf = [0_u8; 1024];

            while !head.windows(4).any(|window| window == b"\r\n\r\n") {
                let read = socket.read(&mut buf).await?;

                if read == 0 {
                    break;
                }

                head.extend_from_slice(buf.get(..read).unwrap_or_default());
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );

            socket.write_all(response.as_bytes()).await?;
            socket.shutdown().await?;

            Ok::<_, io::Error>(String::from_utf8_lossy(&head).into_owned())
        });

        Ok((config, server))
    }

    #[test]
    fn urls_never_double_slash() {
        let catalog = HttpCatalog::new(&CatalogConfig::new("https://cars.example.com///"));

        assert_eq!(
            catalog.url(VEHICLES_PATH),
            "https://cars.example.com/api/veiculos"
        );
    }

    #[test]
    fn vehicle_ids_are_encoded_as_one_segment() -> TestResult {
        let catalog = HttpCatalog::new(&CatalogConfig::new("https://cars.example.com/"));

        assert_eq!(
            catalog.vehicles_url(Some("a/b?c#d"))?.as_str(),
            "https://cars.example.com/api/veiculos/a%2Fb%3Fc%23d"
        );
        assert_eq!(
            catalog.vehicles_url(None)?.as_str(),
            "https://cars.example.com/api/veiculos"
        );

        Ok(())
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        let catalog = HttpCatalog::new(&CatalogConfig::new("not a url"));

        assert!(matches!(
            catalog.vehicles_url(None),
            Err(CatalogError::InvalidUrl(_))
        ));
    }

    #[test]
    fn session_token_wins() {
        let config = CatalogConfig::new("http://localhost").with_user_token("from-env");

        let catalog = HttpCatalog::new(&config).with_session_token(Some("from-session"));

        assert_eq!(catalog.token.as_deref(), Some("from-session"));
    }

    #[test]
    fn undefined_session_token_falls_back() {
        let config = CatalogConfig::new("http://localhost").with_user_token("from-env");

        let catalog = HttpCatalog::new(&config).with_session_token(Some("undefined"));

        assert_eq!(catalog.token.as_deref(), Some("from-env"));
    }

    #[test]
    fn no_token_configured() {
        let catalog = HttpCatalog::new(&CatalogConfig::new("http://localhost"));

        assert!(!catalog.has_token());
    }

    #[tokio::test]
    async fn unreachable_api_degrades() {
        let catalog = HttpCatalog::new(&CatalogConfig::new("http://127.0.0.1:1"));

        assert!(fetch_all_products(&catalog).await.is_empty());
        assert!(fetch_product(&catalog, "1").await.is_none());
    }

    #[tokio::test]
    async fn missing_vehicle_is_not_found() -> TestResult {
        let (config, server) = serve_once("404 Not Found", "{}").await?;

        let result = HttpCatalog::new(&config).product("9").await;
        let head = server.await??;

        assert!(matches!(result, Err(CatalogError::NotFound(id)) if id == "9"));
        assert!(head.starts_with("GET /api/veiculos/9 "), "request: {head}");

        Ok(())
    }

    #[tokio::test]
    async fn rejected_token_is_unauthorized() -> TestResult {
        let (config, server) = serve_once("401 Unauthorized", "{}").await?;

        let result = HttpCatalog::new(&config.with_user_token("secret"))
            .products()
            .await;
        let head = server.await??.to_ascii_lowercase();

        assert!(matches!(result, Err(CatalogError::Unauthorized)));
        assert!(head.contains("authorization: bearer secret"), "request: {head}");

        Ok(())
    }

    #[tokio::test]
    async fn server_error_keeps_status() -> TestResult {
        let (config, server) = serve_once("500 Internal Server Error", "{}").await?;

        let result = HttpCatalog::new(&config).products().await;
        server.await??;

        assert!(matches!(result, Err(CatalogError::Status(500))));

        Ok(())
    }

    #[tokio::test]
    async fn non_array_listing_is_empty() -> TestResult {
        let (config, server) = serve_once("200 OK", r#"{"data":[]}"#).await?;

        let products = HttpCatalog::new(&config).products().await?;
        server.await??;

        assert!(products.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn array_listing_parses() -> TestResult {
        let (config, server) = serve_once("200 OK", UNO_JSON).await?;

        let products = HttpCatalog::new(&config).products().await?;
        let head = server.await??;

        assert!(head.starts_with("GET /api/veiculos "), "request: {head}");
        assert_eq!(products.len(), 1);
        assert_eq!(
            products.first().map(Product::display_name).as_deref(),
            Some("Fiat Uno")
        );

        Ok(())
    }

    #[tokio::test]
    async fn encoded_id_reaches_the_server() -> TestResult {
        let (config, server) = serve_once("404 Not Found", "{}").await?;

        let result = HttpCatalog::new(&config).product("a/b").await;
        let head = server.await??;

        assert!(matches!(result, Err(CatalogError::NotFound(id)) if id == "a/b"));
        assert!(head.starts_with("GET /api/veiculos/a%2Fb "), "request: {head}");

        Ok(())
    }
}
