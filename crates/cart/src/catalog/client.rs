//! HTTP client for the product/stock service.
//!
//! The service is a plain JSON REST API: `GET /products/{id}` returns
//! the catalog record, `GET /stock/{id}` returns the stock level.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;
use url::Url;

use rocket_shoes_core::{Product, ProductId, StockLevel};

use super::{CatalogError, ProductGateway};
use crate::config::CatalogConfig;

/// HTTP implementation of [`ProductGateway`].
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API token is not a valid header value
    /// or the HTTP client fails to build.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.api_token {
            let auth_value = format!("Bearer {}", token.expose_secret());
            headers.insert(
                "Authorization",
                HeaderValue::from_str(&auth_value)
                    .map_err(|e| CatalogError::Parse(format!("invalid API token: {e}")))?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        // Url::join treats a base without a trailing slash as a file,
        // dropping the last path segment
        let mut base_url = config.base_url.clone();
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        Ok(Self { client, base_url })
    }

    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        id: ProductId,
    ) -> Result<T, CatalogError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| CatalogError::Parse(format!("invalid request path {path}: {e}")))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %message.chars().take(200).collect::<String>(),
                "catalog service returned non-success status"
            );
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

impl ProductGateway for CatalogClient {
    #[instrument(skip(self))]
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.fetch(&format!("products/{id}"), id).await
    }

    #[instrument(skip(self))]
    async fn stock(&self, id: ProductId) -> Result<StockLevel, CatalogError> {
        self.fetch(&format!("stock/{id}"), id).await
    }
}
