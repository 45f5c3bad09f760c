//! Remote product/stock gateway.
//!
//! The store validates every add/update against the remote catalog
//! through [`ProductGateway`]; [`CatalogClient`] is the HTTP
//! implementation. Stock levels are fetched per validation and never
//! cached, since the remote service is authoritative.

mod client;

pub use client::CatalogClient;

use thiserror::Error;

use rocket_shoes_core::{Product, ProductId, StockLevel};

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        message: String,
    },

    /// No record for the requested product.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// Failed to decode the response body.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Remote source of catalog records and stock levels.
// Callers run on a single-threaded UI loop; no Send bound on the futures.
#[allow(async_fn_in_trait)]
pub trait ProductGateway {
    /// Fetch the catalog record for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the request
    /// fails.
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Fetch the current stock level for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the request
    /// fails.
    async fn stock(&self, id: ProductId) -> Result<StockLevel, CatalogError>;
}
