//! Catalog, cart, and stock records.
//!
//! These mirror the catalog service wire format: a product record
//! carries `id`, `title`, `price`, and `image`, plus whatever other
//! fields the catalog attaches. Fields this crate does not interpret
//! are kept as an opaque passthrough map so they survive a round-trip
//! through the persisted cart mirror untouched.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ProductId;

/// A catalog record as fetched from the product service.
///
/// There is no quantity on the wire; a [`LineItem`] is built from a
/// `Product` when it first enters a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Product image URL, if the catalog provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Catalog fields this crate does not interpret, preserved as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One distinct product in the cart with its desired quantity.
///
/// Invariant: `amount >= 1`, and a cart holds at most one `LineItem`
/// per [`ProductId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Product image URL, if the catalog provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Desired quantity.
    pub amount: u32,
    /// Catalog fields this crate does not interpret, preserved as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl LineItem {
    /// Build the line item for a product entering the cart (`amount = 1`).
    #[must_use]
    pub fn first_of(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount: 1,
            extra: product.extra,
        }
    }

    /// Copy of this line item with a different desired quantity.
    #[must_use]
    pub fn with_amount(&self, amount: u32) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }
}

/// Remote-authoritative available quantity for a product.
///
/// Transient: fetched per validation, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    /// Catalog identifier.
    pub id: ProductId,
    /// Units currently available.
    pub amount: u32,
}
