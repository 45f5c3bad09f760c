//! Shared fixtures for the cart behavioral tests.
//!
//! The fixtures are cheap clones over shared interior state, so a test
//! can hand one half to the store and keep the other half for
//! assertions: `FakeGateway` counts fetches and can be switched to
//! fail, `RecordingSink` captures every notification verbatim.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rocket_shoes_cart::catalog::{CatalogError, ProductGateway};
use rocket_shoes_cart::notify::NotificationSink;
use rocket_shoes_core::{Product, ProductId, StockLevel};

/// Initialize test logging once; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// Build a catalog record from the service wire format.
///
/// # Panics
///
/// Panics if the JSON does not describe a valid product (test bug).
#[must_use]
pub fn product(id: i64, title: &str, price: f64) -> Product {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": title,
        "price": price,
        "image": format!("https://cdn.example.com/{id}.jpg"),
    }))
    .expect("valid product fixture")
}

#[derive(Default)]
struct GatewayState {
    products: HashMap<ProductId, Product>,
    stock: HashMap<ProductId, u32>,
    fail_products: bool,
    fail_stock: bool,
    product_calls: usize,
    stock_calls: usize,
}

/// In-memory stand-in for the catalog/stock service.
#[derive(Clone, Default)]
pub struct FakeGateway {
    state: Arc<Mutex<GatewayState>>,
}

impl FakeGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a catalog record.
    ///
    /// # Panics
    ///
    /// Panics if the fixture lock is poisoned.
    pub fn insert_product(&self, product: Product) {
        self.lock().products.insert(product.id, product);
    }

    /// Set the available stock for a product.
    ///
    /// # Panics
    ///
    /// Panics if the fixture lock is poisoned.
    pub fn set_stock(&self, id: ProductId, amount: u32) {
        self.lock().stock.insert(id, amount);
    }

    /// Make every catalog fetch fail with a 500.
    ///
    /// # Panics
    ///
    /// Panics if the fixture lock is poisoned.
    pub fn fail_products(&self) {
        self.lock().fail_products = true;
    }

    /// Make every stock fetch fail with a 500.
    ///
    /// # Panics
    ///
    /// Panics if the fixture lock is poisoned.
    pub fn fail_stock(&self) {
        self.lock().fail_stock = true;
    }

    /// Number of catalog fetches performed so far.
    ///
    /// # Panics
    ///
    /// Panics if the fixture lock is poisoned.
    #[must_use]
    pub fn product_calls(&self) -> usize {
        self.lock().product_calls
    }

    /// Number of stock fetches performed so far.
    ///
    /// # Panics
    ///
    /// Panics if the fixture lock is poisoned.
    #[must_use]
    pub fn stock_calls(&self) -> usize {
        self.lock().stock_calls
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, GatewayState> {
        self.state.lock().expect("gateway lock")
    }
}

impl ProductGateway for FakeGateway {
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let mut state = self.lock();
        state.product_calls += 1;
        if state.fail_products {
            return Err(CatalogError::Api {
                status: 500,
                message: "catalog offline".to_string(),
            });
        }
        state.products.get(&id).cloned().ok_or(CatalogError::NotFound(id))
    }

    async fn stock(&self, id: ProductId) -> Result<StockLevel, CatalogError> {
        let mut state = self.lock();
        state.stock_calls += 1;
        if state.fail_stock {
            return Err(CatalogError::Api {
                status: 500,
                message: "stock offline".to_string(),
            });
        }
        state
            .stock
            .get(&id)
            .map(|&amount| StockLevel { id, amount })
            .ok_or(CatalogError::NotFound(id))
    }
}

/// Notification sink that records every message it receives.
#[derive(Clone, Default)]
pub struct RecordingSink {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything notified so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the fixture lock is poisoned.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("sink lock").clone()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .expect("sink lock")
            .push(message.to_string());
    }
}
