//! RocketShoes cart state container.
//!
//! Owns the in-memory list of cart line items, persists them to a
//! string-keyed key-value store, and validates every quantity change
//! against the remote stock service before committing.
//!
//! # Architecture
//!
//! [`CartStore`] is an explicit owned state object: callers hold it
//! directly and mutate it through its methods; there is no ambient
//! context to look up. Its three collaborators are trait seams:
//!
//! - [`ProductGateway`] - remote catalog/stock fetches
//!   ([`CatalogClient`] is the HTTP implementation)
//! - [`CartStorage`] - the persisted mirror ([`MemoryStorage`],
//!   [`FileStorage`])
//! - [`NotificationSink`] - fire-and-forget user-facing messages
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_shoes_cart::{CartStore, CatalogClient, CatalogConfig, FileStorage, TracingSink};
//! use rocket_shoes_core::ProductId;
//!
//! let config = CatalogConfig::from_env()?;
//! let gateway = CatalogClient::new(&config)?;
//! let storage = FileStorage::new("cart-store.json");
//!
//! let mut cart = CartStore::open(gateway, storage, TracingSink)?;
//! cart.add_product(ProductId::new(5)).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod storage;
mod store;

pub use catalog::{CatalogClient, CatalogError, ProductGateway};
pub use config::{CatalogConfig, ConfigError};
pub use error::CartError;
pub use notify::{NotificationSink, TracingSink, messages};
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::{CartStore, DEFAULT_STORAGE_KEY};
