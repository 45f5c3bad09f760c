//! RocketShoes Core - Shared domain types.
//!
//! This crate provides the types shared across the RocketShoes cart
//! components:
//! - `cart` - The cart state container library
//! - `integration-tests` - Black-box behavioral tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! storage access. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and the catalog/cart/stock records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
