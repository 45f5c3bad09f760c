//! Core types for the RocketShoes cart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod catalog;
pub mod id;

pub use catalog::{LineItem, Product, StockLevel};
pub use id::*;
