//! Cart error taxonomy.
//!
//! Every mutation failure is terminal for that call only: the store's
//! in-memory and persisted state are left exactly as they were, the
//! error is pushed to the notification sink as a human-readable
//! message, and the typed error is returned to the caller.

use thiserror::Error;

use rocket_shoes_core::ProductId;

use crate::catalog::CatalogError;
use crate::storage::StorageError;

/// Errors that can occur when mutating the cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// The targeted product has no line item in the cart.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),

    /// The prospective amount exceeds the remote stock level.
    #[error("requested {requested} of product {id}, only {available} in stock")]
    OutOfStock {
        /// Product being validated.
        id: ProductId,
        /// Quantity the mutation asked for. Wider than a stock level
        /// so oversized update requests are reported verbatim.
        requested: u64,
        /// Quantity the stock service reported as available.
        available: u32,
    },

    /// Catalog or stock fetch failed.
    #[error("catalog request failed: {0}")]
    Catalog(#[from] CatalogError),

    /// Persisting the cart mirror failed.
    #[error("cart persistence failed: {0}")]
    Storage(#[from] StorageError),

    /// Encoding the cart mirror failed.
    #[error("cart serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_in_cart_display() {
        let err = CartError::NotInCart(ProductId::new(3));
        assert_eq!(err.to_string(), "product 3 is not in the cart");
    }

    #[test]
    fn test_out_of_stock_display() {
        let err = CartError::OutOfStock {
            id: ProductId::new(1),
            requested: 3,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "requested 3 of product 1, only 2 in stock"
        );
    }

    #[test]
    fn test_storage_error_wrapping() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CartError::from(StorageError::from(io));
        assert!(matches!(err, CartError::Storage(_)));
        assert!(err.to_string().starts_with("cart persistence failed"));
    }
}
