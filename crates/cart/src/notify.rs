//! User-facing notification seam.
//!
//! The store never talks to a UI directly; it pushes one
//! human-readable message per failed mutation through a
//! [`NotificationSink`]. Real frontends implement the trait over their
//! toast mechanism; [`TracingSink`] is the default that just logs.

use std::sync::Arc;

/// The literal messages surfaced to shoppers.
///
/// These are the storefront's Portuguese UX strings; error *kinds* are
/// carried separately on [`crate::CartError`].
pub mod messages {
    /// Prospective quantity exceeds available stock (any operation).
    pub const OUT_OF_STOCK: &str = "Quantidade solicitada fora de estoque";
    /// Adding a product failed for any other reason.
    pub const ADD_FAILED: &str = "Erro na adição do produto";
    /// Removing a product failed (item not present).
    pub const REMOVE_FAILED: &str = "Erro na remoção do produto";
    /// Changing a quantity failed for any other reason.
    pub const UPDATE_FAILED: &str = "Erro na alteração de quantidade do produto";
}

/// Fire-and-forget sink for user-visible error messages.
pub trait NotificationSink {
    /// Deliver one message to the shopper.
    fn notify(&self, message: &str);
}

impl<T: NotificationSink + ?Sized> NotificationSink for &T {
    fn notify(&self, message: &str) {
        (**self).notify(message);
    }
}

impl<T: NotificationSink + ?Sized> NotificationSink for Arc<T> {
    fn notify(&self, message: &str) {
        (**self).notify(message);
    }
}

/// Default sink that logs notifications at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, message: &str) {
        tracing::warn!("cart notification: {message}");
    }
}
