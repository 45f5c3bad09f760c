//! The cart state container.
//!
//! [`CartStore`] owns the ordered list of line items exclusively; the
//! persisted mirror is a derived copy, not a second owner. Every
//! mutation path shares one invariant: the cart is only ever replaced
//! wholesale, after every validation and the persistence write have
//! succeeded. There is no observable intermediate state between the
//! pre-mutation and post-mutation snapshots.

use tracing::{debug, instrument, warn};

use rocket_shoes_core::{LineItem, ProductId};

use crate::catalog::ProductGateway;
use crate::error::CartError;
use crate::notify::{NotificationSink, messages};
use crate::storage::CartStorage;

/// Storage key under which the cart mirror is persisted.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

type Subscriber = Box<dyn Fn(&[LineItem])>;

/// Shopping-cart state container.
///
/// Generic over its three collaborators: the remote catalog/stock
/// gateway `G`, the persistence medium `S`, and the notification sink
/// `N`. Mutations take `&mut self`, so overlapping calls on the same
/// store cannot race: the borrow checker serializes them.
///
/// Mutations return a typed [`CartError`] for the caller; in addition,
/// every failure pushes exactly one human-readable message to the
/// sink, and every success invokes the subscribed observers with the
/// new snapshot.
pub struct CartStore<G, S, N> {
    gateway: G,
    storage: S,
    sink: N,
    storage_key: String,
    items: Vec<LineItem>,
    subscribers: Vec<Subscriber>,
}

impl<G, S, N> core::fmt::Debug for CartStore<G, S, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CartStore")
            .field("storage_key", &self.storage_key)
            .field("items", &self.items)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl<G, S, N> CartStore<G, S, N>
where
    G: ProductGateway,
    S: CartStorage,
    N: NotificationSink,
{
    /// Open a cart store under [`DEFAULT_STORAGE_KEY`].
    ///
    /// Reads the persisted mirror if present; an absent mirror yields
    /// an empty cart, and an unreadable one is logged and discarded.
    /// No stock validation is performed at load time.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage medium itself cannot be read.
    pub fn open(gateway: G, storage: S, sink: N) -> Result<Self, CartError> {
        Self::open_at(DEFAULT_STORAGE_KEY, gateway, storage, sink)
    }

    /// Open a cart store persisted under a custom storage key.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage medium itself cannot be read.
    pub fn open_at(
        storage_key: impl Into<String>,
        gateway: G,
        storage: S,
        sink: N,
    ) -> Result<Self, CartError> {
        let storage_key = storage_key.into();
        let items = match storage.get(&storage_key)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(items) => items,
                Err(e) => {
                    warn!(error = %e, "persisted cart mirror is unreadable, starting empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        Ok(Self {
            gateway,
            storage,
            sink,
            storage_key,
            items,
            subscribers: Vec::new(),
        })
    }

    /// Current cart contents, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The storage backend holding the persisted mirror.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Register an observer invoked with the new snapshot after every
    /// successful mutation. Failed mutations never fire observers.
    pub fn subscribe(&mut self, subscriber: impl Fn(&[LineItem]) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Add one unit of a product to the cart.
    ///
    /// A product not yet in the cart is fetched from the catalog and
    /// appended with amount 1; a product already present has its
    /// amount incremented in place. Either way the prospective amount
    /// is validated against remote stock first.
    ///
    /// # Errors
    ///
    /// [`CartError::OutOfStock`] if the prospective amount exceeds the
    /// stock level; [`CartError::Catalog`] if either fetch fails;
    /// [`CartError::Storage`] if persisting fails. The cart is left
    /// unchanged in every error case.
    #[instrument(skip(self))]
    pub async fn add_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let result = self.try_add(product_id).await;
        if let Err(err) = &result {
            self.report(err, messages::ADD_FAILED);
        }
        result
    }

    async fn try_add(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let prospective = match self.items.iter().find(|item| item.id == product_id) {
            Some(item) => item.with_amount(item.amount.saturating_add(1)),
            None => LineItem::first_of(self.gateway.product(product_id).await?),
        };

        let stock = self.gateway.stock(product_id).await?;
        if prospective.amount > stock.amount {
            return Err(CartError::OutOfStock {
                id: product_id,
                requested: u64::from(prospective.amount),
                available: stock.amount,
            });
        }

        let mut next = self.items.clone();
        if let Some(slot) = next.iter_mut().find(|item| item.id == product_id) {
            *slot = prospective;
        } else {
            next.push(prospective);
        }
        self.commit(next)
    }

    /// Remove a product's line item from the cart.
    ///
    /// Performs no remote calls.
    ///
    /// # Errors
    ///
    /// [`CartError::NotInCart`] if the product has no line item;
    /// [`CartError::Storage`] if persisting fails. The cart is left
    /// unchanged in every error case.
    #[instrument(skip(self))]
    pub fn remove_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let result = self.try_remove(product_id);
        if let Err(err) = &result {
            self.report(err, messages::REMOVE_FAILED);
        }
        result
    }

    fn try_remove(&mut self, product_id: ProductId) -> Result<(), CartError> {
        if !self.items.iter().any(|item| item.id == product_id) {
            return Err(CartError::NotInCart(product_id));
        }

        let next = self
            .items
            .iter()
            .filter(|item| item.id != product_id)
            .cloned()
            .collect();
        self.commit(next)
    }

    /// Set the desired quantity of a product already in the cart.
    ///
    /// Requests below 1 are ignored entirely (no notification): the UI
    /// is expected to use [`Self::remove_product`] for removal.
    ///
    /// # Errors
    ///
    /// [`CartError::NotInCart`] if the product has no line item;
    /// [`CartError::OutOfStock`] if the requested amount exceeds the
    /// stock level; [`CartError::Catalog`] if the stock fetch fails;
    /// [`CartError::Storage`] if persisting fails. The cart is left
    /// unchanged in every error case.
    #[instrument(skip(self))]
    pub async fn update_product_amount(
        &mut self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<(), CartError> {
        if amount < 1 {
            return Ok(());
        }

        let result = self.try_update(product_id, amount).await;
        if let Err(err) = &result {
            self.report(err, messages::UPDATE_FAILED);
        }
        result
    }

    async fn try_update(&mut self, product_id: ProductId, amount: i64) -> Result<(), CartError> {
        if !self.items.iter().any(|item| item.id == product_id) {
            return Err(CartError::NotInCart(product_id));
        }

        let stock = self.gateway.stock(product_id).await?;
        // Validate in i64 space: an amount that does not even fit a
        // stock level can never be satisfied, and must be reported
        // verbatim rather than saturated.
        let requested = u32::try_from(amount).ok().filter(|&a| a <= stock.amount);
        let Some(requested) = requested else {
            return Err(CartError::OutOfStock {
                id: product_id,
                requested: amount.unsigned_abs(),
                available: stock.amount,
            });
        };

        let mut next = self.items.clone();
        if let Some(slot) = next.iter_mut().find(|item| item.id == product_id) {
            slot.amount = requested;
        }
        self.commit(next)
    }

    /// Replace the cart wholesale: persist first, then swap memory,
    /// then tell subscribers. A failed persist leaves the previous
    /// snapshot fully intact.
    fn commit(&mut self, next: Vec<LineItem>) -> Result<(), CartError> {
        let mirror = serde_json::to_string(&next)?;
        self.storage.set(&self.storage_key, &mirror)?;
        self.items = next;
        debug!(items = self.items.len(), "cart committed");

        for subscriber in &self.subscribers {
            subscriber(&self.items);
        }
        Ok(())
    }

    fn report(&self, err: &CartError, operation_message: &'static str) {
        // Out-of-stock has its own UX text; every other cause collapses
        // into the per-operation message.
        let text = match err {
            CartError::OutOfStock { .. } => messages::OUT_OF_STOCK,
            _ => operation_message,
        };
        self.sink.notify(text);
    }
}
