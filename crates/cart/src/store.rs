//! The cart store: reconciliation rules for add, remove, and set-quantity.
//!
//! Every mutation computes a candidate cart immutably, validates it against
//! the live collaborators, then commits by persisting the candidate and only
//! afterwards swapping it into memory. A failed validation or lookup aborts
//! with a notification and leaves the prior cart byte-for-byte untouched.
//!
//! Failures are absorbed here; callers observe an [`Outcome`] value and the
//! notification side effect, never an error. The distinct [`Rejection`]
//! reasons stay observable for tests even where the notification text
//! collapses them into one generic message.

#![allow(async_fn_in_trait)]

use tracing::{debug, instrument, warn};

use rocket_cart_core::{LineItem, Product, ProductId, StockLevel};

use crate::error::{ServiceError, StorageError};
use crate::notify::{
    MSG_ADD_FAILED, MSG_OUT_OF_STOCK, MSG_REMOVE_FAILED, MSG_UPDATE_FAILED, Notifier,
};
use crate::storage::CartStorage;

/// Read-only stock query seam.
pub trait InventoryService {
    /// Current stock level for one product.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` when the service is unreachable, responds with
    /// an error status, or the response is malformed.
    async fn stock(&self, product_id: ProductId) -> Result<StockLevel, ServiceError>;
}

/// Product metadata query seam, consulted only when a brand-new line item
/// enters the cart.
pub trait CatalogService {
    /// Full catalog record for one product.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` when the service is unreachable, the product
    /// is unknown, or the response is malformed.
    async fn product(&self, product_id: ProductId) -> Result<Product, ServiceError>;
}

impl<I: InventoryService> InventoryService for &I {
    async fn stock(&self, product_id: ProductId) -> Result<StockLevel, ServiceError> {
        (*self).stock(product_id).await
    }
}

impl<C: CatalogService> CatalogService for &C {
    async fn product(&self, product_id: ProductId) -> Result<Product, ServiceError> {
        (*self).product(product_id).await
    }
}

/// Result of one cart mutation, from the caller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A new snapshot was persisted and swapped into memory.
    Committed,
    /// The request was a deliberate no-op (non-positive target quantity);
    /// no mutation, no notification.
    Ignored,
    /// The mutation was aborted; the cart is unchanged and one notification
    /// was emitted.
    Rejected(Rejection),
}

/// Why a mutation was aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The desired quantity exceeds the available stock.
    StockExceeded,
    /// The target product is not in the cart.
    NotInCart,
    /// An inventory or catalog lookup failed.
    Service,
    /// Persisting the candidate snapshot failed; the in-memory cart stays
    /// on the prior snapshot.
    Storage,
}

/// Owns the cart and mediates all mutations.
///
/// Collaborators are injected: `I` answers stock queries, `C` serves catalog
/// records, `S` persists snapshots, `N` receives failure notifications.
/// Mutation is sequential through `&mut self`; there is no locking, no
/// cancellation, and no store-enforced timeout.
pub struct CartStore<I, C, S, N> {
    inventory: I,
    catalog: C,
    storage: S,
    notifier: N,
    cart: Vec<LineItem>,
}

impl<I, C, S, N> CartStore<I, C, S, N>
where
    I: InventoryService,
    C: CatalogService,
    S: CartStorage,
    N: Notifier,
{
    /// Open the store, restoring the persisted snapshot.
    ///
    /// An absent snapshot yields an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when an existing snapshot cannot be read or
    /// decoded.
    pub fn open(inventory: I, catalog: C, storage: S, notifier: N) -> Result<Self, StorageError> {
        let cart = storage.load()?.unwrap_or_default();
        debug!(items = cart.len(), "cart store opened");
        Ok(Self {
            inventory,
            catalog,
            storage,
            notifier,
            cart,
        })
    }

    /// Read-only view of the current cart, in first-add order.
    #[must_use]
    pub fn cart(&self) -> &[LineItem] {
        &self.cart
    }

    /// Add one unit of a product, appending a new line item or incrementing
    /// an existing one.
    ///
    /// The catalog is consulted only for a brand-new line item, and only
    /// after the stock ceiling check passes.
    #[instrument(skip(self))]
    pub async fn add_product(&mut self, product_id: ProductId) -> Outcome {
        let current_amount = self
            .cart
            .iter()
            .find(|item| item.id() == product_id)
            .map(|item| item.amount);

        let stock = match self.inventory.stock(product_id).await {
            Ok(stock) => stock,
            Err(e) => return self.reject_service(MSG_ADD_FAILED, &e),
        };

        let Some(desired) = current_amount.unwrap_or(0).checked_add(1) else {
            return self.reject(Rejection::StockExceeded, MSG_OUT_OF_STOCK);
        };
        if !stock.covers(desired) {
            return self.reject(Rejection::StockExceeded, MSG_OUT_OF_STOCK);
        }

        let candidate = if current_amount.is_some() {
            with_replaced_amount(&self.cart, product_id, desired)
        } else {
            let product = match self.catalog.product(product_id).await {
                Ok(product) => product,
                Err(e) => return self.reject_service(MSG_ADD_FAILED, &e),
            };
            let mut next = self.cart.clone();
            next.push(LineItem::new(product));
            next
        };

        self.commit(candidate, MSG_ADD_FAILED)
    }

    /// Remove exactly one line item. Purely local, no collaborator lookups.
    #[instrument(skip(self))]
    pub fn remove_product(&mut self, product_id: ProductId) -> Outcome {
        let Some(position) = self.cart.iter().position(|item| item.id() == product_id) else {
            return self.reject(Rejection::NotInCart, MSG_REMOVE_FAILED);
        };

        let mut candidate = self.cart.clone();
        candidate.remove(position);
        self.commit(candidate, MSG_REMOVE_FAILED)
    }

    /// Set a line item's quantity to an absolute target.
    ///
    /// Non-positive targets are ignored outright: this guards against
    /// nonsensical direct sets, it is not a delete-by-zero. Stock is checked
    /// before the cart scan, so a stock-exceeded target on an absent product
    /// reports stock-exceeded, not not-in-cart.
    #[instrument(skip(self))]
    pub async fn update_product_amount(&mut self, product_id: ProductId, amount: i64) -> Outcome {
        if amount <= 0 {
            debug!("ignoring non-positive target quantity");
            return Outcome::Ignored;
        }

        let stock = match self.inventory.stock(product_id).await {
            Ok(stock) => stock,
            Err(e) => return self.reject_service(MSG_UPDATE_FAILED, &e),
        };

        let target = match u32::try_from(amount) {
            Ok(target) if stock.covers(target) => target,
            _ => return self.reject(Rejection::StockExceeded, MSG_OUT_OF_STOCK),
        };

        if !self.cart.iter().any(|item| item.id() == product_id) {
            return self.reject(Rejection::NotInCart, MSG_UPDATE_FAILED);
        }

        let candidate = with_replaced_amount(&self.cart, product_id, target);
        self.commit(candidate, MSG_UPDATE_FAILED)
    }

    /// Persist the candidate, then swap it into memory.
    ///
    /// Persist-first keeps "commit = both or neither": a failed save leaves
    /// the in-memory cart on the prior snapshot.
    fn commit(&mut self, candidate: Vec<LineItem>, failure_message: &str) -> Outcome {
        if let Err(e) = self.storage.save(&candidate) {
            warn!(error = %e, "cart snapshot save failed");
            self.notifier.notify(failure_message);
            return Outcome::Rejected(Rejection::Storage);
        }

        self.cart = candidate;
        Outcome::Committed
    }

    fn reject(&self, rejection: Rejection, message: &str) -> Outcome {
        self.notifier.notify(message);
        Outcome::Rejected(rejection)
    }

    fn reject_service(&self, message: &str, error: &ServiceError) -> Outcome {
        warn!(error = %error, "collaborator lookup failed");
        self.notifier.notify(message);
        Outcome::Rejected(Rejection::Service)
    }
}

/// A fresh cart with the matched entry replaced by a new value.
///
/// Never mutates the matched entry in place; the live cart and the candidate
/// share no line items.
fn with_replaced_amount(cart: &[LineItem], product_id: ProductId, amount: u32) -> Vec<LineItem> {
    cart.iter()
        .map(|item| {
            if item.id() == product_id {
                item.with_amount(amount)
            } else {
                item.clone()
            }
        })
        .collect()
}
