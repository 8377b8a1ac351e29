//! # Cart Store
//!
//! The single owner of cart state: three mutations, two reads, one lock.
//!
//! ## Operation Anatomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              add_product / remove_product / update_product_amount      │
//! │                                                                         │
//! │  1. Lock the cart (tokio mutex, held until the operation ends)          │
//! │  2. Ask the stock service what is allowed (add/update only)             │
//! │  3. Build the NEXT cart as a clone; the live cart is never edited       │
//! │  4. Persist the next cart's wire form                                   │
//! │  5. Only then swap it in                                                │
//! │                                                                         │
//! │  Any failure in 2-4 aborts BEFORE the swap, so a failed operation       │
//! │  leaves both the in-memory cart and the persisted string exactly        │
//! │  as they were, and the shopper hears one notification saying why.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why hold the lock across the stock round-trip?
//! Two concurrent adds of the same product would otherwise both read the
//! old amount and one increment would be lost. Holding the async mutex for
//! the whole operation makes the store safe to call from concurrent UI
//! tasks at the cost of queueing them, which is the right trade for a
//! single shopper's cart.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use cartwheel_core::{Cart, CartFailure, CartResult, CartTotals, ProductId};

use crate::config::StoreConfig;
use crate::notify::Notifier;
use crate::stock::StockService;
use crate::storage::CartStorage;

// =============================================================================
// Cart Store
// =============================================================================

/// Owned cart state plus the collaborators every mutation consults.
///
/// ## Design Notes
/// - No ambient singleton: the UI layer holds this (behind an `Arc`) and
///   passes it wherever cart access is needed.
/// - Mutations return a typed [`CartResult`] so callers can branch on the
///   reason, *and* the [`Notifier`] hears about every failure so a toast
///   layer needs no plumbing through call sites.
pub struct CartStore {
    cart: Mutex<Cart>,
    storage_key: String,
    stock: Arc<dyn StockService>,
    storage: Arc<dyn CartStorage>,
    notifier: Arc<dyn Notifier>,
}

impl CartStore {
    /// Opens the store, restoring the persisted cart if one exists.
    ///
    /// ## Startup Policy
    /// - Nothing stored: start empty
    /// - Stored but unreadable or malformed: warn and start empty; a stale
    ///   cart is never worth refusing to start the storefront over
    pub fn open(
        config: StoreConfig,
        stock: Arc<dyn StockService>,
        storage: Arc<dyn CartStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let cart = match storage.read(&config.storage_key) {
            Ok(Some(raw)) => match Cart::from_json(&raw) {
                Ok(cart) => {
                    debug!(entries = cart.entry_count(), "restored persisted cart");
                    cart
                }
                Err(err) => {
                    warn!(%err, "persisted cart is malformed; starting empty");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(err) => {
                warn!(%err, "could not read persisted cart; starting empty");
                Cart::new()
            }
        };

        CartStore {
            cart: Mutex::new(cart),
            storage_key: config.storage_key,
            stock,
            storage,
            notifier,
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Snapshot of the current cart.
    pub async fn cart(&self) -> Cart {
        self.cart.lock().await.clone()
    }

    /// Summary of the current cart for display.
    pub async fn totals(&self) -> CartTotals {
        self.cart.lock().await.totals()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds one unit of `product_id` to the cart.
    ///
    /// ## Behavior
    /// - Product already in cart: one more unit, if stock allows
    /// - Product not in cart: fetched from the catalog, added with amount 1
    /// - At the current stock ceiling: fails `OutOfStock`
    /// - Stock/catalog lookup or persistence failed: fails `AddFailed`
    pub async fn add_product(&self, product_id: ProductId) -> CartResult<()> {
        debug!(product_id = %product_id, "add_product");
        let mut cart = self.cart.lock().await;
        let result = self.try_add(&mut cart, product_id).await;
        self.report(result)
    }

    /// Deletes the entry for `product_id` entirely.
    ///
    /// Decrementing is [`update_product_amount`](CartStore::update_product_amount);
    /// removal always drops the whole line. A product that is not in the
    /// cart fails `RemoveFailed`.
    pub async fn remove_product(&self, product_id: ProductId) -> CartResult<()> {
        debug!(product_id = %product_id, "remove_product");
        let mut cart = self.cart.lock().await;
        let result = self.try_remove(&mut cart, product_id);
        self.report(result)
    }

    /// Sets the entry for `product_id` to exactly `amount` units.
    ///
    /// ## Behavior
    /// - `amount <= 0`: silent no-op. Not an error, not a notification,
    ///   not a persistence write; the UI's minus button bottoms out here.
    /// - Stock below `amount`: fails `OutOfStock`
    /// - Stock lookup or persistence failed: fails `UpdateFailed`
    /// - Product not in cart: silent no-op (the UI only offers this control
    ///   on rendered entries, so there is nothing sensible to report)
    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> CartResult<()> {
        if amount <= 0 {
            debug!(product_id = %product_id, amount = %amount, "ignoring non-positive amount");
            return Ok(());
        }
        debug!(product_id = %product_id, amount = %amount, "update_product_amount");
        let mut cart = self.cart.lock().await;
        let result = self.try_update(&mut cart, product_id, amount).await;
        self.report(result)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    async fn try_add(&self, cart: &mut Cart, product_id: ProductId) -> CartResult<()> {
        let stock = self
            .stock
            .get_stock(product_id)
            .await
            .map_err(|err| {
                warn!(product_id = %product_id, %err, "stock lookup failed");
                CartFailure::AddFailed
            })?;

        let held = cart.entry(product_id).map(|entry| entry.amount);

        // One more unit would pass the ceiling the service just reported.
        // An empty hand counts as zero, so a sold-out product is refused on
        // its very first add as well.
        if held.unwrap_or(0) >= stock.amount {
            return Err(CartFailure::OutOfStock);
        }

        let mut next = cart.clone();
        match held {
            Some(_) => next
                .increment(product_id)
                .map_err(|_| CartFailure::AddFailed)?,
            None => {
                let product = self.stock.get_product(product_id).await.map_err(|err| {
                    warn!(product_id = %product_id, %err, "product lookup failed");
                    CartFailure::AddFailed
                })?;
                next.add_new(product).map_err(|_| CartFailure::AddFailed)?;
            }
        }

        self.commit(cart, next, CartFailure::AddFailed)
    }

    fn try_remove(&self, cart: &mut Cart, product_id: ProductId) -> CartResult<()> {
        let mut next = cart.clone();
        next.remove(product_id).map_err(|err| {
            warn!(product_id = %product_id, %err, "remove rejected");
            CartFailure::RemoveFailed
        })?;
        self.commit(cart, next, CartFailure::RemoveFailed)
    }

    async fn try_update(
        &self,
        cart: &mut Cart,
        product_id: ProductId,
        amount: i64,
    ) -> CartResult<()> {
        let stock = self
            .stock
            .get_stock(product_id)
            .await
            .map_err(|err| {
                warn!(product_id = %product_id, %err, "stock lookup failed");
                CartFailure::UpdateFailed
            })?;

        if stock.amount < amount {
            return Err(CartFailure::OutOfStock);
        }

        if !cart.contains(product_id) {
            debug!(
                product_id = %product_id,
                "amount update for product not in cart; nothing to do"
            );
            return Ok(());
        }

        let mut next = cart.clone();
        next.set_amount(product_id, amount)
            .map_err(|_| CartFailure::UpdateFailed)?;
        self.commit(cart, next, CartFailure::UpdateFailed)
    }

    /// Persists `next` and, only if that succeeds, swaps it in.
    fn commit(&self, cart: &mut Cart, next: Cart, failure: CartFailure) -> CartResult<()> {
        let payload = next.to_json().map_err(|err| {
            error!(%err, "cart serialization failed");
            failure
        })?;
        self.storage
            .write(&self.storage_key, &payload)
            .map_err(|err| {
                error!(%err, "cart persistence failed");
                failure
            })?;
        *cart = next;
        Ok(())
    }

    /// Forwards a failure to the notifier; successes pass through silently.
    fn report(&self, result: CartResult<()>) -> CartResult<()> {
        if let Err(failure) = result {
            warn!(reason = ?failure, "cart operation failed");
            self.notifier.notify(&failure);
        }
        result
    }
}
