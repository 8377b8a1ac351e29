//! # Cart Rules
//!
//! The cart itself: entries, mutation rules, totals and the wire encoding.
//!
//! ## Cart Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Mutations (pure)                              │
//! │                                                                         │
//! │  Store Operation           Cart Rule               State Change         │
//! │  ───────────────           ─────────               ────────────         │
//! │                                                                         │
//! │  add (new product) ──────► add_new(product) ─────► push entry, amount 1 │
//! │                                                                         │
//! │  add (in cart) ──────────► increment(id) ────────► entry.amount += 1    │
//! │                                                                         │
//! │  change quantity ────────► set_amount(id, n) ────► entry.amount = n     │
//! │                                                                         │
//! │  remove ─────────────────► remove(id) ───────────► delete entry         │
//! │                                                                         │
//! │  NOTE: Stock ceilings are checked by cartwheel-store BEFORE calling     │
//! │        these rules; the rules themselves only guard cart invariants     │
//! │        (uniqueness per id, amount >= 1).                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Encoding
//! The persisted form is a bare JSON array of entries, each flat:
//! `[{"id":1,"title":"...","price":139.9,"image":"...","amount":2}]`.
//! This is exactly what the storefront's storage slot holds between reloads.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CartError;
use crate::types::{Product, ProductId};
use crate::MIN_ENTRY_AMOUNT;

// =============================================================================
// Cart Entry
// =============================================================================

/// One line item in the cart.
///
/// ## Design Notes
/// - The display attributes are a frozen copy of the product at the time it
///   was added, so the cart renders consistently even if the catalog entry
///   changes afterwards.
/// - `amount` is the cart-line quantity, not a catalog property. It is kept
///   flat next to the product fields because that is the persisted shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartEntry {
    /// Catalog identifier (unique within the cart).
    pub id: ProductId,

    /// Title at time of adding (frozen).
    pub title: String,

    /// Display price at time of adding (frozen).
    pub price: f64,

    /// Image URL at time of adding (frozen).
    pub image: String,

    /// Quantity of this product in the cart. Always `>= 1`.
    pub amount: i64,
}

impl CartEntry {
    /// Creates a new entry holding a single unit of `product`.
    pub fn from_product(product: Product) -> Self {
        CartEntry {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount: 1,
        }
    }

    /// Display subtotal for this line (price × amount).
    ///
    /// Presentation-only arithmetic; see [`Product::price`](crate::Product).
    pub fn line_subtotal(&self) -> f64 {
        self.price * self.amount as f64
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopper's cart: an ordered sequence of entries.
///
/// ## Invariants
/// - At most one entry per product id (adding an in-cart product increments
///   its amount instead of pushing a duplicate)
/// - Every entry's amount is `>= 1`; explicit [`remove`](Cart::remove) is
///   the only way an entry disappears
/// - Insertion order is preserved, though nothing depends on it
///
/// ## Serialization
/// Serializes transparently as the entry array, which is the persisted wire
/// form (see module docs). On the TypeScript side a cart is just
/// `Array<CartEntry>`, so no binding is exported for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            entries: Vec::new(),
        }
    }

    /// Returns the entry for `id`, if the product is in the cart.
    pub fn entry(&self, id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Checks whether the cart holds an entry for `id`.
    pub fn contains(&self, id: ProductId) -> bool {
        self.entry(id).is_some()
    }

    /// Read-only view of all entries, in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Number of distinct products in the cart.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a new entry for `product` with amount 1.
    ///
    /// ## Errors
    /// [`CartError::AlreadyInCart`] if an entry for this product exists;
    /// callers that mean "one more unit" must use [`increment`](Cart::increment).
    pub fn add_new(&mut self, product: Product) -> Result<(), CartError> {
        if self.contains(product.id) {
            return Err(CartError::AlreadyInCart(product.id));
        }
        self.entries.push(CartEntry::from_product(product));
        Ok(())
    }

    /// Adds one unit to the existing entry for `id`.
    ///
    /// ## Errors
    /// [`CartError::EntryNotFound`] if the product is not in the cart.
    pub fn increment(&mut self, id: ProductId) -> Result<(), CartError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(CartError::EntryNotFound(id))?;
        entry.amount += 1;
        Ok(())
    }

    /// Replaces the amount of the existing entry for `id`.
    ///
    /// ## Errors
    /// - [`CartError::InvalidAmount`] if `amount < 1`; an entry may not hold
    ///   zero units, removal is a separate operation
    /// - [`CartError::EntryNotFound`] if the product is not in the cart
    pub fn set_amount(&mut self, id: ProductId, amount: i64) -> Result<(), CartError> {
        if amount < MIN_ENTRY_AMOUNT {
            return Err(CartError::InvalidAmount {
                amount,
                min: MIN_ENTRY_AMOUNT,
            });
        }
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(CartError::EntryNotFound(id))?;
        entry.amount = amount;
        Ok(())
    }

    /// Deletes the entry for `id` entirely and returns it.
    ///
    /// ## Errors
    /// [`CartError::EntryNotFound`] if the product is not in the cart.
    pub fn remove(&mut self, id: ProductId) -> Result<CartEntry, CartError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(CartError::EntryNotFound(id))?;
        Ok(self.entries.remove(index))
    }

    /// Summarizes the cart for display.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }

    /// Encodes the cart into its persisted wire form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decodes a cart from its persisted wire form.
    ///
    /// The caller decides what a parse failure means; at startup the store
    /// falls back to an empty cart with a warning.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart summary for the storefront header and cart page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    /// Distinct products in the cart.
    pub entry_count: usize,

    /// Sum of all entry amounts.
    pub total_quantity: i64,

    /// Display subtotal (Σ price × amount).
    pub subtotal: f64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            entry_count: cart.entry_count(),
            total_quantity: cart.entries.iter().map(|e| e.amount).sum(),
            subtotal: cart.entries.iter().map(|e| e.line_subtotal()).sum(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
