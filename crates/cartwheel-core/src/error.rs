//! # Error Types
//!
//! Cart rule errors and the user-facing failure taxonomy.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cartwheel-core errors (this file)                                     │
//! │  ├── CartError     - Cart rule violations (internal, precise)          │
//! │  └── CartFailure   - What the shopper is told (four kinds, flat)       │
//! │                                                                         │
//! │  cartwheel-store errors (separate crate)                               │
//! │  ├── StockError    - Stock/catalog lookup failures                     │
//! │  └── StorageError  - Persistence read/write failures                   │
//! │                                                                         │
//! │  Flow: CartError / StockError / StorageError ──► CartFailure ──► UI    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Internal errors carry context (product id, requested amount)
//! 3. The failure taxonomy is deliberately flat: every operation maps all
//!    of its internal errors onto exactly one of four shopper-facing kinds,
//!    and the `Display` text is the notification message verbatim

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Cart Rule Errors
// =============================================================================

/// Violations of the cart's own mutation rules.
///
/// These never reach the shopper directly; `cartwheel-store` maps them onto
/// a [`CartFailure`] at the operation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// No entry with this product id exists in the cart.
    ///
    /// ## When This Occurs
    /// - Incrementing or re-pricing a product the shopper never added
    /// - Removing a product twice
    #[error("no cart entry for product {0}")]
    EntryNotFound(ProductId),

    /// An entry with this product id already exists.
    ///
    /// ## When This Occurs
    /// - `add_new` for a product already in the cart. Uniqueness per
    ///   product id is an invariant; callers must increment instead.
    #[error("product {0} is already in the cart")]
    AlreadyInCart(ProductId),

    /// The requested amount would violate the minimum-amount rule.
    ///
    /// An entry either holds at least one unit or does not exist, so
    /// `set_amount` rejects zero and negatives rather than silently
    /// deleting the entry.
    #[error("amount {amount} is below the minimum of {min}")]
    InvalidAmount { amount: i64, min: i64 },
}

// =============================================================================
// Shopper-Facing Failure Taxonomy
// =============================================================================

/// The four reasons a cart operation reports to the shopper.
///
/// ## Contract
/// - Every failed operation yields exactly one of these kinds.
/// - The `Display` text is the human-readable notification message; the
///   variant is the machine-readable reason.
/// - A failed operation leaves the cart and its persisted form untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartFailure {
    /// Adding a product failed for any reason other than stock exhaustion.
    ///
    /// ## When This Occurs
    /// - Stock or product lookup failed (network, unknown id, bad payload)
    /// - Persisting the updated cart failed
    #[error("could not add the product to the cart")]
    AddFailed,

    /// The requested quantity exceeds the available stock.
    ///
    /// ## When This Occurs
    /// - Adding one more unit than the stock ceiling allows
    /// - Updating an entry to an amount above the ceiling
    #[error("requested quantity is out of stock")]
    OutOfStock,

    /// Removing a product failed.
    ///
    /// Entry-not-found is reported as this generic removal failure rather
    /// than a distinct not-found kind.
    #[error("could not remove the product from the cart")]
    RemoveFailed,

    /// Changing a product's amount failed.
    ///
    /// ## When This Occurs
    /// - Stock lookup failed during the update
    /// - Persisting the updated cart failed
    #[error("could not update the product amount")]
    UpdateFailed,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for operation results carrying a [`CartFailure`].
pub type CartResult<T> = Result<T, CartFailure>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_messages() {
        assert_eq!(
            CartError::EntryNotFound(42).to_string(),
            "no cart entry for product 42"
        );
        assert_eq!(
            CartError::InvalidAmount { amount: 0, min: 1 }.to_string(),
            "amount 0 is below the minimum of 1"
        );
    }

    #[test]
    fn test_failure_messages_are_shopper_facing() {
        assert_eq!(
            CartFailure::OutOfStock.to_string(),
            "requested quantity is out of stock"
        );
        assert_eq!(
            CartFailure::AddFailed.to_string(),
            "could not add the product to the cart"
        );
        assert_eq!(
            CartFailure::RemoveFailed.to_string(),
            "could not remove the product from the cart"
        );
        assert_eq!(
            CartFailure::UpdateFailed.to_string(),
            "could not update the product amount"
        );
    }
}
