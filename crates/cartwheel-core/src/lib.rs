//! # cartwheel-core: Pure Cart Rules for Cartwheel
//!
//! This crate is the **heart** of Cartwheel. It contains the cart state
//! rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cartwheel Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Storefront UI (out of repo)                    │   │
//! │  │    Shelf view ──► Cart view ──► Toast notifications             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 cartwheel-store (orchestration)                 │   │
//! │  │    add_product, remove_product, update_product_amount           │   │
//! │  │    StockService • CartStorage • Notifier seams                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ cartwheel-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐      ┌───────────┐      ┌───────────┐          │   │
//! │  │   │   types   │      │   cart    │      │   error   │          │   │
//! │  │   │  Product  │      │   Cart    │      │ CartError │          │   │
//! │  │   │   Stock   │      │ CartEntry │      │CartFailure│          │   │
//! │  │   └───────────┘      └───────────┘      └───────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO STORAGE • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Stock, ProductId)
//! - [`cart`] - Cart, CartEntry, mutation rules, totals, wire encoding
//! - [`error`] - Cart rule errors and the user-facing failure taxonomy
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Stock lookups, storage and notifications live in cartwheel-store
//! 3. **Explicit Errors**: All errors are typed, never strings or panics
//! 4. **Invariants First**: Uniqueness per product id and `amount >= 1` are
//!    enforced by the mutation API, not by caller discipline
//!
//! ## Example Usage
//!
//! ```rust
//! use cartwheel_core::{Cart, Product};
//!
//! let shoe = Product {
//!     id: 1,
//!     title: "Trail Runner".to_string(),
//!     price: 139.9,
//!     image: "https://cdn.example/shoe.jpg".to_string(),
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_new(shoe).unwrap();
//! cart.increment(1).unwrap();
//!
//! assert_eq!(cart.entry(1).unwrap().amount, 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use cartwheel_core::Cart` instead of
// `use cartwheel_core::cart::Cart`

pub use cart::{Cart, CartEntry, CartTotals};
pub use error::{CartError, CartFailure, CartResult};
pub use types::{Product, ProductId, Stock};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum amount a cart entry may carry.
///
/// ## Why a constant?
/// The cart model says an entry either holds at least one unit or does not
/// exist. Explicit removal is the only way to drop below this.
pub const MIN_ENTRY_AMOUNT: i64 = 1;
