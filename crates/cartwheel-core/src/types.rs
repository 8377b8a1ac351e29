//! # Domain Types
//!
//! Core domain types used throughout Cartwheel.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                        │
//! │  │    Product      │        │     Stock       │                        │
//! │  │  ─────────────  │        │  ─────────────  │                        │
//! │  │  id (u64)       │◄──────►│  id (u64)       │  same catalog id       │
//! │  │  title          │        │  amount (i64)   │  purchasable ceiling   │
//! │  │  price          │        └─────────────────┘                        │
//! │  │  image          │                                                   │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  Product = what the catalog shows. Stock = how many may be bought.     │
//! │  The cart never caches Stock; it is fetched at every mutation.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product Identity
// =============================================================================

/// Catalog product identifier.
///
/// ## Why a plain integer?
/// The catalog hands out small unique integers; the cart only ever compares
/// them for equality, so a newtype would add ceremony without safety.
pub type ProductId = u64;

// =============================================================================
// Product
// =============================================================================

/// A catalog product as the storefront displays it.
///
/// ## Design Notes
/// - `title`, `price` and `image` are display attributes: the cart carries
///   them so the UI can render a line item without a second catalog fetch,
///   but never interprets them.
/// - `price` is catalog display data (not computed money), so f64 matches
///   what the catalog serves. All arithmetic on it is presentation-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique catalog identifier.
    pub id: ProductId,

    /// Display name shown on the shelf and in the cart.
    pub title: String,

    /// Display price as served by the catalog.
    pub price: f64,

    /// Image URL for the line item thumbnail.
    pub image: String,
}

// =============================================================================
// Stock
// =============================================================================

/// Availability ceiling for one product.
///
/// ## Authority
/// Stock is authoritative only at the instant it is fetched. The cart checks
/// it at mutation time and never retroactively corrects entries when the
/// ceiling later drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Stock {
    /// Catalog identifier this ceiling applies to.
    pub id: ProductId,

    /// Maximum units purchasable right now.
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_json_shape() {
        let product = Product {
            id: 1,
            title: "Trail Runner".to_string(),
            price: 139.9,
            image: "https://cdn.example/shoe.jpg".to_string(),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Trail Runner");
        assert_eq!(json["price"], 139.9);
    }

    #[test]
    fn test_stock_roundtrip() {
        let stock = Stock { id: 7, amount: 3 };
        let json = serde_json::to_string(&stock).unwrap();
        let back: Stock = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stock);
    }
}
