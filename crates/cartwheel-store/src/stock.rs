//! # Stock Service Seam
//!
//! The external collaborator answering two questions per product:
//! "how many units may be bought right now" and "what are its details".
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StockService                                     │
//! │                                                                         │
//! │  get_stock(id)   ──► Stock { id, amount }   or  StockError              │
//! │  get_product(id) ──► Product { id, ... }    or  StockError              │
//! │                                                                         │
//! │  • Answers are authoritative only at the instant they arrive.           │
//! │  • Callers treat EVERY error variant uniformly: the operation that      │
//! │    asked simply fails. Variants exist for logging, not for branching.   │
//! │  • No timeout is imposed here; implementations bring their own.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Real transports (HTTP catalog backends) live outside this repo. The
//! built-in [`StaticCatalog`] serves demos and tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use cartwheel_core::{Product, ProductId, Stock};

// =============================================================================
// Stock Error
// =============================================================================

/// Why a stock or product lookup failed.
///
/// Callers never branch on the variant; the distinction only feeds logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StockError {
    /// The catalog does not know this product id.
    #[error("product {0} is not in the catalog")]
    NotFound(ProductId),

    /// The service could not be reached or answered with a transport error.
    #[error("stock service unreachable: {0}")]
    Transport(String),

    /// The service answered, but the payload was not understandable.
    #[error("stock service returned a malformed payload: {0}")]
    Decode(String),
}

// =============================================================================
// Stock Service Trait
// =============================================================================

/// Availability and catalog lookups, one network round-trip each.
#[async_trait]
pub trait StockService: Send + Sync {
    /// Returns the current purchasable ceiling for `id`.
    async fn get_stock(&self, id: ProductId) -> Result<Stock, StockError>;

    /// Returns the catalog details for `id`.
    async fn get_product(&self, id: ProductId) -> Result<Product, StockError>;
}

// =============================================================================
// Static Catalog (built-in implementation)
// =============================================================================

/// In-memory catalog with per-product stock ceilings.
///
/// ## When Used
/// - The demo binary, seeded with a handful of products
/// - Tests that need deterministic stock answers
///
/// The table sits behind a std `Mutex`; lookups are quick and never await
/// while holding it.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    table: Mutex<HashMap<ProductId, (Product, i64)>>,
}

impl StaticCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a product with its stock ceiling.
    pub fn insert(&self, product: Product, stock_amount: i64) {
        let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        table.insert(product.id, (product, stock_amount));
    }

    /// Changes the stock ceiling of an existing product.
    ///
    /// Useful in tests that shrink availability between operations.
    pub fn set_stock(&self, id: ProductId, stock_amount: i64) {
        let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        if let Some((_, amount)) = table.get_mut(&id) {
            *amount = stock_amount;
        }
    }
}

#[async_trait]
impl StockService for StaticCatalog {
    async fn get_stock(&self, id: ProductId) -> Result<Stock, StockError> {
        let table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        table
            .get(&id)
            .map(|(_, amount)| Stock { id, amount: *amount })
            .ok_or(StockError::NotFound(id))
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, StockError> {
        let table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        table
            .get(&id)
            .map(|(product, _)| product.clone())
            .ok_or(StockError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shoe() -> Product {
        Product {
            id: 1,
            title: "Trail Runner".to_string(),
            price: 139.9,
            image: "https://cdn.example/shoe.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn test_static_catalog_answers_both_questions() {
        let catalog = StaticCatalog::new();
        catalog.insert(shoe(), 5);

        assert_eq!(catalog.get_stock(1).await.unwrap().amount, 5);
        assert_eq!(catalog.get_product(1).await.unwrap().title, "Trail Runner");
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let catalog = StaticCatalog::new();
        assert_eq!(
            catalog.get_stock(99).await.unwrap_err(),
            StockError::NotFound(99)
        );
    }

    #[tokio::test]
    async fn test_set_stock_updates_ceiling() {
        let catalog = StaticCatalog::new();
        catalog.insert(shoe(), 5);
        catalog.set_stock(1, 1);

        assert_eq!(catalog.get_stock(1).await.unwrap().amount, 1);
    }
}
