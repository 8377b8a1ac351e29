//! End-to-end tests for the cart store: the three mutations against fake
//! collaborators, checking state, persistence and notifications together.

use std::sync::Arc;

use async_trait::async_trait;

use cartwheel_core::{CartFailure, Product, ProductId, Stock};
use cartwheel_store::{
    CartStore, MemoryStorage, RecordingNotifier, StaticCatalog, StockError, StockService,
    StoreConfig,
};

const KEY: &str = "cartwheel:cart";

fn product(id: ProductId, price: f64) -> Product {
    Product {
        id,
        title: format!("Product {}", id),
        price,
        image: format!("https://cdn.example/{}.jpg", id),
    }
}

/// Everything a test needs to poke the store and observe its collaborators.
struct Harness {
    catalog: Arc<StaticCatalog>,
    storage: Arc<MemoryStorage>,
    notifier: Arc<RecordingNotifier>,
    store: CartStore,
}

fn harness(seed: &[(ProductId, f64, i64)]) -> Harness {
    let catalog = Arc::new(StaticCatalog::new());
    for (id, price, stock) in seed {
        catalog.insert(product(*id, *price), *stock);
    }
    let storage = Arc::new(MemoryStorage::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let store = CartStore::open(
        StoreConfig::default(),
        catalog.clone(),
        storage.clone(),
        notifier.clone(),
    );
    Harness {
        catalog,
        storage,
        notifier,
        store,
    }
}

/// A stock service whose network is always down.
struct DownStock;

#[async_trait]
impl StockService for DownStock {
    async fn get_stock(&self, _id: ProductId) -> Result<Stock, StockError> {
        Err(StockError::Transport("connection refused".to_string()))
    }

    async fn get_product(&self, _id: ProductId) -> Result<Product, StockError> {
        Err(StockError::Transport("connection refused".to_string()))
    }
}

// =============================================================================
// add_product
// =============================================================================

#[tokio::test]
async fn add_to_empty_cart_creates_single_unit_entry() {
    let h = harness(&[(1, 139.9, 5)]);

    h.store.add_product(1).await.unwrap();

    let cart = h.store.cart().await;
    assert_eq!(cart.entry_count(), 1);
    assert_eq!(cart.entry(1).unwrap().amount, 1);
    assert_eq!(cart.entry(1).unwrap().title, "Product 1");
    // Success is silent.
    assert!(h.notifier.recorded().is_empty());
    // And persisted.
    assert!(h.storage.snapshot(KEY).unwrap().contains("\"amount\":1"));
}

#[tokio::test]
async fn add_increments_existing_entry() {
    let h = harness(&[(1, 139.9, 5)]);

    h.store.add_product(1).await.unwrap();
    h.store.add_product(1).await.unwrap();

    let cart = h.store.cart().await;
    assert_eq!(cart.entry_count(), 1);
    assert_eq!(cart.entry(1).unwrap().amount, 2);
}

#[tokio::test]
async fn add_at_stock_ceiling_fails_out_of_stock() {
    let h = harness(&[(1, 139.9, 1)]);
    h.store.add_product(1).await.unwrap();
    let persisted = h.storage.snapshot(KEY);

    let err = h.store.add_product(1).await.unwrap_err();

    assert_eq!(err, CartFailure::OutOfStock);
    assert_eq!(h.store.cart().await.entry(1).unwrap().amount, 1);
    // Persisted bytes untouched by the failed call.
    assert_eq!(h.storage.snapshot(KEY), persisted);
    assert_eq!(h.notifier.recorded(), vec![CartFailure::OutOfStock]);
}

#[tokio::test]
async fn add_sold_out_product_fails_out_of_stock() {
    let h = harness(&[(1, 139.9, 0)]);

    let err = h.store.add_product(1).await.unwrap_err();

    assert_eq!(err, CartFailure::OutOfStock);
    assert!(h.store.cart().await.is_empty());
}

#[tokio::test]
async fn add_unknown_product_fails_add_failed() {
    let h = harness(&[]);

    let err = h.store.add_product(99).await.unwrap_err();

    assert_eq!(err, CartFailure::AddFailed);
    assert!(h.store.cart().await.is_empty());
    assert!(h.storage.snapshot(KEY).is_none());
    assert_eq!(h.notifier.recorded(), vec![CartFailure::AddFailed]);
}

#[tokio::test]
async fn add_with_stock_service_down_fails_add_failed() {
    let storage = Arc::new(MemoryStorage::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let store = CartStore::open(
        StoreConfig::default(),
        Arc::new(DownStock),
        storage.clone(),
        notifier.clone(),
    );

    assert_eq!(store.add_product(1).await.unwrap_err(), CartFailure::AddFailed);
    assert!(store.cart().await.is_empty());
    assert_eq!(notifier.recorded(), vec![CartFailure::AddFailed]);
}

#[tokio::test]
async fn add_with_storage_refusing_writes_fails_and_mutates_nothing() {
    let h = harness(&[(1, 139.9, 5)]);
    h.storage.set_fail_writes(true);

    let err = h.store.add_product(1).await.unwrap_err();

    assert_eq!(err, CartFailure::AddFailed);
    assert!(h.store.cart().await.is_empty());
    assert!(h.storage.snapshot(KEY).is_none());
}

// =============================================================================
// remove_product
// =============================================================================

#[tokio::test]
async fn remove_deletes_entry_entirely() {
    let h = harness(&[(1, 139.9, 5)]);
    h.store.add_product(1).await.unwrap();
    h.store.add_product(1).await.unwrap();

    h.store.remove_product(1).await.unwrap();

    assert!(h.store.cart().await.is_empty());
    assert_eq!(h.storage.snapshot(KEY).as_deref(), Some("[]"));
    assert!(h.notifier.recorded().is_empty());
}

#[tokio::test]
async fn remove_missing_product_fails_remove_failed() {
    let h = harness(&[(1, 139.9, 5)]);

    let err = h.store.remove_product(99).await.unwrap_err();

    assert_eq!(err, CartFailure::RemoveFailed);
    assert!(h.storage.snapshot(KEY).is_none());
    assert_eq!(h.notifier.recorded(), vec![CartFailure::RemoveFailed]);
}

#[tokio::test]
async fn remove_never_consults_the_stock_service() {
    // Removal must work even when the network is gone.
    let catalog = Arc::new(StaticCatalog::new());
    catalog.insert(product(1, 139.9), 5);
    let storage = Arc::new(MemoryStorage::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let store = CartStore::open(
        StoreConfig::default(),
        catalog,
        storage.clone(),
        notifier.clone(),
    );
    store.add_product(1).await.unwrap();

    // Rebuild the store over the same storage, but with a dead stock service.
    let store = CartStore::open(
        StoreConfig::default(),
        Arc::new(DownStock),
        storage,
        notifier,
    );
    store.remove_product(1).await.unwrap();
    assert!(store.cart().await.is_empty());
}

// =============================================================================
// update_product_amount
// =============================================================================

#[tokio::test]
async fn update_within_stock_replaces_amount() {
    let h = harness(&[(1, 139.9, 10)]);
    h.store.add_product(1).await.unwrap();

    h.store.update_product_amount(1, 5).await.unwrap();

    assert_eq!(h.store.cart().await.entry(1).unwrap().amount, 5);
    assert!(h.storage.snapshot(KEY).unwrap().contains("\"amount\":5"));
}

#[tokio::test]
async fn update_beyond_stock_fails_out_of_stock() {
    let h = harness(&[(1, 139.9, 3)]);
    h.store.add_product(1).await.unwrap();
    let persisted = h.storage.snapshot(KEY);

    let err = h.store.update_product_amount(1, 4).await.unwrap_err();

    assert_eq!(err, CartFailure::OutOfStock);
    assert_eq!(h.store.cart().await.entry(1).unwrap().amount, 1);
    assert_eq!(h.storage.snapshot(KEY), persisted);
    assert_eq!(h.notifier.recorded(), vec![CartFailure::OutOfStock]);
}

#[tokio::test]
async fn update_to_nonpositive_amount_is_a_silent_noop() {
    let h = harness(&[(1, 139.9, 10)]);
    h.store.add_product(1).await.unwrap();
    let persisted = h.storage.snapshot(KEY);

    h.store.update_product_amount(1, 0).await.unwrap();
    h.store.update_product_amount(1, -2).await.unwrap();

    assert_eq!(h.store.cart().await.entry(1).unwrap().amount, 1);
    // No failure signaled, no persistence write.
    assert!(h.notifier.recorded().is_empty());
    assert_eq!(h.storage.snapshot(KEY), persisted);
}

#[tokio::test]
async fn update_for_product_not_in_cart_is_a_silent_noop() {
    let h = harness(&[(1, 139.9, 10), (2, 59.9, 10)]);
    h.store.add_product(1).await.unwrap();
    let persisted = h.storage.snapshot(KEY);

    h.store.update_product_amount(2, 3).await.unwrap();

    assert_eq!(h.store.cart().await.entry_count(), 1);
    assert!(h.notifier.recorded().is_empty());
    assert_eq!(h.storage.snapshot(KEY), persisted);
}

#[tokio::test]
async fn update_with_stock_service_down_fails_update_failed() {
    let h = harness(&[(1, 139.9, 10)]);
    h.store.add_product(1).await.unwrap();

    // Same storage, dead stock service.
    let store = CartStore::open(
        StoreConfig::default(),
        Arc::new(DownStock),
        h.storage.clone(),
        h.notifier.clone(),
    );
    let err = store.update_product_amount(1, 3).await.unwrap_err();

    assert_eq!(err, CartFailure::UpdateFailed);
    assert_eq!(store.cart().await.entry(1).unwrap().amount, 1);
    assert_eq!(h.notifier.recorded(), vec![CartFailure::UpdateFailed]);
}

// =============================================================================
// Startup & persistence
// =============================================================================

#[tokio::test]
async fn persisted_cart_survives_reopen() {
    let h = harness(&[(1, 139.9, 5), (2, 59.9, 5)]);
    h.store.add_product(1).await.unwrap();
    h.store.add_product(2).await.unwrap();
    h.store.add_product(1).await.unwrap();
    let before = h.store.cart().await;

    let reopened = CartStore::open(
        StoreConfig::default(),
        h.catalog.clone(),
        h.storage.clone(),
        h.notifier.clone(),
    );

    assert_eq!(reopened.cart().await, before);
}

#[tokio::test]
async fn corrupt_persisted_cart_starts_empty() {
    let storage = Arc::new(MemoryStorage::new());
    storage.seed(KEY, "{definitely not a cart");

    let store = CartStore::open(
        StoreConfig::default(),
        Arc::new(StaticCatalog::new()),
        storage,
        Arc::new(RecordingNotifier::new()),
    );

    assert!(store.cart().await.is_empty());
}

#[tokio::test]
async fn custom_storage_key_is_honored() {
    let config = StoreConfig {
        storage_key: "shop:basket".to_string(),
        ..StoreConfig::default()
    };
    let h = harness(&[(1, 139.9, 5)]);
    let store = CartStore::open(
        config,
        h.catalog.clone(),
        h.storage.clone(),
        h.notifier.clone(),
    );

    store.add_product(1).await.unwrap();

    assert!(h.storage.snapshot("shop:basket").is_some());
    assert!(h.storage.snapshot(KEY).is_none());
}

// =============================================================================
// Serialization of concurrent operations
// =============================================================================

#[tokio::test]
async fn concurrent_adds_of_the_same_product_both_land() {
    let catalog = Arc::new(StaticCatalog::new());
    catalog.insert(product(1, 139.9), 5);
    let store = Arc::new(CartStore::open(
        StoreConfig::default(),
        catalog,
        Arc::new(MemoryStorage::new()),
        Arc::new(RecordingNotifier::new()),
    ));

    let a = tokio::spawn({
        let store = store.clone();
        async move { store.add_product(1).await }
    });
    let b = tokio::spawn({
        let store = store.clone();
        async move { store.add_product(1).await }
    });
    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();

    // Neither increment is lost: operations queue on the cart lock.
    assert_eq!(store.cart().await.entry(1).unwrap().amount, 2);
}
