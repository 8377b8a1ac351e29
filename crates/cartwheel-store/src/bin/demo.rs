//! # Cartwheel Demo
//!
//! Wires a static catalog, a file-backed storage slot and the logging
//! notifier, then walks through a short shopping session. Run it twice to
//! watch the cart survive the "reload".
//!
//! ```text
//! RUST_LOG=debug cargo run --bin cartwheel-demo
//! ```

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cartwheel_core::Product;
use cartwheel_store::{CartStore, FileStorage, LogNotifier, StaticCatalog, StoreConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Default to info; RUST_LOG overrides.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = StoreConfig::from_env();

    let catalog = Arc::new(StaticCatalog::new());
    catalog.insert(
        Product {
            id: 1,
            title: "Trail Runner".to_string(),
            price: 139.9,
            image: "https://cdn.example/trail-runner.jpg".to_string(),
        },
        5,
    );
    catalog.insert(
        Product {
            id: 2,
            title: "Canvas Low-Top".to_string(),
            price: 59.9,
            image: "https://cdn.example/canvas-low-top.jpg".to_string(),
        },
        1,
    );

    let storage = match &config.data_dir {
        Some(dir) => FileStorage::new(dir)?,
        None => FileStorage::open_default()?,
    };
    info!(dir = %storage.dir().display(), "cart persists under");

    let store = CartStore::open(
        config,
        catalog.clone(),
        Arc::new(storage),
        Arc::new(LogNotifier),
    );

    store.add_product(1).await.ok();
    store.add_product(1).await.ok();
    store.add_product(2).await.ok();

    // Stock ceiling for product 2 is 1, so this one is refused.
    if store.add_product(2).await.is_err() {
        info!("second Canvas Low-Top refused, as expected");
    }

    store.update_product_amount(1, 4).await.ok();

    for entry in store.cart().await.entries() {
        info!(
            id = entry.id,
            title = %entry.title,
            amount = entry.amount,
            line = %format!("{:.2}", entry.line_subtotal()),
            "cart line"
        );
    }
    let totals = store.totals().await;
    info!(
        entries = totals.entry_count,
        quantity = totals.total_quantity,
        subtotal = %format!("{:.2}", totals.subtotal),
        "cart totals"
    );

    Ok(())
}
