//! # cartwheel-store: Cart Orchestration
//!
//! The `CartStore` and the trait seams it talks through.
//!
//! ## Module Organization
//! ```text
//! cartwheel_store/
//! ├── lib.rs          ◄─── You are here (exports)
//! ├── store.rs        ◄─── CartStore: the three mutations + reads
//! ├── stock.rs        ◄─── StockService seam + StaticCatalog
//! ├── storage.rs      ◄─── CartStorage seam + Memory/File backends
//! ├── notify.rs       ◄─── Notifier seam + LogNotifier/RecordingNotifier
//! └── config.rs       ◄─── StoreConfig (storage key, data dir)
//! ```
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      One Cart Operation                                 │
//! │                                                                         │
//! │  UI event ──► CartStore op ──► lock cart ──► StockService query         │
//! │                                    │              │                     │
//! │                                    │         (may fail: AddFailed /     │
//! │                                    │          UpdateFailed)             │
//! │                                    ▼              ▼                     │
//! │                               validate ◄──────────┘                     │
//! │                                    │                                    │
//! │                         ┌──── ok ──┴── violation ────┐                  │
//! │                         ▼                            ▼                  │
//! │                  persist + swap cart          Notifier.notify           │
//! │                  (write fails: op fails,      cart untouched            │
//! │                   cart untouched)                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart mutex is held for the whole operation, stock round-trip
//! included, so operations apply strictly one at a time even when the UI
//! fires them concurrently.

pub mod config;
pub mod notify;
pub mod stock;
pub mod storage;
pub mod store;

pub use config::StoreConfig;
pub use notify::{LogNotifier, Notifier, RecordingNotifier};
pub use stock::{StaticCatalog, StockError, StockService};
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::CartStore;

// Re-export the core surface so store consumers need a single import.
pub use cartwheel_core::{
    Cart, CartEntry, CartFailure, CartResult, CartTotals, Product, ProductId, Stock,
};
