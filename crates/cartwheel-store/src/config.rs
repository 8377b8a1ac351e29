//! # Store Configuration
//!
//! Configuration for the cart store, loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CARTWHEEL_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The well-known storage key the cart lives under by default.
pub const DEFAULT_STORAGE_KEY: &str = "cartwheel:cart";

/// Cart store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Key the serialized cart is read from and written to.
    /// Default: `cartwheel:cart`
    pub storage_key: String,

    /// Directory for the file storage backend.
    /// `None` means "let [`FileStorage`](crate::FileStorage) resolve the
    /// platform data directory".
    pub data_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: None,
        }
    }
}

impl StoreConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `CARTWHEEL_STORAGE_KEY`: Override the storage key
    /// - `CARTWHEEL_DATA_DIR`: Override the file backend directory
    pub fn from_env() -> Self {
        let mut config = StoreConfig::default();

        if let Ok(key) = std::env::var("CARTWHEEL_STORAGE_KEY") {
            if !key.is_empty() {
                config.storage_key = key;
            }
        }

        if let Ok(dir) = std::env::var("CARTWHEEL_DATA_DIR") {
            if !dir.is_empty() {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.storage_key, "cartwheel:cart");
        assert!(config.data_dir.is_none());
    }
}
