//! # Cart Storage Seam
//!
//! The persistence slot the cart survives page reloads in: an opaque
//! key-value string store with a single well-known key.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CartStorage                                      │
//! │                                                                         │
//! │  read(key)        ──► Some(serialized cart) | None | StorageError       │
//! │  write(key, json) ──► () | StorageError                                 │
//! │                                                                         │
//! │  • Read once at startup, written after every successful mutation.       │
//! │  • The store never partially writes: a failed write fails the whole     │
//! │    operation and the in-memory cart stays on its previous value.        │
//! │  • Single-consumer slot: no cross-process coordination is attempted.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use directories::ProjectDirs;
use thiserror::Error;

// =============================================================================
// Storage Error
// =============================================================================

/// Why a storage read or write failed.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem-level failure.
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The backend refused the operation.
    #[error("storage backend unavailable: {0}")]
    Backend(String),
}

// =============================================================================
// Cart Storage Trait
// =============================================================================

/// A key-value string slot, shaped like browser local storage.
pub trait CartStorage: Send + Sync {
    /// Returns the stored string for `key`, or `None` if nothing was ever
    /// written there.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the stored string for `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-memory storage for tests.
///
/// ## Extras for Tests
/// - [`snapshot`](MemoryStorage::snapshot) exposes the raw stored string so
///   tests can assert a failed operation wrote nothing
/// - [`set_fail_writes`](MemoryStorage::set_fail_writes) turns every write
///   into a backend error, for exercising persistence-failure paths
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw stored string for `key`.
    pub fn snapshot(&self, key: &str) -> Option<String> {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.get(key).cloned()
    }

    /// Seeds a slot directly, bypassing the trait.
    pub fn seed(&self, key: &str, value: &str) {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.insert(key.to_string(), value.to_string());
    }

    /// Makes every subsequent write fail until switched back off.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl CartStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("writes disabled".to_string()));
        }
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// File Storage
// =============================================================================

/// File-backed storage: one file per key under a data directory.
///
/// ## Path Resolution
/// - macOS: `~/Library/Application Support/com.cartwheel.cartwheel/`
/// - Windows: `%APPDATA%/cartwheel/cartwheel/data/`
/// - Linux: `~/.local/share/cartwheel/`
///
/// Keys are sanitized into file names (`cartwheel:cart` → `cartwheel_cart.json`)
/// so any well-known key is a valid path on every platform.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(FileStorage { dir })
    }

    /// Creates a store under the platform data directory.
    pub fn open_default() -> Result<Self, StorageError> {
        let dirs = ProjectDirs::from("com", "cartwheel", "cartwheel").ok_or_else(|| {
            StorageError::Backend("no home directory to resolve a data dir from".to_string())
        })?;
        FileStorage::new(dirs.data_dir())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", name))
    }

    /// The directory files are kept under.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl CartStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // Write-then-rename so a crash mid-write never leaves a torn cart.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert!(storage.read("cart").unwrap().is_none());

        storage.write("cart", "[]").unwrap();
        assert_eq!(storage.read("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_memory_storage_fail_writes() {
        let storage = MemoryStorage::new();
        storage.write("cart", "[]").unwrap();

        storage.set_fail_writes(true);
        assert!(storage.write("cart", "[1]").is_err());
        // The previous value survives the refused write.
        assert_eq!(storage.snapshot("cart").as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = std::env::temp_dir().join(format!("cartwheel-test-{}", std::process::id()));
        let storage = FileStorage::new(&dir).unwrap();

        assert!(storage.read("cartwheel:cart").unwrap().is_none());
        storage.write("cartwheel:cart", "[{\"id\":1}]").unwrap();
        assert_eq!(
            storage.read("cartwheel:cart").unwrap().as_deref(),
            Some("[{\"id\":1}]")
        );

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_key_sanitization_keeps_keys_distinct_enough() {
        let dir = std::env::temp_dir().join(format!("cartwheel-san-{}", std::process::id()));
        let storage = FileStorage::new(&dir).unwrap();

        assert_eq!(
            storage.path_for("cartwheel:cart").file_name().unwrap(),
            "cartwheel_cart.json"
        );

        std::fs::remove_dir_all(&dir).ok();
    }
}
