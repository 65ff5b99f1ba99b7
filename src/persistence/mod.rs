//! Key/value persistence
//!
//! The game only stores small string values (the best score). Browsers use
//! LocalStorage; native builds and tests use an in-memory map.

use std::collections::HashMap;
use std::fmt;

#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;

/// Errors from a storage backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No backing store (e.g. storage disabled by the browser)
    Unavailable,
    /// The host refused the write (quota, privacy mode, ...)
    Rejected(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "storage is unavailable"),
            StorageError::Rejected(reason) => write!(f, "storage write rejected: {}", reason),
        }
    }
}

impl std::error::Error for StorageError {}

/// String key/value store
pub trait Storage {
    /// Read a value; `None` when absent or unreadable
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Volatile store for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one entry
    pub fn with_item(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.items.insert(key.to_string(), value.to_string());
        storage
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_roundtrip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("k"), None);
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_error_display() {
        let err = StorageError::Rejected("QuotaExceededError".into());
        assert!(err.to_string().contains("QuotaExceededError"));
    }
}
