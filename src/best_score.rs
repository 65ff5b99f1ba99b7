//! Best score tracking
//!
//! Persisted as a decimal string under [`BestScore::STORAGE_KEY`]. A missing or
//! corrupt value reads as 0.

use crate::persistence::{Storage, StorageError};

/// Highest score across runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestScore {
    best: u64,
}

impl BestScore {
    /// Storage key for the persisted value
    pub const STORAGE_KEY: &'static str = "neon_dodge_best";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Parse a stored value, falling back to 0
    pub fn parse(raw: Option<&str>) -> Self {
        let best = match raw {
            Some(text) => text.trim().parse::<u64>().unwrap_or_else(|_| {
                log::warn!("Ignoring unreadable best score {:?}", text);
                0
            }),
            None => 0,
        };
        Self { best }
    }

    /// Load from storage
    pub fn load<S: Storage>(storage: &S) -> Self {
        let best = Self::parse(storage.get(Self::STORAGE_KEY).as_deref());
        log::info!("Best score: {}", best.best);
        best
    }

    pub fn get(&self) -> u64 {
        self.best
    }

    /// Take `score` if it beats the current best. Returns true when it did.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    pub fn save<S: Storage>(&self, storage: &mut S) -> Result<(), StorageError> {
        storage.set(Self::STORAGE_KEY, &self.best.to_string())
    }

    /// Record a finished run and persist a new best.
    ///
    /// A failed write keeps the in-memory best and is only logged.
    pub fn submit<S: Storage>(&mut self, score: u64, storage: &mut S) -> bool {
        if !self.record(score) {
            return false;
        }
        log::info!("New best score: {}", self.best);
        if let Err(err) = self.save(storage) {
            log::warn!("Could not save best score: {}", err);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Option<String> {
            Some("10".to_string())
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Rejected("read only".into()))
        }
    }

    #[test]
    fn test_parse_defaults_to_zero() {
        assert_eq!(BestScore::parse(None).get(), 0);
        assert_eq!(BestScore::parse(Some("")).get(), 0);
        assert_eq!(BestScore::parse(Some("banana")).get(), 0);
        assert_eq!(BestScore::parse(Some("-4")).get(), 0);
        assert_eq!(BestScore::parse(Some(" 1234 ")).get(), 1234);
    }

    #[test]
    fn test_best_only_increases() {
        let mut storage = MemoryStorage::with_item(BestScore::STORAGE_KEY, "300");
        let mut best = BestScore::load(&storage);
        assert_eq!(best.get(), 300);

        assert!(best.submit(450, &mut storage));
        assert_eq!(best.get(), 450);
        assert_eq!(storage.get(BestScore::STORAGE_KEY).as_deref(), Some("450"));

        assert!(!best.submit(200, &mut storage));
        assert_eq!(best.get(), 450);
        assert_eq!(storage.get(BestScore::STORAGE_KEY).as_deref(), Some("450"));
    }

    #[test]
    fn test_equal_score_is_not_a_new_best() {
        let mut best = BestScore::new(100);
        assert!(!best.record(100));
    }

    #[test]
    fn test_failed_write_keeps_memory_value() {
        let mut storage = ReadOnlyStorage;
        let mut best = BestScore::load(&storage);
        assert!(best.submit(50, &mut storage));
        assert_eq!(best.get(), 50);
    }
}
