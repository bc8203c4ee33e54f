//! Memoized block gas limit overrides.
//!
//! Block assembly may query the gas limit contract for a block hash before full validation of
//! the same hash. The value is parked here and taken back out exactly once.

use super::constants::GAS_LIMIT_OVERRIDE_CACHE_CAPACITY;
use alloy_primitives::{B256, U256};
use parking_lot::Mutex;
use schnellru::{ByLength, LruMap};

/// Bounded, hash-keyed store of pending gas limit overrides.
///
/// Holds at most one value per block hash. The first value added for a hash wins and reads are
/// destructive.
#[derive(Debug)]
pub struct GasLimitOverride {
    cache: Mutex<LruMap<B256, U256, ByLength>>,
}

impl Default for GasLimitOverride {
    fn default() -> Self {
        Self::new()
    }
}

impl GasLimitOverride {
    /// Creates a cache holding the default number of recent block hashes.
    pub fn new() -> Self {
        Self::with_capacity(GAS_LIMIT_OVERRIDE_CACHE_CAPACITY)
    }

    /// Creates a cache holding at most `capacity` block hashes.
    pub fn with_capacity(capacity: u32) -> Self {
        Self { cache: Mutex::new(LruMap::new(ByLength::new(capacity))) }
    }

    /// Removes and returns the override stored for `hash`.
    pub fn pop(&self, hash: &B256) -> Option<U256> {
        let value = self.cache.lock().remove(hash);
        if value.is_some() {
            tracing::trace!(%hash, "Took memoized gas limit override");
        }
        value
    }

    /// Stores `value` for `hash` unless the hash already has one. `None` is ignored.
    pub fn add(&self, hash: B256, value: Option<U256>) {
        let Some(value) = value else { return };

        let mut cache = self.cache.lock();
        if cache.peek(&hash).is_some() {
            return;
        }
        cache.insert(hash, value);
        tracing::trace!(%hash, %value, cached = cache.len(), "Memoized gas limit override");
    }

    /// Number of pending overrides.
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Returns `true` if no override is pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, thread};

    fn hash(n: u8) -> B256 {
        B256::repeat_byte(n)
    }

    #[test]
    fn pop_is_destructive() {
        let cache = GasLimitOverride::new();
        cache.add(hash(1), Some(U256::from(8_000_000u64)));

        assert_eq!(cache.pop(&hash(1)), Some(U256::from(8_000_000u64)));
        assert_eq!(cache.pop(&hash(1)), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn first_add_wins() {
        let cache = GasLimitOverride::new();
        cache.add(hash(1), Some(U256::from(1u64)));
        cache.add(hash(1), Some(U256::from(2u64)));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.pop(&hash(1)), Some(U256::from(1u64)));
    }

    #[test]
    fn adding_none_is_a_noop() {
        let cache = GasLimitOverride::new();
        cache.add(hash(7), None);

        assert!(cache.is_empty());
        assert_eq!(cache.pop(&hash(7)), None);
    }

    #[test]
    fn adding_none_keeps_existing_value() {
        let cache = GasLimitOverride::new();
        cache.add(hash(7), Some(U256::from(5u64)));
        cache.add(hash(7), None);

        assert_eq!(cache.pop(&hash(7)), Some(U256::from(5u64)));
    }

    #[test]
    fn evicts_least_recently_added_beyond_capacity() {
        let capacity = GAS_LIMIT_OVERRIDE_CACHE_CAPACITY as u8;
        let cache = GasLimitOverride::new();
        for n in 0..=capacity {
            cache.add(hash(n), Some(U256::from(n)));
        }

        assert_eq!(cache.len(), capacity as usize);
        assert_eq!(cache.pop(&hash(0)), None);
        for n in 1..=capacity {
            assert_eq!(cache.pop(&hash(n)), Some(U256::from(n)));
        }
    }

    #[test]
    fn custom_capacity_is_respected() {
        let cache = GasLimitOverride::with_capacity(2);
        cache.add(hash(1), Some(U256::from(1u64)));
        cache.add(hash(2), Some(U256::from(2u64)));
        cache.add(hash(3), Some(U256::from(3u64)));

        assert_eq!(cache.pop(&hash(1)), None);
        assert_eq!(cache.pop(&hash(2)), Some(U256::from(2u64)));
        assert_eq!(cache.pop(&hash(3)), Some(U256::from(3u64)));
    }

    #[test]
    fn concurrent_adds_for_same_hash_keep_one_value() {
        let cache = Arc::new(GasLimitOverride::new());
        let handles: Vec<_> = (1..=8u64)
            .map(|n| {
                let cache = cache.clone();
                thread::spawn(move || cache.add(hash(9), Some(U256::from(n))))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 1);
        let value = cache.pop(&hash(9)).unwrap();
        assert!((1..=8u64).map(U256::from).any(|v| v == value));
        assert_eq!(cache.pop(&hash(9)), None);
    }
}
