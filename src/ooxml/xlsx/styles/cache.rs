//! Lazily populated, thread-safe memo table.

use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::RwLock;

/// A get-or-compute map guarded by a parking_lot `RwLock`.
///
/// Misses are computed outside the lock and stored under the write lock.
/// Two threads missing on the same key may both compute; the last one to
/// store wins, which is harmless as long as `compute` is deterministic.
/// Entries are never invalidated implicitly; call [`LazyCache::reset`].
#[derive(Debug)]
pub struct LazyCache<K, V> {
    entries: RwLock<HashMap<K, V>>,
}

impl<K, V> Default for LazyCache<K, V> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<K: Eq + Hash, V: Clone> LazyCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `key`, if any.
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.read().get(key).cloned()
    }

    /// Cached value for `key`, computing and storing it on a miss.
    pub fn get_or_compute(&self, key: K, compute: impl FnOnce() -> V) -> V {
        // Check if we have a cached value (read lock)
        if let Some(value) = self.get(&key) {
            return value;
        }

        let value = compute();

        // Cache the result (write lock)
        self.entries.write().insert(key, value.clone());
        value
    }

    /// Drop every entry.
    pub fn reset(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_compute_once_until_reset() {
        let cache = LazyCache::new();
        let calls = AtomicUsize::new(0);
        let compute = || {
            calls.fetch_add(1, Ordering::SeqCst);
            42
        };

        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.get_or_compute("a", compute), 42);
        assert_eq!(cache.get_or_compute("a", compute), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        cache.reset();
        assert!(cache.is_empty());
        assert_eq!(cache.get_or_compute("a", compute), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_concurrent_population() {
        let cache = Arc::new(LazyCache::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for key in 0..64u32 {
                        assert_eq!(cache.get_or_compute(key, || key * 2), key * 2);
                    }
                    t
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 64);
    }
}
