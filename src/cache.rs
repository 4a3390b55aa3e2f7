//! Content-addressed map used for both the unique table and the computed table.
//!
//! The map never loses entries on its own: there are no collisions and no
//! eviction. The computed table may be [cleared][Cache::clear] at any time, which
//! only costs performance; the unique table wraps the same map but never
//! exposes `clear` (see [`Table`][crate::table::Table]).

use std::collections::HashMap;
use std::hash::Hash;

/// Snapshot of cache statistics.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub len: usize,
}

/// A cache backed by [HashMap], counting hits and misses.
pub struct Cache<K, V> {
    map: HashMap<K, V>,
    hits: usize,
    misses: usize,
}

impl<K, V> Default for Cache<K, V> {
    fn default() -> Self {
        Self::new(14)
    }
}

impl<K, V> Cache<K, V> {
    /// Create a new cache with room for `2^bits` entries before it grows.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Bits should be in the range 0..=31");
        Self {
            map: HashMap::with_capacity(1 << bits),
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the number of cache hits.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Returns the number of cache misses.
    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            len: self.map.len(),
        }
    }

    /// Clears all entries. Statistics are kept.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq,
    V: Copy,
{
    /// Looks up a key in the cache.
    #[inline]
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.map.get(key) {
            Some(&v) => {
                self.hits += 1;
                Some(v)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Inserts a key-value pair, keeping the existing value if the key is present.
    ///
    /// Returns the value now associated with `key`.
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> V {
        *self.map.entry(key).or_insert(value)
    }
}
