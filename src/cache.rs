//! TTL-bounded memoization for expensive repository queries
//!
//! A single interactive session issues the same aggregation several times
//! (heading, history, changes, post-commit summary); the cache collapses those
//! into one capture while a restarted session sees fresh state.

use log::debug;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

struct Entry<V> {
    value: V,
    captured_at: Instant,
}

/// Memoizes computed values per key for a fixed time window.
///
/// Timing uses [`Instant`], so wall-clock adjustments cannot invalidate or
/// resurrect entries. Single-threaded semantics: there is exactly one logical
/// thread of control in the workflow, so no recomputation guard is needed.
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, Entry<V>>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    /// Creates an empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Returns the cached value for `key` if it is still live, otherwise
    /// invokes `compute`, stores the result with the current timestamp, and
    /// returns a clone of it. A stale entry is replaced atomically.
    pub fn get_or_compute<F>(&mut self, key: K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        let now = Instant::now();

        if let Some(entry) = self.entries.get(&key)
            && now.duration_since(entry.captured_at) <= self.ttl
        {
            debug!("Cache hit (age {:?})", now.duration_since(entry.captured_at));
            return entry.value.clone();
        }

        debug!("Cache miss, computing fresh value");
        let value = compute();
        self.entries.insert(
            key,
            Entry {
                value: value.clone(),
                captured_at: now,
            },
        );
        value
    }
}
