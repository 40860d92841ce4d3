//! TTL cache owned by a single provider.
//!
//! Entries expire exactly `ttl` after they are set: a read at or after the
//! deadline is a miss and never returns the stale value. There is no eviction
//! beyond TTL; expired entries keep their memory until the key is written
//! again, which is acceptable for the bounded working set of one process.
//!
//! Two tasks missing on the same key may both fetch; the later `set` wins.
//!
//! Deadlines use `tokio::time::Instant`, so a paused test runtime can move
//! the clock with `tokio::time::advance`. Outside a runtime it reads the
//! system monotonic clock.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use btc_data_provider::TtlCache;
//!
//! let cache = TtlCache::new(Duration::from_secs(300));
//! cache.set("block:0", 42u64);
//! cache.set_with_ttl("utxos:bc1q", 7u64, Duration::from_secs(60));
//! assert_eq!(cache.get("block:0"), Some(42));
//! ```

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::time::Instant;

use crate::metrics::{CacheMetrics, CacheStats};

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    default_ttl: Duration,
    metrics: CacheMetrics,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
            metrics: CacheMetrics::default(),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Store with the cache-wide default TTL.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.set_at(key.into(), value, ttl, Instant::now());
    }

    /// Stored entries, live or expired.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.metrics.snapshot(self.len())
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<V> {
        let live = self
            .entries
            .read()
            .get(key)
            .filter(|entry| now < entry.expires_at)
            .map(|entry| entry.value.clone());

        if live.is_some() {
            self.metrics.record_hit();
        } else {
            self.metrics.record_miss();
        }
        live
    }

    fn set_at(&self, key: String, value: V, ttl: Duration, now: Instant) {
        let entry = CacheEntry {
            value,
            expires_at: now + ttl,
        };
        self.entries.write().insert(key, entry);
    }
}
