//! Time-bounded in-memory cache owned by a single provider client.
//!
//! Each client instance holds its own `TtlCache`, keyed by a string built
//! from the call parameters. Entries expire `ttl` after the last insert;
//! an expired read is a miss. There is no coalescing: concurrent misses
//! for the same key may each refetch, which is acceptable under the
//! staleness tolerance the TTL already grants.

use std::time::Duration;

use moka::sync::Cache;

/// Mapping from cache key to value with a fixed time-to-live.
pub struct TtlCache<T: Clone + Send + Sync + 'static> {
    ttl: Duration,
    entries: Cache<String, T>,
}

impl<T: Clone + Send + Sync + 'static> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Cache::builder().time_to_live(ttl).build(),
        }
    }

    /// Configured time-to-live for entries in this cache.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a key, treating entries past their time-to-live as misses.
    pub fn get(&self, key: &str) -> Option<T> {
        self.entries.get(key)
    }

    /// Store a value; it expires `ttl` from now.
    pub fn insert(&self, key: &str, value: T) {
        self.entries.insert(key.to_string(), value);
    }

    /// Evict every entry immediately.
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn hit_within_ttl() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("EURUSD", 1.085f64);

        assert_eq!(cache.get("EURUSD"), Some(1.085));
    }

    #[test]
    fn miss_after_expiry() {
        let cache = TtlCache::new(Duration::from_millis(50));
        cache.insert("EURUSD", 1.085f64);

        sleep(Duration::from_millis(120));
        assert_eq!(cache.get("EURUSD"), None);
    }

    #[test]
    fn clear_evicts_everything() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("a", 1u32);
        cache.insert("b", 2u32);

        cache.clear();
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn reinsert_refreshes_expiry() {
        let cache = TtlCache::new(Duration::from_millis(150));
        cache.insert("k", 1u32);

        sleep(Duration::from_millis(100));
        cache.insert("k", 2u32);

        // Past the first insert's deadline but within the second's.
        sleep(Duration::from_millis(100));
        assert_eq!(cache.get("k"), Some(2));
    }
}
