//! Process-local code → target cache.

use arc_swap::ArcSwap;
use dashmap::DashMap;
use std::sync::Arc;

/// Concurrent in-memory map from short code to target URL.
///
/// Entries carry no timestamp; [`HotCache::clear`] is the only eviction and
/// is driven by the cache sweeper. Presence of a code is a hint for fast
/// collision rejection, never proof that a code is unused.
///
/// `clear` swaps in a fresh map, so readers see either the full old map or
/// the empty new one. A `put` racing with `clear` may land in the discarded
/// map and be lost, which only costs a later store round-trip.
#[derive(Debug)]
pub struct HotCache {
    entries: ArcSwap<DashMap<String, String>>,
}

impl HotCache {
    pub fn new() -> Self {
        Self {
            entries: ArcSwap::from_pointee(DashMap::new()),
        }
    }

    /// Inserts or replaces a mapping. Last writer wins.
    pub fn put(&self, code: impl Into<String>, target: impl Into<String>) {
        self.entries.load().insert(code.into(), target.into());
    }

    /// Looks up a code, returning a clone of the cached target.
    pub fn get(&self, code: &str) -> Option<String> {
        self.entries.load().get(code).map(|v| v.value().clone())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.load().contains_key(code)
    }

    /// Drops every entry at once and returns how many were discarded.
    pub fn clear(&self) -> usize {
        let previous = self.entries.swap(Arc::new(DashMap::new()));
        previous.len()
    }

    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.load().is_empty()
    }
}

impl Default for HotCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_put_and_get() {
        let cache = HotCache::new();
        cache.put("abcd1234", "https://example.com");

        assert_eq!(cache.get("abcd1234").as_deref(), Some("https://example.com"));
        assert!(cache.contains("abcd1234"));
        assert!(cache.get("missing").is_none());
    }

    #[test]
    fn test_put_overwrites() {
        let cache = HotCache::new();
        cache.put("code", "https://first.com");
        cache.put("code", "https://second.com");

        assert_eq!(cache.get("code").as_deref(), Some("https://second.com"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_empties_cache() {
        let cache = HotCache::new();
        cache.put("a1b2", "https://a.com");
        cache.put("c3d4", "https://c.com");

        assert_eq!(cache.clear(), 2);
        assert!(cache.is_empty());
        assert!(cache.get("a1b2").is_none());

        cache.put("e5f6", "https://e.com");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_concurrent_writers() {
        let cache = Arc::new(HotCache::new());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..250 {
                        cache.put(format!("{t}-{i}"), "https://example.com");
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 2000);
    }
}
