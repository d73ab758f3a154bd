//! Bounded least-recently-used cache of transliteration results.
//!
//! A thin wrapper over [`moka::sync::Cache`] with the LRU eviction policy and
//! an entry-count bound.  Housekeeping runs after every insert, so the bound
//! holds as soon as `insert` returns and eviction order follows the exact
//! sequence of reads and writes.
//!
//! A capacity of `0` stores nothing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use moka::notification::RemovalCause;
use moka::policy::EvictionPolicy;
use moka::sync::Cache;

use super::engine::TransliterationResult;

/// Lifetime hit/miss/eviction counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

/// Source text → shared result, keyed byte for byte.
pub(crate) struct ResultCache {
    cache: Option<Cache<String, Arc<TransliterationResult>>>,
    counters: Arc<Counters>,
}

impl ResultCache {
    pub fn new(capacity: usize) -> Self {
        let counters = Arc::new(Counters::default());

        let cache = (capacity > 0).then(|| {
            let listener = Arc::clone(&counters);
            Cache::builder()
                .max_capacity(capacity as u64)
                .eviction_policy(EvictionPolicy::lru())
                .eviction_listener(move |key: Arc<String>, _, cause| {
                    if cause == RemovalCause::Size {
                        listener.evictions.fetch_add(1, Ordering::Relaxed);
                        log::trace!("braille cache evicted entry (len={})", key.len());
                    }
                })
                .build()
        });

        Self { cache, counters }
    }

    pub fn get(&self, text: &str) -> Option<Arc<TransliterationResult>> {
        let hit = self.cache.as_ref().and_then(|cache| cache.get(text));
        let counter = if hit.is_some() {
            &self.counters.hits
        } else {
            &self.counters.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        hit
    }

    pub fn insert(&self, text: String, result: Arc<TransliterationResult>) {
        if let Some(cache) = &self.cache {
            cache.insert(text, result);
            cache.run_pending_tasks();
        }
    }

    pub fn len(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| {
            cache.run_pending_tasks();
            cache.entry_count() as usize
        })
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            evictions: self.counters.evictions.load(Ordering::Relaxed),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn result(text: &str) -> Arc<TransliterationResult> {
        Arc::new(TransliterationResult {
            source: text.to_owned(),
            braille: text.to_uppercase(),
        })
    }

    fn put(cache: &ResultCache, text: &str) {
        cache.insert(text.to_owned(), result(text));
    }

    #[test]
    fn stores_and_returns_results() {
        let cache = ResultCache::new(4);
        put(&cache, "ab");
        assert_eq!(cache.get("ab").unwrap().braille, "AB");
        assert!(cache.get("cd").is_none());
    }

    #[test]
    fn evicts_least_recently_used() {
        let cache = ResultCache::new(2);
        put(&cache, "a");
        put(&cache, "b");
        assert!(cache.get("a").is_some());
        put(&cache, "c");

        assert_eq!(cache.len(), 2);
        assert!(cache.get("b").is_none());
        assert!(cache.get("a").is_some());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let cache = ResultCache::new(0);
        put(&cache, "a");
        assert!(cache.get("a").is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn stats_count_hits_misses_and_evictions() {
        let cache = ResultCache::new(1);
        put(&cache, "a");
        cache.get("a");
        cache.get("b");
        put(&cache, "b");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.evictions, 1);
    }
}
