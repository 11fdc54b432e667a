use crate::cache::config::CacheSpec;
use crate::cache::metrics::{CacheMetrics, CacheMetricsSnapshot};
use lru::LruCache;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::Ordering;
use std::time::Instant;

/// An entry's byte size is derived by serializing the stored value, never
/// declared by the caller.
fn serialized_size<V: Serialize>(value: &V) -> usize {
    serde_json::to_vec(value).map_or(0, |bytes| bytes.len())
}

struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
    size_bytes: usize,
}

struct Inner<V> {
    lru: LruCache<String, CacheEntry<V>>,
    total_bytes: usize,
}

/// A byte-bounded, TTL-expiring cache for one endpoint's responses.
///
/// Entries expire `ttl` after insertion and are treated as absent even while
/// resident (evicted lazily on access). Inserting past the byte budget evicts
/// least-recently-used entries until the aggregate serialized size fits
/// again. Interior locking keeps overlapping logical call paths safe; there
/// is no in-flight request coalescing at this layer.
pub struct Cache<V> {
    store: RwLock<Inner<V>>,
    spec: CacheSpec,
    metrics: CacheMetrics,
}

impl<V: Clone + Serialize> Cache<V> {
    #[must_use]
    pub fn new(spec: CacheSpec) -> Self {
        Self {
            store: RwLock::new(Inner { lru: LruCache::unbounded(), total_bytes: 0 }),
            spec,
            metrics: CacheMetrics::default(),
        }
    }

    /// Returns the fresh value under `key`, if any. Expired entries are
    /// popped on access and count as misses.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut inner = self.store.write();

        let expired = match inner.lru.peek(key) {
            Some(entry) => entry.inserted_at.elapsed() >= self.spec.ttl,
            None => {
                self.metrics.misses.fetch_add(1, Ordering::Relaxed);
                return None;
            }
        };

        if expired {
            if let Some(entry) = inner.lru.pop(key) {
                inner.total_bytes -= entry.size_bytes;
                self.metrics
                    .memory_bytes
                    .fetch_sub(entry.size_bytes as u64, Ordering::Relaxed);
            }
            self.metrics.ttl_evictions.fetch_add(1, Ordering::Relaxed);
            self.metrics.misses.fetch_add(1, Ordering::Relaxed);
            return None;
        }

        // Touch for recency and hand out a clone.
        inner.lru.get(key).map(|entry| {
            self.metrics.hits.fetch_add(1, Ordering::Relaxed);
            entry.value.clone()
        })
    }

    /// Stores `value` under `key`, then evicts LRU entries until the byte
    /// budget holds. A value larger than the whole budget is not stored.
    pub fn insert(&self, key: String, value: V) {
        let size_bytes = serialized_size(&value);
        let mut inner = self.store.write();

        if let Some(previous) = inner.lru.pop(&key) {
            inner.total_bytes -= previous.size_bytes;
            self.metrics
                .memory_bytes
                .fetch_sub(previous.size_bytes as u64, Ordering::Relaxed);
        }

        if size_bytes > self.spec.max_bytes {
            log::warn!(
                "cache entry {key} ({size_bytes} bytes) exceeds the {} byte budget, not storing",
                self.spec.max_bytes
            );
            return;
        }

        inner.lru.push(key, CacheEntry { value, inserted_at: Instant::now(), size_bytes });
        inner.total_bytes += size_bytes;
        self.metrics.inserts.fetch_add(1, Ordering::Relaxed);
        self.metrics.memory_bytes.fetch_add(size_bytes as u64, Ordering::Relaxed);

        while inner.total_bytes > self.spec.max_bytes {
            match inner.lru.pop_lru() {
                Some((_, evicted)) => {
                    inner.total_bytes -= evicted.size_bytes;
                    self.metrics
                        .memory_bytes
                        .fetch_sub(evicted.size_bytes as u64, Ordering::Relaxed);
                    self.metrics.size_evictions.fetch_add(1, Ordering::Relaxed);
                }
                None => break,
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.store.read().lru.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.read().lru.is_empty()
    }

    /// Aggregate serialized size of the live entries.
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.store.read().total_bytes
    }

    #[must_use]
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot()
    }
}
