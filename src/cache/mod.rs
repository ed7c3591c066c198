//! Memoizing LRU decorator for any [`Estimator`].
//!
//! Caching is opt-in. Small payloads are cheaper to estimate than to hash,
//! so only payloads of at least [`DEFAULT_MIN_CACHE_BYTES`] go through the
//! cache; everything else is passed straight to the inner estimator.
//!
//! The key is computed and the inner estimator runs outside the lock; the
//! lock is held only for the O(1) list and index update.
//!
//! # Example
//!
//! ```
//! use tokenest::cache::with_cache;
//! use tokenest::{DefaultEstimator, Estimator, Options};
//!
//! let estimator = with_cache(DefaultEstimator::new(), 1024);
//! let text = "lorem ipsum ".repeat(100);
//! let first = estimator.estimate_text(&text, &Options::default());
//! let second = estimator.estimate_text(&text, &Options::default());
//! assert_eq!(first, second);
//! assert_eq!(estimator.stats().hits(), 1);
//! ```

mod key;
mod stats;

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

use crate::estimate::{Estimate, Estimator, ImageCounts, Options};

use key::{cache_key, InputKind};
pub use stats::{CacheStats, CacheStatsSnapshot};

/// Payloads shorter than this are never cached
pub const DEFAULT_MIN_CACHE_BYTES: usize = 512;

/// Wrap `inner` with an LRU cache of `capacity` entries.
///
/// A capacity of 0 disables caching; every call goes to `inner`.
pub fn with_cache<E: Estimator>(inner: E, capacity: usize) -> CachedEstimator<E> {
    CachedEstimator::new(inner, capacity)
}

/// Estimator decorator backed by a bounded LRU
pub struct CachedEstimator<E> {
    inner: E,
    cache: Option<Mutex<LruCache<u64, Estimate>>>,
    min_bytes: usize,
    stats: CacheStats,
}

impl<E: Estimator> CachedEstimator<E> {
    /// Create a cache of `capacity` entries around `inner`
    pub fn new(inner: E, capacity: usize) -> Self {
        let cache = NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap)));
        Self {
            inner,
            cache,
            min_bytes: DEFAULT_MIN_CACHE_BYTES,
            stats: CacheStats::new(),
        }
    }

    /// Set the minimum payload size that is cached
    pub fn with_min_bytes(mut self, min_bytes: usize) -> Self {
        self.min_bytes = min_bytes;
        self
    }

    /// Wrapped estimator
    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Hit, miss, bypass and eviction counters
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Maximum entries, or 0 when caching is disabled
    pub fn capacity(&self) -> usize {
        self.cache
            .as_ref()
            .map_or(0, |cache| cache.lock().cap().get())
    }

    /// Entries currently held
    pub fn len(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.lock().len())
    }

    /// Whether no entries are held
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry
    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().clear();
        }
    }

    fn cached<F>(&self, payload: &[u8], key: impl FnOnce() -> u64, compute: F) -> Estimate
    where
        F: FnOnce() -> Estimate,
    {
        let cache = match &self.cache {
            Some(cache) if payload.len() >= self.min_bytes => cache,
            _ => {
                self.stats.record_bypass();
                return compute();
            },
        };

        let key = key();
        let hit = cache.lock().get(&key).cloned();
        if let Some(hit) = hit {
            self.stats.record_hit();
            return hit;
        }

        self.stats.record_miss();
        let estimate = compute();

        let evicted = cache.lock().push(key, estimate.clone());
        if let Some((old_key, _)) = evicted {
            // push also returns the previous value when a racing caller
            // stored the same key first; that is a replacement, not an eviction
            if old_key != key {
                self.stats.record_eviction();
                tracing::debug!(evicted = old_key, "cache eviction");
            }
        }

        estimate
    }
}

impl<E: Estimator> Estimator for CachedEstimator<E> {
    fn estimate_bytes(&self, payload: &[u8], opts: &Options) -> Estimate {
        self.cached(
            payload,
            || cache_key(InputKind::Bytes, payload, ImageCounts::default(), 0, opts),
            || self.inner.estimate_bytes(payload, opts),
        )
    }

    fn estimate_text(&self, text: &str, opts: &Options) -> Estimate {
        let payload = text.as_bytes();
        self.cached(
            payload,
            || cache_key(InputKind::Text, payload, ImageCounts::default(), 0, opts),
            || self.inner.estimate_text(text, opts),
        )
    }

    fn estimate_input(
        &self,
        text: &str,
        images: ImageCounts,
        message_count: usize,
        opts: &Options,
    ) -> Estimate {
        let payload = text.as_bytes();
        self.cached(
            payload,
            || cache_key(InputKind::Input, payload, images, message_count, opts),
            || self.inner.estimate_input(text, images, message_count, opts),
        )
    }

    // Output estimates share entries with text estimates
    fn estimate_output(&self, text: &str, opts: &Options) -> Estimate {
        self.estimate_text(text, opts)
    }
}

impl<E> std::fmt::Debug for CachedEstimator<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedEstimator")
            .field("enabled", &self.cache.is_some())
            .field("min_bytes", &self.min_bytes)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
