//! Cache statistics tracking.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Thread-safe cache counters
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    /// Calls that skipped the cache (small payload or zero capacity)
    bypassed: AtomicU64,
    evictions: AtomicU64,
}

impl CacheStats {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_bypass(&self) {
        self.bypassed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    /// Lookups served from the cache
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that ran the inner estimator and stored the result
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Calls passed straight through
    pub fn bypassed(&self) -> u64 {
        self.bypassed.load(Ordering::Relaxed)
    }

    /// Entries dropped to make room
    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    /// Hit rate over cacheable lookups (0.0 when none happened)
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let lookups = hits + self.misses();
        if lookups == 0 {
            0.0
        } else {
            hits as f64 / lookups as f64
        }
    }

    /// Point-in-time copy of the counters
    pub fn snapshot(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            hits: self.hits(),
            misses: self.misses(),
            bypassed: self.bypassed(),
            evictions: self.evictions(),
        }
    }
}

/// Plain copy of [`CacheStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStatsSnapshot {
    /// Cache hits
    pub hits: u64,
    /// Cache misses
    pub misses: u64,
    /// Bypassed calls
    pub bypassed: u64,
    /// Evictions
    pub evictions: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);

        stats.record_miss();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_bypass();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_snapshot() {
        let stats = CacheStats::new();
        stats.record_eviction();
        stats.record_bypass();
        stats.record_bypass();
        assert_eq!(
            stats.snapshot(),
            CacheStatsSnapshot {
                hits: 0,
                misses: 0,
                bypassed: 2,
                evictions: 1,
            }
        );
    }
}
