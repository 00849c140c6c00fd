//! Store statistics tracking

/// Counters describing how a store has been used
///
/// Owned by the store and updated from its `&mut self` operations.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    hits: u64,
    misses: u64,
    inserts: u64,
    updates: u64,
    evictions: u64,
}

impl CacheStats {
    /// Create new stats tracker
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_insert(&mut self) {
        self.inserts += 1;
    }

    pub(crate) fn record_update(&mut self) {
        self.updates += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Lookups through `get` that found their key
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups through `get` that missed
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// New keys added
    pub fn inserts(&self) -> u64 {
        self.inserts
    }

    /// Adds that replaced the value of an existing key
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Entries that left the store, for any reason
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Fraction of `get` calls that hit, 0.0 when nothing was looked up
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Zero every counter
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_hit_ratio() {
        let mut stats = CacheStats::new();

        stats.record_hit();
        stats.record_hit();
        stats.record_miss();

        assert_eq!(stats.hits(), 2);
        assert_eq!(stats.misses(), 1);
        assert_eq!(stats.hit_ratio(), 2.0 / 3.0);
    }

    #[test]
    fn test_stats_empty_ratio() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_ratio(), 0.0);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = CacheStats::new();

        stats.record_hit();
        stats.record_miss();
        stats.record_insert();
        stats.record_update();
        stats.record_eviction();
        assert_eq!(stats.evictions(), 1);

        stats.reset();
        assert_eq!(stats, CacheStats::default());
    }
}
