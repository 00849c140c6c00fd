//! LRU (Least Recently Used) store
//!
//! A key lookup index composed with an arena-backed recency list. The index
//! maps each key to its entry's slot; the list owns the entries and orders them
//! from most to least recently used. Every removal goes through one helper that
//! drops the entry from both structures before the eviction callback runs.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use ahash::RandomState;
use tracing::{debug, trace};

use crate::config::LruConfig;
use crate::error::{Error, Result};
use crate::list::RecencyList;
use crate::stats::CacheStats;

/// Callback invoked with every entry that leaves the store
pub type EvictCallback<K, V> = Box<dyn FnMut(&K, &V)>;

/// Why an entry left the store
#[derive(Debug, Clone, Copy)]
enum Reason {
    Overflow,
    Remove,
    RemoveOldest,
    Resize,
    Purge,
}

/// Fixed-capacity store with least-recently-used eviction
///
/// Not thread-safe. Wrap it in a lock if it must be shared.
///
/// ```
/// use lrustore::Lru;
///
/// let mut lru = Lru::new(2).unwrap();
/// lru.add(1, "a");
/// lru.add(2, "b");
/// lru.get(&1);
///
/// // 2 is now the least recently used key
/// assert!(lru.add(3, "c"));
/// assert_eq!(lru.keys(), vec![1, 3]);
/// ```
pub struct Lru<K, V> {
    index: HashMap<K, usize, RandomState>,
    list: RecencyList<K, V>,
    capacity: usize,
    on_evict: Option<EvictCallback<K, V>>,
    stats: CacheStats,
}

impl<K, V> Lru<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a store holding at most `capacity` entries
    ///
    /// # Errors
    /// * `Error::InvalidCapacity` - capacity is 0
    pub fn new(capacity: usize) -> Result<Self> {
        Self::build(capacity, None)
    }

    /// Create a store that calls `on_evict` for every entry that leaves it
    ///
    /// The callback fires on overflow eviction, `remove`, `remove_oldest`,
    /// `resize` and `purge`. It does not fire when `add` replaces a value.
    pub fn with_evict<F>(capacity: usize, on_evict: F) -> Result<Self>
    where
        F: FnMut(&K, &V) + 'static,
    {
        Self::build(capacity, Some(Box::new(on_evict)))
    }

    /// Create a store from a config block
    pub fn from_config(config: LruConfig, on_evict: Option<EvictCallback<K, V>>) -> Result<Self> {
        config.validate()?;
        Self::build(config.capacity, on_evict)
    }

    fn build(capacity: usize, on_evict: Option<EvictCallback<K, V>>) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        debug!(capacity, evict_callback = on_evict.is_some(), "created lru store");

        Ok(Self {
            index: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            list: RecencyList::with_capacity(capacity),
            capacity,
            on_evict,
            stats: CacheStats::new(),
        })
    }

    /// Add a value, returning true if an older entry was evicted to fit it
    ///
    /// An existing key has its value replaced and becomes the most recently
    /// used entry.
    pub fn add(&mut self, key: K, value: V) -> bool {
        if let Some(&idx) = self.index.get(&key) {
            if let Some(slot) = self.list.value_mut(idx) {
                *slot = value;
            }
            self.list.move_to_front(idx);
            self.stats.record_update();
            return false;
        }

        let idx = self.list.push_front(key.clone(), value);
        self.index.insert(key, idx);
        self.stats.record_insert();

        let evict = self.list.len() > self.capacity;
        if evict {
            self.evict_oldest(Reason::Overflow);
        }
        evict
    }

    /// Look up a value and mark it as most recently used
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.index.get(key) {
            Some(&idx) => {
                self.stats.record_hit();
                self.list.move_to_front(idx);
                self.list.entry(idx).map(|(_, value)| value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Look up a value without touching its recency
    pub fn peek(&self, key: &K) -> Option<&V> {
        let &idx = self.index.get(key)?;
        self.list.entry(idx).map(|(_, value)| value)
    }

    /// Check for a key without touching its recency
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Remove a key, returning whether it was present
    pub fn remove(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&idx) => self.evict(idx, Reason::Remove).is_some(),
            None => false,
        }
    }

    /// Remove and return the least recently used entry
    ///
    /// Counts as a removal, so the eviction callback fires.
    pub fn remove_oldest(&mut self) -> Option<(K, V)> {
        self.evict_oldest(Reason::RemoveOldest)
    }

    /// The least recently used entry, without touching it
    pub fn get_oldest(&self) -> Option<(&K, &V)> {
        self.list.entry(self.list.back()?)
    }

    /// Snapshot of all keys, least recently used first
    pub fn keys(&self) -> Vec<K> {
        self.list.iter_from_back().map(|(key, _)| key.clone()).collect()
    }

    /// Number of entries in the store
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.list.len() == 0
    }

    /// Current capacity
    pub fn cap(&self) -> usize {
        self.capacity
    }

    /// Change the capacity, returning how many entries were evicted to fit
    ///
    /// Shrinking evicts least recently used entries first. A capacity of 0 is
    /// accepted and empties the store; afterwards every `add` of a new key
    /// evicts that key straight away.
    pub fn resize(&mut self, capacity: usize) -> usize {
        let diff = self.list.len().saturating_sub(capacity);
        for _ in 0..diff {
            self.evict_oldest(Reason::Resize);
        }

        debug!(old = self.capacity, new = capacity, evicted = diff, "resized lru store");
        self.capacity = capacity;
        diff
    }

    /// Evict every entry, calling the eviction callback for each
    ///
    /// Capacity is kept.
    pub fn purge(&mut self) {
        let count = self.list.len();
        while self.evict_oldest(Reason::Purge).is_some() {}
        self.index.clear();
        self.list.clear();

        debug!(count, "purged lru store");
    }

    /// Usage counters
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Zero the usage counters without touching entries
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    fn evict_oldest(&mut self, reason: Reason) -> Option<(K, V)> {
        let idx = self.list.back()?;
        self.evict(idx, reason)
    }

    fn evict(&mut self, idx: usize, reason: Reason) -> Option<(K, V)> {
        let (key, value) = self.list.remove(idx)?;
        let removed = self.index.remove(&key);
        debug_assert_eq!(removed, Some(idx), "index out of sync with recency list");

        self.stats.record_eviction();
        trace!(?reason, len = self.list.len(), "evicted entry");

        if let Some(on_evict) = self.on_evict.as_mut() {
            on_evict(&key, &value);
        }
        Some((key, value))
    }
}

impl<K, V> fmt::Debug for Lru<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lru")
            .field("len", &self.list.len())
            .field("capacity", &self.capacity)
            .field("evict_callback", &self.on_evict.is_some())
            .finish()
    }
}
