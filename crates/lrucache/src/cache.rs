//! LruCache: recency list and key index kept in step

use std::borrow::Borrow;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::index::CacheIndex;
use crate::list::{Iter, RecencyList};
use crate::stats::CacheStats;

/// Fixed-capacity cache with least-recently-used eviction.
///
/// Every operation that changes the list topology updates the index before
/// returning, so the two are never observed out of step.
#[derive(Debug)]
pub struct LruCache<K, V> {
    list: RecencyList<K, V>,
    index: CacheIndex<K>,
    stats: CacheStats,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// * [`Error::ZeroCapacity`] if `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }

        debug!(capacity, "created LRU cache");
        Ok(Self {
            list: RecencyList::with_capacity(capacity),
            index: CacheIndex::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
        })
    }

    /// Look up `key` and mark it most recently used.
    ///
    /// A miss has no effect on the cache contents or order.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(handle) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };

        let moved = self.list.move_to_front(handle);
        debug_assert!(moved, "index holds a stale handle");
        self.stats.record_hit();
        self.list.get(handle).map(|node| node.value())
    }

    /// Insert or overwrite `key`, making it the most recently used entry.
    ///
    /// Evicts the least recently used entry first when inserting a new key
    /// into a full cache.
    pub fn set(&mut self, key: K, value: V) {
        self.push(key, value);
    }

    /// Like [`set`](Self::set), but returns the evicted entry, if any
    pub fn push(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(handle) = self.index.get(&key) {
            if let Some(node) = self.list.get_mut(handle) {
                *node.value_mut() = value;
            }
            let moved = self.list.move_to_front(handle);
            debug_assert!(moved, "index holds a stale handle");
            self.stats.record_update();
            return None;
        }

        let evicted = if self.is_full() { self.evict() } else { None };

        let handle = self.list.add_to_head(key.clone(), value);
        self.index.set(key, handle);
        self.stats.record_insert();
        debug_assert!(self.len() <= self.capacity);

        evicted
    }

    /// Look up `key` without changing its recency
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.get(key)?;
        self.list.get(handle).map(|node| node.value())
    }

    /// Check whether `key` is cached, without changing its recency
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains(key)
    }

    /// Remove `key` from the cache, returning its value
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.remove(key)?;
        let entry = self.list.remove(handle);
        debug_assert!(entry.is_some(), "index holds a stale handle");
        entry.map(|(_, value)| value)
    }

    /// The entry that would be evicted next
    pub fn lru(&self) -> Option<(&K, &V)> {
        let handle = self.list.tail()?;
        self.list.get(handle).map(|node| (node.key(), node.value()))
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Check if the next new key will evict
    pub fn is_full(&self) -> bool {
        self.list.len() == self.capacity
    }

    /// Get the cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Drop every entry. Statistics are kept.
    pub fn clear(&mut self) {
        trace!(entries = self.len(), "clearing LRU cache");
        self.list.clear();
        self.index.clear();
    }

    /// Iterate entries from most to least recently used
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.list.iter()
    }

    /// Keys from most to least recently used
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.list.iter().map(|(key, _)| key)
    }

    /// Verify that the list and index describe the same set of entries
    pub fn check_invariants(&self) -> Result<()> {
        self.list.check_invariants()?;

        if self.index.len() != self.list.len() {
            return Err(Error::invariant(format!(
                "index has {} keys, list has {} nodes",
                self.index.len(),
                self.list.len()
            )));
        }
        if self.list.len() > self.capacity {
            return Err(Error::invariant(format!(
                "{} entries exceed capacity {}",
                self.list.len(),
                self.capacity
            )));
        }

        for (key, handle) in self.index.iter() {
            let node = self
                .list
                .get(handle)
                .ok_or_else(|| Error::invariant("index holds a stale handle"))?;
            if node.key() != key {
                return Err(Error::invariant("index entry points at another key's node"));
            }
        }

        Ok(())
    }

    fn evict(&mut self) -> Option<(K, V)> {
        let entry = self.list.remove_from_tail();
        debug_assert!(entry.is_some(), "evicting from an empty list");
        let (key, value) = entry?;

        let removed = self.index.remove(&key);
        debug_assert!(removed.is_some(), "evicted key was not indexed");
        self.stats.record_eviction();
        trace!(capacity = self.capacity, "evicted least recently used entry");

        Some((key, value))
    }
}
