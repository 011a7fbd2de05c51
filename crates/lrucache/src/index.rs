//! Cache index: key -> node handle lookup

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;

use crate::list::NodeHandle;

/// Secondary access path into a [`RecencyList`](crate::RecencyList).
///
/// Holds handles only; the list owns the nodes.
#[derive(Debug)]
pub struct CacheIndex<K> {
    map: HashMap<K, NodeHandle, RandomState>,
}

impl<K: Hash + Eq> Default for CacheIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq> CacheIndex<K> {
    /// Create an empty index
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty index sized for `capacity` keys
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    /// Check whether `key` is indexed
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Handle of the node holding `key`
    pub fn get<Q>(&self, key: &Q) -> Option<NodeHandle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).copied()
    }

    /// Point `key` at `handle`, returning the handle it replaced
    pub fn set(&mut self, key: K, handle: NodeHandle) -> Option<NodeHandle> {
        self.map.insert(key, handle)
    }

    /// Drop the entry for `key`. No-op when absent.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<NodeHandle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key)
    }

    /// Number of indexed keys
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Indexed keys, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.map.keys()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, NodeHandle)> + '_ {
        self.map.iter().map(|(k, h)| (k, *h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::RecencyList;

    #[test]
    fn test_index_set_get_remove() {
        let mut list = RecencyList::new();
        let mut index = CacheIndex::new();

        let h = list.add_to_head("a".to_string(), 1);
        assert_eq!(index.set("a".to_string(), h), None);

        assert!(index.contains("a"));
        assert_eq!(index.get("a"), Some(h));
        assert_eq!(index.len(), 1);

        assert_eq!(index.remove("a"), Some(h));
        assert!(!index.contains("a"));
        assert!(index.is_empty());
    }

    #[test]
    fn test_index_set_overwrites() {
        let mut list = RecencyList::new();
        let mut index = CacheIndex::new();

        let h1 = list.add_to_head(1u32, "a");
        let h2 = list.add_to_head(1u32, "b");

        index.set(1, h1);
        assert_eq!(index.set(1, h2), Some(h1));
        assert_eq!(index.get(&1), Some(h2));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_index_remove_absent_is_noop() {
        let mut index: CacheIndex<u32> = CacheIndex::new();
        assert_eq!(index.remove(&7), None);
        assert!(index.is_empty());
    }
}
