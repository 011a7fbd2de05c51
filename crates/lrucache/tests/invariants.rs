//! Mixed operation sequences checked against a simple reference model.

use std::collections::VecDeque;

use lrucache::LruCache;

/// Reference model: a deque of (key, value), front = most recent.
struct Model {
    entries: VecDeque<(u32, u32)>,
    capacity: usize,
}

impl Model {
    fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    fn get(&mut self, key: u32) -> Option<u32> {
        let pos = self.entries.iter().position(|(k, _)| *k == key)?;
        let entry = self.entries.remove(pos)?;
        self.entries.push_front(entry);
        Some(entry.1)
    }

    fn set(&mut self, key: u32, value: u32) -> Option<(u32, u32)> {
        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
            self.entries.remove(pos);
            self.entries.push_front((key, value));
            return None;
        }
        let evicted = if self.entries.len() == self.capacity {
            self.entries.pop_back()
        } else {
            None
        };
        self.entries.push_front((key, value));
        evicted
    }

    fn remove(&mut self, key: u32) -> Option<u32> {
        let pos = self.entries.iter().position(|(k, _)| *k == key)?;
        self.entries.remove(pos).map(|(_, v)| v)
    }

    fn keys(&self) -> Vec<u32> {
        self.entries.iter().map(|(k, _)| *k).collect()
    }
}

fn run_against_model(capacity: usize, ops: usize, key_space: u32, seed: u32) {
    let mut cache: LruCache<u32, u32> = LruCache::new(capacity).unwrap();
    let mut model = Model::new(capacity);
    let mut state = seed;

    for step in 0..ops {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let key = (state >> 8) % key_space;
        let value = step as u32;

        match (state >> 4) % 10 {
            0..=3 => assert_eq!(cache.get(&key).copied(), model.get(key), "get({})", key),
            4..=8 => assert_eq!(cache.push(key, value), model.set(key, value), "set({})", key),
            _ => assert_eq!(cache.remove(&key), model.remove(key), "remove({})", key),
        }

        assert!(cache.len() <= capacity);
        assert_eq!(cache.keys().copied().collect::<Vec<_>>(), model.keys());
        cache.check_invariants().unwrap();
    }
}

#[test]
fn test_matches_model_small_capacity() {
    run_against_model(1, 500, 4, 1);
    run_against_model(2, 500, 5, 2);
}

#[test]
fn test_matches_model_large_key_space() {
    run_against_model(8, 2_000, 64, 3);
}

#[test]
fn test_matches_model_hot_keys() {
    run_against_model(16, 2_000, 20, 4);
}

#[test]
fn test_recency_scenario() {
    let mut cache = LruCache::new(3).unwrap();

    cache.set('A', 1);
    cache.set('B', 2);
    cache.set('C', 3);
    cache.get(&'A');

    assert_eq!(cache.push('D', 4), Some(('B', 2)));
    assert_eq!(cache.keys().copied().collect::<String>(), "DAC");
}

#[test]
fn test_eviction_order_without_reads() {
    let capacity = 10;
    let mut cache = LruCache::new(capacity).unwrap();

    for i in 0..capacity as u32 {
        assert_eq!(cache.push(i, i), None);
    }
    for i in 0..capacity as u32 {
        assert_eq!(cache.push(100 + i, i), Some((i, i)));
    }
    cache.check_invariants().unwrap();
}
