//! Recency list: doubly-linked list ordered from most to least recently used.
//!
//! Nodes live in a slot arena and link to their neighbours by slot index, so
//! every link operation touches a constant number of fields. Callers address
//! nodes through [`NodeHandle`]s. Each slot carries a generation that is
//! bumped when its node is freed, so a handle to an evicted node never
//! resolves again, even after the slot is reused.

use crate::error::{Error, Result};

/// Non-owning reference to a node in a [`RecencyList`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    index: usize,
    generation: u32,
}

/// One cached entry plus its list linkage
#[derive(Debug)]
pub struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

impl<K, V> Node<K, V> {
    /// Key stored in this node
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Value stored in this node
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Mutable access to the stored value
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }
}

#[derive(Debug)]
struct Slot<K, V> {
    generation: u32,
    node: Option<Node<K, V>>,
}

/// Arena-backed recency list. Owns every node exclusively.
#[derive(Debug)]
pub struct RecencyList<K, V> {
    slots: Vec<Slot<K, V>>,
    free_list: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecencyList<K, V> {
    /// Create an empty list
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty list with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list holds no nodes
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handle of the most recently used node
    pub fn head(&self) -> Option<NodeHandle> {
        self.head.map(|index| self.handle_at(index))
    }

    /// Handle of the least recently used node
    pub fn tail(&self) -> Option<NodeHandle> {
        self.tail.map(|index| self.handle_at(index))
    }

    /// Resolve a handle. Returns `None` for stale handles.
    pub fn get(&self, handle: NodeHandle) -> Option<&Node<K, V>> {
        self.slots
            .get(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    /// Resolve a handle mutably. Links are not reachable through the node.
    pub fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut Node<K, V>> {
        self.slots
            .get_mut(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Check whether a handle still points at a live node
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Insert a new node as the most recently used entry
    pub fn add_to_head(&mut self, key: K, value: V) -> NodeHandle {
        let index = self.alloc(Node {
            key,
            value,
            prev: None,
            next: None,
        });
        self.link_front(index);
        self.handle_at(index)
    }

    /// Move a node to the head of the list.
    ///
    /// Returns `false` if the handle is stale. Moving the head is a no-op.
    pub fn move_to_front(&mut self, handle: NodeHandle) -> bool {
        let Some(index) = self.resolve(handle) else {
            return false;
        };

        if self.head == Some(index) {
            return true;
        }

        self.unlink(index);
        self.link_front(index);
        true
    }

    /// Detach the least recently used node and hand back its entry.
    ///
    /// Returns `None` when the list is empty.
    pub fn remove_from_tail(&mut self) -> Option<(K, V)> {
        let index = self.tail?;
        self.unlink(index);
        self.release(index).map(|node| (node.key, node.value))
    }

    /// Detach an arbitrary node and hand back its entry
    pub fn remove(&mut self, handle: NodeHandle) -> Option<(K, V)> {
        let index = self.resolve(handle)?;
        self.unlink(index);
        self.release(index).map(|node| (node.key, node.value))
    }

    /// Drop every node. Outstanding handles become stale.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
        }
        self.free_list = (0..self.slots.len()).rev().collect();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterate entries from most to least recently used
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            next: self.head,
            remaining: self.len,
        }
    }

    /// Walk the list from head, checking back-links, tail and arena bookkeeping
    pub fn check_invariants(&self) -> Result<()> {
        if self.head.is_none() != self.tail.is_none() {
            return Err(Error::invariant("head and tail disagree on emptiness"));
        }

        let mut count = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(index) = cursor {
            if count == self.len {
                return Err(Error::invariant("forward walk exceeds len (cycle?)"));
            }
            let node = self
                .slots
                .get(index)
                .and_then(|slot| slot.node.as_ref())
                .ok_or_else(|| Error::invariant(format!("link to free slot {}", index)))?;
            if node.prev != prev {
                return Err(Error::invariant(format!(
                    "slot {} has prev {:?}, expected {:?}",
                    index, node.prev, prev
                )));
            }
            prev = Some(index);
            cursor = node.next;
            count += 1;
        }

        if prev != self.tail {
            return Err(Error::invariant("forward walk does not end at tail"));
        }
        if count != self.len {
            return Err(Error::invariant(format!(
                "walked {} nodes but len is {}",
                count, self.len
            )));
        }

        let live = self.slots.iter().filter(|slot| slot.node.is_some()).count();
        if live != self.len || live + self.free_list.len() != self.slots.len() {
            return Err(Error::invariant(format!(
                "{} live slots, {} free, {} total, len {}",
                live,
                self.free_list.len(),
                self.slots.len(),
                self.len
            )));
        }

        Ok(())
    }

    fn handle_at(&self, index: usize) -> NodeHandle {
        NodeHandle {
            index,
            generation: self.slots[index].generation,
        }
    }

    fn resolve(&self, handle: NodeHandle) -> Option<usize> {
        self.get(handle).map(|_| handle.index)
    }

    fn alloc(&mut self, node: Node<K, V>) -> usize {
        self.len += 1;
        if let Some(index) = self.free_list.pop() {
            self.slots[index].node = Some(node);
            index
        } else {
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            self.slots.len() - 1
        }
    }

    fn release(&mut self, index: usize) -> Option<Node<K, V>> {
        let slot = &mut self.slots[index];
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(index);
        self.len -= 1;
        Some(node)
    }

    fn link_front(&mut self, index: usize) {
        let old_head = self.head;

        if let Some(node) = &mut self.slots[index].node {
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(head_idx) => {
                if let Some(head) = &mut self.slots[head_idx].node {
                    head.prev = Some(index);
                }
            }
            None => {
                self.tail = Some(index);
            }
        }

        self.head = Some(index);
    }

    fn unlink(&mut self, index: usize) {
        let (prev, next) = if let Some(node) = &self.slots[index].node {
            (node.prev, node.next)
        } else {
            return;
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.slots[prev_idx].node {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.slots[next_idx].node {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }

        if let Some(node) = &mut self.slots[index].node {
            node.prev = None;
            node.next = None;
        }
    }
}

/// Iterator over a [`RecencyList`], most recent first
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    next: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let list = self.list;
        let index = self.next?;
        let node = list.slots[index].node.as_ref()?;
        self.next = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
