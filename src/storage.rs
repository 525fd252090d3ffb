//! Pluggable storage backends for heap nodes
//!
//! The heap never holds pointers to its nodes. Every node lives in a storage
//! arena and nodes refer to each other (parent, child, left/right siblings)
//! by the arena's key type. The storage is the node allocator: it creates a
//! node on `insert`, destroys it on `remove`, and is the single owner of
//! every node in between.
//!
//! - [`SlotMapStorage`]: default backend built on `slotmap`, with
//!   generational keys that detect stale references
//! - [`VecStorage`]: a plain `Vec` of slots threaded with a free list, whose
//!   slot counts are exposed for allocation accounting
//!
//! # Example
//!
//! ```rust
//! use arena_fibheap::{FibonacciHeap, Heap, Natural, NodeStorage, VecStorage};
//!
//! let mut heap: FibonacciHeap<i32, Natural, VecStorage<i32>> = FibonacciHeap::default();
//! heap.insert(2);
//! heap.insert(1);
//! assert_eq!(heap.pop(), Some(1));
//!
//! // one live node, one freed slot waiting to be reused
//! assert_eq!(heap.storage().len(), 1);
//! assert_eq!(heap.storage().free_slots(), 1);
//! ```

use std::collections::TryReserveError;
use std::fmt;

use index_ring::RingLinks;
use slotmap::{new_key_type, SlotMap};

use crate::fibonacci::Node;

/// Trait for node storage backends
///
/// The key type comes from the [`RingLinks`] supertrait: a storage is an
/// arena whose nodes can be threaded into circular sibling lists.
///
/// Keys handed to [`node`](NodeStorage::node) and
/// [`node_mut`](NodeStorage::node_mut) must be live. The heap only ever
/// holds live keys, so a stale key there is a bug and panics.
pub trait NodeStorage<T>: Default + RingLinks {
    /// Creates an empty storage with room for `capacity` nodes
    fn with_capacity(capacity: usize) -> Self;

    /// Inserts the node built by `f`, which receives the node's own key
    fn insert_with_key<F>(&mut self, f: F) -> Self::Key
    where
        F: FnOnce(Self::Key) -> Node<T, Self::Key>;

    /// Removes a node, returning it if the key was live
    fn remove(&mut self, key: Self::Key) -> Option<Node<T, Self::Key>>;

    /// Gets a node if the key is live
    fn get(&self, key: Self::Key) -> Option<&Node<T, Self::Key>>;

    /// Gets a node mutably if the key is live
    fn get_mut(&mut self, key: Self::Key) -> Option<&mut Node<T, Self::Key>>;

    /// Number of live nodes
    fn len(&self) -> usize;

    /// Reserves room for `additional` more nodes without aborting on failure
    fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError>;

    /// Drops every node
    fn clear(&mut self);

    /// Returns true if no node is live
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets a node whose key is known to be live
    ///
    /// # Panics
    /// Panics if the key is stale.
    #[inline]
    fn node(&self, key: Self::Key) -> &Node<T, Self::Key> {
        match self.get(key) {
            Some(node) => node,
            None => panic!("stale node key {key:?}"),
        }
    }

    /// Gets a node mutably whose key is known to be live
    ///
    /// # Panics
    /// Panics if the key is stale.
    #[inline]
    fn node_mut(&mut self, key: Self::Key) -> &mut Node<T, Self::Key> {
        match self.get_mut(key) {
            Some(node) => node,
            None => panic!("stale node key {key:?}"),
        }
    }

    /// Removes a node whose key is known to be live
    ///
    /// # Panics
    /// Panics if the key is stale.
    #[inline]
    fn take(&mut self, key: Self::Key) -> Node<T, Self::Key> {
        match self.remove(key) {
            Some(node) => node,
            None => panic!("stale node key {key:?}"),
        }
    }
}

// ============================================================================
// SlotMapStorage - default arena
// ============================================================================

new_key_type! {
    /// Generational key into a [`SlotMapStorage`]
    pub struct NodeKey;
}

/// SlotMap-based arena storage
///
/// # Characteristics
/// - Contiguous memory allocation (better cache locality than boxed nodes)
/// - Generational keys: a key to a freed slot never aliases its reuse
/// - Freed slots are recycled by `slotmap`'s internal free list
pub struct SlotMapStorage<T> {
    nodes: SlotMap<NodeKey, Node<T, NodeKey>>,
}

impl<T> Default for SlotMapStorage<T> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }
}

impl<T> fmt::Debug for SlotMapStorage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotMapStorage")
            .field("len", &self.nodes.len())
            .field("capacity", &self.nodes.capacity())
            .finish()
    }
}

impl<T> SlotMapStorage<T> {
    /// Number of nodes the map can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }
}

impl<T> RingLinks for SlotMapStorage<T> {
    type Key = NodeKey;

    #[inline]
    fn next(&self, key: NodeKey) -> NodeKey {
        self.nodes[key].right
    }

    #[inline]
    fn prev(&self, key: NodeKey) -> NodeKey {
        self.nodes[key].left
    }

    #[inline]
    fn set_next(&mut self, key: NodeKey, next: NodeKey) {
        self.nodes[key].right = next;
    }

    #[inline]
    fn set_prev(&mut self, key: NodeKey, prev: NodeKey) {
        self.nodes[key].left = prev;
    }
}

impl<T> NodeStorage<T> for SlotMapStorage<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    fn insert_with_key<F>(&mut self, f: F) -> NodeKey
    where
        F: FnOnce(NodeKey) -> Node<T, NodeKey>,
    {
        self.nodes.insert_with_key(f)
    }

    fn remove(&mut self, key: NodeKey) -> Option<Node<T, NodeKey>> {
        self.nodes.remove(key)
    }

    fn get(&self, key: NodeKey) -> Option<&Node<T, NodeKey>> {
        self.nodes.get(key)
    }

    fn get_mut(&mut self, key: NodeKey) -> Option<&mut Node<T, NodeKey>> {
        self.nodes.get_mut(key)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.nodes.try_reserve(additional)
    }

    fn clear(&mut self) {
        self.nodes.clear();
    }
}

// ============================================================================
// VecStorage - index arena with an explicit free list
// ============================================================================

/// Index of a slot in a [`VecStorage`]
///
/// Slot indices are not generational: once a slot is freed, the next
/// insertion may reuse it under the same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotIndex(usize);

impl SlotIndex {
    /// Position of the slot in the backing vector
    pub fn index(self) -> usize {
        self.0
    }
}

enum Slot<N> {
    Occupied(N),
    Vacant { next_free: Option<usize> },
}

/// Vec-backed arena storage
///
/// Slots are never shrunk; a removed node's slot is pushed onto a free list
/// and handed out again before the vector grows. `len() + free_slots()` is
/// always `capacity_slots()`, which makes allocation accounting a matter of
/// reading three counters.
pub struct VecStorage<T> {
    slots: Vec<Slot<Node<T, SlotIndex>>>,
    free_head: Option<usize>,
    len: usize,
}

impl<T> Default for VecStorage<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }
}

impl<T> fmt::Debug for VecStorage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VecStorage")
            .field("len", &self.len)
            .field("slots", &self.slots.len())
            .finish()
    }
}

impl<T> VecStorage<T> {
    /// Total number of slots ever created (live plus free)
    pub fn capacity_slots(&self) -> usize {
        self.slots.len()
    }

    /// Number of freed slots waiting to be reused
    pub fn free_slots(&self) -> usize {
        self.slots.len() - self.len
    }

    #[inline]
    fn slot(&self, key: SlotIndex) -> &Node<T, SlotIndex> {
        match self.slots.get(key.0) {
            Some(Slot::Occupied(node)) => node,
            _ => panic!("stale node key {key:?}"),
        }
    }

    #[inline]
    fn slot_mut(&mut self, key: SlotIndex) -> &mut Node<T, SlotIndex> {
        match self.slots.get_mut(key.0) {
            Some(Slot::Occupied(node)) => node,
            _ => panic!("stale node key {key:?}"),
        }
    }
}

impl<T> RingLinks for VecStorage<T> {
    type Key = SlotIndex;

    #[inline]
    fn next(&self, key: SlotIndex) -> SlotIndex {
        self.slot(key).right
    }

    #[inline]
    fn prev(&self, key: SlotIndex) -> SlotIndex {
        self.slot(key).left
    }

    #[inline]
    fn set_next(&mut self, key: SlotIndex, next: SlotIndex) {
        self.slot_mut(key).right = next;
    }

    #[inline]
    fn set_prev(&mut self, key: SlotIndex, prev: SlotIndex) {
        self.slot_mut(key).left = prev;
    }
}

impl<T> NodeStorage<T> for VecStorage<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    fn insert_with_key<F>(&mut self, f: F) -> SlotIndex
    where
        F: FnOnce(SlotIndex) -> Node<T, SlotIndex>,
    {
        let key = match self.free_head {
            Some(index) => {
                let key = SlotIndex(index);
                let node = f(key);
                let slot = std::mem::replace(&mut self.slots[index], Slot::Occupied(node));
                self.free_head = match slot {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
                };
                key
            }
            None => {
                let key = SlotIndex(self.slots.len());
                self.slots.push(Slot::Occupied(f(key)));
                key
            }
        };
        self.len += 1;
        key
    }

    fn remove(&mut self, key: SlotIndex) -> Option<Node<T, SlotIndex>> {
        let slot = self.slots.get_mut(key.0)?;
        if let Slot::Vacant { .. } = slot {
            return None;
        }
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        match std::mem::replace(slot, vacant) {
            Slot::Occupied(node) => {
                self.free_head = Some(key.0);
                self.len -= 1;
                Some(node)
            }
            Slot::Vacant { .. } => None,
        }
    }

    fn get(&self, key: SlotIndex) -> Option<&Node<T, SlotIndex>> {
        match self.slots.get(key.0) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    fn get_mut(&mut self, key: SlotIndex) -> Option<&mut Node<T, SlotIndex>> {
        match self.slots.get_mut(key.0) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let free = self.free_slots();
        if additional > free {
            self.slots.try_reserve(additional - free)?;
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }
}
