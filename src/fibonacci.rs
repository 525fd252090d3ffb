//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a priority queue with:
//! - O(1) insert (worst-case, no restructuring ever happens on insert)
//! - O(1) find_min
//! - O(log n) amortized extract_min
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular doubly linked list, and so are the children of every node. The
//! heap maintains the key of the minimum root.
//!
//! All work is deferred to `extract_min`: the extracted node's children join the
//! root list, and a consolidation pass then links roots of equal degree until
//! every remaining root has a distinct degree, leaving O(log n) trees.
//!
//! Nodes live in a [`NodeStorage`] arena and refer to each other by key rather
//! than by pointer, so the structure contains no `unsafe` code.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use index_ring::RingOps;
use smallvec::SmallVec;

use crate::compare::{Compare, Natural};
use crate::storage::{NodeStorage, SlotMapStorage};
use crate::traits::{Heap, HeapError};

const RING: RingOps = RingOps::new();

/// One element of a Fibonacci heap together with its tree links
///
/// `K` is the key type of the storage holding the node. Nodes are created and
/// destroyed only by the heap; storage backends just hold them.
pub struct Node<T, K> {
    pub(crate) value: T,
    pub(crate) parent: Option<K>,
    pub(crate) child: Option<K>,
    pub(crate) left: K,
    pub(crate) right: K,
    pub(crate) degree: usize,
    pub(crate) marked: bool,
}

impl<T, K: Copy> Node<T, K> {
    /// A detached node: no parent, no children, a ring of one
    pub(crate) fn singleton(value: T, key: K) -> Self {
        Node {
            value,
            parent: None,
            child: None,
            left: key,
            right: key,
            degree: 0,
            marked: false,
        }
    }

    /// The stored value
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Consumes the node and returns its value
    pub fn into_value(self) -> T {
        self.value
    }

    /// Parent in the tree, `None` for roots
    pub fn parent(&self) -> Option<K> {
        self.parent
    }

    /// Entry point into the ring of children
    pub fn child(&self) -> Option<K> {
        self.child
    }

    /// Previous sibling in the ring
    pub fn left(&self) -> K {
        self.left
    }

    /// Next sibling in the ring
    pub fn right(&self) -> K {
        self.right
    }

    /// Number of direct children
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Cut-tracking mark; always `false` for the operations this heap supports
    pub fn is_marked(&self) -> bool {
        self.marked
    }
}

/// Fibonacci Heap
///
/// `C` is the order (natural `Ord` order by default) and `S` the node
/// storage (a generational slot map by default).
///
/// # Example
///
/// ```rust
/// use arena_fibheap::{FibonacciHeap, Heap};
///
/// let mut heap = FibonacciHeap::new();
/// for value in [5, 3, 8, 1, 9, 2] {
///     heap.insert(value);
/// }
/// assert_eq!(heap.find_min(), Ok(&1));
/// assert_eq!(heap.into_sorted_vec(), vec![1, 2, 3, 5, 8, 9]);
/// ```
pub struct FibonacciHeap<T, C = Natural, S = SlotMapStorage<T>>
where
    S: NodeStorage<T>,
{
    pub(crate) nodes: S,
    pub(crate) min: Option<S::Key>,
    pub(crate) len: usize,
    pub(crate) compare: C,
    _phantom: PhantomData<T>,
}

impl<T: Ord> FibonacciHeap<T> {
    /// Creates an empty min-heap in natural order
    pub fn new() -> Self {
        Self::new_in(Natural)
    }

    /// Creates an empty min-heap with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(Natural, capacity)
    }
}

impl<T, C: Compare<T>> FibonacciHeap<T, C> {
    /// Creates an empty heap ordered by `compare`
    ///
    /// `compare(a, b)` returns true when `a` must come out before `b`.
    pub fn with_comparator(compare: C) -> Self {
        Self::new_in(compare)
    }
}

impl<T, C, S: NodeStorage<T>> FibonacciHeap<T, C, S> {
    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the minimum element
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] if the heap has no elements.
    pub fn find_min(&self) -> Result<&T, HeapError> {
        self.min
            .map(|min| &self.nodes.node(min).value)
            .ok_or(HeapError::EmptyHeap)
    }

    /// Returns the minimum element, or `None` if the heap is empty
    pub fn peek(&self) -> Option<&T> {
        self.find_min().ok()
    }

    /// Iterates over every element in unspecified order
    ///
    /// Walks the root list and descends into every child list.
    pub fn iter(&self) -> Iter<'_, T, S> {
        let pending = match self.min {
            Some(min) => RING.collect(&self.nodes, min),
            None => Vec::new(),
        };
        Iter {
            nodes: &self.nodes,
            pending,
            remaining: self.len,
            _phantom: PhantomData,
        }
    }

    /// Calls `f` on every element in unspecified order
    pub fn for_each<F: FnMut(&T)>(&self, f: F) {
        self.iter().for_each(f);
    }

    /// Number of trees in the root list
    pub fn root_count(&self) -> usize {
        self.min.map_or(0, |min| RING.count(&self.nodes, min))
    }

    /// Removes every element
    ///
    /// Walks the forest from the minimum and frees each node once, then
    /// resets the arena so its freed slots are released. The heap can be
    /// reused afterwards.
    pub fn clear(&mut self) {
        if let Some(min) = self.min.take() {
            let mut pending = RING.collect(&self.nodes, min);
            while let Some(key) = pending.pop() {
                // children stay live until their own turn
                if let Some(node) = self.nodes.remove(key) {
                    if let Some(child) = node.child {
                        pending.extend(RING.iter(&self.nodes, child));
                    }
                }
            }
        }
        self.nodes.clear();
        self.len = 0;
    }

    /// The node storage, for slot accounting
    pub fn storage(&self) -> &S {
        &self.nodes
    }

    /// The comparator
    pub fn comparator(&self) -> &C {
        &self.compare
    }
}

impl<T, C: Compare<T>, S: NodeStorage<T>> FibonacciHeap<T, C, S> {
    /// Creates an empty heap ordered by `compare` on a fresh `S` storage
    pub fn new_in(compare: C) -> Self {
        Self {
            nodes: S::default(),
            min: None,
            len: 0,
            compare,
            _phantom: PhantomData,
        }
    }

    /// Creates an empty heap ordered by `compare` with room for `capacity` nodes
    pub fn with_capacity_in(compare: C, capacity: usize) -> Self {
        Self {
            nodes: S::with_capacity(capacity),
            min: None,
            len: 0,
            compare,
            _phantom: PhantomData,
        }
    }

    /// Inserts an element
    ///
    /// The new node joins the root list next to the minimum; nothing is
    /// consolidated. O(1).
    pub fn insert(&mut self, value: T) {
        let key = self
            .nodes
            .insert_with_key(|key| Node::singleton(value, key));
        self.add_root(key);
        self.len += 1;
    }

    /// Inserts an element, reporting allocation failure instead of aborting
    ///
    /// # Errors
    /// Returns [`HeapError::AllocationFailure`] if storage for the node cannot
    /// be reserved. The heap is unchanged and `value` is dropped.
    pub fn try_insert(&mut self, value: T) -> Result<(), HeapError> {
        self.nodes
            .try_reserve(1)
            .map_err(|_| HeapError::AllocationFailure)?;
        self.insert(value);
        Ok(())
    }

    /// Removes and returns the minimum element
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] if the heap has no elements; nothing
    /// is modified in that case.
    pub fn extract_min(&mut self) -> Result<T, HeapError> {
        let z = self.min.ok_or(HeapError::EmptyHeap)?;

        // Promote children to the root list
        if let Some(child) = self.nodes.node_mut(z).child.take() {
            let mut current = child;
            loop {
                let node = self.nodes.node_mut(current);
                node.parent = None;
                node.marked = false;
                current = node.right;
                if current == child {
                    break;
                }
            }
            self.nodes.node_mut(z).degree = 0;
            RING.splice(&mut self.nodes, Some(z), Some(child));
        }

        // Remove min from root list
        let next = self.nodes.node(z).right;
        if RING.remove(&mut self.nodes, z) {
            // z was the only root and had no children
            self.min = None;
        } else if RING.is_singleton(&self.nodes, next) {
            // a single tree remains; nothing to merge
            self.min = Some(next);
        } else {
            self.min = Some(next);
            self.consolidate(next);
        }

        self.len -= 1;
        Ok(self.nodes.take(z).into_value())
    }

    /// Removes the minimum element, or returns `None` if the heap is empty
    pub fn pop(&mut self) -> Option<T> {
        self.extract_min().ok()
    }

    /// Drains the heap into a vector in extraction order
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len);
        while let Ok(value) = self.extract_min() {
            sorted.push(value);
        }
        sorted
    }

    /// Adds a detached node to the root list, updating the minimum
    fn add_root(&mut self, key: S::Key) {
        match self.min {
            Some(min) => {
                RING.insert_before(&mut self.nodes, min, key);
                if self.is_less(key, min) {
                    self.min = Some(key);
                }
            }
            None => self.min = Some(key),
        }
    }

    #[inline]
    fn is_less(&self, a: S::Key, b: S::Key) -> bool {
        self.compare
            .less(&self.nodes.node(a).value, &self.nodes.node(b).value)
    }

    /// Consolidates the heap by linking trees of the same degree
    ///
    /// `start` is any root; `self.len` still counts the extracted node.
    fn consolidate(&mut self, start: S::Key) {
        // Degree is at most log_phi(n) < 2 * log2(n) + 2
        let max_degree = 2 * self.len.next_power_of_two().trailing_zeros() as usize + 2;
        let mut degree_table: SmallVec<[Option<S::Key>; 64]> =
            SmallVec::from_elem(None, max_degree);

        // Linking removes roots from the ring, so snapshot it first
        let roots = RING.collect(&self.nodes, start);

        for root in roots {
            let mut x = root;
            let mut d = self.nodes.node(x).degree;

            loop {
                if d >= degree_table.len() {
                    degree_table.resize(d + 1, None);
                }
                match degree_table[d].take() {
                    Some(y) => {
                        // the smaller key becomes the parent; ties keep x
                        let (parent, child) = if self.is_less(y, x) { (y, x) } else { (x, y) };
                        self.link(child, parent);
                        x = parent;
                        d += 1;
                    }
                    None => {
                        degree_table[d] = Some(x);
                        break;
                    }
                }
            }
        }

        // Rebuild root list and find new min
        self.min = None;
        for root in degree_table.into_iter().flatten() {
            RING.make_singleton(&mut self.nodes, root);
            self.add_root(root);
        }
    }

    /// Links root `child` beneath root `parent`
    fn link(&mut self, child: S::Key, parent: S::Key) {
        RING.remove(&mut self.nodes, child);

        let node = self.nodes.node_mut(child);
        node.parent = Some(parent);
        node.marked = false;

        let parent_node = self.nodes.node_mut(parent);
        parent_node.degree += 1;
        let first = parent_node.child;
        match first {
            Some(first) => RING.insert_before(&mut self.nodes, first, child),
            None => self.nodes.node_mut(parent).child = Some(child),
        }
    }
}

impl<T, C, S> Heap<T> for FibonacciHeap<T, C, S>
where
    C: Compare<T>,
    S: NodeStorage<T>,
{
    fn is_empty(&self) -> bool {
        FibonacciHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        FibonacciHeap::len(self)
    }

    fn insert(&mut self, value: T) {
        FibonacciHeap::insert(self, value)
    }

    fn find_min(&self) -> Result<&T, HeapError> {
        FibonacciHeap::find_min(self)
    }

    fn extract_min(&mut self) -> Result<T, HeapError> {
        FibonacciHeap::extract_min(self)
    }
}

impl<T, C, S> Drop for FibonacciHeap<T, C, S>
where
    S: NodeStorage<T>,
{
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, C, S> Default for FibonacciHeap<T, C, S>
where
    C: Compare<T> + Default,
    S: NodeStorage<T>,
{
    fn default() -> Self {
        Self::new_in(C::default())
    }
}

impl<T, C, S> fmt::Debug for FibonacciHeap<T, C, S>
where
    T: fmt::Debug,
    S: NodeStorage<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len)
            .field("roots", &self.root_count())
            .field("min", &self.peek())
            .finish()
    }
}

impl<T, C, S> Extend<T> for FibonacciHeap<T, C, S>
where
    C: Compare<T>,
    S: NodeStorage<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for FibonacciHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut heap = Self::with_capacity(iter.size_hint().0);
        heap.extend(iter);
        heap
    }
}

impl<'a, T, C, S> IntoIterator for &'a FibonacciHeap<T, C, S>
where
    S: NodeStorage<T>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, S>;

    fn into_iter(self) -> Iter<'a, T, S> {
        self.iter()
    }
}

/// Iterator over the elements of a [`FibonacciHeap`], in unspecified order
pub struct Iter<'a, T, S: NodeStorage<T>> {
    nodes: &'a S,
    pending: Vec<S::Key>,
    remaining: usize,
    _phantom: PhantomData<&'a T>,
}

impl<'a, T, S: NodeStorage<T>> Iterator for Iter<'a, T, S> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let key = self.pending.pop()?;
        let nodes = self.nodes;
        let node = nodes.node(key);
        if let Some(child) = node.child {
            self.pending.extend(RING.iter(nodes, child));
        }
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, S: NodeStorage<T>> ExactSizeIterator for Iter<'_, T, S> {}

impl<T, S: NodeStorage<T>> FusedIterator for Iter<'_, T, S> {}
