//! Simple Binary Heap implementation
//!
//! A straightforward array-backed binary min-heap over the same [`Compare`]
//! orders as [`FibonacciHeap`](crate::fibonacci::FibonacciHeap). It is the
//! reference model the Fibonacci heap is checked against in the property
//! tests, and the baseline in the benchmarks.
//!
//! # Time Complexity
//!
//! | Operation     | Complexity |
//! |---------------|------------|
//! | `insert`      | O(log n)   |
//! | `extract_min` | O(log n)   |
//! | `find_min`    | O(1)       |
//!
//! # Example
//!
//! ```rust
//! use arena_fibheap::Heap;
//! use arena_fibheap::simple_binary::SimpleBinaryHeap;
//!
//! let mut heap = SimpleBinaryHeap::new();
//! heap.insert(3);
//! heap.insert(1);
//! heap.insert(2);
//!
//! assert_eq!(heap.peek(), Some(&1));
//! assert_eq!(heap.pop(), Some(1));
//! assert_eq!(heap.pop(), Some(2));
//! assert_eq!(heap.pop(), Some(3));
//! assert_eq!(heap.pop(), None);
//! ```

use crate::compare::{Compare, Natural};
use crate::traits::{Heap, HeapError};

/// A simple binary min-heap
///
/// The element at index 0 is always a minimum under `C`.
#[derive(Debug, Clone)]
pub struct SimpleBinaryHeap<T, C = Natural> {
    data: Vec<T>,
    compare: C,
}

impl<T: Ord> SimpleBinaryHeap<T> {
    /// Creates an empty heap ordered by `T`'s `Ord`
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T, C: Compare<T>> SimpleBinaryHeap<T, C> {
    /// Creates an empty heap ordered by `compare`
    pub fn with_comparator(compare: C) -> Self {
        Self {
            data: Vec::new(),
            compare,
        }
    }

    /// Move element at index up to maintain heap property
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.compare.less(&self.data[index], &self.data[parent]) {
                self.data.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move element at index down to maintain heap property
    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.compare.less(&self.data[left], &self.data[smallest]) {
                smallest = left;
            }
            if right < len && self.compare.less(&self.data[right], &self.data[smallest]) {
                smallest = right;
            }

            if smallest != index {
                self.data.swap(index, smallest);
                index = smallest;
            } else {
                break;
            }
        }
    }
}

impl<T, C: Compare<T>> Heap<T> for SimpleBinaryHeap<T, C> {
    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn insert(&mut self, value: T) {
        self.data.push(value);
        self.sift_up(self.data.len() - 1);
    }

    fn find_min(&self) -> Result<&T, HeapError> {
        self.data.first().ok_or(HeapError::EmptyHeap)
    }

    fn extract_min(&mut self) -> Result<T, HeapError> {
        if self.data.is_empty() {
            return Err(HeapError::EmptyHeap);
        }

        let last_idx = self.data.len() - 1;
        self.data.swap(0, last_idx);
        let result = self.data.pop().ok_or(HeapError::EmptyHeap)?;

        if !self.data.is_empty() {
            self.sift_down(0);
        }

        Ok(result)
    }
}

impl<T, C: Compare<T> + Default> Default for SimpleBinaryHeap<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C: Compare<T>> Extend<T> for SimpleBinaryHeap<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}
