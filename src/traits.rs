//! Common trait and error type for the heaps in this crate
//!
//! [`Heap`] is the interface shared by [`FibonacciHeap`](crate::fibonacci::FibonacciHeap)
//! and the array-backed [`SimpleBinaryHeap`](crate::simple_binary::SimpleBinaryHeap)
//! used as its reference model. Both are min-heaps under a user-supplied
//! [`Compare`](crate::compare::Compare) order.

use thiserror::Error;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// `find_min` or `extract_min` was called on a heap with no elements
    #[error("heap is empty")]
    EmptyHeap,
    /// Storage for a new node could not be obtained
    #[error("could not allocate storage for a new heap node")]
    AllocationFailure,
}

/// Base trait for min-heap data structures
///
/// The fallible methods (`find_min`, `extract_min`) report an empty heap as
/// [`HeapError::EmptyHeap`]; `peek` and `pop` are the `BinaryHeap`-style
/// `Option` conveniences on top of them.
///
/// # Example
///
/// ```rust
/// use arena_fibheap::{FibonacciHeap, Heap, HeapError};
///
/// let mut heap = FibonacciHeap::new();
/// heap.insert(3);
/// heap.insert(1);
/// heap.insert(2);
///
/// assert_eq!(heap.find_min(), Ok(&1));
/// assert_eq!(heap.extract_min(), Ok(1));
/// assert_eq!(heap.pop(), Some(2));
/// assert_eq!(heap.pop(), Some(3));
/// assert_eq!(heap.extract_min(), Err(HeapError::EmptyHeap));
/// ```
pub trait Heap<T> {
    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element
    ///
    /// # Time Complexity
    /// O(1) worst-case for the Fibonacci heap, O(log n) for the binary heap.
    fn insert(&mut self, value: T);

    /// Returns the minimum element without removing it
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] if the heap has no elements.
    ///
    /// # Time Complexity
    /// O(1) for all implementations
    fn find_min(&self) -> Result<&T, HeapError>;

    /// Removes and returns the minimum element
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] if the heap has no elements. The heap
    /// is left untouched in that case.
    ///
    /// # Time Complexity
    /// O(log n) amortized for the Fibonacci heap, O(log n) for the binary heap.
    fn extract_min(&mut self) -> Result<T, HeapError>;

    /// Returns the minimum element, or `None` if the heap is empty
    fn peek(&self) -> Option<&T> {
        self.find_min().ok()
    }

    /// Removes the minimum element, or returns `None` if the heap is empty
    fn pop(&mut self) -> Option<T> {
        self.extract_min().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(HeapError::EmptyHeap.to_string(), "heap is empty");
        assert_eq!(
            HeapError::AllocationFailure.to_string(),
            "could not allocate storage for a new heap node"
        );
    }
}
