//! Comparators defining the heap order
//!
//! A heap is parameterised by a strict total order. `less(a, b)` must be
//! irreflexive, asymmetric and transitive; every heap invariant in this crate
//! assumes it.
//!
//! Any `Fn(&T, &T) -> bool` closure is a comparator, so a heap can be built
//! straight from a predicate:
//!
//! ```rust
//! use arena_fibheap::{FibonacciHeap, Heap};
//!
//! // max-heap on the length of a string
//! let mut heap = FibonacciHeap::with_comparator(|a: &&str, b: &&str| a.len() > b.len());
//! heap.insert("ab");
//! heap.insert("abcd");
//! heap.insert("a");
//! assert_eq!(heap.pop(), Some("abcd"));
//! ```

/// A strict total order over `T`
pub trait Compare<T: ?Sized> {
    /// Returns true if `a` comes strictly before `b`
    fn less(&self, a: &T, b: &T) -> bool;
}

/// The natural `Ord` order; gives a min-heap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// The reverse of the natural order; gives a max-heap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Reversed;

impl<T: Ord + ?Sized> Compare<T> for Reversed {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a > b
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}
