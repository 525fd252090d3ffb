//! Arena-backed Fibonacci heap for Rust
//!
//! This crate provides a Fibonacci heap (Fredman and Tarjan) supporting
//! `insert`, `find_min` and `extract_min` under an arbitrary strict ordering.
//! Nodes live in an arena and link to each other by key, so the circular
//! sibling lists and parent/child links need no raw pointers or `unsafe`.
//!
//! # Features
//!
//! - **Lazy insert**: O(1) worst-case; new elements are added as singleton roots
//! - **Consolidating extract-min**: O(log n) amortized; roots of equal degree
//!   are linked until every root degree is distinct
//! - **Pluggable order**: any [`Compare`] implementation, including closures
//! - **Pluggable storage**: generational [`SlotMapStorage`] (the default) or
//!   the free-list backed [`VecStorage`]
//! - **Structural validation**: `FibonacciHeap::validate` in debug and test
//!   builds, or in release builds with the `validate` feature
//!
//! # Example
//!
//! ```rust
//! use arena_fibheap::FibonacciHeap;
//!
//! let mut heap = FibonacciHeap::new();
//! heap.insert(5);
//! heap.insert(3);
//! heap.insert(8);
//!
//! assert_eq!(heap.find_min(), Ok(&3));
//! assert_eq!(heap.extract_min(), Ok(3));
//! assert_eq!(heap.len(), 2);
//! ```

pub mod compare;
pub mod fibonacci;
pub mod simple_binary;
pub mod storage;
pub mod traits;
#[cfg(any(test, debug_assertions, feature = "validate"))]
pub mod validate;

// Re-export the main types for convenience
pub use compare::{Compare, Natural, Reversed};
pub use fibonacci::{FibonacciHeap, Iter, Node};
pub use storage::{NodeKey, NodeStorage, SlotIndex, SlotMapStorage, VecStorage};
pub use traits::{Heap, HeapError};
#[cfg(any(test, debug_assertions, feature = "validate"))]
pub use validate::InvariantViolation;
