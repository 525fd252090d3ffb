//! Circular doubly-linked lists over arena-addressed nodes.
//!
//! Nodes live in some external arena and name each other by key (an index,
//! a generational slot key, ...). This crate only knows how to rewire the
//! `next`/`prev` fields, which the arena exposes through [`RingLinks`].
//!
//! # Circular vs Linear Lists
//!
//! In a circular list:
//! - A single node points to itself (both `next` and `prev`)
//! - There is no head or tail - any node can be the "entry point"
//! - Splicing two rings together is O(1)
//! - Iteration wraps around (must track starting point)
//!
//! This is the shape Fibonacci heaps use for their root list and for every
//! node's child list.
//!
//! # Example
//!
//! ```rust
//! use index_ring::{RingLinks, RingOps};
//!
//! struct Links {
//!     next: Vec<usize>,
//!     prev: Vec<usize>,
//! }
//!
//! impl RingLinks for Links {
//!     type Key = usize;
//!     fn next(&self, key: usize) -> usize { self.next[key] }
//!     fn prev(&self, key: usize) -> usize { self.prev[key] }
//!     fn set_next(&mut self, key: usize, next: usize) { self.next[key] = next; }
//!     fn set_prev(&mut self, key: usize, prev: usize) { self.prev[key] = prev; }
//! }
//!
//! let mut links = Links { next: vec![0, 1], prev: vec![0, 1] };
//! let ops = RingOps::new();
//!
//! ops.make_singleton(&mut links, 0);
//! ops.insert_after(&mut links, 0, 1);
//!
//! assert_eq!(links.next(0), 1);
//! assert_eq!(links.next(1), 0);
//! assert_eq!(ops.count(&links, 0), 2);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;
use core::hash::Hash;

// =============================================================================
// RingLinks
// =============================================================================

/// Access to the sibling links of nodes stored in an arena.
///
/// Implementors must treat every key handed to these methods as live; the
/// ring operations never pass keys they were not given.
pub trait RingLinks {
    /// Key naming one node in the arena.
    type Key: Copy + Eq + Hash + fmt::Debug;

    /// Gets the next key in the ring.
    fn next(&self, key: Self::Key) -> Self::Key;

    /// Gets the previous key in the ring.
    fn prev(&self, key: Self::Key) -> Self::Key;

    /// Sets the next key of `key`.
    fn set_next(&mut self, key: Self::Key, next: Self::Key);

    /// Sets the previous key of `key`.
    fn set_prev(&mut self, key: Self::Key, prev: Self::Key);
}

// =============================================================================
// RingOps
// =============================================================================

/// Operations for manipulating circular doubly-linked lists.
///
/// All operations except [`count`](RingOps::count),
/// [`for_each`](RingOps::for_each) and [`collect`](RingOps::collect) are O(1).
#[derive(Debug, Clone, Copy, Default)]
pub struct RingOps;

impl RingOps {
    /// Creates a new `RingOps`.
    #[inline]
    pub const fn new() -> Self {
        RingOps
    }

    /// Makes `key` into a circular list of one element.
    ///
    /// After this, `next(key) == key` and `prev(key) == key`.
    #[inline]
    pub fn make_singleton<L: RingLinks>(&self, links: &mut L, key: L::Key) {
        links.set_next(key, key);
        links.set_prev(key, key);
    }

    /// Returns true if `key` is the only element of its ring.
    #[inline]
    pub fn is_singleton<L: RingLinks>(&self, links: &L, key: L::Key) -> bool {
        links.next(key) == key
    }

    /// Inserts `new` after `at`.
    ///
    /// `new` must not currently belong to another ring with other members;
    /// its old links are overwritten.
    #[inline]
    pub fn insert_after<L: RingLinks>(&self, links: &mut L, at: L::Key, new: L::Key) {
        let next = links.next(at);

        links.set_next(at, new);
        links.set_prev(new, at);
        links.set_next(new, next);
        links.set_prev(next, new);
    }

    /// Inserts `new` before `at`.
    ///
    /// Inserting before the entry point of a ring appends to the "end" of
    /// the ring when walking forward from that entry point.
    #[inline]
    pub fn insert_before<L: RingLinks>(&self, links: &mut L, at: L::Key, new: L::Key) {
        let prev = links.prev(at);

        links.set_prev(at, new);
        links.set_next(new, at);
        links.set_prev(new, prev);
        links.set_next(prev, new);
    }

    /// Removes `key` from its ring and leaves it as a singleton.
    ///
    /// Returns `true` if the node was the only element (ring is now empty),
    /// `false` if other nodes remain.
    #[inline]
    pub fn remove<L: RingLinks>(&self, links: &mut L, key: L::Key) -> bool {
        let next = links.next(key);
        let prev = links.prev(key);

        if next == key {
            true
        } else {
            links.set_next(prev, next);
            links.set_prev(next, prev);
            self.make_singleton(links, key);
            false
        }
    }

    /// Splices two rings together.
    ///
    /// If either is `None`, returns the other. Otherwise returns `a`; walking
    /// forward from `a` visits `a`'s old ring and then all of `b`'s ring:
    ///
    /// ```text
    /// Before:  a_prev <-> a <-> ...      b_prev <-> b <-> ...
    /// After:   a_prev <-> b <-> ... <-> b_prev <-> a <-> ...
    /// ```
    #[inline]
    pub fn splice<L: RingLinks>(
        &self,
        links: &mut L,
        a: Option<L::Key>,
        b: Option<L::Key>,
    ) -> Option<L::Key> {
        match (a, b) {
            (None, None) => None,
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (Some(a), Some(b)) => {
                let a_prev = links.prev(a);
                let b_prev = links.prev(b);

                links.set_next(a_prev, b);
                links.set_prev(b, a_prev);

                links.set_next(b_prev, a);
                links.set_prev(a, b_prev);

                Some(a)
            }
        }
    }

    /// Counts the number of elements in the ring containing `start`.
    ///
    /// This is O(n) - use sparingly.
    pub fn count<L: RingLinks>(&self, links: &L, start: L::Key) -> usize {
        self.iter(links, start).count()
    }

    /// Calls `f` for every element of the ring, starting at `start`.
    ///
    /// The callback only sees keys; it cannot restructure the ring mid-walk.
    pub fn for_each<L, F>(&self, links: &L, start: L::Key, f: F)
    where
        L: RingLinks,
        F: FnMut(L::Key),
    {
        self.iter(links, start).for_each(f);
    }

    /// Snapshots the ring into a vector, starting at `start`.
    ///
    /// Use this before walking a ring whose membership is about to change.
    pub fn collect<L: RingLinks>(&self, links: &L, start: L::Key) -> Vec<L::Key> {
        self.iter(links, start).collect()
    }

    /// Iterates over the ring starting at `start`.
    pub fn iter<'a, L: RingLinks>(&self, links: &'a L, start: L::Key) -> RingIter<'a, L> {
        RingIter {
            links,
            start,
            next: Some(start),
        }
    }
}

// =============================================================================
// RingIter
// =============================================================================

/// Forward iterator over one ring. See [`RingOps::iter`].
pub struct RingIter<'a, L: RingLinks> {
    links: &'a L,
    start: L::Key,
    next: Option<L::Key>,
}

impl<L: RingLinks> Iterator for RingIter<'_, L> {
    type Item = L::Key;

    fn next(&mut self) -> Option<L::Key> {
        let current = self.next?;
        let following = self.links.next(current);
        self.next = if following == self.start {
            None
        } else {
            Some(following)
        };
        Some(current)
    }
}

// =============================================================================
// Tests
// =============================================================================
