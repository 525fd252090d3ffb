//! Structural validation for [`FibonacciHeap`]
//!
//! [`FibonacciHeap::validate`] walks the whole forest and checks every
//! structural invariant the heap relies on. It is a pure observer and is
//! never called by the heap itself; tests call it after each mutation.
//!
//! The pass is compiled into debug and test builds, and into release builds
//! only with the `validate` feature.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::compare::Compare;
use crate::fibonacci::FibonacciHeap;
use crate::storage::NodeStorage;

/// A broken heap invariant, naming the node where it was detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantViolation<K> {
    /// `node.right.left != node` (or the left link is otherwise inconsistent)
    #[error("sibling links are not mutually consistent at node {0:?}")]
    BrokenSiblingLink(K),
    /// A node in a child ring does not point back at the ring's owner
    #[error("node {0:?} is in a child list but its parent link disagrees")]
    ParentMismatch(K),
    /// A node in the root list has a parent
    #[error("root {0:?} has a parent")]
    RootHasParent(K),
    /// `degree` differs from the length of the child ring
    #[error("node {node:?} has degree {degree} but {children} children")]
    WrongDegree {
        /// The node whose degree is wrong
        node: K,
        /// Its recorded degree
        degree: usize,
        /// The length of its child ring
        children: usize,
    },
    /// A child compares strictly before its parent
    #[error("child {child:?} precedes its parent {parent:?}")]
    HeapOrder {
        /// The parent node
        parent: K,
        /// The offending child
        child: K,
    },
    /// Some element compares strictly before the recorded minimum
    #[error("node {0:?} precedes the recorded minimum")]
    MinNotMinimal(K),
    /// A node is reachable twice (rings overlap or a ring does not close)
    #[error("node {0:?} is reachable more than once")]
    DuplicateNode(K),
    /// A node is its own parent or its own first child
    #[error("node {0:?} refers to itself as parent or child")]
    SelfReference(K),
    /// A link names a node that is not in storage
    #[error("link to missing node {0:?}")]
    StaleKey(K),
    /// The element count disagrees with the structure or the storage
    #[error("heap records {recorded} elements, {reachable} reachable, {stored} stored")]
    WrongCount {
        /// `len()` as recorded by the heap
        recorded: usize,
        /// Nodes reachable from the minimum
        reachable: usize,
        /// Live nodes in storage
        stored: usize,
    },
}

impl<T, C, S> FibonacciHeap<T, C, S>
where
    C: Compare<T>,
    S: NodeStorage<T>,
{
    /// Checks every structural invariant with a full traversal
    ///
    /// - sibling rings are circular and doubly consistent
    /// - each node's degree equals the length of its child ring
    /// - roots have no parent, children point at their parent
    /// - every child is ordered no earlier than its parent
    /// - nothing precedes the minimum
    /// - no node is reachable twice or refers to itself
    /// - `len()` equals both the reachable node count and the live slot count
    ///
    /// # Errors
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), InvariantViolation<S::Key>> {
        let min = match self.min {
            Some(min) => min,
            None => return self.check_count(0),
        };
        let min_value = &self.nodes.get(min).ok_or(InvariantViolation::StaleKey(min))?.value;

        let mut seen = FxHashSet::default();
        // (ring entry point, owner of the ring)
        let mut rings = vec![(min, None)];

        while let Some((start, owner)) = rings.pop() {
            let mut current = start;
            loop {
                if !seen.insert(current) {
                    return Err(InvariantViolation::DuplicateNode(current));
                }
                let node = self
                    .nodes
                    .get(current)
                    .ok_or(InvariantViolation::StaleKey(current))?;

                if node.parent == Some(current) || node.child == Some(current) {
                    return Err(InvariantViolation::SelfReference(current));
                }
                match (owner, node.parent) {
                    (None, Some(_)) => return Err(InvariantViolation::RootHasParent(current)),
                    (Some(owner), parent) if parent != Some(owner) => {
                        return Err(InvariantViolation::ParentMismatch(current))
                    }
                    _ => {}
                }

                if let Some(owner) = owner {
                    let parent_value = &self.nodes.node(owner).value;
                    if self.compare.less(&node.value, parent_value) {
                        return Err(InvariantViolation::HeapOrder {
                            parent: owner,
                            child: current,
                        });
                    }
                }
                if self.compare.less(&node.value, min_value) {
                    return Err(InvariantViolation::MinNotMinimal(current));
                }

                match node.child {
                    Some(child) => {
                        let children = self.ring_len(child)?;
                        if children != node.degree {
                            return Err(InvariantViolation::WrongDegree {
                                node: current,
                                degree: node.degree,
                                children,
                            });
                        }
                        rings.push((child, Some(current)));
                    }
                    None if node.degree != 0 => {
                        return Err(InvariantViolation::WrongDegree {
                            node: current,
                            degree: node.degree,
                            children: 0,
                        });
                    }
                    None => {}
                }

                let right = node.right;
                let right_node = self
                    .nodes
                    .get(right)
                    .ok_or(InvariantViolation::StaleKey(right))?;
                if right_node.left != current {
                    return Err(InvariantViolation::BrokenSiblingLink(current));
                }

                current = right;
                if current == start {
                    break;
                }
            }
        }

        self.check_count(seen.len())
    }

    /// Length of the ring at `start`, bounded by the number of stored nodes
    fn ring_len(&self, start: S::Key) -> Result<usize, InvariantViolation<S::Key>> {
        let mut current = start;
        let mut count = 0;
        loop {
            count += 1;
            if count > self.nodes.len() {
                return Err(InvariantViolation::DuplicateNode(current));
            }
            current = self
                .nodes
                .get(current)
                .ok_or(InvariantViolation::StaleKey(current))?
                .right;
            if current == start {
                return Ok(count);
            }
        }
    }

    fn check_count(&self, reachable: usize) -> Result<(), InvariantViolation<S::Key>> {
        let stored = self.nodes.len();
        if reachable != self.len || stored != self.len {
            return Err(InvariantViolation::WrongCount {
                recorded: self.len,
                reachable,
                stored,
            });
        }
        Ok(())
    }
}
