//! Property-based tests using proptest
//!
//! These tests generate random sequences of operations, run them against the
//! Fibonacci heap and against [`SimpleBinaryHeap`] as a reference model, and
//! verify that both agree after every step and that the structural invariants
//! are always maintained.

use arena_fibheap::simple_binary::SimpleBinaryHeap;
use arena_fibheap::{
    Compare, FibonacciHeap, Heap, Natural, NodeStorage, Reversed, SlotMapStorage, VecStorage,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(i32),
    Extract,
    FindMin,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-100i32..100).prop_map(Op::Insert),
        2 => Just(Op::Extract),
        1 => Just(Op::FindMin),
    ]
}

#[cfg(debug_assertions)]
fn check_structure<T, C: Compare<T>, S: NodeStorage<T>>(
    heap: &FibonacciHeap<T, C, S>,
) -> Result<(), TestCaseError> {
    if let Err(violation) = heap.validate() {
        return Err(TestCaseError::fail(format!("invariant violated: {violation}")));
    }
    Ok(())
}

#[cfg(not(debug_assertions))]
fn check_structure<T, C: Compare<T>, S: NodeStorage<T>>(
    _heap: &FibonacciHeap<T, C, S>,
) -> Result<(), TestCaseError> {
    Ok(())
}

/// Runs `ops` on both heaps and compares every observable result
fn test_matches_reference<C, S>(ops: Vec<Op>, compare: C) -> Result<(), TestCaseError>
where
    C: Compare<i32> + Clone,
    S: NodeStorage<i32>,
{
    let mut heap: FibonacciHeap<i32, C, S> = FibonacciHeap::new_in(compare.clone());
    let mut model = SimpleBinaryHeap::with_comparator(compare);

    for op in ops {
        match op {
            Op::Insert(value) => {
                heap.insert(value);
                model.insert(value);
            }
            Op::Extract => {
                prop_assert_eq!(heap.extract_min(), model.extract_min());
            }
            Op::FindMin => {
                prop_assert_eq!(heap.find_min(), model.find_min());
            }
        }
        prop_assert_eq!(heap.len(), model.len());
        prop_assert_eq!(heap.is_empty(), model.is_empty());
        prop_assert_eq!(heap.storage().len(), heap.len());
        check_structure(&heap)?;
    }

    Ok(())
}

/// Test that draining returns the sorted input
fn test_pop_order<S: NodeStorage<i32>>(values: Vec<i32>) -> Result<(), TestCaseError> {
    let mut heap: FibonacciHeap<i32, Natural, S> = FibonacciHeap::default();
    heap.extend(values.iter().copied());

    let mut expected = values;
    expected.sort_unstable();
    prop_assert_eq!(heap.into_sorted_vec(), expected);
    Ok(())
}

/// Test that the root list stays within the degree bound after each extract
fn test_root_bound(values: Vec<i32>) -> Result<(), TestCaseError> {
    let mut heap: FibonacciHeap<i32> = values.into_iter().collect();

    while heap.len() > 1 {
        heap.extract_min().map_err(|e| TestCaseError::fail(e.to_string()))?;
        // distinct degrees, each at most log_phi(n)
        let bound = 2 * (usize::BITS - heap.len().leading_zeros()) as usize + 2;
        prop_assert!(heap.root_count() <= bound);
        check_structure(&heap)?;
    }
    Ok(())
}

/// Test that iteration yields exactly the live elements
fn test_iter_contents(values: Vec<i32>, extracts: usize) -> Result<(), TestCaseError> {
    let mut heap: FibonacciHeap<i32> = values.iter().copied().collect();
    let mut expected = values;
    expected.sort_unstable();

    let extracts = extracts.min(expected.len());
    for _ in 0..extracts {
        heap.extract_min().map_err(|e| TestCaseError::fail(e.to_string()))?;
    }

    let mut seen: Vec<i32> = heap.iter().copied().collect();
    seen.sort_unstable();
    prop_assert_eq!(&seen[..], &expected[extracts..]);
    Ok(())
}

proptest! {
    #[test]
    fn test_slotmap_matches_reference(ops in prop::collection::vec(op_strategy(), 0..200)) {
        test_matches_reference::<Natural, SlotMapStorage<i32>>(ops, Natural)?;
    }

    #[test]
    fn test_vec_storage_matches_reference(ops in prop::collection::vec(op_strategy(), 0..200)) {
        test_matches_reference::<Natural, VecStorage<i32>>(ops, Natural)?;
    }

    #[test]
    fn test_reversed_matches_reference(ops in prop::collection::vec(op_strategy(), 0..200)) {
        test_matches_reference::<Reversed, SlotMapStorage<i32>>(ops, Reversed)?;
    }

    #[test]
    fn test_slotmap_pop_order(values in prop::collection::vec(-1000i32..1000, 0..300)) {
        test_pop_order::<SlotMapStorage<i32>>(values)?;
    }

    #[test]
    fn test_vec_storage_pop_order(values in prop::collection::vec(-1000i32..1000, 0..300)) {
        test_pop_order::<VecStorage<i32>>(values)?;
    }

    #[test]
    fn test_root_list_bounded(values in prop::collection::vec(-1000i32..1000, 0..300)) {
        test_root_bound(values)?;
    }

    #[test]
    fn test_iter_yields_live_elements(
        values in prop::collection::vec(-100i32..100, 0..100),
        extracts in 0usize..100
    ) {
        test_iter_contents(values, extracts)?;
    }
}
