//! Insert and extract-min benchmarks
//!
//! Compares the Fibonacci heap on both storages against the binary heap on
//! three workloads: bulk insert, insert-then-drain, and a mixed random stream.
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench heap_ops
//!
//! # Only the drain workload
//! cargo bench --bench heap_ops -- 'drain/'
//! ```

use arena_fibheap::simple_binary::SimpleBinaryHeap;
use arena_fibheap::{FibonacciHeap, Heap, Natural, VecStorage};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Linear congruential generator for reproducible random numbers
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1);
        self.state
    }

    fn next_range(&mut self, min: u32, max: u32) -> u32 {
        let range = (max - min) as u64;
        if range == 0 {
            return min;
        }
        min + ((self.next() >> 33) % range) as u32
    }
}

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn random_values(n: usize, seed: u64) -> Vec<u32> {
    let mut rng = Lcg::new(seed);
    (0..n).map(|_| rng.next_range(0, u32::MAX)).collect()
}

fn insert_all<H: Heap<u32> + Default>(values: &[u32]) -> H {
    let mut heap = H::default();
    for &value in values {
        heap.insert(value);
    }
    heap
}

fn drain<H: Heap<u32> + Default>(values: &[u32]) -> u64 {
    let mut heap: H = insert_all(values);
    let mut sum = 0u64;
    while let Ok(value) = heap.extract_min() {
        sum = sum.wrapping_add(value as u64);
    }
    sum
}

/// 3:2 insert to extract stream; the heap grows slowly
fn mixed<H: Heap<u32> + Default>(n: usize, seed: u64) -> u64 {
    let mut heap = H::default();
    let mut rng = Lcg::new(seed);
    let mut sum = 0u64;
    for _ in 0..n {
        if rng.next_range(0, 5) < 3 {
            heap.insert(rng.next_range(0, u32::MAX));
        } else if let Ok(value) = heap.extract_min() {
            sum = sum.wrapping_add(value as u64);
        }
    }
    sum
}

type SlotFib = FibonacciHeap<u32>;
type VecFib = FibonacciHeap<u32, Natural, VecStorage<u32>>;
type Binary = SimpleBinaryHeap<u32>;

fn benchmark_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for n in SIZES {
        let values = random_values(n, 12345);
        group.bench_with_input(BenchmarkId::new("fibonacci_slotmap", n), &values, |b, vs| {
            b.iter(|| black_box(insert_all::<SlotFib>(vs).len()))
        });
        group.bench_with_input(BenchmarkId::new("fibonacci_vec", n), &values, |b, vs| {
            b.iter(|| black_box(insert_all::<VecFib>(vs).len()))
        });
        group.bench_with_input(BenchmarkId::new("simple_binary", n), &values, |b, vs| {
            b.iter(|| black_box(insert_all::<Binary>(vs).len()))
        });
    }

    group.finish();
}

fn benchmark_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("drain");
    group.sample_size(20);

    for n in SIZES {
        let values = random_values(n, 54321);
        group.bench_with_input(BenchmarkId::new("fibonacci_slotmap", n), &values, |b, vs| {
            b.iter(|| black_box(drain::<SlotFib>(vs)))
        });
        group.bench_with_input(BenchmarkId::new("fibonacci_vec", n), &values, |b, vs| {
            b.iter(|| black_box(drain::<VecFib>(vs)))
        });
        group.bench_with_input(BenchmarkId::new("simple_binary", n), &values, |b, vs| {
            b.iter(|| black_box(drain::<Binary>(vs)))
        });
    }

    group.finish();
}

fn benchmark_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(20);

    for n in SIZES {
        group.bench_function(BenchmarkId::new("fibonacci_slotmap", n), |b| {
            b.iter(|| black_box(mixed::<SlotFib>(n, 7)))
        });
        group.bench_function(BenchmarkId::new("fibonacci_vec", n), |b| {
            b.iter(|| black_box(mixed::<VecFib>(n, 7)))
        });
        group.bench_function(BenchmarkId::new("simple_binary", n), |b| {
            b.iter(|| black_box(mixed::<Binary>(n, 7)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_insert, benchmark_drain, benchmark_mixed);

criterion_main!(benches);
