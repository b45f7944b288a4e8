//! Measure lock-contention throughput with many concurrent readers & writers
//! sharing one store.
//!
//!   $ cargo bench --bench contention_benchmark

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main, measurement::WallTime};
use kaban::{
    TypedStore,
    traits::{StoreReader, StoreWriter},
};
use rand::{Rng, rng};
use std::sync::Arc;
use std::thread;
use tokio::runtime::Runtime;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

const STRING_SIZES: [usize; 3] = [16, 256, 4_096];
const THREADS: usize = 8;
const WRITES_PER_THREAD: usize = 1_000;
const READS_PER_THREAD: usize = 4_000;
const SHARED_KEYS: usize = 64;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn writers_bench(c: &mut Criterion<WallTime>) {
    let mut group = c.benchmark_group("writers_vs_lock");
    group.sample_size(10);

    // One Tokio runtime that we reuse for every sample
    let rt = Runtime::new().unwrap();

    for &len in &STRING_SIZES {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{len}_chars")),
            &len,
            |b, &len| {
                b.iter(|| {
                    rt.block_on(async move {
                        let store = Arc::new(TypedStore::new());

                        let mut handles = Vec::with_capacity(THREADS);
                        for t in 0..THREADS {
                            let s = Arc::clone(&store);
                            handles.push(tokio::spawn(async move {
                                let mut rng = rng();
                                for i in 0..WRITES_PER_THREAD {
                                    let key = format!("t{t}_{i}");
                                    let value: String = (0..len)
                                        .map(|_| rng.random_range(b'a'..=b'z') as char)
                                        .collect();
                                    s.store(&key, value).unwrap();
                                }
                            }));
                        }

                        for handle in handles {
                            handle.await.unwrap();
                        }
                    });
                });
            },
        );
    }

    group.finish();
}

fn mixed_bench(c: &mut Criterion<WallTime>) {
    let mut group = c.benchmark_group("readers_and_overwriters");
    group.sample_size(10);

    for &writers in &[1usize, 2, 4] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{writers}_writers")),
            &writers,
            |b, &writers| {
                b.iter(|| {
                    let store = Arc::new(TypedStore::new());
                    store
                        .store_all((0..SHARED_KEYS).map(|k| (format!("shared{k}"), k as i64)))
                        .unwrap();

                    let handles: Vec<_> = (0..THREADS)
                        .map(|t| {
                            let s = Arc::clone(&store);
                            thread::spawn(move || {
                                let mut rng = rng();
                                if t < writers {
                                    for i in 0..WRITES_PER_THREAD {
                                        let k = rng.random_range(0..SHARED_KEYS);
                                        s.store(&format!("shared{k}"), i as i64).unwrap();
                                    }
                                } else {
                                    for _ in 0..READS_PER_THREAD {
                                        let k = rng.random_range(0..SHARED_KEYS);
                                        s.load_i64(&format!("shared{k}")).unwrap();
                                    }
                                }
                            })
                        })
                        .collect();

                    for handle in handles {
                        handle.join().unwrap();
                    }
                });
            },
        );
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Criterion harness
// ---------------------------------------------------------------------------

criterion_group!(benches, writers_bench, mixed_bench);
criterion_main!(benches);
