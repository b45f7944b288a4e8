//! Single-process micro-benchmarks for the Kaban typed store. It writes
//! 1 M integer entries in batches, then exercises random typed lookups,
//! overwrites and the JSON projection.

use kaban::{
    TypedStore,
    traits::{StoreReader, StoreWriter},
};
use rand::{Rng, rng};
use std::time::Instant;

// ---------------------------------------------------------------------------
// Tunables
// ---------------------------------------------------------------------------

const WRITE_BATCH_SIZE: usize = 1024; // entries / store_all

const NUM_ENTRIES: usize = 1_000_000;
const NUM_RANDOM_CHECKS: usize = 1_000_000;
const NUM_OVERWRITES: usize = 250_000;
const NUM_PROJECTED: usize = 100_000;

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() {
    let store = TypedStore::with_capacity(16 * 1024 * 1024);

    println!("Running store benchmark…");
    benchmark_store_entries(&store);
    benchmark_random_reads(&store);
    benchmark_overwrites(&store);
    benchmark_json_projection();
    println!("{}", store.stats().expect("stats failed"));
    println!("✅ Benchmarks completed.");
}

// ---------------------------------------------------------------------------
// 1 ─ Write 1 M entries (batched)
// ---------------------------------------------------------------------------

fn benchmark_store_entries(store: &TypedStore) {
    let mut batch = Vec::with_capacity(WRITE_BATCH_SIZE);

    let start_time = Instant::now();

    for i in 0..NUM_ENTRIES {
        batch.push((format!("bench-key-{i}"), i as u64));

        if batch.len() == WRITE_BATCH_SIZE {
            store.store_all(batch.drain(..)).expect("Batch store failed");
        }
    }
    if !batch.is_empty() {
        store.store_all(batch.drain(..)).expect("Batch store failed");
    }

    let dt = start_time.elapsed();
    println!(
        "Stored {NUM_ENTRIES} entries in {:#.3}s ({:#.3} writes/s)",
        dt.as_secs_f64(),
        NUM_ENTRIES as f64 / dt.as_secs_f64()
    );
}

// ---------------------------------------------------------------------------
// 2 ─ Random typed look-ups (with narrowing)
// ---------------------------------------------------------------------------

fn benchmark_random_reads(store: &TypedStore) {
    let mut rng = rng();

    let start_time = Instant::now();

    for _ in 0..NUM_RANDOM_CHECKS {
        let i = rng.random_range(0..NUM_ENTRIES);
        let stored = store
            .load_u32(&format!("bench-key-{i}"))
            .expect("Random read failed")
            .expect("Missing entry in random read");

        assert_eq!(stored, i as u32, "Corrupt data for key {i}");
    }

    let dt = start_time.elapsed();
    println!(
        "Randomly read {NUM_RANDOM_CHECKS} entries in {:#.3}s ({:#.3} reads/s)",
        dt.as_secs_f64(),
        NUM_RANDOM_CHECKS as f64 / dt.as_secs_f64()
    );
}

// ---------------------------------------------------------------------------
// 3 ─ Overwrites (tombstone + append)
// ---------------------------------------------------------------------------

fn benchmark_overwrites(store: &TypedStore) {
    let mut rng = rng();

    let start_time = Instant::now();

    for _ in 0..NUM_OVERWRITES {
        let i = rng.random_range(0..NUM_ENTRIES);
        store
            .store(&format!("bench-key-{i}"), format!("value-{i}"))
            .expect("Overwrite failed");
    }

    let dt = start_time.elapsed();
    println!(
        "Overwrote {NUM_OVERWRITES} entries in {:#.3}s ({:#.3} writes/s)",
        dt.as_secs_f64(),
        NUM_OVERWRITES as f64 / dt.as_secs_f64()
    );
}

// ---------------------------------------------------------------------------
// 4 ─ JSON projection
// ---------------------------------------------------------------------------

fn benchmark_json_projection() {
    let store = TypedStore::new();
    store
        .store_all((0..NUM_PROJECTED).map(|i| (format!("k{i:06}"), vec![i as i64, -(i as i64)])))
        .expect("Batch store failed");

    let start_time = Instant::now();
    let json = store.to_json().expect("Projection failed");
    let dt = start_time.elapsed();

    println!(
        "Projected {NUM_PROJECTED} entries ({}) in {:#.3}s",
        kaban::format_bytes(json.len() as u64),
        dt.as_secs_f64()
    );
}
