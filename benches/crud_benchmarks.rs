use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use osbst::OrderedMap;
use std::collections::BTreeMap;
use std::hint::black_box;

const N: usize = 10_000;

/// Sorted input degenerates the tree into a chain, so keep it small.
const SORTED_N: usize = 2_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn random_maps(n: usize) -> (Vec<i64>, OrderedMap<i64, i64>, BTreeMap<i64, i64>) {
    let keys = random_keys(n);
    let os_map = keys.iter().map(|&k| (k, k)).collect();
    let bt_map = keys.iter().map(|&k| (k, k)).collect();
    (keys, os_map, bt_map)
}

// ─── Construction ───────────────────────────────────────────────────────────

fn bench_insert_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("insert_random");

    group.bench_function(BenchmarkId::new("OrderedMap", N), |b| {
        b.iter(|| {
            let mut map = OrderedMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.finish();
}

fn bench_insert_ordered(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_ordered");

    group.bench_function(BenchmarkId::new("OrderedMap", SORTED_N), |b| {
        b.iter(|| {
            let mut map = OrderedMap::new();
            for i in 0..SORTED_N as i64 {
                map.insert(i, i);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("OrderedMap::from_sorted_vec", SORTED_N), |b| {
        b.iter(|| OrderedMap::from_sorted_vec(ordered_keys(SORTED_N).into_iter().map(|k| (k, k)).collect()));
    });

    group.bench_function(BenchmarkId::new("BTreeMap", SORTED_N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for i in 0..SORTED_N as i64 {
                map.insert(i, i);
            }
            map
        });
    });

    group.finish();
}

// ─── Lookup ─────────────────────────────────────────────────────────────────

fn bench_get_random(c: &mut Criterion) {
    let (keys, os_map, bt_map) = random_maps(N);
    let mut group = c.benchmark_group("get_random");

    group.bench_function(BenchmarkId::new("OrderedMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for k in &keys {
                if let Some(&v) = os_map.get(k) {
                    sum = sum.wrapping_add(v);
                }
            }
            black_box(sum)
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for k in &keys {
                if let Some(&v) = bt_map.get(k) {
                    sum = sum.wrapping_add(v);
                }
            }
            black_box(sum)
        });
    });

    group.finish();
}

// ─── Order statistics ───────────────────────────────────────────────────────

fn bench_select(c: &mut Criterion) {
    let (_, os_map, bt_map) = random_maps(N);
    let len = os_map.len();
    let mut group = c.benchmark_group("select");

    group.bench_function(BenchmarkId::new("OrderedMap", len), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for rank in (0..len).step_by(7) {
                if let Ok(&k) = os_map.select(rank) {
                    sum = sum.wrapping_add(k);
                }
            }
            black_box(sum)
        });
    });

    // BTreeMap has no order statistics; a linear walk is the baseline.
    group.bench_function(BenchmarkId::new("BTreeMap::keys().nth", len), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for rank in (0..len).step_by(7) {
                if let Some(&k) = bt_map.keys().nth(rank) {
                    sum = sum.wrapping_add(k);
                }
            }
            black_box(sum)
        });
    });

    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let (keys, os_map, bt_map) = random_maps(N);
    let mut group = c.benchmark_group("rank");

    group.bench_function(BenchmarkId::new("OrderedMap", N), |b| {
        b.iter(|| {
            let mut sum = 0usize;
            for k in keys.iter().step_by(7) {
                sum = sum.wrapping_add(os_map.rank(k));
            }
            black_box(sum)
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap::range().count", N), |b| {
        b.iter(|| {
            let mut sum = 0usize;
            for k in keys.iter().step_by(7) {
                sum = sum.wrapping_add(bt_map.range(..k).count());
            }
            black_box(sum)
        });
    });

    group.finish();
}

fn bench_floor_ceiling(c: &mut Criterion) {
    let (keys, os_map, bt_map) = random_maps(N);
    let probes: Vec<i64> = keys.iter().map(|k| k.wrapping_add(1)).collect();
    let mut group = c.benchmark_group("floor_ceiling");

    group.bench_function(BenchmarkId::new("OrderedMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for p in &probes {
                if let Ok(&k) = os_map.floor(p) {
                    sum = sum.wrapping_add(k);
                }
                if let Ok(&k) = os_map.ceiling(p) {
                    sum = sum.wrapping_sub(k);
                }
            }
            black_box(sum)
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for p in &probes {
                if let Some((&k, _)) = bt_map.range(..=p).next_back() {
                    sum = sum.wrapping_add(k);
                }
                if let Some((&k, _)) = bt_map.range(p..).next() {
                    sum = sum.wrapping_sub(k);
                }
            }
            black_box(sum)
        });
    });

    group.finish();
}

// ─── Deletion and iteration ─────────────────────────────────────────────────

fn bench_delete_min(c: &mut Criterion) {
    let (_, os_map, bt_map) = random_maps(N);
    let mut group = c.benchmark_group("delete_min_until_empty");

    group.bench_function(BenchmarkId::new("OrderedMap", N), |b| {
        b.iter_batched(
            || os_map.clone(),
            |mut map| {
                while !map.is_empty() {
                    map.delete_min();
                }
                map
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || bt_map.clone(),
            |mut map| {
                while map.pop_first().is_some() {}
                map
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn bench_iter(c: &mut Criterion) {
    let (_, os_map, bt_map) = random_maps(N);
    let mut group = c.benchmark_group("iter");

    group.bench_function(BenchmarkId::new("OrderedMap", N), |b| {
        b.iter(|| os_map.iter().fold(0i64, |acc, (k, _)| acc.wrapping_add(*k)));
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| bt_map.iter().fold(0i64, |acc, (k, _)| acc.wrapping_add(*k)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_random,
    bench_insert_ordered,
    bench_get_random,
    bench_select,
    bench_rank,
    bench_floor_ceiling,
    bench_delete_min,
    bench_iter,
);
criterion_main!(benches);
