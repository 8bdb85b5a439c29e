use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rbtree_map::RBTreeMap;
use std::collections::BTreeMap;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Simple LCG for a deterministic pseudo-random sequence.
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn key_patterns() -> [(&'static str, Vec<i64>); 3] {
    [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ]
}

// ─── Map Benchmarks ─────────────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_insert");

    for (pattern, keys) in key_patterns() {
        group.bench_function(BenchmarkId::new("RBTreeMap", pattern), |b| {
            b.iter(|| {
                let mut map = RBTreeMap::new();
                for &k in &keys {
                    // Random keys may repeat; the duplicate is simply rejected.
                    let _ = map.insert(k, k);
                }
                map
            });
        });

        group.bench_function(BenchmarkId::new("BTreeMap", pattern), |b| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &k in &keys {
                    map.entry(k).or_insert(k);
                }
                map
            });
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_search");

    for (pattern, keys) in key_patterns() {
        let rb_map: RBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        group.bench_function(BenchmarkId::new("RBTreeMap", pattern), |b| {
            b.iter(|| {
                let mut sum = 0i64;
                for &k in &keys {
                    if let Ok(&v) = rb_map.search(&k) {
                        sum = sum.wrapping_add(v);
                    }
                }
                sum
            });
        });

        group.bench_function(BenchmarkId::new("BTreeMap", pattern), |b| {
            b.iter(|| {
                let mut sum = 0i64;
                for &k in &keys {
                    if let Some(&v) = bt_map.get(&k) {
                        sum = sum.wrapping_add(v);
                    }
                }
                sum
            });
        });
    }

    group.finish();
}

fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_delete");

    for (pattern, keys) in key_patterns() {
        let rb_map: RBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        group.bench_function(BenchmarkId::new("RBTreeMap", pattern), |b| {
            b.iter_batched(
                || rb_map.clone(),
                |mut map| {
                    for k in &keys {
                        let _ = map.delete(k);
                    }
                    map
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(BenchmarkId::new("BTreeMap", pattern), |b| {
            b.iter_batched(
                || bt_map.clone(),
                |mut map| {
                    for k in &keys {
                        map.remove(k);
                    }
                    map
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_inorder(c: &mut Criterion) {
    let rb_map: RBTreeMap<i64, i64> = random_keys(N).into_iter().map(|k| (k, k)).collect();
    c.bench_function("map_inorder/RBTreeMap", |b| b.iter(|| rb_map.inorder().len()));
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(map_benches, bench_insert, bench_search, bench_delete, bench_inorder);

criterion_main!(map_benches);
