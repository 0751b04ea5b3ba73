use chained_hashmap::{ChainedHashMap, ChainedList};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

const N: usize = 50_000;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled(seed: u64) -> (ChainedHashMap<String, u64>, Vec<String>) {
    let mut m = ChainedHashMap::new();
    let keys: Vec<_> = lcg(seed).take(N).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        m.set(k.clone(), i as u64).unwrap();
    }
    (m, keys)
}

// Precompute 10k pseudo-random picks from `keys`.
fn sample(keys: &[String]) -> Vec<String> {
    let n = keys.len();
    let mut s = 0x9e3779b97f4a7c15u64;
    (0..10_000)
        .map(|_| {
            s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
            keys[(s as usize) % n].clone()
        })
        .collect()
}

fn bench_set_fresh(c: &mut Criterion) {
    c.bench_function("chained::set_fresh_50k", |b| {
        b.iter_batched(
            ChainedHashMap::<String, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(N).enumerate() {
                    m.set(key(x), i as u64).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_set_overwrite(c: &mut Criterion) {
    c.bench_function("chained::set_overwrite_10k_on_50k", |b| {
        b.iter_batched(
            || {
                let (m, keys) = filled(2);
                (m, sample(&keys))
            },
            |(mut m, hits)| {
                for k in hits {
                    m.set(k, 0).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_expand(c: &mut Criterion) {
    c.bench_function("chained::expand_50k", |b| {
        b.iter_batched(
            || filled(3).0,
            |mut m| {
                m.expand();
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_remove_random_10k(c: &mut Criterion) {
    c.bench_function("chained::remove_random_10k_of_50k", |b| {
        b.iter_batched(
            || {
                let (m, keys) = filled(5);
                (m, sample(&keys))
            },
            |(mut m, to_remove)| {
                for k in &to_remove {
                    let _ = m.remove(k.as_str());
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit_10k(c: &mut Criterion) {
    c.bench_function("chained::get_hit_10k_on_50k", |b| {
        let (m, keys) = filled(7);
        let queries = sample(&keys);
        b.iter(|| {
            for k in &queries {
                black_box(m.get(k.as_str()).ok());
            }
        })
    });
}

fn bench_get_miss_10k(c: &mut Criterion) {
    c.bench_function("chained::get_miss_10k_on_50k", |b| {
        let (m, _) = filled(11);
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            for _ in 0..10_000 {
                let k = key(miss.next().unwrap());
                black_box(m.has(k.as_str()));
            }
        })
    });
}

fn bench_enumerate(c: &mut Criterion) {
    c.bench_function("chained::iter_all_50k", |b| {
        let (m, _) = filled(999);
        b.iter(|| {
            let mut sum = 0u64;
            for (_k, v) in m.iter() {
                sum = sum.wrapping_add(*v);
            }
            black_box(sum)
        })
    });

    c.bench_function("chained::entries_50k", |b| {
        let (m, _) = filled(1001);
        b.iter(|| black_box(m.entries().len()))
    });
}

fn bench_list_positional(c: &mut Criterion) {
    c.bench_function("chained::list_insert_at_middle_1k", |b| {
        b.iter_batched(
            ChainedList::<u64, u64>::new,
            |mut list| {
                for i in 0..1_000u64 {
                    let mid = list.len() / 2;
                    list.insert_at(mid, i, i).unwrap();
                }
                black_box(list)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_insert;
    config = bench_config();
    targets = bench_set_fresh, bench_set_overwrite, bench_expand
}
criterion_group! {
    name = benches_ops;
    config = bench_config();
    targets = bench_remove_random_10k,
              bench_get_hit_10k,
              bench_get_miss_10k,
              bench_enumerate,
              bench_list_positional
}
criterion_main!(benches_insert, benches_ops);
