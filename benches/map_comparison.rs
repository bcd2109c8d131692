use core::hint::black_box;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use probe_map::HashMap as ProbeHashMap;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

const SIZES: &[usize] = &[(1 << 10), (1 << 13), (1 << 16)];

fn shuffled_keys(count: usize) -> Vec<u64> {
    let mut keys: Vec<u64> = (0..count as u64).collect();
    keys.shuffle(&mut SmallRng::from_os_rng());
    keys
}

fn probe_map_with(keys: &[u64]) -> ProbeHashMap<u64, u64, probe_map::DefaultHashBuilder> {
    let mut map = ProbeHashMap::try_with_capacity(keys.len()).unwrap();
    for &k in keys {
        assert!(map.add(k, k));
    }
    map
}

fn hashbrown_with(keys: &[u64]) -> hashbrown::HashMap<u64, u64> {
    let mut map = hashbrown::HashMap::with_capacity(keys.len());
    for &k in keys {
        map.insert(k, k);
    }
    map
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_u64");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = shuffled_keys(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("probe_map/{size}"), |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut map = ProbeHashMap::try_new().unwrap();
                    for k in keys {
                        assert!(map.add(k, k));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut map = hashbrown::HashMap::new();
                    for k in keys {
                        map.insert(k, k);
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_find_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_hit_u64");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = shuffled_keys(size);
        let probe = probe_map_with(&keys);
        let brown = hashbrown_with(&keys);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("probe_map/{size}"), |b| {
            b.iter(|| {
                for k in &keys {
                    black_box(probe.get(k));
                }
            })
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for k in &keys {
                    black_box(brown.get(k));
                }
            })
        });
    }

    group.finish();
}

fn bench_find_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_miss_u64");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = shuffled_keys(size);
        let probe = probe_map_with(&keys);
        let brown = hashbrown_with(&keys);
        let absent: Vec<u64> = (size as u64..2 * size as u64).collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("probe_map/{size}"), |b| {
            b.iter(|| {
                for k in &absent {
                    black_box(probe.get(k));
                }
            })
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for k in &absent {
                    black_box(brown.get(k));
                }
            })
        });
    }

    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_u64");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = shuffled_keys(size);
        let probe = probe_map_with(&keys);
        let brown = hashbrown_with(&keys);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("probe_map/{size}"), |b| {
            b.iter_batched(
                || probe.try_clone().unwrap(),
                |mut map| {
                    for k in &keys {
                        black_box(map.remove(k));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || brown.clone(),
                |mut map| {
                    for k in &keys {
                        black_box(map.remove(k));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_find_hit,
    bench_find_miss,
    bench_remove
);
criterion_main!(benches);
