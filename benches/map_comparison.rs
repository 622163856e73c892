use core::hash::BuildHasher;
use core::hint::black_box;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::HashMap as HashbrownMap;
use hop_chain::HashMap as HopChainMap;
use rand::Rng;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Zipf;
use siphasher::sip::SipHasher;

#[derive(Clone, Default)]
struct SipBuilder;

impl BuildHasher for SipBuilder {
    type Hasher = SipHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SipHasher::new()
    }
}

trait BenchKey: Clone + core::hash::Hash + Eq {
    fn new(key: u64) -> Self;
}

impl BenchKey for u64 {
    fn new(key: u64) -> Self {
        black_box(key)
    }
}

impl BenchKey for String {
    fn new(key: u64) -> Self {
        black_box(format!("key_{:016X}", key))
    }
}

const SIZES: &[usize] = &[
    (1 << 10),
    (1 << 12),
    (1 << 14),
    (1 << 16),
];

fn random_keys<K: BenchKey>(count: usize) -> Vec<K> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| K::new(rng.try_next_u64().unwrap()))
        .collect()
}

fn bench_insert_random<K: BenchKey>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("insert_random_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = random_keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("hop_chain/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.clone();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    keys
                },
                |keys| {
                    let mut map = HopChainMap::with_hasher(SipBuilder);
                    for (i, key) in keys.into_iter().enumerate() {
                        black_box(map.insert(key, i));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.clone();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    keys
                },
                |keys| {
                    let mut map = HashbrownMap::with_hasher(SipBuilder);
                    for (i, key) in keys.into_iter().enumerate() {
                        map.entry(key).or_insert(i);
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_find_hit_miss<K: BenchKey>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("find_hit_miss_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let present = random_keys::<K>(size);
        let mut probes = present.clone();
        probes.extend(random_keys::<K>(size));
        probes.shuffle(&mut SmallRng::from_os_rng());

        let mut hop_map = HopChainMap::with_hasher(SipBuilder);
        let mut brown_map = HashbrownMap::with_hasher(SipBuilder);
        for (i, key) in present.iter().enumerate() {
            hop_map.insert(key.clone(), i);
            brown_map.insert(key.clone(), i);
        }

        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_function(format!("hop_chain/{size}"), |b| {
            b.iter(|| {
                for key in &probes {
                    black_box(hop_map.get(key));
                }
            })
        });
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for key in &probes {
                    black_box(brown_map.get(key));
                }
            })
        });
    }

    group.finish();
}

fn bench_remove<K: BenchKey>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("remove_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = random_keys::<K>(size);
        let mut hop_map = HopChainMap::with_hasher(SipBuilder);
        let mut brown_map = HashbrownMap::with_hasher(SipBuilder);
        for (i, key) in keys.iter().enumerate() {
            hop_map.insert(key.clone(), i);
            brown_map.insert(key.clone(), i);
        }

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("hop_chain/{size}"), |b| {
            b.iter_batched(
                || hop_map.clone(),
                |mut map| {
                    for key in &keys {
                        black_box(map.remove(key));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || brown_map.clone(),
                |mut map| {
                    for key in &keys {
                        black_box(map.remove(key));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_iteration<K: BenchKey>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("iteration_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = random_keys::<K>(size);
        let hop_map: HopChainMap<K, usize, SipBuilder> =
            keys.iter().cloned().enumerate().map(|(i, k)| (k, i)).collect();
        let brown_map: HashbrownMap<K, usize, SipBuilder> =
            keys.iter().cloned().enumerate().map(|(i, k)| (k, i)).collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("hop_chain/{size}"), |b| {
            b.iter(|| black_box(hop_map.values().sum::<usize>()))
        });
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| black_box(brown_map.values().sum::<usize>()))
        });
    }

    group.finish();
}

#[derive(Clone, Copy)]
enum Operation {
    Insert,
    Find,
    Remove,
}

fn bench_mixed_zipf<K: BenchKey>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("mixed_zipf_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let mut rng = SmallRng::from_os_rng();
        let op_distr = Zipf::new(3.0, 1.0).unwrap();
        let key_distr = Zipf::new(size as f64 * 2.0, 1.0).unwrap();

        let operations = (0..size * 3)
            .map(|_| {
                let op_choice: f64 = rng.sample(op_distr);
                let key = K::new(rng.sample(key_distr) as u64);
                let op = if op_choice <= 1.0 {
                    Operation::Find
                } else if op_choice <= 2.0 {
                    Operation::Insert
                } else {
                    Operation::Remove
                };
                (op, key)
            })
            .collect::<Vec<(Operation, K)>>();

        group.throughput(Throughput::Elements(operations.len() as u64));
        group.bench_function(format!("hop_chain/{size}"), |b| {
            b.iter_batched(
                || operations.clone(),
                |operations| {
                    let mut map = HopChainMap::with_hasher(SipBuilder);
                    for (op, key) in operations {
                        match op {
                            Operation::Insert => {
                                black_box(map.insert(key, 0u64));
                            }
                            Operation::Find => {
                                black_box(map.get(&key));
                            }
                            Operation::Remove => {
                                black_box(map.remove(&key));
                            }
                        }
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || operations.clone(),
                |operations| {
                    let mut map = HashbrownMap::with_hasher(SipBuilder);
                    for (op, key) in operations {
                        match op {
                            Operation::Insert => {
                                map.entry(key).or_insert(0u64);
                            }
                            Operation::Find => {
                                black_box(map.get(&key));
                            }
                            Operation::Remove => {
                                black_box(map.remove(&key));
                            }
                        }
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
    bench_insert_random::<u64>,
    bench_insert_random::<String>,
    bench_find_hit_miss::<u64>,
    bench_find_hit_miss::<String>,
    bench_remove::<u64>,
    bench_remove::<String>,
    bench_iteration::<u64>,
    bench_iteration::<String>,
    bench_mixed_zipf::<u64>,
    bench_mixed_zipf::<String>,
);

criterion_main!(benches);
