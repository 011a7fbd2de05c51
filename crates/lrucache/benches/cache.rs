use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lrucache::{LruCache, SharedLruCache};

fn bench_cached_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_hit", |b| {
        let mut cache = LruCache::new(1000).unwrap();
        let data = vec![b'x'; 1024];

        for i in 0..100u64 {
            cache.set(i, data.clone());
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get(&(counter % 100)));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_set_with_eviction(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_evict");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    for capacity in [16usize, 1024, 65_536] {
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &capacity,
            |b, &capacity| {
                let mut cache = LruCache::new(capacity).unwrap();
                let mut counter = 0u64;
                // Distinct keys: every set past warmup evicts
                b.iter(|| {
                    black_box(cache.push(counter, counter));
                    counter += 1;
                });
            },
        );
    }

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_read_50_write_shared", |b| {
        let cache = SharedLruCache::new(1000).unwrap();

        for i in 0..1000u64 {
            cache.set(i, i);
        }

        let mut counter = 0u64;
        b.iter(|| {
            if counter % 2 == 0 {
                black_box(cache.get(&(counter % 2000)));
            } else {
                cache.set(counter % 2000, counter);
            }
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_cached_get,
    bench_set_with_eviction,
    bench_mixed_50_50
);
criterion_main!(benches);
