use criterion::{black_box, criterion_group, criterion_main, Criterion};
use coil_di::{Consumer, RegisterOptions, Registry};

fn bench_singleton_hit(c: &mut Criterion) {
    let mut registry = Registry::new();
    registry
        .register_with("answer", || 42u64, RegisterOptions::singleton())
        .unwrap();

    // Prime the cache
    let _ = registry.get::<u64>().unwrap();

    c.bench_function("singleton_hit_u64", |b| {
        b.iter(|| {
            let v = registry.get::<u64>().unwrap();
            black_box(v);
        })
    });
}

fn bench_factory_invoke(c: &mut Criterion) {
    struct Payload {
        data: [u8; 64],
    }

    let mut registry = Registry::new();
    registry
        .register::<Payload, _>("payload", || Payload { data: [0; 64] })
        .unwrap();

    c.bench_function("factory_invoke", |b| {
        b.iter(|| {
            let v = registry.get::<Payload>().unwrap();
            black_box(&v.data);
        })
    });
}

fn bench_resolve_vs_get(c: &mut Criterion) {
    let mut registry = Registry::new();
    registry
        .register_with("answer", || 42u64, RegisterOptions::singleton())
        .unwrap();
    let _ = registry.get::<u64>().unwrap();

    let mut group = c.benchmark_group("resolve_vs_get");

    group.bench_function("resolve_only", |b| {
        b.iter(|| {
            let d = registry.resolve::<u64>().unwrap();
            black_box(d);
        })
    });

    group.bench_function("resolve_and_invoke", |b| {
        b.iter(|| {
            let v = registry.get::<u64>().unwrap();
            black_box(v);
        })
    });

    group.finish();
}

fn bench_inject(c: &mut Criterion) {
    let mut registry = Registry::new();
    registry.register("world_provider", || "world!".to_string()).unwrap();
    registry.register("numba_provider", || 2u32).unwrap();

    let consumer = Consumer::new("sample", |args| {
        format!(
            "Hello, {} Numba: {}.",
            args.get::<String>("world"),
            args.get::<u32>("numba")
        )
    })
    .param::<String>("world")
    .param::<u32>("numba");

    c.bench_function("inject_two_params", |b| {
        b.iter(|| {
            let v = registry.inject(&consumer).unwrap();
            black_box(v);
        })
    });
}

criterion_group!(
    benches,
    bench_singleton_hit,
    bench_factory_invoke,
    bench_resolve_vs_get,
    bench_inject
);
criterion_main!(benches);
