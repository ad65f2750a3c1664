use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use liftoff::assembly::{
    Aabb2d, AttachmentResolver, DragContext, PartCatalog, PartCategory, PartId, PartRegistry,
    RocketCompiler, Vector,
};
use std::hint::black_box;
use std::sync::Arc;

const CAPSULE: Vector = Vector::new(400.0, 200.0);

/// Capsule with `tanks` fuel tanks stacked beneath it, plus one loose engine
fn tower(tanks: usize) -> (PartRegistry, PartId) {
    let catalog = PartCatalog::standard(40.0).unwrap();
    let resolver = AttachmentResolver::default();
    let menu = Aabb2d::new(Vector::ZERO, Vector::new(200.0, 480.0));
    let mut ctx = DragContext::default();
    let mut registry = PartRegistry::new();
    registry.instantiate(Arc::clone(catalog.capsule()), CAPSULE);

    let fuel = catalog.kind(PartCategory::Fuel).unwrap();
    for i in 0..tanks {
        let tank = registry.instantiate(Arc::clone(fuel), Vector::new(600.0, 400.0));
        let target = Vector::new(CAPSULE.x, CAPSULE.y - 60.0 - 80.0 * i as f32);
        resolver.begin_drag(&mut ctx, &registry, tank).unwrap();
        resolver.drag_to(&ctx, &mut registry, target).unwrap();
        resolver.end_drag(&mut ctx, &mut registry, &menu);
    }
    assert_eq!(registry.active_parts().len(), tanks + 1);

    let engine = catalog.kind(PartCategory::Engine).unwrap();
    let bottom = CAPSULE.y - 20.0 - 80.0 * tanks as f32;
    let loose = registry.instantiate(Arc::clone(engine), Vector::new(CAPSULE.x + 3.0, bottom - 22.0));

    (registry, loose)
}

fn bench_find_candidate(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_candidate");
    let resolver = AttachmentResolver::default();

    // The only free down point is on the last tank, so every scan is a full one
    for &tanks in &[1, 10, 50, 200] {
        let (registry, loose) = tower(tanks);

        group.throughput(Throughput::Elements(tanks as u64 + 1));
        group.bench_with_input(BenchmarkId::new("tanks", tanks), &tanks, |b, _| {
            b.iter(|| black_box(resolver.find_candidate(black_box(&registry), loose)));
        });
    }

    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    let compiler = RocketCompiler::default();

    for &tanks in &[1, 10, 50, 200] {
        let (registry, _) = tower(tanks);

        group.throughput(Throughput::Elements(tanks as u64 + 1));
        group.bench_with_input(BenchmarkId::new("tanks", tanks), &tanks, |b, _| {
            b.iter(|| black_box(compiler.compile(black_box(&registry))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_find_candidate, bench_compile);
criterion_main!(benches);
