//! Benchmarks for formation sampling and the per-frame engine step.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use grove::animation::cubic_in_out;
use grove::formation::{Formation, FormationKind};
use grove::options::FormationOptions;
use grove::{Options, TreeEngine};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn easing_benchmark(c: &mut Criterion) {
    c.bench_function("cubic_in_out_easing", |b| {
        b.iter(|| black_box(cubic_in_out(black_box(0.5))));
    });
}

fn formation_benchmark(c: &mut Criterion) {
    let opts = FormationOptions::default();
    let mut group = c.benchmark_group("formation");
    for kind in [FormationKind::Foliage, FormationKind::Ornament] {
        group.bench_function(format!("{kind:?}"), |b| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| black_box(Formation::for_kind(kind, &opts, &mut rng)));
        });
    }
    group.finish();
}

fn engine_benchmark(c: &mut Criterion) {
    let mut options = Options::default();
    options.formation.seed = Some(7);
    let mut engine = TreeEngine::new(options);

    c.bench_function("engine_update", |b| {
        b.iter(|| engine.update(black_box(1.0 / 60.0)));
    });
    c.bench_function("frame_geometry", |b| {
        b.iter(|| black_box(engine.frame_geometry()));
    });
}

criterion_group!(
    benches,
    easing_benchmark,
    formation_benchmark,
    engine_benchmark
);
criterion_main!(benches);
