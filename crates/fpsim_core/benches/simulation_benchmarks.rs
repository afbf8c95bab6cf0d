//! Benchmarks for the simulation hot paths

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use fpsim_core::locations;
use fpsim_core::simulation::Sim;
use fpsim_core::switching::{MethodSwitcher, sample_weights};

fn bench_sample_weights(c: &mut Criterion) {
    let row = vec![0.7865, 0.0028, 0.0097, 0.0245, 0.0209, 0.0864, 0.0506, 0.0057, 0.0016, 0.0113];
    c.bench_function("sample_weights_10", |b| {
        let mut rng = SmallRng::seed_from_u64(0);
        b.iter(|| sample_weights(black_box(&row), &mut rng));
    });
}

fn bench_trended_tables(c: &mut Criterion) {
    let pars = locations::make_pars("kenya").unwrap();
    c.bench_function("trend_all_tables", |b| {
        b.iter(|| MethodSwitcher::new(black_box(&pars.methods), 1995.0).unwrap());
    });
}

fn bench_test_location_run(c: &mut Criterion) {
    let pars = locations::make_pars("test").unwrap().with_n_agents(200);
    c.bench_function("run_test_location_200_agents", |b| {
        b.iter(|| {
            Sim::new(black_box(pars.clone()), vec![])
                .unwrap()
                .run()
                .unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_sample_weights,
    bench_trended_tables,
    bench_test_location_run
);
criterion_main!(benches);
