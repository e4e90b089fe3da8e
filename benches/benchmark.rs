use criterion::{
    criterion_group, criterion_main, AxisScale, BenchmarkId, Criterion, PlotConfiguration,
};
use rand::{thread_rng, Rng};

use glam::DVec3;
use perihelion::prelude::*;

fn random_states(i: usize) -> Vec<BodyState> {
    let mut rng = thread_rng();
    let mut gen = |range| rng.gen_range(range);

    (0..i)
        .map(|_| BodyState {
            position: DVec3::new(gen(-100.0..100.0), gen(-100.0..100.0), gen(-100.0..100.0)),
            velocity: DVec3::new(gen(-0.1..0.1), gen(-0.1..0.1), gen(-0.1..0.1)),
            mass: gen(0.1..100.0),
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Perihelion");
    group
        .plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic))
        .warm_up_time(std::time::Duration::from_secs(1))
        .sample_size(50);

    for i in (1..=7).map(|i| 2_usize.pow(i)) {
        let bodies = random_states(i);
        let newtonian = vec![DVec3::ZERO; i];

        let mut model = implicit::NBody::new(1.0, 1E4);
        group.bench_with_input(BenchmarkId::new("implicit::NBody", i), &bodies, |b, input| {
            b.iter(|| {
                let mut accelerations = newtonian.clone();
                model.correct(input, &mut accelerations);
                accelerations
            })
        });

        let mut model = explicit::TwoBody { g: 1.0, c: 1E4 };
        group.bench_with_input(BenchmarkId::new("explicit::TwoBody", i), &bodies, |b, input| {
            b.iter(|| {
                let mut accelerations = newtonian.clone();
                model.correct(input, &mut accelerations);
                accelerations
            })
        });
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
