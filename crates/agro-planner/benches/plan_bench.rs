use agro_core::{Climate, FarmParameters, Investment, Rainfall, Soil};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn params(area: f64) -> FarmParameters {
    FarmParameters {
        area,
        soil: Soil::Clay,
        rainfall: Rainfall::Moderate,
        climate: Climate::Arid,
        investment: Investment::Medium,
    }
}

fn bench_generate(c: &mut Criterion) {
    let p = params(25.0);
    c.bench_function("generate_plan 25 acres", |b| {
        b.iter(|| black_box(agro_planner::generate_plan_seeded(&p, 42)))
    });
}

fn bench_recalculate(c: &mut Criterion) {
    let p = params(100.0);
    let plan = agro_planner::generate_plan_seeded(&p, 42);
    c.bench_function("recalculate 60x60", |b| {
        b.iter(|| black_box(agro_econ::recalculate(&plan.grid, &p)))
    });
}

criterion_group!(benches, bench_generate, bench_recalculate);
criterion_main!(benches);
