use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qre_core::{Registry, evaluate, lookup_code, sample_curve, solve_for_n};

fn benchmark_estimation(c: &mut Criterion) {
    let surface = lookup_code("surface").unwrap();
    let lifted = lookup_code("lifted").unwrap();

    c.bench_function("evaluate_surface", |b| {
        b.iter(|| evaluate(surface, black_box(0.001), black_box(1000), 1));
    });

    c.bench_function("solve_for_n_lifted", |b| {
        b.iter(|| solve_for_n(lifted, black_box(0.003), 1, black_box(1e-9)));
    });

    c.bench_function("sample_curve_all_codes", |b| {
        b.iter(|| {
            Registry::standard()
                .iter()
                .map(|code| sample_curve(code, black_box(1e-6), 1).map(Iterator::count))
                .collect::<Vec<_>>()
        });
    });
}

criterion_group!(benches, benchmark_estimation);
criterion_main!(benches);
