use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dfs_backtrack::{solve, Square};

fn bench_open_tours(c: &mut Criterion) {
    let mut group = c.benchmark_group("knights_open_corner");
    for &n in &[8usize, 16, 32] {
        group.bench_function(format!("n_{n}"), |b| {
            b.iter(|| black_box(solve(n, Square::new(0, 0), false)))
        });
    }
    group.finish();
}

fn bench_exhaustive_failures(c: &mut Criterion) {
    let mut group = c.benchmark_group("knights_exhaustive");
    group.sample_size(10);
    group.bench_function("closed_5x5", |b| {
        b.iter(|| black_box(solve(5, Square::new(0, 0), true)))
    });
    group.bench_function("open_4x4", |b| {
        b.iter(|| black_box(solve(4, Square::new(0, 0), false)))
    });
    group.finish();
}

fn bench_closed_eight(c: &mut Criterion) {
    c.bench_function("knights_closed_8x8_corner", |b| {
        b.iter(|| black_box(solve(8, Square::new(0, 0), true)))
    });
}

criterion_group!(benches, bench_open_tours, bench_exhaustive_failures, bench_closed_eight);
criterion_main!(benches);
