use criterion::{Criterion, black_box, criterion_group, criterion_main};

use qwalk::{Coin, HypercubeWalk, RectangleWalk, StaggeredRectangleWalk, Vertex, WalkSimulator};

fn bench_rectangle_step(c: &mut Criterion) {
    let mut walk = RectangleWalk::new(64, 64, Coin::Akr).unwrap();
    walk.mark_vertex(Vertex::new(31, 31)).unwrap();

    c.bench_function("rectangle 64x64 step", |b| {
        b.iter(|| {
            black_box(&mut walk).run(1).unwrap();
        })
    });
}

fn bench_lackadaisical_step(c: &mut Criterion) {
    let mut walk = RectangleWalk::with_self_loop(64, 64, Coin::Grover, 4.0 / 4096.0).unwrap();
    walk.mark_vertex(Vertex::new(31, 31)).unwrap();

    c.bench_function("lackadaisical 64x64 step", |b| {
        b.iter(|| {
            black_box(&mut walk).run(1).unwrap();
        })
    });
}

fn bench_staggered_step(c: &mut Criterion) {
    let mut walk = StaggeredRectangleWalk::new(64, 64).unwrap();
    walk.mark_vertex(Vertex::new(31, 31)).unwrap();

    c.bench_function("staggered 64x64 step", |b| {
        b.iter(|| {
            black_box(&mut walk).run(1).unwrap();
        })
    });
}

fn bench_hypercube_step(c: &mut Criterion) {
    let mut walk = HypercubeWalk::new(12, Coin::Akr).unwrap();
    walk.mark_vertex(0).unwrap();

    c.bench_function("hypercube dim 12 step", |b| {
        b.iter(|| {
            black_box(&mut walk).run(1).unwrap();
        })
    });
}

criterion_group!(
    benches,
    bench_rectangle_step,
    bench_lackadaisical_step,
    bench_staggered_step,
    bench_hypercube_step
);
criterion_main!(benches);
