use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use glam::Vec2;
use shunt::narrowphase;
use shunt::{Circle, Polygon, Response, ScratchPool};

fn regular_polygon(position: Vec2, sides: usize, radius: f32) -> Polygon {
    // Clockwise in y-down coordinates.
    let points = (0..sides)
        .map(|i| {
            let angle = (i as f32 / sides as f32) * std::f32::consts::TAU;
            Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect();
    Polygon::new(position, points)
}

fn bench_circle_circle(c: &mut Criterion) {
    let pool = ScratchPool::new();
    let a = Circle::new(Vec2::new(0.0, 0.0), 5.0);
    let b = Circle::new(Vec2::new(7.0, 0.0), 5.0);
    let mut response = Response::new();
    c.bench_function("circle_circle", |bencher| {
        bencher.iter(|| {
            narrowphase::circle_circle(
                black_box(&pool),
                black_box(&a),
                black_box(&b),
                Some(&mut response),
            )
        })
    });
}

fn bench_polygon_polygon(c: &mut Criterion) {
    let pool = ScratchPool::new();
    let mut group = c.benchmark_group("polygon_polygon");
    for &sides in &[4usize, 8, 16, 32] {
        let a = regular_polygon(Vec2::new(0.0, 0.0), sides, 10.0);
        let overlapping = regular_polygon(Vec2::new(15.0, 0.0), sides, 10.0);
        let separated = regular_polygon(Vec2::new(25.0, 0.0), sides, 10.0);
        let mut response = Response::new();
        group.bench_function(format!("hit/{sides}"), |bencher| {
            bencher.iter(|| {
                narrowphase::polygon_polygon(
                    black_box(&pool),
                    black_box(&a),
                    black_box(&overlapping),
                    Some(&mut response),
                )
            })
        });
        group.bench_function(format!("miss/{sides}"), |bencher| {
            bencher.iter(|| {
                narrowphase::polygon_polygon(
                    black_box(&pool),
                    black_box(&a),
                    black_box(&separated),
                    None,
                )
            })
        });
    }
    group.finish();
}

fn bench_polygon_circle(c: &mut Criterion) {
    let pool = ScratchPool::new();
    let polygon = regular_polygon(Vec2::new(0.0, 0.0), 8, 10.0);
    let circle = Circle::new(Vec2::new(12.0, 0.0), 4.0);
    let mut response = Response::new();
    c.bench_function("polygon_circle", |bencher| {
        bencher.iter(|| {
            narrowphase::polygon_circle(
                black_box(&pool),
                black_box(&polygon),
                black_box(&circle),
                Some(&mut response),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_circle_circle,
    bench_polygon_polygon,
    bench_polygon_circle
);
criterion_main!(benches);
