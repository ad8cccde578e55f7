//! Benchmarks for the root solvers, subdivision, and stack replay hot paths.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use polycurve::array::ArrayCache;
use polycurve::basics::PathConsumer;
use polycurve::curve_stack::CurveStack;
use polycurve::curves::{subdivide_cubic_at, subdivide_quad_at};
use polycurve::math::{cubic_roots_in_ab, quadratic_roots};

struct NullConsumer;

impl PathConsumer for NullConsumer {
    fn line_to(&mut self, x: f64, y: f64) {
        black_box((x, y));
    }
    fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        black_box((cx, cy, x, y));
    }
    fn curve_to(&mut self, cx1: f64, cy1: f64, cx2: f64, cy2: f64, x: f64, y: f64) {
        black_box((cx1, cy1, cx2, cy2, x, y));
    }
}

fn bench_roots(c: &mut Criterion) {
    c.bench_function("quadratic_roots", |b| {
        let mut zeroes = [0.0; 2];
        b.iter(|| {
            quadratic_roots(
                black_box(1.0),
                black_box(-3.0),
                black_box(2.0),
                &mut zeroes,
                0,
            )
        });
    });

    c.bench_function("cubic_roots_in_ab", |b| {
        let mut pts = [0.0; 3];
        b.iter(|| {
            cubic_roots_in_ab(
                black_box(1.0),
                black_box(-6.0),
                black_box(11.0),
                black_box(-6.0),
                &mut pts,
                0,
                0.0,
                4.0,
            )
        });
    });
}

fn bench_subdivision(c: &mut Criterion) {
    c.bench_function("subdivide_cubic_at", |b| {
        let mut buf = [0.0; 24];
        b.iter(|| {
            buf[..8].copy_from_slice(&[0.0, 0.0, 1.0, 2.0, 3.0, 2.0, 4.0, 0.0]);
            subdivide_cubic_at(black_box(0.37), &mut buf, 0, Some(8), Some(16));
        });
    });

    c.bench_function("subdivide_quad_at", |b| {
        let mut buf = [0.0; 18];
        b.iter(|| {
            buf[..6].copy_from_slice(&[0.0, 0.0, 2.0, 3.0, 4.0, 0.0]);
            subdivide_quad_at(black_box(0.37), &mut buf, 0, Some(6), Some(12));
        });
    });
}

fn bench_curve_stack(c: &mut Criterion) {
    c.bench_function("curve_stack_push_pull_256", |b| {
        let curves = ArrayCache::new(2048);
        let types = ArrayCache::new(512);
        let mut stack = CurveStack::new(&curves, &types);
        let mut out = NullConsumer;
        b.iter(|| {
            for i in 0..256 {
                let v = i as f64;
                stack.push_cubic(v, v, v + 1.0, v + 1.0, v + 2.0, v + 2.0);
            }
            stack.pull_all(&mut out);
        });
    });
}

criterion_group!(benches, bench_roots, bench_subdivision, bench_curve_stack);
criterion_main!(benches);
