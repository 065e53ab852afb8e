//! Benchmarks for triangulation construction and traversal.

use criterion::{criterion_group, criterion_main, Criterion};
use hemline::prelude::*;
use nalgebra::Point2;

fn grid_input(n: usize) -> (Vec<Point2<f64>>, Vec<[usize; 3]>) {
    let mut points = Vec::with_capacity((n + 1) * (n + 1));
    let mut tris = Vec::with_capacity(n * n * 2);

    for j in 0..=n {
        for i in 0..=n {
            points.push(Point2::new(i as f64, j as f64));
        }
    }

    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;

            tris.push([v00, v10, v11]);
            tris.push([v00, v11, v01]);
        }
    }

    (points, tris)
}

fn bench_construction(c: &mut Criterion) {
    let (points, tris) = grid_input(10);
    c.bench_function("build_grid_10x10", |b| {
        b.iter(|| {
            let t: Triangulation = build_from_triangles(&points, &tris).unwrap();
            t
        });
    });
}

fn bench_traversal(c: &mut Criterion) {
    let (points, tris) = grid_input(50);
    let t: Triangulation = build_from_triangles(&points, &tris).unwrap();

    c.bench_function("vertex_fans_all", |b| {
        b.iter(|| {
            let mut count = 0;
            for v in t.vertex_ids() {
                count += t.vertex_fan(v).count();
            }
            count
        });
    });

    c.bench_function("incident_faces_all", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for f in t.face_ids() {
                let tri = t.incident_face(t.face(f).halfedge);
                acc += tri[0].index();
            }
            acc
        });
    });
}

criterion_group!(benches, bench_construction, bench_traversal);
criterion_main!(benches);
