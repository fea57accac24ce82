use std::hint::black_box;

use aruco_solids_core::Cuboid;
use aruco_solids_mesh::Solid;
use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Vector3;

/// Checkerboard of `n x n` unit cells standing on a plate, like a marker.
fn checker_plate(n: usize) -> (Vec<Cuboid>, Cuboid) {
    let mut cells = Vec::new();
    for row in 0..n {
        for col in 0..n {
            if (row + col) % 2 == 0 {
                let t = Vector3::new(col as f64, row as f64, 2.0);
                cells.push(Cuboid::extrude_rect(1.0, 1.0, -0.4, t).expect("cell"));
            }
        }
    }
    let side = n as f64 + 2.0;
    let mid = (n as f64 - 1.0) / 2.0;
    let plate =
        Cuboid::extrude_rect(side, side, 1.8, Vector3::new(mid, mid, 0.0)).expect("plate");
    (cells, plate)
}

fn bench_cut(c: &mut Criterion) {
    for n in [6usize, 9] {
        let (cells, plate) = checker_plate(n);
        c.bench_function(&format!("union_and_cut_{n}x{n}"), |b| {
            b.iter(|| {
                let black = Solid::union_all(cells.iter().map(Solid::cuboid));
                let white = Solid::rounded_slab(&plate, 1.0, 8).difference(&black);
                black_box((black.triangle_count(), white.triangle_count()))
            })
        });
    }
}

criterion_group!(benches, bench_cut);
criterion_main!(benches);
