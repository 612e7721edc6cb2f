// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for snap point zone negotiation and evaluation.

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use understory_snap::{SnapPoint, SnapPointId, SnapPoints};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn next_f64(&mut self, upper: f64) -> f64 {
        f64::from(self.next_u32()) / f64::from(u32::MAX) * upper
    }
}

/// Irregular points at random offsets, with a repeated section in the middle.
fn build_points(n: usize, seed: u64) -> (SnapPoints, Vec<SnapPointId>) {
    let extent = n as f64 * 100.0;
    let section = (extent * 0.4, extent * 0.6);
    let mut rng = Lcg::new(seed);
    let mut points = SnapPoints::new();
    let mut ids = Vec::with_capacity(n + 1);
    ids.push(
        points
            .insert(SnapPoint::repeated(section.0, 50.0, section.0, section.1).unwrap())
            .unwrap(),
    );
    while ids.len() <= n {
        let value = rng.next_f64(extent);
        if value > section.0 && value < section.1 {
            continue;
        }
        ids.push(points.insert(SnapPoint::irregular(value)).unwrap());
    }
    (points, ids)
}

fn bench_snap(c: &mut Criterion) {
    let mut group = c.benchmark_group("snap");

    for n in [16_usize, 128, 1_024] {
        let (points, ids) = build_points(n, 0x5eed);
        let extent = n as f64 * 100.0;
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("insert_all", n), &n, |b, &n| {
            b.iter(|| black_box(build_points(n, 0x5eed)));
        });

        group.bench_with_input(
            BenchmarkId::new("set_ignored_value", n),
            &points,
            |b, points| {
                b.iter_batched(
                    || points.clone(),
                    |mut points| {
                        for &id in ids.iter().step_by(8) {
                            let value = points.point(id).map_or(0.0, |p| p.sort_key().primary);
                            points.set_ignored_value(id, value).unwrap();
                        }
                        black_box(points);
                    },
                    BatchSize::LargeInput,
                );
            },
        );

        group.bench_with_input(BenchmarkId::new("evaluate", n), &points, |b, points| {
            let mut rng = Lcg::new(7);
            let probes: Vec<f64> = (0..1_024).map(|_| rng.next_f64(extent)).collect();
            b.iter(|| {
                let sum: f64 = probes.iter().map(|&v| points.evaluate(v)).sum();
                black_box(sum);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_snap);
criterion_main!(benches);
