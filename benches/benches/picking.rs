// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use overstory_constellation::Scene;
use understory_benches::synthetic_tree;
use understory_depth::{VisualState, resolve_all};
use understory_depth_hit::{HitParams, hit_test};
use understory_view3d::Camera3D;

const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1280.0, 800.0);

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("picking/hit_test");
    let params = HitParams::default();

    for containers in [4usize, 16, 64] {
        let tree = synthetic_tree(containers, 8, 8);
        let mut state = VisualState::new();
        for i in 0..containers {
            state.expand(&format!("c{i}"));
        }
        let layers = resolve_all(&tree, &state);
        let mut camera = Camera3D::new(VIEWPORT);
        camera.rotate_by(0.4, -0.3);
        let probes: Vec<Point> = (0..64)
            .map(|i| Point::new((i % 8) as f64 * 160.0, (i / 8) as f64 * 100.0))
            .collect();
        group.throughput(Throughput::Elements(probes.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(tree.len()), &probes, |b, probes| {
            b.iter(|| {
                for &probe in probes {
                    black_box(hit_test(&tree, &layers, &camera, probe, &params));
                }
            });
        });
    }

    group.finish();
}

fn bench_visible_nodes(c: &mut Criterion) {
    let mut group = c.benchmark_group("picking/visible_nodes");

    for containers in [16usize, 64] {
        let mut scene = Scene::new(synthetic_tree(containers, 8, 8), VIEWPORT);
        for i in 0..containers {
            scene.expand(&format!("c{i}"));
            scene.inline_expand(&format!("c{i}/f0"));
        }
        scene.rotate(0.2, 0.1);
        group.throughput(Throughput::Elements(scene.tree().len() as u64));

        group.bench_function(BenchmarkId::from_parameter(scene.tree().len()), |b| {
            b.iter(|| black_box(scene.visible_nodes()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hit_test, bench_visible_nodes);
criterion_main!(benches);
