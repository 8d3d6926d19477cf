// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_benches::synthetic_tree;
use understory_depth::{VisualState, resolve_all};

fn bench_resolve_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("depth/resolve_all");

    for containers in [4usize, 16, 64] {
        let tree = synthetic_tree(containers, 8, 8);
        let mut state = VisualState::new();
        for i in 0..containers {
            if i % 2 == 0 {
                state.expand(&format!("c{i}"));
            }
            state.inline_expand(&format!("c{i}/f0"));
        }
        state.promote(&tree, "c0/f1");
        group.throughput(Throughput::Elements(tree.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(tree.len()), &tree, |b, tree| {
            b.iter(|| black_box(resolve_all(tree, &state)));
        });
    }

    group.finish();
}

fn bench_promote_demote(c: &mut Criterion) {
    let mut group = c.benchmark_group("depth/promote_demote");

    for folders in [8usize, 64] {
        let tree = synthetic_tree(4, folders, 16);
        let mut state = VisualState::new();
        state.inline_expand("c0");
        for f in 0..folders {
            state.inline_expand(&format!("c0/f{f}"));
        }

        group.bench_with_input(BenchmarkId::from_parameter(folders), &tree, |b, tree| {
            b.iter_batched(
                || state.clone(),
                |mut state| {
                    state.promote(tree, "c0");
                    state.demote();
                    black_box(state);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve_all, bench_promote_demote);
criterion_main!(benches);
