// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use lineage_benches::{binary_lineage, tracked_lineage};
use lineage_layout::{LineageLayout, RootOrder, TimeIndex, collect_roots};

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_x");
    for &depth in &[10_u32, 14, 17] {
        let (graph, root) = binary_lineage(depth);
        group.throughput(Throughput::Elements(graph.vertex_count() as u64));
        group.bench_function(format!("binary_depth{depth}"), |b| {
            b.iter_batched(
                || (graph.clone(), LineageLayout::new()),
                |(mut g, mut layout)| {
                    let stats = layout.layout_x(&mut g, &[root]);
                    black_box(stats.map(|s| s.width).unwrap_or_default());
                },
                BatchSize::LargeInput,
            );
        });
    }
    let graph = tracked_lineage(500, 200, 0.01, 0xCAFE_F00D_DEAD_BEEF);
    let roots = collect_roots(&graph, RootOrder::BySlot);
    group.throughput(Throughput::Elements(graph.vertex_count() as u64));
    group.bench_function("tracked_500x200", |b| {
        let mut layout = LineageLayout::new();
        b.iter_batched(
            || graph.clone(),
            |mut g| {
                let stats = layout.layout_x(&mut g, &roots);
                black_box(stats.map(|s| s.leaves).unwrap_or_default());
            },
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

fn bench_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_index");
    for &depth in &[10_u32, 14, 17] {
        let (mut graph, root) = binary_lineage(depth);
        let _ = LineageLayout::new().layout_x(&mut graph, &[root]);
        let mut index = TimeIndex::new();
        group.throughput(Throughput::Elements(graph.vertex_count() as u64));
        group.bench_function(format!("build_binary_depth{depth}"), |b| {
            b.iter(|| {
                let _ = index.build(&graph, &[root]);
                black_box(index.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout, bench_index);
criterion_main!(benches);
