// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Vec2};
use lineage_benches::{Rng, binary_lineage, tracked_lineage};
use lineage_graph::Graph;
use lineage_layout::{LineageLayout, RootOrder, TimeIndex, collect_roots};
use lineage_view::{
    DenseRanges, MaterializeConfig, Materializer, ScreenEntities, ScreenEntitiesInterpolator,
    ViewTransform, closest_vertex,
};

fn prepared(mut graph: Graph) -> (Graph, TimeIndex) {
    let roots = collect_roots(&graph, RootOrder::BySlot);
    let _ = LineageLayout::new().layout_x(&mut graph, &roots);
    let mut index = TimeIndex::new();
    let _ = index.build(&graph, &roots);
    (graph, index)
}

fn bench_crop_and_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("crop_and_scale");
    let (graph, index) = prepared(binary_lineage(17).0);
    let width = index.global_max_x().unwrap_or(1.0);

    // A 1920x1080 window showing 200 leaves of the last 20 generations.
    let zoomed = ViewTransform::from_bounds(width / 2.0, width / 2.0 + 200.0, 0.0, 20.0, 1920, 1080);
    group.bench_function("binary17_zoomed", |b| {
        let mut m = Materializer::new();
        b.iter(|| black_box(m.crop_and_scale(&graph, &index, &zoomed).vertices().len()));
    });

    // Every vertex in view, with and without dense ranges.
    let overview = ViewTransform::from_bounds(0.0, width, 0.0, 17.0, 1920, 1080);
    group.bench_function("binary17_overview", |b| {
        let mut m = Materializer::new();
        b.iter(|| black_box(m.crop_and_scale(&graph, &index, &overview).vertices().len()));
    });
    group.bench_function("binary17_overview_dense", |b| {
        let mut m = Materializer::with_config(MaterializeConfig {
            dense: Some(DenseRanges::default()),
            ..MaterializeConfig::default()
        });
        b.iter(|| black_box(m.crop_and_scale(&graph, &index, &overview).ranges().len()));
    });

    // A pan gesture over a tracking dataset.
    let (graph, index) = prepared(tracked_lineage(2000, 400, 0.005, 0xBADC_F00D_1234_5678));
    let start = ViewTransform::from_bounds(0.0, 300.0, 0.0, 100.0, 1920, 1080);
    group.bench_function("tracked_pan", |b| {
        let mut m = Materializer::new();
        let mut step = 0_u32;
        b.iter(|| {
            step = (step + 1) % 100;
            let mut view = start;
            view.pan(Vec2::new(f64::from(step) * 20.0, f64::from(step) * 5.0), &start);
            black_box(m.crop_and_scale(&graph, &index, &view).edges().len());
        });
    });
    group.finish();
}

fn bench_hit(c: &mut Criterion) {
    let (_, index) = prepared(tracked_lineage(2000, 400, 0.005, 0xC1A5_7E55_9999_ABCD));
    let view = ViewTransform::from_bounds(0.0, 300.0, 0.0, 100.0, 1920, 1080);
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    let points: Vec<Point> = (0..1024)
        .map(|_| Point::new(rng.next_f64() * 1920.0, rng.next_f64() * 1080.0))
        .collect();
    c.bench_function("closest_vertex_1024", |b| {
        b.iter(|| {
            let hits = points
                .iter()
                .filter(|p| closest_vertex(&index, &view, **p, 8.0).is_some())
                .count();
            black_box(hits);
        });
    });
}

fn bench_interpolate(c: &mut Criterion) {
    let (graph, index) = prepared(binary_lineage(14).0);
    let width = index.global_max_x().unwrap_or(1.0);
    let wide = ViewTransform::from_bounds(0.0, width, 0.0, 14.0, 1920, 1080);
    let mut zoomed = wide;
    zoomed.scale(0.25, Point::new(960.0, 540.0));

    let mut m = Materializer::new();
    m.crop_and_scale(&graph, &index, &wide);
    m.crop_and_scale(&graph, &index, &zoomed);
    let mut interp = ScreenEntitiesInterpolator::new(m.previous(), m.current());
    let mut out = ScreenEntities::new();
    c.bench_function("interpolate_binary14_zoom", |b| {
        let mut ratio = 0.0;
        b.iter(|| {
            ratio = (ratio + 0.05) % 1.0;
            interp.interpolate(ratio, &mut out);
            black_box(out.vertices().len());
        });
    });
}

criterion_group!(benches, bench_crop_and_scale, bench_hit, bench_interpolate);
criterion_main!(benches);
