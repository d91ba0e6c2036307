// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport materialization.
//!
//! Lay out a few tracked cells, then pan and zoom a view over them, materializing a
//! frame after each gesture and picking the vertex under a fixed pointer.
//!
//! Run:
//! - `RUST_LOG=lineage_view=trace cargo run -p lineage_demos --example lineage_viewport`

use kurbo::{Point, Vec2};
use lineage_graph::{Graph, VertexId};
use lineage_layout::{LineageLayout, RootOrder, TimeIndex, collect_roots};
use lineage_view::{
    DenseRanges, MaterializeConfig, Materializer, ViewTransform, closest_edge, closest_vertex,
};
use tracing_subscriber::EnvFilter;

/// Three cells over 40 frames; each divides every 12 frames.
fn tracks() -> Graph {
    let mut graph = Graph::new();
    let mut live: Vec<VertexId> = (0..3)
        .map(|i| graph.add_vertex().init(format!("cell{i}"), 0, false))
        .collect();
    for t in 1..40 {
        let mut next = Vec::new();
        for parent in live {
            let n = if t % 12 == 0 { 2 } else { 1 };
            for _ in 0..n {
                let child = graph.add_vertex().init(format!("t{t}"), t, false);
                graph.add_edge(parent, child).unwrap();
                next.push(child);
            }
        }
        live = next;
    }
    graph
}

fn report(
    label: &str,
    graph: &Graph,
    index: &TimeIndex,
    m: &mut Materializer,
    view: &ViewTransform,
) {
    let frame = m.crop_and_scale(graph, index, view);
    let pointer = Point::new(400.0, 300.0);
    let vertex = closest_vertex(index, view, pointer, 12.0).and_then(|v| graph.label(v));
    let edge = closest_edge(frame, pointer, 12.0);
    println!(
        "{label:>10}: {:4} vertices {:4} edges {:3} ranges | under pointer: {:?} / {:?}",
        frame.vertices().len(),
        frame.edges().len(),
        frame.ranges().len(),
        vertex,
        edge,
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut graph = tracks();
    let roots = collect_roots(&graph, RootOrder::BySlot);
    LineageLayout::new().layout_x(&mut graph, &roots).unwrap();
    let mut index = TimeIndex::new();
    index.build(&graph, &roots).unwrap();
    let bounds = index.bounds().unwrap();
    println!("layout bounds: {bounds:?}");

    let mut m = Materializer::new();
    let home = ViewTransform::new(bounds, 800, 600);
    report("home", &graph, &index, &mut m, &home);

    let mut zoomed = home;
    zoomed.scale(0.25, Point::new(400.0, 300.0));
    report("zoom in", &graph, &index, &mut m, &zoomed);

    let mut panned = zoomed;
    panned.pan(Vec2::new(-200.0, 150.0), &zoomed);
    report("pan", &graph, &index, &mut m, &panned);

    let mut away = home;
    away.pan(Vec2::new(5000.0, 0.0), &home);
    report("away", &graph, &index, &mut m, &away);

    // Squeeze everything into 40 px to show dense ranges.
    m.set_config(MaterializeConfig {
        dense: Some(DenseRanges::default()),
        ..MaterializeConfig::default()
    });
    let mut tiny = home;
    tiny.set_screen_size(40, 600);
    report("dense", &graph, &index, &mut m, &tiny);
}
