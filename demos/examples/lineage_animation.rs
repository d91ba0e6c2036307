// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared transform and animated transitions.
//!
//! An input thread publishes zoom steps through a `SharedTransform`; the main thread
//! materializes a frame whenever the version changes and blends it with the previous
//! one.
//!
//! Run:
//! - `cargo run -p lineage_demos --example lineage_animation`

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use kurbo::Point;
use lineage_graph::Graph;
use lineage_layout::{LineageLayout, RootOrder, TimeIndex, collect_roots};
use lineage_view::{
    Materializer, ScreenEntities, ScreenEntitiesInterpolator, SharedTransform, Transition,
    ViewTransform,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut graph = Graph::new();
    let root = graph.add_vertex().init("root", 0, false);
    let mut frontier = vec![root];
    for t in 1..6 {
        let mut next = Vec::new();
        for parent in frontier {
            for side in ["a", "b"] {
                let child = graph.add_vertex().init(format!("{side}{t}"), t, false);
                graph.add_edge(parent, child).unwrap();
                next.push(child);
            }
        }
        frontier = next;
    }
    let roots = collect_roots(&graph, RootOrder::BySlot);
    LineageLayout::new().layout_x(&mut graph, &roots).unwrap();
    let mut index = TimeIndex::new();
    index.build(&graph, &roots).unwrap();

    let Some(bounds) = index.bounds() else {
        return;
    };
    let shared = Arc::new(SharedTransform::new(ViewTransform::new(bounds, 640, 480)));

    let input = {
        let shared = Arc::clone(&shared);
        thread::spawn(move || {
            for _ in 0..3 {
                shared.update(|t| t.scale(0.5, Point::new(320.0, 400.0)));
                thread::sleep(Duration::from_millis(20));
            }
        })
    };

    let mut m = Materializer::new();
    let mut seen = u64::MAX;
    let mut frames = 0;
    while frames < 4 {
        let Some((version, view)) = shared.load_if_newer(seen) else {
            thread::sleep(Duration::from_millis(5));
            continue;
        };
        seen = version;
        frames += 1;
        m.crop_and_scale(&graph, &index, &view);

        let mut interp = ScreenEntitiesInterpolator::new(m.previous(), m.current());
        let mut out = ScreenEntities::new();
        for step in 0..=4 {
            interp.interpolate(f64::from(step) / 4.0, &mut out);
            let appearing = out
                .vertices()
                .iter()
                .filter(|v| v.transition == Transition::Appear)
                .count();
            let leaving = out
                .vertices()
                .iter()
                .filter(|v| v.transition == Transition::Disappear)
                .count();
            println!(
                "v{version} step {step}: {} vertices (+{appearing} -{leaving}), {} edges",
                out.vertices().len(),
                out.edges().len()
            );
        }
    }
    let _ = input.join();
}
