// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lineage basics.
//!
//! Build a small division tree, lay it out, index it, and print the rows.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p lineage_demos --example lineage_basics`

use lineage_graph::Graph;
use lineage_layout::{LayoutError, LineageLayout, RootOrder, TimeIndex, collect_roots};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // R divides into A and B; A divides into C and D.
    let mut graph = Graph::new();
    let r = graph.add_vertex().init("R", 0, false);
    let a = graph.add_vertex().init("A", 1, false);
    let b = graph.add_vertex().init("B", 1, false);
    let c = graph.add_vertex().init("C", 2, false);
    let d = graph.add_vertex().init("D", 2, true);
    for (s, t) in [(r, a), (r, b), (a, c), (a, d)] {
        graph.add_edge(s, t).unwrap();
    }

    let roots = collect_roots(&graph, RootOrder::ByLabel);
    let mut layout = LineageLayout::new();
    let stats = layout.layout_x(&mut graph, &roots).unwrap();
    tracing::info!(generation = layout.generation(), "first layout pass");
    println!(
        "laid out {} vertices, {} leaves, width {}",
        stats.vertices, stats.leaves, stats.width
    );

    let mut index = TimeIndex::new();
    index.build(&graph, &roots).unwrap();
    for row in index.rows() {
        let names: Vec<String> = row
            .entries
            .iter()
            .map(|e| {
                let mark = if graph.is_selected(e.vertex) { "*" } else { "" };
                format!("{}{}@{}", graph.label(e.vertex).unwrap_or("?"), mark, e.x)
            })
            .collect();
        println!("t={}: {}", row.timepoint, names.join("  "));
    }
    println!("bounds: {:?}", index.bounds());

    // Treat A's subtree as inactive: A becomes a ghost leaf.
    let stats = layout
        .layout_x_with(&mut graph, &roots, |v| v != a)
        .unwrap();
    println!(
        "with A collapsed: {} ghosts, R at {:?}",
        stats.ghosts,
        graph.layout_x(r)
    );

    // An edge back in time is rejected and leaves the layout untouched.
    let late = graph.add_vertex().init("late", 5, false);
    graph.add_edge(late, b).unwrap();
    let before = graph.layout_x(b);
    let roots = collect_roots(&graph, RootOrder::BySlot);
    match layout.layout_x(&mut graph, &roots) {
        Err(LayoutError::NonIncreasingTime { .. }) => {
            println!("rejected; B still at {before:?}");
        }
        other => println!("unexpected: {other:?}"),
    }
}
