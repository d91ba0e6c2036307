// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synthetic lineages shared by the benchmarks.

use lineage_graph::{Graph, VertexId};

/// Deterministic xorshift generator.
#[derive(Clone, Debug)]
pub struct Rng(u64);

impl Rng {
    /// Seeded generator; `seed` must be non-zero.
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Next raw value.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1_u64 << 53) as f64)
    }
}

/// A complete binary division tree of `depth` generations, one time point per
/// generation. Returns the graph and its root.
pub fn binary_lineage(depth: u32) -> (Graph, VertexId) {
    let mut graph = Graph::with_capacity(1 << (depth + 1), 1 << (depth + 1));
    let root = graph.add_vertex().init("0", 0, false);
    let mut frontier = vec![root];
    for t in 1..=depth {
        let mut next = Vec::with_capacity(frontier.len() * 2);
        for parent in frontier {
            for _ in 0..2 {
                let child = graph.add_vertex().init(format!("{}", next.len()), t, false);
                let _ = graph.add_edge(parent, child);
                next.push(child);
            }
        }
        frontier = next;
    }
    (graph, root)
}

/// `tracks` independent cells over `frames` time points; each live cell divides with
/// probability `division_rate` per frame and otherwise continues as one vertex.
pub fn tracked_lineage(tracks: usize, frames: u32, division_rate: f64, seed: u64) -> Graph {
    let mut rng = Rng::new(seed);
    let mut graph = Graph::new();
    let mut live: Vec<VertexId> = (0..tracks)
        .map(|i| graph.add_vertex().init(format!("track{i}"), 0, false))
        .collect();
    for t in 1..frames {
        let mut next = Vec::with_capacity(live.len() + live.len() / 4);
        for parent in live {
            let children = if rng.next_f64() < division_rate { 2 } else { 1 };
            for _ in 0..children {
                let child = graph.add_vertex().init("", t, false);
                let _ = graph.add_edge(parent, child);
                next.push(child);
            }
        }
        live = next;
    }
    graph
}
