// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Midpoint lineage layout.

use lineage_graph::{Graph, GraphError, VertexId};

use crate::error::LayoutError;

/// Summary of one layout run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutStats {
    /// Number of vertices that received a coordinate.
    pub vertices: usize,
    /// Number of vertices laid out as leaves (ghosts included).
    pub leaves: usize,
    /// Number of vertices marked as ghosts.
    pub ghosts: usize,
    /// Horizontal extent: the coordinate the next leaf would have received.
    pub width: f64,
}

/// A vertex whose coordinate is final, in completion order.
#[derive(Clone, Copy, Debug)]
struct Placed {
    vertex: VertexId,
    x: f64,
    ghost: bool,
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    vertex: VertexId,
    descend: bool,
    next_edge: usize,
    children: usize,
    first: f64,
    last: f64,
}

impl Frame {
    fn new(vertex: VertexId, descend: bool) -> Self {
        Self {
            vertex,
            descend,
            next_edge: 0,
            children: 0,
            first: 0.0,
            last: 0.0,
        }
    }
}

/// Assigns a horizontal layout coordinate to every vertex of a lineage forest.
///
/// The vertical coordinate is the vertex's time point. Starting from each root in
/// turn, the layout descends depth first along outgoing edges in insertion order:
///
/// - leaves get `0, 1, 2, ...` in visiting order;
/// - a vertex with laid-out children sits midway between its first and last child
///   (exactly on the child if there is only one);
/// - a vertex reachable through several parents is laid out once, under the first
///   parent that reaches it;
/// - inactive vertices become ghosts: they are flagged and laid out as leaves.
///
/// This places parents between their children but does not prevent overlap with
/// unrelated subtrees in strongly unbalanced trees.
///
/// The traversal uses an explicit stack, so arbitrarily deep lineages are fine.
/// Coordinates are computed into scratch storage and written to the graph only when
/// the whole forest was laid out without error.
#[derive(Debug, Default)]
pub struct LineageLayout {
    generation: u64,
    visited: Vec<u64>,
    stack: Vec<Frame>,
    placed: Vec<Placed>,
}

impl LineageLayout {
    /// Create a layout with empty scratch storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of layout runs started so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Vertices laid out by the last successful run, children before parents.
    pub fn visit_order(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.placed.iter().map(|p| p.vertex)
    }

    /// Lay out every vertex reachable from `roots`, taking roots left to right.
    pub fn layout_x(
        &mut self,
        graph: &mut Graph,
        roots: &[VertexId],
    ) -> Result<LayoutStats, LayoutError> {
        self.layout_x_with(graph, roots, |_| true)
    }

    /// Like [`LineageLayout::layout_x`], but vertices for which `is_active` returns
    /// `false` are flagged as ghosts and treated as leaves.
    pub fn layout_x_with(
        &mut self,
        graph: &mut Graph,
        roots: &[VertexId],
        is_active: impl FnMut(VertexId) -> bool,
    ) -> Result<LayoutStats, LayoutError> {
        match self.compute(graph, roots, is_active) {
            Ok(stats) => {
                for p in &self.placed {
                    graph.set_layout_x(p.vertex, p.x)?;
                    graph.set_ghost(p.vertex, p.ghost)?;
                }
                tracing::debug!(
                    generation = self.generation,
                    vertices = stats.vertices,
                    leaves = stats.leaves,
                    ghosts = stats.ghosts,
                    width = stats.width,
                    "lineage layout done"
                );
                Ok(stats)
            }
            Err(err) => {
                self.placed.clear();
                tracing::warn!(%err, "lineage layout rejected graph");
                Err(err)
            }
        }
    }

    fn compute(
        &mut self,
        graph: &Graph,
        roots: &[VertexId],
        mut is_active: impl FnMut(VertexId) -> bool,
    ) -> Result<LayoutStats, LayoutError> {
        self.generation += 1;
        let stamp = self.generation;
        self.visited.resize(graph.vertex_slot_capacity(), 0);
        self.stack.clear();
        self.placed.clear();

        if let Some(stale) = roots.iter().find(|r| !graph.is_alive(**r)) {
            return Err(GraphError::StaleVertex(*stale).into());
        }

        let mut rightmost = 0.0_f64;
        let mut stats = LayoutStats::default();

        for &root in roots {
            if self.visited[root.slot()] == stamp {
                continue;
            }
            self.visited[root.slot()] = stamp;
            self.stack.push(Frame::new(root, is_active(root)));

            while let Some(top) = self.stack.last_mut() {
                let vertex = top.vertex;
                let outgoing = graph
                    .outgoing(vertex)
                    .ok_or(GraphError::StaleVertex(vertex))?;

                if top.descend && top.next_edge < outgoing.len() {
                    let edge = outgoing[top.next_edge];
                    top.next_edge += 1;
                    let child = graph.target(edge).ok_or(GraphError::StaleEdge(edge))?;
                    let source_timepoint = graph
                        .timepoint(vertex)
                        .ok_or(GraphError::StaleVertex(vertex))?;
                    let target_timepoint = graph
                        .timepoint(child)
                        .ok_or(GraphError::StaleVertex(child))?;
                    if target_timepoint <= source_timepoint {
                        return Err(LayoutError::NonIncreasingTime {
                            edge,
                            source_timepoint,
                            target_timepoint,
                        });
                    }
                    if self.visited[child.slot()] == stamp {
                        continue;
                    }
                    self.visited[child.slot()] = stamp;
                    let descend = is_active(child);
                    self.stack.push(Frame::new(child, descend));
                    continue;
                }

                let frame = *top;
                self.stack.pop();
                let x = match frame.children {
                    0 => {
                        let x = rightmost;
                        rightmost += 1.0;
                        stats.leaves += 1;
                        x
                    }
                    1 => frame.first,
                    _ => (frame.first + frame.last) / 2.0,
                };
                let ghost = !frame.descend;
                if ghost {
                    stats.ghosts += 1;
                }
                self.placed.push(Placed {
                    vertex: frame.vertex,
                    x,
                    ghost,
                });
                if let Some(parent) = self.stack.last_mut() {
                    parent.children += 1;
                    if parent.children == 1 {
                        parent.first = x;
                    } else {
                        parent.last = x;
                    }
                }
            }
        }

        stats.vertices = self.placed.len();
        stats.width = rightmost;
        Ok(stats)
    }
}
