// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animated transitions between two materialized frames.

use core::f64::consts::FRAC_PI_2;
use std::collections::HashMap;

use lineage_graph::{EdgeId, VertexId};

use crate::{ScreenEdge, ScreenEntities, ScreenVertex, Transition, ViewTransform};

/// Blends two frames, typically [`Materializer::previous`](crate::Materializer::previous)
/// and [`Materializer::current`](crate::Materializer::current).
///
/// Vertices present in both frames move; vertices only in `start` fade out, vertices
/// only in `end` fade in, and selection changes are reported as extra
/// [`Transition::Selecting`] / [`Transition::Deselecting`] entries. Edges and dense
/// ranges follow `end`.
#[derive(Debug)]
pub struct ScreenEntitiesInterpolator<'a> {
    start: &'a ScreenEntities,
    end: &'a ScreenEntities,
    start_vertices: HashMap<VertexId, usize>,
    end_vertices: HashMap<VertexId, usize>,
    start_edges: HashMap<EdgeId, usize>,
    // scratch: end vertex index -> output vertex index
    end_to_out: Vec<Option<usize>>,
}

impl<'a> ScreenEntitiesInterpolator<'a> {
    /// Prepare an interpolation from `start` to `end`.
    pub fn new(start: &'a ScreenEntities, end: &'a ScreenEntities) -> Self {
        let start_vertices = start
            .vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.transition != Transition::Disappear)
            .map(|(i, v)| (v.vertex, i))
            .collect();
        let end_vertices = end
            .vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (v.vertex, i))
            .collect();
        let start_edges = start
            .edges
            .iter()
            .enumerate()
            .map(|(i, e)| (e.edge, i))
            .collect();
        Self {
            start,
            end,
            start_vertices,
            end_vertices,
            start_edges,
            end_to_out: Vec::new(),
        }
    }

    /// Write the blend at `ratio` (`0` is `start`, `1` is `end`) into `out`.
    ///
    /// The ratio is eased so motion starts and stops smoothly.
    pub fn interpolate(&mut self, ratio: f64, out: &mut ScreenEntities) {
        let ratio = ratio.clamp(0.0, 1.0);
        let eased = (FRAC_PI_2 * (FRAC_PI_2 * ratio).sin()).sin();

        out.clear();
        self.end_to_out.clear();
        self.end_to_out.resize(self.end.vertices.len(), None);

        for v in &self.start.vertices {
            if v.transition == Transition::Disappear {
                continue;
            }
            match self.end_vertices.get(&v.vertex) {
                Some(&j) => {
                    self.end_to_out[j] = Some(out.vertices.len());
                    out.vertices.push(moving(v, &self.end.vertices[j], eased));
                }
                None => out.vertices.push(ScreenVertex {
                    transition: Transition::Disappear,
                    transition_ratio: ratio,
                    ..v.clone()
                }),
            }
        }

        for (j, v) in self.end.vertices.iter().enumerate() {
            let overlay = match self.start_vertices.get(&v.vertex) {
                None => ScreenVertex {
                    transition: Transition::Appear,
                    transition_ratio: ratio,
                    ..v.clone()
                },
                Some(&i) => {
                    let from = &self.start.vertices[i];
                    let transition = match (from.selected, v.selected) {
                        (false, true) => Transition::Selecting,
                        (true, false) => Transition::Deselecting,
                        _ => continue,
                    };
                    ScreenVertex {
                        transition,
                        transition_ratio: ratio,
                        ..moving(from, v, eased)
                    }
                }
            };
            // Selection overlays are drawn on top of the moving vertex and take over
            // its edges.
            self.end_to_out[j] = Some(out.vertices.len());
            out.vertices.push(overlay);
        }

        for e in &self.end.edges {
            let (Some(source), Some(target)) = (
                self.end_to_out.get(e.source).copied().flatten(),
                self.end_to_out.get(e.target).copied().flatten(),
            ) else {
                continue;
            };
            let transition = match self.start_edges.get(&e.edge) {
                None => Transition::Appear,
                Some(&i) => match (self.start.edges[i].selected, e.selected) {
                    (false, true) => Transition::Selecting,
                    (true, false) => Transition::Deselecting,
                    _ => Transition::Stable,
                },
            };
            out.edges.push(ScreenEdge {
                source,
                target,
                transition,
                transition_ratio: ratio,
                ..*e
            });
        }

        out.ranges.extend_from_slice(&self.end.ranges);
        out.transform = match (self.start.transform, self.end.transform) {
            (Some(a), Some(b)) => Some(ViewTransform::lerp(&a, &b, eased)),
            (a, b) => b.or(a),
        };
    }
}

fn moving(from: &ScreenVertex, to: &ScreenVertex, eased: f64) -> ScreenVertex {
    ScreenVertex {
        x: from.x + (to.x - from.x) * eased,
        y: from.y + (to.y - from.y) * eased,
        vertex_dist: from.vertex_dist + (to.vertex_dist - from.vertex_dist) * eased,
        transition: Transition::Stable,
        transition_ratio: 0.0,
        ..to.clone()
    }
}
