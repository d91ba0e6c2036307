// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picking vertices and edges under a screen position.

use kurbo::Point;
use lineage_graph::{EdgeId, VertexId};
use lineage_layout::{TimeIndex, binary_search};

use crate::{ScreenEntities, ViewTransform};

/// The vertex nearest to `point` (screen pixels) within `tolerance` pixels.
///
/// Only rows within `tolerance` of the point are examined, and on each of them only
/// the two vertices bracketing the point's layout X, so the cost is independent of
/// the number of vertices.
pub fn closest_vertex(
    index: &TimeIndex,
    view: &ViewTransform,
    point: Point,
    tolerance: f64,
) -> Option<VertexId> {
    let layout = view.screen_to_layout(point);
    let x_scale = view.x_scale();
    let y_scale = view.y_scale();
    let reach = tolerance / y_scale;
    let max_dist_sq = tolerance * tolerance;

    let mut best: Option<(f64, VertexId)> = None;
    for row in index.rows_between(layout.y - reach, layout.y + reach) {
        let dy = (f64::from(row.timepoint) - layout.y) * y_scale;
        let start = binary_search(row.entries, layout.x).unwrap_or(0);
        let end = (start + 2).min(row.entries.len());
        for entry in &row.entries[start..end] {
            let dx = (entry.x - layout.x) * x_scale;
            let d = dx * dx + dy * dy;
            if d <= max_dist_sq && best.is_none_or(|(best_d, _)| d < best_d) {
                best = Some((d, entry.vertex));
            }
        }
    }
    best.map(|(_, v)| v)
}

/// The edge of `entities` nearest to `point` (screen pixels) within `tolerance`
/// pixels, measured to the segment between its endpoints.
pub fn closest_edge(entities: &ScreenEntities, point: Point, tolerance: f64) -> Option<EdgeId> {
    let vertices = entities.vertices();
    let max_dist_sq = tolerance * tolerance;
    let mut best: Option<(f64, EdgeId)> = None;
    for edge in entities.edges() {
        let (Some(a), Some(b)) = (vertices.get(edge.source), vertices.get(edge.target)) else {
            continue;
        };
        let d = segment_distance_sq(a.position(), b.position(), point);
        if d <= max_dist_sq && best.is_none_or(|(best_d, _)| d < best_d) {
            best = Some((d, edge.edge));
        }
    }
    best.map(|(_, e)| e)
}

fn segment_distance_sq(a: Point, b: Point, p: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.hypot2();
    let t = if len_sq > 0.0 {
        ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (p - (a + ab * t)).hypot2()
}
