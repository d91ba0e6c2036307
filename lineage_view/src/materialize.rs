// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport cropping: from a laid-out graph to one frame of screen entities.

use core::mem;

use kurbo::Rect;
use lineage_graph::{Graph, VertexId};
use lineage_layout::{Entry, TimeIndex, binary_search};

use crate::{ScreenEdge, ScreenEntities, ScreenRange, ScreenVertex, Transition, ViewTransform};

/// Collapsing of crowded rows into [`ScreenRange`]s.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DenseRanges {
    /// Neighbours closer than this many pixels belong to the same run.
    pub min_screen_distance: f64,
    /// Runs with fewer vertices are materialized individually.
    pub min_run: usize,
}

impl Default for DenseRanges {
    fn default() -> Self {
        Self {
            min_screen_distance: 2.0,
            min_run: 3,
        }
    }
}

/// Tuning for [`Materializer::crop_and_scale`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MaterializeConfig {
    /// Extra time points above and below the viewport, so edges into the visible
    /// area keep their off-screen endpoint.
    pub row_slack: f64,
    /// Extra vertices left and right of the visible columns on each row.
    pub column_slack: usize,
    /// Collapse crowded rows; `None` materializes every vertex.
    pub dense: Option<DenseRanges>,
}

impl Default for MaterializeConfig {
    fn default() -> Self {
        Self {
            row_slack: 1.0,
            column_slack: 1,
            dense: None,
        }
    }
}

/// Produces [`ScreenEntities`] for a viewport into two alternating buffers.
///
/// The buffer returned by [`crop_and_scale`](Self::crop_and_scale) stays valid until
/// the next call; the frame before it is kept in [`previous`](Self::previous) for
/// transition animation. The materializer also owns a per-vertex cache of screen
/// indices; it is overwritten every frame and checked against the stored vertex id
/// before use, so it never needs clearing.
#[derive(Debug, Default)]
pub struct Materializer {
    config: MaterializeConfig,
    current: ScreenEntities,
    previous: ScreenEntities,
    screen_index: Vec<Option<usize>>,
}

impl Materializer {
    /// Create a materializer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a materializer with `config`.
    pub fn with_config(config: MaterializeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &MaterializeConfig {
        &self.config
    }

    /// Replace the configuration; applies from the next frame.
    pub fn set_config(&mut self, config: MaterializeConfig) {
        self.config = config;
    }

    /// The most recently produced frame.
    pub fn current(&self) -> &ScreenEntities {
        &self.current
    }

    /// The frame produced before [`current`](Self::current).
    pub fn previous(&self) -> &ScreenEntities {
        &self.previous
    }

    /// Materialize the part of `graph` visible through `view`.
    ///
    /// Rows are visited in ascending time order, so when a vertex is emitted all of
    /// its in-view parents already are and each incoming edge resolves through the
    /// screen index cache. A view that misses the index bounds entirely yields an
    /// empty frame; otherwise the configured slack is added around it.
    ///
    /// `index` must have been built from `graph` after its last layout. Entries whose
    /// vertex has since been removed are skipped.
    pub fn crop_and_scale(
        &mut self,
        graph: &Graph,
        index: &TimeIndex,
        view: &ViewTransform,
    ) -> &ScreenEntities {
        let _span = tracing::trace_span!("crop_and_scale").entered();

        mem::swap(&mut self.current, &mut self.previous);
        self.current.clear();
        self.current.transform = Some(*view);
        if self.screen_index.len() < graph.vertex_slot_capacity() {
            self.screen_index.resize(graph.vertex_slot_capacity(), None);
        }

        let visible = view.visible();
        let Some(bounds) = index.bounds() else {
            return &self.current;
        };
        if !overlaps(visible, bounds) {
            tracing::trace!("viewport outside of the laid-out graph");
            return &self.current;
        }

        let x_scale = view.x_scale();
        let y_scale = view.y_scale();
        let config = self.config;

        for row in index.rows_between(
            visible.y0 - config.row_slack,
            visible.y1 + config.row_slack,
        ) {
            let entries = row.entries;
            let first = entries.partition_point(|e| e.x < visible.x0);
            let last_excl = binary_search(entries, visible.x1).map_or(0, |i| i + 1);
            let lo = first.saturating_sub(config.column_slack);
            let hi = (last_excl + config.column_slack).min(entries.len());
            if lo >= hi {
                continue;
            }

            let t = f64::from(row.timepoint);
            let y = (t - visible.y0) * y_scale;
            let prev_y = (t - 1.0 - visible.y0) * y_scale;
            let row_start = self.current.vertices.len();
            let mut row_dist = y_scale;
            let mut prev_x = f64::NEG_INFINITY;

            let mut i = lo;
            while i < hi {
                if let Some(dense) = config.dense {
                    let end = dense_run_end(entries, i, hi, x_scale, dense.min_screen_distance);
                    if end - i >= dense.min_run.max(2) {
                        let x0 = (entries[i].x - visible.x0) * x_scale;
                        let x1 = (entries[end - 1].x - visible.x0) * x_scale;
                        self.current.ranges.push(ScreenRange {
                            rect: Rect::new(x0, prev_y, x1, y),
                        });
                        row_dist = 0.0;
                        prev_x = x1;
                        i = end;
                        continue;
                    }
                }

                let entry = entries[i];
                i += 1;
                let x = (entry.x - visible.x0) * x_scale;
                if self.push_vertex(graph, entry.vertex, x, y) {
                    row_dist = row_dist.min(x - prev_x);
                    prev_x = x;
                }
            }

            for v in &mut self.current.vertices[row_start..] {
                v.vertex_dist = row_dist;
            }
        }

        tracing::trace!(
            vertices = self.current.vertices.len(),
            edges = self.current.edges.len(),
            ranges = self.current.ranges.len(),
            "materialized frame"
        );
        &self.current
    }

    /// Emit `vertex` and its incoming edges whose source is already on screen.
    /// Returns `false` if the vertex is no longer in the graph.
    fn push_vertex(&mut self, graph: &Graph, vertex: VertexId, x: f64, y: f64) -> bool {
        let Some(label) = graph.shared_label(vertex) else {
            return false;
        };
        let index = self.current.vertices.len();
        self.current.vertices.push(ScreenVertex {
            vertex,
            x,
            y,
            label: label.clone(),
            selected: graph.is_selected(vertex),
            ghost: graph.is_ghost(vertex),
            vertex_dist: 0.0,
            transition: Transition::Stable,
            transition_ratio: 0.0,
        });
        if let Some(slot) = self.screen_index.get_mut(vertex.slot()) {
            *slot = Some(index);
        }

        for &edge in graph.incoming(vertex).unwrap_or_default() {
            let Some(source) = graph.source(edge) else {
                continue;
            };
            let Some(source_index) = self.screen_index.get(source.slot()).copied().flatten()
            else {
                continue;
            };
            // The cache is never cleared; only trust it if the slot still names `source`.
            let cached = self
                .current
                .vertices
                .get(source_index)
                .is_some_and(|sv| sv.vertex == source);
            if cached {
                self.current.edges.push(ScreenEdge {
                    edge,
                    source: source_index,
                    target: index,
                    selected: graph.is_edge_selected(edge),
                    transition: Transition::Stable,
                    transition_ratio: 0.0,
                });
            }
        }
        true
    }
}

/// Inclusive overlap test; a single-vertex index has zero-area bounds.
fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && a.x1 >= b.x0 && a.y0 <= b.y1 && a.y1 >= b.y0
}

/// End (exclusive) of the run starting at `start` in which consecutive vertices are
/// closer than `min_distance` pixels.
fn dense_run_end(
    entries: &[Entry],
    start: usize,
    end: usize,
    x_scale: f64,
    min_distance: f64,
) -> usize {
    let mut j = start;
    while j + 1 < end && (entries[j + 1].x - entries[j].x) * x_scale < min_distance {
        j += 1;
    }
    j + 1
}
