// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen-space entities produced by materialization.

use std::sync::Arc;

use kurbo::{Point, Rect};
use lineage_graph::{EdgeId, VertexId};

use crate::ViewTransform;

/// Animation state of a screen entity between two frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Present in both frames with unchanged selection.
    #[default]
    Stable,
    /// Only present in the newer frame.
    Appear,
    /// Only present in the older frame.
    Disappear,
    /// Becoming selected.
    Selecting,
    /// Becoming deselected.
    Deselecting,
}

/// A vertex placed on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenVertex {
    /// The graph vertex this was materialized from.
    pub vertex: VertexId,
    /// Screen X in pixels.
    pub x: f64,
    /// Screen Y in pixels.
    pub y: f64,
    /// Vertex label.
    pub label: Arc<str>,
    /// Whether the vertex is selected.
    pub selected: bool,
    /// Whether the vertex is a ghost (inactive subtree root).
    pub ghost: bool,
    /// Smallest screen distance between neighbouring vertices on this row, capped at
    /// the row spacing. Renderers use it to choose a glyph size.
    pub vertex_dist: f64,
    /// Animation state.
    pub transition: Transition,
    /// Progress of [`transition`](Self::transition), in `[0, 1]`.
    pub transition_ratio: f64,
}

impl ScreenVertex {
    /// Screen position.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// An edge whose endpoints were both materialized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenEdge {
    /// The graph edge.
    pub edge: EdgeId,
    /// Index of the source in [`ScreenEntities::vertices`].
    pub source: usize,
    /// Index of the target in [`ScreenEntities::vertices`].
    pub target: usize,
    /// Whether the edge is selected.
    pub selected: bool,
    /// Animation state.
    pub transition: Transition,
    /// Progress of [`transition`](Self::transition), in `[0, 1]`.
    pub transition_ratio: f64,
}

/// A horizontal run of vertices too dense to draw individually, spanning from the
/// previous row to this one in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRange {
    /// Extent in screen pixels.
    pub rect: Rect,
}

/// One frame worth of screen entities.
///
/// Edges refer to vertices by their index in [`vertices`](Self::vertices).
#[derive(Clone, Debug, Default)]
pub struct ScreenEntities {
    pub(crate) transform: Option<ViewTransform>,
    pub(crate) vertices: Vec<ScreenVertex>,
    pub(crate) edges: Vec<ScreenEdge>,
    pub(crate) ranges: Vec<ScreenRange>,
}

impl ScreenEntities {
    /// Create an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform the frame was produced with; `None` for a frame never filled.
    pub fn transform(&self) -> Option<&ViewTransform> {
        self.transform.as_ref()
    }

    /// Materialized vertices.
    pub fn vertices(&self) -> &[ScreenVertex] {
        &self.vertices
    }

    /// Materialized edges.
    pub fn edges(&self) -> &[ScreenEdge] {
        &self.edges
    }

    /// Dense ranges.
    pub fn ranges(&self) -> &[ScreenRange] {
        &self.ranges
    }

    /// Whether the frame holds no vertices, edges or ranges.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty() && self.ranges.is_empty()
    }

    /// Screen vertex materialized from `vertex`, if any.
    pub fn find_vertex(&self, vertex: VertexId) -> Option<&ScreenVertex> {
        self.vertices.iter().find(|v| v.vertex == vertex)
    }

    /// Empty the frame, keeping its allocations.
    pub fn clear(&mut self) {
        self.transform = None;
        self.vertices.clear();
        self.edges.clear();
        self.ranges.clear();
    }
}
