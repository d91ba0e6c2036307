// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reusable, non-owning cursors into graph slots.

use crate::graph::Graph;
use crate::types::{EdgeId, VertexId};

/// A reusable, re-pointable reference to a vertex or edge slot.
///
/// Cursors carry no ownership. Traversal code keeps one around and re-points it
/// instead of allocating per visited element. A cursor can outlive the element it
/// points to; [`Cursor::resolve`] reports whether the target is still live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cursor<K> {
    target: Option<K>,
}

/// Cursor over vertex slots, obtained from [`Graph::vertex_ref`].
pub type VertexRef = Cursor<VertexId>;

/// Cursor over edge slots, obtained from [`Graph::edge_ref`].
pub type EdgeRef = Cursor<EdgeId>;

impl<K> Default for Cursor<K> {
    fn default() -> Self {
        Self { target: None }
    }
}

impl<K: Copy> Cursor<K> {
    /// Create a cursor pointing nowhere.
    pub const fn new() -> Self {
        Self { target: None }
    }

    /// The id this cursor points at, if any.
    pub fn get(&self) -> Option<K> {
        self.target
    }

    /// Point this cursor at `id`.
    pub fn point_to(&mut self, id: K) -> &mut Self {
        self.target = Some(id);
        self
    }

    /// Point this cursor wherever `other` points.
    pub fn ref_to(&mut self, other: &Self) -> &mut Self {
        self.target = other.target;
        self
    }

    /// Detach the cursor.
    pub fn clear(&mut self) {
        self.target = None;
    }
}

impl Cursor<VertexId> {
    /// The vertex this cursor points at, if it is still live in `graph`.
    pub fn resolve(&self, graph: &Graph) -> Option<VertexId> {
        self.target.filter(|id| graph.is_alive(*id))
    }
}

impl Cursor<EdgeId> {
    /// The edge this cursor points at, if it is still live in `graph`.
    pub fn resolve(&self, graph: &Graph) -> Option<EdgeId> {
        self.target.filter(|id| graph.is_edge_alive(*id))
    }
}
