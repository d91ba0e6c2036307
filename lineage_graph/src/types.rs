// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the graph store: vertex and edge identifiers and flags.

/// Identifier for a vertex in the [`Graph`](crate::Graph).
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is freed.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `VertexId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `VertexId`.
///
/// ### Liveness
///
/// Use [`Graph::is_alive`](crate::Graph::is_alive) to check whether a `VertexId` still refers to a
/// live vertex. Stale ids never alias a different live vertex because the generation must match.
///
/// ### Notes
///
/// - The generation increments on slot reuse and never decreases.
/// - `u32` is ample for practical lifetimes; behavior on generation overflow is unspecified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct VertexId(pub(crate) u32, pub(crate) u32);

impl VertexId {
    pub(crate) const fn new(slot: u32, generation: u32) -> Self {
        Self(slot, generation)
    }

    /// Slot index of this vertex in the store.
    ///
    /// Slot indices are dense and bounded by
    /// [`Graph::vertex_slot_capacity`](crate::Graph::vertex_slot_capacity), which makes them
    /// suitable keys for slot-indexed side tables.
    pub const fn slot(self) -> usize {
        self.0 as usize
    }

    /// Generation of the slot at the time this id was handed out.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

/// Identifier for an edge in the [`Graph`](crate::Graph).
///
/// Same generational semantics as [`VertexId`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct EdgeId(pub(crate) u32, pub(crate) u32);

impl EdgeId {
    pub(crate) const fn new(slot: u32, generation: u32) -> Self {
        Self(slot, generation)
    }

    /// Slot index of this edge in the store.
    pub const fn slot(self) -> usize {
        self.0 as usize
    }

    /// Generation of the slot at the time this id was handed out.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// Per-vertex state bits.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct VertexFlags: u8 {
        /// Vertex is part of the current selection.
        const SELECTED = 0b0000_0001;
        /// Vertex was reached during layout but is inactive; it is laid out as a leaf.
        const GHOST    = 0b0000_0010;
    }
}

bitflags::bitflags! {
    /// Per-edge state bits.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EdgeFlags: u8 {
        /// Edge is part of the current selection.
        const SELECTED = 0b0000_0001;
    }
}
