// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core store implementation: slot allocation, adjacency, removal, queries.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::cursor::Cursor;
use crate::error::GraphError;
use crate::types::{EdgeFlags, EdgeId, VertexFlags, VertexId};

/// Inline adjacency list. Lineage vertices rarely have more than two children or one parent.
type Adjacency = SmallVec<[EdgeId; 2]>;

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

/// Pooled directed graph of lineage vertices and edges.
///
/// Vertices and edges are fixed-size records stored in slot vectors. Freed slots are
/// recycled through free lists, and every slot carries a generation counter so that
/// handles to freed slots are detected instead of aliasing newer entries.
/// Labels are variable length and live in a slot-indexed side table.
#[derive(Clone)]
pub struct Graph {
    vertices: Vec<Option<Vertex>>,
    vertex_generations: Vec<u32>, // last generation per slot (persists across frees)
    vertex_free: Vec<usize>,
    labels: Vec<Arc<str>>,
    edges: Vec<Option<Edge>>,
    edge_generations: Vec<u32>,
    edge_free: Vec<usize>,
    vertex_count: usize,
    edge_count: usize,
    empty_label: Arc<str>,
}

impl core::fmt::Debug for Graph {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Graph")
            .field("vertices_total", &self.vertices.len())
            .field("vertices_alive", &self.vertex_count)
            .field("vertex_free_list", &self.vertex_free.len())
            .field("edges_total", &self.edges.len())
            .field("edges_alive", &self.edge_count)
            .field("edge_free_list", &self.edge_free.len())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Vertex {
    generation: u32,
    timepoint: u32,
    layout_x: f64,
    flags: VertexFlags,
    incoming: Adjacency,
    outgoing: Adjacency,
}

impl Vertex {
    fn new(generation: u32) -> Self {
        Self {
            generation,
            timepoint: 0,
            layout_x: 0.0,
            flags: VertexFlags::empty(),
            incoming: Adjacency::new(),
            outgoing: Adjacency::new(),
        }
    }
}

#[derive(Clone, Debug)]
struct Edge {
    generation: u32,
    source: VertexId,
    target: VertexId,
    flags: EdgeFlags,
}

/// A freshly allocated vertex slot, returned by [`Graph::add_vertex`].
///
/// The slot is already live with default attributes (empty label, time point `0`,
/// unselected). Call [`VertexSlot::init`] to set its attributes.
#[must_use = "initialize the vertex with `init` or keep its `id`"]
#[derive(Debug)]
pub struct VertexSlot<'a> {
    graph: &'a mut Graph,
    id: VertexId,
}

impl VertexSlot<'_> {
    /// Id of the allocated vertex.
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Set label, time point and selection state, and return the vertex id.
    pub fn init(self, label: impl Into<Arc<str>>, timepoint: u32, selected: bool) -> VertexId {
        let slot = self.id.slot();
        self.graph.labels[slot] = label.into();
        if let Some(v) = self.graph.vertices[slot].as_mut() {
            v.timepoint = timepoint;
            v.flags.set(VertexFlags::SELECTED, selected);
        }
        self.id
    }
}

/// Pop a free slot (bumping its generation) or append a new one with generation `1`.
fn claim_slot(free_list: &mut Vec<usize>, generations: &mut Vec<u32>) -> (usize, u32) {
    if let Some(idx) = free_list.pop() {
        let generation = generations[idx].saturating_add(1);
        generations[idx] = generation;
        (idx, generation)
    } else {
        let generation = 1_u32;
        generations.push(generation);
        (generations.len() - 1, generation)
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Graph handles use 32-bit slot indices by design."
)]
const fn slot_u32(idx: usize) -> u32 {
    idx as u32
}

impl Graph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            vertex_generations: Vec::new(),
            vertex_free: Vec::new(),
            labels: Vec::new(),
            edges: Vec::new(),
            edge_generations: Vec::new(),
            edge_free: Vec::new(),
            vertex_count: 0,
            edge_count: 0,
            empty_label: Arc::from(""),
        }
    }

    /// Create an empty graph with room for `vertices` vertices and `edges` edges.
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        let mut graph = Self::new();
        graph.reserve(vertices, edges);
        graph
    }

    /// Reserve space for at least `vertices` more vertices and `edges` more edges.
    pub fn reserve(&mut self, vertices: usize, edges: usize) {
        self.vertices.reserve(vertices);
        self.vertex_generations.reserve(vertices);
        self.labels.reserve(vertices);
        self.edges.reserve(edges);
        self.edge_generations.reserve(edges);
    }

    /// Remove every vertex and edge.
    ///
    /// Slot generations are kept, so ids handed out before the clear stay stale.
    pub fn clear(&mut self) {
        for (slot, v) in self.vertices.iter_mut().enumerate() {
            if v.take().is_some() {
                self.vertex_free.push(slot);
            }
        }
        for (slot, e) in self.edges.iter_mut().enumerate() {
            if e.take().is_some() {
                self.edge_free.push(slot);
            }
        }
        for label in &mut self.labels {
            *label = self.empty_label.clone();
        }
        self.vertex_count = 0;
        self.edge_count = 0;
    }

    /// Allocate a vertex slot, reusing a freed one when available.
    pub fn add_vertex(&mut self) -> VertexSlot<'_> {
        let (idx, generation) = claim_slot(&mut self.vertex_free, &mut self.vertex_generations);
        let vertex = Vertex::new(generation);
        if idx == self.vertices.len() {
            self.vertices.push(Some(vertex));
            self.labels.push(self.empty_label.clone());
        } else {
            self.vertices[idx] = Some(vertex);
            self.labels[idx] = self.empty_label.clone();
        }
        self.vertex_count += 1;
        let id = VertexId::new(slot_u32(idx), generation);
        VertexSlot { graph: self, id }
    }

    /// Add a directed edge from `source` to `target`.
    ///
    /// The edge is appended to the source's outgoing and the target's incoming
    /// adjacency, so outgoing edges iterate in insertion order.
    pub fn add_edge(&mut self, source: VertexId, target: VertexId) -> Result<EdgeId, GraphError> {
        if !self.is_alive(source) {
            return Err(GraphError::StaleVertex(source));
        }
        if !self.is_alive(target) {
            return Err(GraphError::StaleVertex(target));
        }
        let (idx, generation) = claim_slot(&mut self.edge_free, &mut self.edge_generations);
        let edge = Edge {
            generation,
            source,
            target,
            flags: EdgeFlags::empty(),
        };
        if idx == self.edges.len() {
            self.edges.push(Some(edge));
        } else {
            self.edges[idx] = Some(edge);
        }
        self.edge_count += 1;
        let id = EdgeId::new(slot_u32(idx), generation);
        if let Some(v) = self.vertex_mut(source) {
            v.outgoing.push(id);
        }
        if let Some(v) = self.vertex_mut(target) {
            v.incoming.push(id);
        }
        Ok(id)
    }

    /// Remove a vertex together with all of its incident edges.
    ///
    /// Returns the number of edges removed, which equals the vertex's in-degree
    /// plus out-degree (a self-loop is counted once).
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<usize, GraphError> {
        let vertex = self.vertex(id).ok_or(GraphError::StaleVertex(id))?;
        let incident: SmallVec<[EdgeId; 4]> = vertex
            .incoming
            .iter()
            .chain(vertex.outgoing.iter())
            .copied()
            .collect();
        let mut removed = 0;
        for edge in incident {
            // A self-loop shows up in both lists; the second removal sees a stale id.
            if self.remove_edge(edge).is_ok() {
                removed += 1;
            }
        }
        self.vertices[id.slot()] = None;
        self.labels[id.slot()] = self.empty_label.clone();
        self.vertex_free.push(id.slot());
        self.vertex_count -= 1;
        tracing::trace!(?id, edges = removed, "removed vertex");
        Ok(removed)
    }

    /// Remove an edge, unlinking it from both endpoints.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<(), GraphError> {
        let (source, target) = {
            let edge = self.edge(id).ok_or(GraphError::StaleEdge(id))?;
            (edge.source, edge.target)
        };
        if let Some(v) = self.vertex_mut(source) {
            v.outgoing.retain(|e| *e != id);
        }
        if let Some(v) = self.vertex_mut(target) {
            v.incoming.retain(|e| *e != id);
        }
        self.edges[id.slot()] = None;
        self.edge_free.push(id.slot());
        self.edge_count -= 1;
        Ok(())
    }

    // --- cursors ---

    /// Obtain an empty reusable vertex cursor.
    pub fn vertex_ref(&self) -> Cursor<VertexId> {
        Cursor::new()
    }

    /// Obtain an empty reusable edge cursor.
    pub fn edge_ref(&self) -> Cursor<EdgeId> {
        Cursor::new()
    }

    /// Return a cursor obtained from [`Graph::vertex_ref`] or [`Graph::edge_ref`].
    ///
    /// Cursors own nothing; releasing one never affects stored data.
    pub fn release_ref<K>(&self, _cursor: Cursor<K>) {}

    /// Point `out` at the source vertex of `edge` and return it.
    pub fn source_into(&self, edge: EdgeId, out: &mut Cursor<VertexId>) -> Option<VertexId> {
        let source = self.source(edge)?;
        out.point_to(source);
        Some(source)
    }

    /// Point `out` at the target vertex of `edge` and return it.
    pub fn target_into(&self, edge: EdgeId, out: &mut Cursor<VertexId>) -> Option<VertexId> {
        let target = self.target(edge)?;
        out.point_to(target);
        Some(target)
    }

    // --- queries ---

    /// Returns true if `id` refers to a live vertex.
    ///
    /// A `VertexId` is live if its slot exists and its generation matches the one
    /// stored in that slot. See [`VertexId`] docs for the generational semantics.
    pub fn is_alive(&self, id: VertexId) -> bool {
        self.vertex(id).is_some()
    }

    /// Returns true if `id` refers to a live edge.
    pub fn is_edge_alive(&self, id: EdgeId) -> bool {
        self.edge(id).is_some()
    }

    /// Number of live vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of live edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Upper bound (exclusive) on vertex slot indices ever handed out.
    pub fn vertex_slot_capacity(&self) -> usize {
        self.vertices.len()
    }

    /// Iterate all live vertices in slot order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.iter().enumerate().filter_map(|(i, v)| {
            v.as_ref()
                .map(|v| VertexId::new(slot_u32(i), v.generation))
        })
    }

    /// Iterate all live edges in slot order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().enumerate().filter_map(|(i, e)| {
            e.as_ref().map(|e| EdgeId::new(slot_u32(i), e.generation))
        })
    }

    /// Iterate live vertices without incoming edges, in slot order.
    pub fn roots(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.iter().enumerate().filter_map(|(i, v)| match v {
            Some(v) if v.incoming.is_empty() => Some(VertexId::new(slot_u32(i), v.generation)),
            _ => None,
        })
    }

    /// Label of a vertex.
    pub fn label(&self, id: VertexId) -> Option<&str> {
        self.shared_label(id).map(|l| &**l)
    }

    /// Label of a vertex as a shared string, for consumers that keep it beyond a borrow.
    pub fn shared_label(&self, id: VertexId) -> Option<&Arc<str>> {
        self.vertex(id)?;
        self.labels.get(id.slot())
    }

    /// Time point of a vertex.
    pub fn timepoint(&self, id: VertexId) -> Option<u32> {
        self.vertex(id).map(|v| v.timepoint)
    }

    /// Layout X coordinate of a vertex, as last assigned by a layout pass.
    pub fn layout_x(&self, id: VertexId) -> Option<f64> {
        self.vertex(id).map(|v| v.layout_x)
    }

    /// Flags of a vertex.
    pub fn vertex_flags(&self, id: VertexId) -> Option<VertexFlags> {
        self.vertex(id).map(|v| v.flags)
    }

    /// Whether a vertex is selected. Stale ids report `false`.
    pub fn is_selected(&self, id: VertexId) -> bool {
        self.vertex(id)
            .is_some_and(|v| v.flags.contains(VertexFlags::SELECTED))
    }

    /// Whether a vertex was marked as a ghost by the last layout. Stale ids report `false`.
    pub fn is_ghost(&self, id: VertexId) -> bool {
        self.vertex(id)
            .is_some_and(|v| v.flags.contains(VertexFlags::GHOST))
    }

    /// Incoming edges of a vertex, in insertion order.
    pub fn incoming(&self, id: VertexId) -> Option<&[EdgeId]> {
        self.vertex(id).map(|v| v.incoming.as_slice())
    }

    /// Outgoing edges of a vertex, in insertion order.
    pub fn outgoing(&self, id: VertexId) -> Option<&[EdgeId]> {
        self.vertex(id).map(|v| v.outgoing.as_slice())
    }

    /// Source vertex of an edge.
    pub fn source(&self, id: EdgeId) -> Option<VertexId> {
        self.edge(id).map(|e| e.source)
    }

    /// Target vertex of an edge.
    pub fn target(&self, id: EdgeId) -> Option<VertexId> {
        self.edge(id).map(|e| e.target)
    }

    /// Whether an edge is selected. Stale ids report `false`.
    pub fn is_edge_selected(&self, id: EdgeId) -> bool {
        self.edge(id)
            .is_some_and(|e| e.flags.contains(EdgeFlags::SELECTED))
    }

    // --- attribute updates ---

    /// Update a vertex label.
    pub fn set_label(&mut self, id: VertexId, label: impl Into<Arc<str>>) -> Result<(), GraphError> {
        if !self.is_alive(id) {
            return Err(GraphError::StaleVertex(id));
        }
        self.labels[id.slot()] = label.into();
        Ok(())
    }

    /// Update the selection state of a vertex.
    pub fn set_selected(&mut self, id: VertexId, selected: bool) -> Result<(), GraphError> {
        let v = self.vertex_mut(id).ok_or(GraphError::StaleVertex(id))?;
        v.flags.set(VertexFlags::SELECTED, selected);
        Ok(())
    }

    /// Update the selection state of an edge.
    pub fn set_edge_selected(&mut self, id: EdgeId, selected: bool) -> Result<(), GraphError> {
        let e = self.edge_mut(id).ok_or(GraphError::StaleEdge(id))?;
        e.flags.set(EdgeFlags::SELECTED, selected);
        Ok(())
    }

    /// Store a layout X coordinate.
    pub fn set_layout_x(&mut self, id: VertexId, x: f64) -> Result<(), GraphError> {
        let v = self.vertex_mut(id).ok_or(GraphError::StaleVertex(id))?;
        v.layout_x = x;
        Ok(())
    }

    /// Mark or unmark a vertex as a layout ghost.
    pub fn set_ghost(&mut self, id: VertexId, ghost: bool) -> Result<(), GraphError> {
        let v = self.vertex_mut(id).ok_or(GraphError::StaleVertex(id))?;
        v.flags.set(VertexFlags::GHOST, ghost);
        Ok(())
    }

    // --- internals ---

    fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        let v = self.vertices.get(id.slot())?.as_ref()?;
        (v.generation == id.1).then_some(v)
    }

    fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        let v = self.vertices.get_mut(id.slot())?.as_mut()?;
        if v.generation != id.1 {
            return None;
        }
        Some(v)
    }

    fn edge(&self, id: EdgeId) -> Option<&Edge> {
        let e = self.edges.get(id.slot())?.as_ref()?;
        (e.generation == id.1).then_some(e)
    }

    fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        let e = self.edges.get_mut(id.slot())?.as_mut()?;
        if e.generation != id.1 {
            return None;
        }
        Some(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(graph: &mut Graph, label: &str, t: u32) -> VertexId {
        graph.add_vertex().init(label, t, false)
    }

    #[test]
    fn add_vertex_and_edge() {
        let mut graph = Graph::new();
        let a = vertex(&mut graph, "a", 0);
        let b = vertex(&mut graph, "b", 1);
        let e = graph.add_edge(a, b).unwrap();

        assert_eq!(graph.label(a), Some("a"));
        assert_eq!(graph.timepoint(b), Some(1));
        assert_eq!(graph.outgoing(a), Some(&[e][..]));
        assert_eq!(graph.incoming(b), Some(&[e][..]));
        assert_eq!(graph.source(e), Some(a));
        assert_eq!(graph.target(e), Some(b));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.roots().collect::<Vec<_>>(), vec![a]);
    }

    #[test]
    fn uninitialized_slot_has_defaults() {
        let mut graph = Graph::new();
        let id = graph.add_vertex().id();
        assert_eq!(graph.label(id), Some(""));
        assert_eq!(graph.timepoint(id), Some(0));
        assert!(!graph.is_selected(id));
    }

    #[test]
    fn liveness_remove_and_reuse() {
        let mut graph = Graph::new();
        let a = vertex(&mut graph, "a", 0);
        assert!(graph.is_alive(a));

        graph.remove_vertex(a).unwrap();
        assert!(!graph.is_alive(a));
        assert_eq!(graph.label(a), None, "stale ids must not resolve");

        let b = vertex(&mut graph, "b", 0);
        assert!(graph.is_alive(b));
        assert!(!graph.is_alive(a));
        assert_eq!(a.slot(), b.slot(), "freed slot is reused");
        assert!(b.generation() > a.generation(), "generation must increase on reuse");
        assert_eq!(graph.label(b), Some("b"));
    }

    #[test]
    fn removing_vertex_removes_incident_edges() {
        let mut graph = Graph::new();
        let r = vertex(&mut graph, "r", 0);
        let a = vertex(&mut graph, "a", 1);
        let b = vertex(&mut graph, "b", 1);
        let c = vertex(&mut graph, "c", 2);
        let ra = graph.add_edge(r, a).unwrap();
        let rb = graph.add_edge(r, b).unwrap();
        let ac = graph.add_edge(a, c).unwrap();

        let removed = graph.remove_vertex(a).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(!graph.is_edge_alive(ra));
        assert!(!graph.is_edge_alive(ac));
        assert!(graph.is_edge_alive(rb));
        assert_eq!(graph.outgoing(r), Some(&[rb][..]));
        assert_eq!(graph.incoming(c), Some(&[][..]));
        assert!(
            graph
                .edges()
                .all(|e| graph.source(e) != Some(a) && graph.target(e) != Some(a)),
            "no edge may reference the freed vertex"
        );
    }

    #[test]
    fn self_loop_is_removed_once() {
        let mut graph = Graph::new();
        let a = vertex(&mut graph, "a", 0);
        graph.add_edge(a, a).unwrap();
        assert_eq!(graph.remove_vertex(a), Ok(1));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn remove_edge_keeps_sibling_order() {
        let mut graph = Graph::new();
        let r = vertex(&mut graph, "r", 0);
        let kids: Vec<_> = (0..3).map(|i| vertex(&mut graph, "k", 1 + i)).collect();
        let edges: Vec<_> = kids
            .iter()
            .map(|k| graph.add_edge(r, *k).unwrap())
            .collect();
        graph.remove_edge(edges[1]).unwrap();
        assert_eq!(graph.outgoing(r), Some(&[edges[0], edges[2]][..]));
        assert_eq!(
            graph.remove_edge(edges[1]),
            Err(GraphError::StaleEdge(edges[1]))
        );
    }

    #[test]
    fn stale_endpoints_are_rejected() {
        let mut graph = Graph::new();
        let a = vertex(&mut graph, "a", 0);
        let b = vertex(&mut graph, "b", 1);
        graph.remove_vertex(b).unwrap();
        assert_eq!(graph.add_edge(a, b), Err(GraphError::StaleVertex(b)));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.set_selected(b, true), Err(GraphError::StaleVertex(b)));
    }

    #[test]
    fn selection_flags() {
        let mut graph = Graph::new();
        let a = graph.add_vertex().init("a", 0, true);
        let b = vertex(&mut graph, "b", 1);
        let e = graph.add_edge(a, b).unwrap();
        assert!(graph.is_selected(a));
        graph.set_selected(a, false).unwrap();
        assert!(!graph.is_selected(a));
        graph.set_edge_selected(e, true).unwrap();
        assert!(graph.is_edge_selected(e));
    }

    #[test]
    fn clear_invalidates_ids() {
        let mut graph = Graph::new();
        let a = vertex(&mut graph, "a", 0);
        let b = vertex(&mut graph, "b", 1);
        graph.add_edge(a, b).unwrap();
        graph.clear();
        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.is_alive(a));
        let c = vertex(&mut graph, "c", 0);
        assert_ne!(c, a);
        assert_ne!(c, b);
        assert_eq!(graph.vertices().count(), 1);
    }

    #[test]
    fn cursors_follow_edges() {
        let mut graph = Graph::new();
        let a = vertex(&mut graph, "a", 0);
        let b = vertex(&mut graph, "b", 1);
        let e = graph.add_edge(a, b).unwrap();

        let mut cursor = graph.vertex_ref();
        assert_eq!(graph.target_into(e, &mut cursor), Some(b));
        assert_eq!(cursor.get(), Some(b));
        assert_eq!(graph.source_into(e, &mut cursor), Some(a));
        assert_eq!(cursor.resolve(&graph), Some(a));
        graph.release_ref(cursor);
        assert!(graph.is_alive(a), "releasing a cursor must not touch stored data");
    }
}
