// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lineage Graph: a pooled vertex/edge store for lineage (cell-division) trees.
//!
//! - Vertices and edges are fixed-size records in slot vectors with free lists, so
//!   adding and removing millions of elements does not churn the allocator.
//! - Handles are generational ([`VertexId`], [`EdgeId`]): a handle to a freed slot is
//!   detected as stale instead of silently aliasing whatever reuses the slot.
//! - Removing a vertex removes its incident edges first, so no edge can ever point at
//!   a freed vertex.
//! - Labels are variable length and live in a slot-indexed side table.
//! - Reusable [`Cursor`]s ([`VertexRef`], [`EdgeRef`]) let traversal code re-point one
//!   reference instead of allocating per visited element.
//!
//! This crate only stores the graph. Layout and the per-time-point index live in
//! `lineage_layout`; screen projection lives in `lineage_view`.
//!
//! ## API overview
//!
//! - [`Graph::add_vertex`] → [`VertexSlot`] → [`VertexSlot::init`] → [`VertexId`]
//! - [`Graph::add_edge`] → [`EdgeId`]
//! - [`Graph::remove_vertex`] / [`Graph::remove_edge`]
//! - [`Graph::vertices`], [`Graph::edges`], [`Graph::roots`]
//! - [`Graph::set_selected`], [`Graph::set_edge_selected`]
//!
//! # Example
//!
//! ```rust
//! use lineage_graph::Graph;
//!
//! let mut graph = Graph::new();
//! let root = graph.add_vertex().init("root", 0, false);
//! let a = graph.add_vertex().init("a", 1, false);
//! let b = graph.add_vertex().init("b", 1, false);
//! graph.add_edge(root, a).unwrap();
//! graph.add_edge(root, b).unwrap();
//!
//! assert_eq!(graph.roots().collect::<Vec<_>>(), vec![root]);
//!
//! // Removing the root also removes both edges.
//! assert_eq!(graph.remove_vertex(root), Ok(2));
//! assert_eq!(graph.edge_count(), 0);
//! assert!(!graph.is_alive(root));
//! ```

mod cursor;
mod error;
mod graph;
mod types;

pub use cursor::{Cursor, EdgeRef, VertexRef};
pub use error::GraphError;
pub use graph::{Graph, VertexSlot};
pub use types::{EdgeFlags, EdgeId, VertexFlags, VertexId};
