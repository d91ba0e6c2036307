// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lineage Layout: horizontal layout of lineage forests and a per-time-point index.
//!
//! - [`LineageLayout`] assigns every vertex a layout X: leaves get `0, 1, 2, ...` in
//!   depth-first order and parents sit midway between their first and last child.
//!   The vertical layout coordinate is the vertex's time point.
//! - [`TimeIndex`] partitions the laid-out vertices by time point, each bucket sorted
//!   by layout X, so that viewport range queries and hit tests are one binary search
//!   per visible row ([`binary_search`]).
//! - [`collect_roots`] gathers the forest's roots in a pluggable [`RootOrder`].
//!
//! Both traversals are iterative, so lineage depth is not limited by the call stack.
//! Layout rejects edges that do not lead forward in time ([`LayoutError`]) and leaves
//! the graph untouched when it does.
//!
//! # Example
//!
//! ```rust
//! use lineage_graph::Graph;
//! use lineage_layout::{LineageLayout, RootOrder, TimeIndex, binary_search, collect_roots};
//!
//! let mut graph = Graph::new();
//! let r = graph.add_vertex().init("R", 0, false);
//! let a = graph.add_vertex().init("A", 1, false);
//! let b = graph.add_vertex().init("B", 1, false);
//! graph.add_edge(r, a).unwrap();
//! graph.add_edge(r, b).unwrap();
//!
//! let roots = collect_roots(&graph, RootOrder::BySlot);
//! LineageLayout::new().layout_x(&mut graph, &roots).unwrap();
//! assert_eq!(graph.layout_x(r), Some(0.5));
//!
//! let mut index = TimeIndex::new();
//! index.build(&graph, &roots).unwrap();
//! assert_eq!(index.min_vertex(1), Some(a));
//! assert_eq!(binary_search(index.bucket(1), 0.7), Some(0));
//! assert_eq!(binary_search(index.bucket(1), -1.0), None);
//! ```

mod error;
mod layout;
mod order;
mod roots;

pub use error::LayoutError;
pub use layout::{LayoutStats, LineageLayout};
pub use order::{Entry, Row, TimeIndex, binary_search, binary_search_in};
pub use roots::{RootOrder, collect_roots};
