// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lineage View: from a laid-out lineage forest to what is on screen.
//!
//! - [`ViewTransform`] maps layout space (layout X by time point) to screen pixels and
//!   implements pan and anchored zoom. [`SharedTransform`] hands consistent snapshots
//!   of it from the input thread to the rendering thread.
//! - [`Materializer::crop_and_scale`] turns a [`Graph`](lineage_graph::Graph) and its
//!   [`TimeIndex`](lineage_layout::TimeIndex) into [`ScreenEntities`] for one view,
//!   visiting only the rows and columns in sight. Frames alternate between two
//!   buffers so the previous one stays available.
//! - [`ScreenEntitiesInterpolator`] blends two frames for animated transitions.
//! - [`closest_vertex`] and [`closest_edge`] pick entities under the pointer.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use lineage_graph::Graph;
//! use lineage_layout::{LineageLayout, RootOrder, TimeIndex, collect_roots};
//! use lineage_view::{Materializer, ViewTransform, closest_vertex};
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
//! let mut index = TimeIndex::new();
//! index.build(&graph, &roots).unwrap();
//!
//! let view = ViewTransform::from_bounds(0.0, 1.0, 0.0, 1.0, 101, 101);
//! let mut materializer = Materializer::new();
//! let frame = materializer.crop_and_scale(&graph, &index, &view);
//! assert_eq!(frame.vertices().len(), 3);
//! assert_eq!(frame.edges().len(), 2);
//!
//! assert_eq!(closest_vertex(&index, &view, Point::new(99.0, 98.0), 5.0), Some(b));
//! ```

mod hit;
mod interpolate;
mod materialize;
mod screen;
mod shared;
mod transform;

pub use hit::{closest_edge, closest_vertex};
pub use interpolate::ScreenEntitiesInterpolator;
pub use materialize::{DenseRanges, MaterializeConfig, Materializer};
pub use screen::{ScreenEdge, ScreenEntities, ScreenRange, ScreenVertex, Transition};
pub use shared::SharedTransform;
pub use transform::ViewTransform;
