// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout errors.

use lineage_graph::{EdgeId, GraphError};
use thiserror::Error;

/// Errors reported by [`LineageLayout`](crate::LineageLayout).
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// A root (or a vertex reached from one) is not live.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// An edge does not lead strictly forward in time.
    ///
    /// Lineage edges go from a time point to a later one. An edge that does not is
    /// either a back-in-time link or part of a cycle; both make the layout ill-defined.
    #[error(
        "edge {edge:?} goes from time point {source_timepoint} to {target_timepoint}, expected a later time point"
    )]
    NonIncreasingTime {
        /// The offending edge.
        edge: EdgeId,
        /// Time point of the edge's source.
        source_timepoint: u32,
        /// Time point of the edge's target.
        target_timepoint: u32,
    },
}
