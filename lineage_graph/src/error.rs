// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for store operations.

use thiserror::Error;

use crate::types::{EdgeId, VertexId};

/// Errors returned by fallible [`Graph`](crate::Graph) operations.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// The vertex id refers to a freed (or never allocated) slot.
    #[error("stale vertex id {0:?}")]
    StaleVertex(VertexId),
    /// The edge id refers to a freed (or never allocated) slot.
    #[error("stale edge id {0:?}")]
    StaleEdge(EdgeId),
}
