// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Root collection and ordering.

use core::cmp::Ordering;

use lineage_graph::{Graph, VertexId};

/// How tree roots are ordered from left to right before layout.
///
/// No ordering is more meaningful than another here; callers that have a domain
/// notion (track name, creation time, ...) plug it in with [`RootOrder::Custom`].
#[derive(Clone, Copy, Debug, Default)]
pub enum RootOrder {
    /// Ascending vertex slot.
    #[default]
    BySlot,
    /// Ascending label, ties broken by slot.
    ByLabel,
    /// Caller-provided comparator.
    Custom(fn(&Graph, VertexId, VertexId) -> Ordering),
}

impl RootOrder {
    /// Compare two roots under this ordering.
    pub fn compare(&self, graph: &Graph, a: VertexId, b: VertexId) -> Ordering {
        match self {
            Self::BySlot => a.slot().cmp(&b.slot()),
            Self::ByLabel => graph
                .label(a)
                .cmp(&graph.label(b))
                .then_with(|| a.slot().cmp(&b.slot())),
            Self::Custom(cmp) => cmp(graph, a, b),
        }
    }
}

/// Collect every root of `graph` (vertices without incoming edges), sorted by `order`.
pub fn collect_roots(graph: &Graph, order: RootOrder) -> Vec<VertexId> {
    let mut roots: Vec<_> = graph.roots().collect();
    roots.sort_by(|a, b| order.compare(graph, *a, *b));
    roots
}
