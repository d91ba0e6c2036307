// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-time-point vertex index ordered by layout X.

use kurbo::Rect;
use lineage_graph::{Graph, GraphError, VertexId};

/// One indexed vertex together with the layout X it had when the index was built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entry {
    /// The vertex.
    pub vertex: VertexId,
    /// Its layout X coordinate.
    pub x: f64,
}

/// A time point and its vertices, ordered by ascending layout X.
#[derive(Clone, Copy, Debug)]
pub struct Row<'a> {
    /// The time point.
    pub timepoint: u32,
    /// Vertices of this time point, sorted by [`Entry::x`].
    pub entries: &'a [Entry],
}

#[derive(Clone, Copy, Debug)]
struct Bucket {
    timepoint: u32,
    start: usize,
    end: usize,
}

/// Partition of laid-out vertices by time point.
///
/// Each bucket holds the vertices of one time point sorted by layout X, which is what
/// makes viewport range queries and hit tests a binary search per row.
///
/// Build it after [`LineageLayout`](crate::LineageLayout) has run, and rebuild it after
/// every structural change or re-layout. Buckets store a snapshot of each vertex's
/// layout X.
#[derive(Debug, Default)]
pub struct TimeIndex {
    entries: Vec<Entry>,
    buckets: Vec<Bucket>,
    // scratch
    staging: Vec<(u32, Entry)>,
    visited: Vec<u64>,
    stamp: u64,
    stack: Vec<(VertexId, usize)>,
}

impl TimeIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the index from the vertices reachable from `roots`.
    ///
    /// The walk mirrors the layout's: depth first along outgoing edges in insertion
    /// order, each vertex once, ghosts not descended. Buckets are then stably sorted by
    /// layout X, so they are ordered even if the traversal orders ever diverge.
    ///
    /// On error the previous contents are kept.
    pub fn build(&mut self, graph: &Graph, roots: &[VertexId]) -> Result<(), GraphError> {
        if let Some(stale) = roots.iter().find(|r| !graph.is_alive(**r)) {
            return Err(GraphError::StaleVertex(*stale));
        }
        self.staging.clear();
        self.stack.clear();
        self.stamp += 1;
        let stamp = self.stamp;
        self.visited.resize(graph.vertex_slot_capacity(), 0);

        for &root in roots {
            if self.visited[root.slot()] == stamp {
                continue;
            }
            self.visited[root.slot()] = stamp;
            self.stage(graph, root)?;
            self.stack.push((root, 0));

            while let Some((vertex, next_edge)) = self.stack.last_mut() {
                let vertex = *vertex;
                let outgoing = graph
                    .outgoing(vertex)
                    .ok_or(GraphError::StaleVertex(vertex))?;
                if graph.is_ghost(vertex) || *next_edge >= outgoing.len() {
                    self.stack.pop();
                    continue;
                }
                let edge = outgoing[*next_edge];
                *next_edge += 1;
                let child = graph.target(edge).ok_or(GraphError::StaleEdge(edge))?;
                if self.visited[child.slot()] == stamp {
                    continue;
                }
                self.visited[child.slot()] = stamp;
                self.stage(graph, child)?;
                self.stack.push((child, 0));
            }
        }

        self.staging
            .sort_by(|(ta, a), (tb, b)| ta.cmp(tb).then(a.x.total_cmp(&b.x)));
        self.entries.clear();
        self.buckets.clear();
        for &(timepoint, entry) in &self.staging {
            match self.buckets.last_mut() {
                Some(bucket) if bucket.timepoint == timepoint => bucket.end += 1,
                _ => self.buckets.push(Bucket {
                    timepoint,
                    start: self.entries.len(),
                    end: self.entries.len() + 1,
                }),
            }
            self.entries.push(entry);
        }

        tracing::debug!(
            vertices = self.entries.len(),
            timepoints = self.buckets.len(),
            "time index built"
        );
        Ok(())
    }

    fn stage(&mut self, graph: &Graph, vertex: VertexId) -> Result<(), GraphError> {
        let timepoint = graph
            .timepoint(vertex)
            .ok_or(GraphError::StaleVertex(vertex))?;
        let x = graph
            .layout_x(vertex)
            .ok_or(GraphError::StaleVertex(vertex))?;
        self.staging.push((timepoint, Entry { vertex, x }));
        Ok(())
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.buckets.clear();
    }

    /// Total number of indexed vertices.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no vertex is indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Time points that have at least one vertex, ascending.
    pub fn timepoints(&self) -> impl Iterator<Item = u32> + '_ {
        self.buckets.iter().map(|b| b.timepoint)
    }

    /// All rows, ascending by time point.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.rows_from(0, self.buckets.len())
    }

    /// Rows whose time point lies within `[lo, hi]`, ascending.
    pub fn rows_between(&self, lo: f64, hi: f64) -> impl Iterator<Item = Row<'_>> + '_ {
        let first = self
            .buckets
            .partition_point(|b| f64::from(b.timepoint) < lo);
        let last = self
            .buckets
            .partition_point(|b| f64::from(b.timepoint) <= hi);
        self.rows_from(first, last.max(first))
    }

    fn rows_from(&self, first: usize, last: usize) -> impl Iterator<Item = Row<'_>> + '_ {
        self.buckets[first..last].iter().map(|b| Row {
            timepoint: b.timepoint,
            entries: &self.entries[b.start..b.end],
        })
    }

    /// Vertices of `timepoint` ordered by layout X; empty if the time point has none.
    pub fn bucket(&self, timepoint: u32) -> &[Entry] {
        match self
            .buckets
            .binary_search_by_key(&timepoint, |b| b.timepoint)
        {
            Ok(i) => {
                let b = self.buckets[i];
                &self.entries[b.start..b.end]
            }
            Err(_) => &[],
        }
    }

    /// Leftmost vertex of `timepoint`.
    pub fn min_vertex(&self, timepoint: u32) -> Option<VertexId> {
        self.bucket(timepoint).first().map(|e| e.vertex)
    }

    /// Rightmost vertex of `timepoint`.
    pub fn max_vertex(&self, timepoint: u32) -> Option<VertexId> {
        self.bucket(timepoint).last().map(|e| e.vertex)
    }

    /// Smallest layout X at `timepoint`.
    pub fn min_x(&self, timepoint: u32) -> Option<f64> {
        self.bucket(timepoint).first().map(|e| e.x)
    }

    /// Largest layout X at `timepoint`.
    pub fn max_x(&self, timepoint: u32) -> Option<f64> {
        self.bucket(timepoint).last().map(|e| e.x)
    }

    /// Smallest layout X over all time points.
    pub fn global_min_x(&self) -> Option<f64> {
        self.rows()
            .filter_map(|r| r.entries.first())
            .map(|e| e.x)
            .reduce(f64::min)
    }

    /// Largest layout X over all time points.
    pub fn global_max_x(&self) -> Option<f64> {
        self.rows()
            .filter_map(|r| r.entries.last())
            .map(|e| e.x)
            .reduce(f64::max)
    }

    /// Earliest indexed time point.
    pub fn min_timepoint(&self) -> Option<u32> {
        self.buckets.first().map(|b| b.timepoint)
    }

    /// Latest indexed time point.
    pub fn max_timepoint(&self) -> Option<u32> {
        self.buckets.last().map(|b| b.timepoint)
    }

    /// Layout-space bounds of all indexed vertices (`x` is layout X, `y` is time point).
    pub fn bounds(&self) -> Option<Rect> {
        Some(Rect::new(
            self.global_min_x()?,
            f64::from(self.min_timepoint()?),
            self.global_max_x()?,
            f64::from(self.max_timepoint()?),
        ))
    }
}

/// Largest index in `bucket` whose layout X is `<= value`.
///
/// Returns `None` (before the first element) if the bucket is empty or `value` is
/// smaller than every element.
pub fn binary_search(bucket: &[Entry], value: f64) -> Option<usize> {
    binary_search_in(bucket, value, 0, bucket.len())
}

/// Like [`binary_search`], restricted to `bucket[from..to]`; indices are into `bucket`.
///
/// `to` is clamped to the bucket length. Returns `None` if no element of the range is
/// `<= value`.
pub fn binary_search_in(bucket: &[Entry], value: f64, from: usize, to: usize) -> Option<usize> {
    let to = to.min(bucket.len());
    if from >= to {
        return None;
    }
    let n = bucket[from..to].partition_point(|e| e.x <= value);
    (n > 0).then(|| from + n - 1)
}
