// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end: build, lay out, index and materialize a small lineage.

use kurbo::{Point, Vec2};
use lineage_graph::{Graph, VertexId};
use lineage_layout::{LineageLayout, RootOrder, TimeIndex, collect_roots};
use lineage_view::{
    Materializer, ScreenEntities, ScreenEntitiesInterpolator, Transition, ViewTransform,
    closest_vertex,
};

struct Lineage {
    graph: Graph,
    index: TimeIndex,
    r: VertexId,
    a: VertexId,
    b: VertexId,
    c: VertexId,
    d: VertexId,
}

/// R(t0) divides into A and B (t1); A divides into C and D (t2).
///
/// Layout X: C=0, D=1, A=0.5, B=2, R=1.25.
fn lineage() -> Lineage {
    let mut graph = Graph::new();
    let r = graph.add_vertex().init("R", 0, false);
    let a = graph.add_vertex().init("A", 1, false);
    let b = graph.add_vertex().init("B", 1, false);
    let c = graph.add_vertex().init("C", 2, false);
    let d = graph.add_vertex().init("D", 2, false);
    graph.add_edge(r, a).unwrap();
    graph.add_edge(r, b).unwrap();
    graph.add_edge(a, c).unwrap();
    graph.add_edge(a, d).unwrap();

    let roots = collect_roots(&graph, RootOrder::BySlot);
    LineageLayout::new().layout_x(&mut graph, &roots).unwrap();
    let mut index = TimeIndex::new();
    index.build(&graph, &roots).unwrap();
    Lineage {
        graph,
        index,
        r,
        a,
        b,
        c,
        d,
    }
}

#[test]
fn whole_lineage_in_view() {
    let l = lineage();
    let mut m = Materializer::new();
    let view = ViewTransform::from_bounds(0.0, 2.0, 0.0, 2.0, 201, 201);
    let frame = m.crop_and_scale(&l.graph, &l.index, &view);

    assert_eq!(frame.vertices().len(), 5);
    assert_eq!(frame.edges().len(), 4);
    for e in frame.edges() {
        let source = &frame.vertices()[e.source];
        let target = &frame.vertices()[e.target];
        assert_eq!(l.graph.source(e.edge), Some(source.vertex));
        assert_eq!(l.graph.target(e.edge), Some(target.vertex));
        assert!(source.y < target.y);
    }

    let r = frame.find_vertex(l.r).unwrap();
    assert!((r.x - 125.0).abs() < 1e-9);
    assert!((r.y - 0.0).abs() < 1e-9);
    let d = frame.find_vertex(l.d).unwrap();
    assert!((d.x - 100.0).abs() < 1e-9);
    assert!((d.y - 200.0).abs() < 1e-9);
}

#[test]
fn view_outside_bounds_is_empty() {
    let l = lineage();
    let mut m = Materializer::new();
    let right = ViewTransform::from_bounds(10.0, 20.0, 0.0, 2.0, 100, 100);
    assert!(m.crop_and_scale(&l.graph, &l.index, &right).is_empty());
    let later = ViewTransform::from_bounds(0.0, 2.0, 5.0, 9.0, 100, 100);
    assert!(m.crop_and_scale(&l.graph, &l.index, &later).is_empty());
}

#[test]
fn selection_is_materialized() {
    let mut l = lineage();
    l.graph.set_selected(l.c, true).unwrap();
    let mut m = Materializer::new();
    let view = ViewTransform::from_bounds(0.0, 2.0, 0.0, 2.0, 201, 201);
    let frame = m.crop_and_scale(&l.graph, &l.index, &view);
    assert!(frame.find_vertex(l.c).unwrap().selected);
    assert!(!frame.find_vertex(l.a).unwrap().selected);
}

#[test]
fn pan_then_pick() {
    let l = lineage();
    let start = ViewTransform::from_bounds(0.0, 2.0, 0.0, 2.0, 201, 201);
    let mut view = start;
    // Drag the content 100 px to the left: layout X 1.0 is now at the left edge.
    view.pan(Vec2::new(100.0, 0.0), &start);
    assert_eq!(
        closest_vertex(&l.index, &view, Point::new(100.0, 100.0), 3.0),
        Some(l.b)
    );
    assert_eq!(
        closest_vertex(&l.index, &view, Point::new(0.0, 200.0), 3.0),
        Some(l.d)
    );
}

#[test]
fn zoom_transition_between_frames() {
    let l = lineage();
    let mut m = Materializer::new();
    let wide = ViewTransform::from_bounds(0.0, 2.0, 0.0, 2.0, 201, 201);
    let mut zoomed = wide;
    zoomed.scale(0.5, Point::new(0.0, 200.0));
    m.crop_and_scale(&l.graph, &l.index, &wide);
    m.crop_and_scale(&l.graph, &l.index, &zoomed);

    let mut interp = ScreenEntitiesInterpolator::new(m.previous(), m.current());
    let mut out = ScreenEntities::new();
    interp.interpolate(1.0, &mut out);
    for v in out.vertices() {
        if v.transition == Transition::Stable {
            let target = m.current().find_vertex(v.vertex).unwrap();
            assert!((v.x - target.x).abs() < 1e-9);
            assert!((v.y - target.y).abs() < 1e-9);
        }
    }
    assert_eq!(out.edges().len(), m.current().edges().len());
}
