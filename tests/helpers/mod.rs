// Copyright 2025 Lars Brubaker
// Shared test utilities for offset-voronoi tests.

#![allow(dead_code)]

use offset_voronoi::{
    twin, EdgeIdx, FaceIdx, FaceStatus, Graph, Point, Real, Site, SiteIdx, VertIdx, VertexStatus,
    INVALID,
};

/// Walk every face and edge and check the half-edge invariants directly,
/// independent of `Graph::validate`.
pub fn verify_graph(g: &Graph) {
    g.validate().expect("graph failed validation");
    assert_eq!(g.num_edges() % 2, 0, "half-edges must come in pairs");

    let mut seen = vec![0u32; g.num_edges()];
    for (f, face) in g.faces() {
        let cycle = g.face_edges(f).expect("face cycle");
        if face.edge != INVALID {
            assert!(!cycle.is_empty(), "face {} has an edge but no cycle", f);
        }
        for (i, &e) in cycle.iter().enumerate() {
            let n = cycle[(i + 1) % cycle.len()];
            assert_eq!(g.face_of(e).unwrap(), f, "edge {} on face {} cycle", e, f);
            assert_eq!(
                g.target(e).unwrap(),
                g.source(n).unwrap(),
                "edges {} and {} are not head-to-tail",
                e,
                n
            );
            seen[e as usize] += 1;
        }
    }
    for (e, &count) in seen.iter().enumerate() {
        assert!(count <= 1, "edge {} lies on {} face cycles", e, count);
    }
    for (e, _) in g.edges() {
        assert_eq!(twin(twin(e)), e);
        assert_eq!(g.source(twin(e)).unwrap(), g.target(e).unwrap());
    }
    for (v, vertex) in g.vertices() {
        for &e in vertex.out_edges() {
            assert_eq!(g.source(e).unwrap(), v, "out-edge {} of vertex {}", e, v);
        }
    }
}

/// Number of half-edges that lie on some face cycle.
pub fn edges_on_cycles(g: &Graph) -> usize {
    g.faces()
        .map(|(f, _)| g.face_edges(f).map(|c| c.len()).unwrap_or(0))
        .sum()
}

pub struct Polygon {
    pub inner: FaceIdx,
    pub outer: FaceIdx,
    pub verts: Vec<VertIdx>,
    pub edges: Vec<EdgeIdx>,
}

/// A convex `n`-gon on the unit circle: the inner face owns `site`, the
/// outer face owns a far point site and bounds the twins in reverse order.
pub fn polygon(g: &mut Graph, n: usize, site: Site) -> Polygon {
    let inner_site = g.add_site(site);
    let outer_site = g.add_site(Site::point(100.0, 100.0));
    let inner = g.add_face(inner_site, FaceStatus::NonIncident).unwrap();
    let outer = g.add_face(outer_site, FaceStatus::NonIncident).unwrap();
    let verts: Vec<VertIdx> = (0..n)
        .map(|i| {
            let a = i as Real / n as Real * std::f64::consts::TAU;
            g.add_vertex(Point::new(a.cos(), a.sin()), VertexStatus::Out)
        })
        .collect();
    let edges: Vec<EdgeIdx> = (0..n)
        .map(|i| g.add_edge_pair(verts[i], verts[(i + 1) % n]).unwrap())
        .collect();
    g.close_face(inner, &edges).unwrap();
    let back: Vec<EdgeIdx> = edges.iter().rev().map(|&e| twin(e)).collect();
    g.close_face(outer, &back).unwrap();
    Polygon {
        inner,
        outer,
        verts,
        edges,
    }
}

/// Site index for a new point site.
pub fn point_site(g: &mut Graph, x: Real, y: Real) -> SiteIdx {
    g.add_site(Site::point(x, y))
}

pub fn line_site(x1: Real, y1: Real, x2: Real, y2: Real) -> Site {
    Site::line(Point::new(x1, y1), Point::new(x2, y2)).unwrap()
}

/// Circumcenter from the textbook determinant formula.
pub fn reference_circumcenter(a: Point, b: Point, c: Point) -> Point {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    let a2 = a.x * a.x + a.y * a.y;
    let b2 = b.x * b.x + b.y * b.y;
    let c2 = c.x * c.x + c.y * c.y;
    Point::new(
        (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
        (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
    )
}

pub fn assert_point_near(actual: Point, expected: Point, eps: Real, label: &str) {
    assert!(
        actual.distance(expected) <= eps,
        "{}: expected {}, got {} (distance {})",
        label,
        expected,
        actual,
        actual.distance(expected)
    );
}
