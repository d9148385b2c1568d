// Copyright 2025 Lars Brubaker
// License: MIT
//
// Half-edge graph of a Voronoi diagram.
//
// Design:
//   - INVALID: u32::MAX  (unset link)
//   - Vertices, half-edges, faces and sites live in Vec arenas addressed by
//     u32 handles. Nothing is ever removed, so handles stay valid.
//   - Half-edges are allocated in pairs: edges[i] and edges[i^1] are twins.
//     twin(e) = e ^ 1, which makes twin(twin(e)) == e hold by construction.
//   - Each half-edge bounds the face on its left; `next` is the following
//     edge counterclockwise around that face.
//   - Every face belongs to one generator site.

use tracing::{debug, warn};

use crate::bisector::{Bisector, EdgeType};
use crate::error::{Error, HandleKind, Result};
use crate::geom::{Point, Real};
use crate::site::{Direction, Site};

pub const INVALID: u32 = u32::MAX;

/// Index into Graph::verts
pub type VertIdx = u32;
/// Index into Graph::faces
pub type FaceIdx = u32;
/// Index into Graph::edges
pub type EdgeIdx = u32;
/// Index into Graph::sites
pub type SiteIdx = u32;

/// The oppositely directed half of an edge pair.
#[inline(always)]
pub fn twin(e: EdgeIdx) -> EdgeIdx {
    e ^ 1
}

/// Classification of a vertex during incremental insertion.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VertexStatus {
    /// Survives the current insertion.
    Out,
    /// Lies inside the region claimed by the new site and will be removed
    /// from the boundary.
    In,
    #[default]
    Undecided,
    /// Created during the current insertion.
    New,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VertexKind {
    /// One of the bounding-box vertices far outside the input.
    Outer,
    #[default]
    Normal,
    /// Position of a point generator.
    PointSite,
    /// Endpoint of a line or arc generator.
    Endpoint,
    /// Where a separator meets another edge.
    Separator,
    /// Apex of a parabolic edge.
    Apex,
    /// Splits an edge that would otherwise leave a face twice.
    Split,
}

/// INCIDENT faces touch one or more In-vertices; NONINCIDENT faces touch none.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FaceStatus {
    Incident,
    #[default]
    NonIncident,
}

#[derive(Clone, Debug)]
pub struct Vertex {
    pub position: Point,
    pub status: VertexStatus,
    pub kind: VertexKind,
    /// Clearance: distance from the vertex to its generators.
    pub offset: Real,
    out_edges: Vec<EdgeIdx>,
}

impl Vertex {
    fn new(position: Point, status: VertexStatus, kind: VertexKind, offset: Real) -> Self {
        Vertex {
            position,
            status,
            kind,
            offset,
            out_edges: Vec::new(),
        }
    }

    /// Half-edges whose source is this vertex, in insertion order.
    pub fn out_edges(&self) -> &[EdgeIdx] {
        &self.out_edges
    }
}

#[derive(Clone, Debug)]
pub struct HalfEdge {
    /// Source vertex.
    pub org: VertIdx,
    /// Next edge CCW around the left face.
    pub next: EdgeIdx,
    /// Left face.
    pub face: FaceIdx,
    /// Offset direction from the adjacent site.
    pub k: Direction,
    pub bisector: Bisector,
}

impl Default for HalfEdge {
    fn default() -> Self {
        Self {
            org: INVALID,
            next: INVALID,
            face: INVALID,
            k: Direction::Positive,
            bisector: Bisector::default(),
        }
    }
}

impl HalfEdge {
    pub fn kind(&self) -> EdgeType {
        self.bisector.kind
    }

    /// Derive the bisector of this edge from the two sites it separates.
    /// A pair of line sites gets the `k = +1` angle bisector; use
    /// [`Graph::set_edge_parameters`] to honor the directions stored on the
    /// edge pair.
    pub fn set_parameters(&mut self, s1: &Site, s2: &Site) -> Result<()> {
        self.bisector = Bisector::between(s1, s2)?;
        Ok(())
    }

    pub fn point(&self, t: Real) -> Result<Point> {
        self.bisector.point(t)
    }
}

#[derive(Clone, Debug)]
pub struct Face {
    /// One half-edge on the boundary, INVALID until a cycle is attached.
    pub edge: EdgeIdx,
    pub site: SiteIdx,
    pub status: FaceStatus,
}

/// The half-edge graph.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    sites: Vec<Site>,
    verts: Vec<Vertex>,
    edges: Vec<HalfEdge>,
    faces: Vec<Face>,
    debug: bool,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit `tracing::debug!` events for mutations.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    // ───────────────────────────── Element access ─────────────────────────────

    pub fn num_sites(&self) -> usize {
        self.sites.len()
    }

    pub fn num_vertices(&self) -> usize {
        self.verts.len()
    }

    /// Number of half-edges (twice the number of undirected edges).
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn site(&self, s: SiteIdx) -> Result<&Site> {
        self.sites
            .get(s as usize)
            .ok_or(Error::invalid_handle(HandleKind::Site, s))
    }

    pub fn vertex(&self, v: VertIdx) -> Result<&Vertex> {
        self.verts
            .get(v as usize)
            .ok_or(Error::invalid_handle(HandleKind::Vertex, v))
    }

    pub fn edge(&self, e: EdgeIdx) -> Result<&HalfEdge> {
        self.edges
            .get(e as usize)
            .ok_or(Error::invalid_handle(HandleKind::Edge, e))
    }

    pub fn face(&self, f: FaceIdx) -> Result<&Face> {
        self.faces
            .get(f as usize)
            .ok_or(Error::invalid_handle(HandleKind::Face, f))
    }

    pub fn vertices(&self) -> impl Iterator<Item = (VertIdx, &Vertex)> + '_ {
        self.verts.iter().enumerate().map(|(i, v)| (i as VertIdx, v))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeIdx, &HalfEdge)> + '_ {
        self.edges.iter().enumerate().map(|(i, e)| (i as EdgeIdx, e))
    }

    pub fn faces(&self) -> impl Iterator<Item = (FaceIdx, &Face)> + '_ {
        self.faces.iter().enumerate().map(|(i, f)| (i as FaceIdx, f))
    }

    fn vertex_mut(&mut self, v: VertIdx) -> Result<&mut Vertex> {
        self.verts
            .get_mut(v as usize)
            .ok_or(Error::invalid_handle(HandleKind::Vertex, v))
    }

    fn edge_mut(&mut self, e: EdgeIdx) -> Result<&mut HalfEdge> {
        self.edges
            .get_mut(e as usize)
            .ok_or(Error::invalid_handle(HandleKind::Edge, e))
    }

    fn face_mut(&mut self, f: FaceIdx) -> Result<&mut Face> {
        self.faces
            .get_mut(f as usize)
            .ok_or(Error::invalid_handle(HandleKind::Face, f))
    }

    // ─────────────────────────────── Navigation ───────────────────────────────

    /// Twin of `e`, checked against the arena.
    pub fn twin(&self, e: EdgeIdx) -> Result<EdgeIdx> {
        self.edge(e)?;
        Ok(twin(e))
    }

    pub fn next(&self, e: EdgeIdx) -> Result<EdgeIdx> {
        Ok(self.edge(e)?.next)
    }

    /// The edge whose `next` is `e`. Found among the edges entering the
    /// source of `e`, so the cost is the vertex degree.
    pub fn prev(&self, e: EdgeIdx) -> Result<EdgeIdx> {
        self.edge(e)?;
        self.find_prev(e)
            .ok_or_else(|| Error::topology(format!("edge {e} has no predecessor")))
    }

    fn find_prev(&self, e: EdgeIdx) -> Option<EdgeIdx> {
        let org = self.edges[e as usize].org;
        self.verts[org as usize]
            .out_edges
            .iter()
            .map(|&o| twin(o))
            .find(|&i| self.edges[i as usize].next == e)
    }

    /// True when following `next` from `e` comes back to `e`.
    fn on_closed_cycle(&self, e: EdgeIdx) -> bool {
        let mut cur = self.edges[e as usize].next;
        for _ in 0..self.edges.len() {
            match cur {
                INVALID => return false,
                c if c == e => return true,
                c => cur = self.edges[c as usize].next,
            }
        }
        false
    }

    pub fn source(&self, e: EdgeIdx) -> Result<VertIdx> {
        Ok(self.edge(e)?.org)
    }

    pub fn target(&self, e: EdgeIdx) -> Result<VertIdx> {
        self.edge(e)?;
        Ok(self.edges[twin(e) as usize].org)
    }

    pub fn face_of(&self, e: EdgeIdx) -> Result<FaceIdx> {
        Ok(self.edge(e)?.face)
    }

    pub fn face_site(&self, f: FaceIdx) -> Result<&Site> {
        self.site(self.face(f)?.site)
    }

    /// Edges around face `f`, starting at its representative edge. Empty for
    /// a face with no boundary attached yet.
    pub fn face_edges(&self, f: FaceIdx) -> Result<Vec<EdgeIdx>> {
        let start = self.face(f)?.edge;
        if start == INVALID {
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        let mut e = start;
        loop {
            out.push(e);
            e = self.edge(e)?.next;
            if e == start {
                return Ok(out);
            }
            if e == INVALID {
                return Err(Error::topology(format!("boundary of face {f} is open")));
            }
            if out.len() > self.edges.len() {
                return Err(Error::topology(format!(
                    "boundary of face {f} does not return to edge {start}"
                )));
            }
        }
    }

    /// Vertices around face `f` in boundary order.
    pub fn face_vertices(&self, f: FaceIdx) -> Result<Vec<VertIdx>> {
        Ok(self
            .face_edges(f)?
            .into_iter()
            .map(|e| self.edges[e as usize].org)
            .collect())
    }

    pub fn out_edges(&self, v: VertIdx) -> Result<&[EdgeIdx]> {
        Ok(self.vertex(v)?.out_edges())
    }

    pub fn in_edges(&self, v: VertIdx) -> Result<Vec<EdgeIdx>> {
        Ok(self.vertex(v)?.out_edges.iter().map(|&e| twin(e)).collect())
    }

    pub fn adjacent_vertices(&self, v: VertIdx) -> Result<Vec<VertIdx>> {
        Ok(self
            .vertex(v)?
            .out_edges
            .iter()
            .map(|&e| self.edges[twin(e) as usize].org)
            .collect())
    }

    /// Faces around `v`, each listed once.
    pub fn adjacent_faces(&self, v: VertIdx) -> Result<Vec<FaceIdx>> {
        let mut faces: Vec<FaceIdx> = Vec::new();
        for &e in &self.vertex(v)?.out_edges {
            for f in [self.edges[e as usize].face, self.edges[twin(e) as usize].face] {
                if f != INVALID && !faces.contains(&f) {
                    faces.push(f);
                }
            }
        }
        Ok(faces)
    }

    /// True when any vertex on the boundary of `f` has `status`. The caller
    /// decides what that means for the face's own status.
    pub fn face_touches_status(&self, f: FaceIdx, status: VertexStatus) -> Result<bool> {
        Ok(self
            .face_vertices(f)?
            .into_iter()
            .any(|v| self.verts[v as usize].status == status))
    }

    /// Point on the bisector of `e` at offset `t`.
    pub fn edge_point(&self, e: EdgeIdx, t: Real) -> Result<Point> {
        self.edge(e)?.point(t)
    }

    // ─────────────────────────────── Allocation ───────────────────────────────

    pub fn add_site(&mut self, site: Site) -> SiteIdx {
        let s = self.sites.len() as SiteIdx;
        self.sites.push(site);
        s
    }

    pub fn add_vertex(&mut self, position: Point, status: VertexStatus) -> VertIdx {
        self.add_vertex_with(position, status, VertexKind::Normal, 0.0)
    }

    pub fn add_vertex_with(
        &mut self,
        position: Point,
        status: VertexStatus,
        kind: VertexKind,
        offset: Real,
    ) -> VertIdx {
        let v = self.verts.len() as VertIdx;
        self.verts.push(Vertex::new(position, status, kind, offset));
        v
    }

    /// New face for `site` with no boundary yet.
    pub fn add_face(&mut self, site: SiteIdx, status: FaceStatus) -> Result<FaceIdx> {
        self.site(site)?;
        let f = self.faces.len() as FaceIdx;
        self.faces.push(Face {
            edge: INVALID,
            site,
            status,
        });
        Ok(f)
    }

    /// Allocate an edge pair. Returns `e: v1 -> v2`; `twin(e)` runs `v2 -> v1`.
    /// Neither half has a face or `next` link yet.
    pub fn add_edge_pair(&mut self, v1: VertIdx, v2: VertIdx) -> Result<EdgeIdx> {
        self.vertex(v1)?;
        self.vertex(v2)?;
        if v1 == v2 {
            return Err(self.reject(format!("edge pair from vertex {v1} to itself")));
        }
        Ok(self.make_edge_pair(v1, v2))
    }

    fn make_edge_pair(&mut self, v1: VertIdx, v2: VertIdx) -> EdgeIdx {
        let e = self.edges.len() as EdgeIdx;
        self.edges.push(HalfEdge {
            org: v1,
            ..HalfEdge::default()
        });
        self.edges.push(HalfEdge {
            org: v2,
            ..HalfEdge::default()
        });
        self.verts[v1 as usize].out_edges.push(e);
        self.verts[v2 as usize].out_edges.push(twin(e));
        e
    }

    fn reject(&self, msg: String) -> Error {
        warn!(%msg, "rejected graph mutation");
        Error::topology(msg)
    }

    // ──────────────────────────── Field updates ───────────────────────────────

    /// Link `n` after `e` while building a boundary by hand. Both edges must
    /// be free of faces, `n` must start where `e` ends, `e` must not already
    /// sit on a closed cycle, and `n` must not have another predecessor.
    pub fn set_next(&mut self, e: EdgeIdx, n: EdgeIdx) -> Result<()> {
        let target = self.target(e)?;
        let source = self.source(n)?;
        if target != source {
            return Err(self.reject(format!(
                "edge {n} starts at vertex {source}, not at the end {target} of edge {e}"
            )));
        }
        let (fe, fn_) = (self.edges[e as usize].face, self.edges[n as usize].face);
        if fe != INVALID || fn_ != INVALID {
            return Err(self.reject(format!(
                "edges {e} and {n} already bound faces ({fe} and {fn_})"
            )));
        }
        if self.on_closed_cycle(e) {
            return Err(self.reject(format!("edge {e} is already on a closed cycle")));
        }
        if let Some(p) = self.find_prev(n).filter(|&p| p != e) {
            return Err(self.reject(format!("edge {n} already follows edge {p}")));
        }
        self.edges[e as usize].next = n;
        Ok(())
    }

    /// Attach face `f` to the closed, faceless cycle through `e`. `f` must not
    /// have a boundary yet.
    pub fn set_face(&mut self, e: EdgeIdx, f: FaceIdx) -> Result<()> {
        self.edge(e)?;
        if self.face(f)?.edge != INVALID {
            return Err(self.reject(format!("face {f} already has a boundary")));
        }
        if !self.on_closed_cycle(e) {
            return Err(self.reject(format!("edge {e} is not on a closed cycle")));
        }
        let mut cycle = vec![e];
        let mut cur = self.edges[e as usize].next;
        while cur != e {
            cycle.push(cur);
            cur = self.edges[cur as usize].next;
        }
        if let Some(&taken) = cycle.iter().find(|&&c| self.edges[c as usize].face != INVALID) {
            return Err(self.reject(format!(
                "edge {taken} already bounds face {}",
                self.edges[taken as usize].face
            )));
        }
        for c in cycle {
            self.edges[c as usize].face = f;
        }
        self.faces[f as usize].edge = e;
        Ok(())
    }

    /// Move the representative edge of `f` to another edge of its boundary.
    pub fn set_face_edge(&mut self, f: FaceIdx, e: EdgeIdx) -> Result<()> {
        self.face(f)?;
        let owner = self.edge(e)?.face;
        if owner != f {
            return Err(self.reject(format!("edge {e} does not bound face {f}")));
        }
        self.faces[f as usize].edge = e;
        Ok(())
    }

    pub fn set_face_status(&mut self, f: FaceIdx, status: FaceStatus) -> Result<()> {
        self.face_mut(f)?.status = status;
        Ok(())
    }

    pub fn set_vertex_status(&mut self, v: VertIdx, status: VertexStatus) -> Result<()> {
        self.vertex_mut(v)?.status = status;
        Ok(())
    }

    pub fn set_edge_direction(&mut self, e: EdgeIdx, k: Direction) -> Result<()> {
        self.edge_mut(e)?.k = k;
        Ok(())
    }

    /// Compute the bisector of `e` and its twin from the sites of the two
    /// faces they bound. Both faces must be assigned. Between two line sites
    /// the direction of each half selects the offset side of its own face's
    /// line. Nothing is written unless both halves succeed.
    pub fn set_edge_parameters(&mut self, e: EdgeIdx) -> Result<()> {
        let f1 = self.face_of(e)?;
        let f2 = self.face_of(twin(e))?;
        if f1 == INVALID || f2 == INVALID {
            return Err(Error::topology(format!("edge {e} is not attached to two faces")));
        }
        let s1 = *self.face_site(f1)?;
        let s2 = *self.face_site(f2)?;
        let (k1, k2) = (self.edges[e as usize].k, self.edges[twin(e) as usize].k);
        let (forward, backward) = match (&s1, &s2) {
            (Site::Line(l1), Site::Line(l2)) => (
                Bisector::line_line(l1, k1, l2, k2)?,
                Bisector::line_line(l2, k2, l1, k1)?,
            ),
            _ => (Bisector::between(&s1, &s2)?, Bisector::between(&s2, &s1)?),
        };
        if self.debug {
            debug!(edge = e, faces = ?(f1, f2), "set bisector {forward}");
        }
        self.edges[e as usize].bisector = forward;
        self.edges[twin(e) as usize].bisector = backward;
        Ok(())
    }

    // ────────────────────────── Topology operations ───────────────────────────

    /// Link `edges` head-to-tail into one closed cycle bounding `f`.
    /// Rejected without any change if the edges do not chain up, if `f`
    /// already has a boundary, or if an edge is already taken: bounding a
    /// face, or linked from an edge outside the list.
    pub fn close_face(&mut self, f: FaceIdx, edges: &[EdgeIdx]) -> Result<()> {
        if self.face(f)?.edge != INVALID {
            return Err(self.reject(format!("face {f} already has a boundary")));
        }
        if edges.is_empty() {
            return Err(self.reject(format!("empty boundary for face {f}")));
        }
        for (i, &e) in edges.iter().enumerate() {
            let n = edges[(i + 1) % edges.len()];
            if edges[..i].contains(&e) {
                return Err(self.reject(format!("edge {e} appears twice on face {f}")));
            }
            let (target, source) = (self.target(e)?, self.source(n)?);
            if target != source {
                return Err(self.reject(format!(
                    "boundary of face {f} breaks between edge {e} and edge {n}"
                )));
            }
            let owner = self.edges[e as usize].face;
            if owner != INVALID {
                return Err(self.reject(format!("edge {e} already bounds face {owner}")));
            }
            if let Some(p) = self.find_prev(e).filter(|p| !edges.contains(p)) {
                return Err(self.reject(format!(
                    "edge {e} is linked from edge {p} outside the boundary of face {f}"
                )));
            }
        }
        for (i, &e) in edges.iter().enumerate() {
            let edge = &mut self.edges[e as usize];
            edge.next = edges[(i + 1) % edges.len()];
            edge.face = f;
        }
        self.faces[f as usize].edge = edges[0];
        Ok(())
    }

    /// Split face `f` by a new edge between two of its boundary vertices.
    ///
    /// The half-edge `v1 -> v2` stays on `f`; its twin bounds a new face for
    /// `site` with `status`. Only the `next` links of the two boundary edges
    /// entering `v1` and `v2` change. Returns the new `v1 -> v2` half-edge and
    /// the new face.
    pub fn split_face(
        &mut self,
        f: FaceIdx,
        v1: VertIdx,
        v2: VertIdx,
        site: SiteIdx,
        status: FaceStatus,
    ) -> Result<(EdgeIdx, FaceIdx)> {
        self.vertex(v1)?;
        self.vertex(v2)?;
        self.site(site)?;
        if v1 == v2 {
            return Err(self.reject(format!("cannot split face {f} at a single vertex {v1}")));
        }
        let boundary = self.face_edges(f)?;
        if boundary.is_empty() {
            return Err(self.reject(format!("face {f} has no boundary to split")));
        }
        let entering = |v: VertIdx| {
            boundary
                .iter()
                .copied()
                .find(|&e| self.edges[twin(e) as usize].org == v)
        };
        let (a_in, b_in) = match (entering(v1), entering(v2)) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                return Err(self.reject(format!(
                    "vertices {v1} and {v2} are not both on the boundary of face {f}"
                )))
            }
        };
        let a_out = self.edges[a_in as usize].next;
        let b_out = self.edges[b_in as usize].next;

        let e = self.make_edge_pair(v1, v2);
        let g = self.faces.len() as FaceIdx;
        self.faces.push(Face {
            edge: twin(e),
            site,
            status,
        });

        self.edges[a_in as usize].next = e;
        self.edges[e as usize].next = b_out;
        self.edges[b_in as usize].next = twin(e);
        self.edges[twin(e) as usize].next = a_out;

        self.edges[e as usize].face = f;
        self.faces[f as usize].edge = e;
        let mut cur = twin(e);
        loop {
            self.edges[cur as usize].face = g;
            cur = self.edges[cur as usize].next;
            if cur == twin(e) {
                break;
            }
        }
        if self.debug {
            debug!(face = f, new_face = g, edge = e, "split face between {v1} and {v2}");
        }
        Ok((e, g))
    }

    /// Insert a vertex at `position` on edge `e`. Afterwards `e` ends at the
    /// new vertex and a new pair continues to the old target; both pairs keep
    /// the faces, direction and bisector of the original edge.
    pub fn split_edge(&mut self, e: EdgeIdx, position: Point, status: VertexStatus) -> Result<VertIdx> {
        let w = self.target(e)?;
        let e_sym = twin(e);
        let e_next = self.edges[e as usize].next;
        let sym_prev = self.find_prev(e_sym);
        if sym_prev.is_none() && self.edges[e_sym as usize].face != INVALID {
            return Err(self.reject(format!(
                "edge {e_sym} bounds a face but has no predecessor"
            )));
        }

        let m = self.add_vertex_with(position, status, VertexKind::Split, 0.0);
        let n = self.edges.len() as EdgeIdx;
        let template = self.edges[e as usize].clone();
        let sym_template = self.edges[e_sym as usize].clone();
        self.edges.push(HalfEdge {
            org: m,
            // A spike turning back at w now turns back through the new pair.
            next: if e_next == e_sym { twin(n) } else { e_next },
            ..template
        });
        self.edges.push(HalfEdge {
            org: w,
            next: e_sym,
            ..sym_template
        });

        // e: u -> m, twin(e): m -> u
        self.edges[e as usize].next = n;
        self.edges[e_sym as usize].org = m;
        if let Some(p) = sym_prev.filter(|&p| p != e) {
            self.edges[p as usize].next = twin(n);
        }

        let w_out = &mut self.verts[w as usize].out_edges;
        if let Some(slot) = w_out.iter_mut().find(|o| **o == e_sym) {
            *slot = twin(n);
        }
        self.verts[m as usize].out_edges.extend([e_sym, n]);
        if self.debug {
            debug!(edge = e, vertex = m, "split edge at {position}");
        }
        Ok(m)
    }

    // ─────────────────────────────── Validation ───────────────────────────────

    /// Check the half-edge invariants: every edge has a valid source that
    /// lists it as an out-edge, `next` links chain head-to-tail within one
    /// face, and every face boundary is a closed cycle whose edges report
    /// that face.
    pub fn validate(&self) -> Result<()> {
        if self.edges.len() % 2 != 0 {
            return Err(Error::topology("unpaired half-edge"));
        }
        for (e, edge) in self.edges() {
            if twin(twin(e)) != e {
                return Err(Error::topology(format!("twin of twin of {e} is not {e}")));
            }
            let org = self.vertex(edge.org)?;
            if !org.out_edges.contains(&e) {
                return Err(Error::topology(format!(
                    "edge {e} missing from out-edges of vertex {}",
                    edge.org
                )));
            }
            if edge.next != INVALID {
                let next = self.edge(edge.next)?;
                if next.org != self.edges[twin(e) as usize].org {
                    return Err(Error::topology(format!(
                        "edge {} does not start where edge {e} ends",
                        edge.next
                    )));
                }
                if next.face != edge.face {
                    return Err(Error::topology(format!(
                        "edge {e} and its next {} bound different faces",
                        edge.next
                    )));
                }
            }
        }
        for (v, vertex) in self.vertices() {
            if let Some(&e) = vertex.out_edges.iter().find(|&&e| self.edges[e as usize].org != v) {
                return Err(Error::topology(format!("out-edge {e} of vertex {v} starts elsewhere")));
            }
        }
        for (f, _) in self.faces() {
            for e in self.face_edges(f)? {
                if self.edges[e as usize].face != f {
                    return Err(Error::topology(format!(
                        "edge {e} on the boundary of face {f} reports face {}",
                        self.edges[e as usize].face
                    )));
                }
            }
        }
        Ok(())
    }
}
