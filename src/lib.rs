// offset-voronoi: half-edge core of an incremental planar Voronoi diagram
// Copyright 2025 Lars Brubaker
// License: MIT

//! Data model and geometric kernels for building a Voronoi diagram of
//! point, line-segment and arc sites one site at a time.
//!
//! - [`graph::Graph`] stores faces, paired half-edges and vertices in arenas.
//! - [`bisector::Bisector`] parameterizes every edge by offset distance `t`.
//! - [`solvers::SolverRegistry`] finds candidate vertices for a site triple.
//!
//! The insertion driver that decides where to split faces is not part of
//! this crate; it consumes these pieces.

pub mod bisector;
pub mod config;
pub mod error;
pub mod geom;
pub mod graph;
pub mod site;
pub mod solvers;

pub use bisector::{AxisCoefficients, Bisector, Branch, EdgeType};
pub use config::Tolerance;
pub use error::{Error, HandleKind, Result};
pub use geom::{Point, Real};
pub use graph::{
    twin, EdgeIdx, Face, FaceIdx, FaceStatus, Graph, HalfEdge, SiteIdx, VertIdx, Vertex,
    VertexKind, VertexStatus, INVALID,
};
pub use site::{ArcSite, Direction, LineSite, PointSite, Site, SiteKind};
pub use solvers::{LllSolver, PppSolver, QllSolver, Solution, Solver, SolverRegistry, TripleKey};
