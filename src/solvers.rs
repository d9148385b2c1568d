// Copyright 2025 Lars Brubaker
// License: MIT
//
// Vertex-position solvers. Given three generator sites adjacent to a
// prospective Voronoi vertex, a solver returns every candidate position
// (with its clearance) where the three offset curves meet. Solvers report
// all algebraic roots; deciding which candidate is a real vertex is left to
// the caller.

mod lll;
mod ppp;
mod qll;

pub use lll::LllSolver;
pub use ppp::PppSolver;
pub use qll::QllSolver;

use std::collections::HashMap;

use crate::config::Tolerance;
use crate::error::{Error, Result};
use crate::geom::{Point, Real};
use crate::site::{Direction, Site, SiteKind};

/// A candidate vertex.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Solution {
    pub point: Point,
    /// Clearance `t` of the candidate. May be negative; solvers do not filter.
    pub offset: Real,
    /// Offset direction of the third site.
    pub k3: Direction,
}

impl Solution {
    pub fn new(point: Point, offset: Real, k3: Direction) -> Self {
        Solution { point, offset, k3 }
    }
}

/// Classification of a site triple, sorted so that the order in which the
/// sites are passed does not matter.
pub type TripleKey = [SiteKind; 3];

pub fn triple_key(s1: &Site, s2: &Site, s3: &Site) -> TripleKey {
    let mut key = [s1.kind(), s2.kind(), s3.kind()];
    key.sort();
    key
}

/// A vertex solver for one family of site triples.
///
/// The default bodies return no solutions, meaning "no vertex here".
pub trait Solver {
    /// Solve with an offset direction for each site.
    fn solve(
        &self,
        _s1: &Site,
        _k1: Direction,
        _s2: &Site,
        _k2: Direction,
        _s3: &Site,
        _k3: Direction,
    ) -> Vec<Solution> {
        Vec::new()
    }

    /// Solve without directions; only meaningful where no site has sides.
    fn solve_unsigned(&self, _s1: &Site, _s2: &Site, _s3: &Site) -> Vec<Solution> {
        Vec::new()
    }

    /// Select a solver variant. Ignored by solvers that have only one.
    fn set_type(&mut self, _solver_type: i32) {}

    fn set_debug(&mut self, debug: bool);

    fn name(&self) -> &'static str;
}

/// Solvers keyed by the classification of the site triple they handle.
pub struct SolverRegistry {
    solvers: HashMap<TripleKey, Box<dyn Solver>>,
}

impl SolverRegistry {
    /// A registry with no solvers.
    pub fn empty() -> Self {
        SolverRegistry {
            solvers: HashMap::new(),
        }
    }

    /// PPP, PPL, PLL and LLL solvers sharing `tol`.
    pub fn with_tolerance(tol: Tolerance) -> Self {
        use SiteKind::{Line, Point};
        let mut reg = Self::empty();
        reg.register([Point, Point, Point], Box::new(PppSolver::with_tolerance(tol)));
        reg.register([Point, Point, Line], Box::new(QllSolver::with_tolerance(tol)));
        reg.register([Point, Line, Line], Box::new(QllSolver::with_tolerance(tol)));
        reg.register([Line, Line, Line], Box::new(LllSolver::with_tolerance(tol)));
        reg
    }

    /// Register `solver` for `kinds` (in any order), returning the solver it
    /// replaces.
    pub fn register(&mut self, mut kinds: TripleKey, solver: Box<dyn Solver>) -> Option<Box<dyn Solver>> {
        kinds.sort();
        self.solvers.insert(kinds, solver)
    }

    pub fn contains(&self, mut kinds: TripleKey) -> bool {
        kinds.sort();
        self.solvers.contains_key(&kinds)
    }

    pub fn len(&self) -> usize {
        self.solvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solvers.is_empty()
    }

    /// The solver for this site triple.
    pub fn get(&self, s1: &Site, s2: &Site, s3: &Site) -> Result<&dyn Solver> {
        let key = triple_key(s1, s2, s3);
        self.solvers
            .get(&key)
            .map(|s| s.as_ref())
            .ok_or_else(|| Error::unsupported(&key))
    }

    pub fn get_mut(&mut self, mut kinds: TripleKey) -> Option<&mut (dyn Solver + 'static)> {
        kinds.sort();
        self.solvers.get_mut(&kinds).map(|s| s.as_mut())
    }

    pub fn solve(
        &self,
        s1: &Site,
        k1: Direction,
        s2: &Site,
        k2: Direction,
        s3: &Site,
        k3: Direction,
    ) -> Result<Vec<Solution>> {
        Ok(self.get(s1, s2, s3)?.solve(s1, k1, s2, k2, s3, k3))
    }

    pub fn solve_unsigned(&self, s1: &Site, s2: &Site, s3: &Site) -> Result<Vec<Solution>> {
        Ok(self.get(s1, s2, s3)?.solve_unsigned(s1, s2, s3))
    }

    /// Turn debug output on or off for every registered solver.
    pub fn set_debug(&mut self, debug: bool) {
        for solver in self.solvers.values_mut() {
            solver.set_debug(debug);
        }
    }
}

impl Default for SolverRegistry {
    fn default() -> Self {
        Self::with_tolerance(Tolerance::default())
    }
}
