// Copyright 2025 Lars Brubaker
// License: MIT

use tracing::debug;

use super::{Solution, Solver};
use crate::config::Tolerance;
use crate::geom::circumcenter;
use crate::site::{Direction, Site};

/// Vertex of three point sites: the circumcenter, with the circumradius as
/// offset. Points have no sides, so directions are ignored.
#[derive(Clone, Debug, Default)]
pub struct PppSolver {
    tol: Tolerance,
    debug: bool,
}

impl PppSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(tol: Tolerance) -> Self {
        PppSolver { tol, debug: false }
    }
}

impl Solver for PppSolver {
    fn solve(
        &self,
        s1: &Site,
        _k1: Direction,
        s2: &Site,
        _k2: Direction,
        s3: &Site,
        _k3: Direction,
    ) -> Vec<Solution> {
        self.solve_unsigned(s1, s2, s3)
    }

    fn solve_unsigned(&self, s1: &Site, s2: &Site, s3: &Site) -> Vec<Solution> {
        let (a, b, c) = match (s1, s2, s3) {
            (Site::Point(a), Site::Point(b), Site::Point(c)) => (a.p, b.p, c.p),
            _ => return Vec::new(),
        };
        let solutions: Vec<Solution> = circumcenter(a, b, c, self.tol.singular)
            .map(|center| Solution::new(center, center.distance(a), Direction::Positive))
            .into_iter()
            .collect();
        if self.debug {
            debug!(solver = self.name(), roots = solutions.len(), "{a} {b} {c}");
        }
        solutions
    }

    fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    fn name(&self) -> &'static str {
        "ppp"
    }
}
