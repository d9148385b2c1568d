// Copyright 2025 Lars Brubaker
// License: MIT

use tracing::debug;

use super::{Solution, Solver};
use crate::config::Tolerance;
use crate::geom::{solve_3x3, Point};
use crate::site::{Direction, Site};

/// Vertex of three line sites. Each line contributes `a*x + b*y + c = k*t`,
/// giving a 3x3 linear system in `(x, y, t)`.
#[derive(Clone, Debug, Default)]
pub struct LllSolver {
    tol: Tolerance,
    debug: bool,
}

impl LllSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(tol: Tolerance) -> Self {
        LllSolver { tol, debug: false }
    }
}

impl Solver for LllSolver {
    fn solve(
        &self,
        s1: &Site,
        k1: Direction,
        s2: &Site,
        k2: Direction,
        s3: &Site,
        k3: Direction,
    ) -> Vec<Solution> {
        let mut rows = [[0.0; 4]; 3];
        for (row, (site, k)) in rows.iter_mut().zip([(s1, k1), (s2, k2), (s3, k3)]) {
            let Site::Line(l) = site else {
                return Vec::new();
            };
            *row = [l.a(), l.b(), -k.value(), -l.c()];
        }
        let solutions: Vec<Solution> = solve_3x3(&rows, self.tol.singular)
            .map(|[x, y, t]| Solution::new(Point::new(x, y), t, k3))
            .into_iter()
            .collect();
        if self.debug {
            debug!(solver = self.name(), roots = solutions.len(), "{rows:?}");
        }
        solutions
    }

    fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    fn name(&self) -> &'static str {
        "lll"
    }
}
