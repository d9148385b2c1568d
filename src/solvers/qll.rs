// Copyright 2025 Lars Brubaker
// License: MIT
//
// Mixed point/line triples (PPL and PLL).
//
// Unknowns are u = (x, y, t). Every line site gives a linear equation
//     a*x + b*y - k*t = -c
// and every point site a quadratic one
//     (x - px)^2 + (y - py)^2 - t^2 = 0.
// Subtracting the quadratic equations of two points cancels the squares:
//     2(qx - px)*x + 2(qy - py)*y = |q|^2 - |p|^2.
// Two linear rows cut out a line u = p0 + s*d in (x, y, t); substituting it
// into the remaining point equation leaves a quadratic in s.

use tracing::debug;

use super::{Solution, Solver};
use crate::config::Tolerance;
use crate::geom::{solve_2x2, Point, Real};
use crate::site::{Direction, LineSite, PointSite, Site};

type Vec3 = [Real; 3];

fn dot(u: Vec3, v: Vec3) -> Real {
    u[0] * v[0] + u[1] * v[1] + u[2] * v[2]
}

fn cross(u: Vec3, v: Vec3) -> Vec3 {
    [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ]
}

/// One linear equation `row . u = rhs`.
#[derive(Copy, Clone, Debug)]
struct Row {
    row: Vec3,
    rhs: Real,
}

impl Row {
    fn line(l: &LineSite, k: Direction) -> Self {
        Row {
            row: [l.a(), l.b(), -k.value()],
            rhs: -l.c(),
        }
    }

    fn point_difference(p: &PointSite, q: &PointSite) -> Self {
        Row {
            row: [2.0 * (q.x() - p.x()), 2.0 * (q.y() - p.y()), 0.0],
            rhs: q.p.norm_sq() - p.p.norm_sq(),
        }
    }
}

/// Solver for triples with one or two point sites and the rest line sites.
///
/// `set_type(i)` chooses which point site (by position among the points)
/// carries the quadratic equation. Any choice yields the same vertices up to
/// rounding.
#[derive(Clone, Debug, Default)]
pub struct QllSolver {
    tol: Tolerance,
    quadratic_point: usize,
    debug: bool,
}

impl QllSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(tol: Tolerance) -> Self {
        QllSolver {
            tol,
            quadratic_point: 0,
            debug: false,
        }
    }

    /// Split the two linear rows and the point for the quadratic equation
    /// out of the triple. `None` unless it has both points and lines only.
    fn equations(&self, sites: [(&Site, Direction); 3]) -> Option<(Row, Row, PointSite)> {
        let mut points = Vec::with_capacity(2);
        let mut lines = Vec::with_capacity(2);
        for (site, k) in sites {
            match site {
                Site::Point(p) => points.push(*p),
                Site::Line(l) => lines.push(Row::line(l, k)),
                Site::Arc(_) => return None,
            }
        }
        match (points.len(), lines.len()) {
            (1, 2) => Some((lines[0], lines[1], points[0])),
            (2, 1) => {
                let q = points[self.quadratic_point % 2];
                let other = points[(self.quadratic_point + 1) % 2];
                Some((lines[0], Row::point_difference(&q, &other), q))
            }
            _ => None,
        }
    }

    fn solve_equations(&self, r1: Row, r2: Row, q: PointSite) -> Vec<Vec3> {
        // Direction of the solution line; zero when the rows are dependent.
        let d = cross(r1.row, r2.row);
        let d_len = dot(d, d).sqrt();
        if d_len <= self.tol.singular {
            return Vec::new();
        }
        let d = [d[0] / d_len, d[1] / d_len, d[2] / d_len];

        // Least-norm particular solution p0 = A^T (A A^T)^-1 rhs.
        let (g11, g12, g22) = (dot(r1.row, r1.row), dot(r1.row, r2.row), dot(r2.row, r2.row));
        let Some((alpha, beta)) = solve_2x2(g11, g12, g12, g22, r1.rhs, r2.rhs, self.tol.singular)
        else {
            return Vec::new();
        };
        let p0 = [
            alpha * r1.row[0] + beta * r2.row[0],
            alpha * r1.row[1] + beta * r2.row[1],
            alpha * r1.row[2] + beta * r2.row[2],
        ];

        // (x - qx)^2 + (y - qy)^2 - t^2 along u = p0 + s*d.
        let w = [p0[0] - q.x(), p0[1] - q.y(), p0[2]];
        let qa = d[0] * d[0] + d[1] * d[1] - d[2] * d[2];
        let qb = 2.0 * (w[0] * d[0] + w[1] * d[1] - w[2] * d[2]);
        let qc = w[0] * w[0] + w[1] * w[1] - w[2] * w[2];

        let eps = self.tol.discriminant;
        let roots: Vec<Real> = if qa.abs() <= eps {
            // The solution line is parallel to the cone's surface.
            if qb.abs() <= eps {
                Vec::new()
            } else {
                vec![-qc / qb]
            }
        } else {
            let disc = qb * qb - 4.0 * qa * qc;
            let scale = qb * qb + (4.0 * qa * qc).abs();
            if disc.abs() <= eps * scale {
                vec![-qb / (2.0 * qa)]
            } else if disc < 0.0 {
                Vec::new()
            } else {
                let h = -0.5 * (qb + qb.signum() * disc.sqrt());
                vec![h / qa, qc / h]
            }
        };
        if self.debug {
            debug!(solver = self.name(), qa, qb, qc, roots = roots.len(), "quadratic along solution line");
        }
        roots
            .into_iter()
            .map(|s| [p0[0] + s * d[0], p0[1] + s * d[1], p0[2] + s * d[2]])
            .collect()
    }
}

impl Solver for QllSolver {
    fn solve(
        &self,
        s1: &Site,
        k1: Direction,
        s2: &Site,
        k2: Direction,
        s3: &Site,
        k3: Direction,
    ) -> Vec<Solution> {
        let Some((r1, r2, q)) = self.equations([(s1, k1), (s2, k2), (s3, k3)]) else {
            return Vec::new();
        };
        self.solve_equations(r1, r2, q)
            .into_iter()
            .map(|[x, y, t]| Solution::new(Point::new(x, y), t, k3))
            .collect()
    }

    /// `0` or `1`: index of the point site that carries the quadratic
    /// equation. Other values wrap around.
    fn set_type(&mut self, solver_type: i32) {
        self.quadratic_point = solver_type.rem_euclid(2) as usize;
    }

    fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    fn name(&self) -> &'static str {
        "qll"
    }
}
