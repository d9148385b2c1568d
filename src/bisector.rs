// Copyright 2025 Lars Brubaker
// License: MIT
//
// Bisector curves between two adjacent sites.
//
// Every bisector between point and line generators is a member of one
// closed-form family, evaluated per axis at offset distance t:
//
//   x(t) = x0 - x1 - x2*t +/- x3 * sqrt( (x4 + x5*t)^2 - (x6 + x7*t)^2 )
//
// and likewise for y. Depending on the coefficients the curve is a line,
// a parabola, an ellipse or a hyperbola. Offset convention: a point at
// offset t from a line site satisfies a*x + b*y + c = k*t, so k = +1 is
// the line's positive (left) side.

use std::fmt;

use crate::config::Tolerance;
use crate::error::{Error, Result};
use crate::geom::{sq, Point, Real};
use crate::site::{Direction, LineSite, PointSite, Site};

/// Shape of a Voronoi edge.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeType {
    #[default]
    Line,
    Parabola,
    Ellipse,
    Hyperbola,
    /// Straight edge through a segment endpoint, normal to the segment.
    Separator,
    /// Edge lying on a line generator itself.
    LineSite,
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EdgeType::Line => "LINE",
            EdgeType::Parabola => "PARABOLA",
            EdgeType::Ellipse => "ELLIPSE",
            EdgeType::Hyperbola => "HYPERBOLA",
            EdgeType::Separator => "SEPARATOR",
            EdgeType::LineSite => "LINESITE",
        };
        f.write_str(name)
    }
}

/// Sign in front of the square-root term.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Branch {
    #[default]
    Plus,
    Minus,
}

impl Branch {
    #[inline]
    fn sign(self) -> Real {
        match self {
            Branch::Plus => 1.0,
            Branch::Minus => -1.0,
        }
    }
}

/// `constant + slope * t`
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct QuadTerm {
    pub constant: Real,
    pub slope: Real,
}

impl QuadTerm {
    pub const ZERO: QuadTerm = QuadTerm { constant: 0.0, slope: 0.0 };

    #[inline]
    pub const fn new(constant: Real, slope: Real) -> Self {
        QuadTerm { constant, slope }
    }

    #[inline]
    pub fn at(&self, t: Real) -> Real {
        self.constant + self.slope * t
    }
}

/// Coefficients of one coordinate axis.
///
/// `origin - origin_offset - linear_term*t +/- sqrt_scale * sqrt(minuend(t)^2 - subtrahend(t)^2)`
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AxisCoefficients {
    pub origin: Real,
    pub origin_offset: Real,
    pub linear_term: Real,
    pub sqrt_scale: Real,
    pub minuend: QuadTerm,
    pub subtrahend: QuadTerm,
}

impl AxisCoefficients {
    pub const ZERO: AxisCoefficients = AxisCoefficients {
        origin: 0.0,
        origin_offset: 0.0,
        linear_term: 0.0,
        sqrt_scale: 0.0,
        minuend: QuadTerm::ZERO,
        subtrahend: QuadTerm::ZERO,
    };

    /// Straight-line axis `origin - linear_term * t`; the square-root slots stay zero.
    pub fn linear(origin: Real, linear_term: Real) -> Self {
        AxisCoefficients {
            origin,
            linear_term,
            ..Self::ZERO
        }
    }

    /// Argument of the square root at `t`.
    #[inline]
    pub fn discriminant(&self, t: Real) -> Real {
        sq(self.minuend.at(t)) - sq(self.subtrahend.at(t))
    }

    /// Positional view `[x0, .., x7]`.
    pub fn to_array(&self) -> [Real; 8] {
        [
            self.origin,
            self.origin_offset,
            self.linear_term,
            self.sqrt_scale,
            self.minuend.constant,
            self.minuend.slope,
            self.subtrahend.constant,
            self.subtrahend.slope,
        ]
    }

    pub fn from_array(c: [Real; 8]) -> Self {
        AxisCoefficients {
            origin: c[0],
            origin_offset: c[1],
            linear_term: c[2],
            sqrt_scale: c[3],
            minuend: QuadTerm::new(c[4], c[5]),
            subtrahend: QuadTerm::new(c[6], c[7]),
        }
    }

    /// Evaluate with an already checked, non-negative discriminant.
    #[inline]
    fn eval(&self, t: Real, discriminant: Real, branch: Branch) -> Real {
        self.origin - self.origin_offset - self.linear_term * t
            + branch.sign() * self.sqrt_scale * discriminant.sqrt()
    }

    /// Smallest `t >= 0` at which the discriminant is non-negative.
    fn min_offset(&self, tol: Real) -> Option<Real> {
        if self.discriminant(0.0) >= -tol {
            return Some(0.0);
        }
        // D(t) = A t^2 + B t + C
        let (c1, s1) = (self.minuend.constant, self.minuend.slope);
        let (c2, s2) = (self.subtrahend.constant, self.subtrahend.slope);
        let qa = s1 * s1 - s2 * s2;
        let qb = 2.0 * (c1 * s1 - c2 * s2);
        let qc = c1 * c1 - c2 * c2;
        if qa.abs() <= tol {
            return if qb > tol { Some(-qc / qb) } else { None };
        }
        let disc = qb * qb - 4.0 * qa * qc;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let (r1, r2) = {
            let a = (-qb - root) / (2.0 * qa);
            let b = (-qb + root) / (2.0 * qa);
            if a <= b {
                (a, b)
            } else {
                (b, a)
            }
        };
        if qa > 0.0 {
            // D(0) < 0 puts 0 between the roots.
            Some(r2)
        } else if r1 > 0.0 {
            Some(r1)
        } else {
            None
        }
    }
}

/// The parameterized bisector carried by a Voronoi edge.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bisector {
    pub kind: EdgeType,
    pub x: AxisCoefficients,
    pub y: AxisCoefficients,
}

impl Bisector {
    /// Bisector between two adjacent sites, dispatched on their kinds.
    ///
    /// Line-line bisectors use `k1 = k2 = +1`; see [`Bisector::line_line`]
    /// to pick the other angle bisector. Any combination involving an arc
    /// site is rejected with [`Error::UnsupportedConfiguration`].
    pub fn between(s1: &Site, s2: &Site) -> Result<Self> {
        Self::between_with_tolerance(s1, s2, &Tolerance::DEFAULT)
    }

    pub fn between_with_tolerance(s1: &Site, s2: &Site, tol: &Tolerance) -> Result<Self> {
        match (s1, s2) {
            (Site::Point(p1), Site::Point(p2)) => Self::point_point(p1, p2),
            (Site::Point(p), Site::Line(l)) | (Site::Line(l), Site::Point(p)) => {
                Self::point_line_with_tolerance(p, l, tol)
            }
            (Site::Line(l1), Site::Line(l2)) => Self::line_line_with_tolerance(
                l1,
                Direction::Positive,
                l2,
                Direction::Positive,
                tol,
            ),
            _ => Err(Error::unsupported(&[s1.kind(), s2.kind()])),
        }
    }

    /// Perpendicular bisector of two points.
    ///
    /// `t` is the distance to both points; the curve exists for `t >= |p2 - p1| / 2`
    /// and the two branches run away from the midpoint in opposite directions.
    pub fn point_point(p1: &PointSite, p2: &PointSite) -> Result<Self> {
        let d = p2.position() - p1.position();
        let u = d
            .perp()
            .normalized()
            .ok_or_else(|| Error::degenerate(format!("coincident point sites at {}", p1.position())))?;
        let m = p1.position().midpoint(p2.position());
        let h = 0.5 * d.norm();
        let axis = |origin: Real, scale: Real| AxisCoefficients {
            origin,
            origin_offset: 0.0,
            linear_term: 0.0,
            sqrt_scale: scale,
            minuend: QuadTerm::new(0.0, 1.0),
            subtrahend: QuadTerm::new(h, 0.0),
        };
        Ok(Bisector {
            kind: EdgeType::Line,
            x: axis(m.x, u.x),
            y: axis(m.y, u.y),
        })
    }

    /// Parabola with focus `p` and directrix `l`.
    pub fn point_line(p: &PointSite, l: &LineSite) -> Result<Self> {
        Self::point_line_with_tolerance(p, l, &Tolerance::DEFAULT)
    }

    pub fn point_line_with_tolerance(p: &PointSite, l: &LineSite, tol: &Tolerance) -> Result<Self> {
        let alfa3 = l.a() * p.x() + l.b() * p.y() + l.c();
        if alfa3.abs() <= tol.singular {
            return Err(Error::degenerate(format!(
                "point site {} lies on its line site; use a separator",
                p.position()
            )));
        }
        // The bisector lies on the same side of the line as the point.
        let k = Direction::from_sign(alfa3).value();
        Ok(Bisector {
            kind: EdgeType::Parabola,
            x: AxisCoefficients {
                origin: p.x(),
                origin_offset: l.a() * alfa3,
                linear_term: -l.a() * k,
                sqrt_scale: l.b(),
                minuend: QuadTerm::new(0.0, 1.0),
                subtrahend: QuadTerm::new(alfa3, -k),
            },
            y: AxisCoefficients {
                origin: p.y(),
                origin_offset: l.b() * alfa3,
                linear_term: -l.b() * k,
                sqrt_scale: -l.a(),
                minuend: QuadTerm::new(0.0, 1.0),
                subtrahend: QuadTerm::new(alfa3, -k),
            },
        })
    }

    /// Bisector of two lines, each offset toward side `k1` / `k2`.
    pub fn line_line(l1: &LineSite, k1: Direction, l2: &LineSite, k2: Direction) -> Result<Self> {
        Self::line_line_with_tolerance(l1, k1, l2, k2, &Tolerance::DEFAULT)
    }

    pub fn line_line_with_tolerance(
        l1: &LineSite,
        k1: Direction,
        l2: &LineSite,
        k2: Direction,
        tol: &Tolerance,
    ) -> Result<Self> {
        let delta = l1.a() * l2.b() - l1.b() * l2.a();
        if delta.abs() <= tol.parallel {
            return Err(Error::degenerate(format!(
                "parallel line sites (delta = {delta})"
            )));
        }
        let (k1, k2) = (k1.value(), k2.value());
        Ok(Bisector {
            kind: EdgeType::Line,
            x: AxisCoefficients::linear(
                (l1.b() * l2.c() - l2.b() * l1.c()) / delta,
                (l1.b() * k2 - l2.b() * k1) / delta,
            ),
            y: AxisCoefficients::linear(
                (l2.a() * l1.c() - l1.a() * l2.c()) / delta,
                (l2.a() * k1 - l1.a() * k2) / delta,
            ),
        })
    }

    /// Straight edge leaving segment endpoint `p` along the normal of `l`,
    /// toward side `k`.
    pub fn separator(p: &PointSite, l: &LineSite, k: Direction) -> Self {
        let k = k.value();
        Bisector {
            kind: EdgeType::Separator,
            x: AxisCoefficients::linear(p.x(), -k * l.a()),
            y: AxisCoefficients::linear(p.y(), -k * l.b()),
        }
    }

    /// Edge lying on the generator segment; its position does not depend on `t`.
    pub fn line_site(l: &LineSite) -> Self {
        Bisector {
            kind: EdgeType::LineSite,
            x: AxisCoefficients::linear(l.start.x, 0.0),
            y: AxisCoefficients::linear(l.start.y, 0.0),
        }
    }

    /// Square-root arguments of the x and y axes at `t`.
    pub fn discriminants(&self, t: Real) -> (Real, Real) {
        (self.x.discriminant(t), self.y.discriminant(t))
    }

    /// Point on the `+` branch at offset `t`.
    pub fn point(&self, t: Real) -> Result<Point> {
        self.point_on_branch(t, Branch::Plus)
    }

    pub fn point_on_branch(&self, t: Real, branch: Branch) -> Result<Point> {
        self.point_with_tolerance(t, branch, &Tolerance::DEFAULT)
    }

    pub fn point_with_tolerance(&self, t: Real, branch: Branch, tol: &Tolerance) -> Result<Point> {
        let (dx, dy) = self.discriminants(t);
        let worst = dx.min(dy);
        if !(worst >= -tol.discriminant) {
            return Err(Error::Domain {
                t,
                discriminant: worst,
            });
        }
        Ok(Point::new(
            self.x.eval(t, dx.max(0.0), branch),
            self.y.eval(t, dy.max(0.0), branch),
        ))
    }

    /// Smallest non-negative offset at which the curve exists. For a
    /// parabola this is the apex, for a point-point bisector the midpoint.
    pub fn min_offset(&self) -> Option<Real> {
        let tol = Tolerance::DEFAULT.discriminant;
        let t = self.x.min_offset(tol)?.max(self.y.min_offset(tol)?);
        let (dx, dy) = self.discriminants(t);
        (dx.min(dy) >= -tol).then_some(t)
    }

    /// Positional coefficient view `([x0..x7], [y0..y7])`.
    pub fn coefficients(&self) -> ([Real; 8], [Real; 8]) {
        (self.x.to_array(), self.y.to_array())
    }
}

impl fmt::Display for Bisector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.coefficients();
        write!(f, "{} x-params: [", self.kind)?;
        for (i, v) in x.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("] y-params: [")?;
        for (i, v) in y.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]")
    }
}
