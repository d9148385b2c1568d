// Copyright 2025 Lars Brubaker
// License: MIT
//
// Generator sites. A site is a closed set of variants; the bisector and
// solver code dispatches by matching on it.

use std::fmt;

use crate::error::{Error, Result};
use crate::geom::{Point, Real};

/// Classification of a site, used to select derivations and solvers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SiteKind {
    Point,
    Line,
    Arc,
}

impl fmt::Display for SiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SiteKind::Point => "point",
            SiteKind::Line => "line",
            SiteKind::Arc => "arc",
        };
        f.write_str(name)
    }
}

/// Offset direction `k`: which side of a generator an edge or vertex lies on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Positive,
    Negative,
}

impl Direction {
    /// `+1.0` or `-1.0`.
    #[inline]
    pub fn value(self) -> Real {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }

    /// Direction with the sign of `v`. Zero maps to `Positive`.
    #[inline]
    pub fn from_sign(v: Real) -> Self {
        if v < 0.0 {
            Direction::Negative
        } else {
            Direction::Positive
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointSite {
    pub p: Point,
}

impl PointSite {
    pub fn new(x: Real, y: Real) -> Self {
        PointSite { p: Point::new(x, y) }
    }

    #[inline]
    pub fn x(&self) -> Real {
        self.p.x
    }

    #[inline]
    pub fn y(&self) -> Real {
        self.p.y
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.p
    }
}

/// A line segment, stored with the normalized implicit equation
/// `a*x + b*y + c = 0`, `a^2 + b^2 = 1`. The unit normal `(a, b)` is the left
/// normal of `start -> end`, so the positive side lies to the left.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineSite {
    pub start: Point,
    pub end: Point,
    a: Real,
    b: Real,
    c: Real,
}

impl LineSite {
    pub fn new(start: Point, end: Point) -> Result<Self> {
        let dir = (end - start)
            .normalized()
            .ok_or_else(|| Error::degenerate(format!("zero-length line site at {start}")))?;
        let n = dir.perp();
        Ok(LineSite {
            start,
            end,
            a: n.x,
            b: n.y,
            c: -(n.x * start.x + n.y * start.y),
        })
    }

    /// Infinite line from raw coefficients, normalized so that `a^2 + b^2 = 1`.
    /// `start` is the foot of the origin, `end` one unit along the line.
    pub fn from_coefficients(a: Real, b: Real, c: Real) -> Result<Self> {
        let len = (a * a + b * b).sqrt();
        if len == 0.0 || !len.is_finite() || !c.is_finite() {
            return Err(Error::degenerate(format!(
                "line coefficients ({a}, {b}, {c}) have no normal"
            )));
        }
        let (a, b, c) = (a / len, b / len, c / len);
        let start = Point::new(-a * c, -b * c);
        // Left normal of (b, -a) is (a, b).
        let end = start + Point::new(b, -a);
        Ok(LineSite { start, end, a, b, c })
    }

    #[inline]
    pub fn a(&self) -> Real {
        self.a
    }

    #[inline]
    pub fn b(&self) -> Real {
        self.b
    }

    #[inline]
    pub fn c(&self) -> Real {
        self.c
    }

    #[inline]
    pub fn normal(&self) -> Point {
        Point::new(self.a, self.b)
    }

    /// Signed distance of `p` from the line; positive on the left side.
    #[inline]
    pub fn signed_distance(&self, p: Point) -> Real {
        self.a * p.x + self.b * p.y + self.c
    }
}

/// A circular arc from `start` to `end` around `center`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArcSite {
    pub start: Point,
    pub end: Point,
    pub center: Point,
    pub ccw: bool,
}

impl ArcSite {
    pub fn new(start: Point, end: Point, center: Point, ccw: bool) -> Result<Self> {
        let r1 = start.distance(center);
        let r2 = end.distance(center);
        if r1 == 0.0 || r2 == 0.0 {
            return Err(Error::degenerate("arc with zero radius"));
        }
        Ok(ArcSite { start, end, center, ccw })
    }

    pub fn radius(&self) -> Real {
        self.start.distance(self.center)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Site {
    Point(PointSite),
    Line(LineSite),
    Arc(ArcSite),
}

impl Site {
    pub fn point(x: Real, y: Real) -> Self {
        Site::Point(PointSite::new(x, y))
    }

    pub fn line(start: Point, end: Point) -> Result<Self> {
        LineSite::new(start, end).map(Site::Line)
    }

    pub fn arc(start: Point, end: Point, center: Point, ccw: bool) -> Result<Self> {
        ArcSite::new(start, end, center, ccw).map(Site::Arc)
    }

    pub fn kind(&self) -> SiteKind {
        match self {
            Site::Point(_) => SiteKind::Point,
            Site::Line(_) => SiteKind::Line,
            Site::Arc(_) => SiteKind::Arc,
        }
    }

    #[inline]
    pub fn is_point(&self) -> bool {
        matches!(self, Site::Point(_))
    }

    #[inline]
    pub fn is_line(&self) -> bool {
        matches!(self, Site::Line(_))
    }

    #[inline]
    pub fn is_arc(&self) -> bool {
        matches!(self, Site::Arc(_))
    }

    pub fn x(&self) -> Option<Real> {
        match self {
            Site::Point(p) => Some(p.x()),
            _ => None,
        }
    }

    pub fn y(&self) -> Option<Real> {
        match self {
            Site::Point(p) => Some(p.y()),
            _ => None,
        }
    }

    pub fn a(&self) -> Option<Real> {
        match self {
            Site::Line(l) => Some(l.a()),
            _ => None,
        }
    }

    pub fn b(&self) -> Option<Real> {
        match self {
            Site::Line(l) => Some(l.b()),
            _ => None,
        }
    }

    pub fn c(&self) -> Option<Real> {
        match self {
            Site::Line(l) => Some(l.c()),
            _ => None,
        }
    }

    /// Distance from `p` to the site's carrier (point, infinite line or full circle).
    pub fn distance_to(&self, p: Point) -> Real {
        match self {
            Site::Point(s) => s.p.distance(p),
            Site::Line(l) => l.signed_distance(p).abs(),
            Site::Arc(a) => (a.center.distance(p) - a.radius()).abs(),
        }
    }
}

impl From<PointSite> for Site {
    fn from(p: PointSite) -> Self {
        Site::Point(p)
    }
}

impl From<LineSite> for Site {
    fn from(l: LineSite) -> Self {
        Site::Line(l)
    }
}

impl From<ArcSite> for Site {
    fn from(a: ArcSite) -> Self {
        Site::Arc(a)
    }
}
