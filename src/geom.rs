// Copyright 2025 Lars Brubaker
// License: MIT
//
// Planar point type and the small geometric predicates shared by the
// bisector derivations, the graph and the vertex solvers.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

pub type Real = f64;

/// A position in the plane.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: Real,
    pub y: Real,
}

impl Point {
    #[inline]
    pub const fn new(x: Real, y: Real) -> Self {
        Point { x, y }
    }

    #[inline]
    pub fn dot(self, other: Point) -> Real {
        self.x * other.x + self.y * other.y
    }

    /// z-component of the 3D cross product (self, 0) x (other, 0).
    #[inline]
    pub fn cross(self, other: Point) -> Real {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn norm_sq(self) -> Real {
        self.dot(self)
    }

    #[inline]
    pub fn norm(self) -> Real {
        self.norm_sq().sqrt()
    }

    /// Rotate by +90 degrees. For a direction vector this is its left normal.
    #[inline]
    pub fn perp(self) -> Point {
        Point::new(-self.y, self.x)
    }

    pub fn normalized(self) -> Option<Point> {
        let n = self.norm();
        if n > 0.0 && n.is_finite() {
            Some(Point::new(self.x / n, self.y / n))
        } else {
            None
        }
    }

    #[inline]
    pub fn distance(self, other: Point) -> Real {
        (self - other).norm()
    }

    #[inline]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new(
            real_interpolate(1.0, self.x, 1.0, other.x),
            real_interpolate(1.0, self.y, 1.0, other.y),
        )
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<Real> for Point {
    type Output = Point;
    #[inline]
    fn mul(self, rhs: Real) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[inline]
pub fn sq(x: Real) -> Real {
    x * x
}

/// Twice the signed area of triangle (u, v, w). Positive when CCW.
#[inline]
pub fn orient(u: Point, v: Point, w: Point) -> Real {
    u.x * (v.y - w.y) + v.x * (w.y - u.y) + w.x * (u.y - v.y)
}

/// Returns true if (u, v, w) are in CCW (counter-clockwise) order.
#[inline]
pub fn is_ccw(u: Point, v: Point, w: Point) -> bool {
    orient(u, v, w) >= 0.0
}

/// Numerically stable interpolation: returns (b*x + a*y) / (a + b),
/// or (x + y) / 2 if a == b == 0. Negative weights are clamped to zero.
/// Guarantees MIN(x,y) <= result <= MAX(x,y).
#[inline]
pub fn real_interpolate(mut a: Real, x: Real, mut b: Real, y: Real) -> Real {
    if a < 0.0 {
        a = 0.0;
    }
    if b < 0.0 {
        b = 0.0;
    }
    if a <= b {
        if b == 0.0 {
            x / 2.0 + y / 2.0
        } else {
            x + (y - x) * (a / (a + b))
        }
    } else {
        y + (x - y) * (b / (a + b))
    }
}

/// Circumcenter of the triangle (a, b, c), or `None` when the points are
/// collinear within `tolerance` (relative to the triangle's scale).
pub fn circumcenter(a: Point, b: Point, c: Point, tolerance: Real) -> Option<Point> {
    // Translate to `a` to keep the determinant well conditioned.
    let ab = b - a;
    let ac = c - a;
    let d = 2.0 * ab.cross(ac);
    let scale = ab.norm_sq().max(ac.norm_sq());
    if scale == 0.0 || d.abs() <= tolerance * scale {
        return None;
    }
    let ab2 = ab.norm_sq();
    let ac2 = ac.norm_sq();
    let ux = (ac.y * ab2 - ab.y * ac2) / d;
    let uy = (ab.x * ac2 - ac.x * ab2) / d;
    Some(Point::new(a.x + ux, a.y + uy))
}

/// Solve the 2x2 system [a b; c d] [x; y] = [e; f].
pub fn solve_2x2(a: Real, b: Real, c: Real, d: Real, e: Real, f: Real, tolerance: Real) -> Option<(Real, Real)> {
    let det = a * d - b * c;
    if det.abs() <= tolerance {
        return None;
    }
    Some(((e * d - b * f) / det, (a * f - e * c) / det))
}

/// Solve a 3x3 linear system by Cramer's rule. Rows are `[m0, m1, m2 | rhs]`.
pub fn solve_3x3(rows: &[[Real; 4]; 3], tolerance: Real) -> Option<[Real; 3]> {
    let det3 = |c0: usize, c1: usize, c2: usize| -> Real {
        rows[0][c0] * (rows[1][c1] * rows[2][c2] - rows[1][c2] * rows[2][c1])
            - rows[0][c1] * (rows[1][c0] * rows[2][c2] - rows[1][c2] * rows[2][c0])
            + rows[0][c2] * (rows[1][c0] * rows[2][c1] - rows[1][c1] * rows[2][c0])
    };
    let det = det3(0, 1, 2);
    if det.abs() <= tolerance {
        return None;
    }
    Some([det3(3, 1, 2) / det, det3(0, 3, 2) / det, det3(0, 1, 3) / det])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn orient_basic() {
        let o = Point::new(0.0, 0.0);
        assert!(is_ccw(o, Point::new(1.0, 0.0), Point::new(0.5, 1.0)));
        assert!(!is_ccw(o, Point::new(0.5, 1.0), Point::new(1.0, 0.0)));
        assert_eq!(orient(o, Point::new(1.0, 1.0), Point::new(2.0, 2.0)), 0.0);
    }

    #[test]
    fn perp_is_left_normal() {
        let d = Point::new(1.0, 0.0);
        assert_eq!(d.perp(), Point::new(0.0, 1.0));
        assert_eq!(d.cross(d.perp()), 1.0);
    }

    #[test]
    fn normalized_zero_vector_is_none() {
        assert!(Point::new(0.0, 0.0).normalized().is_none());
        let u = Point::new(3.0, 4.0).normalized().unwrap();
        assert_relative_eq!(u.norm(), 1.0);
    }

    #[test]
    fn real_interpolate_midpoint() {
        let r = real_interpolate(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(r, 0.5);
    }

    #[test]
    fn circumcenter_right_triangle() {
        // Hypotenuse midpoint for a right triangle.
        let c = circumcenter(
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 3.0),
            1e-12,
        )
        .unwrap();
        assert_relative_eq!(c.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(c.y, 1.5, epsilon = 1e-12);
    }

    #[test]
    fn circumcenter_collinear_is_none() {
        let c = circumcenter(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(3.0, 3.0),
            1e-12,
        );
        assert!(c.is_none());
    }

    #[test]
    fn solve_3x3_identity() {
        let rows = [
            [1.0, 0.0, 0.0, 2.0],
            [0.0, 1.0, 0.0, -1.0],
            [0.0, 0.0, 1.0, 0.5],
        ];
        let x = solve_3x3(&rows, 1e-12).unwrap();
        assert_eq!(x, [2.0, -1.0, 0.5]);
    }

    #[test]
    fn solve_2x2_singular_is_none() {
        assert!(solve_2x2(1.0, 2.0, 2.0, 4.0, 1.0, 1.0, 1e-12).is_none());
        let (x, y) = solve_2x2(2.0, 0.0, 0.0, 4.0, 2.0, 2.0, 1e-12).unwrap();
        assert_relative_eq!(x, 1.0);
        assert_relative_eq!(y, 0.5);
    }
}
