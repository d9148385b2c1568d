// Copyright 2025 Lars Brubaker
// License: MIT
//
// Numeric tolerances shared by the bisector derivations and the solvers.

use crate::geom::Real;

/// Thresholds below which a quantity is treated as zero.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tolerance {
    /// `|a1*b2 - b1*a2|` at or below this means the two lines are parallel.
    pub parallel: Real,
    /// Negative square-root arguments down to `-discriminant` are clamped to
    /// zero; anything smaller is a domain error. Also the tangency threshold
    /// for quadratic roots.
    pub discriminant: Real,
    /// Determinants at or below this are singular.
    pub singular: Real,
}

impl Tolerance {
    pub const DEFAULT: Tolerance = Tolerance {
        parallel: 1e-12,
        discriminant: 1e-9,
        singular: 1e-12,
    };

    /// Same thresholds for every check.
    pub fn uniform(eps: Real) -> Self {
        Tolerance {
            parallel: eps,
            discriminant: eps,
            singular: eps,
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
