// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms

//! DE-9IM planar predicate evaluation (§4.8).
//!
//! `geo` 0.30's [`IntersectionMatrix`] only exposes `is_disjoint`,
//! `is_intersects`, `is_within` and `is_contains` as public methods. The
//! remaining predicates — touches, crosses, overlaps, covers, covered-by
//! and topological equals — are reconstructed here from the matrix's own
//! `Debug` output, which prints the nine DE-9IM dimension cells as a
//! fixed 9-character string (`"IntersectionMatrix(XXXXXXXXX)"`, in
//! Interior/Boundary/Exterior row-major order). The boolean patterns
//! matched against that string are the standard DE-9IM definitions for
//! these predicates.

use geo::relate::Relate;
use geo::Geometry;

/// One of the ten planar predicates of §4.8.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Predicate {
    Equals,
    Intersects,
    Touches,
    Contains,
    Covers,
    Within,
    CoveredBy,
    Crosses,
    Overlaps,
    Disjoint,
}

/// The nine DE-9IM dimension cells plus the four predicates `geo` itself
/// computes, read out of one `relate()` call.
struct DeNineIm {
    dims: [i8; 9],
    disjoint: bool,
    intersects: bool,
    within: bool,
    contains: bool,
}

impl DeNineIm {
    fn evaluate(a: &Geometry<f64>, b: &Geometry<f64>) -> Self {
        let matrix = a.relate(b);
        let disjoint = matrix.is_disjoint();
        let intersects = matrix.is_intersects();
        let within = matrix.is_within();
        let contains = matrix.is_contains();
        let debug = format!("{matrix:?}");
        let inner = debug
            .strip_prefix("IntersectionMatrix(")
            .and_then(|s| s.strip_suffix(')'));
        let mut dims = [-1i8; 9];
        if let Some(inner) = inner {
            for (i, c) in inner.chars().take(9).enumerate() {
                dims[i] = match c {
                    '0' => 0,
                    '1' => 1,
                    '2' => 2,
                    _ => -1,
                };
            }
        }
        DeNineIm { dims, disjoint, intersects, within, contains }
    }

    fn dim(&self, row: usize, col: usize) -> i8 {
        self.dims[row * 3 + col]
    }

    fn present(&self, row: usize, col: usize) -> bool {
        self.dim(row, col) >= 0
    }

    fn touches(&self) -> bool {
        !self.present(0, 0) && (self.present(0, 1) || self.present(1, 0) || self.present(1, 1))
    }

    fn covers(&self) -> bool {
        let exterior_clear = !self.present(2, 0) && !self.present(2, 1);
        exterior_clear
            && (self.present(0, 0) || self.present(0, 1) || self.present(1, 0) || self.present(1, 1))
    }

    fn covered_by(&self) -> bool {
        let exterior_clear = !self.present(0, 2) && !self.present(1, 2);
        exterior_clear
            && (self.present(0, 0) || self.present(0, 1) || self.present(1, 0) || self.present(1, 1))
    }

    fn interior_dimension(&self) -> i8 {
        self.dim(0, 0).max(self.dim(0, 1)).max(self.dim(0, 2))
    }

    fn other_interior_dimension(&self) -> i8 {
        self.dim(0, 0).max(self.dim(1, 0)).max(self.dim(2, 0))
    }

    fn crosses(&self) -> bool {
        let dims_a = self.interior_dimension();
        let dims_b = self.other_interior_dimension();
        if dims_a < dims_b {
            self.present(0, 0) && self.present(0, 2)
        } else if dims_a > dims_b {
            self.present(0, 0) && self.present(2, 0)
        } else if dims_a == 1 && dims_b == 1 {
            self.dim(0, 0) == 0
        } else {
            false
        }
    }

    fn overlaps(&self) -> bool {
        let dims_a = self.interior_dimension();
        let dims_b = self.other_interior_dimension();
        if dims_a != dims_b {
            return false;
        }
        match dims_a {
            1 => self.dim(0, 0) == 1 && self.present(0, 2) && self.present(2, 0),
            0 | 2 => self.present(0, 0) && self.present(0, 2) && self.present(2, 0),
            _ => false,
        }
    }

    fn equal_topo(&self) -> bool {
        if self.dims == [-1; 9] {
            return true;
        }
        self.present(0, 0)
            && !self.present(0, 2)
            && !self.present(1, 2)
            && !self.present(2, 0)
            && !self.present(2, 1)
    }
}

/// Evaluates `predicate` between two geometries already built in the same
/// frame (native face coordinates or lon/lat). `Disjoint` is the negation
/// of `Intersects` and is computed directly rather than through the
/// matrix, matching §4.8.
pub fn evaluate(predicate: Predicate, a: &Geometry<f64>, b: &Geometry<f64>) -> bool {
    let matrix = DeNineIm::evaluate(a, b);
    match predicate {
        Predicate::Equals => matrix.equal_topo(),
        Predicate::Intersects => matrix.intersects,
        Predicate::Touches => matrix.touches(),
        Predicate::Contains => matrix.contains,
        Predicate::Covers => matrix.covers(),
        Predicate::Within => matrix.within,
        Predicate::CoveredBy => matrix.covered_by(),
        Predicate::Crosses => matrix.crosses(),
        Predicate::Overlaps => matrix.overlaps(),
        Predicate::Disjoint => matrix.disjoint,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, polygon, Geometry};

    fn square(x0: f64, y0: f64, side: f64) -> Geometry<f64> {
        Geometry::Polygon(polygon![
            (x: x0, y: y0),
            (x: x0 + side, y: y0),
            (x: x0 + side, y: y0 + side),
            (x: x0, y: y0 + side),
            (x: x0, y: y0),
        ])
    }

    #[test]
    fn test_disjoint_squares() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(10.0, 10.0, 1.0);
        assert!(evaluate(Predicate::Disjoint, &a, &b));
        assert!(!evaluate(Predicate::Intersects, &a, &b));
    }

    #[test]
    fn test_contains_and_within_are_inverse() {
        let outer = square(0.0, 0.0, 4.0);
        let inner = square(1.0, 1.0, 1.0);
        assert!(evaluate(Predicate::Contains, &outer, &inner));
        assert!(evaluate(Predicate::Within, &inner, &outer));
        assert!(evaluate(Predicate::Covers, &outer, &inner));
        assert!(evaluate(Predicate::CoveredBy, &inner, &outer));
    }

    #[test]
    fn test_touching_squares() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(1.0, 0.0, 1.0);
        assert!(evaluate(Predicate::Touches, &a, &b));
        assert!(!evaluate(Predicate::Overlaps, &a, &b));
        assert!(!evaluate(Predicate::Contains, &a, &b));
    }

    #[test]
    fn test_overlapping_squares() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);
        assert!(evaluate(Predicate::Overlaps, &a, &b));
        assert!(!evaluate(Predicate::Touches, &a, &b));
        assert!(!evaluate(Predicate::Contains, &a, &b));
    }

    #[test]
    fn test_identical_squares_are_equal() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(0.0, 0.0, 1.0);
        assert!(evaluate(Predicate::Equals, &a, &b));
        assert!(evaluate(Predicate::Covers, &a, &b));
        assert!(evaluate(Predicate::CoveredBy, &a, &b));
    }

    #[test]
    fn test_crossing_line_and_polygon() {
        let line = Geometry::LineString(line_string![
            (x: -1.0, y: 0.5),
            (x: 2.0, y: 0.5),
        ]);
        let polygon = square(0.0, 0.0, 1.0);
        assert!(evaluate(Predicate::Crosses, &line, &polygon));
        assert!(evaluate(Predicate::Intersects, &line, &polygon));
        assert!(!evaluate(Predicate::Within, &line, &polygon));
    }
}
