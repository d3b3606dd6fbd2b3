// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms

//! ISEA4T: an aperture-4 triangle grid over one icosahedron face, with
//! cells addressed by a base-4 digit path from the face root (§4.3).
//!
//! Each triangle splits into four: the three corner triangles keep their
//! parent's orientation (digits 1-3, one per corner), and the centre
//! triangle is inverted (digit 0). This mirrors the recursive
//! "Sierpinski-style" geodesic subdivision used throughout the
//! icosahedral-grid literature; the face's own root triangle is the one
//! whose vertices bound the whole-face hexagon cell at resolution 0
//! (§4.4), so the two grids agree on where a face begins and ends.

use crate::error::{DggsError, Result};
use crate::models::cell::{Cell, CellShape, Location, Orientation};
use crate::models::face_coordinate::FaceCoordinate;

/// Child-to-parent area ratio of the triangle grid.
pub const APERTURE: f64 = 4.0;

type Triangle = [(f64, f64); 3];

const ROOT_TRIANGLE: Triangle = [
    (0.0, 2.0 * 0.288_675_134_594_812_9),
    (-0.5, -0.288_675_134_594_812_9),
    (0.5, -0.288_675_134_594_812_9),
];

pub struct TriangleGrid;

impl TriangleGrid {
    /// Accuracy (fraction of face area) delivered by a given resolution
    /// (§4.3): `1 / 4^resolution`.
    pub fn accuracy_from_resolution(resolution: u8) -> f64 {
        1.0 / APERTURE.powi(resolution as i32)
    }

    /// Finds the resolution whose accuracy is closest to the requested
    /// one, ties going to the finer (higher) resolution (§4.3, §9).
    pub fn resolution_from_accuracy(accuracy: f64) -> Result<u8> {
        if accuracy <= 0.0 || accuracy > 1.0 {
            return Err(DggsError::model("accuracy value must be in (0, 1]"));
        }
        let exact = -accuracy.log(APERTURE);
        let floor_resolution = exact.floor().max(0.0);
        let ceil_resolution = exact.ceil().max(0.0);

        let floor_accuracy = Self::accuracy_from_resolution(floor_resolution as u8);
        let ceil_accuracy = Self::accuracy_from_resolution(ceil_resolution as u8);

        let floor_delta = (floor_accuracy - accuracy).abs();
        let ceil_delta = (ceil_accuracy - accuracy).abs();

        if ceil_delta <= floor_delta {
            Ok(ceil_resolution as u8)
        } else {
            Ok(floor_resolution as u8)
        }
    }

    fn midpoint(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
        ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)
    }

    /// Splits a triangle into its four digit-addressed children, keeping
    /// vertex ordering consistent with the parent's corners.
    fn subdivide(vertices: Triangle, digit: u8) -> Result<Triangle> {
        let [v0, v1, v2] = vertices;
        let m01 = Self::midpoint(v0, v1);
        let m12 = Self::midpoint(v1, v2);
        let m20 = Self::midpoint(v2, v0);
        match digit {
            0 => Ok([m12, m20, m01]),
            1 => Ok([v0, m01, m20]),
            2 => Ok([m01, v1, m12]),
            3 => Ok([m20, m12, v2]),
            _ => Err(DggsError::model(format!("invalid triangle digit {digit}"))),
        }
    }

    fn triangle_for_digits(digits: &[u8]) -> Result<Triangle> {
        let mut triangle = ROOT_TRIANGLE;
        for &digit in digits {
            triangle = Self::subdivide(triangle, digit)?;
        }
        Ok(triangle)
    }

    fn centroid(vertices: Triangle) -> (f64, f64) {
        (
            (vertices[0].0 + vertices[1].0 + vertices[2].0) / 3.0,
            (vertices[0].1 + vertices[1].1 + vertices[2].1) / 3.0,
        )
    }

    /// Barycentric coordinates of `point` relative to `vertices`.
    fn barycentric(vertices: Triangle, point: (f64, f64)) -> (f64, f64, f64) {
        let [(x1, y1), (x2, y2), (x3, y3)] = vertices;
        let (px, py) = point;
        let denominator = (y2 - y3) * (x1 - x3) + (x3 - x2) * (y1 - y3);
        let l1 = ((y2 - y3) * (px - x3) + (x3 - x2) * (py - y3)) / denominator;
        let l2 = ((y3 - y1) * (px - x3) + (x1 - x3) * (py - y3)) / denominator;
        let l3 = 1.0 - l1 - l2;
        (l1, l2, l3)
    }

    /// Which of the four sub-triangles (digit) contains `point` within
    /// `vertices`, using barycentric coordinates on the midpoint split.
    fn locate_digit(vertices: Triangle, point: (f64, f64)) -> u8 {
        let (l1, l2, l3) = Self::barycentric(vertices, point);
        if l1 >= 0.5 {
            1
        } else if l2 >= 0.5 {
            2
        } else if l3 >= 0.5 {
            3
        } else {
            0
        }
    }

    /// Builds the cell whose digit path contains `coordinate`, at the
    /// given resolution.
    pub fn cell_from_face_coordinate(
        resolution: u8,
        coordinate: &FaceCoordinate,
        location: Location,
    ) -> Result<Cell> {
        let mut triangle = ROOT_TRIANGLE;
        let mut digits = Vec::with_capacity(resolution as usize);
        let point = (coordinate.x, coordinate.y);
        for _ in 0..resolution {
            let digit = Self::locate_digit(triangle, point);
            triangle = Self::subdivide(triangle, digit)?;
            digits.push(digit);
        }
        Ok(Cell::triangle(coordinate.face, digits, location))
    }

    /// The coordinate at the centroid of a cell's triangle.
    pub fn face_coordinate_of(cell: &Cell) -> Result<FaceCoordinate> {
        let CellShape::Triangle { digits, .. } = &cell.shape else {
            return Err(DggsError::model("face coordinate requested for a non-triangle cell"));
        };
        let triangle = Self::triangle_for_digits(digits)?;
        let (x, y) = Self::centroid(triangle);
        Ok(FaceCoordinate::new(
            cell.face,
            x,
            y,
            Self::accuracy_from_resolution(cell.resolution),
        ))
    }

    /// The parent cell: the digit path with its last digit dropped.
    pub fn parent(cell: &Cell) -> Result<Cell> {
        let CellShape::Triangle { digits, .. } = &cell.shape else {
            return Err(DggsError::model("parent requested for a non-triangle cell"));
        };
        if digits.is_empty() {
            return Err(DggsError::invalid_param("the whole-face cell has no parent"));
        }
        let parent_digits = digits[..digits.len() - 1].to_vec();
        Ok(Cell::triangle(cell.face, parent_digits, cell.location))
    }

    /// The four children: the digit path with one more digit (0-3)
    /// appended.
    pub fn children(cell: &Cell) -> Result<Vec<Cell>> {
        let CellShape::Triangle { digits, .. } = &cell.shape else {
            return Err(DggsError::model("children requested for a non-triangle cell"));
        };
        let mut out = Vec::with_capacity(4);
        for digit in 0u8..4 {
            let mut child_digits = digits.clone();
            child_digits.push(digit);
            out.push(Cell::triangle(cell.face, child_digits, cell.location));
        }
        Ok(out)
    }

    /// The other three children of this cell's parent.
    pub fn siblings(cell: &Cell) -> Result<Vec<Cell>> {
        let CellShape::Triangle { digits, .. } = &cell.shape else {
            return Err(DggsError::model("siblings requested for a non-triangle cell"));
        };
        if digits.is_empty() {
            return Ok(Vec::new());
        }
        let own_digit = *digits.last().unwrap();
        let prefix = &digits[..digits.len() - 1];
        let mut out = Vec::with_capacity(3);
        for digit in 0u8..4 {
            if digit == own_digit {
                continue;
            }
            let mut sibling_digits = prefix.to_vec();
            sibling_digits.push(digit);
            out.push(Cell::triangle(cell.face, sibling_digits, cell.location));
        }
        Ok(out)
    }

    /// The three corners of a cell's triangle.
    pub fn vertices(cell: &Cell) -> Result<Vec<FaceCoordinate>> {
        let CellShape::Triangle { digits, .. } = &cell.shape else {
            return Err(DggsError::model("vertices requested for a non-triangle cell"));
        };
        let triangle = Self::triangle_for_digits(digits)?;
        let accuracy = Self::accuracy_from_resolution(cell.resolution);
        Ok(triangle
            .iter()
            .map(|&(x, y)| FaceCoordinate::new(cell.face, x, y, accuracy))
            .collect())
    }

    /// Whether the cell's triangle points up (`Standard`) or down
    /// (`Rotated`), tracking the digit-path parity (§4.3).
    pub fn orientation(cell: &Cell) -> Orientation {
        Orientation::for_triangle_resolution(cell.resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_from_resolution() {
        assert_eq!(TriangleGrid::accuracy_from_resolution(0), 1.0);
        assert_eq!(TriangleGrid::accuracy_from_resolution(1), 0.25);
        assert_eq!(TriangleGrid::accuracy_from_resolution(2), 0.0625);
    }

    #[test]
    fn test_resolution_from_accuracy() {
        assert_eq!(TriangleGrid::resolution_from_accuracy(1.0).unwrap(), 0);
        assert_eq!(TriangleGrid::resolution_from_accuracy(0.25).unwrap(), 1);
    }

    #[test]
    fn test_resolution_from_invalid_accuracy_fails() {
        assert!(TriangleGrid::resolution_from_accuracy(0.0).is_err());
        assert!(TriangleGrid::resolution_from_accuracy(1.5).is_err());
    }

    #[test]
    fn test_children_count_and_parent_roundtrip() {
        let cell = Cell::triangle(3, vec![2, 0, 1], Location::Interior);
        let children = TriangleGrid::children(&cell).unwrap();
        assert_eq!(children.len(), 4);
        for child in &children {
            let parent = TriangleGrid::parent(child).unwrap();
            assert_eq!(parent.shape, cell.shape);
        }
    }

    #[test]
    fn test_siblings_excludes_self() {
        let cell = Cell::triangle(0, vec![1, 2], Location::Interior);
        let siblings = TriangleGrid::siblings(&cell).unwrap();
        assert_eq!(siblings.len(), 3);
        assert!(siblings.iter().all(|s| s.shape != cell.shape));
    }

    #[test]
    fn test_root_has_no_parent() {
        let cell = Cell::triangle(0, vec![], Location::Interior);
        assert!(TriangleGrid::parent(&cell).is_err());
    }

    #[test]
    fn test_vertices_count() {
        let cell = Cell::triangle(4, vec![3, 3], Location::Interior);
        let vertices = TriangleGrid::vertices(&cell).unwrap();
        assert_eq!(vertices.len(), 3);
    }

    #[test]
    fn test_cell_from_face_coordinate_centroid_returns_same_cell() {
        let cell = Cell::triangle(2, vec![1, 3, 0, 2], Location::Interior);
        let coordinate = TriangleGrid::face_coordinate_of(&cell).unwrap();
        let found =
            TriangleGrid::cell_from_face_coordinate(4, &coordinate, Location::Interior).unwrap();
        assert_eq!(found.shape, cell.shape);
    }
}
