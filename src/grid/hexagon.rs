// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms

//! ISEA3H: an aperture-3 hexagon grid over one icosahedron face, with
//! offset (row, column) cell coordinates (§4.4).
//!
//! Row/column rounding follows the pixel-to-hex and hex-rounding
//! algorithms at <http://www.redblobgames.com/grids/hexagons/>, the same
//! reference the grid this is grounded on cites.

use crate::error::{DggsError, Result};
use crate::models::cell::{Cell, CellShape, Location, Orientation};
use crate::models::face_coordinate::FaceCoordinate;

/// Child-to-parent area ratio of the hexagon grid.
pub const APERTURE: f64 = 3.0;

pub struct HexagonGrid;

impl HexagonGrid {
    /// Accuracy (fraction of face area) delivered by a given resolution
    /// (§4.4): 1.0 at resolution 0, 2/3 at resolution 1, (2/3)/3^(r-1)
    /// beyond that.
    pub fn accuracy_from_resolution(resolution: u16) -> f64 {
        if resolution == 0 {
            1.0
        } else {
            (2.0 / 3.0) / APERTURE.powi(resolution as i32 - 1)
        }
    }

    /// Finds the resolution whose accuracy is closest to the requested
    /// one, ties going to the finer (higher) resolution (§4.4, §9).
    pub fn resolution_from_accuracy(accuracy: f64) -> Result<u16> {
        if accuracy <= 0.0 {
            return Err(DggsError::model("accuracy value must be > 0"));
        }
        if accuracy > 2.0 / 3.0 {
            return Ok(0);
        }

        const RESOLUTION_1_AREA: f64 = 2.0 / 3.0;
        let inverse_accuracy = RESOLUTION_1_AREA / accuracy;
        let resolution_for_accuracy = inverse_accuracy.log(APERTURE) + 1.0;

        let ceil_resolution = resolution_for_accuracy.ceil();
        let floor_resolution = resolution_for_accuracy.floor();

        let lower_accuracy_bound = Self::accuracy_from_resolution(ceil_resolution as u16);
        let upper_accuracy_bound = Self::accuracy_from_resolution(floor_resolution as u16);

        let lower_bound_delta = accuracy - lower_accuracy_bound;
        let upper_bound_delta = upper_accuracy_bound - accuracy;

        if upper_bound_delta > lower_bound_delta {
            Ok(ceil_resolution as u16)
        } else {
            Ok(floor_resolution as u16)
        }
    }

    /// Edge length of a cell at the given resolution, in units of the
    /// face's edge length.
    fn cell_edge_length(resolution: u16) -> f64 {
        const EDGE_LENGTH_AT_FIRST_RES: f64 = 1.0 / 3.0;
        EDGE_LENGTH_AT_FIRST_RES / APERTURE.sqrt().powi(resolution as i32 - 1)
    }

    /// True when the grid at this resolution uses the pixel-to-hex
    /// formulae for a pointy-top arrangement. Note this tracks the even
    /// resolutions, the opposite parity from [`Orientation::for_hexagon_resolution`]'s
    /// "standard" label — both booleans come from the source algorithm and
    /// are kept distinct rather than unified, since they answer different
    /// questions (which pixel-to-hex formula to use vs. which vertex
    /// bearing to start from).
    fn is_pointy_top_grid(resolution: u16) -> bool {
        resolution % 2 == 0
    }

    fn is_horizontal_orientation(resolution: u16) -> bool {
        resolution % 2 == 1
    }

    /// Rounds fractional cube coordinates to the nearest valid cube
    /// coordinate (x + y + z == 0), correcting whichever axis had the
    /// largest rounding error.
    fn round_to_nearest_cube_coordinate(x: f64, y: f64, z: f64) -> (i64, i64, i64) {
        let mut rx = x.round();
        let mut ry = y.round();
        let mut rz = z.round();

        let x_diff = (rx - x).abs();
        let y_diff = (ry - y).abs();
        let z_diff = (rz - z).abs();

        if x_diff > y_diff && x_diff > z_diff {
            rx = -ry - rz;
        } else if y_diff > z_diff {
            ry = -rx - rz;
        } else {
            rz = -rx - ry;
        }

        (rx as i64, ry as i64, rz as i64)
    }

    /// Face coordinate to (row, column), per resolution's orientation
    /// (§4.4).
    pub fn row_and_column(resolution: u16, coordinate: &FaceCoordinate) -> (i64, i64) {
        if resolution == 0 {
            return (0, 0);
        }

        let x = coordinate.x;
        let y = coordinate.y;
        let size = Self::cell_edge_length(resolution);
        let pointy_top = Self::is_pointy_top_grid(resolution);

        let (q, r) = if pointy_top {
            (
                (x * 3f64.sqrt() / 3.0 - y / 3.0) / size,
                y * (2.0 / 3.0) / size,
            )
        } else {
            (
                x * (2.0 / 3.0) / size,
                (-x / 3.0 + (3f64.sqrt() / 3.0) * y) / size,
            )
        };

        let (cx, _cy, cz) = Self::round_to_nearest_cube_coordinate(q, (-q) - r, r);

        if pointy_top {
            // Odd-r offset coordinates.
            let column = cx + (cz - (cz & 1)) / 2;
            (cz, column)
        } else {
            // Odd-q offset coordinates.
            let row = cz + (cx - (cx & 1)) / 2;
            (row, cx)
        }
    }

    /// (row, column) back to a face coordinate's (x, y) offset.
    pub fn face_offset(resolution: u16, row: i64, column: i64) -> (f64, f64) {
        if resolution == 0 {
            return (0.0, 0.0);
        }

        let size = Self::cell_edge_length(resolution);
        let pointy_top = Self::is_pointy_top_grid(resolution);

        if pointy_top {
            let x = size * 3f64.sqrt() * (column as f64 + 0.5 * (row & 1) as f64);
            let y = size * (3.0 / 2.0) * row as f64;
            (x, y)
        } else {
            let x = size * (3.0 / 2.0) * column as f64;
            let y = size * 3f64.sqrt() * (row as f64 + 0.5 * (column & 1) as f64);
            (x, y)
        }
    }

    fn face_coordinate_of(face: u8, resolution: u16, row: i64, column: i64) -> FaceCoordinate {
        let (x, y) = Self::face_offset(resolution, row, column);
        FaceCoordinate::new(face, x, y, Self::accuracy_from_resolution(resolution))
    }

    /// One or three parents, chosen by probing three directions around
    /// the cell's centre (§4.4).
    pub fn parents(face: u8, resolution: u16, row: i64, column: i64) -> Result<Vec<(i64, i64)>> {
        if resolution == 0 {
            return Err(DggsError::invalid_param("the whole-face cell has no parent"));
        }
        let (face_x, face_y) = Self::face_offset(resolution, row, column);

        let offset_distance = Self::accuracy_from_resolution(resolution).sqrt() / 10.0;

        let directions_deg = [10.0_f64, 130.0, 250.0];
        let parent_resolution = resolution - 1;

        let mut candidates = Vec::with_capacity(3);
        for bearing_deg in directions_deg {
            let bearing = bearing_deg.to_radians();
            let probe = FaceCoordinate::new(
                face,
                face_x + offset_distance * bearing.cos(),
                face_y + offset_distance * bearing.sin(),
                Self::accuracy_from_resolution(parent_resolution),
            );
            candidates.push(Self::row_and_column(parent_resolution, &probe));
        }

        let first = candidates[0];
        if candidates[1] == first {
            Ok(vec![first])
        } else {
            Ok(vec![first, candidates[1], candidates[2]])
        }
    }

    /// Exactly seven children: the base child plus its six neighbours
    /// (§4.4).
    ///
    /// Uses Rust's native `%` (truncating, sign-of-dividend remainder) in
    /// the base-child arithmetic, not [`i64::rem_euclid`]: the source's
    /// `columnId % 2` / `rowId % 2` is C++'s truncating `%`, which Rust's
    /// `%` already matches, whereas `rem_euclid` would shift the result
    /// for negative offsets (row/column are signed and routinely negative
    /// away from a face's centre) and silently misplace half the
    /// children there.
    pub fn children(resolution: u16, row: i64, column: i64) -> Vec<(i64, i64)> {
        let horizontal = Self::is_horizontal_orientation(resolution);

        let (base_row, base_column) = if horizontal {
            (
                row * 2 + column % 2,
                (column - column % 2) * 3 / 2 + column % 2,
            )
        } else {
            (
                (row - row % 2) * 3 / 2 + row % 2,
                column * 2 + row % 2,
            )
        };

        let mut children = vec![
            (base_row, base_column),
            (base_row - 1, base_column),
            (base_row, base_column + 1),
            (base_row + 1, base_column),
            (base_row, base_column - 1),
        ];

        if horizontal {
            if column & 1 == 0 {
                children.push((base_row + 1, base_column - 1));
                children.push((base_row - 1, base_column - 1));
            } else {
                children.push((base_row - 1, base_column + 1));
                children.push((base_row + 1, base_column + 1));
            }
        } else if row & 1 == 0 {
            children.push((base_row - 1, base_column + 1));
            children.push((base_row - 1, base_column - 1));
        } else {
            children.push((base_row + 1, base_column + 1));
            children.push((base_row + 1, base_column - 1));
        }

        children
    }

    /// Six vertices for a hexagonal cell, or the three face-triangle
    /// corners at resolution 0 (§4.4).
    pub fn vertices(cell: &Cell) -> Result<Vec<FaceCoordinate>> {
        let CellShape::Offset { row, column } = cell.shape else {
            return Err(DggsError::model("vertices requested for a non-offset cell"));
        };
        let resolution = cell.resolution as u16;
        let (x_offset, y_offset) = Self::face_offset(resolution, row, column);

        if resolution == 0 {
            let accuracy = Self::accuracy_from_resolution(0);
            return Ok(vec![
                FaceCoordinate::new(cell.face, 0.0, 3f64.sqrt() / 3.0, accuracy),
                FaceCoordinate::new(cell.face, -0.5, -3f64.sqrt() / 6.0, accuracy),
                FaceCoordinate::new(cell.face, 0.5, -3f64.sqrt() / 6.0, accuracy),
            ]);
        }

        let orientation = Orientation::for_hexagon_resolution(cell.resolution);
        let mut bearing = match orientation {
            Orientation::Standard => 0f64.to_radians(),
            Orientation::Rotated => 30f64.to_radians(),
        };

        let distance = Self::cell_edge_length(resolution);
        let accuracy = Self::accuracy_from_resolution(resolution);
        let mut out = Vec::with_capacity(6);
        for _ in 0..6 {
            out.push(FaceCoordinate::new(
                cell.face,
                x_offset + distance * bearing.cos(),
                y_offset + distance * bearing.sin(),
                accuracy,
            ));
            bearing += 60f64.to_radians();
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_from_resolution() {
        assert_eq!(HexagonGrid::accuracy_from_resolution(0), 1.0);
        assert!((HexagonGrid::accuracy_from_resolution(1) - 2.0 / 3.0).abs() < 1e-12);
        assert!((HexagonGrid::accuracy_from_resolution(2) - (2.0 / 3.0) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_resolution_from_accuracy_monotone() {
        let r1 = HexagonGrid::resolution_from_accuracy(0.5).unwrap();
        let r2 = HexagonGrid::resolution_from_accuracy(0.05).unwrap();
        assert!(r2 >= r1);
    }

    #[test]
    fn test_resolution_from_zero_accuracy_fails() {
        assert!(HexagonGrid::resolution_from_accuracy(0.0).is_err());
    }

    #[test]
    fn test_resolution_zero_is_whole_face() {
        let coord = FaceCoordinate::new(0, 0.1, -0.2, 1.0);
        assert_eq!(HexagonGrid::row_and_column(0, &coord), (0, 0));
    }

    #[test]
    fn test_children_count() {
        let children = HexagonGrid::children(4, 2, 3);
        assert_eq!(children.len(), 7);
    }

    #[test]
    fn test_children_negative_coordinates_use_truncating_remainder() {
        // resolution 4 is horizontal-orientation; column = -3 is the
        // regression case where rem_euclid and truncating `%` disagree.
        assert!(HexagonGrid::is_horizontal_orientation(4));
        let children = HexagonGrid::children(4, 2, -3);
        assert_eq!(children.len(), 7);
        let base = (2i64 * 2 + (-3i64 % 2), (-3i64 - (-3i64 % 2)) * 3 / 2 + (-3i64 % 2));
        assert_eq!(base, (3, -4));
        assert!(children.contains(&base));

        // resolution 5 is vertical-orientation; row = -3 exercises the
        // other branch's truncating remainder.
        assert!(!HexagonGrid::is_horizontal_orientation(5));
        let children = HexagonGrid::children(5, -3, 2);
        assert_eq!(children.len(), 7);
        let base = (
            (-3i64 - (-3i64 % 2)) * 3 / 2 + (-3i64 % 2),
            2i64 * 2 + (-3i64 % 2),
        );
        assert_eq!(base, (-4, 3));
        assert!(children.contains(&base));
    }

    #[test]
    fn test_parents_one_or_three() {
        let parents = HexagonGrid::parents(0, 3, 5, -2).unwrap();
        assert!(parents.len() == 1 || parents.len() == 3);
    }

    #[test]
    fn test_vertices_count_resolution_zero() {
        let cell = Cell::offset(0, 0, 0, 0, Location::Interior);
        let vertices = HexagonGrid::vertices(&cell).unwrap();
        assert_eq!(vertices.len(), 3);
    }

    #[test]
    fn test_vertices_count_hexagon() {
        let cell = Cell::offset(0, 3, 2, -1, Location::Interior);
        let vertices = HexagonGrid::vertices(&cell).unwrap();
        assert_eq!(vertices.len(), 6);
    }

    #[test]
    fn test_face_offset_roundtrips_through_row_column() {
        let resolution = 5;
        let (row, column) = (3i64, -2i64);
        let (x, y) = HexagonGrid::face_offset(resolution, row, column);
        let coord = FaceCoordinate::new(0, x, y, 1.0);
        let (back_row, back_col) = HexagonGrid::row_and_column(resolution, &coord);
        assert_eq!((row, column), (back_row, back_col));
    }
}
