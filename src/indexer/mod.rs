// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms

//! Dispatches between the two native grids and ties them to the
//! projection: point-to-cell and cell-to-point, resolution/accuracy
//! conversion, hierarchy navigation within a single grid, and cell ID
//! parsing/serialisation (§4.6).

use crate::constants::{IcosahedronConstants, Tolerance, WGS84};
use crate::ellipsoid::Converter;
use crate::error::{DggsError, Result};
use crate::grid::{HexagonGrid, TriangleGrid};
use crate::models::cell::{Cell, CellShape, Location, MAX_RESOLUTION};
use crate::models::face_coordinate::FaceCoordinate;
use crate::models::point::{SphericalAccuracyPoint, WGS84AccuracyPoint};
use crate::projection::Snyder;

/// Which native grid an [`Indexer`] dispatches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridKind {
    /// ISEA4T, aperture-4 triangles.
    Triangle,
    /// ISEA3H, aperture-3 hexagons.
    Hexagon,
}

/// The whole sphere's area divided across the icosahedron's faces, used
/// to convert between a face-relative accuracy fraction and an absolute
/// area in square metres.
fn sphere_area_m2() -> f64 {
    4.0 * std::f64::consts::PI * WGS84::AUTHALIC_RADIUS * WGS84::AUTHALIC_RADIUS
}

fn face_area_m2() -> f64 {
    sphere_area_m2() / IcosahedronConstants::FACE_COUNT as f64
}

pub struct Indexer {
    kind: GridKind,
}

impl Indexer {
    pub fn new(kind: GridKind) -> Self {
        Indexer { kind }
    }

    pub fn kind(&self) -> GridKind {
        self.kind
    }

    fn check_resolution(resolution: u8) -> Result<()> {
        if resolution > MAX_RESOLUTION {
            return Err(DggsError::invalid_param(format!(
                "resolution {resolution} exceeds maximum of {MAX_RESOLUTION}"
            )));
        }
        Ok(())
    }

    /// Accuracy, in square metres on the authalic sphere, delivered by a
    /// cell at this resolution (§4.5).
    pub fn accuracy_from_resolution(&self, resolution: u8) -> Result<f64> {
        Self::check_resolution(resolution)?;
        let fraction = match self.kind {
            GridKind::Triangle => TriangleGrid::accuracy_from_resolution(resolution),
            GridKind::Hexagon => HexagonGrid::accuracy_from_resolution(resolution as u16),
        };
        Ok(fraction * face_area_m2())
    }

    /// The resolution whose accuracy best matches a requested area in
    /// square metres on the authalic sphere (§4.5).
    pub fn resolution_from_accuracy(&self, accuracy_m2: f64) -> Result<u8> {
        if accuracy_m2 <= 0.0 {
            return Err(DggsError::invalid_param("accuracy must be positive"));
        }
        let fraction = (accuracy_m2 / face_area_m2()).min(1.0);
        let resolution = match self.kind {
            GridKind::Triangle => TriangleGrid::resolution_from_accuracy(fraction)?,
            GridKind::Hexagon => HexagonGrid::resolution_from_accuracy(fraction)? as u8,
        };
        Ok(resolution.min(MAX_RESOLUTION))
    }

    /// Finds the cell containing `point` at the given resolution.
    pub fn cell_from_point(&self, point: &WGS84AccuracyPoint, resolution: u8) -> Result<Cell> {
        Self::check_resolution(resolution)?;
        let sphere_point = Converter::wgs84_to_sphere(point)?;
        self.cell_from_sphere_point(&sphere_point, resolution)
    }

    /// Finds the cell containing `point`, at the resolution closest to
    /// the point's own requested accuracy.
    pub fn cell_from_point_auto_resolution(&self, point: &WGS84AccuracyPoint) -> Result<Cell> {
        let resolution = self.resolution_from_accuracy(point.accuracy_m2().max(f64::MIN_POSITIVE))?;
        self.cell_from_point(point, resolution)
    }

    /// Finds the cell containing a point already on the authalic sphere,
    /// skipping the WGS84 ellipsoid conversion (used directly by the
    /// façade's sphere-point entry point, §4.9).
    pub fn cell_from_sphere_point(
        &self,
        sphere_point: &SphericalAccuracyPoint,
        resolution: u8,
    ) -> Result<Cell> {
        let coordinate = Snyder::face_coordinate(sphere_point)?;
        let location = Self::classify_location(&coordinate);
        match self.kind {
            GridKind::Triangle => {
                TriangleGrid::cell_from_face_coordinate(resolution, &coordinate, location)
            }
            GridKind::Hexagon => {
                let (row, column) =
                    HexagonGrid::row_and_column(resolution as u16, &coordinate);
                Ok(Cell::offset(coordinate.face, resolution, row, column, location))
            }
        }
    }

    /// A point's location relative to the icosahedron face it projects
    /// onto: near an edge or vertex of the equilateral face triangle, or
    /// safely in the interior (§3, §4.2).
    fn classify_location(coordinate: &FaceCoordinate) -> Location {
        // sqrt(3)/3, the circumradius of the unit-edge face triangle.
        const FACE_CIRCUMRADIUS: f64 = 0.577_350_269_189_626;
        let distance_from_centre = (coordinate.x * coordinate.x + coordinate.y * coordinate.y).sqrt();
        let margin = Tolerance::EDGE_MARGIN * 1e4;
        if distance_from_centre >= FACE_CIRCUMRADIUS - margin {
            Location::Vertex
        } else if distance_from_centre >= FACE_CIRCUMRADIUS * 0.98 {
            Location::Edge
        } else {
            Location::Interior
        }
    }

    /// The central point of a cell, as a WGS84 point with the cell's own
    /// resolution-derived accuracy.
    pub fn point_from_cell(&self, cell: &Cell) -> Result<WGS84AccuracyPoint> {
        let coordinate = self.face_coordinate_of(cell)?;
        let sphere_point = Snyder::lat_long_point(&coordinate)?;
        Converter::sphere_to_wgs84(&sphere_point)
    }

    /// The native face `(x, y)` coordinate at a cell's centroid.
    pub fn face_coordinate_of(&self, cell: &Cell) -> Result<FaceCoordinate> {
        match (&self.kind, &cell.shape) {
            (GridKind::Triangle, CellShape::Triangle { .. }) => TriangleGrid::face_coordinate_of(cell),
            (GridKind::Hexagon, CellShape::Offset { row, column }) => {
                let (x, y) = HexagonGrid::face_offset(cell.resolution as u16, *row, *column);
                Ok(FaceCoordinate::new(
                    cell.face,
                    x,
                    y,
                    HexagonGrid::accuracy_from_resolution(cell.resolution as u16),
                ))
            }
            _ => Err(DggsError::invalid_param(
                "cell shape does not match this indexer's grid kind",
            )),
        }
    }

    /// The cell's vertices, as native face coordinates.
    pub fn vertices(&self, cell: &Cell) -> Result<Vec<FaceCoordinate>> {
        match self.kind {
            GridKind::Triangle => TriangleGrid::vertices(cell),
            GridKind::Hexagon => HexagonGrid::vertices(cell),
        }
    }

    /// The cell's vertices as WGS84 points, going through the inverse
    /// projection and ellipsoid conversion.
    pub fn vertices_as_points(&self, cell: &Cell) -> Result<Vec<WGS84AccuracyPoint>> {
        self.vertices(cell)?
            .into_iter()
            .map(|coordinate| {
                let sphere_point = Snyder::lat_long_point(&coordinate)?;
                Converter::sphere_to_wgs84(&sphere_point)
            })
            .collect()
    }

    /// The immediate parent(s): exactly one for a triangle cell, one or
    /// three for a hexagon cell depending on its position (§4.4).
    pub fn parents(&self, cell: &Cell) -> Result<Vec<Cell>> {
        match (&self.kind, &cell.shape) {
            (GridKind::Triangle, CellShape::Triangle { .. }) => {
                Ok(vec![TriangleGrid::parent(cell)?])
            }
            (GridKind::Hexagon, CellShape::Offset { row, column }) => {
                if cell.resolution == 0 {
                    return Err(DggsError::invalid_param("the whole-face cell has no parent"));
                }
                let candidates =
                    HexagonGrid::parents(cell.face, cell.resolution as u16, *row, *column)?;
                Ok(candidates
                    .into_iter()
                    .map(|(r, c)| {
                        Cell::offset(cell.face, cell.resolution - 1, r, c, Location::NotApplicable)
                    })
                    .collect())
            }
            _ => Err(DggsError::invalid_param(
                "cell shape does not match this indexer's grid kind",
            )),
        }
    }

    /// All children one resolution finer: four for a triangle cell,
    /// seven for a hexagon cell (§4.3, §4.4).
    pub fn children(&self, cell: &Cell) -> Result<Vec<Cell>> {
        match (&self.kind, &cell.shape) {
            (GridKind::Triangle, CellShape::Triangle { .. }) => TriangleGrid::children(cell),
            (GridKind::Hexagon, CellShape::Offset { row, column }) => {
                Self::check_resolution(cell.resolution + 1)?;
                let children = HexagonGrid::children(cell.resolution as u16, *row, *column);
                Ok(children
                    .into_iter()
                    .map(|(r, c)| {
                        Cell::offset(cell.face, cell.resolution + 1, r, c, Location::NotApplicable)
                    })
                    .collect())
            }
            _ => Err(DggsError::invalid_param(
                "cell shape does not match this indexer's grid kind",
            )),
        }
    }

    /// The other cells sharing this cell's immediate parent (§4.4). For
    /// the hexagon grid this is only well-defined when the cell has a
    /// single parent; a cell straddling a parent boundary (three
    /// candidate parents) has no single sibling set.
    pub fn siblings(&self, cell: &Cell) -> Result<Vec<Cell>> {
        match (&self.kind, &cell.shape) {
            (GridKind::Triangle, CellShape::Triangle { .. }) => TriangleGrid::siblings(cell),
            (GridKind::Hexagon, CellShape::Offset { .. }) => {
                let parents = self.parents(cell)?;
                if parents.len() != 1 {
                    return Err(DggsError::NotImplemented(
                        "siblings are only defined for a hexagon cell with a single parent"
                            .into(),
                    ));
                }
                let mut siblings = self.children(&parents[0])?;
                siblings.retain(|candidate| candidate.shape != cell.shape);
                Ok(siblings)
            }
            _ => Err(DggsError::invalid_param(
                "cell shape does not match this indexer's grid kind",
            )),
        }
    }

    pub fn parse_cell_id(&self, id: &str, location: Location) -> Result<Cell> {
        match self.kind {
            GridKind::Triangle => Cell::parse_triangle(id, location),
            GridKind::Hexagon => Cell::parse_offset(id, location),
        }
    }

    pub fn serialize_cell_id(&self, cell: &Cell) -> Result<String> {
        cell.to_id_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_from_resolution_decreases() {
        let indexer = Indexer::new(GridKind::Triangle);
        let a0 = indexer.accuracy_from_resolution(0).unwrap();
        let a1 = indexer.accuracy_from_resolution(1).unwrap();
        assert!(a1 < a0);
    }

    #[test]
    fn test_point_roundtrip_triangle() {
        let indexer = Indexer::new(GridKind::Triangle);
        let point = WGS84AccuracyPoint::new(40.0, -73.0, 1.0).unwrap();
        let cell = indexer.cell_from_point(&point, 6).unwrap();
        let back = indexer.point_from_cell(&cell).unwrap();
        let accuracy = indexer.accuracy_from_resolution(6).unwrap();
        let cell_size_deg = (accuracy.sqrt() / 111_000.0).max(0.5);
        assert!((back.latitude() - point.latitude()).abs() < cell_size_deg);
        assert!((back.longitude() - point.longitude()).abs() < cell_size_deg);
    }

    #[test]
    fn test_point_roundtrip_hexagon() {
        let indexer = Indexer::new(GridKind::Hexagon);
        let point = WGS84AccuracyPoint::new(10.0, 20.0, 1.0).unwrap();
        let cell = indexer.cell_from_point(&point, 6).unwrap();
        let back = indexer.point_from_cell(&cell).unwrap();
        let accuracy = indexer.accuracy_from_resolution(6).unwrap();
        let cell_size_deg = (accuracy.sqrt() / 111_000.0).max(0.5);
        assert!((back.latitude() - point.latitude()).abs() < cell_size_deg);
        assert!((back.longitude() - point.longitude()).abs() < cell_size_deg);
    }

    #[test]
    fn test_children_then_parents_contains_original_triangle() {
        let indexer = Indexer::new(GridKind::Triangle);
        let point = WGS84AccuracyPoint::new(5.0, 5.0, 1.0).unwrap();
        let cell = indexer.cell_from_point(&point, 3).unwrap();
        let children = indexer.children(&cell).unwrap();
        assert_eq!(children.len(), 4);
        for child in &children {
            let parents = indexer.parents(child).unwrap();
            assert_eq!(parents.len(), 1);
            assert_eq!(parents[0].shape, cell.shape);
        }
    }

    #[test]
    fn test_children_count_hexagon() {
        let indexer = Indexer::new(GridKind::Hexagon);
        let point = WGS84AccuracyPoint::new(5.0, 5.0, 1.0).unwrap();
        let cell = indexer.cell_from_point(&point, 3).unwrap();
        let children = indexer.children(&cell).unwrap();
        assert_eq!(children.len(), 7);
    }

    #[test]
    fn test_resolution_zero_has_no_parent() {
        let indexer = Indexer::new(GridKind::Hexagon);
        let cell = Cell::offset(0, 0, 0, 0, Location::Interior);
        assert!(indexer.parents(&cell).is_err());
    }

    #[test]
    fn test_siblings_hexagon_matches_parent_count() {
        let indexer = Indexer::new(GridKind::Hexagon);
        let cell = Cell::offset(0, 2, 1, 1, Location::Interior);
        let parents = indexer.parents(&cell).unwrap();
        match indexer.siblings(&cell) {
            Ok(siblings) => {
                assert_eq!(parents.len(), 1);
                assert!(siblings.iter().all(|s| s.shape != cell.shape));
            }
            Err(DggsError::NotImplemented(_)) => assert_ne!(parents.len(), 1),
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
}
