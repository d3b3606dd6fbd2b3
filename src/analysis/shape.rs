// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms

//! Builds planar geometries out of cells and dispatches predicates
//! against them (§4.8).
//!
//! A shape is always one of the three kinds the spatial analyser
//! recognises: a single cell, a cell-linestring (an ordered sequence of
//! cells, realised as the sequence of their centre points), or a
//! cell-polygon (an outer ring of cells plus zero or more hole rings,
//! each realised the same way). The analyser builds the corresponding
//! [`Linestring`]/[`Polygon`] carrier in whichever frame it settles on
//! for the pair, then hands the closed, ring-oriented `geo` geometry to
//! [`super::predicate::evaluate`].

use geo::Geometry;

use crate::analysis::predicate::{self, Predicate};
use crate::error::{DggsError, Result};
use crate::indexer::Indexer;
use crate::models::cell::Cell;
use crate::models::shapes::{Linestring, Polygon};

/// A shape made of cells, as accepted by the spatial analyser (§4.8).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    /// A single cell, realised as a polygon over its own vertex ring.
    Cell(Cell),
    /// An ordered sequence of cells, realised as the linestring joining
    /// their centres.
    CellLinestring(Vec<Cell>),
    /// An outer ring of cells plus zero or more hole rings, each realised
    /// as the polygon ring joining the cells' centres.
    CellPolygon {
        outer: Vec<Cell>,
        holes: Vec<Vec<Cell>>,
    },
}

impl ShapeKind {
    /// The distinct faces touched by this shape's cells.
    fn faces(&self) -> Vec<u8> {
        match self {
            ShapeKind::Cell(cell) => vec![cell.face],
            ShapeKind::CellLinestring(cells) => cells.iter().map(|c| c.face).collect(),
            ShapeKind::CellPolygon { outer, holes } => outer
                .iter()
                .chain(holes.iter().flatten())
                .map(|c| c.face)
                .collect(),
        }
    }

    /// `Some(face)` if every cell in this shape lies on the same face.
    fn single_face(&self) -> Option<u8> {
        let faces = self.faces();
        let first = *faces.first()?;
        faces.iter().all(|&f| f == first).then_some(first)
    }

    fn is_empty(&self) -> bool {
        match self {
            ShapeKind::Cell(_) => false,
            ShapeKind::CellLinestring(cells) => cells.is_empty(),
            ShapeKind::CellPolygon { outer, .. } => outer.is_empty(),
        }
    }
}

enum Frame {
    Native,
    LonLat,
}

fn cell_centre(indexer: &Indexer, cell: &Cell, frame: &Frame) -> Result<geo::Point<f64>> {
    match frame {
        Frame::Native => {
            let fc = indexer.face_coordinate_of(cell)?;
            Ok(geo::Point::new(fc.x, fc.y))
        }
        Frame::LonLat => {
            let point = indexer.point_from_cell(cell)?;
            Ok(point.as_geo_point())
        }
    }
}

fn cell_vertices(indexer: &Indexer, cell: &Cell, frame: &Frame) -> Result<Vec<geo::Point<f64>>> {
    match frame {
        Frame::Native => Ok(indexer
            .vertices(cell)?
            .into_iter()
            .map(|fc| geo::Point::new(fc.x, fc.y))
            .collect()),
        Frame::LonLat => Ok(indexer
            .vertices_as_points(cell)?
            .into_iter()
            .map(|p| p.as_geo_point())
            .collect()),
    }
}

fn build_geometry(indexer: &Indexer, shape: &ShapeKind, frame: &Frame) -> Result<Geometry<f64>> {
    if shape.is_empty() {
        return Err(DggsError::model("cannot build a planar geometry from an empty shape"));
    }
    match shape {
        ShapeKind::Cell(cell) => {
            let points = cell_vertices(indexer, cell, frame)?;
            Ok(Geometry::Polygon(Polygon::new(Linestring::new(points), Vec::new()).to_geo()))
        }
        ShapeKind::CellLinestring(cells) => {
            let points = cells
                .iter()
                .map(|cell| cell_centre(indexer, cell, frame))
                .collect::<Result<Vec<_>>>()?;
            Ok(Geometry::LineString(Linestring::new(points).as_geo()))
        }
        ShapeKind::CellPolygon { outer, holes } => {
            let outer_points = outer
                .iter()
                .map(|cell| cell_centre(indexer, cell, frame))
                .collect::<Result<Vec<_>>>()?;
            let hole_linestrings = holes
                .iter()
                .map(|ring| {
                    ring.iter()
                        .map(|cell| cell_centre(indexer, cell, frame))
                        .collect::<Result<Vec<_>>>()
                        .map(Linestring::new)
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Geometry::Polygon(
                Polygon::new(Linestring::new(outer_points), hole_linestrings).to_geo(),
            ))
        }
    }
}

/// Builds planar geometries from cell-based shapes and evaluates the
/// DE-9IM predicates of §4.8 between them.
pub struct Analyser<'a> {
    indexer: &'a Indexer,
}

impl<'a> Analyser<'a> {
    pub fn new(indexer: &'a Indexer) -> Self {
        Analyser { indexer }
    }

    /// Evaluates `predicate` between `a` and `b`, preferring the shared
    /// face's native frame and falling back to lon/lat when the two
    /// shapes don't share a single face (§4.8).
    pub fn evaluate(&self, predicate: Predicate, a: &ShapeKind, b: &ShapeKind) -> Result<bool> {
        let frame = match (a.single_face(), b.single_face()) {
            (Some(fa), Some(fb)) if fa == fb => Frame::Native,
            _ => Frame::LonLat,
        };
        let geometry_a = build_geometry(self.indexer, a, &frame)?;
        let geometry_b = build_geometry(self.indexer, b, &frame)?;
        Ok(predicate::evaluate(predicate, &geometry_a, &geometry_b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::GridKind;
    use crate::models::cell::Location;

    #[test]
    fn test_cell_contains_its_own_child() {
        let indexer = Indexer::new(GridKind::Triangle);
        let analyser = Analyser::new(&indexer);
        let parent = Cell::triangle(3, vec![1], Location::Interior);
        let child = Cell::triangle(3, vec![1, 2], Location::Interior);
        let parent_shape = ShapeKind::Cell(parent);
        let child_shape = ShapeKind::Cell(child);
        assert!(analyser
            .evaluate(Predicate::Contains, &parent_shape, &child_shape)
            .unwrap());
        assert!(analyser
            .evaluate(Predicate::Within, &child_shape, &parent_shape)
            .unwrap());
    }

    #[test]
    fn test_sibling_cells_touch_but_do_not_overlap() {
        let indexer = Indexer::new(GridKind::Triangle);
        let analyser = Analyser::new(&indexer);
        let a = ShapeKind::Cell(Cell::triangle(0, vec![1], Location::Interior));
        let b = ShapeKind::Cell(Cell::triangle(0, vec![2], Location::Interior));
        assert!(analyser.evaluate(Predicate::Touches, &a, &b).unwrap());
        assert!(!analyser.evaluate(Predicate::Overlaps, &a, &b).unwrap());
    }

    #[test]
    fn test_disjoint_faces_use_lonlat_fallback() {
        // Face 0 is centred near (52.6N, 144W); face 19 near (52.6S, 180),
        // on the opposite side of the icosahedron, so small interior cells
        // on each can never share a boundary point.
        let indexer = Indexer::new(GridKind::Triangle);
        let analyser = Analyser::new(&indexer);
        let a = ShapeKind::Cell(Cell::triangle(0, vec![1, 2, 3], Location::Interior));
        let b = ShapeKind::Cell(Cell::triangle(19, vec![1, 2, 3], Location::Interior));
        assert!(analyser.evaluate(Predicate::Disjoint, &a, &b).unwrap());
    }

    #[test]
    fn test_empty_shape_rejected() {
        let indexer = Indexer::new(GridKind::Triangle);
        let analyser = Analyser::new(&indexer);
        let empty = ShapeKind::CellLinestring(Vec::new());
        let other = ShapeKind::Cell(Cell::triangle(0, vec![], Location::Interior));
        assert!(analyser.evaluate(Predicate::Intersects, &empty, &other).is_err());
    }
}
