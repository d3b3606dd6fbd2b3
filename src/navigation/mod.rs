// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms

//! Cell hierarchy navigation and the common-ancestor ("bounding cell")
//! search (§4.7).
//!
//! Parent/child/sibling simply delegate to the [`Indexer`] with the added
//! guarantee that every returned ID passes the cell-ID length check.
//! `bounding_cell` is the one genuinely new algorithm here: it climbs every
//! input cell to the minimum resolution among them, using the
//! "best-parent" tie-break from §4.7 when a cell has more than one parent,
//! then keeps climbing in lockstep until all cells agree or resolution 0
//! is reached without agreement.

use tracing::{debug, trace};

use crate::analysis::predicate::{self, Predicate};
use crate::analysis::shape::ShapeKind;
use crate::error::{DggsError, Result};
use crate::indexer::Indexer;
use crate::models::cell::Cell;

/// Parent, child, sibling and bounding-cell navigation bound to one
/// indexer's grid.
pub struct Navigator<'a> {
    indexer: &'a Indexer,
}

impl<'a> Navigator<'a> {
    pub fn new(indexer: &'a Indexer) -> Self {
        Navigator { indexer }
    }

    /// Delegates to the indexer; every returned cell's ID is length-checked
    /// (§4.7).
    pub fn parents(&self, cell: &Cell) -> Result<Vec<Cell>> {
        let parents = self.indexer.parents(cell)?;
        for parent in &parents {
            parent.to_id_string()?;
        }
        Ok(parents)
    }

    pub fn children(&self, cell: &Cell) -> Result<Vec<Cell>> {
        let children = self.indexer.children(cell)?;
        for child in &children {
            child.to_id_string()?;
        }
        Ok(children)
    }

    pub fn siblings(&self, cell: &Cell) -> Result<Vec<Cell>> {
        let siblings = self.indexer.siblings(cell)?;
        for sibling in &siblings {
            sibling.to_id_string()?;
        }
        Ok(siblings)
    }

    /// Among `cell`'s parents, the one that fully contains `cell` in the
    /// planar sense; falls back to the first parent if none does (§4.7,
    /// §9 Open Questions: well defined only when at least one parent
    /// contains the child).
    fn best_parent(&self, cell: &Cell) -> Result<Cell> {
        let parents = self.indexer.parents(cell)?;
        if parents.len() == 1 {
            return Ok(parents.into_iter().next().unwrap());
        }
        let child_shape = ShapeKind::Cell(cell.clone());
        for parent in &parents {
            let parent_shape = ShapeKind::Cell(parent.clone());
            let contains = self.evaluate_contains(&parent_shape, &child_shape)?;
            if contains {
                return Ok(parent.clone());
            }
        }
        trace!(face = cell.face, "best_parent: no parent contains child, using first parent");
        Ok(parents.into_iter().next().expect("grid guarantees at least one parent"))
    }

    fn evaluate_contains(&self, a: &ShapeKind, b: &ShapeKind) -> Result<bool> {
        // Bounding-cell candidates always share a face with their child, so
        // the native frame always applies; build geometries directly rather
        // than going through `Analyser::evaluate`'s face-matching dispatch.
        let geometry_a = self.shape_geometry_native(a)?;
        let geometry_b = self.shape_geometry_native(b)?;
        Ok(predicate::evaluate(Predicate::Contains, &geometry_a, &geometry_b))
    }

    fn shape_geometry_native(&self, shape: &ShapeKind) -> Result<geo::Geometry<f64>> {
        let ShapeKind::Cell(cell) = shape else {
            return Err(DggsError::model("bounding cell only operates on single cells"));
        };
        let points = self
            .indexer
            .vertices(cell)?
            .into_iter()
            .map(|fc| geo::Point::new(fc.x, fc.y))
            .collect::<Vec<_>>();
        Ok(geo::Geometry::Polygon(
            crate::models::shapes::Polygon::new(
                crate::models::shapes::Linestring::new(points),
                Vec::new(),
            )
            .to_geo(),
        ))
    }

    /// The common ancestor of every cell in `cells` (§4.7).
    ///
    /// Fails with [`DggsError::InvalidParam`] when the inputs cannot be
    /// traced back to a single cell at resolution 0, i.e. they lie on
    /// different faces.
    pub fn bounding_cell(&self, cells: &[Cell]) -> Result<Cell> {
        if cells.is_empty() {
            return Err(DggsError::invalid_param(
                "bounding cell requires at least one input cell",
            ));
        }

        let min_resolution = cells.iter().map(|c| c.resolution).min().unwrap();

        let mut current: Vec<Cell> = cells
            .iter()
            .map(|cell| self.climb_to(cell, min_resolution))
            .collect::<Result<_>>()?;

        loop {
            if current.iter().all(|c| c.shape == current[0].shape && c.face == current[0].face) {
                return Ok(current.into_iter().next().unwrap());
            }
            if current[0].resolution == 0 {
                return Err(DggsError::invalid_param(
                    "cells do not share a common ancestor: they lie on different faces",
                ));
            }
            debug!(resolution = current[0].resolution, "bounding_cell: climbing one level");
            current = current
                .iter()
                .map(|cell| self.best_parent(cell))
                .collect::<Result<_>>()?;
        }
    }

    /// Repeatedly takes the best parent until `cell` reaches `target`
    /// resolution (a no-op if it is already there).
    fn climb_to(&self, cell: &Cell, target: u8) -> Result<Cell> {
        let mut current = cell.clone();
        while current.resolution > target {
            current = self.best_parent(&current)?;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::GridKind;
    use crate::models::cell::Location;

    #[test]
    fn test_bounding_cell_of_single_cell_is_itself() {
        let indexer = Indexer::new(GridKind::Triangle);
        let nav = Navigator::new(&indexer);
        let cell = Cell::triangle(7, vec![0, 0, 1], Location::Interior);
        let bounding = nav.bounding_cell(std::slice::from_ref(&cell)).unwrap();
        assert_eq!(bounding.shape, cell.shape);
    }

    #[test]
    fn test_bounding_cell_of_cell_and_its_child() {
        let indexer = Indexer::new(GridKind::Triangle);
        let nav = Navigator::new(&indexer);
        let parent = Cell::triangle(7, vec![0, 0, 1], Location::Interior);
        let child = Cell::triangle(7, vec![0, 0, 1, 2], Location::Interior);
        let bounding = nav.bounding_cell(&[parent.clone(), child]).unwrap();
        assert_eq!(bounding.shape, parent.shape);
    }

    #[test]
    fn test_bounding_cell_of_siblings() {
        let indexer = Indexer::new(GridKind::Triangle);
        let nav = Navigator::new(&indexer);
        let a = Cell::triangle(7, vec![0, 0, 1], Location::Interior);
        let b = Cell::triangle(7, vec![0, 0, 2], Location::Interior);
        let c = Cell::triangle(7, vec![0, 0, 3], Location::Interior);
        let bounding = nav.bounding_cell(&[a, b, c]).unwrap();
        assert_eq!(bounding.shape, Cell::triangle(7, vec![0, 0], Location::Interior).shape);
    }

    #[test]
    fn test_bounding_cell_different_faces_fails() {
        let indexer = Indexer::new(GridKind::Triangle);
        let nav = Navigator::new(&indexer);
        let a = Cell::triangle(7, vec![0], Location::Interior);
        let b = Cell::triangle(8, vec![0], Location::Interior);
        let c = Cell::triangle(9, vec![0], Location::Interior);
        assert!(matches!(
            nav.bounding_cell(&[a, b, c]),
            Err(DggsError::InvalidParam(_))
        ));
    }

    #[test]
    fn test_bounding_cell_empty_input_fails() {
        let indexer = Indexer::new(GridKind::Triangle);
        let nav = Navigator::new(&indexer);
        assert!(matches!(
            nav.bounding_cell(&[]),
            Err(DggsError::InvalidParam(_))
        ));
    }

    #[test]
    fn test_navigator_children_then_parents_roundtrip() {
        let indexer = Indexer::new(GridKind::Triangle);
        let nav = Navigator::new(&indexer);
        let cell = Cell::triangle(2, vec![1, 2], Location::Interior);
        let children = nav.children(&cell).unwrap();
        assert_eq!(children.len(), 4);
        for child in &children {
            let parents = nav.parents(child).unwrap();
            assert_eq!(parents[0].shape, cell.shape);
        }
    }
}
