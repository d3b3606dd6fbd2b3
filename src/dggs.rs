// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms

//! The `Dggs` facade (§4.9): one session wiring together the projection,
//! a chosen grid's indexer, cell navigation, and the spatial analyser.
//!
//! A session owns exactly one grid choice, made at construction and fixed
//! for its lifetime (§3 Lifecycle: "all objects are immutable after
//! construction"). There is no session registry and no last-error slot —
//! per the Design Notes (§9), those are artefacts of the source's C ABI;
//! every fallible call here returns `Result<_, DggsError>` directly, and
//! independent `Dggs` values are the unit of concurrency (§5).

use tracing::instrument;

use crate::analysis::predicate::Predicate;
use crate::analysis::shape::{Analyser, ShapeKind};
use crate::error::Result;
use crate::indexer::{GridKind, Indexer};
use crate::models::cell::{Cell, Location};
use crate::models::point::{SphericalAccuracyPoint, WGS84AccuracyPoint};
use crate::navigation::Navigator;
use crate::projection::Snyder;

/// Which of the two supported grids (§6) a session indexes cells with.
pub use crate::indexer::GridKind as Grid;

/// A DGGS session: one grid choice bound to the Snyder projection, cell
/// navigation, and the spatial analyser (§4.9).
pub struct Dggs {
    indexer: Indexer,
}

impl Dggs {
    /// Opens a session over the given grid. This is the configuration
    /// surface for the facade (§9 "(added) Configuration"): there is no
    /// external config file, just this constructor's parameter.
    #[instrument(skip_all, fields(grid = ?grid))]
    pub fn new(grid: GridKind) -> Self {
        tracing::debug!("constructing DGGS session");
        Dggs {
            indexer: Indexer::new(grid),
        }
    }

    pub fn grid(&self) -> GridKind {
        self.indexer.kind()
    }

    fn navigator(&self) -> Navigator<'_> {
        Navigator::new(&self.indexer)
    }

    fn analyser(&self) -> Analyser<'_> {
        Analyser::new(&self.indexer)
    }

    // -- Accuracy <-> resolution (§4.5) --------------------------------

    pub fn resolution_from_accuracy_m2(&self, accuracy_m2: f64) -> Result<u8> {
        self.indexer.resolution_from_accuracy(accuracy_m2)
    }

    pub fn accuracy_m2_from_resolution(&self, resolution: u8) -> Result<f64> {
        self.indexer.accuracy_from_resolution(resolution)
    }

    // -- Core façade surface (§4.9) -------------------------------------

    /// `CellFromPoint`: the cell on the sphere containing `point`, at the
    /// given resolution.
    #[instrument(skip(self, point))]
    pub fn cell_from_sphere_point(
        &self,
        point: &SphericalAccuracyPoint,
        resolution: u8,
    ) -> Result<Cell> {
        self.indexer.cell_from_sphere_point(point, resolution)
    }

    /// `PointFromCell`: the cell's centre, on the sphere.
    pub fn sphere_point_from_cell(&self, cell: &Cell) -> Result<SphericalAccuracyPoint> {
        let coordinate = self.indexer.face_coordinate_of(cell)?;
        Snyder::lat_long_point(&coordinate)
    }

    /// `CreateCell`: parses a cell ID string in this session's grid
    /// format (§3, §6).
    pub fn create_cell(&self, id: &str) -> Result<Cell> {
        self.indexer.parse_cell_id(id, Location::NotApplicable)
    }

    pub fn cell_id(&self, cell: &Cell) -> Result<String> {
        self.indexer.serialize_cell_id(cell)
    }

    pub fn get_parents(&self, cell: &Cell) -> Result<Vec<Cell>> {
        self.navigator().parents(cell)
    }

    pub fn get_children(&self, cell: &Cell) -> Result<Vec<Cell>> {
        self.navigator().children(cell)
    }

    pub fn get_siblings(&self, cell: &Cell) -> Result<Vec<Cell>> {
        self.navigator().siblings(cell)
    }

    pub fn get_vertices(&self, cell: &Cell) -> Result<Vec<WGS84AccuracyPoint>> {
        self.indexer.vertices_as_points(cell)
    }

    /// The common ancestor of several cells (§4.7).
    pub fn bounding_cell(&self, cells: &[Cell]) -> Result<Cell> {
        self.navigator().bounding_cell(cells)
    }

    // -- WGS84-aware convenience layer (§4.9 "a converter-aware variant
    // accepts WGS84 points") ------------------------------------------

    /// Finds the cell containing a WGS84 point at the given resolution.
    #[instrument(skip(self, point))]
    pub fn cell_from_point(&self, point: &WGS84AccuracyPoint, resolution: u8) -> Result<Cell> {
        self.indexer.cell_from_point(point, resolution)
    }

    /// Finds the cell containing a WGS84 point, at the resolution that
    /// best matches the point's own requested accuracy (§4.5).
    pub fn cell_from_point_auto_resolution(&self, point: &WGS84AccuracyPoint) -> Result<Cell> {
        self.indexer.cell_from_point_auto_resolution(point)
    }

    /// The inverse of [`Dggs::cell_from_point`]: a cell's centre as a
    /// WGS84 point.
    pub fn point_from_cell(&self, cell: &Cell) -> Result<WGS84AccuracyPoint> {
        self.indexer.point_from_cell(cell)
    }

    // -- Shape-aware / analyser layer (§4.9, §4.8) ----------------------

    /// Evaluates one of the ten planar predicates of §4.8 between two
    /// cell-based shapes, using the native face frame when both shapes
    /// lie on the same face and the lon/lat frame otherwise.
    pub fn evaluate(&self, predicate: Predicate, a: &ShapeKind, b: &ShapeKind) -> Result<bool> {
        self.analyser().evaluate(predicate, a, b)
    }
}
