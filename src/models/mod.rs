// Copyright 2025 contributors to the GeoPlegmata project.
// Originally authored by Michael Jendryke (GeoInsight GmbH, michael.jendryke@geoinsight.ai)
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms

//! Data model: coordinate frames, shape carriers, and the cell type.

pub mod cell;
pub mod face_coordinate;
pub mod point;
pub mod shapes;
pub mod units;

pub use cell::{Cell, CellShape, Location, Orientation};
pub use face_coordinate::FaceCoordinate;
pub use point::{SphericalAccuracyPoint, WGS84AccuracyPoint};
pub use shapes::{Linestring, Polygon};
pub use units::wrap_longitude_degrees;
