// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms

#![doc = include_str!("../README.md")]

pub mod analysis;
pub mod constants;
pub mod dggs;
pub mod ellipsoid;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod indexer;
pub mod models;
pub mod navigation;
pub mod polyhedron;
pub mod projection;

pub use dggs::{Dggs, GridKind};
pub use error::{DggsError, Result};
pub use models::{Cell, CellShape, Location, Orientation};
