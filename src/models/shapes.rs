// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms

//! Dumb geometry carriers — an ordered sequence of points (`Linestring`)
//! and a polygon with one outer ring plus zero or more holes (`Polygon`).
//!
//! These hold whatever frame they were built in (lon/lat or a face's local
//! x/y); ring closing and equality semantics live in [`crate::analysis`],
//! matching the split between a plain shape carrier and the analyser that
//! interprets it.

use geo::{LineString as GeoLineString, Point};

/// An ordered sequence of points. Equality is order-sensitive (see §3).
#[derive(Clone, Debug, PartialEq)]
pub struct Linestring {
    pub points: Vec<Point<f64>>,
}

impl Linestring {
    pub fn new(points: Vec<Point<f64>>) -> Self {
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Closes the ring by appending the first point if it isn't already
    /// the last one. Used when building predicate geometries, never by
    /// callers directly (§3: "rings are not required to be explicitly
    /// closed by the caller; planar predicates close them internally").
    pub fn closed(&self) -> GeoLineString<f64> {
        let mut coords: Vec<geo::Coord<f64>> =
            self.points.iter().map(|p| p.0).collect();
        if let (Some(first), Some(last)) = (coords.first().copied(), coords.last().copied()) {
            if first != last {
                coords.push(first);
            }
        }
        GeoLineString::from(coords)
    }

    pub fn as_geo(&self) -> GeoLineString<f64> {
        GeoLineString::from(self.points.iter().map(|p| p.0).collect::<Vec<_>>())
    }
}

/// A polygon with one outer ring and zero or more inner rings (holes).
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub outer: Linestring,
    pub holes: Vec<Linestring>,
}

impl Polygon {
    pub fn new(outer: Linestring, holes: Vec<Linestring>) -> Self {
        Self { outer, holes }
    }

    pub fn to_geo(&self) -> geo::Polygon<f64> {
        geo::Polygon::new(
            self.outer.closed(),
            self.holes.iter().map(|h| h.closed()).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_ring_appends_first_point() {
        let ls = Linestring::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ]);
        let closed = ls.closed();
        assert_eq!(closed.0.first(), closed.0.last());
        assert_eq!(closed.0.len(), 4);
    }

    #[test]
    fn test_already_closed_ring_not_duplicated() {
        let ls = Linestring::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 0.0),
        ]);
        let closed = ls.closed();
        assert_eq!(closed.0.len(), 3);
    }

    #[test]
    fn test_polygon_with_hole() {
        let outer = Linestring::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ]);
        let hole = Linestring::new(vec![
            Point::new(1.0, 1.0),
            Point::new(2.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(1.0, 2.0),
        ]);
        let poly = Polygon::new(outer, vec![hole]);
        let geo_poly = poly.to_geo();
        assert_eq!(geo_poly.interiors().len(), 1);
    }
}
