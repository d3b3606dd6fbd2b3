// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms

//! The regular icosahedron, oriented as the base polyhedron of the
//! projection: 20 faces, each with a fixed centre (lat, lon) and a
//! Snyder-orientation of 0 degrees or 60 degrees (§3, §6).

use once_cell::sync::Lazy;

use crate::constants::IcosahedronConstants;

/// One triangular face of the icosahedron.
#[derive(Clone, Copy, Debug)]
pub struct Face {
    pub index: u8,
    pub centre_lat_deg: f64,
    pub centre_lon_deg: f64,
    /// Rotation of the face's local frame relative to the meridian through
    /// its centre, degrees: 0 or 60 (§3).
    pub orientation_deg: f64,
}

const LONGITUDES: [f64; 5] = [-144.0, -72.0, 0.0, 72.0, 144.0];
const LONGITUDES_LOWER: [f64; 5] = [-108.0, -36.0, 36.0, 108.0, 180.0];

fn build_faces() -> [Face; 20] {
    let mut faces = [Face {
        index: 0,
        centre_lat_deg: 0.0,
        centre_lon_deg: 0.0,
        orientation_deg: 0.0,
    }; 20];

    for (i, lon) in LONGITUDES.iter().enumerate() {
        faces[i] = Face {
            index: i as u8,
            centre_lat_deg: 52.62263186,
            centre_lon_deg: *lon,
            orientation_deg: 0.0,
        };
    }
    for (i, lon) in LONGITUDES.iter().enumerate() {
        faces[5 + i] = Face {
            index: (5 + i) as u8,
            centre_lat_deg: 10.81231696,
            centre_lon_deg: *lon,
            orientation_deg: 60.0,
        };
    }
    for (i, lon) in LONGITUDES_LOWER.iter().enumerate() {
        faces[10 + i] = Face {
            index: (10 + i) as u8,
            centre_lat_deg: -10.81231696,
            centre_lon_deg: *lon,
            orientation_deg: 0.0,
        };
    }
    for (i, lon) in LONGITUDES_LOWER.iter().enumerate() {
        faces[15 + i] = Face {
            index: (15 + i) as u8,
            centre_lat_deg: -52.62263186,
            centre_lon_deg: *lon,
            orientation_deg: 60.0,
        };
    }
    faces
}

static FACES: Lazy<[Face; 20]> = Lazy::new(build_faces);

/// The 20-face icosahedron used by the projection.
pub struct Icosahedron;

impl Icosahedron {
    pub fn faces() -> &'static [Face; 20] {
        &FACES
    }

    pub fn face(index: u8) -> Option<&'static Face> {
        FACES.get(index as usize)
    }

    pub fn face_count() -> u8 {
        IcosahedronConstants::FACE_COUNT as u8
    }

    /// Half-angle `g`, radians, from face centre to vertex (Snyder 1992).
    pub fn g() -> f64 {
        IcosahedronConstants::G_SMALL.to_radians()
    }

    /// Angle `G`, radians.
    pub fn capital_g() -> f64 {
        IcosahedronConstants::G_CAPITAL.to_radians()
    }

    /// Angle `theta`, radians.
    pub fn theta() -> f64 {
        IcosahedronConstants::THETA.to_radians()
    }

    pub fn radius_ratio() -> f64 {
        IcosahedronConstants::RADIUS_RATIO
    }

    pub fn edge_to_radius_ratio() -> f64 {
        IcosahedronConstants::EDGE_TO_RADIUS_RATIO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_count() {
        assert_eq!(Icosahedron::faces().len(), 20);
    }

    #[test]
    fn test_face_0_centre() {
        let f = Icosahedron::face(0).unwrap();
        assert!((f.centre_lat_deg - 52.62263186).abs() < 1e-8);
        assert!((f.centre_lon_deg - (-144.0)).abs() < 1e-8);
        assert_eq!(f.orientation_deg, 0.0);
    }

    #[test]
    fn test_face_9_orientation() {
        let f = Icosahedron::face(9).unwrap();
        assert_eq!(f.orientation_deg, 60.0);
        assert!((f.centre_lat_deg - 10.81231696).abs() < 1e-8);
    }

    #[test]
    fn test_face_19_centre() {
        let f = Icosahedron::face(19).unwrap();
        assert!((f.centre_lat_deg - (-52.62263186)).abs() < 1e-8);
        assert!((f.centre_lon_deg - 180.0).abs() < 1e-8);
    }

    #[test]
    fn test_out_of_range_face_is_none() {
        assert!(Icosahedron::face(20).is_none());
    }
}
