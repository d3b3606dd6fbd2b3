// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms

//! Accuracy-tagged points in the two coordinate frames the core moves
//! between: WGS84 geodetic and the authalic sphere.

use geo::Point;

use crate::error::{DggsError, Result};

/// Tolerance within which an out-of-range latitude/longitude is clamped to
/// its bound rather than rejected (§3).
const BOUNDS_CLAMP_TOLERANCE: f64 = 1e-12;

fn clamp_or_reject(value: f64, min: f64, max: f64, name: &str) -> Result<f64> {
    if value < min {
        if min - value <= BOUNDS_CLAMP_TOLERANCE {
            return Ok(min);
        }
        return Err(DggsError::model(format!(
            "{name} {value} is below the minimum of {min}"
        )));
    }
    if value > max {
        if value - max <= BOUNDS_CLAMP_TOLERANCE {
            return Ok(max);
        }
        return Err(DggsError::model(format!(
            "{name} {value} is above the maximum of {max}"
        )));
    }
    Ok(value)
}

/// A geodetic point on the WGS84 ellipsoid together with a requested
/// positional accuracy, expressed as an area in square metres on the
/// sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WGS84AccuracyPoint {
    point: Point<f64>,
    accuracy_m2: f64,
}

impl WGS84AccuracyPoint {
    /// Builds a point, clamping latitude/longitude that lie within
    /// [`BOUNDS_CLAMP_TOLERANCE`] of their bound, and rejecting everything
    /// else, including a negative accuracy.
    pub fn new(latitude: f64, longitude: f64, accuracy_m2: f64) -> Result<Self> {
        let lat = clamp_or_reject(latitude, -90.0, 90.0, "latitude")?;
        let lon = clamp_or_reject(longitude, -180.0, 180.0, "longitude")?;
        if accuracy_m2 < 0.0 {
            return Err(DggsError::model(format!(
                "accuracy must be non-negative, got {accuracy_m2}"
            )));
        }
        Ok(Self {
            point: Point::new(lon, lat),
            accuracy_m2,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.point.y()
    }

    pub fn longitude(&self) -> f64 {
        self.point.x()
    }

    pub fn accuracy_m2(&self) -> f64 {
        self.accuracy_m2
    }

    pub fn as_geo_point(&self) -> Point<f64> {
        self.point
    }
}

/// A point on the authalic sphere, with accuracy expressed as a spherical
/// cap half-angle in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphericalAccuracyPoint {
    point: Point<f64>,
    accuracy_half_angle_deg: f64,
}

impl SphericalAccuracyPoint {
    pub fn new(latitude: f64, longitude: f64, accuracy_half_angle_deg: f64) -> Result<Self> {
        let lat = clamp_or_reject(latitude, -90.0, 90.0, "latitude")?;
        let lon = clamp_or_reject(longitude, -180.0, 180.0, "longitude")?;
        if !(0.0..=360.0).contains(&accuracy_half_angle_deg) {
            return Err(DggsError::model(format!(
                "accuracy half-angle must be in [0, 360] degrees, got {accuracy_half_angle_deg}"
            )));
        }
        Ok(Self {
            point: Point::new(lon, lat),
            accuracy_half_angle_deg,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.point.y()
    }

    pub fn longitude(&self) -> f64 {
        self.point.x()
    }

    pub fn accuracy_half_angle_deg(&self) -> f64 {
        self.accuracy_half_angle_deg
    }

    pub fn as_geo_point(&self) -> Point<f64> {
        self.point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_bounds_accepted() {
        assert!(WGS84AccuracyPoint::new(90.0, 180.0, 0.0).is_ok());
        assert!(WGS84AccuracyPoint::new(-90.0, -180.0, 0.0).is_ok());
    }

    #[test]
    fn test_tiny_overshoot_clamped() {
        let p = WGS84AccuracyPoint::new(90.0 + 1e-13, 0.0, 0.0).unwrap();
        assert_eq!(p.latitude(), 90.0);
    }

    #[test]
    fn test_real_overshoot_rejected() {
        assert!(WGS84AccuracyPoint::new(91.0, 0.0, 0.0).is_err());
        assert!(WGS84AccuracyPoint::new(0.0, 181.0, 0.0).is_err());
    }

    #[test]
    fn test_negative_accuracy_rejected() {
        assert!(WGS84AccuracyPoint::new(0.0, 0.0, -1.0).is_err());
    }
}
