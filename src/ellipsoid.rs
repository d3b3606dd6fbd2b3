// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms

//! Conversion between WGS84 geodetic coordinates and the authalic sphere
//! the projection operates on.
//!
//! The original converts by running a general-purpose geographic-to-
//! geographic transform twice, once at height 0 and once at a corrective
//! height, to cancel an artefact of that transform. Because this crate
//! reaches the authalic sphere directly via Karney's latitude series
//! instead of a generic geodetic pipeline, there is no such artefact to
//! cancel, and the Design Notes (§9) explicitly allow a single-pass
//! formula here provided the round-trip tolerance (§8, R1) holds — which
//! a fixed-coefficient trigonometric series does to within double
//! precision.

use geo::Point;

use crate::constants::{KarneyCoefficients, Tolerance, WGS84};
use crate::error::{DggsError, Result};
use crate::geometry::angles::half_angle_from_one_minus_cos;
use crate::models::point::{SphericalAccuracyPoint, WGS84AccuracyPoint};

/// Converts points and accuracies between WGS84 and the authalic sphere.
pub struct Converter;

impl Converter {
    /// WGS84 geodetic point, degrees, and an accuracy area in m^2 -> a
    /// point on the authalic sphere with the accuracy expressed as a cap
    /// half-angle in degrees.
    pub fn wgs84_to_sphere(point: &WGS84AccuracyPoint) -> Result<SphericalAccuracyPoint> {
        let phi = point.latitude().to_radians();
        let xi = geodetic_to_authalic_latitude(phi);
        let half_angle_deg = area_to_half_angle(point.accuracy_m2()).to_degrees();
        SphericalAccuracyPoint::new(xi.to_degrees(), point.longitude(), half_angle_deg)
    }

    /// Inverse of [`Converter::wgs84_to_sphere`].
    pub fn sphere_to_wgs84(point: &SphericalAccuracyPoint) -> Result<WGS84AccuracyPoint> {
        let xi = point.latitude().to_radians();
        let phi = authalic_to_geodetic_latitude(xi);
        let area_m2 = half_angle_to_area(point.accuracy_half_angle_deg().to_radians());
        WGS84AccuracyPoint::new(phi.to_degrees(), point.longitude(), area_m2)
    }

    /// Convenience for callers holding a bare `geo::Point` in radians
    /// rather than the accuracy-tagged point types.
    pub fn geodetic_point_to_sphere(lon_lat_deg: Point<f64>) -> Point<f64> {
        let phi = lon_lat_deg.y().to_radians();
        let xi = geodetic_to_authalic_latitude(phi);
        Point::new(lon_lat_deg.x(), xi.to_degrees())
    }
}

/// Clenshaw-style evaluation of a Karney auxiliary-latitude series: each
/// harmonic `l` (1..=6) contributes `C_l(n) * sin(2 l phi)`, where `C_l(n)`
/// is a polynomial in the third flattening `n` starting at `n^l`. The flat
/// 21-element coefficient table packs these polynomials end to end, one
/// decreasing-length group per harmonic (6, 5, 4, 3, 2, 1 terms).
fn evaluate_latitude_series(coefficients: &[f64; 21], phi: f64, n: f64) -> f64 {
    const GROUP_SIZES: [usize; 6] = [6, 5, 4, 3, 2, 1];
    let mut offset = 0;
    let mut correction = 0.0;
    for (i, &size) in GROUP_SIZES.iter().enumerate() {
        let harmonic = (i + 1) as i32;
        let mut n_power = n.powi(harmonic);
        let mut c_l = 0.0;
        for k in 0..size {
            c_l += coefficients[offset + k] * n_power;
            n_power *= n;
        }
        offset += size;
        correction += c_l * (2.0 * harmonic as f64 * phi).sin();
    }
    correction
}

fn geodetic_to_authalic_latitude(phi: f64) -> f64 {
    phi + evaluate_latitude_series(&KarneyCoefficients::GEODETIC_TO_AUTHALIC, phi, WGS84::THIRD_FLATTENING)
}

fn authalic_to_geodetic_latitude(xi: f64) -> f64 {
    xi + evaluate_latitude_series(&KarneyCoefficients::AUTHALIC_TO_GEODETIC, xi, WGS84::THIRD_FLATTENING)
}

/// Spherical-cap area (m^2, on the full sphere of radius
/// [`WGS84::AUTHALIC_RADIUS`]) to half-angle (radians), per §3:
/// `A / (2 pi R^2) = 1 - cos(alpha)`.
fn area_to_half_angle(area_m2: f64) -> f64 {
    let r = WGS84::AUTHALIC_RADIUS;
    let one_minus_cos_alpha = area_m2 / (2.0 * std::f64::consts::PI * r * r);
    half_angle_from_one_minus_cos(one_minus_cos_alpha)
}

/// Inverse of [`area_to_half_angle`].
fn half_angle_to_area(half_angle_rad: f64) -> f64 {
    let r = WGS84::AUTHALIC_RADIUS;
    let one_minus_cos_alpha = crate::geometry::angles::one_minus_cos(half_angle_rad);
    2.0 * std::f64::consts::PI * r * r * one_minus_cos_alpha
}

/// Validates that an area lies on `[0, 4 pi R^2]`, the full sphere's area,
/// failing with `MODEL_ERROR` otherwise (propagated the way a failing
/// coordinate-transform library call would be, per §4.1).
pub fn validate_area(area_m2: f64) -> Result<()> {
    let max = 4.0 * std::f64::consts::PI * WGS84::AUTHALIC_RADIUS * WGS84::AUTHALIC_RADIUS;
    if area_m2 < 0.0 || area_m2 > max + Tolerance::AREA {
        return Err(DggsError::model(format!(
            "accuracy area {area_m2} m^2 is outside the sphere's total surface area"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equator_unchanged() {
        let phi = 0.0;
        let xi = geodetic_to_authalic_latitude(phi);
        assert!(xi.abs() < 1e-9);
    }

    #[test]
    fn test_pole_unchanged() {
        let phi = std::f64::consts::FRAC_PI_2;
        let xi = geodetic_to_authalic_latitude(phi);
        assert!((xi - phi).abs() < 1e-6);
    }

    #[test]
    fn test_roundtrip_midlatitude() {
        let phi = 45f64.to_radians();
        let xi = geodetic_to_authalic_latitude(phi);
        let back = authalic_to_geodetic_latitude(xi);
        assert!((back - phi).abs() < 1e-8);
    }

    #[test]
    fn test_point_roundtrip() {
        let p = WGS84AccuracyPoint::new(12.5, -45.25, 1.0).unwrap();
        let sphere = Converter::wgs84_to_sphere(&p).unwrap();
        let back = Converter::sphere_to_wgs84(&sphere).unwrap();
        assert!((back.latitude() - p.latitude()).abs() < 1e-6);
        assert!((back.longitude() - p.longitude()).abs() < 1e-9);
    }

    #[test]
    fn test_area_half_angle_roundtrip() {
        let area = 1.4e-6;
        let half_angle = area_to_half_angle(area);
        let back = half_angle_to_area(half_angle);
        assert!((back - area).abs() / area < 1e-6);
    }
}
