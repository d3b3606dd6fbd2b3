// Copyright 2025 contributors to the GeoPlegmata project.
//
// Licenced under the Apache Licence, Version 2.0 <LICENCE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENCE-MIT or http://opensource.org/licenses/MIT>, at your
// discretion. This file may not be copied, modified, or distributed
// except according to those terms

//! Snyder's (1992) equal-area polyhedral projection, applied face by face
//! to the icosahedron (§4.2).

use crate::constants::Tolerance;
use crate::error::{DggsError, Result};
use crate::geometry::angles::{cot, one_minus_cos};
use crate::models::face_coordinate::FaceCoordinate;
use crate::models::point::SphericalAccuracyPoint;
use crate::polyhedron::Icosahedron;

pub struct Snyder;

impl Snyder {
    /// Forward projection: a point on the sphere to a coordinate on
    /// whichever face accepts it.
    pub fn face_coordinate(point: &SphericalAccuracyPoint) -> Result<FaceCoordinate> {
        let phi = point.latitude().to_radians();
        let lambda = point.longitude().to_radians();

        let g = Icosahedron::g();
        let capital_g = Icosahedron::capital_g();
        let theta = Icosahedron::theta();
        let margin = Tolerance::EDGE_MARGIN;

        let mut accepted: Option<(u8, f64, f64, f64)> = None; // face, Az, z, az_adjustment

        for face in Icosahedron::faces() {
            let phi0 = face.centre_lat_deg.to_radians();
            let lambda0 = face.centre_lon_deg.to_radians();

            // Equation 13: spherical distance from face centre.
            let z = (phi0.sin() * phi.sin() + phi0.cos() * phi.cos() * (lambda - lambda0).cos())
                .clamp(-1.0, 1.0)
                .acos();

            if z > g + margin {
                continue;
            }

            // Equation 14: azimuth from face centre.
            let mut az = (phi.cos() * (lambda - lambda0).sin()).atan2(
                phi0.cos() * phi.sin() - phi0.sin() * phi.cos() * (lambda - lambda0).cos(),
            );

            az += face.orientation_deg.to_radians();
            let az_adjustment = adjust_az(theta, &mut az);

            // Equation 9.
            let q = (g.tan() / (az.cos() + az.sin() * cot(theta))).atan();

            if z > q + margin {
                continue;
            }

            accepted = Some((face.index, az, z, az_adjustment));
            break;
        }

        let (face_index, az, z, az_adjustment) = accepted.ok_or_else(|| {
            DggsError::model(format!(
                "point ({}, {}) is not located on any face",
                point.latitude(),
                point.longitude()
            ))
        })?;

        let r_prime = Icosahedron::radius_ratio();

        // Equation 6.
        let h = (az.sin() * capital_g.sin() * g.cos() - az.cos() * capital_g.cos())
            .clamp(-1.0, 1.0)
            .acos();
        // Equation 7.
        let ag = az + capital_g + h - std::f64::consts::PI;
        // Equation 8.
        let mut az_prime = (2.0 * ag).atan2(r_prime.powi(2) * g.tan().powi(2) - 2.0 * ag * cot(theta));

        // Equation 9 (recomputed with the accepted face's Az, for d'/f below).
        let q = (g.tan() / (az.cos() + az.sin() * cot(theta))).atan();
        // Equation 10.
        let d_prime = r_prime * g.tan() / (az_prime.cos() + az_prime.sin() * cot(theta));
        // Equation 11.
        let f = d_prime / (2.0 * r_prime * (q / 2.0).sin());
        // Equation 12.
        let rho = 2.0 * r_prime * f * (z / 2.0).sin();

        az_prime -= az_adjustment;

        let x = rho * az_prime.sin();
        let y = rho * az_prime.cos();

        let edge_length_relative_to_r = edge_length_relative_to_r();

        let accuracy = accuracy_to_face_fraction(point.accuracy_half_angle_deg());

        Ok(FaceCoordinate::new(
            face_index,
            x / edge_length_relative_to_r,
            y / edge_length_relative_to_r,
            accuracy,
        ))
    }

    /// Inverse projection: a face coordinate back to a point on the
    /// sphere.
    pub fn lat_long_point(coordinate: &FaceCoordinate) -> Result<SphericalAccuracyPoint> {
        let face = Icosahedron::face(coordinate.face)
            .ok_or_else(|| DggsError::model(format!("face index {} out of range", coordinate.face)))?;

        let edge_length_relative_to_r = edge_length_relative_to_r();
        let x = coordinate.x * edge_length_relative_to_r;
        let y = coordinate.y * edge_length_relative_to_r;

        let g = Icosahedron::g();
        let capital_g = Icosahedron::capital_g();
        let theta = Icosahedron::theta();

        // Equation 17.
        let mut az_prime = x.atan2(y);
        // Equation 18.
        let rho = (x * x + y * y).sqrt();

        let az_adjustment = adjust_az(theta, &mut az_prime);

        let r_prime = Icosahedron::radius_ratio();

        // Equation 19.
        let ag = r_prime.powi(2) * g.tan().powi(2) / (2.0 * (cot(az_prime) + cot(theta)));

        let mut approx_az = az_prime;
        let mut delta_az;
        let mut iterations = 0u32;
        loop {
            let h = (approx_az.sin() * capital_g.sin() * g.cos() - approx_az.cos() * capital_g.cos())
                .clamp(-1.0, 1.0)
                .acos();
            let function_az = ag - capital_g - h - approx_az + std::f64::consts::PI;
            let derivative_az = (approx_az.cos() * capital_g.sin() * g.cos()
                + approx_az.sin() * capital_g.cos())
                / h.sin()
                - 1.0;
            delta_az = -function_az / derivative_az;
            approx_az += delta_az;
            iterations += 1;
            if delta_az.abs() <= Tolerance::PROJECTION_ITERATION || iterations > 100 {
                break;
            }
        }
        let mut az = approx_az;

        // Equation 9.
        let q = (g.tan() / (az.cos() + az.sin() * cot(theta))).atan();
        // Equation 10 (uses Az', as in the source).
        let d_prime = r_prime * g.tan() / (az_prime.cos() + az_prime.sin() * cot(theta));
        // Equation 11.
        let f = d_prime / (2.0 * r_prime * (q / 2.0).sin());
        // Equation 23.
        let z = 2.0 * (rho / (2.0 * r_prime * f)).clamp(-1.0, 1.0).asin();

        az -= az_adjustment;
        az -= face.orientation_deg.to_radians();

        let phi0 = face.centre_lat_deg.to_radians();
        let lambda0 = face.centre_lon_deg.to_radians();

        let phi = (phi0.sin() * z.cos() + phi0.cos() * z.sin() * az.cos())
            .clamp(-1.0, 1.0)
            .asin();
        let lambda =
            lambda0 + (az.sin() * z.sin() * phi0.cos()).atan2(z.cos() - phi0.sin() * phi.sin());

        let latitude = phi.to_degrees();
        let longitude = crate::models::units::wrap_longitude_degrees(lambda.to_degrees());

        let accuracy_half_angle = face_fraction_to_accuracy(coordinate.accuracy);

        SphericalAccuracyPoint::new(latitude, longitude, accuracy_half_angle)
    }
}

/// Rotates `az` into `[0, angle_between_vertices]` and returns the
/// removed multiple, so the caller can undo the adjustment later.
fn adjust_az(theta: f64, az: &mut f64) -> f64 {
    let angle_between_vertices = 2.0 * (std::f64::consts::FRAC_PI_2 - theta);
    let mut adjustments: i32 = 0;
    while *az < 0.0 {
        *az += angle_between_vertices;
        adjustments += 1;
    }
    while *az > angle_between_vertices {
        *az -= angle_between_vertices;
        adjustments -= 1;
    }
    angle_between_vertices * adjustments as f64
}

fn edge_length_relative_to_r() -> f64 {
    Icosahedron::radius_ratio() * Icosahedron::edge_to_radius_ratio()
}

/// §4.2 step 7 / source `GetAccuracyArea`: half-angle (degrees) to
/// fraction of one face's area, capped at 1.
fn accuracy_to_face_fraction(accuracy_half_angle_deg: f64) -> f64 {
    let accuracy_relative_to_sphere = 0.5 * one_minus_cos(accuracy_half_angle_deg.to_radians());
    let accuracy_relative_to_face =
        accuracy_relative_to_sphere * Icosahedron::face_count() as f64;
    accuracy_relative_to_face.min(1.0)
}

/// Inverse of [`accuracy_to_face_fraction`] (source `GetAccuracyAngle`).
fn face_fraction_to_accuracy(face_fraction: f64) -> f64 {
    let value = 1.0 - (2.0 * face_fraction / Icosahedron::face_count() as f64);
    value.clamp(-1.0, 1.0).acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_centre_round_trips_to_itself() {
        let face = Icosahedron::face(2).unwrap();
        let point =
            SphericalAccuracyPoint::new(face.centre_lat_deg, face.centre_lon_deg, 0.0).unwrap();
        let coord = Snyder::face_coordinate(&point).unwrap();
        assert_eq!(coord.face, 2);
        assert!(coord.x.abs() < 1e-6);
        assert!(coord.y.abs() < 1e-6);
    }

    #[test]
    fn test_forward_inverse_roundtrip() {
        let point = SphericalAccuracyPoint::new(1.234, 2.345, 10.0).unwrap();
        let coord = Snyder::face_coordinate(&point).unwrap();
        let back = Snyder::lat_long_point(&coord).unwrap();
        assert!((back.latitude() - point.latitude()).abs() < 1e-6);
        assert!((back.longitude() - point.longitude()).abs() < 1e-6);
    }

    #[test]
    fn test_accuracy_fraction_capped_at_one() {
        let f = accuracy_to_face_fraction(180.0);
        assert!(f <= 1.0);
    }

    #[test]
    fn test_accuracy_conversion_roundtrip() {
        let half_angle = 5.0;
        let frac = accuracy_to_face_fraction(half_angle);
        let back = face_fraction_to_accuracy(frac);
        assert!((back - half_angle).abs() < 1e-6);
    }
}
