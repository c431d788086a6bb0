/// Geometry layer: orientations of structural data on the unit sphere.
///
/// Architecture:
/// ```text
///   DirectionCosines  (north, east, down)
///        │
///        ▼
///   ┌──────────┐      ┌──────────┐
///   │   Line    │◄────│  Plane    │  pole ↔ plane
///   └──────────┘      └──────────┘
///        │                 │
///        ▼                 ▼
///   ┌────────────────────────┐
///   │ Rotation                │  base line swept 0..π around an axis
///   └────────────────────────┘
/// ```
///
/// All angles are radians. Lines point into the lower hemisphere
/// (positive `down`) once they have gone through a rotation.

pub mod direction;
pub mod line;
pub mod plane;
pub mod rotation;

pub use direction::DirectionCosines;
pub use line::Line;
pub use plane::Plane;
pub use rotation::Rotation;

use std::f64::consts::TAU;

use thiserror::Error;

/// Errors raised by geometric constructions.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("cannot span a plane with parallel lines ({0} and {1})")]
    ParallelLines(Line, Line),
}

/// Round radians to whole degrees for display.
pub fn to_int_degrees(rad: f64) -> i64 {
    rad.to_degrees().round() as i64
}

/// Wrap an azimuth into `[0, 2π)`.
pub fn wrap_azimuth(rad: f64) -> f64 {
    let wrapped = rad.rem_euclid(TAU);
    // rem_euclid can return TAU itself for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    #[test]
    fn wrap_azimuth_handles_negative_and_large_angles() {
        assert!((wrap_azimuth(-PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-12);
        assert!((wrap_azimuth(5.0 * PI) - PI).abs() < 1e-12);
        assert_eq!(wrap_azimuth(0.0), 0.0);
        assert!(wrap_azimuth(-1e-20) < TAU);
    }

    #[test]
    fn int_degrees_rounds_to_nearest() {
        assert_eq!(to_int_degrees(PI), 180);
        assert_eq!(to_int_degrees(89.6_f64.to_radians()), 90);
    }
}
