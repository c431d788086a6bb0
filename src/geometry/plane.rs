use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{to_int_degrees, wrap_azimuth, DirectionCosines, GeometryError, Line, Rotation};

/// Cross products shorter than this are treated as parallel input lines.
const PARALLEL_EPSILON: f64 = 1e-10;

// ---------------------------------------------------------------------------
// Plane – strike and dip, right-hand rule
// ---------------------------------------------------------------------------

/// A plane on the stereonet. The plane dips to the right of its strike.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub strike: f64,
    pub dip: f64,
}

impl Plane {
    pub const fn new(strike: f64, dip: f64) -> Self {
        Self { strike, dip }
    }

    /// Normalise to `0 <= dip <= π/2` and `0 <= strike < 2π`.
    ///
    /// A negative dip, or one past vertical, is the same plane seen from
    /// its other strike direction.
    pub fn normalised(&self) -> Self {
        let (mut strike, mut dip) = (self.strike, self.dip);
        if dip < 0.0 {
            strike += PI;
            dip = -dip;
        }
        if dip > FRAC_PI_2 {
            strike += PI;
            dip = PI - dip;
        }
        Self::new(wrap_azimuth(strike), dip)
    }

    /// Plane perpendicular to the given line.
    pub fn from_pole(pole: &Line) -> Self {
        Self::new(wrap_azimuth(pole.trend + FRAC_PI_2), FRAC_PI_2 - pole.plunge).normalised()
    }

    /// Plane from the direction cosines of its pole.
    pub fn from_direction_cosines(cosines: DirectionCosines) -> Self {
        Self::from_pole(&Line::from_direction_cosines(cosines))
    }

    /// The plane containing both lines.
    pub fn from_spanning_lines(a: &Line, b: &Line) -> Result<Self, GeometryError> {
        let normal = a.direction_cosines().cross_product(&b.direction_cosines());
        if normal.magnitude() < PARALLEL_EPSILON {
            return Err(GeometryError::ParallelLines(*a, *b));
        }
        let normal = if normal.down < 0.0 { -normal } else { normal };
        Ok(Self::from_direction_cosines(normal))
    }

    /// North, east, down direction cosines of the plane's pole.
    pub fn direction_cosines(&self) -> DirectionCosines {
        let (sin_dip, cos_dip) = self.dip.sin_cos();
        let (sin_strike, cos_strike) = self.strike.sin_cos();
        DirectionCosines::new(sin_dip * sin_strike, -sin_dip * cos_strike, cos_dip)
    }

    /// The pole (normal) to the plane.
    pub fn pole(&self) -> Line {
        Line::new(FRAC_PI_2 - self.dip, wrap_azimuth(self.strike - FRAC_PI_2))
    }

    /// The great circle traced by sweeping the strike line around the pole.
    pub fn as_rotation(&self) -> Rotation {
        Rotation::new(self.pole(), Line::new(0.0, self.strike))
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:03}/{:02}",
            to_int_degrees(self.strike),
            to_int_degrees(self.dip)
        )
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn pole_of_horizontal_plane_is_vertical() {
        let pole = Plane::new(0.0, 0.0).pole();
        assert!((pole.plunge - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn pole_matches_direction_cosines() {
        let plane = Plane::new(210f64.to_radians(), 85f64.to_radians());
        assert!(plane
            .pole()
            .direction_cosines()
            .approx_eq(&plane.direction_cosines(), 1e-12));
    }

    #[test]
    fn from_pole_inverts_pole() {
        let plane = Plane::new(120f64.to_radians(), 35f64.to_radians());
        let back = Plane::from_pole(&plane.pole());
        assert!((back.strike - plane.strike).abs() < 1e-9);
        assert!((back.dip - plane.dip).abs() < 1e-9);
    }

    #[test]
    fn negative_dip_flips_strike() {
        let plane = Plane::new(10f64.to_radians(), -30f64.to_radians()).normalised();
        assert_eq!(to_int_degrees(plane.strike), 190);
        assert_eq!(to_int_degrees(plane.dip), 30);
    }

    #[test]
    fn upward_pole_gives_dip_within_vertical() {
        let plane = Plane::from_pole(&Line::new(-30f64.to_radians(), 0.0));
        assert_eq!(plane.to_string(), "270/60");
        assert!(plane.dip <= FRAC_PI_2);

        let overturned = Plane::new(0.0, 120f64.to_radians()).normalised();
        assert_eq!(overturned.to_string(), "180/60");
    }

    #[test]
    fn spanning_lines_give_containing_plane() {
        let north = Line::new(0.0, 0.0);
        let east = Line::new(0.0, FRAC_PI_2);
        let plane = Plane::from_spanning_lines(&north, &east).unwrap();
        assert!(plane.dip.abs() < 1e-9);

        let dipping = Line::new(FRAC_PI_2, 0.0);
        let plane = Plane::from_spanning_lines(&north, &dipping).unwrap();
        assert!((plane.dip - FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn display_uses_zero_padded_degrees() {
        let plane = Plane::new(90f64.to_radians(), 5f64.to_radians());
        assert_eq!(plane.to_string(), "090/05");
    }

    proptest! {
        #[test]
        fn pole_is_the_vector_it_was_created_from(
            n in 0.01f64..1.0, e in 0.01f64..1.0, d in 0.01f64..1.0,
        ) {
            let dircos = DirectionCosines::new(n, e, d);
            let plane = Plane::from_direction_cosines(dircos);
            prop_assert!(plane.direction_cosines().approx_eq(&dircos.normalised(), 1e-9));
        }

        #[test]
        fn parallel_lines_cannot_span_a_plane(
            plunge in 0.0f64..FRAC_PI_2, trend in 0.0f64..(2.0 * PI),
        ) {
            let line = Line::new(plunge, trend);
            prop_assert_eq!(
                Plane::from_spanning_lines(&line, &line),
                Err(GeometryError::ParallelLines(line, line))
            );
        }
    }
}
