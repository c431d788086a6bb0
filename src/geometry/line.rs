use std::fmt;

use serde::{Deserialize, Serialize};

use super::{to_int_degrees, wrap_azimuth, DirectionCosines};

/// Rotated vectors this far above the horizontal still count as horizontal.
const HORIZONTAL_EPSILON: f64 = 1e-12;

// ---------------------------------------------------------------------------
// Line – a direction given by plunge and trend
// ---------------------------------------------------------------------------

/// A line on the stereonet, e.g. a lineation or the pole to a plane.
///
/// `plunge` is measured downward from horizontal, `trend` clockwise from
/// north. Both are radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub plunge: f64,
    pub trend: f64,
}

impl Line {
    pub const fn new(plunge: f64, trend: f64) -> Self {
        Self { plunge, trend }
    }

    /// Build a line from north, east, down components.
    ///
    /// The components are normalised first, so any non-zero vector is
    /// accepted. Upward vectors give a negative plunge.
    pub fn from_direction_cosines(cosines: DirectionCosines) -> Self {
        let DirectionCosines { north, east, down } = cosines.normalised();
        Self {
            trend: wrap_azimuth(east.atan2(north)),
            plunge: down.clamp(-1.0, 1.0).asin(),
        }
    }

    /// North, east, down unit vector of the line.
    pub fn direction_cosines(&self) -> DirectionCosines {
        let (sin_plunge, cos_plunge) = self.plunge.sin_cos();
        let (sin_trend, cos_trend) = self.trend.sin_cos();
        DirectionCosines::new(cos_plunge * cos_trend, cos_plunge * sin_trend, sin_plunge)
    }

    /// Rotate this line by `angle` around `axis` (right-handed, looking down
    /// the axis).
    ///
    /// A result pointing into the upper hemisphere is replaced by its
    /// opposite, so the returned line always has a non-negative plunge.
    pub fn rotate_around(&self, axis: &Line, angle: f64) -> Line {
        let DirectionCosines { north, east, down } = axis.direction_cosines();
        let (rot_sin, rot_cos) = angle.sin_cos();
        let multiplier = 1.0 - rot_cos;
        let transform = [
            [
                rot_cos + north * north * multiplier,
                -down * rot_sin + north * east * multiplier,
                east * rot_sin + north * down * multiplier,
            ],
            [
                down * rot_sin + east * north * multiplier,
                rot_cos + east * east * multiplier,
                -north * rot_sin + east * down * multiplier,
            ],
            [
                -east * rot_sin + down * north * multiplier,
                north * rot_sin + down * east * multiplier,
                rot_cos + down * down * multiplier,
            ],
        ];

        let unrotated = self.direction_cosines();
        let unrotated = [unrotated.north, unrotated.east, unrotated.down];
        let [rot_north, rot_east, rot_down] = transform.map(|row| {
            row.iter()
                .zip(unrotated.iter())
                .map(|(t, u)| t * u)
                .sum::<f64>()
        });

        let mut rotated = DirectionCosines::new(rot_north, rot_east, rot_down);
        if rotated.down < -HORIZONTAL_EPSILON {
            rotated = -rotated;
        } else if rotated.down < 0.0 {
            rotated.down = 0.0;
        }
        Line::from_direction_cosines(rotated)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}/{:03}",
            to_int_degrees(self.plunge),
            to_int_degrees(self.trend)
        )
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use proptest::prelude::*;

    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn assert_same_direction(a: &Line, b: &Line) {
        let (a, b) = (a.direction_cosines(), b.direction_cosines());
        assert!(a.approx_eq(&b, TOLERANCE), "{a} != {b}");
    }

    #[test]
    fn creation_from_axis_vectors() {
        let cases = [
            (DirectionCosines::new(1.0, 0.0, 0.0), Line::new(0.0, 0.0)),
            (DirectionCosines::new(0.0, 0.0, 1.0), Line::new(PI / 2.0, 0.0)),
            (DirectionCosines::new(0.0, 1.0, 0.0), Line::new(0.0, PI / 2.0)),
            (DirectionCosines::new(1.0, 0.0, 1.0), Line::new(PI / 4.0, 0.0)),
            (DirectionCosines::new(1.0, 1.0, 0.0), Line::new(0.0, PI / 4.0)),
        ];
        for (dircos, expected) in cases {
            assert_same_direction(&Line::from_direction_cosines(dircos), &expected);
        }
    }

    #[test]
    fn trend_is_wrapped_into_positive_range() {
        let line = Line::from_direction_cosines(DirectionCosines::new(0.0, -1.0, 0.0));
        assert!((line.trend - 3.0 * PI / 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn rotation_result_lands_in_lower_hemisphere() {
        let axis = Line::new(PI / 4.0, 3.0 * PI / 2.0);
        let rotated = Line::new(0.0, 0.0).rotate_around(&axis, PI);
        assert_same_direction(&rotated, &Line::new(0.0, PI));
    }

    #[test]
    fn rounding_noise_does_not_reverse_horizontal_results() {
        let axis = Line::new(PI / 4.0, 3.0 * PI / 2.0);
        let rotated = Line::new(0.0, 0.0).rotate_around(&axis, PI);
        assert!(rotated.plunge >= 0.0);
        assert!((rotated.trend - PI).abs() < TOLERANCE, "{rotated}");
    }

    #[test]
    fn quarter_turn_around_vertical_moves_trend() {
        let vertical = Line::new(PI / 2.0, 0.0);
        let rotated = Line::new(0.0, 0.0).rotate_around(&vertical, PI / 2.0);
        assert_same_direction(&rotated, &Line::new(0.0, PI / 2.0));
    }

    #[test]
    fn display_uses_zero_padded_degrees() {
        let line = Line::new(5f64.to_radians(), 30f64.to_radians());
        assert_eq!(line.to_string(), "05/030");
    }

    proptest! {
        #[test]
        fn keeps_direction_cosines_it_was_built_from(
            n in 0.01f64..1.0, e in 0.01f64..1.0, d in 0.01f64..1.0,
        ) {
            let dircos = DirectionCosines::new(n, e, d);
            let line = Line::from_direction_cosines(dircos);
            prop_assert!(line.direction_cosines().approx_eq(&dircos.normalised(), TOLERANCE));
        }

        #[test]
        fn rotation_around_self_is_identity(
            plunge in 0.05f64..(PI / 2.0), trend in 0.0f64..(2.0 * PI), angle in -2.0 * PI..2.0 * PI,
        ) {
            let line = Line::new(plunge, trend);
            let rotated = line.rotate_around(&line, angle);
            prop_assert!(rotated.direction_cosines().approx_eq(&line.direction_cosines(), 1e-6));
        }

        #[test]
        fn rotated_lines_never_point_up(
            plunge in -PI / 2.0..PI / 2.0, trend in 0.0f64..(2.0 * PI),
            axis_plunge in 0.0f64..(PI / 2.0), axis_trend in 0.0f64..(2.0 * PI),
            angle in 0.0f64..PI,
        ) {
            let axis = Line::new(axis_plunge, axis_trend);
            let rotated = Line::new(plunge, trend).rotate_around(&axis, angle);
            prop_assert!(rotated.plunge >= 0.0);
        }
    }
}
