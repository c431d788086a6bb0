use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Line;

/// The curve swept by rotating `base_line` half a turn around `rotation_axis`.
///
/// A base line perpendicular to the axis traces a great circle; any other
/// base line traces a small circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub rotation_axis: Line,
    pub base_line: Line,
}

impl Rotation {
    pub const fn new(rotation_axis: Line, base_line: Line) -> Self {
        Self {
            rotation_axis,
            base_line,
        }
    }

    /// The base line rotated by `i·π/samples` for `i` in `0..=samples`.
    pub fn constituent_lines(&self, samples: usize) -> impl Iterator<Item = Line> + '_ {
        let samples = samples.max(1);
        (0..=samples).map(move |i| {
            let angle = i as f64 * PI / samples as f64;
            self.base_line.rotate_around(&self.rotation_axis, angle)
        })
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} around {}", self.base_line, self.rotation_axis)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use crate::geometry::Plane;

    #[test]
    fn yields_samples_plus_one_lines() {
        let rotation = Rotation::new(Line::new(FRAC_PI_2, 0.0), Line::new(0.0, 0.0));
        assert_eq!(rotation.constituent_lines(10).count(), 11);
        assert_eq!(rotation.constituent_lines(0).count(), 2);
    }

    #[test]
    fn plane_rotation_stays_on_the_plane() {
        let plane = Plane::new(40f64.to_radians(), 60f64.to_radians());
        let pole = plane.direction_cosines();
        for line in plane.as_rotation().constituent_lines(36) {
            assert!(line.direction_cosines().dot_product(&pole).abs() < 1e-9);
        }
    }

    #[test]
    fn display_names_base_and_axis() {
        let rotation = Rotation::new(Line::new(FRAC_PI_2, 0.0), Line::new(0.0, PI));
        assert_eq!(rotation.to_string(), "00/180 around 90/000");
    }
}
