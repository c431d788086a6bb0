use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, SQRT_2, TAU};

use serde::{Deserialize, Serialize};

use crate::data::model::NetObject;
use crate::geometry::{Line, Plane, Rotation};

// ---------------------------------------------------------------------------
// Projection kinds
// ---------------------------------------------------------------------------

/// Which hemisphere projection to draw.
///
/// Both map the lower hemisphere onto the unit disc with north up; a
/// horizontal line lands on the primitive circle and a vertical one in the
/// centre.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Projection {
    /// Schmidt net; preserves areas.
    #[default]
    EqualArea,
    /// Wulff net; preserves angles.
    EqualAngle,
}

impl Projection {
    pub const ALL: [Projection; 2] = [Projection::EqualArea, Projection::EqualAngle];

    pub fn label(self) -> &'static str {
        match self {
            Projection::EqualArea => "Equal Area",
            Projection::EqualAngle => "Equal Angle",
        }
    }

    /// Distance from the centre for a line of the given plunge.
    pub fn radius(self, plunge: f64) -> f64 {
        let half_colatitude = FRAC_PI_4 - plunge / 2.0;
        match self {
            Projection::EqualAngle => half_colatitude.tan(),
            Projection::EqualArea => SQRT_2 * half_colatitude.sin(),
        }
    }

    /// Where a line's point sits in math space (x right, y up).
    pub fn line_coordinates(self, line: &Line) -> [f64; 2] {
        let r = self.radius(line.plunge);
        let (sin_trend, cos_trend) = line.trend.sin_cos();
        [r * sin_trend, r * cos_trend]
    }

    /// Polyline through the sampled lines of a rotation.
    pub fn rotation_coordinates(self, rotation: &Rotation, samples: usize) -> Vec<[f64; 2]> {
        rotation
            .constituent_lines(samples)
            .map(|line| self.line_coordinates(&line))
            .collect()
    }

    /// Project any net object: lines become points, the rest curves.
    pub fn project(self, netobj: &NetObject, samples: usize) -> Projected {
        match netobj {
            NetObject::Line(line) => Projected::Point(self.line_coordinates(line)),
            NetObject::Plane(plane) => {
                Projected::Curve(self.rotation_coordinates(&plane.as_rotation(), samples))
            }
            NetObject::Rotation(rotation) => {
                Projected::Curve(self.rotation_coordinates(rotation, samples))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Projected shapes and hit testing
// ---------------------------------------------------------------------------

/// A net object after projection into math space.
#[derive(Debug, Clone, PartialEq)]
pub enum Projected {
    Point([f64; 2]),
    Curve(Vec<[f64; 2]>),
}

impl Projected {
    /// Distance from `pointer` to the point, or to the nearest curve vertex.
    pub fn distance_to(&self, pointer: [f64; 2]) -> f64 {
        let dist = |p: &[f64; 2]| (p[0] - pointer[0]).hypot(p[1] - pointer[1]);
        match self {
            Projected::Point(p) => dist(p),
            Projected::Curve(points) => points.iter().map(dist).fold(f64::INFINITY, f64::min),
        }
    }
}

/// The key of the candidate closest to `pointer`, if within `tolerance`.
pub fn nearest_within<'a, K>(
    candidates: impl IntoIterator<Item = (K, &'a Projected)>,
    pointer: [f64; 2],
    tolerance: f64,
) -> Option<K> {
    candidates
        .into_iter()
        .map(|(key, shape)| (key, shape.distance_to(pointer)))
        .filter(|(_, distance)| *distance <= tolerance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(key, _)| key)
}

// ---------------------------------------------------------------------------
// Guide net
// ---------------------------------------------------------------------------

/// Small circle at the given latitude, measured from the east-west
/// vertical plane around the north-south horizontal axis.
pub fn latitude_guide(latitude: f64) -> Rotation {
    Rotation::new(Line::new(0.0, 0.0), Line::new(0.0, FRAC_PI_2 - latitude))
}

/// Great circle striking north (dipping east) or south (dipping west).
pub fn dip_guide(dip: f64, left_hemisphere: bool) -> Rotation {
    let strike = if left_hemisphere { PI } else { 0.0 };
    Plane::new(strike, dip).as_rotation()
}

/// Every guide curve for a net with lines `spacing_deg` degrees apart.
pub fn guide_rotations(spacing_deg: u32) -> Vec<Rotation> {
    let spacing = spacing_deg.clamp(1, 90) as usize;
    let mut guides: Vec<Rotation> = (-90..=90)
        .step_by(spacing)
        .filter(|lat: &i32| lat.abs() != 90)
        .map(|lat| latitude_guide(f64::from(lat).to_radians()))
        .collect();
    for dip in (0..90).step_by(spacing) {
        let dip = f64::from(dip).to_radians();
        guides.push(dip_guide(dip, true));
        guides.push(dip_guide(dip, false));
    }
    guides.push(dip_guide(FRAC_PI_2, false));
    guides
}

/// The boundary of the net (all horizontal lines).
pub fn primitive_circle(samples: usize) -> Vec<[f64; 2]> {
    let samples = samples.max(3);
    (0..=samples)
        .map(|i| {
            let (sin, cos) = (i as f64 * TAU / samples as f64).sin_cos();
            [sin, cos]
        })
        .collect()
}

/// Map math space to a square image of side `size`, y growing downward.
pub fn to_screen(point: [f64; 2], size: f64) -> [f64; 2] {
    [(point[0] + 1.0) * size / 2.0, (1.0 - point[1]) * size / 2.0]
}
