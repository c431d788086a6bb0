use std::f64::consts::{FRAC_PI_2, PI, TAU};

use anyhow::Context;
use serde_json::{json, Value};

/// Direction cosines (north, east, down) of a line.
fn line_vector(plunge: f64, trend: f64) -> [f64; 3] {
    [
        plunge.cos() * trend.cos(),
        plunge.cos() * trend.sin(),
        plunge.sin(),
    ]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Plunge and trend of a vector, flipped into the lower hemisphere.
fn plunge_trend(v: [f64; 3]) -> (f64, f64) {
    let v = if v[2] < 0.0 { v.map(|c| -c) } else { v };
    let norm = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    let plunge = (v[2] / norm).clamp(-1.0, 1.0).asin();
    let trend = v[1].atan2(v[0]).rem_euclid(TAU);
    (plunge, trend)
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + std_dev * z
    }
}

/// Bedding of a cylindrical fold: poles spread along the profile great
/// circle on two limbs, with some scatter.
fn fold_bedding(rng: &mut SimpleRng, axis: (f64, f64), limbs: [(f64, f64); 2]) -> Vec<Value> {
    let (axis_plunge, axis_trend) = axis;
    let a = line_vector(axis_plunge, axis_trend);
    // Horizontal and perpendicular to the axis, then the third direction.
    let u = line_vector(0.0, axis_trend + FRAC_PI_2);
    let v = cross(a, u);

    let mut data = Vec::new();
    for (centre, spread) in limbs {
        for _ in 0..12 {
            let theta = rng.gauss(centre, spread);
            let wobble = rng.gauss(0.0, 0.05);
            let pole = [0, 1, 2].map(|i| theta.cos() * u[i] + theta.sin() * v[i] + wobble * a[i]);
            let (plunge, trend) = plunge_trend(pole);
            let strike = (trend + FRAC_PI_2).rem_euclid(TAU);
            let dip = FRAC_PI_2 - plunge;
            data.push(json!({ "strike": strike, "dip": dip }));
        }
    }
    data
}

fn lineations(rng: &mut SimpleRng, mean: (f64, f64), count: usize) -> Vec<Value> {
    (0..count)
        .map(|_| {
            let plunge = rng.gauss(mean.0, 0.08).clamp(0.0, FRAC_PI_2);
            let trend = rng.gauss(mean.1, 0.12).rem_euclid(TAU);
            json!({ "plunge": plunge, "trend": trend })
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "TestData.snet".to_string());
    let mut rng = SimpleRng::new(42);

    let axis = (10f64.to_radians(), 30f64.to_radians());
    let bedding = fold_bedding(&mut rng, axis, [(0.6, 0.15), (2.4, 0.15)]);
    let lineation = lineations(&mut rng, axis, 15);

    let document = json!([
        {
            "name": "Bedding",
            "enabled": true,
            "data_type": "plane",
            "style": { "color": "#1f77b4", "width": 1.5 },
            "data": bedding
        },
        {
            "name": "Fold hinge lineation",
            "enabled": true,
            "data_type": "line",
            "style": { "color": "#d62728", "width": 2.0 },
            "data": lineation
        },
        {
            "name": "Empty group",
            "enabled": false
        }
    ]);

    let text = serde_json::to_string_pretty(&document)?;
    std::fs::write(&output_path, text).with_context(|| format!("writing {output_path}"))?;

    println!(
        "Wrote {} bedding planes and {} lineations to {output_path}",
        group_len(&document, 0),
        group_len(&document, 1)
    );
    Ok(())
}

fn group_len(document: &Value, group: usize) -> usize {
    document[group]["data"].as_array().map_or(0, Vec::len)
}
