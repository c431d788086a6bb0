use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::projection::Projection;

/// User preferences kept between runs through eframe's storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Projection shown in the canvas tab and used for export.
    pub projection: Projection,
    pub show_guides: bool,
    /// Angle between neighbouring guide circles.
    pub guide_spacing_deg: u32,
    /// Segments per half-turn when drawing planes and rotations.
    pub rotation_samples: usize,
    /// Share of fold data on the top limb.
    pub top_limb_proportion: f64,
    /// Where file dialogs start.
    pub last_directory: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            projection: Projection::default(),
            show_guides: true,
            guide_spacing_deg: 10,
            rotation_samples: 100,
            top_limb_proportion: 0.5,
            last_directory: None,
        }
    }
}

impl Settings {
    pub const GUIDE_SPACINGS: [u32; 4] = [2, 5, 10, 15];

    /// Rotation samples, never less than a handful.
    pub fn samples(&self) -> usize {
        self.rotation_samples.clamp(8, 1000)
    }
}
