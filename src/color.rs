use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::{GroupStyle, Rgb};

/// Hue offsets cycled through when colouring new groups.
const GROUP_HUES: usize = 8;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            Rgb([
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            ])
        })
        .collect()
}

/// Default style for the group at `index`: hues cycle so that neighbouring
/// groups differ.
pub fn style_for_group(index: usize) -> GroupStyle {
    let palette = generate_palette(GROUP_HUES);
    GroupStyle {
        color: palette[index % GROUP_HUES],
        ..GroupStyle::default()
    }
}

// ---------------------------------------------------------------------------
// Conversions for rendering
// ---------------------------------------------------------------------------

pub fn to_color32(color: Rgb) -> Color32 {
    let [r, g, b] = color.0;
    Color32::from_rgb(r, g, b)
}

pub fn from_color32(color: Color32) -> Rgb {
    Rgb([color.r(), color.g(), color.b()])
}

/// Colour of disabled guide curves.
pub const GUIDE_COLOR: Color32 = Color32::from_gray(190);
