use std::collections::BTreeMap;

use eframe::egui::{Color32, Theme};
use palette::{Hsl, IntoColor, Srgb};

/// Line colour of the per-metric chart.
pub const METRIC_COLOR: Color32 = Color32::from_rgb(0x4B, 0xCD, 0xF8);
/// Line colour of the combined weather × hour chart.
pub const COMBINED_COLOR: Color32 = Color32::from_rgb(255, 0, 0);
pub const MIN_COLOR: Color32 = Color32::from_rgba_premultiplied(128, 100, 25, 128);
pub const MAX_COLOR: Color32 = Color32::from_rgba_premultiplied(128, 50, 0, 128);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Highlight colour for the selected viewing angle.
pub fn accent(theme: Theme) -> Color32 {
    match theme {
        Theme::Dark => Color32::RED,
        Theme::Light => Color32::from_rgb(0x00, 0xFF, 0xFB),
    }
}

/// Heatmap cell colour: `base` with opacity scaled by `intensity` in `[0, 1]`.
pub fn heat_color(base: Color32, intensity: f64) -> Color32 {
    let alpha = (intensity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(base.r(), base.g(), base.b(), alpha)
}

// ---------------------------------------------------------------------------
// Color mapping: selector label → Color32
// ---------------------------------------------------------------------------

/// Maps the selectors of a table to distinct colours.
#[derive(Debug, Clone)]
pub struct SeriesColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl SeriesColors {
    pub fn new(selectors: &[&str]) -> Self {
        let palette = generate_palette(selectors.len());
        let mapping = selectors
            .iter()
            .zip(palette)
            .map(|(s, c)| (s.to_string(), c))
            .collect();

        SeriesColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, selector: &str) -> Color32 {
        self.mapping
            .get(selector)
            .copied()
            .unwrap_or(self.default_color)
    }
}
