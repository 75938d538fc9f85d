use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Categorical palette
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
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

/// Fixed colour for each generation, 2G to 5G.
pub const GENERATION_COLORS: [Color32; 4] = [
    Color32::from_rgb(102, 194, 165),
    Color32::from_rgb(252, 141, 98),
    Color32::from_rgb(141, 160, 203),
    Color32::from_rgb(231, 138, 195),
];

// ---------------------------------------------------------------------------
// Continuous scales: value in [0, 1] → Color32
// ---------------------------------------------------------------------------

/// Sequential colour scales used for value-coloured bars and map markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScale {
    Blues,
    Purples,
    Turbo,
}

impl ColorScale {
    fn stops(self) -> &'static [(u8, u8, u8)] {
        match self {
            ColorScale::Blues => &[(222, 235, 247), (107, 174, 214), (8, 48, 107)],
            ColorScale::Purples => &[(239, 237, 245), (158, 154, 200), (63, 0, 125)],
            ColorScale::Turbo => &[
                (48, 18, 59),
                (70, 134, 251),
                (27, 229, 181),
                (164, 252, 60),
                (251, 185, 56),
                (228, 70, 10),
                (122, 4, 3),
            ],
        }
    }

    /// Colour at position `t` (clamped to `[0, 1]`), interpolated linearly
    /// between the scale's stops.
    pub fn at(self, t: f64) -> Color32 {
        let stops = self.stops();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) as f32 } else { 0.0 };
        let scaled = t * (stops.len() - 1) as f32;
        let i = (scaled.floor() as usize).min(stops.len() - 2);
        let local = scaled - i as f32;

        let lin = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
            Srgb::<u8>::new(r, g, b).into_format::<f32>().into_linear()
        };
        let mixed = lin(stops[i]).mix(lin(stops[i + 1]), local);
        to_color32(Srgb::from_linear(mixed))
    }

    /// Colour for `value` relative to the `[0, max]` range.
    pub fn for_value(self, value: f64, max: f64) -> Color32 {
        if max <= 0.0 {
            self.at(0.0)
        } else {
            self.at(value / max)
        }
    }
}
