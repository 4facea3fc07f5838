use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps category labels (genres, countries, …) to distinct colours, so the same
/// genre keeps its colour across every pie of a page.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let labels: Vec<&str> = labels.into_iter().collect();
        let palette = generate_palette(labels.len());
        let mapping = labels
            .into_iter()
            .zip(palette)
            .map(|(label, c)| (label.to_string(), c))
            .collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a label; unknown labels are grey.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(Color32::GRAY)
    }
}

// ---------------------------------------------------------------------------
// Fixed colours
// ---------------------------------------------------------------------------

pub const HIGHLIGHT: Color32 = Color32::from_rgb(0x4e, 0x79, 0xa7);
pub const POSITIVE: Color32 = Color32::from_rgb(0x3c, 0xc4, 0x65);
pub const NEGATIVE: Color32 = Color32::from_rgb(0xe1, 0x57, 0x59);
pub const YES: Color32 = Color32::from_rgb(0xa0, 0xe7, 0xa0);
pub const NO: Color32 = Color32::from_rgb(0xf5, 0xa0, 0xa0);

/// (yes, no) colours of a two-way split chart.
pub type SplitColors = (Color32, Color32);

pub const COLLECTION_SPLIT: SplitColors = (POSITIVE, HIGHLIGHT);
pub const INDIE_SPLIT: SplitColors = (
    Color32::from_rgb(0x92, 0x4e, 0xa7),
    Color32::from_rgb(0x55, 0x3c, 0xc4),
);

/// Exclusive / non-exclusive colours in the brand colours of a family.
pub fn family_split(family: &str) -> SplitColors {
    match family {
        "Nintendo" => (Color32::from_rgb(0xE6, 0x00, 0x12), Color32::from_rgb(0xFF, 0x66, 0x66)),
        "PlayStation" => (Color32::from_rgb(0x00, 0x30, 0x87), Color32::from_rgb(0x4F, 0x83, 0xCC)),
        "Xbox" => (Color32::from_rgb(0x10, 0x7C, 0x10), Color32::from_rgb(0x5B, 0xC7, 0x4B)),
        "Windows" => (Color32::from_rgb(0x00, 0x78, 0xD7), Color32::from_rgb(0x6E, 0xC1, 0xE4)),
        "Apple" => (Color32::from_rgb(0x99, 0x99, 0x99), Color32::from_rgb(0xCC, 0xCC, 0xCC)),
        "Linux" => (Color32::from_rgb(0x00, 0x00, 0x00), Color32::from_rgb(0x66, 0x66, 0x66)),
        "Sega" => (Color32::from_rgb(0x00, 0x4C, 0x97), Color32::from_rgb(0x5B, 0x9B, 0xD5)),
        "Smart TV" => (Color32::from_rgb(0xFF, 0x99, 0x00), Color32::from_rgb(0xFF, 0xCC, 0x66)),
        _ => (HIGHLIGHT, Color32::GRAY),
    }
}

pub fn rating_color(rating: f64) -> Color32 {
    let rounded = rating.round();
    if rounded >= 90.0 {
        Color32::from_rgb(0x21, 0xA6, 0x71)
    } else if rounded >= 75.0 {
        Color32::from_rgb(0xa0, 0xe7, 0xa0)
    } else if rounded >= 60.0 {
        Color32::from_rgb(0xff, 0xf5, 0xa0)
    } else {
        Color32::from_rgb(0xf5, 0xa0, 0xa0)
    }
}

pub fn age_rating_color(age: &str) -> Color32 {
    match age.to_lowercase().as_str() {
        "everyone" => Color32::from_rgb(0xa0, 0xe7, 0xa0),
        "child" => Color32::from_rgb(0xad, 0xd8, 0xe6),
        "teen" => Color32::from_rgb(0xff, 0xf5, 0xa0),
        "young" => Color32::from_rgb(0xff, 0xa5, 0x00),
        "18+" => Color32::from_rgb(0xf5, 0xa0, 0xa0),
        _ => Color32::GRAY,
    }
}

pub fn game_type_color(game_type: &str) -> Color32 {
    match game_type {
        "Remake" => Color32::from_rgb(0xae, 0x43, 0xa3),
        "Remaster" => Color32::from_rgb(0x57, 0xa4, 0xc0),
        "Main Game" => Color32::from_rgb(0x6a, 0x43, 0xae),
        "Standalone Expansion" => Color32::from_rgb(0xae, 0x43, 0x51),
        _ => Color32::DARK_GRAY,
    }
}
