//! Background and accent derived from the primary swatch

use crate::palette::Palette;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sphera_core::{HexColor, Hsl};

/// Presentation flags with no effect on the palette itself
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayToggles {
    pub white_background: bool,
    pub shadows_enabled: bool,
}

impl Default for DisplayToggles {
    fn default() -> Self {
        Self {
            white_background: false,
            shadows_enabled: true,
        }
    }
}

/// Dark backgrounds keep the primary hue at low saturation and lightness
const DARK_SATURATION_FACTOR: f32 = 0.3;
const DARK_LIGHTNESS: f32 = 8.0;

/// Container background and accent color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Backdrop {
    pub background: HexColor,
    pub accent: HexColor,
}

impl Backdrop {
    /// Derive from `colors[0]` and the background toggle
    pub fn derive(palette: &Palette, toggles: DisplayToggles) -> Self {
        let accent = palette.primary();
        let background = if toggles.white_background {
            HexColor::WHITE
        } else {
            let hsl = accent.to_hsl();
            Hsl::new(hsl.hue, hsl.saturation * DARK_SATURATION_FACTOR, DARK_LIGHTNESS).into()
        };
        Self { background, accent }
    }
}

/// CSS custom properties for the current palette
///
/// Keys are variable names without the `--` prefix, in a stable order:
/// `background`, `accent`, then `color-0`, `color-1`, ...
pub fn css_variables(palette: &Palette, backdrop: &Backdrop) -> IndexMap<String, String> {
    let mut vars = IndexMap::with_capacity(palette.len() + 2);
    vars.insert("background".into(), backdrop.background.to_string());
    vars.insert("accent".into(), backdrop.accent.to_string());
    for (index, color) in palette.colors().iter().enumerate() {
        vars.insert(format!("color-{index}"), color.to_string());
    }
    vars
}
