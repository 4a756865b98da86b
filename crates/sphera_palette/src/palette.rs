//! The palette value: harmony parameters plus the colors they produced

use crate::error::{PaletteError, Result};
use crate::harmony::{clamp_spread, HarmonyScheme};
use serde::Serialize;
use sphera_core::{HexColor, Hsl};

/// Colors shown before the first user interaction
pub const DEFAULT_COLORS: [HexColor; 3] = [
    HexColor::from_u32(0xFC91E1),
    HexColor::from_u32(0xFC91AC),
    HexColor::from_u32(0xFCAC91),
];

/// Spread shown before the first user interaction, in degrees
pub const DEFAULT_SPREAD: f32 = 30.0;

/// Current harmony parameters and the ordered colors on screen
///
/// Read-only outside this crate; [`PaletteState`](crate::PaletteState) is
/// the only writer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Palette {
    scheme: HarmonyScheme,
    base: Hsl,
    spread: f32,
    colors: Vec<HexColor>,
    in_harmony: bool,
}

impl Palette {
    /// Palette taken from a fixed color list
    ///
    /// The HSL fields are derived from the first color. The list is kept as
    /// given, so it only counts as in harmony once it is regenerated.
    pub fn from_colors(scheme: HarmonyScheme, spread: f32, colors: Vec<HexColor>) -> Result<Self> {
        let first = *colors.first().ok_or(PaletteError::EmptyPalette)?;
        Ok(Self {
            scheme,
            base: first.to_hsl(),
            spread: clamp_spread(spread),
            colors,
            in_harmony: false,
        })
    }

    pub(crate) fn from_harmony(
        scheme: HarmonyScheme,
        base: Hsl,
        spread: f32,
        colors: Vec<HexColor>,
    ) -> Self {
        Self {
            scheme,
            base,
            spread,
            colors,
            in_harmony: true,
        }
    }

    pub(crate) fn replace_slot(&mut self, index: usize, color: HexColor) -> Result<()> {
        let len = self.colors.len();
        let slot = self
            .colors
            .get_mut(index)
            .ok_or(PaletteError::SlotOutOfRange { index, len })?;
        if *slot != color {
            *slot = color;
            self.in_harmony = false;
        }
        Ok(())
    }

    pub fn scheme(&self) -> HarmonyScheme {
        self.scheme
    }

    /// Base color as HSL
    pub fn base(&self) -> Hsl {
        self.base
    }

    /// Base hue in degrees, `[0, 360)`
    pub fn base_hue(&self) -> f32 {
        self.base.hue
    }

    /// Saturation in percent
    pub fn saturation(&self) -> f32 {
        self.base.saturation
    }

    /// Brightness (HSL lightness) in percent
    pub fn brightness(&self) -> f32 {
        self.base.lightness
    }

    /// Spread in degrees, `[0, 90]`
    pub fn spread(&self) -> f32 {
        self.spread
    }

    pub fn colors(&self) -> &[HexColor] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<HexColor> {
        self.colors.get(index).copied()
    }

    /// The canonical first swatch
    pub fn primary(&self) -> HexColor {
        // Construction guarantees at least one color
        self.colors[0]
    }

    /// False after a single slot was edited by hand, until the next regeneration
    pub fn is_in_harmony(&self) -> bool {
        self.in_harmony
    }

    /// Colors as canonical `#RRGGBB` strings
    pub fn hex_list(&self) -> Vec<String> {
        self.colors.iter().map(ToString::to_string).collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            scheme: HarmonyScheme::Analogous,
            base: DEFAULT_COLORS[0].to_hsl(),
            spread: DEFAULT_SPREAD,
            colors: DEFAULT_COLORS.to_vec(),
            in_harmony: false,
        }
    }
}
