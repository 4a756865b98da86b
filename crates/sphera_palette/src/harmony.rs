//! Harmony engine
//!
//! Derives an ordered palette from one base color. Index 0 is always the base
//! color itself; the remaining entries depend on the scheme and on the
//! configured output arity.
//!
//! All hue math is done on normalized hues and wrapped back into `[0, 1)`.
//! Saturation and lightness products are clamped into `[0, 1]`.

use crate::error::{PaletteError, Result};
use serde::{Deserialize, Serialize};
use sphera_core::{HexColor, Hsl};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Largest accepted spread, in degrees
pub const MAX_SPREAD: f32 = 90.0;

/// Saturation factor for "variation" entries
const VARIANT_SATURATION: f32 = 0.8;
/// Lightness factor for "variation" entries
const VARIANT_LIGHTNESS: f32 = 1.1;
/// Saturation factor for the complementary shade
const SHADE_SATURATION: f32 = 0.6;
/// Lightness factor for the complementary shade
const SHADE_LIGHTNESS: f32 = 0.9;
/// Lightness factor for odd entries of the five-color triad
const TRIAD_TINT_LIGHTNESS: f32 = 1.2;

/// Named rule for deriving a palette from one base color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmonyScheme {
    /// Neighboring hues, `spread` degrees apart
    Analogous,
    /// Base hue and its opposite
    Complementary,
    /// Three hues 120 degrees apart
    Triadic,
    /// Base hue and the two neighbors of its opposite
    SplitComplementary,
}

impl HarmonyScheme {
    /// Stable id for config and command lines
    pub fn id(self) -> &'static str {
        match self {
            Self::Analogous => "analogous",
            Self::Complementary => "complementary",
            Self::Triadic => "triadic",
            Self::SplitComplementary => "split_complementary",
        }
    }

    /// User-facing name
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Analogous => "Analogous",
            Self::Complementary => "Complementary",
            Self::Triadic => "Triadic",
            Self::SplitComplementary => "Split Complementary",
        }
    }

    /// Whether `spread` changes the output of this scheme
    pub fn uses_spread(self) -> bool {
        match self {
            Self::Analogous | Self::SplitComplementary => true,
            Self::Complementary | Self::Triadic => false,
        }
    }

    /// Every scheme, in selector order
    pub fn all() -> &'static [HarmonyScheme] {
        const SCHEMES: [HarmonyScheme; 4] = [
            HarmonyScheme::Analogous,
            HarmonyScheme::Complementary,
            HarmonyScheme::Triadic,
            HarmonyScheme::SplitComplementary,
        ];
        &SCHEMES
    }
}

impl Display for HarmonyScheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for HarmonyScheme {
    type Err = PaletteError;

    /// Accepts ids and display names, ignoring case, spaces, `-` and `_`
    fn from_str(s: &str) -> Result<Self> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match folded.as_str() {
            "analogous" => Ok(Self::Analogous),
            "complementary" => Ok(Self::Complementary),
            "triadic" => Ok(Self::Triadic),
            "splitcomplementary" => Ok(Self::SplitComplementary),
            _ => Err(PaletteError::UnknownHarmonyScheme(s.to_string())),
        }
    }
}

/// Number of colors the engine produces
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arity {
    #[default]
    Three,
    Five,
}

impl Arity {
    pub fn count(self) -> usize {
        match self {
            Self::Three => 3,
            Self::Five => 5,
        }
    }
}

/// Engine configuration: output arity and the schemes it accepts
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarmonyConfig {
    pub arity: Arity,
    pub schemes: Vec<HarmonyScheme>,
}

impl Default for HarmonyConfig {
    fn default() -> Self {
        Self {
            arity: Arity::Three,
            schemes: HarmonyScheme::all().to_vec(),
        }
    }
}

/// Palette generator for one [`HarmonyConfig`]
#[derive(Clone, Debug, PartialEq)]
pub struct HarmonyEngine {
    config: HarmonyConfig,
}

impl HarmonyEngine {
    pub fn new(config: HarmonyConfig) -> Result<Self> {
        if config.schemes.is_empty() {
            return Err(PaletteError::NoSchemesEnabled);
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &HarmonyConfig {
        &self.config
    }

    pub fn arity(&self) -> Arity {
        self.config.arity
    }

    /// Enabled schemes, in configured order
    pub fn schemes(&self) -> &[HarmonyScheme] {
        &self.config.schemes
    }

    pub fn supports(&self, scheme: HarmonyScheme) -> bool {
        self.config.schemes.contains(&scheme)
    }

    /// Reject schemes this engine was not configured for
    pub fn check(&self, scheme: HarmonyScheme) -> Result<()> {
        if self.supports(scheme) {
            Ok(())
        } else {
            Err(PaletteError::UnknownHarmonyScheme(scheme.id().to_string()))
        }
    }

    /// Generate the palette for `scheme` around `base`
    ///
    /// `spread` is in degrees and clamped into `[0, 90]`.
    pub fn generate(
        &self,
        scheme: HarmonyScheme,
        base: Hsl,
        spread: f32,
    ) -> Result<Vec<HexColor>> {
        self.check(scheme)?;
        Ok(harmony_hsl(scheme, self.config.arity, base, spread)
            .into_iter()
            .map(HexColor::from)
            .collect())
    }

    /// Generate from a scheme name, as received from a selector or command line
    pub fn generate_named(&self, scheme: &str, base: Hsl, spread: f32) -> Result<Vec<HexColor>> {
        let parsed: HarmonyScheme = scheme.parse()?;
        self.generate(parsed, base, spread)
    }
}

impl Default for HarmonyEngine {
    fn default() -> Self {
        Self {
            config: HarmonyConfig::default(),
        }
    }
}

/// Clamp a spread value into the accepted range
pub fn clamp_spread(spread: f32) -> f32 {
    if spread.is_nan() {
        return 0.0;
    }
    spread.clamp(0.0, MAX_SPREAD)
}

/// Harmony hues before 8-bit quantization
///
/// Pure and deterministic. Entry 0 is `base` unchanged.
pub fn harmony_hsl(scheme: HarmonyScheme, arity: Arity, base: Hsl, spread: f32) -> Vec<Hsl> {
    let (h, s, l) = base.to_unit();
    let spr = clamp_spread(spread) / 360.0;
    let comp = h + 0.5;

    let tone = |hue: f32| Hsl::from_unit(hue, s, l);
    let variant = |hue: f32| Hsl::from_unit(hue, s * VARIANT_SATURATION, l * VARIANT_LIGHTNESS);

    match (scheme, arity) {
        (HarmonyScheme::Analogous, Arity::Three) => vec![base, tone(h - spr), tone(h + spr)],
        (HarmonyScheme::Analogous, Arity::Five) => vec![
            base,
            tone(h - spr),
            tone(h + spr),
            tone(h - 2.0 * spr),
            tone(h + 2.0 * spr),
        ],
        (HarmonyScheme::Complementary, Arity::Three) => vec![base, variant(h), tone(comp)],
        (HarmonyScheme::Complementary, Arity::Five) => vec![
            base,
            variant(h),
            tone(comp),
            variant(comp),
            Hsl::from_unit(h, s * SHADE_SATURATION, l * SHADE_LIGHTNESS),
        ],
        (HarmonyScheme::Triadic, Arity::Three) => {
            vec![base, tone(h + 1.0 / 3.0), tone(h + 2.0 / 3.0)]
        }
        (HarmonyScheme::Triadic, Arity::Five) => std::iter::once(base)
            .chain((1..5).map(|i| {
                let hue = h + (i / 2) as f32 / 3.0;
                let light = if i % 2 == 0 { l } else { l * TRIAD_TINT_LIGHTNESS };
                Hsl::from_unit(hue, s, light)
            }))
            .collect(),
        (HarmonyScheme::SplitComplementary, Arity::Three) => {
            vec![base, tone(comp - spr), tone(comp + spr)]
        }
        (HarmonyScheme::SplitComplementary, Arity::Five) => vec![
            base,
            variant(h),
            tone(comp - spr),
            tone(comp + spr),
            variant(comp + spr),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hue_distance(a: f32, b: f32) -> f32 {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d)
    }

    #[test]
    fn test_scheme_parsing() {
        assert_eq!("analogous".parse::<HarmonyScheme>().unwrap(), HarmonyScheme::Analogous);
        assert_eq!("Triadic".parse::<HarmonyScheme>().unwrap(), HarmonyScheme::Triadic);
        assert_eq!(
            "Split Complementary".parse::<HarmonyScheme>().unwrap(),
            HarmonyScheme::SplitComplementary
        );
        assert_eq!(
            "split-complementary".parse::<HarmonyScheme>().unwrap(),
            HarmonyScheme::SplitComplementary
        );
        assert_eq!(
            "tetradic".parse::<HarmonyScheme>(),
            Err(PaletteError::UnknownHarmonyScheme("tetradic".into()))
        );
    }

    #[test]
    fn test_ids_round_trip() {
        for scheme in HarmonyScheme::all() {
            assert_eq!(scheme.id().parse::<HarmonyScheme>().unwrap(), *scheme);
            assert_eq!(scheme.to_string().parse::<HarmonyScheme>().unwrap(), *scheme);
        }
    }

    #[test]
    fn test_five_color_triad_alternates_lightness() {
        let base = Hsl::new(10.0, 80.0, 50.0);
        let colors = harmony_hsl(HarmonyScheme::Triadic, Arity::Five, base, 0.0);

        assert_eq!(colors.len(), 5);
        let expected_hues = [10.0, 10.0, 130.0, 130.0, 250.0];
        for (color, hue) in colors.iter().zip(expected_hues) {
            assert!(hue_distance(color.hue, hue) < 1e-3, "{color:?}");
        }
        assert!((colors[1].lightness - 60.0).abs() < 1e-3);
        assert!((colors[2].lightness - 50.0).abs() < 1e-3);
        assert!((colors[3].lightness - 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_variation_entries_are_clamped() {
        let base = Hsl::new(200.0, 100.0, 95.0);
        let colors = harmony_hsl(HarmonyScheme::Complementary, Arity::Three, base, 0.0);
        assert_eq!(colors[1].lightness, 100.0);
        assert!((colors[1].saturation - 80.0).abs() < 1e-3);
    }

    #[test]
    fn test_spread_is_clamped() {
        let base = Hsl::new(0.0, 50.0, 50.0);
        let wide = harmony_hsl(HarmonyScheme::Analogous, Arity::Three, base, 400.0);
        assert!(hue_distance(wide[1].hue, 270.0) < 1e-3);
        assert!(hue_distance(wide[2].hue, 90.0) < 1e-3);

        let negative = harmony_hsl(HarmonyScheme::Analogous, Arity::Three, base, -20.0);
        assert!(negative.iter().all(|c| hue_distance(c.hue, 0.0) < 1e-3));
    }

    #[test]
    fn test_engine_requires_a_scheme() {
        let config = HarmonyConfig {
            arity: Arity::Three,
            schemes: Vec::new(),
        };
        assert_eq!(HarmonyEngine::new(config), Err(PaletteError::NoSchemesEnabled));
    }
}
