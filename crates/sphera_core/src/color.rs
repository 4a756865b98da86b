//! Color model: hex strings and HSL triples
//!
//! [`HexColor`] is the external representation (display, clipboard, config);
//! [`Hsl`] is the internal one used for all harmony math. Hue arithmetic is
//! always wrapped back into range, never clamped.

use crate::error::{ColorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wrap a normalized hue into `[0, 1)`
#[inline]
pub fn wrap_unit(x: f32) -> f32 {
    let wrapped = ((x % 1.0) + 1.0) % 1.0;
    // f32 rounding can land exactly on 1.0 for tiny negative inputs
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wrap a hue in degrees into `[0, 360)`
#[inline]
pub fn wrap_degrees(deg: f32) -> f32 {
    wrap_unit(deg / 360.0) * 360.0
}

// ─────────────────────────────────────────────────────────────────────────────
// HSL
// ─────────────────────────────────────────────────────────────────────────────

/// HSL color in display units
///
/// - `hue` in degrees, `[0, 360)`
/// - `saturation` in percent, `[0, 100]`
/// - `lightness` in percent, `[0, 100]`
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    /// Create an HSL color, wrapping the hue and clamping the percentages
    ///
    /// Non-finite hues become 0. NaN percentages become 0, infinite ones
    /// clamp to the nearest bound.
    pub fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        let hue = if hue.is_finite() { hue } else { 0.0 };
        Self {
            hue: wrap_degrees(hue),
            saturation: clamp_percent(saturation),
            lightness: clamp_percent(lightness),
        }
    }

    /// Create from normalized components (`h`, `s`, `l` all in `[0, 1]`)
    ///
    /// The hue is wrapped, saturation and lightness are clamped.
    pub fn from_unit(h: f32, s: f32, l: f32) -> Self {
        Self {
            hue: wrap_unit(h) * 360.0,
            saturation: s.clamp(0.0, 1.0) * 100.0,
            lightness: l.clamp(0.0, 1.0) * 100.0,
        }
    }

    /// Normalized `(h, s, l)` triple
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            wrap_unit(self.hue / 360.0),
            self.saturation / 100.0,
            self.lightness / 100.0,
        )
    }

    /// Convert to 8-bit sRGB channels
    pub fn to_rgb(self) -> [u8; 3] {
        let (h, s, l) = self.to_unit();

        let (r, g, b) = if s <= 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;
            (
                hue_to_channel(p, q, h + 1.0 / 3.0),
                hue_to_channel(p, q, h),
                hue_to_channel(p, q, h - 1.0 / 3.0),
            )
        };

        [to_byte(r), to_byte(g), to_byte(b)]
    }

    /// Build from 8-bit sRGB channels
    pub fn from_rgb([r, g, b]: [u8; 3]) -> Self {
        let max_byte = r.max(g).max(b);
        let min_byte = r.min(g).min(b);

        let max = max_byte as f32 / 255.0;
        let min = min_byte as f32 / 255.0;
        let l = (max + min) / 2.0;

        if max_byte == min_byte {
            return Self::from_unit(0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let (rf, gf, bf) = (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        let h = if max_byte == r {
            (gf - bf) / d + if g < b { 6.0 } else { 0.0 }
        } else if max_byte == g {
            (bf - rf) / d + 2.0
        } else {
            (rf - gf) / d + 4.0
        };

        Self::from_unit(h / 6.0, s, l)
    }
}

fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = wrap_unit(t);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[inline]
fn to_byte(channel: f32) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

// ─────────────────────────────────────────────────────────────────────────────
// Hex
// ─────────────────────────────────────────────────────────────────────────────

/// 24-bit color written as `#RRGGBB`
///
/// Parsing accepts an optional leading `#`, 3 or 6 hex digits, any case.
/// Display is always the canonical uppercase 6-digit form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const WHITE: HexColor = HexColor::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: HexColor = HexColor::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value (upper byte ignored)
    pub const fn from_u32(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub const fn to_rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Parse user text such as `"#fc91e1"`, `"FC91E1"` or `"abc"`
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHexFormat(text.to_string()));
        }

        let expanded = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(ColorError::InvalidHexFormat(text.to_string())),
        };

        u32::from_str_radix(&expanded, 16)
            .map(Self::from_u32)
            .map_err(|_| ColorError::InvalidHexFormat(text.to_string()))
    }

    /// HSL view of this color
    pub fn to_hsl(self) -> Hsl {
        Hsl::from_rgb(self.to_rgb())
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl From<HexColor> for Hsl {
    fn from(color: HexColor) -> Self {
        color.to_hsl()
    }
}

impl From<Hsl> for HexColor {
    fn from(hsl: Hsl) -> Self {
        let [r, g, b] = hsl.to_rgb();
        Self { r, g, b }
    }
}

/// Convert a hex color into HSL
pub fn hex_to_hsl(hex: HexColor) -> Hsl {
    hex.into()
}

/// Convert an HSL color into canonical hex
pub fn hsl_to_hex(hsl: Hsl) -> HexColor {
    hsl.into()
}
