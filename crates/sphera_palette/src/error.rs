//! Palette error types

use sphera_core::ColorError;
use thiserror::Error;

/// Errors raised by the harmony engine and palette state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// User text is not a valid hex color
    #[error("invalid hex color: {0:?}")]
    InvalidHexFormat(String),

    /// Scheme name does not parse, or the scheme is not enabled in this engine
    #[error("unknown harmony scheme: {0:?}")]
    UnknownHarmonyScheme(String),

    /// Slot index past the end of the palette
    #[error("slot {index} out of range for a palette of {len} colors")]
    SlotOutOfRange { index: usize, len: usize },

    /// A palette needs at least one color
    #[error("palette must contain at least one color")]
    EmptyPalette,

    /// Engine configured without any scheme
    #[error("no harmony schemes enabled")]
    NoSchemesEnabled,
}

impl From<ColorError> for PaletteError {
    fn from(err: ColorError) -> Self {
        match err {
            ColorError::InvalidHexFormat(text) => PaletteError::InvalidHexFormat(text),
        }
    }
}

/// Result type for palette operations
pub type Result<T> = std::result::Result<T, PaletteError>;
