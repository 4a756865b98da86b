//! Color model error types

use thiserror::Error;

/// Errors raised while reading colors from user text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Text is not `#RGB` / `#RRGGBB` (with or without `#`)
    #[error("invalid hex color: {0:?}")]
    InvalidHexFormat(String),
}

/// Result type for color operations
pub type Result<T> = std::result::Result<T, ColorError>;
