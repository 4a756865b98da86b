//! Sphera Core
//!
//! Foundational types shared by every Sphera crate:
//!
//! - **Color model**: [`HexColor`] and [`Hsl`] with lossless 8-bit round trips
//! - **Change dispatch**: ordered observers for one-way state notifications
//!
//! # Example
//!
//! ```rust
//! use sphera_core::{HexColor, Hsl};
//!
//! let pink: HexColor = "#fc91e1".parse().unwrap();
//! let hsl = Hsl::from(pink);
//! assert_eq!(HexColor::from(hsl).to_string(), "#FC91E1");
//! ```

pub mod color;
pub mod error;
pub mod events;

pub use color::{hex_to_hsl, hsl_to_hex, wrap_degrees, wrap_unit, HexColor, Hsl};
pub use error::{ColorError, Result};
pub use events::{ChangedSlots, Dispatcher, ObserverId};
