//! Sphera Palette
//!
//! Color-harmony generation and the palette state that drives every
//! presentation surface.
//!
//! # Overview
//!
//! - **Harmony engine**: [`HarmonyEngine`] derives an ordered palette from a
//!   base color under a [`HarmonyScheme`]
//! - **Palette state**: [`PaletteState`] owns the current [`Palette`] and is
//!   the only thing that mutates it
//! - **Sinks**: [`MaterialSink`], [`ControlSink`] and [`BackdropSink`] receive
//!   fresh values after every mutation and never write back
//! - **Inputs**: sliders, pickers, text fields and the randomizer reduce to
//!   [`InputEvent`]s; clipboard buttons go through [`ClipboardActions`]
//!
//! # Quick Start
//!
//! ```rust
//! use sphera_palette::{HarmonyInputs, HarmonyScheme, PaletteState};
//!
//! let mut state = PaletteState::default();
//! state
//!     .set_from_harmony_inputs(HarmonyInputs::scheme(HarmonyScheme::Triadic))
//!     .unwrap();
//! state.set_primary_color("#ff0000").unwrap();
//!
//! assert_eq!(state.palette().hex_list()[0], "#FF0000");
//! assert_eq!(state.palette().len(), 3);
//! ```
//!
//! # Data flow
//!
//! Inputs mutate the state; the state pushes to sinks and observers. A sink
//! never talks to another sink, and nothing but the state touches the
//! palette.

pub mod backdrop;
pub mod clipboard;
pub mod error;
pub mod harmony;
pub mod input;
pub mod palette;
pub mod sinks;
pub mod state;

pub use backdrop::{css_variables, Backdrop, DisplayToggles};
pub use clipboard::{
    Clipboard, ClipboardActions, ClipboardError, FeedbackCue, FeedbackTarget, FeedbackTimings,
    MemoryClipboard,
};
pub use error::{PaletteError, Result};
pub use harmony::{clamp_spread, harmony_hsl, Arity, HarmonyConfig, HarmonyEngine, HarmonyScheme};
pub use input::{InputEvent, InputOutcome};
pub use palette::{Palette, DEFAULT_COLORS, DEFAULT_SPREAD};
pub use sinks::{BackdropSink, ControlSink, MaterialSink, PaletteChange};
pub use state::{HarmonyInputs, PaletteState};

pub use sphera_core::{ChangedSlots, HexColor, Hsl};
