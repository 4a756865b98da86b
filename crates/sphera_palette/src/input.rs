//! Input adapters
//!
//! Every control in the settings panel reduces to an [`InputEvent`]. Events
//! are applied to the state synchronously, one at a time.

use crate::error::{PaletteError, Result};
use crate::harmony::HarmonyScheme;
use crate::state::{HarmonyInputs, PaletteState};
use rand::Rng;
use sphera_core::HexColor;

/// A user interaction with one of the palette controls
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Scheme selector changed
    SchemeSelected(HarmonyScheme),
    /// Hue slider moved (degrees)
    HueChanged(f32),
    /// Saturation slider moved (percent)
    SaturationChanged(f32),
    /// Brightness slider moved (percent)
    BrightnessChanged(f32),
    /// Spread slider moved (degrees)
    SpreadChanged(f32),
    /// Color picker committed a value
    PrimaryPicked(HexColor),
    /// Primary hex text field edited
    HexFieldEdited(String),
    /// A swatch was edited in place
    SwatchEdited { index: usize, text: String },
    /// Randomize button pressed
    Randomize,
    WhiteBackgroundToggled(bool),
    ShadowsToggled(bool),
}

/// What happened to an applied event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// The state changed (or a toggle was set)
    Applied,
    /// Malformed text; the state is unchanged until the user corrects it
    Ignored,
}

impl PaletteState {
    /// Apply one input event
    ///
    /// Malformed hex text is swallowed as [`InputOutcome::Ignored`]. Anything
    /// else that fails, such as a disabled scheme or a bad slot index, is a
    /// programming error and is returned.
    pub fn apply<R: Rng + ?Sized>(
        &mut self,
        event: InputEvent,
        rng: &mut R,
    ) -> Result<InputOutcome> {
        let result = match event {
            InputEvent::SchemeSelected(scheme) => {
                self.set_from_harmony_inputs(HarmonyInputs::scheme(scheme))
            }
            InputEvent::HueChanged(hue) => self.set_from_harmony_inputs(HarmonyInputs {
                base_hue: Some(hue),
                ..HarmonyInputs::default()
            }),
            InputEvent::SaturationChanged(saturation) => {
                self.set_from_harmony_inputs(HarmonyInputs {
                    saturation: Some(saturation),
                    ..HarmonyInputs::default()
                })
            }
            InputEvent::BrightnessChanged(brightness) => {
                self.set_from_harmony_inputs(HarmonyInputs {
                    brightness: Some(brightness),
                    ..HarmonyInputs::default()
                })
            }
            InputEvent::SpreadChanged(spread) => {
                self.set_from_harmony_inputs(HarmonyInputs::spread(spread))
            }
            InputEvent::PrimaryPicked(color) => self.set_primary(color),
            InputEvent::HexFieldEdited(text) => self.set_primary_color(&text),
            InputEvent::SwatchEdited { index, text } => self.set_individual_color(index, &text),
            InputEvent::Randomize => self.regenerate_colors(rng),
            InputEvent::WhiteBackgroundToggled(enabled) => {
                self.set_white_background(enabled);
                Ok(())
            }
            InputEvent::ShadowsToggled(enabled) => {
                self.set_shadows_enabled(enabled);
                Ok(())
            }
        };

        match result {
            Ok(()) => Ok(InputOutcome::Applied),
            Err(PaletteError::InvalidHexFormat(text)) => {
                tracing::debug!(text = %text, "ignoring malformed hex input");
                Ok(InputOutcome::Ignored)
            }
            Err(err) => Err(err),
        }
    }
}
