//! Palette state
//!
//! The single source of truth for one session. Every input funnels through
//! one of the mutation entry points below; each of them leaves the palette
//! consistent and then pushes fresh values to the attached sinks and
//! observers. Sinks only ever read.

use crate::backdrop::{css_variables, Backdrop, DisplayToggles};
use crate::error::Result;
use crate::harmony::{clamp_spread, HarmonyEngine, HarmonyScheme};
use crate::palette::Palette;
use crate::sinks::{BackdropSink, ControlSink, MaterialSink, PaletteChange, Sinks};
use indexmap::IndexMap;
use rand::Rng;
use sphera_core::{ChangedSlots, Dispatcher, HexColor, Hsl, ObserverId};
use std::ops::Range;

/// Hue range used by [`PaletteState::regenerate_colors`]
pub const RANDOM_HUE: Range<f32> = 0.0..360.0;
/// Saturation range used by [`PaletteState::regenerate_colors`]
pub const RANDOM_SATURATION: Range<f32> = 70.0..100.0;
/// Brightness range used by [`PaletteState::regenerate_colors`]
pub const RANDOM_BRIGHTNESS: Range<f32> = 60.0..90.0;

/// Harmony fields to update; `None` keeps the current value
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HarmonyInputs {
    pub scheme: Option<HarmonyScheme>,
    pub base_hue: Option<f32>,
    pub saturation: Option<f32>,
    pub brightness: Option<f32>,
    pub spread: Option<f32>,
}

impl HarmonyInputs {
    pub fn scheme(scheme: HarmonyScheme) -> Self {
        Self {
            scheme: Some(scheme),
            ..Self::default()
        }
    }

    /// Set hue, saturation and brightness at once
    pub fn base(base: Hsl) -> Self {
        Self {
            base_hue: Some(base.hue),
            saturation: Some(base.saturation),
            brightness: Some(base.lightness),
            ..Self::default()
        }
    }

    pub fn spread(spread: f32) -> Self {
        Self {
            spread: Some(spread),
            ..Self::default()
        }
    }
}

/// Palette state for one session
pub struct PaletteState {
    engine: HarmonyEngine,
    palette: Palette,
    toggles: DisplayToggles,
    sinks: Sinks,
    observers: Dispatcher<PaletteChange>,
}

impl PaletteState {
    /// Create a session with the given engine and starting palette
    pub fn new(engine: HarmonyEngine, palette: Palette) -> Result<Self> {
        engine.check(palette.scheme())?;
        Ok(Self {
            engine,
            palette,
            toggles: DisplayToggles::default(),
            sinks: Sinks::default(),
            observers: Dispatcher::new(),
        })
    }

    pub fn with_toggles(mut self, toggles: DisplayToggles) -> Self {
        self.toggles = toggles;
        self
    }

    // ========== Sinks & Observers ==========

    /// Attach the 3D material updater and build its lineup
    pub fn set_material_sink(&mut self, sink: impl MaterialSink + 'static) {
        let mut sink: Box<dyn MaterialSink> = Box::new(sink);
        sink.rebuild_lineup(&self.palette);
        sink.set_shadows(self.toggles.shadows_enabled);
        self.sinks.material = Some(sink);
    }

    /// Attach the settings panel updater and sync it
    pub fn set_control_sink(&mut self, sink: impl ControlSink + 'static) {
        let mut sink: Box<dyn ControlSink> = Box::new(sink);
        sink.sync_controls(&self.palette);
        self.sinks.controls = Some(sink);
    }

    /// Attach the background updater and apply the current backdrop
    pub fn set_backdrop_sink(&mut self, sink: impl BackdropSink + 'static) {
        let mut sink: Box<dyn BackdropSink> = Box::new(sink);
        sink.apply_backdrop(&self.backdrop());
        self.sinks.backdrop = Some(sink);
    }

    /// Register a palette-changed observer
    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&PaletteChange) + 'static,
    {
        self.observers.register(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unregister(id)
    }

    // ========== Reads ==========

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn engine(&self) -> &HarmonyEngine {
        &self.engine
    }

    pub fn toggles(&self) -> DisplayToggles {
        self.toggles
    }

    pub fn backdrop(&self) -> Backdrop {
        Backdrop::derive(&self.palette, self.toggles)
    }

    /// CSS custom properties for the current palette and backdrop
    pub fn css_variables(&self) -> IndexMap<String, String> {
        css_variables(&self.palette, &self.backdrop())
    }

    // ========== Mutations ==========

    /// Update the provided harmony fields and regenerate every color
    ///
    /// Hue wraps, saturation and brightness clamp to `[0, 100]`, spread
    /// clamps to `[0, 90]`. On error nothing changes.
    pub fn set_from_harmony_inputs(&mut self, inputs: HarmonyInputs) -> Result<()> {
        let current = self.palette.base();
        let scheme = inputs.scheme.unwrap_or(self.palette.scheme());
        let base = Hsl::new(
            inputs.base_hue.unwrap_or(current.hue),
            inputs.saturation.unwrap_or(current.saturation),
            inputs.brightness.unwrap_or(current.lightness),
        );
        let spread = clamp_spread(inputs.spread.unwrap_or(self.palette.spread()));

        self.regenerate(scheme, base, spread)
    }

    /// Parse `text` as the new primary color and regenerate around it
    ///
    /// Invalid text leaves the state untouched.
    pub fn set_primary_color(&mut self, text: &str) -> Result<()> {
        let color = HexColor::parse(text)?;
        self.set_primary(color)
    }

    /// Regenerate around an already parsed primary color
    pub fn set_primary(&mut self, color: HexColor) -> Result<()> {
        self.regenerate(self.palette.scheme(), color.to_hsl(), self.palette.spread())
    }

    /// Overwrite one slot without touching the harmony fields
    ///
    /// The palette stays out of harmony until the next regeneration.
    pub fn set_individual_color(&mut self, index: usize, text: &str) -> Result<()> {
        let color = HexColor::parse(text)?;
        self.set_slot(index, color)
    }

    /// Overwrite one slot with an already parsed color
    pub fn set_slot(&mut self, index: usize, color: HexColor) -> Result<()> {
        self.palette.replace_slot(index, color)?;
        tracing::debug!(index, %color, "palette slot set directly");

        let backdrop = self.backdrop();
        self.sinks.refresh_slot(index, color, &backdrop);
        self.notify(ChangedSlots::Slot(index), false);
        Ok(())
    }

    /// Pick a random base color and regenerate
    ///
    /// Hue is uniform over the wheel; saturation and brightness are biased
    /// toward vivid mid-high values.
    pub fn regenerate_colors<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        let inputs = HarmonyInputs {
            base_hue: Some(rng.random_range(RANDOM_HUE)),
            saturation: Some(rng.random_range(RANDOM_SATURATION)),
            brightness: Some(rng.random_range(RANDOM_BRIGHTNESS)),
            ..HarmonyInputs::default()
        };
        self.set_from_harmony_inputs(inputs)
    }

    /// Set the white background toggle
    pub fn set_white_background(&mut self, enabled: bool) {
        if self.toggles.white_background == enabled {
            return;
        }
        self.toggles.white_background = enabled;
        tracing::debug!(enabled, "white background toggled");

        let backdrop = self.backdrop();
        if let Some(sink) = self.sinks.backdrop.as_mut() {
            sink.apply_backdrop(&backdrop);
        }
    }

    /// Set the shadow toggle
    pub fn set_shadows_enabled(&mut self, enabled: bool) {
        if self.toggles.shadows_enabled == enabled {
            return;
        }
        self.toggles.shadows_enabled = enabled;
        tracing::debug!(enabled, "shadows toggled");

        if let Some(material) = self.sinks.material.as_mut() {
            material.set_shadows(enabled);
        }
    }

    fn regenerate(&mut self, scheme: HarmonyScheme, base: Hsl, spread: f32) -> Result<()> {
        let colors = self.engine.generate(scheme, base, spread)?;
        let lineup_changed = colors.len() != self.palette.len();

        tracing::debug!(
            scheme = scheme.id(),
            hue = base.hue,
            saturation = base.saturation,
            brightness = base.lightness,
            spread,
            "palette regenerated"
        );

        self.palette = Palette::from_harmony(scheme, base, spread, colors);

        let backdrop = self.backdrop();
        self.sinks.refresh_all(&self.palette, &backdrop, lineup_changed);
        self.notify(ChangedSlots::All, lineup_changed);
        Ok(())
    }

    fn notify(&mut self, changed: ChangedSlots, lineup_changed: bool) {
        if self.observers.is_empty() {
            return;
        }
        let change = PaletteChange {
            palette: self.palette.clone(),
            changed,
            lineup_changed,
        };
        self.observers.dispatch(&change);
    }
}

impl Default for PaletteState {
    fn default() -> Self {
        Self {
            engine: HarmonyEngine::default(),
            palette: Palette::default(),
            toggles: DisplayToggles::default(),
            sinks: Sinks::default(),
            observers: Dispatcher::new(),
        }
    }
}

impl std::fmt::Debug for PaletteState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaletteState")
            .field("palette", &self.palette)
            .field("toggles", &self.toggles)
            .field("sinks", &self.sinks)
            .field("observers", &self.observers.len())
            .finish()
    }
}
