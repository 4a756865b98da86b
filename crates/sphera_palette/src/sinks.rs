//! Presentation sinks
//!
//! Sinks project the palette onto a surface. They receive fresh values after
//! every mutation and never write back into the state.

use crate::backdrop::Backdrop;
use crate::palette::Palette;
use sphera_core::{ChangedSlots, HexColor};

/// 3D scene: one sphere material per palette slot
pub trait MaterialSink {
    /// Recolor the sphere at `index`
    fn set_material_color(&mut self, index: usize, color: HexColor);

    /// Rebuild the sphere lineup (count, spacing, geometry) for `palette`
    ///
    /// Only called when the number of colors changes or the sink is attached.
    fn rebuild_lineup(&mut self, palette: &Palette);

    /// Toggle shadow casting
    fn set_shadows(&mut self, _enabled: bool) {}
}

/// Settings panel: sliders, scheme selector, primary picker, swatches
pub trait ControlSink {
    /// Reflect every palette field into the controls
    fn sync_controls(&mut self, palette: &Palette);

    /// Update a single swatch
    fn set_swatch(&mut self, index: usize, color: HexColor);
}

/// Page background and accent color
pub trait BackdropSink {
    fn apply_backdrop(&mut self, backdrop: &Backdrop);
}

/// Notification raised after every palette mutation
#[derive(Clone, Debug, PartialEq)]
pub struct PaletteChange {
    /// Palette after the mutation
    pub palette: Palette,
    /// Slots whose color may have changed
    pub changed: ChangedSlots,
    /// The number of colors changed
    pub lineup_changed: bool,
}

/// The sinks attached to one palette state. Absent sinks are skipped.
#[derive(Default)]
pub(crate) struct Sinks {
    pub(crate) material: Option<Box<dyn MaterialSink>>,
    pub(crate) controls: Option<Box<dyn ControlSink>>,
    pub(crate) backdrop: Option<Box<dyn BackdropSink>>,
}

impl Sinks {
    /// Push a whole-palette refresh
    pub(crate) fn refresh_all(
        &mut self,
        palette: &Palette,
        backdrop: &Backdrop,
        lineup_changed: bool,
    ) {
        if let Some(material) = self.material.as_mut() {
            if lineup_changed {
                material.rebuild_lineup(palette);
            } else {
                for (index, color) in palette.colors().iter().enumerate() {
                    material.set_material_color(index, *color);
                }
            }
        }
        if let Some(controls) = self.controls.as_mut() {
            controls.sync_controls(palette);
        }
        if let Some(sink) = self.backdrop.as_mut() {
            sink.apply_backdrop(backdrop);
        }
    }

    /// Push a single-slot refresh
    pub(crate) fn refresh_slot(&mut self, index: usize, color: HexColor, backdrop: &Backdrop) {
        tracing::trace!(index, %color, "refreshing single slot");
        if let Some(material) = self.material.as_mut() {
            material.set_material_color(index, color);
        }
        if let Some(controls) = self.controls.as_mut() {
            controls.set_swatch(index, color);
        }
        if index == 0 {
            if let Some(sink) = self.backdrop.as_mut() {
                sink.apply_backdrop(backdrop);
            }
        }
    }
}

impl std::fmt::Debug for Sinks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sinks")
            .field("material", &self.material.is_some())
            .field("controls", &self.controls.is_some())
            .field("backdrop", &self.backdrop.is_some())
            .finish()
    }
}
