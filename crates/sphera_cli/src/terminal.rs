//! Terminal presentation sinks
//!
//! Stands in for the 3D scene and the settings panel when running headless:
//! spheres become colored dots, the panel becomes a status line. All sinks
//! write into one shared [`Screen`] that the session flushes after each
//! command. The sphere row is redrawn at most once per flush.

use crossterm::style::{Color, Stylize};
use sphera_palette::{Backdrop, BackdropSink, ControlSink, HexColor, MaterialSink, Palette};
use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

/// Truecolor terminal color for a palette entry
pub fn term_color(color: HexColor) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// A row of swatches followed by their hex codes
pub fn swatch_row(colors: &[HexColor], ansi: bool) -> String {
    let mut row = String::new();
    for (index, color) in colors.iter().enumerate() {
        if index > 0 {
            row.push(' ');
        }
        if ansi {
            let _ = write!(row, "{} {}", "      ".on(term_color(*color)), color);
        } else {
            let _ = write!(row, "{color}");
        }
    }
    row
}

/// One-line summary of the harmony controls
pub fn controls_line(palette: &Palette) -> String {
    format!(
        "scheme={} hue={:.0} saturation={:.0} brightness={:.0} spread={:.0}{}",
        palette.scheme().id(),
        palette.base_hue(),
        palette.saturation(),
        palette.brightness(),
        palette.spread(),
        if palette.is_in_harmony() { "" } else { " (edited)" },
    )
}

/// Shared output buffer for the terminal sinks
#[derive(Clone, Debug, Default)]
pub struct Screen {
    lines: Rc<RefCell<Vec<String>>>,
    spheres: Rc<RefCell<Option<String>>>,
    ansi: bool,
}

impl Screen {
    pub fn new(ansi: bool) -> Self {
        Self {
            lines: Rc::default(),
            spheres: Rc::default(),
            ansi,
        }
    }

    pub fn push(&self, line: impl Into<String>) {
        self.lines.borrow_mut().push(line.into());
    }

    /// Replace the pending sphere row
    pub fn set_spheres(&self, line: String) {
        *self.spheres.borrow_mut() = Some(line);
    }

    /// Take every buffered line, sphere row first
    pub fn drain(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.spheres.borrow_mut().take().into_iter().collect();
        lines.append(&mut *self.lines.borrow_mut());
        lines
    }

    pub fn ansi(&self) -> bool {
        self.ansi
    }
}

/// Sphere lineup rendered as colored dots
#[derive(Debug)]
pub struct SphereRow {
    screen: Screen,
    spheres: Vec<HexColor>,
    shadows: bool,
}

impl SphereRow {
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            spheres: Vec::new(),
            shadows: true,
        }
    }

    fn render(&self) {
        let dots: Vec<String> = self
            .spheres
            .iter()
            .map(|color| {
                if self.screen.ansi() {
                    "●".with(term_color(*color)).to_string()
                } else {
                    "●".to_string()
                }
            })
            .collect();
        let shadow = if self.shadows { "" } else { "  (no shadows)" };
        self.screen.set_spheres(format!("spheres  {}{}", dots.join("  "), shadow));
    }
}

impl MaterialSink for SphereRow {
    fn set_material_color(&mut self, index: usize, color: HexColor) {
        if let Some(sphere) = self.spheres.get_mut(index) {
            *sphere = color;
        }
        self.render();
    }

    fn rebuild_lineup(&mut self, palette: &Palette) {
        self.spheres = palette.colors().to_vec();
        self.render();
    }

    fn set_shadows(&mut self, enabled: bool) {
        self.shadows = enabled;
        self.render();
    }
}

/// Settings panel rendered as a status line plus swatches
#[derive(Debug)]
pub struct Panel {
    screen: Screen,
    swatches: Vec<HexColor>,
}

impl Panel {
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            swatches: Vec::new(),
        }
    }
}

impl ControlSink for Panel {
    fn sync_controls(&mut self, palette: &Palette) {
        self.swatches = palette.colors().to_vec();
        self.screen.push(format!("controls {}", controls_line(palette)));
        self.screen.push(format!(
            "swatches {}",
            swatch_row(&self.swatches, self.screen.ansi())
        ));
    }

    fn set_swatch(&mut self, index: usize, color: HexColor) {
        if let Some(swatch) = self.swatches.get_mut(index) {
            *swatch = color;
        }
        self.screen.push(format!(
            "swatches {}",
            swatch_row(&self.swatches, self.screen.ansi())
        ));
    }
}

/// Background and accent status
#[derive(Debug)]
pub struct BackdropLine {
    screen: Screen,
}

impl BackdropLine {
    pub fn new(screen: Screen) -> Self {
        Self { screen }
    }
}

impl BackdropSink for BackdropLine {
    fn apply_backdrop(&mut self, backdrop: &Backdrop) {
        self.screen.push(format!(
            "backdrop background={} accent={}",
            backdrop.background, backdrop.accent
        ));
    }
}
