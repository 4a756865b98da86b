//! Interactive session: one palette driven by text commands
//!
//! Each input line is one user interaction. Commands map onto the same
//! input events and clipboard actions a graphical front end would raise.

use crate::terminal::{BackdropLine, Panel, Screen, SphereRow};
use anyhow::{anyhow, bail, Context, Result};
use pollster::block_on;
use rand::Rng;
use sphera_palette::{
    ClipboardActions, FeedbackCue, FeedbackTarget, FeedbackTimings, HarmonyScheme, InputEvent,
    InputOutcome, MemoryClipboard, PaletteState,
};
use std::io::{BufRead, Write};
use std::time::Instant;

pub const HELP: &str = "\
commands:
  scheme <name>          analogous | complementary | triadic | split_complementary
  hue <deg>              saturation <pct>   brightness <pct>   spread <deg>
  primary <hex>          set the primary color and regenerate
  set <index> <hex>      overwrite one swatch
  random                 random vivid base color
  white on|off           shadows on|off
  copy <index>|all       paste
  show                   css                help               quit";

/// One parsed session command
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Input(InputEvent),
    CopySwatch(usize),
    CopyAll,
    Paste,
    Show,
    Css,
    Help,
    Quit,
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("scheme", [_, ..]) => {
            let scheme: HarmonyScheme = args.join(" ").parse()?;
            Command::Input(InputEvent::SchemeSelected(scheme))
        }
        ("hue", [value]) => Command::Input(InputEvent::HueChanged(number(value)?)),
        ("saturation", [value]) => Command::Input(InputEvent::SaturationChanged(number(value)?)),
        ("brightness", [value]) => Command::Input(InputEvent::BrightnessChanged(number(value)?)),
        ("spread", [value]) => Command::Input(InputEvent::SpreadChanged(number(value)?)),
        ("primary", [text]) => Command::Input(InputEvent::HexFieldEdited(text.to_string())),
        ("set", [index, text]) => Command::Input(InputEvent::SwatchEdited {
            index: slot(index)?,
            text: text.to_string(),
        }),
        ("random", []) => Command::Input(InputEvent::Randomize),
        ("white", [flag]) => Command::Input(InputEvent::WhiteBackgroundToggled(switch(flag)?)),
        ("shadows", [flag]) => Command::Input(InputEvent::ShadowsToggled(switch(flag)?)),
        ("copy", ["all"]) => Command::CopyAll,
        ("copy", [index]) => Command::CopySwatch(slot(index)?),
        ("paste", []) => Command::Paste,
        ("show", []) => Command::Show,
        ("css", []) => Command::Css,
        ("help", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        _ => bail!("unrecognized command {line:?} (try `help`)"),
    };
    Ok(Some(command))
}

fn number(text: &str) -> Result<f32> {
    text.parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| anyhow!("expected a number, got {text:?}"))
}

fn slot(text: &str) -> Result<usize> {
    text.parse()
        .with_context(|| format!("expected a swatch index, got {text:?}"))
}

fn switch(text: &str) -> Result<bool> {
    match text.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => bail!("expected on or off, got {text:?}"),
    }
}

/// Whether the session keeps reading input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A palette state with terminal sinks and an in-process clipboard
pub struct Session<R> {
    state: PaletteState,
    actions: ClipboardActions<MemoryClipboard>,
    screen: Screen,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(mut state: PaletteState, timings: FeedbackTimings, screen: Screen, rng: R) -> Self {
        state.set_material_sink(SphereRow::new(screen.clone()));
        state.set_control_sink(Panel::new(screen.clone()));
        state.set_backdrop_sink(BackdropLine::new(screen.clone()));

        Self {
            state,
            actions: ClipboardActions::with_timings(MemoryClipboard::new(), timings),
            screen,
            rng,
        }
    }

    pub fn state(&self) -> &PaletteState {
        &self.state
    }

    /// Lines rendered since the last call
    pub fn take_output(&self) -> Vec<String> {
        self.screen.drain()
    }

    /// Run one command
    pub fn execute(&mut self, command: Command) -> Result<Flow> {
        let now = Instant::now();
        for expired in self.actions.tick(now) {
            tracing::debug!(element = ?expired.key, cue = ?expired.value, "feedback reset");
        }

        match command {
            Command::Input(event) => {
                if self.state.apply(event, &mut self.rng)? == InputOutcome::Ignored {
                    self.screen.push("ignored: not a hex color");
                }
            }
            Command::CopySwatch(index) => {
                let cue = block_on(self.actions.copy_swatch(self.state.palette(), index, now));
                self.report(FeedbackTarget::Swatch(index), cue);
            }
            Command::CopyAll => {
                let cue = block_on(self.actions.copy_palette(self.state.palette(), now));
                self.report(FeedbackTarget::Palette, cue);
            }
            Command::Paste => {
                let cue = block_on(self.actions.paste_primary(&mut self.state, now));
                self.report(FeedbackTarget::PrimaryInput, cue);
            }
            Command::Show => {
                self.screen.push(self.state.palette().hex_list().join(" "));
            }
            Command::Css => {
                for (name, value) in self.state.css_variables() {
                    self.screen.push(format!("--{name}: {value};"));
                }
            }
            Command::Help => self.screen.push(HELP),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Read commands until end of input or `quit`
    ///
    /// Bad commands are reported on `out` and skipped.
    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> Result<()> {
        for line in self.take_output() {
            writeln!(out, "{line}")?;
        }

        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            let flow = match parse_command(&line) {
                Ok(Some(command)) => self.execute(command),
                Ok(None) => Ok(Flow::Continue),
                Err(err) => Err(err),
            };

            let flow = flow.unwrap_or_else(|err| {
                self.screen.push(format!("error: {err}"));
                Flow::Continue
            });

            for line in self.take_output() {
                writeln!(out, "{line}")?;
            }
            out.flush()?;

            if flow == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    fn report(&self, target: FeedbackTarget, cue: FeedbackCue) {
        let message = match (target, cue) {
            (_, FeedbackCue::Failure) => "clipboard: failed".to_string(),
            (FeedbackTarget::Swatch(index), _) => format!("clipboard: copied swatch {index}"),
            (FeedbackTarget::Palette, _) => "clipboard: copied palette".to_string(),
            (FeedbackTarget::PrimaryInput, _) => "clipboard: pasted".to_string(),
        };
        self.screen.push(message);
    }
}
