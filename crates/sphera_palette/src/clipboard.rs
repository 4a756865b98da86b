//! Clipboard actions with transient feedback
//!
//! Clipboard access belongs to the host and may be slow, denied, or missing.
//! Failures never reach the caller as errors: they become a
//! [`FeedbackCue::Failure`] flash on the element that triggered them.

use crate::palette::Palette;
use crate::state::PaletteState;
use serde::{Deserialize, Serialize};
use sphera_animation::{Expired, FeedbackScheduler};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Host clipboard failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// The host refused access (permissions, focus, user gesture)
    #[error("clipboard access denied")]
    Denied,

    /// No clipboard on this platform
    #[error("clipboard unavailable")]
    Unavailable,

    /// Any other host failure
    #[error("clipboard operation failed: {0}")]
    Failed(String),
}

/// Host clipboard
#[allow(async_fn_in_trait)]
pub trait Clipboard {
    async fn read_text(&mut self) -> Result<String, ClipboardError>;

    async fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// In-process clipboard, for headless front ends and tests
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    denied: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that rejects every read and write
    pub fn denied() -> Self {
        Self {
            contents: None,
            denied: true,
        }
    }

    pub fn with_contents(text: impl Into<String>) -> Self {
        Self {
            contents: Some(text.into()),
            denied: false,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    async fn read_text(&mut self) -> Result<String, ClipboardError> {
        if self.denied {
            return Err(ClipboardError::Denied);
        }
        Ok(self.contents.clone().unwrap_or_default())
    }

    async fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.denied {
            return Err(ClipboardError::Denied);
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Element that shows feedback
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeedbackTarget {
    /// Copy button of one swatch
    Swatch(usize),
    /// "Copy all" button
    Palette,
    /// Primary hex field (paste target)
    PrimaryInput,
}

/// Transient visual cue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeedbackCue {
    /// "Copied!" label / checkmark
    Copied,
    /// Positive flash after a paste was applied
    Pasted,
    /// Red flash
    Failure,
}

/// How long each cue stays visible
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackTimings {
    /// Flash duration for [`FeedbackCue::Pasted`] and [`FeedbackCue::Failure`]
    #[serde(rename = "flash_ms", with = "millis")]
    pub flash: Duration,
    /// Label duration for [`FeedbackCue::Copied`]
    #[serde(rename = "copied_ms", with = "millis")]
    pub copied: Duration,
}

impl Default for FeedbackTimings {
    fn default() -> Self {
        Self {
            flash: Duration::from_millis(600),
            copied: Duration::from_millis(1500),
        }
    }
}

impl FeedbackTimings {
    fn duration(&self, cue: FeedbackCue) -> Duration {
        match cue {
            FeedbackCue::Copied => self.copied,
            FeedbackCue::Pasted | FeedbackCue::Failure => self.flash,
        }
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Copy and paste buttons bound to a clipboard
pub struct ClipboardActions<C> {
    clipboard: C,
    feedback: FeedbackScheduler<FeedbackTarget, FeedbackCue>,
    timings: FeedbackTimings,
}

impl<C: Clipboard> ClipboardActions<C> {
    pub fn new(clipboard: C) -> Self {
        Self::with_timings(clipboard, FeedbackTimings::default())
    }

    pub fn with_timings(clipboard: C, timings: FeedbackTimings) -> Self {
        Self {
            clipboard,
            feedback: FeedbackScheduler::new(),
            timings,
        }
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Copy one swatch as `#RRGGBB`
    pub async fn copy_swatch(
        &mut self,
        palette: &Palette,
        index: usize,
        now: Instant,
    ) -> FeedbackCue {
        let target = FeedbackTarget::Swatch(index);
        let Some(color) = palette.get(index) else {
            tracing::warn!(index, "copy requested for a missing swatch");
            return self.show(target, FeedbackCue::Failure, now);
        };

        let cue = match self.clipboard.write_text(&color.to_string()).await {
            Ok(()) => FeedbackCue::Copied,
            Err(err) => {
                tracing::warn!(%err, index, "failed to copy swatch");
                FeedbackCue::Failure
            }
        };
        self.show(target, cue, now)
    }

    /// Copy every color, comma separated
    pub async fn copy_palette(&mut self, palette: &Palette, now: Instant) -> FeedbackCue {
        let text = palette.hex_list().join(", ");
        let cue = match self.clipboard.write_text(&text).await {
            Ok(()) => FeedbackCue::Copied,
            Err(err) => {
                tracing::warn!(%err, "failed to copy palette");
                FeedbackCue::Failure
            }
        };
        self.show(FeedbackTarget::Palette, cue, now)
    }

    /// Read the clipboard and use it as the new primary color
    ///
    /// Denied access and malformed text both flash the input; the palette
    /// is only touched when the text parses.
    pub async fn paste_primary(&mut self, state: &mut PaletteState, now: Instant) -> FeedbackCue {
        let target = FeedbackTarget::PrimaryInput;
        let text = match self.clipboard.read_text().await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(%err, "failed to read clipboard");
                return self.show(target, FeedbackCue::Failure, now);
            }
        };

        let cue = match state.set_primary_color(&text) {
            Ok(()) => FeedbackCue::Pasted,
            Err(err) => {
                tracing::debug!(%err, "clipboard text is not a usable color");
                FeedbackCue::Failure
            }
        };
        self.show(target, cue, now)
    }

    /// Cue currently visible on `target`
    pub fn feedback(&self, target: FeedbackTarget) -> Option<FeedbackCue> {
        self.feedback.active(target).copied()
    }

    /// Expire finished cues; the caller resets those elements
    pub fn tick(&mut self, now: Instant) -> Vec<Expired<FeedbackTarget, FeedbackCue>> {
        self.feedback.tick(now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.feedback.next_deadline()
    }

    fn show(&mut self, target: FeedbackTarget, cue: FeedbackCue, now: Instant) -> FeedbackCue {
        self.feedback.trigger(target, cue, self.timings.duration(cue), now);
        cue
    }
}

impl<C: std::fmt::Debug> std::fmt::Debug for ClipboardActions<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipboardActions")
            .field("clipboard", &self.clipboard)
            .field("feedback", &self.feedback)
            .field("timings", &self.timings)
            .finish()
    }
}
