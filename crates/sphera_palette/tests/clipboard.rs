use pollster::block_on;
use sphera_palette::{
    Clipboard, ClipboardActions, ClipboardError, FeedbackCue, FeedbackTarget, FeedbackTimings,
    MemoryClipboard, PaletteState,
};
use std::time::{Duration, Instant};

/// Clipboard whose reads always fail the same way
struct Broken(ClipboardError);

impl Clipboard for Broken {
    async fn read_text(&mut self) -> Result<String, ClipboardError> {
        Err(self.0.clone())
    }

    async fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(self.0.clone())
    }
}

#[test]
fn copy_swatch_writes_canonical_hex() {
    let state = PaletteState::default();
    let mut actions = ClipboardActions::new(MemoryClipboard::new());
    let now = Instant::now();

    let cue = block_on(actions.copy_swatch(state.palette(), 1, now));
    assert_eq!(cue, FeedbackCue::Copied);
    assert_eq!(actions.clipboard().contents(), Some("#FC91AC"));
    assert_eq!(actions.feedback(FeedbackTarget::Swatch(1)), Some(FeedbackCue::Copied));
}

#[test]
fn copy_palette_joins_every_color() {
    let state = PaletteState::default();
    let mut actions = ClipboardActions::new(MemoryClipboard::new());

    block_on(actions.copy_palette(state.palette(), Instant::now()));
    assert_eq!(
        actions.clipboard().contents(),
        Some("#FC91E1, #FC91AC, #FCAC91")
    );
}

#[test]
fn denied_clipboard_flashes_instead_of_failing() {
    let state = PaletteState::default();
    let mut actions = ClipboardActions::new(MemoryClipboard::denied());
    let now = Instant::now();

    let cue = block_on(actions.copy_swatch(state.palette(), 0, now));
    assert_eq!(cue, FeedbackCue::Failure);
    assert_eq!(actions.feedback(FeedbackTarget::Swatch(0)), Some(FeedbackCue::Failure));

    let cue = block_on(actions.copy_swatch(state.palette(), 9, now));
    assert_eq!(cue, FeedbackCue::Failure);
}

#[test]
fn paste_sets_primary_color() {
    let mut state = PaletteState::default();
    let mut actions = ClipboardActions::new(MemoryClipboard::with_contents("  #0f0 \n"));

    let cue = block_on(actions.paste_primary(&mut state, Instant::now()));
    assert_eq!(cue, FeedbackCue::Pasted);
    assert_eq!(state.palette().hex_list()[0], "#00FF00");
}

#[test]
fn paste_of_bad_text_or_denied_read_keeps_palette() {
    let mut state = PaletteState::default();
    let before = state.palette().clone();

    let mut actions = ClipboardActions::new(MemoryClipboard::with_contents("not a color"));
    let cue = block_on(actions.paste_primary(&mut state, Instant::now()));
    assert_eq!(cue, FeedbackCue::Failure);

    let mut actions = ClipboardActions::new(Broken(ClipboardError::Unavailable));
    let cue = block_on(actions.paste_primary(&mut state, Instant::now()));
    assert_eq!(cue, FeedbackCue::Failure);
    assert_eq!(
        actions.feedback(FeedbackTarget::PrimaryInput),
        Some(FeedbackCue::Failure)
    );

    assert_eq!(state.palette(), &before);
}

#[test]
fn feedback_resets_after_its_window() {
    let state = PaletteState::default();
    let timings = FeedbackTimings {
        flash: Duration::from_millis(100),
        copied: Duration::from_millis(300),
    };
    let mut actions = ClipboardActions::with_timings(MemoryClipboard::new(), timings);
    let start = Instant::now();

    block_on(actions.copy_swatch(state.palette(), 2, start));
    assert!(actions.tick(start + Duration::from_millis(200)).is_empty());

    // A second copy restarts the label instead of stacking a reset
    block_on(actions.copy_swatch(state.palette(), 2, start + Duration::from_millis(200)));
    assert!(actions.tick(start + Duration::from_millis(350)).is_empty());
    assert_eq!(
        actions.next_deadline(),
        Some(start + Duration::from_millis(500))
    );

    let expired = actions.tick(start + Duration::from_millis(500));
    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].key, FeedbackTarget::Swatch(2));
    assert_eq!(actions.feedback(FeedbackTarget::Swatch(2)), None);
}

#[test]
fn timings_deserialize_from_millis() {
    let timings: FeedbackTimings =
        serde_json::from_str(r#"{ "flash_ms": 250, "copied_ms": 2000 }"#).unwrap();
    assert_eq!(timings.flash, Duration::from_millis(250));
    assert_eq!(timings.copied, Duration::from_millis(2000));

    let partial: FeedbackTimings = serde_json::from_str(r#"{ "flash_ms": 10 }"#).unwrap();
    assert_eq!(partial.copied, FeedbackTimings::default().copied);
}
