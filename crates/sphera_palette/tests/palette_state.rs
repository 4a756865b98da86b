use rand::rngs::StdRng;
use rand::SeedableRng;
use sphera_palette::{
    Arity, Backdrop, BackdropSink, ChangedSlots, ControlSink, HarmonyConfig, HarmonyEngine,
    HarmonyInputs, HarmonyScheme, HexColor, InputEvent, InputOutcome, MaterialSink, Palette,
    PaletteChange, PaletteError, PaletteState,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Material(usize, String),
    Lineup(usize),
    Shadows(bool),
    Controls(Vec<String>),
    Swatch(usize, String),
    Backdrop(String, String),
}

type Log = Rc<RefCell<Vec<Call>>>;

struct Probe(Log);

impl MaterialSink for Probe {
    fn set_material_color(&mut self, index: usize, color: HexColor) {
        self.0.borrow_mut().push(Call::Material(index, color.to_string()));
    }

    fn rebuild_lineup(&mut self, palette: &Palette) {
        self.0.borrow_mut().push(Call::Lineup(palette.len()));
    }

    fn set_shadows(&mut self, enabled: bool) {
        self.0.borrow_mut().push(Call::Shadows(enabled));
    }
}

impl ControlSink for Probe {
    fn sync_controls(&mut self, palette: &Palette) {
        self.0.borrow_mut().push(Call::Controls(palette.hex_list()));
    }

    fn set_swatch(&mut self, index: usize, color: HexColor) {
        self.0.borrow_mut().push(Call::Swatch(index, color.to_string()));
    }
}

impl BackdropSink for Probe {
    fn apply_backdrop(&mut self, backdrop: &Backdrop) {
        self.0.borrow_mut().push(Call::Backdrop(
            backdrop.background.to_string(),
            backdrop.accent.to_string(),
        ));
    }
}

fn probed(state: &mut PaletteState) -> Log {
    let log: Log = Rc::default();
    state.set_material_sink(Probe(log.clone()));
    state.set_control_sink(Probe(log.clone()));
    state.set_backdrop_sink(Probe(log.clone()));
    log.borrow_mut().clear();
    log
}

fn observed(state: &mut PaletteState) -> Rc<RefCell<Vec<PaletteChange>>> {
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = changes.clone();
    state.subscribe(move |change| sink.borrow_mut().push(change.clone()));
    changes
}

fn is_canonical_hex(text: &str) -> bool {
    text.len() == 7
        && text.starts_with('#')
        && text[1..].chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
}

#[test]
fn primary_color_reads_back_exactly() {
    let mut state = PaletteState::default();
    state.set_primary_color("#FF0000").unwrap();
    assert_eq!(state.palette().hex_list()[0], "#FF0000");

    state.set_primary_color("abc").unwrap();
    assert_eq!(state.palette().primary().to_string(), "#AABBCC");
    assert!(state.palette().is_in_harmony());
}

#[test]
fn primary_color_rederives_hsl() {
    let mut state = PaletteState::default();
    state.set_primary_color("#00ff00").unwrap();

    let palette = state.palette();
    assert!((palette.base_hue() - 120.0).abs() < 1e-3);
    assert!((palette.saturation() - 100.0).abs() < 1e-3);
    assert!((palette.brightness() - 50.0).abs() < 1e-3);
    assert_eq!(palette.scheme(), HarmonyScheme::Analogous);
    assert_eq!(palette.spread(), 30.0);
}

#[test]
fn malformed_primary_changes_nothing() {
    let mut state = PaletteState::default();
    let log = probed(&mut state);
    let changes = observed(&mut state);
    let before = state.palette().clone();

    assert_eq!(
        state.set_primary_color("#12345"),
        Err(PaletteError::InvalidHexFormat("#12345".into()))
    );
    assert_eq!(state.palette(), &before);
    assert!(log.borrow().is_empty());
    assert!(changes.borrow().is_empty());
}

#[test]
fn regenerate_from_default_session() {
    let mut state = PaletteState::default();
    assert_eq!(state.palette().hex_list(), vec!["#FC91E1", "#FC91AC", "#FCAC91"]);

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        state.regenerate_colors(&mut rng).unwrap();
        let palette = state.palette();

        let hex = palette.hex_list();
        assert_eq!(hex.len(), 3);
        assert!(hex.iter().all(|h| is_canonical_hex(h)), "{hex:?}");

        assert!((60.0..90.0).contains(&palette.brightness()));
        assert!((70.0..100.0).contains(&palette.saturation()));
        assert!((0.0..360.0).contains(&palette.base_hue()));

        // 8-bit quantization of colors[0] moves HSL only slightly
        let derived = palette.primary().to_hsl();
        assert!((59.5..=90.5).contains(&derived.lightness), "{derived:?}");
        assert!((67.0..=100.0).contains(&derived.saturation), "{derived:?}");
        assert_eq!(palette.scheme(), HarmonyScheme::Analogous);
        assert_eq!(palette.spread(), 30.0);
    }
}

#[test]
fn harmony_inputs_update_only_given_fields() {
    let mut state = PaletteState::default();
    state
        .set_from_harmony_inputs(HarmonyInputs::base(sphera_palette::Hsl::new(200.0, 60.0, 40.0)))
        .unwrap();
    state
        .set_from_harmony_inputs(HarmonyInputs {
            scheme: Some(HarmonyScheme::Triadic),
            spread: Some(45.0),
            ..HarmonyInputs::default()
        })
        .unwrap();

    let palette = state.palette();
    assert_eq!(palette.scheme(), HarmonyScheme::Triadic);
    assert!((palette.base_hue() - 200.0).abs() < 1e-3);
    assert!((palette.saturation() - 60.0).abs() < 1e-3);
    assert!((palette.brightness() - 40.0).abs() < 1e-3);
    assert_eq!(palette.spread(), 45.0);

    let expected = state
        .engine()
        .generate(HarmonyScheme::Triadic, palette.base(), 45.0)
        .unwrap();
    assert_eq!(palette.colors(), expected.as_slice());
}

#[test]
fn harmony_inputs_are_normalized() {
    let mut state = PaletteState::default();
    state
        .set_from_harmony_inputs(HarmonyInputs {
            base_hue: Some(-30.0),
            saturation: Some(140.0),
            brightness: Some(-3.0),
            spread: Some(120.0),
            ..HarmonyInputs::default()
        })
        .unwrap();

    let palette = state.palette();
    assert!((palette.base_hue() - 330.0).abs() < 1e-3);
    assert_eq!(palette.saturation(), 100.0);
    assert_eq!(palette.brightness(), 0.0);
    assert_eq!(palette.spread(), 90.0);
}

#[test]
fn non_finite_harmony_inputs_stay_in_range() {
    let mut state = PaletteState::default();
    state
        .set_from_harmony_inputs(HarmonyInputs {
            base_hue: Some(f32::NAN),
            saturation: Some(f32::INFINITY),
            brightness: Some(f32::NAN),
            spread: Some(f32::NEG_INFINITY),
            ..HarmonyInputs::default()
        })
        .unwrap();

    let palette = state.palette();
    assert!((0.0..360.0).contains(&palette.base_hue()));
    assert_eq!(palette.base_hue(), 0.0);
    assert_eq!(palette.saturation(), 100.0);
    assert_eq!(palette.brightness(), 0.0);
    assert!((0.0..=90.0).contains(&palette.spread()));
    assert_eq!(palette.primary(), HexColor::BLACK);
    for color in palette.hex_list() {
        assert!(is_canonical_hex(&color), "{color}");
    }
}

#[test]
fn full_refresh_reaches_every_sink() {
    let mut state = PaletteState::default();
    let log = probed(&mut state);
    let changes = observed(&mut state);

    state
        .set_from_harmony_inputs(HarmonyInputs::scheme(HarmonyScheme::Complementary))
        .unwrap();

    let hex = state.palette().hex_list();
    let backdrop = state.backdrop();
    assert_eq!(
        *log.borrow(),
        vec![
            Call::Material(0, hex[0].clone()),
            Call::Material(1, hex[1].clone()),
            Call::Material(2, hex[2].clone()),
            Call::Controls(hex.clone()),
            Call::Backdrop(backdrop.background.to_string(), hex[0].clone()),
        ]
    );

    let changes = changes.borrow();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].changed, ChangedSlots::All);
    assert!(!changes[0].lineup_changed);
    assert_eq!(&changes[0].palette, state.palette());
}

#[test]
fn lineup_rebuilds_when_arity_changes() {
    let engine = HarmonyEngine::new(HarmonyConfig {
        arity: Arity::Five,
        ..HarmonyConfig::default()
    })
    .unwrap();
    let mut state = PaletteState::new(engine, Palette::default()).unwrap();
    let log = probed(&mut state);
    let changes = observed(&mut state);

    state.set_primary_color("#336699").unwrap();
    assert_eq!(state.palette().len(), 5);
    assert_eq!(log.borrow()[0], Call::Lineup(5));
    assert!(changes.borrow()[0].lineup_changed);

    log.borrow_mut().clear();
    state.set_primary_color("#996633").unwrap();
    assert!(!log.borrow().contains(&Call::Lineup(5)));
}

#[test]
fn individual_color_touches_one_slot() {
    let mut state = PaletteState::default();
    state.set_primary_color("#3366CC").unwrap();
    let base = state.palette().base();
    let log = probed(&mut state);
    let changes = observed(&mut state);

    state.set_individual_color(2, "#00ff00").unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            Call::Material(2, "#00FF00".into()),
            Call::Swatch(2, "#00FF00".into())
        ]
    );
    assert_eq!(changes.borrow()[0].changed, ChangedSlots::Slot(2));
    assert_eq!(state.palette().base(), base);
    assert_eq!(state.palette().hex_list()[0], "#3366CC");
    assert!(!state.palette().is_in_harmony());

    // Drift persists until the next regeneration
    state.set_individual_color(1, "#000").unwrap();
    assert!(!state.palette().is_in_harmony());
    state
        .set_from_harmony_inputs(HarmonyInputs::default())
        .unwrap();
    assert!(state.palette().is_in_harmony());
    assert_ne!(state.palette().hex_list()[2], "#00FF00");
}

#[test]
fn individual_primary_refreshes_backdrop() {
    let mut state = PaletteState::default();
    let log = probed(&mut state);

    state.set_individual_color(0, "#101010").unwrap();
    assert!(matches!(log.borrow().last(), Some(Call::Backdrop(_, accent)) if accent == "#101010"));
}

#[test]
fn individual_color_rejects_bad_slots_and_text() {
    let mut state = PaletteState::default();
    assert_eq!(
        state.set_individual_color(3, "#FFFFFF"),
        Err(PaletteError::SlotOutOfRange { index: 3, len: 3 })
    );
    assert_eq!(
        state.set_individual_color(0, "white"),
        Err(PaletteError::InvalidHexFormat("white".into()))
    );
    assert_eq!(state.palette(), &Palette::default());
}

#[test]
fn toggles_only_reach_their_sinks() {
    let mut state = PaletteState::default();
    let log = probed(&mut state);
    let changes = observed(&mut state);
    let palette = state.palette().clone();

    state.set_white_background(true);
    state.set_white_background(true);
    state.set_shadows_enabled(false);

    assert_eq!(
        *log.borrow(),
        vec![
            Call::Backdrop("#FFFFFF".into(), "#FC91E1".into()),
            Call::Shadows(false)
        ]
    );
    assert!(changes.borrow().is_empty());
    assert_eq!(state.palette(), &palette);
    assert!(state.toggles().white_background);
    assert!(!state.toggles().shadows_enabled);
}

#[test]
fn attaching_a_sink_projects_current_state() {
    let mut state = PaletteState::default();
    let log: Log = Rc::default();
    state.set_material_sink(Probe(log.clone()));
    assert_eq!(*log.borrow(), vec![Call::Lineup(3), Call::Shadows(true)]);
}

#[test]
fn input_events_funnel_into_state() {
    let mut state = PaletteState::default();
    let mut rng = StdRng::seed_from_u64(1);

    let outcome = state
        .apply(InputEvent::HexFieldEdited("#0000FF".into()), &mut rng)
        .unwrap();
    assert_eq!(outcome, InputOutcome::Applied);
    assert_eq!(state.palette().hex_list()[0], "#0000FF");

    let outcome = state
        .apply(InputEvent::HexFieldEdited("#00F0".into()), &mut rng)
        .unwrap();
    assert_eq!(outcome, InputOutcome::Ignored);
    assert_eq!(state.palette().hex_list()[0], "#0000FF");

    state
        .apply(InputEvent::SchemeSelected(HarmonyScheme::Triadic), &mut rng)
        .unwrap();
    state.apply(InputEvent::HueChanged(0.0), &mut rng).unwrap();
    assert_eq!(state.palette().hex_list(), vec!["#FF0000", "#00FF00", "#0000FF"]);

    state.apply(InputEvent::BrightnessChanged(100.0), &mut rng).unwrap();
    assert_eq!(state.palette().hex_list()[0], "#FFFFFF");

    state
        .apply(InputEvent::WhiteBackgroundToggled(true), &mut rng)
        .unwrap();
    assert_eq!(state.backdrop().background, HexColor::WHITE);

    assert!(state.apply(InputEvent::Randomize, &mut rng).is_ok());
    assert!(state.palette().saturation() >= 70.0);
}

#[test]
fn disabled_scheme_selection_fails_loudly() {
    let engine = HarmonyEngine::new(HarmonyConfig {
        arity: Arity::Three,
        schemes: vec![HarmonyScheme::Analogous],
    })
    .unwrap();
    let mut state = PaletteState::new(engine, Palette::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    assert_eq!(
        state.apply(InputEvent::SchemeSelected(HarmonyScheme::Triadic), &mut rng),
        Err(PaletteError::UnknownHarmonyScheme("triadic".into()))
    );
    assert_eq!(state.palette(), &Palette::default());
}

#[test]
fn unsubscribed_observers_stop_receiving() {
    let mut state = PaletteState::default();
    let count = Rc::new(RefCell::new(0));
    let counter = count.clone();
    let id = state.subscribe(move |_| *counter.borrow_mut() += 1);

    state.set_primary_color("#123456").unwrap();
    assert!(state.unsubscribe(id));
    state.set_primary_color("#654321").unwrap();
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn css_variables_follow_the_palette() {
    let mut state = PaletteState::default();
    state.set_primary_color("#FF0000").unwrap();
    let vars = state.css_variables();
    assert_eq!(vars["accent"], "#FF0000");
    assert_eq!(vars["color-0"], "#FF0000");
    assert_eq!(vars.len(), 5);
}
