use softkey::document::{CapitalizationMode, MemoryDocument, TextDocument};
use softkey::input::{BackspacePhase, ControllerEvent, KeyboardController};
use softkey::models::{Key, KeyKind, ShiftState};
use softkey::preferences::Preferences;
use softkey::timer::TimerQueue;
use std::time::Duration;

fn controller() -> KeyboardController<TimerQueue, Preferences> {
    KeyboardController::new(TimerQueue::new(), Preferences::default())
}

fn doc_with(text: &str, mode: Option<CapitalizationMode>) -> MemoryDocument {
    MemoryDocument::with_text(text).with_capitalization(mode)
}

fn space() -> Key {
    Key::with_output(KeyKind::Whitespace, " ")
}

fn type_str(
    ctl: &mut KeyboardController<TimerQueue, Preferences>,
    doc: &mut MemoryDocument,
    text: &str,
) {
    for c in text.chars() {
        let key = if c == ' ' {
            space()
        } else if c.is_alphabetic() {
            Key::letter(c.to_string())
        } else {
            Key::with_output(KeyKind::SpecialCharacter, c.to_string())
        };
        ctl.on_key_pressed(&key, doc);
    }
}

fn shift_tap(ctl: &mut KeyboardController<TimerQueue, Preferences>) {
    ctl.on_shift_down();
    ctl.on_shift_up();
}

fn shift_double_tap(ctl: &mut KeyboardController<TimerQueue, Preferences>) {
    ctl.on_shift_down();
    ctl.on_shift_up();
    ctl.on_shift_down();
    ctl.on_shift_double_tap();
    ctl.on_shift_up();
}

// ============================================================================
// Shift
// ============================================================================

#[test]
fn test_shift_tap_cycle() {
    let mut ctl = controller();

    shift_tap(&mut ctl);
    assert_eq!(ctl.shift_state(), ShiftState::Uppercased);

    shift_tap(&mut ctl);
    assert_eq!(ctl.shift_state(), ShiftState::Lowercased);

    ctl.set_shift_state(ShiftState::CapsLocked);
    shift_tap(&mut ctl);
    assert_eq!(ctl.shift_state(), ShiftState::Lowercased);
}

#[test]
fn test_shift_double_tap_locks_and_tap_unlocks() {
    let mut ctl = controller();

    shift_double_tap(&mut ctl);
    assert_eq!(ctl.shift_state(), ShiftState::CapsLocked);

    shift_tap(&mut ctl);
    assert_eq!(ctl.shift_state(), ShiftState::Lowercased);
}

#[test]
fn test_caps_lock_survives_typing_and_sentence_ends() {
    let mut ctl = controller();
    let mut doc = doc_with("", Some(CapitalizationMode::Sentences));

    shift_double_tap(&mut ctl);
    type_str(&mut ctl, &mut doc, "no. way");

    assert_eq!(doc.text(), "NO. WAY");
    assert_eq!(ctl.shift_state(), ShiftState::CapsLocked);
}

// ============================================================================
// Auto-capitalization
// ============================================================================

#[test]
fn test_sentences_capitalize_after_period_space() {
    let mut ctl = controller();
    let mut doc = doc_with("Go. ", Some(CapitalizationMode::Sentences));

    ctl.on_external_context_changed(&mut doc);
    assert_eq!(ctl.shift_state(), ShiftState::Uppercased);
}

#[test]
fn test_sentences_stay_lowercase_mid_sentence() {
    let mut ctl = controller();
    let mut doc = doc_with("", Some(CapitalizationMode::Sentences));

    ctl.on_external_context_changed(&mut doc);
    type_str(&mut ctl, &mut doc, "the cat sat");
    assert_eq!(doc.text(), "The cat sat");
}

#[test]
fn test_words_capitalize_every_word() {
    let mut ctl = controller();
    let mut doc = doc_with("", Some(CapitalizationMode::Words));

    ctl.on_external_context_changed(&mut doc);
    type_str(&mut ctl, &mut doc, "new york city");
    assert_eq!(doc.text(), "New York City");
}

#[test]
fn test_unknown_capitalization_mode_never_capitalizes() {
    let mut ctl = controller();
    let mut doc = doc_with("", None);

    ctl.on_external_context_changed(&mut doc);
    type_str(&mut ctl, &mut doc, "hi. there");
    assert_eq!(doc.text(), "hi. there");
}

#[test]
fn test_disabled_auto_capitalization() {
    let prefs = Preferences {
        auto_capitalization: false,
        ..Preferences::default()
    };
    let mut ctl = KeyboardController::new(TimerQueue::new(), prefs);
    let mut doc = doc_with("", Some(CapitalizationMode::AllCharacters));

    ctl.on_external_context_changed(&mut doc);
    type_str(&mut ctl, &mut doc, "quiet");
    assert_eq!(doc.text(), "quiet");
}

#[test]
fn test_backspace_recapitalizes() {
    let mut ctl = controller();
    let mut doc = doc_with("Hi. T", Some(CapitalizationMode::Sentences));
    ctl.on_external_context_changed(&mut doc);
    assert_eq!(ctl.shift_state(), ShiftState::Lowercased);

    ctl.on_backspace_down(&mut doc);
    ctl.on_backspace_up();
    assert_eq!(doc.text(), "Hi. ");
    assert_eq!(ctl.shift_state(), ShiftState::Uppercased);
}

// ============================================================================
// Auto-period
// ============================================================================

#[test]
fn test_double_space_becomes_period() {
    let mut ctl = controller();
    let mut doc = doc_with("", Some(CapitalizationMode::None));

    type_str(&mut ctl, &mut doc, "a  ");
    assert_eq!(doc.text(), "a. ");
}

#[test]
fn test_double_space_after_punctuation_or_space_is_kept() {
    for prefix in [",", ".", " "] {
        let mut ctl = controller();
        let mut doc = doc_with(prefix, Some(CapitalizationMode::None));

        type_str(&mut ctl, &mut doc, "  ");
        assert_eq!(doc.text(), format!("{prefix}  "), "prefix {prefix:?}");
    }
}

#[test]
fn test_double_space_at_field_start_is_kept() {
    let mut ctl = controller();
    let mut doc = doc_with("", Some(CapitalizationMode::None));

    type_str(&mut ctl, &mut doc, "  ");
    assert_eq!(doc.text(), "  ");
}

#[test]
fn test_auto_period_disabled() {
    let prefs = Preferences {
        auto_period: false,
        ..Preferences::default()
    };
    let mut ctl = KeyboardController::new(TimerQueue::new(), prefs);
    let mut doc = doc_with("", Some(CapitalizationMode::None));

    type_str(&mut ctl, &mut doc, "a  ");
    assert_eq!(doc.text(), "a  ");
}

#[test]
fn test_context_change_between_spaces_cancels_period() {
    let mut ctl = controller();
    let mut doc = doc_with("", Some(CapitalizationMode::None));

    type_str(&mut ctl, &mut doc, "a ");
    ctl.on_external_context_changed(&mut doc);
    type_str(&mut ctl, &mut doc, " ");
    assert_eq!(doc.text(), "a  ");
}

// ============================================================================
// Backspace
// ============================================================================

#[test]
fn test_backspace_tap_deletes_once() {
    let mut ctl = controller();
    let mut doc = doc_with("abc", None);

    ctl.on_backspace_down(&mut doc);
    ctl.advance(Duration::from_millis(100), &mut doc);
    ctl.on_backspace_up();
    ctl.advance(Duration::from_secs(2), &mut doc);

    assert_eq!(doc.text(), "ab");
    assert_eq!(ctl.backspace_phase(), BackspacePhase::Idle);
    assert_eq!(ctl.timers().pending(), 0);
}

#[test]
fn test_backspace_hold_repeats_until_release() {
    let mut ctl = controller();
    let mut doc = doc_with("0123456789", None);

    ctl.on_backspace_down(&mut doc);
    ctl.advance(Duration::from_millis(499), &mut doc);
    assert_eq!(doc.text(), "012345678");

    ctl.advance(Duration::from_millis(1), &mut doc);
    assert_eq!(doc.text(), "01234567");
    assert_eq!(ctl.backspace_phase(), BackspacePhase::Repeating);

    ctl.advance(Duration::from_millis(140), &mut doc);
    assert_eq!(doc.text(), "012345");

    ctl.on_backspace_up();
    ctl.advance(Duration::from_secs(1), &mut doc);
    assert_eq!(doc.text(), "012345");
}

#[test]
fn test_backspace_hold_on_empty_field_is_harmless() {
    let mut ctl = controller();
    let mut doc = doc_with("", None);

    ctl.on_backspace_down(&mut doc);
    ctl.advance(Duration::from_secs(1), &mut doc);
    ctl.on_backspace_up();
    assert_eq!(doc.text(), "");
}

#[test]
fn test_second_press_restarts_delay() {
    let mut ctl = controller();
    let mut doc = doc_with("abcdef", None);

    ctl.on_backspace_down(&mut doc);
    ctl.advance(Duration::from_millis(400), &mut doc);
    ctl.on_backspace_down(&mut doc);
    ctl.advance(Duration::from_millis(400), &mut doc);
    ctl.on_backspace_up();

    // Two immediate deletes and no repeats
    assert_eq!(doc.text(), "abcd");
}

#[test]
fn test_mode_switch_cancels_backspace_hold() {
    let mut ctl = controller();
    let mut doc = doc_with("abcdef", None);

    ctl.on_backspace_down(&mut doc);
    ctl.on_mode_switch_key(1);
    ctl.advance(Duration::from_secs(1), &mut doc);

    assert_eq!(doc.text(), "abcde");
    assert_eq!(ctl.timers().pending(), 0);
}

// ============================================================================
// Modes
// ============================================================================

#[test]
fn test_character_key_returns_to_letters() {
    let mut ctl = controller();
    let mut doc = doc_with("", None);

    ctl.on_mode_switch_key(2);
    ctl.on_key_pressed(&Key::letter("x"), &mut doc);
    assert_eq!(ctl.mode(), 0);
}

#[test]
fn test_symbols_keep_page_but_apostrophe_and_space_return() {
    let mut ctl = controller();
    let mut doc = doc_with("", None);

    ctl.on_mode_switch_key(1);
    ctl.on_key_pressed(
        &Key::with_output(KeyKind::SpecialCharacter, "7"),
        &mut doc,
    );
    assert_eq!(ctl.mode(), 1);

    ctl.on_key_pressed(
        &Key::with_output(KeyKind::SpecialCharacter, "'"),
        &mut doc,
    );
    assert_eq!(ctl.mode(), 0);

    ctl.on_mode_switch_key(2);
    ctl.on_key_pressed(&space(), &mut doc);
    assert_eq!(ctl.mode(), 0);
    assert_eq!(doc.text(), "7' ");
}

#[test]
fn test_setting_current_mode_is_noop() {
    let mut ctl = controller();
    ctl.on_mode_switch_key(1);
    ctl.drain_events();

    assert!(!ctl.set_mode(1));
    ctl.on_mode_switch_key(1);
    assert!(ctl.drain_events().is_empty());
}

#[test]
fn test_mode_change_event_carries_shift() {
    let mut ctl = controller();
    ctl.set_shift_state(ShiftState::CapsLocked);
    ctl.drain_events();

    ctl.on_mode_switch_key(2);
    assert_eq!(
        ctl.drain_events(),
        vec![
            ControllerEvent::TrackedTouchesReset,
            ControllerEvent::ModeChanged {
                mode: 2,
                shift: ShiftState::CapsLocked
            }
        ]
    );
}

#[test]
fn test_unchanged_shift_emits_no_event() {
    let mut ctl = controller();
    let mut doc = doc_with("mid", Some(CapitalizationMode::Sentences));

    ctl.on_external_context_changed(&mut doc);
    ctl.on_external_context_changed(&mut doc);
    assert!(ctl.drain_events().is_empty());
}

#[test]
fn test_document_trait_object() {
    let mut doc = doc_with("ab", None);
    let dyn_doc: &mut dyn TextDocument = &mut doc;
    dyn_doc.insert_text("c");
    dyn_doc.delete_backward();
    assert_eq!(dyn_doc.lookback().as_deref(), Some("ab"));
    assert_eq!(dyn_doc.autocapitalization_mode(), None);
}
