//! The keyboard controller: routes key events through shift, mode,
//! auto-period, auto-capitalization and backspace handling.

use crate::document::TextDocument;
use crate::feedback::{KeyFeedback, Silent};
use crate::input::autocap::should_capitalize;
use crate::input::autoperiod::{AutoPeriod, AutoPeriodState};
use crate::input::backspace::{BackspacePhase, BackspaceRepeater, BackspaceTick};
use crate::input::mode::{reverts_to_letters, ModeController, LETTERS_MODE};
use crate::input::shift::{ShiftGesture, ShiftOutcome};
use crate::models::{Key, KeyKind, ShiftState};
use crate::preferences::{PreferenceKey, PreferencesSource};
use crate::timer::{TimerFacility, TimerId, TimerQueue};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Something the host has to act on.
///
/// State-change events are only queued when the value actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum ControllerEvent {
    /// Key caps should be redrawn for a new shift state
    ShiftChanged {
        /// New shift state
        shift: ShiftState,
    },
    /// The page changed; lay out `mode` for `shift`
    ModeChanged {
        /// New page index
        mode: usize,
        /// Shift state to lay the page out with
        shift: ShiftState,
    },
    /// Drop the caps-lock hint drawn on the shift key
    LockHintCleared,
    /// Forget touches the host is tracking
    TrackedTouchesReset,
    /// Switch to the next system input method
    AdvanceInputMode,
    /// Show or hide the settings panel
    ToggleSettings,
    /// Preferences changed; redraw key caps for `shift`
    RefreshKeyCaps {
        /// Current shift state
        shift: ShiftState,
    },
}

/// Input state machine for a soft keyboard.
///
/// Every event is handled to completion before the next one, so multi-step
/// document edits (like the period shortcut) never interleave.
///
/// Side effects for the host queue up until [`KeyboardController::drain_events`]
/// is called, so hosts should drain after every call.
pub struct KeyboardController<T, P> {
    shift: ShiftState,
    gesture: ShiftGesture,
    modes: ModeController,
    auto_period: AutoPeriod,
    backspace: BackspaceRepeater,
    timers: T,
    preferences: P,
    feedback: Box<dyn KeyFeedback>,
    events: Vec<ControllerEvent>,
}

impl<T: TimerFacility, P: PreferencesSource> KeyboardController<T, P> {
    /// Creates a controller on the letters page, lowercased.
    pub fn new(timers: T, preferences: P) -> Self {
        Self {
            shift: ShiftState::Lowercased,
            gesture: ShiftGesture::Idle,
            modes: ModeController::new(),
            auto_period: AutoPeriod::new(),
            backspace: BackspaceRepeater::default(),
            timers,
            preferences,
            feedback: Box::new(Silent),
            events: Vec::new(),
        }
    }

    /// Overrides the backspace repeat timing.
    #[must_use]
    pub fn with_backspace_timing(mut self, initial_delay: Duration, repeat: Duration) -> Self {
        self.backspace.cancel(&mut self.timers);
        self.backspace = BackspaceRepeater::new(initial_delay, repeat);
        self
    }

    /// Sets the click feedback implementation.
    #[must_use]
    pub fn with_feedback(mut self, feedback: Box<dyn KeyFeedback>) -> Self {
        self.feedback = feedback;
        self
    }

    // === STATE ===

    /// Current shift state.
    pub const fn shift_state(&self) -> ShiftState {
        self.shift
    }

    /// Current page index.
    pub const fn mode(&self) -> usize {
        self.modes.mode()
    }

    /// Shift gesture in progress.
    pub const fn shift_gesture(&self) -> ShiftGesture {
        self.gesture
    }

    /// Double-space tracking state.
    pub const fn auto_period_state(&self) -> AutoPeriodState {
        self.auto_period.state()
    }

    /// Backspace hold phase.
    pub const fn backspace_phase(&self) -> BackspacePhase {
        self.backspace.phase()
    }

    /// Timer facility.
    pub const fn timers(&self) -> &T {
        &self.timers
    }

    /// Preferences source.
    pub const fn preferences(&self) -> &P {
        &self.preferences
    }

    /// Mutable preferences; follow changes with
    /// [`KeyboardController::on_preferences_changed`].
    pub fn preferences_mut(&mut self) -> &mut P {
        &mut self.preferences
    }

    /// Takes the queued host events.
    ///
    /// The queue is only emptied here; a host that never drains it keeps
    /// every event for the controller's lifetime.
    pub fn drain_events(&mut self) -> Vec<ControllerEvent> {
        std::mem::take(&mut self.events)
    }

    // === SETTERS ===

    /// Sets the shift state. Returns true if it changed.
    pub fn set_shift_state(&mut self, shift: ShiftState) -> bool {
        if self.shift == shift {
            return false;
        }

        debug!(from = %self.shift, to = %shift, "shift state changed");
        self.shift = shift;
        self.events.push(ControllerEvent::ShiftChanged { shift });
        true
    }

    /// Switches page. Returns true if it changed.
    ///
    /// A real change resets tracked touches, the shift gesture and the
    /// double-space tracking. Setting the current page does nothing.
    pub fn set_mode(&mut self, mode: usize) -> bool {
        let from = self.modes.mode();
        if !self.modes.set(mode) {
            return false;
        }

        debug!(from, to = mode, "mode changed");
        self.events.push(ControllerEvent::TrackedTouchesReset);
        self.gesture.clear();
        self.auto_period.reset();
        self.events.push(ControllerEvent::ModeChanged {
            mode,
            shift: self.shift,
        });
        true
    }

    // === KEY EVENTS ===

    /// A key with output was tapped (touch up inside).
    ///
    /// Inserts the key's output for the current case, returns to the letters
    /// page where appropriate, runs the period shortcut, then re-evaluates
    /// auto-capitalization.
    pub fn on_key_pressed(&mut self, key: &Key, doc: &mut dyn TextDocument) {
        self.backspace.cancel(&mut self.timers);

        if key.has_output() {
            doc.insert_text(key.output_for_case(self.shift));

            if reverts_to_letters(key) {
                self.set_mode(LETTERS_MODE);
            }

            let enabled = self.preferences.get_bool(PreferenceKey::AutoPeriod);
            self.auto_period.handle_key(key, doc, enabled);
        }

        self.update_caps_if_needed(doc);
    }

    /// Any key touched down. Plays the click if enabled.
    pub fn on_key_touch_down(&self) {
        self.play_click();
    }

    /// Shift touched down.
    pub fn on_shift_down(&mut self) {
        self.backspace.cancel(&mut self.timers);
        let outcome = self.gesture.press(self.shift);
        self.apply_shift(outcome);
    }

    /// Shift released inside the key.
    pub fn on_shift_up(&mut self) {
        self.backspace.cancel(&mut self.timers);
        let outcome = self.gesture.release(self.shift);
        self.apply_shift(outcome);
    }

    /// Shift double tapped.
    pub fn on_shift_double_tap(&mut self) {
        self.backspace.cancel(&mut self.timers);
        let outcome = self.gesture.double_tap(self.shift);
        self.apply_shift(outcome);
    }

    /// A page switch key was touched down.
    pub fn on_mode_switch_key(&mut self, to_mode: usize) {
        self.backspace.cancel(&mut self.timers);
        self.set_mode(to_mode);
    }

    /// Backspace touched down: delete once and start the repeat delay.
    pub fn on_backspace_down(&mut self, doc: &mut dyn TextDocument) {
        self.backspace.press(&mut self.timers);
        doc.delete_backward();
        self.update_caps_if_needed(doc);
    }

    /// Backspace released, dragged out or cancelled.
    pub fn on_backspace_up(&mut self) {
        self.backspace.release(&mut self.timers);
    }

    /// The keyboard switch key was tapped.
    pub fn on_advance_input_mode(&mut self) {
        self.backspace.cancel(&mut self.timers);
        self.events.push(ControllerEvent::TrackedTouchesReset);
        self.gesture.clear();
        self.events.push(ControllerEvent::AdvanceInputMode);
    }

    /// The settings key was tapped.
    pub fn on_settings_key(&mut self) {
        self.backspace.cancel(&mut self.timers);
        self.events.push(ControllerEvent::ToggleSettings);
    }

    /// The host document changed without a key press (selection moved,
    /// text pasted, field switched).
    pub fn on_external_context_changed(&mut self, doc: &mut dyn TextDocument) {
        self.update_caps_if_needed(doc);
        self.auto_period.reset();
    }

    /// The device is rotating; tracked touches and any shift gesture in
    /// flight are abandoned.
    pub fn on_orientation_change(&mut self) {
        self.events.push(ControllerEvent::TrackedTouchesReset);
        self.gesture.clear();
    }

    /// Preferences were edited; the host should redraw key caps.
    pub fn on_preferences_changed(&mut self) {
        self.events.push(ControllerEvent::RefreshKeyCaps { shift: self.shift });
    }

    /// Delivers a fired timer.
    pub fn on_timer(&mut self, id: TimerId, doc: &mut dyn TextDocument) {
        match self.backspace.on_timer(id, &mut self.timers) {
            BackspaceTick::Delete => {
                self.play_click();
                doc.delete_backward();
                self.update_caps_if_needed(doc);
            }
            BackspaceTick::RepeatStarted | BackspaceTick::Ignored => {}
        }
    }

    /// Taps a catalog key: touch down followed by touch up inside.
    ///
    /// Routes the key to the handler for its kind, the way a host wires
    /// touch targets.
    pub fn tap(&mut self, key: &Key, doc: &mut dyn TextDocument) {
        self.on_key_touch_down();

        match key.kind {
            KeyKind::Shift => {
                self.on_shift_down();
                self.on_shift_up();
            }
            KeyKind::Backspace => {
                self.on_backspace_down(doc);
                self.on_backspace_up();
            }
            KeyKind::ModeChange { to_mode } => self.on_mode_switch_key(to_mode),
            KeyKind::KeyboardChange => self.on_advance_input_mode(),
            KeyKind::Settings => self.on_settings_key(),
            KeyKind::Character
            | KeyKind::SpecialCharacter
            | KeyKind::Period
            | KeyKind::Whitespace
            | KeyKind::Return
            | KeyKind::Other => self.on_key_pressed(key, doc),
        }
    }

    /// Re-runs auto-capitalization against the document.
    ///
    /// Caps lock is never changed.
    pub fn update_caps_if_needed(&mut self, doc: &dyn TextDocument) {
        let enabled = self
            .preferences
            .get_bool(PreferenceKey::AutoCapitalization);
        let capitalize = should_capitalize(
            doc.lookback().as_deref(),
            doc.autocapitalization_mode(),
            enabled,
        );
        self.set_shift_state(self.shift.auto_capitalized(capitalize));
    }

    fn apply_shift(&mut self, outcome: ShiftOutcome) {
        self.set_shift_state(outcome.state);
        if outcome.clear_lock_hint {
            self.events.push(ControllerEvent::LockHintCleared);
        }
    }

    fn play_click(&self) {
        if self.preferences.get_bool(PreferenceKey::KeyClicks) {
            self.feedback.click();
        }
    }
}

impl<P: PreferencesSource> KeyboardController<TimerQueue, P> {
    /// Moves the simulated clock forward by `by`, delivering every timer
    /// that comes due in order.
    pub fn advance(&mut self, by: Duration, doc: &mut dyn TextDocument) {
        let until = self.timers.now() + by;
        while let Some(id) = self.timers.pop_due(until) {
            self.on_timer(id, doc);
        }
        self.timers.advance_to(until);
    }
}
