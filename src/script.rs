//! Keystroke scripts.
//!
//! A script is plain text where each character taps the catalog key that
//! types it. Braced tokens stand for the keys and host events that have no
//! printable output:
//!
//! | Token            | Effect                                          |
//! |------------------|-------------------------------------------------|
//! | `{shift}`        | tap shift (down, then up)                       |
//! | `{shift-down}`   | shift touch down                                |
//! | `{shift-up}`     | shift touch up                                  |
//! | `{shift-double}` | shift double tap                                |
//! | `{bs}`           | tap backspace                                   |
//! | `{bs-hold:MS}`   | hold backspace for `MS` milliseconds            |
//! | `{wait:MS}`      | let `MS` milliseconds pass                      |
//! | `{mode:N}`       | press the page switch key for page `N`          |
//! | `{return}`       | tap return                                      |
//! | `{next}`         | tap the input method switch key                 |
//! | `{context}`      | the document changed outside the keyboard       |
//! | `{rotate}`       | the device rotated                              |
//!
//! `{{` types a literal `{`.

use crate::catalog::KeyCatalog;
use crate::document::TextDocument;
use crate::input::{ControllerEvent, KeyboardController};
use crate::models::KeyKind;
use crate::preferences::PreferencesSource;
use crate::timer::TimerQueue;
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::debug;

/// One step of a keystroke script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Tap the key that types this character
    Type(char),
    /// Shift down and up
    Shift,
    /// Shift touch down
    ShiftDown,
    /// Shift touch up
    ShiftUp,
    /// Shift double tap
    ShiftDoubleTap,
    /// Backspace down and up
    Backspace,
    /// Backspace held for a duration, then released
    BackspaceHold(Duration),
    /// Time passes
    Wait(Duration),
    /// Page switch key for a page
    Mode(usize),
    /// Return key
    Return,
    /// Input method switch key
    NextInputMode,
    /// Host document changed
    ContextChanged,
    /// Device rotation
    Rotate,
}

/// Parses a keystroke script.
///
/// # Errors
///
/// Returns an error for an unterminated or unknown `{token}`, or a token
/// argument that is not a number.
pub fn parse(script: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    let mut chars = script.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c != '{' {
            steps.push(Step::Type(c));
            continue;
        }

        if chars.next_if(|&(_, next)| next == '{').is_some() {
            steps.push(Step::Type('{'));
            continue;
        }

        let body_start = start + 1;
        let body_end = loop {
            match chars.next() {
                Some((index, '}')) => break index,
                Some(_) => {}
                None => anyhow::bail!("Unterminated token at offset {start}: '{}'", &script[start..]),
            }
        };

        let token = &script[body_start..body_end];
        steps.push(parse_token(token).context(format!("Invalid token '{{{token}}}' at offset {start}"))?);
    }

    Ok(steps)
}

fn parse_token(token: &str) -> Result<Step> {
    let (name, argument) = match token.split_once(':') {
        Some((name, argument)) => (name.trim(), Some(argument.trim())),
        None => (token.trim(), None),
    };

    let step = match (name, argument) {
        ("shift", None) => Step::Shift,
        ("shift-down", None) => Step::ShiftDown,
        ("shift-up", None) => Step::ShiftUp,
        ("shift-double", None) => Step::ShiftDoubleTap,
        ("bs", None) => Step::Backspace,
        ("bs-hold", Some(ms)) => Step::BackspaceHold(parse_millis(ms)?),
        ("wait", Some(ms)) => Step::Wait(parse_millis(ms)?),
        ("mode", Some(mode)) => Step::Mode(
            mode.parse()
                .context(format!("'{mode}' is not a page number"))?,
        ),
        ("return", None) => Step::Return,
        ("next", None) => Step::NextInputMode,
        ("context", None) => Step::ContextChanged,
        ("rotate", None) => Step::Rotate,
        ("bs-hold" | "wait" | "mode", None) => {
            anyhow::bail!("'{name}' needs an argument, e.g. {{{name}:100}}")
        }
        (_, Some(_)) if is_known(name) => anyhow::bail!("'{name}' takes no argument"),
        _ => anyhow::bail!("Unknown token '{name}'"),
    };

    Ok(step)
}

fn is_known(name: &str) -> bool {
    matches!(
        name,
        "shift" | "shift-down" | "shift-up" | "shift-double" | "bs" | "return" | "next" | "context" | "rotate"
    )
}

fn parse_millis(value: &str) -> Result<Duration> {
    let millis: u64 = value
        .parse()
        .context(format!("'{value}' is not a number of milliseconds"))?;
    Ok(Duration::from_millis(millis))
}

/// Plays scripts against a controller, pressing catalog keys.
pub struct Player<'a> {
    catalog: &'a KeyCatalog,
    events: Vec<ControllerEvent>,
}

impl<'a> Player<'a> {
    /// Creates a player that looks keys up in `catalog`.
    #[must_use]
    pub const fn new(catalog: &'a KeyCatalog) -> Self {
        Self {
            catalog,
            events: Vec::new(),
        }
    }

    /// Events the controller raised so far, in order.
    #[must_use]
    pub fn events(&self) -> &[ControllerEvent] {
        &self.events
    }

    /// Takes the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<ControllerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Consumes the player, returning the recorded events.
    pub fn into_events(self) -> Vec<ControllerEvent> {
        self.events
    }

    /// Plays every step in order.
    ///
    /// # Errors
    ///
    /// Fails on the first step that names a character or page the catalog
    /// does not have. Steps before it have already been applied.
    pub fn play<P: PreferencesSource>(
        &mut self,
        steps: &[Step],
        ctl: &mut KeyboardController<TimerQueue, P>,
        doc: &mut dyn TextDocument,
    ) -> Result<()> {
        for (index, step) in steps.iter().enumerate() {
            self.play_step(*step, ctl, doc)
                .context(format!("Step {} ({step:?}) failed", index + 1))?;
        }
        Ok(())
    }

    /// Plays one step.
    ///
    /// # Errors
    ///
    /// Fails if the step names a character or page the catalog does not have.
    pub fn play_step<P: PreferencesSource>(
        &mut self,
        step: Step,
        ctl: &mut KeyboardController<TimerQueue, P>,
        doc: &mut dyn TextDocument,
    ) -> Result<()> {
        debug!(?step, "playing step");

        match step {
            Step::Type(c) => {
                let mut buf = [0; 4];
                let output: &str = c.encode_utf8(&mut buf);
                let (page, key) = self
                    .catalog
                    .find_by_output(ctl.mode(), output)
                    .context(format!("No key types {c:?}"))?;

                // Reach the key's page the way a user would
                if page != ctl.mode() {
                    ctl.on_mode_switch_key(page);
                }
                ctl.tap(key, doc);
            }
            Step::Shift => {
                ctl.on_key_touch_down();
                ctl.on_shift_down();
                ctl.on_shift_up();
            }
            Step::ShiftDown => {
                ctl.on_key_touch_down();
                ctl.on_shift_down();
            }
            Step::ShiftUp => ctl.on_shift_up(),
            Step::ShiftDoubleTap => {
                ctl.on_key_touch_down();
                ctl.on_shift_double_tap();
            }
            Step::Backspace => {
                ctl.on_key_touch_down();
                ctl.on_backspace_down(doc);
                ctl.on_backspace_up();
            }
            Step::BackspaceHold(duration) => {
                ctl.on_key_touch_down();
                ctl.on_backspace_down(doc);
                ctl.advance(duration, doc);
                ctl.on_backspace_up();
            }
            Step::Wait(duration) => ctl.advance(duration, doc),
            Step::Mode(mode) => {
                if mode >= self.catalog.mode_count() {
                    anyhow::bail!(
                        "Page {mode} does not exist ({} pages)",
                        self.catalog.mode_count()
                    );
                }
                ctl.on_key_touch_down();
                ctl.on_mode_switch_key(mode);
            }
            Step::Return => {
                let (_, key) = self
                    .catalog
                    .find_by_kind(ctl.mode(), KeyKind::Return)
                    .context("Catalog has no return key")?;
                ctl.tap(key, doc);
            }
            Step::NextInputMode => {
                ctl.on_key_touch_down();
                ctl.on_advance_input_mode();
            }
            Step::ContextChanged => ctl.on_external_context_changed(doc),
            Step::Rotate => ctl.on_orientation_change(),
        }

        self.events.extend(ctl.drain_events());
        Ok(())
    }
}
