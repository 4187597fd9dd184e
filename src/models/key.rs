//! Key descriptors shared by the catalog and the input controller.

use crate::models::ShiftState;
use serde::{Deserialize, Serialize};

/// What a key does when pressed.
///
/// Serialized in snake case; `ModeChange` carries the page it switches to
/// (e.g. `{"mode_change": {"to_mode": 1}}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyKind {
    /// Letter key; typing it returns to the letters page
    Character,
    /// Digit or symbol key
    SpecialCharacter,
    /// Dedicated period key
    Period,
    /// Shift / caps lock
    Shift,
    /// Delete backward
    Backspace,
    /// Switches to another page of the catalog
    ModeChange {
        /// Target page index
        to_mode: usize,
    },
    /// Advances to the next system input method
    KeyboardChange,
    /// Space bar
    Whitespace,
    /// Return / enter
    Return,
    /// Opens the host's settings panel
    Settings,
    /// Anything else the host wants to place on a page
    Other,
}

/// Immutable key descriptor.
///
/// # Validation
///
/// - Character keys should provide at least one output
/// - `ModeChange` targets must name an existing page (checked by the catalog)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    /// Key behaviour
    pub kind: KeyKind,
    /// Output inserted while lowercased
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lowercase_output: Option<String>,
    /// Output inserted while uppercased or caps locked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uppercase_output: Option<String>,
    /// Cap label shown by the host (e.g. "123", "return")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Key {
    /// Creates a key with no output.
    #[must_use]
    pub const fn new(kind: KeyKind) -> Self {
        Self {
            kind,
            lowercase_output: None,
            uppercase_output: None,
            label: None,
        }
    }

    /// Creates a letter key; the uppercase output is derived from the letter.
    pub fn letter(letter: impl Into<String>) -> Self {
        Self::new(KeyKind::Character).with_letter(letter)
    }

    /// Creates a key whose output does not depend on case.
    pub fn with_output(kind: KeyKind, output: impl Into<String>) -> Self {
        let output = output.into();
        Self {
            kind,
            lowercase_output: Some(output.clone()),
            uppercase_output: Some(output),
            label: None,
        }
    }

    /// Creates a page switch key.
    pub fn mode_change(to_mode: usize, label: impl Into<String>) -> Self {
        Self::new(KeyKind::ModeChange { to_mode }).with_label(label)
    }

    /// Sets both outputs from a single letter.
    #[must_use]
    pub fn with_letter(mut self, letter: impl Into<String>) -> Self {
        let letter = letter.into();
        self.uppercase_output = Some(letter.to_uppercase());
        self.lowercase_output = Some(letter.to_lowercase());
        self
    }

    /// Sets the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// True when pressing the key inserts text.
    #[must_use]
    pub const fn has_output(&self) -> bool {
        self.lowercase_output.is_some() || self.uppercase_output.is_some()
    }

    /// True for keys that show a character popup (letters, symbols, period).
    #[must_use]
    pub const fn is_character(&self) -> bool {
        matches!(
            self.kind,
            KeyKind::Character | KeyKind::SpecialCharacter | KeyKind::Period
        )
    }

    /// True for the space bar.
    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self.kind, KeyKind::Whitespace)
    }

    /// Page this key switches to, if it is a mode change key.
    #[must_use]
    pub const fn to_mode(&self) -> Option<usize> {
        match self.kind {
            KeyKind::ModeChange { to_mode } => Some(to_mode),
            _ => None,
        }
    }

    /// Text inserted for the given shift state.
    ///
    /// Uppercased and caps-locked states prefer the uppercase output; either
    /// side falls back to the other, and a key with no output yields "".
    #[must_use]
    pub fn output_for_case(&self, shift: ShiftState) -> &str {
        let (preferred, fallback) = if shift.is_uppercased() {
            (&self.uppercase_output, &self.lowercase_output)
        } else {
            (&self.lowercase_output, &self.uppercase_output)
        };

        preferred
            .as_deref()
            .or(fallback.as_deref())
            .unwrap_or_default()
    }

    /// Label to display: explicit label, else the lowercase output.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label
            .as_deref()
            .or(self.lowercase_output.as_deref())
            .unwrap_or_default()
    }
}
