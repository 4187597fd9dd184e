//! Shift state and its tap/double-tap transition rules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Case mode applied to character keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShiftState {
    /// Keys produce their lowercase output
    #[default]
    Lowercased,
    /// Keys produce uppercase output for the next character
    Uppercased,
    /// Keys produce uppercase output until unlocked
    CapsLocked,
}

impl ShiftState {
    /// Returns true for both one-shot uppercase and caps lock.
    #[must_use]
    pub const fn is_uppercased(self) -> bool {
        matches!(self, Self::Uppercased | Self::CapsLocked)
    }

    /// State after a single shift tap.
    ///
    /// Lowercased becomes Uppercased; Uppercased and CapsLocked both drop
    /// back to Lowercased.
    #[must_use]
    pub const fn tapped(self) -> Self {
        match self {
            Self::Lowercased => Self::Uppercased,
            Self::Uppercased => Self::Lowercased,
            Self::CapsLocked => Self::Lowercased,
        }
    }

    /// State after a rapid double tap: locks caps, or unlocks it.
    #[must_use]
    pub const fn double_tapped(self) -> Self {
        match self {
            Self::Lowercased => Self::CapsLocked,
            Self::Uppercased => Self::CapsLocked,
            Self::CapsLocked => Self::Lowercased,
        }
    }

    /// Applies an auto-capitalization decision.
    ///
    /// A positive decision raises Lowercased to Uppercased, a negative one
    /// lowers Uppercased to Lowercased. CapsLocked is never touched.
    #[must_use]
    pub const fn auto_capitalized(self, capitalize: bool) -> Self {
        match (self, capitalize) {
            (Self::Lowercased, true) => Self::Uppercased,
            (Self::Uppercased, false) => Self::Lowercased,
            (state, _) => state,
        }
    }

    /// Short lowercase name used in CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lowercased => "lowercased",
            Self::Uppercased => "uppercased",
            Self::CapsLocked => "caps_locked",
        }
    }
}

impl fmt::Display for ShiftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
