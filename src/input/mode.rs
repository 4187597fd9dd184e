//! Active keyboard page.

use crate::models::{Key, KeyKind};

/// Index of the letters page.
pub const LETTERS_MODE: usize = 0;

/// Tracks which catalog page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeController {
    mode: usize,
}

impl ModeController {
    /// Starts on the letters page.
    #[must_use]
    pub const fn new() -> Self {
        Self { mode: LETTERS_MODE }
    }

    /// Current page index.
    #[must_use]
    pub const fn mode(&self) -> usize {
        self.mode
    }

    /// Switches page. Returns false, changing nothing, if `mode` is already
    /// active.
    pub fn set(&mut self, mode: usize) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        true
    }
}

/// True if typing `key` should drop back to the letters page.
///
/// Space, return, letters and the apostrophe end a trip to a symbols page;
/// other digits and symbols keep it open for the next one.
#[must_use]
pub fn reverts_to_letters(key: &Key) -> bool {
    matches!(
        key.kind,
        KeyKind::Whitespace | KeyKind::Return | KeyKind::Character
    ) || key.lowercase_output.as_deref() == Some("'")
}
