//! Text document interface consumed by the input controller.
//!
//! The controller never owns the host's text. Every operation that needs to
//! look at the text before the cursor or mutate it receives a
//! `&mut dyn TextDocument` explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Auto-capitalization behaviour requested by the focused text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapitalizationMode {
    /// Never capitalize automatically
    None,
    /// Capitalize the first letter of every word
    Words,
    /// Capitalize the first letter of every sentence
    Sentences,
    /// Capitalize everything
    AllCharacters,
}

impl CapitalizationMode {
    /// All modes, in declaration order.
    pub const ALL: [Self; 4] = [Self::None, Self::Words, Self::Sentences, Self::AllCharacters];

    /// Lowercase identifier used in config files and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Words => "words",
            Self::Sentences => "sentences",
            Self::AllCharacters => "all_characters",
        }
    }

    /// Parses a host-provided mode name.
    ///
    /// Unrecognized names yield `None`, which the capitalization policy
    /// treats as "do not capitalize".
    #[must_use]
    pub fn from_host(name: &str) -> Option<Self> {
        name.parse().ok()
    }
}

impl fmt::Display for CapitalizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CapitalizationMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown capitalization mode '{}'. Expected one of: none, words, sentences, all_characters",
                    s
                )
            })
    }
}

/// Read/write access to the host document around the cursor.
pub trait TextDocument {
    /// Text immediately before the cursor, or `None` at the start of the field.
    ///
    /// Implementations may truncate to a window, but must return at least the
    /// last three characters when they exist.
    fn lookback(&self) -> Option<String>;

    /// Inserts text at the cursor.
    fn insert_text(&mut self, text: &str);

    /// Deletes one character before the cursor. A no-op at the start.
    fn delete_backward(&mut self);

    /// Capitalization behaviour requested by the field, if known.
    fn autocapitalization_mode(&self) -> Option<CapitalizationMode>;
}

/// Default number of characters returned by [`MemoryDocument::lookback`].
pub const DEFAULT_LOOKBACK_WINDOW: usize = 64;

/// In-memory document with a cursor, used by the CLI host and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryDocument {
    text: String,
    /// Cursor position in characters
    cursor: usize,
    capitalization: Option<CapitalizationMode>,
    window: usize,
}

impl MemoryDocument {
    /// Creates an empty document requesting sentence capitalization.
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            capitalization: Some(CapitalizationMode::Sentences),
            window: DEFAULT_LOOKBACK_WINDOW,
        }
    }

    /// Creates a document holding `text` with the cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self {
            text,
            cursor,
            ..Self::new()
        }
    }

    /// Sets the capitalization mode reported to the controller.
    #[must_use]
    pub const fn with_capitalization(mut self, mode: Option<CapitalizationMode>) -> Self {
        self.capitalization = mode;
        self
    }

    /// Sets the lookback window (clamped to at least three characters).
    #[must_use]
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(3);
        self
    }

    /// Full document text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor, clamped to the document length.
    ///
    /// This does not notify anyone; callers that model a user moving the
    /// selection should follow it with
    /// `KeyboardController::on_external_context_changed`.
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.text.chars().count());
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map_or(self.text.len(), |(offset, _)| offset)
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl TextDocument for MemoryDocument {
    fn lookback(&self) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }

        let start = self.cursor.saturating_sub(self.window);
        let from = self.byte_offset(start);
        let to = self.byte_offset(self.cursor);
        Some(self.text[from..to].to_string())
    }

    fn insert_text(&mut self, text: &str) {
        let at = self.byte_offset(self.cursor);
        self.text.insert_str(at, text);
        self.cursor += text.chars().count();
    }

    fn delete_backward(&mut self) {
        if self.cursor == 0 {
            return;
        }

        let from = self.byte_offset(self.cursor - 1);
        let to = self.byte_offset(self.cursor);
        self.text.replace_range(from..to, "");
        self.cursor -= 1;
    }

    fn autocapitalization_mode(&self) -> Option<CapitalizationMode> {
        self.capitalization
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalization_mode_parsing() {
        assert_eq!(
            "sentences".parse::<CapitalizationMode>().unwrap(),
            CapitalizationMode::Sentences
        );
        assert_eq!(
            "All-Characters".parse::<CapitalizationMode>().unwrap(),
            CapitalizationMode::AllCharacters
        );
        assert!("shouting".parse::<CapitalizationMode>().is_err());
        assert_eq!(CapitalizationMode::from_host("shouting"), None);
        assert_eq!(
            CapitalizationMode::from_host("words"),
            Some(CapitalizationMode::Words)
        );
    }

    #[test]
    fn test_empty_document_has_no_lookback() {
        let doc = MemoryDocument::new();
        assert_eq!(doc.lookback(), None);
    }

    #[test]
    fn test_insert_and_delete() {
        let mut doc = MemoryDocument::new();
        doc.insert_text("hello");
        doc.insert_text(" ");
        assert_eq!(doc.text(), "hello ");
        assert_eq!(doc.cursor(), 6);

        doc.delete_backward();
        doc.delete_backward();
        assert_eq!(doc.text(), "hell");
        assert_eq!(doc.lookback().as_deref(), Some("hell"));
    }

    #[test]
    fn test_delete_at_start_is_noop() {
        let mut doc = MemoryDocument::new();
        doc.delete_backward();
        assert_eq!(doc.text(), "");
        assert_eq!(doc.cursor(), 0);
    }

    #[test]
    fn test_lookback_window() {
        let doc = MemoryDocument::with_text("abcdefgh").with_window(3);
        assert_eq!(doc.lookback().as_deref(), Some("fgh"));

        // Window never shrinks below three characters
        let doc = MemoryDocument::with_text("abcdefgh").with_window(1);
        assert_eq!(doc.lookback().as_deref(), Some("fgh"));
    }

    #[test]
    fn test_cursor_in_middle() {
        let mut doc = MemoryDocument::with_text("hello world");
        doc.set_cursor(5);
        assert_eq!(doc.lookback().as_deref(), Some("hello"));

        doc.insert_text(",");
        assert_eq!(doc.text(), "hello, world");

        doc.set_cursor(100);
        assert_eq!(doc.cursor(), 12);
    }

    #[test]
    fn test_multibyte_characters() {
        let mut doc = MemoryDocument::with_text("caf\u{e9}");
        doc.delete_backward();
        assert_eq!(doc.text(), "caf");

        doc.insert_text("\u{20ac}5");
        assert_eq!(doc.lookback().as_deref(), Some("caf\u{20ac}5"));
    }
}
