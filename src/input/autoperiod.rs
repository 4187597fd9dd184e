//! Double-space to ". " shortcut.

use crate::document::TextDocument;
use crate::input::autocap::{is_sentence_punctuation, is_whitespace};
use crate::models::Key;
use tracing::debug;

/// Progress toward a double space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoPeriodState {
    /// The last key was not a space
    #[default]
    NoSpace,
    /// The last key was a space
    FirstSpace,
}

/// Tracks consecutive spaces and rewrites "word  " into "word. ".
#[derive(Debug, Clone, Default)]
pub struct AutoPeriod {
    state: AutoPeriodState,
}

impl AutoPeriod {
    /// Creates the policy in the `NoSpace` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> AutoPeriodState {
        self.state
    }

    /// Forgets any pending space (cursor moved, page changed).
    pub fn reset(&mut self) {
        self.state = AutoPeriodState::NoSpace;
    }

    /// Feeds a key that has already been inserted into `doc`.
    ///
    /// Returns true when the period shortcut rewrote the document. When
    /// `enabled` is false the policy does nothing.
    pub fn handle_key(&mut self, key: &Key, doc: &mut dyn TextDocument, enabled: bool) -> bool {
        if !enabled {
            return false;
        }

        match self.state {
            AutoPeriodState::NoSpace => {
                if key.is_whitespace() {
                    self.state = AutoPeriodState::FirstSpace;
                }
                false
            }
            AutoPeriodState::FirstSpace => {
                self.state = AutoPeriodState::NoSpace;

                if !key.is_whitespace() {
                    return false;
                }

                let lookback = doc.lookback();
                if !ends_with_word_and_double_space(lookback.as_deref()) {
                    return false;
                }

                doc.delete_backward();
                doc.delete_backward();
                doc.insert_text(".");
                doc.insert_text(" ");
                debug!("double space replaced with period");
                true
            }
        }
    }
}

/// True when the text ends in two literal spaces preceded by a character
/// that is not whitespace, sentence punctuation or a comma.
fn ends_with_word_and_double_space(lookback: Option<&str>) -> bool {
    let Some(text) = lookback else {
        return false;
    };

    let mut tail = text.chars().rev();
    match (tail.next(), tail.next(), tail.next()) {
        (Some(' '), Some(' '), Some(c)) => {
            !(is_whitespace(c) || is_sentence_punctuation(c) || c == ',')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;
    use crate::models::KeyKind;

    fn space() -> Key {
        Key::with_output(KeyKind::Whitespace, " ")
    }

    /// Inserts the key's output then feeds it to the policy, as the
    /// controller does.
    fn press(policy: &mut AutoPeriod, doc: &mut MemoryDocument, key: &Key) -> bool {
        doc.insert_text(key.output_for_case(crate::models::ShiftState::Lowercased));
        policy.handle_key(key, doc, true)
    }

    #[test]
    fn test_double_space_after_word() {
        let mut policy = AutoPeriod::new();
        let mut doc = MemoryDocument::with_text("a");

        assert!(!press(&mut policy, &mut doc, &space()));
        assert_eq!(policy.state(), AutoPeriodState::FirstSpace);
        assert!(press(&mut policy, &mut doc, &space()));

        assert_eq!(doc.text(), "a. ");
        assert_eq!(policy.state(), AutoPeriodState::NoSpace);
    }

    #[test]
    fn test_non_space_cancels_first_space() {
        let mut policy = AutoPeriod::new();
        let mut doc = MemoryDocument::with_text("a");

        press(&mut policy, &mut doc, &space());
        press(&mut policy, &mut doc, &Key::letter("b"));
        assert_eq!(policy.state(), AutoPeriodState::NoSpace);

        press(&mut policy, &mut doc, &space());
        assert_eq!(doc.text(), "a b ");
    }

    #[test]
    fn test_no_period_after_comma_punctuation_or_space() {
        for prefix in [",", ".", "!", "?", " "] {
            let mut policy = AutoPeriod::new();
            let mut doc = MemoryDocument::with_text(format!("x{prefix}"));

            press(&mut policy, &mut doc, &space());
            assert!(!press(&mut policy, &mut doc, &space()));
            assert_eq!(doc.text(), format!("x{prefix}  "));
            assert_eq!(policy.state(), AutoPeriodState::NoSpace);
        }
    }

    #[test]
    fn test_requires_three_characters() {
        let mut policy = AutoPeriod::new();
        let mut doc = MemoryDocument::new();

        press(&mut policy, &mut doc, &space());
        assert!(!press(&mut policy, &mut doc, &space()));
        assert_eq!(doc.text(), "  ");
    }

    #[test]
    fn test_third_space_does_not_retrigger() {
        let mut policy = AutoPeriod::new();
        let mut doc = MemoryDocument::with_text("word");

        press(&mut policy, &mut doc, &space());
        press(&mut policy, &mut doc, &space());
        press(&mut policy, &mut doc, &space());
        assert_eq!(doc.text(), "word.  ");
    }

    #[test]
    fn test_disabled_is_inert() {
        let mut policy = AutoPeriod::new();
        let mut doc = MemoryDocument::with_text("word  ");

        assert!(!policy.handle_key(&space(), &mut doc, false));
        assert!(!policy.handle_key(&space(), &mut doc, false));
        assert_eq!(policy.state(), AutoPeriodState::NoSpace);
        assert_eq!(doc.text(), "word  ");
    }

    #[test]
    fn test_reset() {
        let mut policy = AutoPeriod::new();
        let mut doc = MemoryDocument::with_text("word");

        press(&mut policy, &mut doc, &space());
        policy.reset();
        press(&mut policy, &mut doc, &space());
        assert_eq!(doc.text(), "word  ");
    }

    #[test]
    fn test_lookback_check() {
        assert!(ends_with_word_and_double_space(Some("a  ")));
        assert!(ends_with_word_and_double_space(Some("hello  ")));
        assert!(!ends_with_word_and_double_space(Some("a ")));
        assert!(!ends_with_word_and_double_space(Some("a\t ")));
        assert!(!ends_with_word_and_double_space(Some(",  ")));
        assert!(!ends_with_word_and_double_space(None));
    }
}
