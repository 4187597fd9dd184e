//! Auto-capitalization decision over the text before the cursor.

use crate::document::CapitalizationMode;

/// Number of characters the sentence scan looks back over.
const SENTENCE_LOOKBACK: usize = 3;

/// Sentence-ending punctuation.
pub(crate) const fn is_sentence_punctuation(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Line break characters.
pub(crate) const fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

/// Whitespace as the keyboard understands it: space, tab and line breaks.
pub(crate) const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Decides whether the next character should be capitalized.
///
/// - `lookback`: text before the cursor; `None` or empty means start of field
/// - `mode`: capitalization requested by the field; `None` (unknown) never
///   capitalizes
/// - `enabled`: the user's auto-capitalization preference
///
/// # Examples
///
/// ```
/// use softkey::document::CapitalizationMode;
/// use softkey::input::should_capitalize;
///
/// assert!(should_capitalize(Some("Go. "), Some(CapitalizationMode::Sentences), true));
/// assert!(!should_capitalize(Some("hi"), Some(CapitalizationMode::Words), true));
/// ```
#[must_use]
pub fn should_capitalize(
    lookback: Option<&str>,
    mode: Option<CapitalizationMode>,
    enabled: bool,
) -> bool {
    if !enabled {
        return false;
    }

    let lookback = lookback.filter(|text| !text.is_empty());

    match mode {
        None | Some(CapitalizationMode::None) => false,
        Some(CapitalizationMode::AllCharacters) => true,
        Some(CapitalizationMode::Words) => match lookback {
            Some(text) => text.chars().next_back().is_some_and(is_whitespace),
            None => true,
        },
        Some(CapitalizationMode::Sentences) => match lookback {
            Some(text) => sentence_start(text),
            None => true,
        },
    }
}

/// Scans back over at most three characters looking for a sentence boundary.
///
/// Punctuation directly before the cursor does not count: at least one space
/// has to follow it. Running out of characters without a decision
/// capitalizes.
fn sentence_start(text: &str) -> bool {
    for (i, c) in text.chars().rev().take(SENTENCE_LOOKBACK).enumerate() {
        if is_sentence_punctuation(c) {
            return i != 0;
        }
        if !is_whitespace(c) {
            return false;
        }
        if is_newline(c) {
            return true;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORDS: Option<CapitalizationMode> = Some(CapitalizationMode::Words);
    const SENTENCES: Option<CapitalizationMode> = Some(CapitalizationMode::Sentences);

    #[test]
    fn test_disabled_never_capitalizes() {
        for mode in CapitalizationMode::ALL {
            assert!(!should_capitalize(None, Some(mode), false));
        }
    }

    #[test]
    fn test_none_and_all_characters() {
        assert!(!should_capitalize(None, Some(CapitalizationMode::None), true));
        assert!(!should_capitalize(
            Some("Hi. "),
            Some(CapitalizationMode::None),
            true
        ));
        assert!(should_capitalize(
            Some("hello"),
            Some(CapitalizationMode::AllCharacters),
            true
        ));
    }

    #[test]
    fn test_unknown_mode_does_not_capitalize() {
        assert!(!should_capitalize(None, None, true));
        assert!(!should_capitalize(Some("Hi. "), None, true));
    }

    #[test]
    fn test_words() {
        assert!(should_capitalize(None, WORDS, true));
        assert!(should_capitalize(Some(""), WORDS, true));
        assert!(should_capitalize(Some("hi "), WORDS, true));
        assert!(should_capitalize(Some("hi\t"), WORDS, true));
        assert!(should_capitalize(Some("hi\n"), WORDS, true));
        assert!(!should_capitalize(Some("hi"), WORDS, true));
        assert!(!should_capitalize(Some("hi."), WORDS, true));
    }

    #[test]
    fn test_sentences_start_of_field() {
        assert!(should_capitalize(None, SENTENCES, true));
        assert!(should_capitalize(Some(""), SENTENCES, true));
    }

    #[test]
    fn test_sentences_after_punctuation_and_space() {
        assert!(should_capitalize(Some("Go. "), SENTENCES, true));
        assert!(should_capitalize(Some("Go!  "), SENTENCES, true));
        assert!(should_capitalize(Some("Really? "), SENTENCES, true));
    }

    #[test]
    fn test_sentences_punctuation_without_space() {
        assert!(!should_capitalize(Some("Go."), SENTENCES, true));
        assert!(!should_capitalize(Some("Go?"), SENTENCES, true));
    }

    #[test]
    fn test_sentences_mid_sentence() {
        assert!(!should_capitalize(Some("hello"), SENTENCES, true));
        assert!(!should_capitalize(Some("hello "), SENTENCES, true));
        assert!(!should_capitalize(Some("hello, "), SENTENCES, true));
    }

    #[test]
    fn test_sentences_newline_starts_sentence() {
        assert!(should_capitalize(Some("hello\n"), SENTENCES, true));
        assert!(should_capitalize(Some("hello\r"), SENTENCES, true));
        assert!(should_capitalize(Some("hello\n "), SENTENCES, true));
    }

    #[test]
    fn test_sentences_punctuation_beyond_window() {
        // Three spaces exhaust the scan before reaching the period
        assert!(should_capitalize(Some("Go.   "), SENTENCES, true));
        // Short whitespace-only lookback falls through to capitalize
        assert!(should_capitalize(Some(" "), SENTENCES, true));
        assert!(should_capitalize(Some("\t\t"), SENTENCES, true));
    }
}
