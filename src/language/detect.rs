//! Language identification collaborator.
//!
//! [`ScriptDetector`] decides between Hindi and English by counting letters
//! in the Devanagari block (U+0900–U+097F) against Latin letters.  It fails
//! rather than guessing when the text has no letters or the two scripts are
//! tied; the router turns any failure into the primary language.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Unicode ranges
// ---------------------------------------------------------------------------

const DEVANAGARI_START: char = '\u{0900}';
const DEVANAGARI_END: char = '\u{097F}';

/// ISO-639-1 code reported for Devanagari-majority text.
pub const HINDI: &str = "hi";
/// ISO-639-1 code reported for Latin-majority text.
pub const ENGLISH: &str = "en";

fn is_devanagari_letter(c: char) -> bool {
    (DEVANAGARI_START..=DEVANAGARI_END).contains(&c) && c.is_alphabetic()
}

fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || (('\u{00C0}'..='\u{024F}').contains(&c) && c.is_alphabetic())
}

// ---------------------------------------------------------------------------
// DetectError / LanguageDetector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectError {
    /// Nothing in the text could identify a language.
    #[error("no letters to detect a language from")]
    NoFeatures,

    /// The evidence is split evenly.
    #[error("ambiguous text: {devanagari} Devanagari vs {latin} Latin letters")]
    Ambiguous { devanagari: usize, latin: usize },
}

/// Returns an ISO-639-1 code for `text`, or fails.
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> Result<String, DetectError>;
}

// ---------------------------------------------------------------------------
// ScriptDetector
// ---------------------------------------------------------------------------

/// Majority-script detector for Hindi / English text.
///
/// ```
/// use braille_reader::language::{LanguageDetector, ScriptDetector};
///
/// let d = ScriptDetector;
/// assert_eq!(d.detect("नमस्ते दुनिया").unwrap(), "hi");
/// assert_eq!(d.detect("hello world").unwrap(), "en");
/// assert!(d.detect("1234 ...").is_err());
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptDetector;

impl LanguageDetector for ScriptDetector {
    fn detect(&self, text: &str) -> Result<String, DetectError> {
        let (devanagari, latin) = text.chars().fold((0usize, 0usize), |(d, l), c| {
            if is_devanagari_letter(c) {
                (d + 1, l)
            } else if is_latin_letter(c) {
                (d, l + 1)
            } else {
                (d, l)
            }
        });

        if devanagari + latin == 0 {
            return Err(DetectError::NoFeatures);
        }

        match devanagari.cmp(&latin) {
            std::cmp::Ordering::Greater => Ok(HINDI.to_string()),
            std::cmp::Ordering::Less => Ok(ENGLISH.to_string()),
            std::cmp::Ordering::Equal => Err(DetectError::Ambiguous { devanagari, latin }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn devanagari_text_is_hindi() {
        assert_eq!(ScriptDetector.detect("यह एक परीक्षा है।").unwrap(), HINDI);
    }

    #[test]
    fn latin_text_is_english() {
        assert_eq!(ScriptDetector.detect("The quick brown fox.").unwrap(), ENGLISH);
    }

    #[test]
    fn majority_wins_in_mixed_text() {
        assert_eq!(ScriptDetector.detect("OCR से पढ़ा गया पाठ").unwrap(), HINDI);
        assert_eq!(ScriptDetector.detect("Reading नमस्ते aloud today").unwrap(), ENGLISH);
    }

    #[test]
    fn empty_or_symbol_only_text_fails() {
        assert_eq!(ScriptDetector.detect(""), Err(DetectError::NoFeatures));
        assert_eq!(ScriptDetector.detect("  12 ?! ९"), Err(DetectError::NoFeatures));
    }

    #[test]
    fn tie_is_ambiguous() {
        assert!(matches!(
            ScriptDetector.detect("ab कम"),
            Err(DetectError::Ambiguous { .. })
        ));
    }

    #[test]
    fn vowel_signs_count_as_devanagari() {
        // Dependent signs are alphabetic in Unicode.
        assert!(is_devanagari_letter('\u{093F}'));
        assert!(!is_devanagari_letter('\u{0966}'));
    }
}
