//! Language routing: recognised text → tag, Braille indicator, speech code.
//!
//! Routing is total.  Whatever the detector says, including an error, the
//! result is one of the two [`LanguageTag`]s.

use std::sync::Arc;

use crate::config::LanguageConfig;

use super::detect::LanguageDetector;

/// Braille indicator placed before a primary-language (English) passage.
pub const PRIMARY_PREFIX: &str = "⠰⠑ ";
/// Braille indicator placed before a secondary-language (Hindi) passage.
pub const SECONDARY_PREFIX: &str = "⠰⠓ ";

// ---------------------------------------------------------------------------
// LanguageTag / Route
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageTag {
    Primary,
    Secondary,
}

impl LanguageTag {
    pub fn braille_prefix(self) -> &'static str {
        match self {
            LanguageTag::Primary => PRIMARY_PREFIX,
            LanguageTag::Secondary => SECONDARY_PREFIX,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LanguageTag::Primary => "primary",
            LanguageTag::Secondary => "secondary",
        }
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything downstream stages need to know about the text's language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub tag: LanguageTag,
    pub braille_prefix: &'static str,
    /// Language code handed to the speech synthesizer.
    pub speech_code: String,
    /// `false` when detection failed and the primary language was assumed.
    pub detected: bool,
}

// ---------------------------------------------------------------------------
// LanguageRouter
// ---------------------------------------------------------------------------

/// Maps detector output onto the deployment's two languages.
///
/// ```
/// use std::sync::Arc;
/// use braille_reader::config::LanguageConfig;
/// use braille_reader::language::{LanguageRouter, LanguageTag, ScriptDetector};
///
/// let router = LanguageRouter::new(Arc::new(ScriptDetector), &LanguageConfig::default());
///
/// let route = router.route("नमस्ते");
/// assert_eq!(route.tag, LanguageTag::Secondary);
/// assert_eq!(route.speech_code, "hi");
///
/// // Nothing to detect from: falls back to the primary language.
/// assert_eq!(router.route("").tag, LanguageTag::Primary);
/// ```
pub struct LanguageRouter {
    detector: Arc<dyn LanguageDetector>,
    primary: String,
    secondary: String,
}

impl LanguageRouter {
    pub fn new(detector: Arc<dyn LanguageDetector>, config: &LanguageConfig) -> Self {
        Self {
            detector,
            primary: config.primary.clone(),
            secondary: config.secondary.clone(),
        }
    }

    pub fn route(&self, text: &str) -> Route {
        let (tag, detected) = match self.detector.detect(text) {
            Ok(code) if code.eq_ignore_ascii_case(&self.secondary) => (LanguageTag::Secondary, true),
            Ok(code) => {
                if !code.eq_ignore_ascii_case(&self.primary) {
                    log::debug!("language: '{code}' is not routable, using {}", self.primary);
                }
                (LanguageTag::Primary, true)
            }
            Err(e) => {
                log::debug!("language: detection failed ({e}), using {}", self.primary);
                (LanguageTag::Primary, false)
            }
        };

        Route {
            tag,
            braille_prefix: tag.braille_prefix(),
            speech_code: self.speech_code(tag).to_string(),
            detected,
        }
    }

    pub fn speech_code(&self, tag: LanguageTag) -> &str {
        match tag {
            LanguageTag::Primary => &self.primary,
            LanguageTag::Secondary => &self.secondary,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
