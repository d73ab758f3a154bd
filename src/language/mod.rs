//! Language detection and routing.
//!
//! * [`LanguageDetector`]: trait for the identification collaborator.
//! * [`ScriptDetector`]: Devanagari-vs-Latin majority detector.
//! * [`LanguageRouter`]: picks the [`LanguageTag`], Braille indicator prefix
//!   and speech code for a recognised text.

pub mod detect;
pub mod router;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use detect::{DetectError, LanguageDetector, ScriptDetector, ENGLISH, HINDI};
pub use router::{LanguageRouter, LanguageTag, Route, PRIMARY_PREFIX, SECONDARY_PREFIX};
