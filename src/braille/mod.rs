//! Text → Braille transliteration.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                    Transliterator                      │
//! │                                                        │
//! │   ┌──────────────┐   lookup    ┌──────────────────┐    │
//! │   │ SymbolTable  │◀────────────│ longest-match    │    │
//! │   │ (Arc, static)│             │ scan + fallback  │    │
//! │   └──────────────┘             └────────┬─────────┘    │
//! │                                         │              │
//! │                       miss ┌────────────▼─────────┐    │
//! │  text ────────────────────▶│ ResultCache (moka)   │──▶ braille
//! │                       hit  └──────────────────────┘    │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use braille_reader::braille::{CacheStatus, Transliterator};
//!
//! let engine = Transliterator::standard(128);
//!
//! let (first, status) = engine.transliterate_traced("क्षमा");
//! assert_eq!(status, CacheStatus::Miss);
//! assert_eq!(first.braille, "⠟⠍⠡");
//!
//! let (_, status) = engine.transliterate_traced("क्षमा");
//! assert_eq!(status, CacheStatus::Hit);
//! ```

pub mod cache;
pub mod engine;
pub mod table;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use cache::CacheStats;
pub use engine::{
    CacheStatus, TransliterationResult, Transliterator, DEFAULT_CACHE_CAPACITY, FALLBACK,
};
pub use table::SymbolTable;
