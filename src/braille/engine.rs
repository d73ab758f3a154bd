//! Longest-match Braille transliteration.
//!
//! [`Transliterator`] scans its input one Unicode scalar value at a time.  At
//! each cursor position it tries the longest candidate first, from
//! [`SymbolTable::max_key_chars`] down to a single char, and emits the first
//! table hit.  When nothing matches, a single space is emitted and the cursor
//! moves forward by exactly one char so no unrecognised content is skipped.
//!
//! Output length tracks the input per matched grapheme, not per codepoint: the
//! three-codepoint conjunct `क्ष` becomes one Braille cell, while `त्र`
//! becomes two.
//!
//! Results are memoised in a bounded [`ResultCache`] keyed by the exact input
//! text.  The cache is an optimisation only; [`Transliterator::transliterate_uncached`]
//! always produces the same string.
//!
//! Feeding Braille output back in is not idempotent: Braille cells are not
//! table keys and fall back to spaces.

use std::sync::Arc;

use super::cache::{CacheStats, ResultCache};
use super::table::SymbolTable;

/// Emitted for every char that starts no table key.
pub const FALLBACK: &str = " ";

/// Default number of distinct texts kept in the result cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 128;

// ---------------------------------------------------------------------------
// TransliterationResult / CacheStatus
// ---------------------------------------------------------------------------

/// A source text paired with its Braille rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransliterationResult {
    pub source: String,
    pub braille: String,
}

/// Whether a result came from the cache or was computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

// ---------------------------------------------------------------------------
// Transliterator
// ---------------------------------------------------------------------------

/// Text → Braille engine with a bounded, thread-safe result cache.
///
/// The table is shared read-only and the cache synchronises itself, so one
/// engine can serve concurrent requests.
///
/// ```rust
/// use braille_reader::braille::Transliterator;
///
/// let engine = Transliterator::standard(16);
/// assert_eq!(engine.transliterate("Hi"), "⠓⠊");
/// assert_eq!(engine.transliterate("hi"), engine.transliterate("HI"));
/// ```
pub struct Transliterator {
    table: Arc<SymbolTable>,
    cache: ResultCache,
}

impl Transliterator {
    pub fn new(table: Arc<SymbolTable>, cache_capacity: usize) -> Self {
        Self {
            table,
            cache: ResultCache::new(cache_capacity),
        }
    }

    /// Engine over [`SymbolTable::standard`].
    pub fn standard(cache_capacity: usize) -> Self {
        Self::new(SymbolTable::standard(), cache_capacity)
    }

    /// Transliterate `text`, serving repeated inputs from the cache.
    pub fn transliterate(&self, text: &str) -> String {
        self.transliterate_traced(text).0.braille.clone()
    }

    /// Like [`transliterate`](Self::transliterate) but also reports whether the
    /// cache was hit.
    pub fn transliterate_traced(&self, text: &str) -> (Arc<TransliterationResult>, CacheStatus) {
        if let Some(hit) = self.cache.get(text) {
            return (hit, CacheStatus::Hit);
        }

        let result = Arc::new(TransliterationResult {
            source: text.to_owned(),
            braille: self.transliterate_uncached(text),
        });

        self.cache.insert(text.to_owned(), Arc::clone(&result));

        (result, CacheStatus::Miss)
    }

    /// Run the longest-match scan without consulting or filling the cache.
    pub fn transliterate_uncached(&self, text: &str) -> String {
        // Byte offset of every char boundary, including the end of the string.
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = bounds.len() - 1;
        let max_key = self.table.max_key_chars();

        let mut out = String::with_capacity(text.len());
        let mut pos = 0;

        while pos < char_count {
            let longest = max_key.min(char_count - pos);
            let hit = (1..=longest).rev().find_map(|k| {
                self.table
                    .lookup(&text[bounds[pos]..bounds[pos + k]])
                    .map(|braille| (k, braille))
            });

            match hit {
                Some((k, braille)) => {
                    out.push_str(braille);
                    pos += k;
                }
                None => {
                    log::trace!(
                        "braille: unmapped U+{:04X} at char {pos}",
                        text[bounds[pos]..].chars().next().map_or(0, u32::from)
                    );
                    out.push_str(FALLBACK);
                    pos += 1;
                }
            }
        }

        out
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

impl Default for Transliterator {
    fn default() -> Self {
        Self::standard(DEFAULT_CACHE_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
