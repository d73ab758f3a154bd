//! Grapheme → Braille symbol table.
//!
//! [`SymbolTable`] maps source graphemes (one or more Unicode scalar values)
//! to Braille cells in the U+2800 block.  The standard table covers Latin
//! letters in both cases, Devanagari vowels, consonants, vowel signs, marks,
//! digits and a handful of conjuncts, plus the punctuation both scripts share.
//!
//! The table never resolves overlapping keys itself: `क` and `क्ष` are both
//! present, and it is the engine's longest-match scan that makes the
//! three-codepoint conjunct win.
//!
//! The standard table is built once and shared read-only:
//!
//! ```rust
//! use braille_reader::braille::SymbolTable;
//!
//! let table = SymbolTable::standard();
//! assert_eq!(table.lookup("a"), Some("⠁"));
//! assert_eq!(table.lookup("क्ष"), Some("⠟"));
//! assert_eq!(table.max_key_chars(), 3);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

// ---------------------------------------------------------------------------
// Static entries
// ---------------------------------------------------------------------------

/// Latin letters; upper case is added from these at construction time.
#[rustfmt::skip]
static LATIN: &[(&str, &str)] = &[
    ("a", "⠁"), ("b", "⠃"), ("c", "⠉"), ("d", "⠙"), ("e", "⠑"),
    ("f", "⠋"), ("g", "⠛"), ("h", "⠓"), ("i", "⠊"), ("j", "⠚"),
    ("k", "⠅"), ("l", "⠇"), ("m", "⠍"), ("n", "⠝"), ("o", "⠕"),
    ("p", "⠏"), ("q", "⠟"), ("r", "⠗"), ("s", "⠎"), ("t", "⠞"),
    ("u", "⠥"), ("v", "⠧"), ("w", "⠺"), ("x", "⠭"), ("y", "⠽"),
    ("z", "⠵"),
];

#[rustfmt::skip]
static DEVANAGARI: &[(&str, &str)] = &[
    // Independent vowels
    ("अ", "⠁"), ("आ", "⠡"), ("इ", "⠊"), ("ई", "⠒"), ("उ", "⠥"),
    ("ऊ", "⠳"), ("ए", "⠑"), ("ऐ", "⠣"), ("ओ", "⠕"), ("औ", "⠷"),
    ("ऋ", "⠗"),
    // Consonants
    ("क", "⠅"), ("ख", "⠩"), ("ग", "⠛"), ("घ", "⠣"), ("ङ", "⠻"),
    ("च", "⠉"), ("छ", "⠡"), ("ज", "⠚"), ("झ", "⠒"), ("ञ", "⠱"),
    ("ट", "⠞"), ("ठ", "⠾"), ("ड", "⠙"), ("ढ", "⠹"), ("ण", "⠻"),
    ("त", "⠞"), ("थ", "⠮"), ("द", "⠙"), ("ध", "⠹"), ("न", "⠝"),
    ("प", "⠏"), ("फ", "⠟"), ("ब", "⠃"), ("भ", "⠫"), ("म", "⠍"),
    ("य", "⠽"), ("र", "⠗"), ("ल", "⠇"), ("व", "⠧"), ("श", "⠱"),
    ("ष", "⠳"), ("स", "⠎"), ("ह", "⠓"),
    // Conjuncts (consonant + virama + consonant)
    ("\u{0915}\u{094D}\u{0937}", "⠟"),   // क्ष
    ("\u{091C}\u{094D}\u{091E}", "⠻"),   // ज्ञ
    ("\u{0917}\u{094D}\u{092F}", "⠛⠽"),  // ग्य
    ("\u{0924}\u{094D}\u{0930}", "⠞⠗"),  // त्र
    ("\u{0936}\u{094D}\u{0930}", "⠱⠗"),  // श्र
    // Nukta consonants, decomposed
    ("\u{0921}\u{093C}", "⠚"), // ड़
    ("\u{0922}\u{093C}", "⠚"), // ढ़
    ("\u{092B}\u{093C}", "⠋"), // फ़
    ("\u{091C}\u{093C}", "⠵"), // ज़
    // ... and precomposed, as some OCR output normalizes to these
    ("\u{095C}", "⠚"),
    ("\u{095D}", "⠚"),
    ("\u{095E}", "⠋"),
    ("\u{095B}", "⠵"),
    // Dependent vowel signs
    ("ा", "⠡"), ("ि", "⠊"), ("ी", "⠒"), ("ु", "⠥"), ("ू", "⠳"),
    ("े", "⠑"), ("ै", "⠣"), ("ो", "⠕"), ("ौ", "⠷"), ("ृ", "⠗"),
    // Virama, anusvara, visarga, chandrabindu
    ("\u{094D}", "⠄"), ("\u{0902}", "⠈"), ("\u{0903}", "⠘"), ("\u{0901}", "⠨"),
    // Digits
    ("०", "⠚"), ("१", "⠁"), ("२", "⠃"), ("३", "⠉"), ("४", "⠙"),
    ("५", "⠑"), ("६", "⠋"), ("७", "⠛"), ("८", "⠓"), ("९", "⠊"),
    // Danda
    ("।", "⠲"),
];

#[rustfmt::skip]
static SHARED: &[(&str, &str)] = &[
    (" ", " "), ("\n", "\n"),
    (",", "⠂"), (".", "⠲"), ("?", "⠦"), ("!", "⠖"), ("\"", "⠶"),
    ("'", "⠄"), (";", "⠆"), (":", "⠒"), ("-", "⠤"),
    ("(", "⠶"), (")", "⠶"), ("/", "⠌"),
];

static STANDARD: Lazy<Arc<SymbolTable>> = Lazy::new(|| {
    let latin_upper: Vec<(String, String)> = LATIN
        .iter()
        .map(|(k, v)| (k.to_uppercase(), v.to_string()))
        .collect();

    let entries = LATIN
        .iter()
        .chain(DEVANAGARI)
        .chain(SHARED)
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .chain(latin_upper);

    Arc::new(SymbolTable::from_entries(entries))
});

// ---------------------------------------------------------------------------
// SymbolTable
// ---------------------------------------------------------------------------

/// Immutable grapheme → Braille mapping.
///
/// Cloning the `Arc` returned by [`SymbolTable::standard`] is the intended
/// way to share it; there is no mutation API after construction.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    entries: HashMap<String, String>,
    /// Length in chars of the longest key; bounds the engine's scan window.
    max_key_chars: usize,
}

impl SymbolTable {
    /// Build a table from `(grapheme, braille)` pairs.
    ///
    /// Empty keys are ignored.  When a key repeats, the last value wins.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = HashMap::new();
        let mut max_key_chars = 0;

        for (k, v) in entries {
            let k = k.into();
            if k.is_empty() {
                continue;
            }
            max_key_chars = max_key_chars.max(k.chars().count());
            map.insert(k, v.into());
        }

        Self {
            entries: map,
            max_key_chars,
        }
    }

    /// The process-wide standard Latin + Devanagari table.
    pub fn standard() -> Arc<SymbolTable> {
        Arc::clone(&STANDARD)
    }

    /// Return the Braille output for `grapheme`, or `None` when unmapped.
    pub fn lookup(&self, grapheme: &str) -> Option<&str> {
        self.entries.get(grapheme).map(String::as_str)
    }

    /// Number of chars in the longest key (0 for an empty table).
    pub fn max_key_chars(&self) -> usize {
        self.max_key_chars
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
