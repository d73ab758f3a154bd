//! Page reader for visually-impaired users: a photographed page becomes
//! recognised text, a Braille transliteration and synthesized speech.
//!
//! | Module         | Role                                                   |
//! |----------------|--------------------------------------------------------|
//! | [`preprocess`] | Bounded resize and Otsu binarization ahead of OCR      |
//! | [`ocr`]        | OCR collaborator (`tesseract` CLI)                     |
//! | [`language`]   | Language detection and primary/secondary routing       |
//! | [`braille`]    | Longest-match Latin + Devanagari → Braille with LRU    |
//! | [`speech`]     | Speech collaborator (Google Translate TTS, MP3)        |
//! | [`pipeline`]   | Orchestrator and shared state                          |
//! | [`config`]     | `settings.toml` and platform paths                     |

pub mod braille;
pub mod config;
pub mod language;
pub mod ocr;
pub mod pipeline;
pub mod preprocess;
pub mod speech;
