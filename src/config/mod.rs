//! Configuration module for the Braille reader.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for each pipeline
//! stage, `AppPaths` for cross-platform directories, and TOML persistence via
//! `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    AppConfig, BrailleConfig, ImageConfig, LanguageConfig, NormalizeMode, OcrConfig,
    SecondaryPack, SpeechConfig,
};
