//! OCR collaborator.
//!
//! # Overview
//!
//! [`OcrEngine`] is what the pipeline calls.  It is object-safe and
//! `Send + Sync` so it can be held behind an `Arc<dyn OcrEngine>` and run on
//! the blocking thread pool.
//!
//! [`TesseractEngine`] is the production implementation.  [`LanguageSet`]
//! carries the packs to recognise with, built once at startup from
//! [`resolve_secondary`].
//!
//! `MockOcrEngine` (test builds only) returns a canned response.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use braille_reader::config::AppConfig;
//! use braille_reader::ocr::{resolve_secondary, LanguageSet, OcrEngine, TesseractEngine};
//! use braille_reader::preprocess::Normalizer;
//!
//! let config = AppConfig::default();
//! let languages = LanguageSet::from_config(&config.ocr, resolve_secondary(&config.ocr));
//! let engine = TesseractEngine::from_config(&config.ocr);
//!
//! let normalizer = Normalizer::new(config.image.clone(), config.mode);
//! let page = normalizer.normalize(&std::fs::read("page.png").unwrap()).unwrap();
//! println!("{}", engine.recognize(&page, &languages).unwrap());
//! ```

pub mod languages;
pub mod tesseract;

use thiserror::Error;

use crate::preprocess::NormalizedImage;

pub use languages::{
    pack_installed, resolve_secondary, tessdata_dir, LanguageSet, DEFAULT_TESSDATA_DIR,
};
pub use tesseract::TesseractEngine;

// ---------------------------------------------------------------------------
// OcrError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Error)]
pub enum OcrError {
    /// The OCR executable could not be found.
    #[error("OCR engine not installed: {0}")]
    NotInstalled(String),

    /// The engine ran but reported failure.
    #[error("OCR failed (exit {status:?}): {stderr}")]
    Failed { status: Option<i32>, stderr: String },

    /// The image could not be prepared for the engine.
    #[error("OCR input error: {0}")]
    Input(String),

    #[error("OCR I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for OcrError {
    fn from(e: std::io::Error) -> Self {
        OcrError::Io(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// OcrEngine trait
// ---------------------------------------------------------------------------

/// Thread-safe text recognition over a normalized image.
///
/// Empty text is a valid result, not an error.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image: &NormalizedImage, languages: &LanguageSet) -> Result<String, OcrError>;

    fn name(&self) -> &str;
}

const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn OcrEngine>) {}
};

// ---------------------------------------------------------------------------
// MockOcrEngine
// ---------------------------------------------------------------------------

/// Returns a fixed response and records the selector it was called with.
#[cfg(test)]
pub struct MockOcrEngine {
    response: Result<String, OcrError>,
    last_selector: std::sync::Mutex<Option<String>>,
}

#[cfg(test)]
impl MockOcrEngine {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
            last_selector: std::sync::Mutex::new(None),
        }
    }

    pub fn err(error: OcrError) -> Self {
        Self {
            response: Err(error),
            last_selector: std::sync::Mutex::new(None),
        }
    }

    pub fn last_selector(&self) -> Option<String> {
        self.last_selector.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl OcrEngine for MockOcrEngine {
    fn recognize(&self, _image: &NormalizedImage, languages: &LanguageSet) -> Result<String, OcrError> {
        *self.last_selector.lock().unwrap() = Some(languages.selector());
        self.response.clone()
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn page() -> NormalizedImage {
        NormalizedImage {
            color: RgbImage::from_pixel(4, 4, Rgb([0, 0, 0])),
            binary: None,
        }
    }

    #[test]
    fn mock_returns_text_and_records_selector() {
        let engine = MockOcrEngine::ok("hello");
        let langs = LanguageSet::new("eng").with("hin");
        assert_eq!(engine.recognize(&page(), &langs).unwrap(), "hello");
        assert_eq!(engine.last_selector().as_deref(), Some("eng+hin"));
    }

    #[test]
    fn mock_err_is_returned() {
        let engine = MockOcrEngine::err(OcrError::NotInstalled("tesseract".into()));
        let err = engine.recognize(&page(), &LanguageSet::new("eng")).unwrap_err();
        assert!(err.to_string().contains("tesseract"));
    }

    #[test]
    fn box_dyn_ocr_engine() {
        let engine: Box<dyn OcrEngine> = Box::new(MockOcrEngine::ok(""));
        assert_eq!(engine.recognize(&page(), &LanguageSet::new("eng")).unwrap(), "");
        assert_eq!(engine.name(), "mock");
    }
}
