//! Image normalization ahead of OCR.
//!
//! # Pipeline
//!
//! ```text
//! bytes ──▶ probe header ──▶ guard (empty / too large)
//!                                 │
//!                                 ▼
//!                          decode → RGB
//!                                 │
//!                                 ▼
//!                bounded Lanczos resize (never upscales)   ── colour, kept for display
//!                                 │
//!                   Enhanced only ▼
//!                  grayscale → Otsu level → black/white    ── binary, fed to OCR
//! ```
//!
//! Normalization is pure CPU work with no I/O.  Every call produces a fresh
//! [`NormalizedImage`] owned by the caller.

pub mod binarize;
pub mod resize;

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use thiserror::Error;

use crate::config::{ImageConfig, NormalizeMode};

pub use binarize::binarize;
pub use resize::{bounded_resize, fit_within, RESIZE_FILTER};

// ---------------------------------------------------------------------------
// ImageError
// ---------------------------------------------------------------------------

/// Reasons an input image is rejected before any processing happens.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The bytes are not a raster format the decoder understands.
    #[error("could not decode image: {0}")]
    Decode(String),

    /// One of the decoded dimensions is zero.
    #[error("image has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },

    /// The decoded pixel count is over the configured limit.
    #[error("image too large: {width}x{height} exceeds {limit} pixels")]
    TooLarge { width: u32, height: u32, limit: u64 },

    /// Re-encoding the normalized image failed.
    #[error("could not encode image: {0}")]
    Encode(String),
}

impl From<image::ImageError> for ImageError {
    fn from(e: image::ImageError) -> Self {
        ImageError::Decode(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// NormalizedImage
// ---------------------------------------------------------------------------

/// The result of [`Normalizer::normalize`].
///
/// `color` is the resized original and is what a presentation layer shows.
/// `binary` is only present in [`NormalizeMode::Enhanced`]; when present it is
/// what OCR consumes.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub color: RgbImage,
    pub binary: Option<GrayImage>,
}

impl NormalizedImage {
    pub fn dimensions(&self) -> (u32, u32) {
        self.color.dimensions()
    }

    pub fn is_binarized(&self) -> bool {
        self.binary.is_some()
    }

    /// The image OCR should read: the binary one if available, else colour.
    pub fn ocr_input(&self) -> DynamicImage {
        match &self.binary {
            Some(binary) => DynamicImage::ImageLuma8(binary.clone()),
            None => DynamicImage::ImageRgb8(self.color.clone()),
        }
    }

    /// PNG bytes of [`ocr_input`](Self::ocr_input).
    pub fn ocr_png(&self) -> Result<Vec<u8>, ImageError> {
        encode_png(&self.ocr_input())
    }

    /// PNG bytes of the colour image, for display.
    pub fn display_png(&self) -> Result<Vec<u8>, ImageError> {
        encode_png(&DynamicImage::ImageRgb8(self.color.clone()))
    }
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, ImageError> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buf.into_inner())
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// Stateless image normalizer configured by [`ImageConfig`] and a
/// [`NormalizeMode`].
///
/// ```rust,no_run
/// use braille_reader::config::{ImageConfig, NormalizeMode};
/// use braille_reader::preprocess::Normalizer;
///
/// let normalizer = Normalizer::new(ImageConfig::default(), NormalizeMode::Enhanced);
/// let bytes = std::fs::read("page.jpg").unwrap();
/// let page = normalizer.normalize(&bytes).unwrap();
/// assert!(page.is_binarized());
/// ```
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: ImageConfig,
    mode: NormalizeMode,
}

impl Normalizer {
    pub fn new(config: ImageConfig, mode: NormalizeMode) -> Self {
        Self { config, mode }
    }

    pub fn mode(&self) -> NormalizeMode {
        self.mode
    }

    /// Decode `bytes` and normalize the image.
    ///
    /// The header is probed first so an oversized image is refused before
    /// its pixels are allocated.
    ///
    /// # Errors
    ///
    /// - [`ImageError::Decode`]  : unknown or corrupt format.
    /// - [`ImageError::Empty`]   : zero width or height.
    /// - [`ImageError::TooLarge`]: more than `max_input_pixels`.
    pub fn normalize(&self, bytes: &[u8]) -> Result<NormalizedImage, ImageError> {
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| ImageError::Decode(e.to_string()))?;
        let (width, height) = reader.into_dimensions()?;
        self.check_dimensions(width, height)?;

        let decoded = image::load_from_memory(bytes)?;
        self.normalize_image(decoded)
    }

    /// Normalize an already-decoded image.
    pub fn normalize_image(&self, image: DynamicImage) -> Result<NormalizedImage, ImageError> {
        self.check_dimensions(image.width(), image.height())?;

        let color = bounded_resize(
            &image.into_rgb8(),
            self.config.max_width,
            self.config.max_height,
        );

        let binary = match self.mode {
            NormalizeMode::Plain => None,
            NormalizeMode::Enhanced => Some(binarize(&color).0),
        };

        Ok(NormalizedImage { color, binary })
    }

    fn check_dimensions(&self, width: u32, height: u32) -> Result<(), ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::Empty { width, height });
        }
        let pixels = width as u64 * height as u64;
        if pixels > self.config.max_input_pixels {
            return Err(ImageError::TooLarge {
                width,
                height,
                limit: self.config.max_input_pixels,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
