//! Bounded, aspect-preserving downscale.

use image::imageops::{self, FilterType};
use image::RgbImage;

/// Filter used for every downscale.  Lanczos keeps glyph edges crisp enough
/// for OCR without the ringing of a plain sinc.
pub const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

/// Compute the output size for a `width × height` image so that neither side
/// exceeds `max_width` / `max_height`.
///
/// Images already inside the bounds keep their size; nothing is ever scaled
/// up.  Each output side is at least one pixel.
///
/// ```rust
/// use braille_reader::preprocess::fit_within;
///
/// assert_eq!(fit_within(2048, 1024, 1024, 1024), (1024, 512));
/// assert_eq!(fit_within(640, 480, 1024, 1024), (640, 480));
/// ```
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let scale = (max_width as f64 / width as f64)
        .min(max_height as f64 / height as f64)
        .min(1.0);

    let scaled = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, side);
    (
        scaled(width).min(max_width.max(1)),
        scaled(height).min(max_height.max(1)),
    )
}

/// Downscale `image` to fit the bounds, or return a copy unchanged when it
/// already fits.
pub fn bounded_resize(image: &RgbImage, max_width: u32, max_height: u32) -> RgbImage {
    let (w, h) = image.dimensions();
    let (tw, th) = fit_within(w, h, max_width, max_height);

    if (tw, th) == (w, h) {
        return image.clone();
    }

    log::debug!("preprocess: resize {w}x{h} → {tw}x{th}");
    imageops::resize(image, tw, th, RESIZE_FILTER)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
