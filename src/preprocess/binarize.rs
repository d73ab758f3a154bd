//! Global Otsu binarization.

use image::{GrayImage, RgbImage};
use imageproc::contrast::{otsu_level, threshold, ThresholdType};

/// Reduce `image` to a two-level luminance image.
///
/// The threshold is chosen by Otsu's method over the whole image; pixels
/// brighter than it become white, everything else black.  Returns the binary
/// image together with the chosen level.
pub fn binarize(image: &RgbImage) -> (GrayImage, u8) {
    let gray = image::imageops::grayscale(image);
    let level = otsu_level(&gray);
    log::debug!("preprocess: otsu level {level}");

    (threshold(&gray, level, ThresholdType::Binary), level)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
