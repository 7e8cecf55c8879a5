//! Extreme contrast.
//!
//! Each channel is thresholded on its own, so a pixel can land on any of the
//! eight corners of the RGB cube.

use ndarray::{Array3, ArrayView3};

use super::core::map_pixels;

/// Channel values at or below this become 0, above it 255.
pub const CONTRAST_THRESHOLD: u8 = 127;

#[inline]
fn maximize(v: u8) -> u8 {
    if v <= CONTRAST_THRESHOLD {
        0
    } else {
        255
    }
}

/// Push every channel to 0 or 255.
///
/// # Arguments
/// * `input` - Image of shape (height, width, 3) or (height, width, 4)
///
/// # Returns
/// New image whose RGB channels are all 0 or 255, alpha preserved
pub fn extreme_contrast(input: ArrayView3<u8>) -> Array3<u8> {
    map_pixels(input, |c| c.map(maximize))
}
