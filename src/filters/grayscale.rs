//! Grayscale conversion filters.
//!
//! Two flavors:
//! - **Average**: `floor((r + g + b) / 3)`
//! - **Weighted**: ITU-R BT.601 luma, `0.299r + 0.587g + 0.114b`, rounded
//!
//! Output has R=G=B=brightness, alpha (if any) preserved.

use ndarray::{Array3, ArrayView3};

use super::core::map_pixels;
use crate::color::Color;

/// ITU-R BT.601 luma coefficients, in thousandths
pub const LUMA_R: u32 = 299;
pub const LUMA_G: u32 = 587;
pub const LUMA_B: u32 = 114;

/// Rounded BT.601 luma of a color.
///
/// Integer arithmetic keeps exact .5 ties rounding up; the weights sum to
/// 1000, so the result never exceeds 255.
#[inline]
pub fn weighted_brightness(color: Color) -> u8 {
    let sum = LUMA_R * color.r as u32 + LUMA_G * color.g as u32 + LUMA_B * color.b as u32;
    ((sum + 500) / 1000) as u8
}

/// Convert an image to grayscale by averaging the three channels.
///
/// # Arguments
/// * `input` - Image of shape (height, width, 3) or (height, width, 4)
///
/// # Returns
/// New image with every pixel set to `floor((r + g + b) / 3)` in all channels
pub fn grayscale(input: ArrayView3<u8>) -> Array3<u8> {
    map_pixels(input, |c| Color::gray(c.brightness() as u8))
}

/// Convert an image to grayscale using luma weights.
///
/// # Arguments
/// * `input` - Image of shape (height, width, 3) or (height, width, 4)
///
/// # Returns
/// New image with every pixel set to `round(0.299r + 0.587g + 0.114b)`
pub fn weighted_grayscale(input: ArrayView3<u8>) -> Array3<u8> {
    map_pixels(input, |c| Color::gray(weighted_brightness(c)))
}
