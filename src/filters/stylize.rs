//! Stylize filters: Posterize, Sepia Tint.
//!
//! These are artistic effect filters. Both work on RGB or RGBA images and
//! leave alpha untouched.

use ndarray::{Array3, ArrayView3};

use super::core::map_pixels;
use super::grayscale::weighted_brightness;
use crate::color::Color;

// ============================================================================
// Posterize
// ============================================================================

/// Map a channel value to the midpoint of its quarter of 0-255.
///
/// | input   | output |
/// |---------|--------|
/// | 0-63    | 31     |
/// | 64-127  | 95     |
/// | 128-191 | 159    |
/// | 192-255 | 223    |
#[inline]
pub fn posterize_component(amount: u8) -> u8 {
    match amount {
        0..=63 => 31,
        64..=127 => 95,
        128..=191 => 159,
        _ => 223,
    }
}

/// Reduce every channel to one of four levels.
///
/// # Arguments
/// * `input` - Image of shape (height, width, 3) or (height, width, 4)
///
/// # Returns
/// Posterized image; every RGB channel is one of 31, 95, 159, 223
pub fn posterize(input: ArrayView3<u8>) -> Array3<u8> {
    map_pixels(input, |c| c.map(posterize_component))
}

// ============================================================================
// Sepia Tint
// ============================================================================

/// Red and blue multipliers for a grayscale brightness.
///
/// Returns `(red, blue)`; green is never scaled.
#[inline]
pub fn sepia_multipliers(brightness: i32) -> (f32, f32) {
    if brightness < 63 {
        (1.10, 0.90)
    } else if brightness < 191 {
        (1.15, 0.85)
    } else {
        (1.08, 0.93)
    }
}

fn tint(gray: Color) -> Color {
    let (red, blue) = sepia_multipliers(gray.brightness());
    Color::from_f32(gray.r as f32 * red, gray.g as f32, gray.b as f32 * blue)
}

/// Convert an image to sepia tones.
///
/// The image is converted with weighted grayscale first, then shadows,
/// midtones and highlights each get their own red/blue tint. Results are
/// rounded and clamped to 0-255.
///
/// # Arguments
/// * `input` - Image of shape (height, width, 3) or (height, width, 4)
///
/// # Returns
/// Sepia-toned image with same dimensions
pub fn sepia_tint(input: ArrayView3<u8>) -> Array3<u8> {
    map_pixels(input, |c| tint(Color::gray(weighted_brightness(c))))
}
