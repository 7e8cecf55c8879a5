//! Core utilities shared by the filters.
//!
//! This module provides the pixel access used by every filter:
//! - Reading and writing a pixel as a [`Color`]
//! - Unweighted brightness of a pixel
//! - The interior range of a neighborhood filter
//! - A per-pixel map that preserves alpha

use std::ops::Range;

use ndarray::{Array3, ArrayView3};

use crate::color::Color;

/// Read the RGB part of pixel (x, y).
///
/// Out-of-bounds coordinates are a programming error and panic.
#[inline]
pub fn rgb_at(input: &ArrayView3<u8>, x: usize, y: usize) -> Color {
    Color::new(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]])
}

/// Write the RGB part of pixel (x, y), leaving any alpha untouched.
#[inline]
pub fn put_rgb(output: &mut Array3<u8>, x: usize, y: usize, color: Color) {
    output[[y, x, 0]] = color.r;
    output[[y, x, 1]] = color.g;
    output[[y, x, 2]] = color.b;
}

/// `floor((r + g + b) / 3)` of pixel (x, y).
#[inline]
pub fn brightness_at(input: &ArrayView3<u8>, x: usize, y: usize) -> i32 {
    rgb_at(input, x, y).brightness()
}

/// Range of interior coordinates along an axis of length `len`.
///
/// Empty for `len < 3`, so neighborhood filters degrade to a plain copy.
#[inline]
pub fn interior(len: usize) -> Range<usize> {
    1..len.saturating_sub(1)
}

/// Apply `f` to every pixel, producing a new image.
///
/// Channels beyond RGB (alpha) are copied from the input.
pub fn map_pixels(input: ArrayView3<u8>, f: impl Fn(Color) -> Color) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = input.to_owned();

    for y in 0..height {
        for x in 0..width {
            let mapped = f(rgb_at(&input, x, y));
            put_rgb(&mut output, x, y, mapped);
        }
    }

    output
}

#[cfg(test)]
pub(crate) mod test_util {
    use ndarray::Array3;

    use crate::color::Color;

    /// RGB image of the given size filled with `color`.
    pub fn uniform(width: usize, height: usize, color: Color) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((height, width, 3));
        for y in 0..height {
            for x in 0..width {
                img[[y, x, 0]] = color.r;
                img[[y, x, 1]] = color.g;
                img[[y, x, 2]] = color.b;
            }
        }
        img
    }

    /// RGB image whose channels vary with position, so no two neighbors match.
    pub fn gradient(width: usize, height: usize) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((height, width, 3));
        for y in 0..height {
            for x in 0..width {
                img[[y, x, 0]] = ((x * 37 + y * 11) % 256) as u8;
                img[[y, x, 1]] = ((x * 5 + y * 53) % 256) as u8;
                img[[y, x, 2]] = ((x * y * 7 + 13) % 256) as u8;
            }
        }
        img
    }

    /// Assert the outer ring of pixels is identical in both images.
    pub fn assert_border_equal(a: &Array3<u8>, b: &Array3<u8>) {
        let (height, width, channels) = a.dim();
        assert_eq!(a.dim(), b.dim());
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    for c in 0..channels {
                        assert_eq!(a[[y, x, c]], b[[y, x, c]], "border pixel ({x}, {y}) channel {c}");
                    }
                }
            }
        }
    }
}
