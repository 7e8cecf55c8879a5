//! 3x3 box blur.
//!
//! Each interior channel becomes the floored mean of its 3x3 neighborhood.
//! Border pixels are copied unchanged.

use ndarray::{Array3, ArrayView3};

use super::core::interior;

/// Blur an image with a 3x3 box filter.
///
/// # Arguments
/// * `input` - Image of shape (height, width, 3) or (height, width, 4)
///
/// # Returns
/// Blurred image with same dimensions, alpha preserved
pub fn blur(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let mut output = input.to_owned();

    let color_channels = channels.min(3);

    for y in interior(height) {
        for x in interior(width) {
            for c in 0..color_channels {
                let mut sum = 0u32;
                for ny in y - 1..=y + 1 {
                    for nx in x - 1..=x + 1 {
                        sum += input[[ny, nx, c]] as u32;
                    }
                }
                output[[y, x, c]] = (sum / 9) as u8;
            }
        }
    }

    output
}
