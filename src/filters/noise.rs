//! Scatter: a noise filter that jitters pixel positions.
//!
//! Every output pixel takes the color of a random input pixel at most
//! [`SCATTER_RADIUS`] away along each axis. Offsets that land outside the
//! image are redrawn, so edge and corner pixels redraw more often.

use ndarray::{Array3, ArrayView3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Maximum per-axis offset of a scattered pixel.
pub const SCATTER_RADIUS: i64 = 10;

/// Scatter pixels using the thread-local RNG.
///
/// # Arguments
/// * `input` - Image of shape (height, width, channels)
///
/// # Returns
/// New image of the same shape
pub fn scatter(input: ArrayView3<u8>) -> Array3<u8> {
    scatter_with_rng(input, &mut rand::rng())
}

/// Scatter pixels with a fixed seed, for reproducible output.
pub fn scatter_seeded(input: ArrayView3<u8>, seed: u64) -> Array3<u8> {
    scatter_with_rng(input, &mut StdRng::seed_from_u64(seed))
}

/// Scatter pixels drawing offsets from `rng`.
///
/// All channels, including alpha, move together.
pub fn scatter_with_rng<R: Rng>(input: ArrayView3<u8>, rng: &mut R) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, channels));

    let (w, h) = (width as i64, height as i64);

    for y in 0..height {
        for x in 0..width {
            let (sx, sy) = loop {
                let dx = rng.random_range(-SCATTER_RADIUS..=SCATTER_RADIUS);
                let dy = rng.random_range(-SCATTER_RADIUS..=SCATTER_RADIUS);
                let sx = x as i64 - dx;
                let sy = y as i64 - dy;
                if (0..w).contains(&sx) && (0..h).contains(&sy) {
                    break (sx as usize, sy as usize);
                }
            };

            for c in 0..channels {
                output[[y, x, c]] = input[[sy, sx, c]];
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::core::test_util::uniform;
    use crate::color::Color;

    /// Image where every pixel encodes its own coordinates.
    fn coordinate_image(width: usize, height: usize) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((height, width, 3));
        for y in 0..height {
            for x in 0..width {
                img[[y, x, 0]] = x as u8;
                img[[y, x, 1]] = y as u8;
                img[[y, x, 2]] = 7;
            }
        }
        img
    }

    #[test]
    fn test_scatter_stays_within_radius() {
        let img = coordinate_image(40, 30);
        let mut rng = StdRng::seed_from_u64(1234);

        for _ in 0..3 {
            let result = scatter_with_rng(img.view(), &mut rng);
            assert_eq!(result.dim(), img.dim());
            for y in 0..30 {
                for x in 0..40 {
                    let sx = result[[y, x, 0]] as i64;
                    let sy = result[[y, x, 1]] as i64;
                    assert!((x as i64 - sx).abs() <= SCATTER_RADIUS);
                    assert!((y as i64 - sy).abs() <= SCATTER_RADIUS);
                    assert!(sx < 40 && sy < 30);
                    assert_eq!(result[[y, x, 2]], 7);
                }
            }
        }
    }

    #[test]
    fn test_scatter_single_pixel() {
        let img = uniform(1, 1, Color::new(9, 8, 7));
        assert_eq!(scatter(img.view()), img);
    }

    #[test]
    fn test_scatter_empty_image() {
        let img = Array3::<u8>::zeros((0, 0, 3));
        assert_eq!(scatter(img.view()).dim(), (0, 0, 3));
    }

    #[test]
    fn test_scatter_seeded_is_reproducible() {
        let img = coordinate_image(16, 16);
        assert_eq!(scatter_seeded(img.view(), 99), scatter_seeded(img.view(), 99));
    }

    #[test]
    fn test_scatter_moves_alpha_with_color() {
        let mut img = Array3::<u8>::zeros((12, 12, 4));
        for y in 0..12 {
            for x in 0..12 {
                let v = (y * 12 + x) as u8;
                img[[y, x, 0]] = v;
                img[[y, x, 3]] = v;
            }
        }
        let result = scatter_seeded(img.view(), 5);
        for y in 0..12 {
            for x in 0..12 {
                assert_eq!(result[[y, x, 0]], result[[y, x, 3]]);
            }
        }
    }
}
