//! WebAssembly exports for the photo filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. They take the
//! flat RGBA buffer of a canvas `ImageData` (length = width * height * 4)
//! and return a new buffer of the same length.

use ndarray::{Array3, ArrayView3};
use wasm_bindgen::prelude::*;

use crate::filters::{self, EdgeDetector};

fn run_rgba(
    data: &[u8],
    width: usize,
    height: usize,
    filter: impl FnOnce(ArrayView3<u8>) -> Array3<u8>,
) -> Result<Vec<u8>, JsError> {
    let input = ArrayView3::from_shape((height, width, 4), data)
        .map_err(|e| JsError::new(&format!("invalid dimensions: {e}")))?;
    Ok(filter(input).into_raw_vec_and_offset().0)
}

#[wasm_bindgen]
pub fn grayscale_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    run_rgba(data, width, height, filters::grayscale)
}

#[wasm_bindgen]
pub fn weighted_grayscale_wasm(
    data: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, JsError> {
    run_rgba(data, width, height, filters::weighted_grayscale)
}

#[wasm_bindgen]
pub fn extreme_contrast_wasm(
    data: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, JsError> {
    run_rgba(data, width, height, filters::extreme_contrast)
}

#[wasm_bindgen]
pub fn posterize_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    run_rgba(data, width, height, filters::posterize)
}

#[wasm_bindgen]
pub fn sepia_tint_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    run_rgba(data, width, height, filters::sepia_tint)
}

#[wasm_bindgen]
pub fn blur_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    run_rgba(data, width, height, filters::blur)
}

/// Edge detection; `detector` is "classic", "better", "classic-legacy" or
/// "better-legacy".
#[wasm_bindgen]
pub fn detect_edges_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    threshold: f32,
    detector: &str,
) -> Result<Vec<u8>, JsError> {
    let detector: EdgeDetector = detector.parse()?;
    run_rgba(data, width, height, |view| detector.apply(view, threshold))
}

/// Scatter with a caller-supplied seed (JS has no access to the Rust RNG state).
#[wasm_bindgen]
pub fn scatter_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    seed: u64,
) -> Result<Vec<u8>, JsError> {
    run_rgba(data, width, height, |view| filters::scatter_seeded(view, seed))
}
