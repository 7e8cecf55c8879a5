//! Image file I/O.
//!
//! - `load_image`: decode any format the `image` crate reads into an RGB array.
//! - `save_image`: encode an RGB or RGBA array, format chosen by extension.
//! - `to_array` / `to_dynamic`: conversions between the two representations.

use std::fs;
use std::path::Path;

use image::{DynamicImage, RgbImage, RgbaImage};
use ndarray::{Array3, ArrayView3};
use tracing::{debug, info, instrument};

use crate::error::{EditorError, Result};

/// Convert a decoded image to a (height, width, 3) RGB array.
pub fn to_array(image: DynamicImage) -> Result<Array3<u8>> {
    let rgb = image.into_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    Ok(Array3::from_shape_vec((height, width, 3), rgb.into_raw())?)
}

/// Convert an RGB or RGBA array to an `image` crate image.
pub fn to_dynamic(image: ArrayView3<u8>) -> Result<DynamicImage> {
    let (height, width, channels) = image.dim();
    let raw: Vec<u8> = image.iter().copied().collect();
    let (w, h) = (width as u32, height as u32);

    let dynamic = match channels {
        3 => RgbImage::from_raw(w, h, raw).map(DynamicImage::ImageRgb8),
        4 => RgbaImage::from_raw(w, h, raw).map(DynamicImage::ImageRgba8),
        other => return Err(EditorError::UnsupportedChannels(other)),
    };
    dynamic.ok_or(EditorError::UnsupportedChannels(channels))
}

/// Load an image from disk as an RGB array.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_image(path: impl AsRef<Path>) -> Result<Array3<u8>> {
    let decoded = image::open(path.as_ref())?;
    info!(width = decoded.width(), height = decoded.height(), "image loaded");
    to_array(decoded)
}

/// Save an RGB or RGBA array, creating parent directories as needed.
///
/// The file format follows the path's extension. RGBA images saved as JPEG
/// lose their alpha channel.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn save_image(image: ArrayView3<u8>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let mut dynamic = to_dynamic(image)?;
    if is_jpeg(path) && dynamic.color().has_alpha() {
        debug!("dropping alpha for JPEG output");
        dynamic = DynamicImage::ImageRgb8(dynamic.into_rgb8());
    }

    dynamic.save(path)?;
    info!(width = dynamic.width(), height = dynamic.height(), "image saved");
    Ok(())
}

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
