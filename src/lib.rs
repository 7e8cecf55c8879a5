//! Photo Filters
//!
//! Classic pixel filters (grayscale, extreme contrast, posterize, sepia,
//! edge detection, blur, scatter) with an interactive terminal editor,
//! Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! Images are `ndarray` arrays of shape (height, width, channels):
//! - **RGB**: (height, width, 3)
//! - **RGBA**: (height, width, 4) - alpha is carried through unchanged
//!
//! Channels are `u8` (0-255). Every filter takes a read-only view and returns
//! a new array of the same shape.
//!
//! ## Layout
//! - [`filters`]: the filter library
//! - [`color`]: RGB triple and float-to-channel rounding
//! - [`io`]: decode/encode through the `image` crate
//! - [`session`]: the single-letter command loop
//! - [`config`]: session settings

pub mod color;
pub mod config;
pub mod error;
pub mod filters;
pub mod io;
pub mod session;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use crate::color::Color;
pub use crate::config::SessionConfig;
pub use crate::error::{EditorError, Result};
pub use crate::session::{Command, Session};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::filters::{self, EdgeDetector};

    fn check_channels(image: &PyReadonlyArray3<'_, u8>) -> PyResult<()> {
        let (_, _, channels) = image.as_array().dim();
        if channels == 3 || channels == 4 {
            Ok(())
        } else {
            Err(PyValueError::new_err(format!(
                "expected 3 (RGB) or 4 (RGBA) channels, got {channels}"
            )))
        }
    }

    // ========================================================================
    // Grayscale Filters
    // ========================================================================

    /// Average the RGB channels: floor((r + g + b) / 3).
    #[pyfunction]
    pub fn grayscale<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        check_channels(&image)?;
        Ok(filters::grayscale(image.as_array()).into_pyarray(py))
    }

    /// BT.601 luma grayscale: round(0.299r + 0.587g + 0.114b).
    #[pyfunction]
    pub fn weighted_grayscale<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        check_channels(&image)?;
        Ok(filters::weighted_grayscale(image.as_array()).into_pyarray(py))
    }

    // ========================================================================
    // Contrast & Stylize
    // ========================================================================

    #[pyfunction]
    pub fn extreme_contrast<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        check_channels(&image)?;
        Ok(filters::extreme_contrast(image.as_array()).into_pyarray(py))
    }

    #[pyfunction]
    pub fn posterize<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        check_channels(&image)?;
        Ok(filters::posterize(image.as_array()).into_pyarray(py))
    }

    #[pyfunction]
    pub fn sepia_tint<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        check_channels(&image)?;
        Ok(filters::sepia_tint(image.as_array()).into_pyarray(py))
    }

    // ========================================================================
    // Edge Detection
    // ========================================================================

    /// Edge map from brightness differences.
    ///
    /// # Arguments
    /// * `image` - RGB or RGBA image
    /// * `threshold` - Contrast above this marks an edge
    /// * `detector` - "classic", "better", "classic-legacy" or "better-legacy"
    #[pyfunction]
    #[pyo3(signature = (image, threshold, detector="better"))]
    pub fn detect_edges<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        threshold: f32,
        detector: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        check_channels(&image)?;
        let detector: EdgeDetector = detector
            .parse()
            .map_err(|e: crate::EditorError| PyValueError::new_err(e.to_string()))?;
        Ok(detector.apply(image.as_array(), threshold).into_pyarray(py))
    }

    // ========================================================================
    // Blur & Noise
    // ========================================================================

    #[pyfunction]
    pub fn blur<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        check_channels(&image)?;
        Ok(filters::blur(image.as_array()).into_pyarray(py))
    }

    /// Randomly displace pixels by up to 10 in each direction.
    ///
    /// Pass `seed` for reproducible output.
    #[pyfunction]
    #[pyo3(signature = (image, seed=None))]
    pub fn scatter<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        seed: Option<u64>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        check_channels(&image)?;
        let input = image.as_array();
        let result = match seed {
            Some(seed) => filters::scatter_seeded(input, seed),
            None => filters::scatter(input),
        };
        Ok(result.into_pyarray(py))
    }

    /// Photo filters extension module
    #[pymodule]
    pub fn photo_filters(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Grayscale
        m.add_function(wrap_pyfunction!(grayscale, m)?)?;
        m.add_function(wrap_pyfunction!(weighted_grayscale, m)?)?;

        // Contrast & stylize
        m.add_function(wrap_pyfunction!(extreme_contrast, m)?)?;
        m.add_function(wrap_pyfunction!(posterize, m)?)?;
        m.add_function(wrap_pyfunction!(sepia_tint, m)?)?;

        // Edge detection
        m.add_function(wrap_pyfunction!(detect_edges, m)?)?;

        // Blur & noise
        m.add_function(wrap_pyfunction!(blur, m)?)?;
        m.add_function(wrap_pyfunction!(scatter, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::photo_filters;
