//! Edge detection filters.
//!
//! Brightness here is the unweighted `floor((r + g + b) / 3)`. An interior
//! pixel becomes black when the brightness difference across it exceeds the
//! threshold, white otherwise. Border pixels are copied from the input.
//!
//! The `_legacy` variants reproduce the output of the original photo-editor
//! tool exactly, including its quirks:
//! - [`detect_edges_legacy`] writes each result one row up, at `y - 1`
//! - [`detect_edges_better_legacy`] measures horizontal contrast as left
//!   against *bottom* brightness

use std::fmt;
use std::str::FromStr;

use ndarray::{Array3, ArrayView3};

use super::core::{brightness_at, interior, put_rgb};
use crate::color::Color;
use crate::error::EditorError;

#[inline]
fn edge_color(is_edge: bool) -> Color {
    if is_edge {
        Color::BLACK
    } else {
        Color::WHITE
    }
}

#[inline]
fn exceeds(contrast: i32, threshold: f32) -> bool {
    contrast as f32 > threshold
}

#[inline]
fn vertical_contrast(input: &ArrayView3<u8>, x: usize, y: usize) -> i32 {
    (brightness_at(input, x, y - 1) - brightness_at(input, x, y + 1)).abs()
}

// ============================================================================
// Vertical-only detector
// ============================================================================

/// Detect edges from top/bottom brightness differences.
///
/// # Arguments
/// * `input` - Image of shape (height, width, 3) or (height, width, 4)
/// * `threshold` - Contrast above this marks an edge
///
/// # Returns
/// Black/white edge map with the input's border pixels
pub fn detect_edges(input: ArrayView3<u8>, threshold: f32) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = input.to_owned();

    for y in interior(height) {
        for x in interior(width) {
            let contrast = vertical_contrast(&input, x, y);
            put_rgb(&mut output, x, y, edge_color(exceeds(contrast, threshold)));
        }
    }

    output
}

/// [`detect_edges`] with the original tool's row offset: the result for
/// pixel (x, y) is written to (x, y - 1).
///
/// The top border row is therefore overwritten and row `height - 2` keeps
/// its input colors.
pub fn detect_edges_legacy(input: ArrayView3<u8>, threshold: f32) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = input.to_owned();

    for y in interior(height) {
        for x in interior(width) {
            let contrast = vertical_contrast(&input, x, y);
            put_rgb(&mut output, x, y - 1, edge_color(exceeds(contrast, threshold)));
        }
    }

    output
}

// ============================================================================
// Vertical + horizontal detector
// ============================================================================

/// Detect edges from top/bottom and left/right brightness differences.
///
/// A pixel is an edge if either difference exceeds `threshold`.
pub fn detect_edges_better(input: ArrayView3<u8>, threshold: f32) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = input.to_owned();

    for y in interior(height) {
        for x in interior(width) {
            let vertical = vertical_contrast(&input, x, y);
            let horizontal =
                (brightness_at(&input, x - 1, y) - brightness_at(&input, x + 1, y)).abs();
            let is_edge = exceeds(vertical, threshold) || exceeds(horizontal, threshold);
            put_rgb(&mut output, x, y, edge_color(is_edge));
        }
    }

    output
}

/// [`detect_edges_better`] with the original tool's horizontal measure:
/// `|brightness(x - 1, y) - brightness(x, y + 1)|`.
pub fn detect_edges_better_legacy(input: ArrayView3<u8>, threshold: f32) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = input.to_owned();

    for y in interior(height) {
        for x in interior(width) {
            let vertical = vertical_contrast(&input, x, y);
            let horizontal =
                (brightness_at(&input, x - 1, y) - brightness_at(&input, x, y + 1)).abs();
            let is_edge = exceeds(vertical, threshold) || exceeds(horizontal, threshold);
            put_rgb(&mut output, x, y, edge_color(is_edge));
        }
    }

    output
}

// ============================================================================
// Detector selection
// ============================================================================

/// Which edge detector the `E` command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeDetector {
    Classic,
    #[default]
    Better,
    ClassicLegacy,
    BetterLegacy,
}

impl EdgeDetector {
    pub const ALL: [EdgeDetector; 4] = [
        EdgeDetector::Classic,
        EdgeDetector::Better,
        EdgeDetector::ClassicLegacy,
        EdgeDetector::BetterLegacy,
    ];

    pub fn apply(self, input: ArrayView3<u8>, threshold: f32) -> Array3<u8> {
        match self {
            EdgeDetector::Classic => detect_edges(input, threshold),
            EdgeDetector::Better => detect_edges_better(input, threshold),
            EdgeDetector::ClassicLegacy => detect_edges_legacy(input, threshold),
            EdgeDetector::BetterLegacy => detect_edges_better_legacy(input, threshold),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EdgeDetector::Classic => "classic",
            EdgeDetector::Better => "better",
            EdgeDetector::ClassicLegacy => "classic-legacy",
            EdgeDetector::BetterLegacy => "better-legacy",
        }
    }
}

impl fmt::Display for EdgeDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EdgeDetector {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        EdgeDetector::ALL
            .into_iter()
            .find(|d| d.name() == wanted)
            .ok_or_else(|| EditorError::InvalidEdgeDetector(s.to_string()))
    }
}
