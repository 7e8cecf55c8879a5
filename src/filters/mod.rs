//! Filter modules for image processing effects.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | RGB8 | (H, W, 3) | u8 | Red, green, blue, 0-255 |
//! | RGBA8 | (H, W, 4) | u8 | RGB + alpha, 0-255 |
//!
//! ## Architecture
//!
//! All filters follow these principles:
//! - **Pure** - Input is a read-only view, output is a freshly allocated array
//! - **Same shape** - Output dimensions always equal input dimensions
//! - **Alpha preservation** - Alpha channel (if present) is copied through
//! - **Total** - No filter fails; tiny images just come back unchanged
//!
//! ## Filter Categories
//!
//! - **Grayscale**: grayscale, weighted_grayscale
//! - **Contrast**: extreme_contrast
//! - **Stylize**: posterize, sepia_tint
//! - **Edge detection**: detect_edges, detect_edges_better (+ legacy variants)
//! - **Blur**: blur
//! - **Noise**: scatter

pub mod core;
pub mod grayscale;
pub mod contrast;
pub mod stylize;
pub mod edge;
pub mod blur;
pub mod noise;

pub use self::blur::blur;
pub use self::contrast::extreme_contrast;
pub use self::edge::{
    detect_edges, detect_edges_better, detect_edges_better_legacy, detect_edges_legacy,
    EdgeDetector,
};
pub use self::grayscale::{grayscale, weighted_grayscale};
pub use self::noise::{scatter, scatter_seeded, scatter_with_rng};
pub use self::stylize::{posterize, sepia_tint};
