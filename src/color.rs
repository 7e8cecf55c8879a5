//! RGB color triple.
//!
//! Filters do their arithmetic in `i32` or `f32` and come back to `u8`
//! through this module, so every float-to-channel conversion rounds and
//! clamps the same way.

/// Immutable RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Same value in all three channels.
    pub const fn gray(v: u8) -> Self {
        Color { r: v, g: v, b: v }
    }

    /// Build a color from floating-point channel values.
    ///
    /// Each channel is rounded to the nearest integer and clamped to 0-255.
    pub fn from_f32(r: f32, g: f32, b: f32) -> Self {
        Color {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Unweighted brightness: `floor((r + g + b) / 3)`.
    #[inline]
    pub fn brightness(self) -> i32 {
        (self.r as i32 + self.g as i32 + self.b as i32) / 3
    }

    /// Apply `f` to each channel independently.
    #[inline]
    pub fn map(self, f: impl Fn(u8) -> u8) -> Self {
        Color::new(f(self.r), f(self.g), f(self.b))
    }
}

/// Round to nearest and clamp into 0-255. NaN becomes 0.
#[inline]
pub fn clamp_channel(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}
