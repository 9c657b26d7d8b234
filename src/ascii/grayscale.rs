//! RGB to luminance conversion using the ITU-R BT.601 formula.

use super::constants::{LUMA_B, LUMA_G, LUMA_R};

/// Luminance of an RGB triple: `Y = 0.299*R + 0.587*G + 0.114*B`.
///
/// Computed in `f64` so that quantization downstream sees the exact
/// fractional value rather than an integer-rounded one.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    LUMA_R * f64::from(r) + LUMA_G * f64::from(g) + LUMA_B * f64::from(b)
}

/// Luminance of a pixel slice, reading only the first three channels.
///
/// Alpha (if present) is ignored; there is no blending against a background.
#[inline]
pub fn pixel_luminance(pixel: &[u8]) -> f64 {
    luminance(pixel[0], pixel[1], pixel[2])
}
