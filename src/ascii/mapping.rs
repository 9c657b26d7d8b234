//! Luminance to glyph mapping.

use super::charset::GlyphRamp;
use super::constants::LUMA_DIVISOR;
use super::grayscale::pixel_luminance;
use super::grid::AsciiGrid;
use super::pixels::PixelBuffer;

/// Ramp index for a luminance value: `floor(gray * ramp_len / 256)`.
///
/// The divisor is 256, so pure white (255) lands on
/// `floor(ramp_len * 255 / 256)`. Indices at or past the end of the ramp
/// are clamped to the last character.
///
/// # Example
/// ```
/// use asciify::ascii::char_index;
/// assert_eq!(char_index(0.0, 70), 0);
/// assert_eq!(char_index(255.0, 70), 69);
/// assert_eq!(char_index(255.0, 10), 9);
/// ```
#[inline]
pub fn char_index(gray: f64, ramp_len: usize) -> usize {
    // `as usize` floors non-negative values
    let index = (gray * ramp_len as f64 / LUMA_DIVISOR) as usize;
    if index < ramp_len {
        index
    } else {
        ramp_len.saturating_sub(1)
    }
}

/// Map every pixel of `buffer` to one ramp character.
///
/// Rows are processed top to bottom (y = 0 first), columns left to right.
/// Only the first three channels of each pixel are read. This never fails
/// for a well-formed buffer.
pub fn to_ascii_grid(buffer: &PixelBuffer, ramp: &GlyphRamp) -> AsciiGrid {
    let width = buffer.width() as usize;
    let bpp = buffer.bytes_per_pixel();
    let levels = ramp.len();

    let rows: Vec<String> = buffer
        .rows()
        .map(|row| {
            row.chunks_exact(bpp)
                .map(|px| ramp.glyph_at(char_index(pixel_luminance(px), levels)))
                .collect()
        })
        .collect();

    log::debug!("mapped {}x{} pixels onto {}-glyph ramp", width, rows.len(), levels);

    AsciiGrid::from_rows(rows, width)
}
