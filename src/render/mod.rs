//! Rasterizing an [`AsciiGrid`] back into a bitmap.
//!
//! The renderer owns the framing: measure the text, allocate an image of
//! exactly the measured size, fill it black, and let a [`TextShaper`] draw
//! the glyphs in white. Glyph shaping itself is delegated to the shaper.

mod canvas;
mod font;
mod fontdue_shaper;

pub use canvas::Canvas;
pub use font::{font_dirs, MonospaceFont, FALLBACK_FAMILIES};
pub use fontdue_shaper::FontdueShaper;

use crate::ascii::constants::DEFAULT_FONT_SIZE;
use crate::ascii::{AsciiGrid, PixelBuffer};
use crate::error::{ConversionError, Result};

/// Font parameters passed to a shaper for a single render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: DEFAULT_FONT_SIZE,
        }
    }
}

/// Measured size of a block of text, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
}

impl TextExtent {
    /// True when the extent is finite and has a positive area.
    pub fn is_renderable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Measures and draws multi-line monospace text.
///
/// Implementations lay text out left- and top-aligned with no spacing
/// beyond the font's natural metrics. `draw` must place glyphs exactly
/// where `measure` accounted for them.
pub trait TextShaper: Send + Sync {
    /// Bounding box of `text` (lines separated by `'\n'`).
    fn measure(&self, text: &str, style: &TextStyle) -> Result<TextExtent>;

    /// Draw `text` into `canvas` starting at its top-left corner.
    fn draw(&self, text: &str, style: &TextStyle, canvas: &mut Canvas) -> Result<()>;
}

/// Render `grid` as white monospace text on a black background.
///
/// The output is exactly `ceil(width) x ceil(height)` of the measured text.
///
/// # Errors
/// Returns [`ConversionError::RenderFailure`] if the measured box is
/// degenerate, the surface cannot be allocated, or the shaper fails.
pub fn render_text(
    grid: &AsciiGrid,
    style: &TextStyle,
    shaper: &dyn TextShaper,
) -> Result<PixelBuffer> {
    let text = grid.to_text();
    let extent = shaper.measure(&text, style)?;

    if !extent.is_renderable() {
        return Err(ConversionError::RenderFailure(format!(
            "degenerate text bounds {}x{}",
            extent.width, extent.height
        )));
    }

    let width = extent.width.ceil() as u32;
    let height = extent.height.ceil() as u32;

    let mut canvas = Canvas::new(width, height)?;
    shaper.draw(&text, style, &mut canvas)?;

    log::debug!(
        "rendered {}x{} grid into {}x{} image at {}px",
        grid.width(),
        grid.height(),
        width,
        height,
        style.size
    );

    canvas.into_pixel_buffer()
}
