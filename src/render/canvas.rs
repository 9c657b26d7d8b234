//! Mutable RGBA drawing surface for the text renderer.

use crate::ascii::constants::{BACKGROUND_RGBA, FOREGROUND_RGB};
use crate::ascii::{PixelBuffer, PixelLayout};
use crate::error::{ConversionError, Result};

/// An RGBA surface pre-filled with the background color.
///
/// Shapers draw glyph coverage into it; the renderer then freezes it into
/// an immutable [`PixelBuffer`].
#[derive(Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Allocate a `width` x `height` surface filled solid black.
    ///
    /// # Errors
    /// Returns [`ConversionError::RenderFailure`] for zero-area surfaces or
    /// when the backing buffer cannot be allocated.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ConversionError::RenderFailure(format!(
                "cannot allocate {}x{} surface",
                width, height
            )));
        }

        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| {
                ConversionError::RenderFailure(format!("{}x{} surface is too large", width, height))
            })?;

        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|e| {
            ConversionError::RenderFailure(format!(
                "failed to allocate {}x{} surface: {}",
                width, height, e
            ))
        })?;
        for _ in 0..(len / 4) {
            data.extend_from_slice(&BACKGROUND_RGBA);
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Blend foreground color into pixel (`x`, `y`) with the given coverage.
    ///
    /// Coordinates outside the surface are ignored, so glyphs that
    /// overhang an edge are clipped rather than rejected.
    pub fn blend(&mut self, x: i64, y: i64, coverage: u8) {
        if coverage == 0 || x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height)
        {
            return;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let cov = u32::from(coverage);
        for (channel, &fg) in self.data[offset..offset + 3].iter_mut().zip(FOREGROUND_RGB.iter()) {
            let bg = u32::from(*channel);
            let fg = u32::from(fg);
            *channel = ((bg * (255 - cov) + fg * cov + 127) / 255) as u8;
        }
    }

    /// Read back one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.data[offset..offset + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Freeze into an immutable RGBA pixel buffer.
    pub fn into_pixel_buffer(self) -> Result<PixelBuffer> {
        PixelBuffer::new(self.width, self.height, PixelLayout::Rgba, self.data)
    }
}
