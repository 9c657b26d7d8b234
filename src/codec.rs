//! Image decode/encode at the pipeline boundary.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};

use crate::ascii::{PixelBuffer, PixelLayout};
use crate::error::{ConversionError, Result};

/// Turns encoded image bytes into pixels and back.
pub trait ImageCodec: Send + Sync {
    /// Decode bytes of any supported format into a pixel buffer.
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer>;

    /// Encode a pixel buffer into the codec's output format.
    fn encode(&self, image: &PixelBuffer) -> Result<Vec<u8>>;
}

/// Codec built on the `image` crate: sniffs the input format, writes PNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec;

impl ImageCodec for PngCodec {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer> {
        if bytes.is_empty() {
            return Err(ConversionError::InvalidImage("no image data".to_string()));
        }

        let img = image::load_from_memory(bytes)
            .map_err(|e| ConversionError::InvalidImage(e.to_string()))?;
        let (width, height) = (img.width(), img.height());

        // Keep alpha only when the source has it
        let (channels, data) = if img.color().has_alpha() {
            (4, img.into_rgba8().into_raw())
        } else {
            (3, img.into_rgb8().into_raw())
        };
        PixelBuffer::from_channels(width, height, channels, data)
    }

    fn encode(&self, image: &PixelBuffer) -> Result<Vec<u8>> {
        let (width, height) = (image.width(), image.height());
        let data = image.data().to_vec();

        let dynamic = match image.layout() {
            PixelLayout::Rgb => RgbImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8),
            PixelLayout::Rgba => {
                RgbaImage::from_raw(width, height, data).map(DynamicImage::ImageRgba8)
            }
        }
        .ok_or_else(|| {
            ConversionError::RenderFailure(format!(
                "pixel buffer does not match {}x{}",
                width, height
            ))
        })?;

        let mut out = Cursor::new(Vec::new());
        dynamic
            .write_to(&mut out, ImageFormat::Png)
            .map_err(|e| ConversionError::RenderFailure(format!("PNG encoding failed: {}", e)))?;
        Ok(out.into_inner())
    }
}
