//! Pixel buffer types shared by every pipeline stage.

use crate::error::{ConversionError, Result};

/// Channel layout of a pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// RGB format (3 bytes per pixel)
    Rgb,
    /// RGBA format (4 bytes per pixel)
    Rgba,
}

impl PixelLayout {
    /// Get the number of bytes per pixel.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }

    /// Look up the layout for a channel count (3 or 4).
    pub fn from_channels(channels: u8) -> Option<Self> {
        match channels {
            3 => Some(PixelLayout::Rgb),
            4 => Some(PixelLayout::Rgba),
            _ => None,
        }
    }
}

/// An immutable raster image.
///
/// Pixels are stored row-major, top row first, with channels ordered
/// R, G, B and optionally A. The length of `data` always equals
/// `width * height * bytes_per_pixel`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    layout: PixelLayout,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw pixel bytes, validating dimensions against the buffer length.
    ///
    /// # Errors
    /// Returns [`ConversionError::InvalidImage`] if either dimension is zero,
    /// the buffer is empty, or its length does not match the dimensions.
    pub fn new(width: u32, height: u32, layout: PixelLayout, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidImage(format!(
                "image has zero dimensions ({}x{})",
                width, height
            )));
        }
        if data.is_empty() {
            return Err(ConversionError::InvalidImage(
                "pixel buffer is empty".to_string(),
            ));
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(layout.bytes_per_pixel()))
            .ok_or_else(|| {
                ConversionError::InvalidImage(format!(
                    "image dimensions overflow ({}x{})",
                    width, height
                ))
            })?;
        if data.len() != expected {
            return Err(ConversionError::InvalidImage(format!(
                "pixel buffer holds {} bytes, expected {} for {}x{} {:?}",
                data.len(),
                expected,
                width,
                height,
                layout
            )));
        }

        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    /// Same as [`PixelBuffer::new`] but takes a raw channel count.
    pub fn from_channels(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self> {
        let layout = PixelLayout::from_channels(channels).ok_or_else(|| {
            ConversionError::InvalidImage(format!("unsupported channel count {}", channels))
        })?;
        Self::new(width, height, layout, data)
    }

    /// Width in pixels, never zero.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels, never zero.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.layout.bytes_per_pixel()
    }

    /// Raw pixel bytes in row-major order.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Bytes of a single pixel, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.bytes_per_pixel();
        let offset = (y as usize * self.width as usize + x as usize) * bpp;
        self.data.get(offset..offset + bpp)
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data
            .chunks_exact(self.width as usize * self.bytes_per_pixel())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_matching_length() {
        let buf = PixelBuffer::new(2, 1, PixelLayout::Rgb, vec![0; 6]).unwrap();
        assert_eq!(buf.width(), 2);
        assert_eq!(buf.height(), 1);
        assert_eq!(buf.bytes_per_pixel(), 3);
    }

    #[test]
    fn test_new_rejects_zero_width() {
        let err = PixelBuffer::new(0, 4, PixelLayout::Rgba, vec![0; 16]).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidImage(_)));
    }

    #[test]
    fn test_new_rejects_empty_data() {
        let err = PixelBuffer::new(1, 1, PixelLayout::Rgb, Vec::new()).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidImage(_)));
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let err = PixelBuffer::new(2, 2, PixelLayout::Rgba, vec![0; 12]).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidImage(_)));
    }

    #[test]
    fn test_from_channels_rejects_grayscale() {
        let err = PixelBuffer::from_channels(1, 1, 1, vec![0]).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidImage(_)));
    }

    #[test]
    fn test_pixel_lookup() {
        let data = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let buf = PixelBuffer::new(2, 1, PixelLayout::Rgba, data).unwrap();
        assert_eq!(buf.pixel(1, 0), Some(&[5, 6, 7, 8][..]));
        assert_eq!(buf.pixel(2, 0), None);
        assert_eq!(buf.pixel(0, 1), None);
    }

    #[test]
    fn test_rows_yields_height_rows() {
        let buf = PixelBuffer::new(3, 2, PixelLayout::Rgb, vec![0; 18]).unwrap();
        let rows: Vec<_> = buf.rows().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.len() == 9));
    }
}
