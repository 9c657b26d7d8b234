//! Image to ASCII art conversion.
//!
//! The numeric core of the converter, free of any I/O:
//!
//! 1. **Downsampling** - nearest-neighbor scale to a fixed width, aspect
//!    preserved, normalized to premultiplied RGBA
//! 2. **Luminance** - RGB to gray using BT.601 weights
//! 3. **Glyph mapping** - quantize gray onto a [`GlyphRamp`], one character
//!    per pixel, producing an [`AsciiGrid`]
//!
//! # Example
//!
//! ```
//! use asciify::ascii::{downsample, to_ascii_grid, GlyphRamp, PixelBuffer, PixelLayout};
//!
//! let black = PixelBuffer::new(2, 2, PixelLayout::Rgb, vec![0; 12]).unwrap();
//! let small = downsample(&black, 2).unwrap();
//! let grid = to_ascii_grid(&small, &GlyphRamp::reference());
//! assert_eq!(grid.to_text(), "$$\n$$\n");
//! ```

mod charset;
pub mod constants;
mod dimensions;
mod downsample;
mod grayscale;
mod grid;
mod mapping;
mod pixels;

pub use charset::GlyphRamp;
pub use dimensions::target_height;
pub use downsample::downsample;
pub use grayscale::{luminance, pixel_luminance};
pub use grid::AsciiGrid;
pub use mapping::{char_index, to_ascii_grid};
pub use pixels::{PixelBuffer, PixelLayout};
