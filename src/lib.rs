//! asciify library crate.
//!
//! Converts raster images into ASCII art and renders that art back into a
//! white-on-black bitmap.
//!
//! - [`ascii`] - pure conversion core (downsample, luminance, glyph mapping)
//! - [`render`] - text rasterization behind the [`render::TextShaper`] trait
//! - [`codec`] - image decode/encode behind the [`codec::ImageCodec`] trait
//! - [`pipeline`] - the [`pipeline::Converter`] wiring them together

pub mod ascii;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod render;

pub use error::{ConversionError, Result};
pub use pipeline::{ConvertOptions, Converter, OutputFormat};
