//! Unit tests for the text rasterizer framing.
//!
//! A fixed-cell shaper stands in for a real font so the tests do not depend
//! on installed system fonts:
//! - Output size is the ceiled measured extent
//! - Background is opaque black, glyphs are white
//! - Degenerate extents fail with RenderFailure

use asciify::ascii::{downsample, to_ascii_grid, AsciiGrid, GlyphRamp, PixelBuffer, PixelLayout};
use asciify::render::{render_text, Canvas, TextExtent, TextShaper, TextStyle};
use asciify::{ConversionError, Result};

/// Lays each character out in a `cell_w` x `cell_h` box and fills the box
/// solid for any non-blank character.
struct FixedCellShaper {
    cell_w: f32,
    cell_h: f32,
}

impl TextShaper for FixedCellShaper {
    fn measure(&self, text: &str, _style: &TextStyle) -> Result<TextExtent> {
        let cols = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        Ok(TextExtent {
            width: cols as f32 * self.cell_w,
            height: text.lines().count() as f32 * self.cell_h,
        })
    }

    fn draw(&self, text: &str, _style: &TextStyle, canvas: &mut Canvas) -> Result<()> {
        for (row, line) in text.lines().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let x0 = (col as f32 * self.cell_w) as i64;
                let y0 = (row as f32 * self.cell_h) as i64;
                for y in y0..y0 + self.cell_h as i64 {
                    for x in x0..x0 + self.cell_w as i64 {
                        canvas.blend(x, y, 255);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Reports a fixed extent and never draws.
struct ExtentShaper(TextExtent);

impl TextShaper for ExtentShaper {
    fn measure(&self, _text: &str, _style: &TextStyle) -> Result<TextExtent> {
        Ok(self.0)
    }

    fn draw(&self, _text: &str, _style: &TextStyle, _canvas: &mut Canvas) -> Result<()> {
        Ok(())
    }
}

struct BrokenShaper;

impl TextShaper for BrokenShaper {
    fn measure(&self, _text: &str, _style: &TextStyle) -> Result<TextExtent> {
        Ok(TextExtent {
            width: 10.0,
            height: 10.0,
        })
    }

    fn draw(&self, _text: &str, _style: &TextStyle, _canvas: &mut Canvas) -> Result<()> {
        Err(ConversionError::RenderFailure("glyph cache exploded".to_string()))
    }
}

fn grid_of(value: u8, width: u32, height: u32) -> AsciiGrid {
    let src = PixelBuffer::new(
        width,
        height,
        PixelLayout::Rgb,
        vec![value; (width * height * 3) as usize],
    )
    .unwrap();
    let small = downsample(&src, width).unwrap();
    to_ascii_grid(&small, &GlyphRamp::reference())
}

#[test]
fn test_image_size_is_ceiled_extent() {
    let shaper = FixedCellShaper {
        cell_w: 6.5,
        cell_h: 12.25,
    };
    let image = render_text(&grid_of(0, 2, 2), &TextStyle::default(), &shaper).unwrap();
    // 2 * 6.5 = 13.0, 2 * 12.25 = 24.5 -> 25
    assert_eq!(image.width(), 13);
    assert_eq!(image.height(), 25);
    assert_eq!(image.layout(), PixelLayout::Rgba);
}

#[test]
fn test_exact_extent_is_not_padded() {
    let shaper = ExtentShaper(TextExtent {
        width: 600.0,
        height: 750.0,
    });
    let image = render_text(&grid_of(0, 4, 4), &TextStyle::default(), &shaper).unwrap();
    assert_eq!((image.width(), image.height()), (600, 750));
}

#[test]
fn test_background_is_opaque_black() {
    // White source maps to blanks, so nothing is drawn
    let shaper = FixedCellShaper {
        cell_w: 6.0,
        cell_h: 12.0,
    };
    let image = render_text(&grid_of(255, 3, 2), &TextStyle::default(), &shaper).unwrap();
    assert_eq!((image.width(), image.height()), (18, 24));
    assert!(image.data().chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
}

#[test]
fn test_glyphs_are_white_and_top_left_aligned() {
    let shaper = FixedCellShaper {
        cell_w: 4.0,
        cell_h: 8.0,
    };
    let image = render_text(&grid_of(0, 1, 1), &TextStyle::default(), &shaper).unwrap();
    assert_eq!((image.width(), image.height()), (4, 8));
    assert_eq!(image.pixel(0, 0).unwrap(), &[255, 255, 255, 255]);
    assert_eq!(image.pixel(3, 7).unwrap(), &[255, 255, 255, 255]);
}

#[test]
fn test_zero_width_extent_is_render_failure() {
    let shaper = ExtentShaper(TextExtent {
        width: 0.0,
        height: 12.0,
    });
    let err = render_text(&grid_of(0, 1, 1), &TextStyle::default(), &shaper).unwrap_err();
    assert!(matches!(err, ConversionError::RenderFailure(_)));
}

#[test]
fn test_nan_extent_is_render_failure() {
    let shaper = ExtentShaper(TextExtent {
        width: f32::NAN,
        height: 12.0,
    });
    let err = render_text(&grid_of(0, 1, 1), &TextStyle::default(), &shaper).unwrap_err();
    assert!(matches!(err, ConversionError::RenderFailure(_)));
}

#[test]
fn test_shaper_failure_propagates() {
    let err = render_text(&grid_of(0, 1, 1), &TextStyle::default(), &BrokenShaper).unwrap_err();
    match err {
        ConversionError::RenderFailure(msg) => assert!(msg.contains("glyph cache")),
        other => panic!("Expected RenderFailure, got {:?}", other),
    }
}

#[test]
fn test_render_is_deterministic() {
    let shaper = FixedCellShaper {
        cell_w: 3.0,
        cell_h: 5.0,
    };
    let grid = grid_of(0, 3, 3);
    let a = render_text(&grid, &TextStyle::default(), &shaper).unwrap();
    let b = render_text(&grid, &TextStyle::default(), &shaper).unwrap();
    assert_eq!(a, b);
}
