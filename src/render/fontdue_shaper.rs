//! [`TextShaper`] backed by fontdue glyph rasterization.

use std::collections::HashMap;

use fontdue::{LineMetrics, Metrics};

use super::canvas::Canvas;
use super::font::MonospaceFont;
use super::{TextExtent, TextShaper, TextStyle};
use crate::error::{ConversionError, Result};

/// Lays text out on a fixed monospace cell grid.
///
/// The cell width is the widest advance among the glyphs in the text,
/// and the line pitch is the font's `new_line_size`. Glyph ink that
/// overhangs its cell (descenders on the last row, negative bearings in
/// the first column) grows the measured box so `draw` never clips it.
#[derive(Debug, Clone)]
pub struct FontdueShaper {
    font: MonospaceFont,
}

/// Cell geometry for one text at one size.
#[derive(Debug, Clone, Copy)]
struct CellMetrics {
    advance: f32,
    line_height: f32,
    /// Baseline offset from the top of a line, at least as tall as the
    /// tallest glyph so nothing lands above row 0.
    ascent: f32,
    /// Whole-pixel shift right so no glyph bearing reaches left of column 0.
    left: i64,
}

impl CellMetrics {
    /// Top-left pixel of a glyph's bitmap in the cell at (`col`, `row`).
    fn glyph_origin(&self, col: usize, row: usize, metrics: &Metrics) -> (i64, i64) {
        let baseline = row as f32 * self.line_height + self.ascent;
        let x = (col as f32 * self.advance).round() as i64 + self.left + i64::from(metrics.xmin);
        let y = baseline.round() as i64 - (metrics.height as i64 + i64::from(metrics.ymin));
        (x, y)
    }
}

impl FontdueShaper {
    pub fn new(font: MonospaceFont) -> Self {
        Self { font }
    }

    fn cell_metrics(&self, text: &str, size: f32) -> CellMetrics {
        let face = self.font.face();
        let line = self.line_metrics(size);
        let mut advance = 0.0_f32;
        let mut ascent = line.ascent;
        let mut left = 0_i64;
        for ch in text.chars().filter(|c| *c != '\n') {
            let m = face.metrics(ch, size);
            advance = advance.max(m.advance_width);
            if !ch.is_whitespace() {
                ascent = ascent.max((m.height as i32 + m.ymin) as f32);
                left = left.max(-i64::from(m.xmin));
            }
        }
        // An all-blank text still occupies cells
        if advance <= 0.0 {
            advance = face.metrics(' ', size).advance_width;
        }
        CellMetrics {
            advance,
            line_height: line.new_line_size,
            ascent,
            left,
        }
    }

    fn line_metrics(&self, size: f32) -> LineMetrics {
        let face = self.font.face();
        face.horizontal_line_metrics(size).unwrap_or_else(|| {
            let m = face.metrics('M', size);
            LineMetrics {
                ascent: m.height as f32,
                descent: 0.0,
                line_gap: 0.0,
                new_line_size: m.height as f32,
            }
        })
    }
}

fn check_size(style: &TextStyle) -> Result<()> {
    if style.size.is_finite() && style.size > 0.0 {
        Ok(())
    } else {
        Err(ConversionError::RenderFailure(format!(
            "invalid font size {}",
            style.size
        )))
    }
}

impl TextShaper for FontdueShaper {
    fn measure(&self, text: &str, style: &TextStyle) -> Result<TextExtent> {
        check_size(style)?;
        let face = self.font.face();
        let cells = self.cell_metrics(text, style.size);
        let columns = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let rows = text.lines().count();

        let mut width = columns as f32 * cells.advance;
        let mut height = rows as f32 * cells.line_height;
        for (row, line) in text.lines().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                if ch.is_whitespace() {
                    continue;
                }
                let metrics = face.metrics(ch, style.size);
                let (x, y) = cells.glyph_origin(col, row, &metrics);
                width = width.max((x + metrics.width as i64) as f32);
                height = height.max((y + metrics.height as i64) as f32);
            }
        }

        Ok(TextExtent { width, height })
    }

    fn draw(&self, text: &str, style: &TextStyle, canvas: &mut Canvas) -> Result<()> {
        check_size(style)?;
        let face = self.font.face();
        let cells = self.cell_metrics(text, style.size);
        // Glyph rasters are reused within this call only
        let mut glyphs: HashMap<char, (Metrics, Vec<u8>)> = HashMap::new();

        for (row, line) in text.lines().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                if ch.is_whitespace() {
                    continue;
                }
                let (metrics, bitmap) = glyphs
                    .entry(ch)
                    .or_insert_with(|| face.rasterize(ch, style.size));
                if metrics.width == 0 || metrics.height == 0 {
                    continue;
                }

                let (origin_x, origin_y) = cells.glyph_origin(col, row, metrics);
                for (gy, coverage_row) in bitmap.chunks_exact(metrics.width).enumerate() {
                    for (gx, &coverage) in coverage_row.iter().enumerate() {
                        canvas.blend(origin_x + gx as i64, origin_y + gy as i64, coverage);
                    }
                }
            }
        }

        Ok(())
    }
}
