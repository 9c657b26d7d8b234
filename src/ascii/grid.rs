//! The character grid produced by glyph mapping.

use std::fmt;

/// A rectangular grid of characters, one per downsampled pixel.
///
/// All rows have the same number of characters. The text form terminates
/// every row (including the last) with `'\n'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiGrid {
    rows: Vec<String>,
    width: usize,
}

impl AsciiGrid {
    /// Rows must be non-ragged; the mapper is the only producer.
    pub(crate) fn from_rows(rows: Vec<String>, width: usize) -> Self {
        debug_assert!(rows.iter().all(|r| r.chars().count() == width));
        Self { rows, width }
    }

    /// Characters per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Render as a single string with a line break after each row.
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.rows.iter().map(|r| r.len() + 1).sum());
        for row in &self.rows {
            text.push_str(row);
            text.push('\n');
        }
        text
    }
}

impl fmt::Display for AsciiGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
