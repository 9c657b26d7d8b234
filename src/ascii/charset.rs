//! Glyph ramp definitions for ASCII rendering.

use std::str::FromStr;

use super::constants::REFERENCE_RAMP;
use crate::error::{ConversionError, Result};

/// Ordered characters used to quantize brightness.
///
/// Characters run from darkest-appearing (densest) to lightest-appearing.
/// A ramp always holds at least one character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: Vec<char>,
}

impl GlyphRamp {
    /// The reference ramp (`$@B%8&WM#*...` down to blanks).
    pub fn reference() -> Self {
        Self {
            glyphs: REFERENCE_RAMP.chars().collect(),
        }
    }

    /// Build a ramp from a string of characters, darkest first.
    ///
    /// # Errors
    /// Returns [`ConversionError::EmptyRamp`] if `chars` is empty.
    pub fn new(chars: impl AsRef<str>) -> Result<Self> {
        let glyphs: Vec<char> = chars.as_ref().chars().collect();
        if glyphs.is_empty() {
            return Err(ConversionError::EmptyRamp);
        }
        Ok(Self { glyphs })
    }

    /// Number of characters in the ramp.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Character at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<char> {
        self.glyphs.get(index).copied()
    }

    /// Character at `index`, clamped to the last character.
    pub fn glyph_at(&self, index: usize) -> char {
        let last = self.glyphs.len().saturating_sub(1);
        self.glyphs[index.min(last)]
    }

    /// All glyphs, darkest first.
    pub fn chars(&self) -> &[char] {
        &self.glyphs
    }
}

impl Default for GlyphRamp {
    fn default() -> Self {
        Self::reference()
    }
}

impl FromStr for GlyphRamp {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_ramp_first_and_last() {
        let ramp = GlyphRamp::reference();
        assert_eq!(ramp.get(0), Some('$'));
        assert_eq!(ramp.get(ramp.len() - 1), Some(' '));
        assert_eq!(ramp.len(), REFERENCE_RAMP.chars().count());
    }

    #[test]
    fn test_empty_ramp_rejected() {
        assert!(matches!(GlyphRamp::new(""), Err(ConversionError::EmptyRamp)));
    }

    #[test]
    fn test_get_out_of_range() {
        let ramp = GlyphRamp::new("#. ").unwrap();
        assert_eq!(ramp.get(3), None);
    }

    #[test]
    fn test_glyph_at_clamps() {
        let ramp = GlyphRamp::new("#. ").unwrap();
        assert_eq!(ramp.glyph_at(1), '.');
        assert_eq!(ramp.glyph_at(99), ' ');
    }

    #[test]
    fn test_from_str_handles_unicode() {
        let ramp: GlyphRamp = "█▓▒░ ".parse().unwrap();
        assert_eq!(ramp.len(), 5);
        assert_eq!(ramp.get(0), Some('█'));
    }

    #[test]
    fn test_default_is_reference() {
        assert_eq!(GlyphRamp::default(), GlyphRamp::reference());
    }
}
