//! CLI enum types for output selection.

use clap::ValueEnum;

use crate::pipeline::OutputFormat;

/// What `convert` writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Text rendered into a PNG image
    #[default]
    Png,
    /// Plain UTF-8 text
    Text,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Png => OutputFormat::Png,
            Format::Text => OutputFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_to_output_format() {
        assert_eq!(OutputFormat::from(Format::Png), OutputFormat::Png);
        assert_eq!(OutputFormat::from(Format::Text), OutputFormat::Text);
    }

    #[test]
    fn test_format_default_is_png() {
        assert_eq!(Format::default(), Format::Png);
    }
}
