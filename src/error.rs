//! Error types for the conversion pipeline.

use std::path::PathBuf;

/// Errors that can occur while converting an image to ASCII art.
///
/// Every variant is terminal for the request that produced it; there are
/// no partial results.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Source image is malformed, empty, has zero dimensions, or failed to decode.
    #[error("Could not load valid image data: {0}")]
    InvalidImage(String),

    /// Bitmap surface allocation failed, text bounds were degenerate,
    /// no usable font was found, or encoding failed.
    #[error("Failed to render ASCII art to image: {0}")]
    RenderFailure(String),

    #[error("Glyph ramp must contain at least one character")]
    EmptyRamp,

    #[error("IO error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ConversionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_image_display() {
        let err = ConversionError::InvalidImage("zero width".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("valid image data"));
        assert!(msg.contains("zero width"));
    }

    #[test]
    fn test_render_failure_display() {
        let err = ConversionError::RenderFailure("degenerate text bounds".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("render ASCII art"));
        assert!(msg.contains("degenerate text bounds"));
    }

    #[test]
    fn test_io_error_display_includes_path() {
        let err = ConversionError::Io {
            path: PathBuf::from("/tmp/missing.png"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("/tmp/missing.png"));
        assert!(msg.contains("not found"));
    }
}
