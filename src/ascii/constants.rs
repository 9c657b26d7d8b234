//! Fixed numeric constants of the conversion.
//!
//! These values must stay as they are for output compatibility with
//! previously generated art.

/// Width of the downsampled image, in pixels (one character per pixel).
pub const DEFAULT_TARGET_WIDTH: u32 = 100;

/// Largest accepted target width in characters.
pub const MAX_TARGET_WIDTH: u32 = 2000;

/// Reference glyph ramp, ordered from darkest-appearing to lightest-appearing.
/// 73 characters (67 printable glyphs followed by six blanks).
pub const REFERENCE_RAMP: &str =
    "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^`      ";

/// ITU-R BT.601 luma weight for red.
pub const LUMA_R: f64 = 0.299;
/// ITU-R BT.601 luma weight for green.
pub const LUMA_G: f64 = 0.587;
/// ITU-R BT.601 luma weight for blue.
pub const LUMA_B: f64 = 0.114;

/// Divisor used when scaling luminance onto the ramp.
///
/// This is 256, not 255: a pure white pixel lands on
/// `floor(len * 255 / 256)` rather than on the last ramp index.
pub const LUMA_DIVISOR: f64 = 256.0;

/// Font size used by the text renderer, in pixels.
pub const DEFAULT_FONT_SIZE: f32 = 10.0;

/// Largest accepted font size in pixels.
pub const MAX_FONT_SIZE: f32 = 200.0;

/// Preferred font family for the text renderer.
pub const DEFAULT_FONT_FAMILY: &str = "Menlo";

/// File name used when writing a rendered image without an explicit output.
pub const DEFAULT_OUTPUT_FILENAME: &str = "ascii_art.png";

/// Background color of rendered text (opaque black).
pub const BACKGROUND_RGBA: [u8; 4] = [0, 0, 0, 255];

/// Foreground color of rendered text (white).
pub const FOREGROUND_RGB: [u8; 3] = [255, 255, 255];
