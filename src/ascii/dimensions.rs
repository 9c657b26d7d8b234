//! Dimension calculation for aspect-preserving downsampling.

/// Height of the downsampled image for a given target width.
///
/// The ratio is computed in floating point and truncated toward zero:
/// `floor(height * target_width / width)`. It is deliberately not rounded
/// to nearest, so grid dimensions match previously generated output.
///
/// Returns 0 when `width` is 0 or when the result truncates to zero
/// (very wide sources); callers treat that as unrenderable.
///
/// # Example
/// ```
/// use asciify::ascii::target_height;
/// assert_eq!(target_height(640, 480, 100), 75);
/// assert_eq!(target_height(3, 2, 2), 1);
/// ```
pub fn target_height(width: u32, height: u32, target_width: u32) -> u32 {
    if width == 0 {
        return 0;
    }
    (f64::from(height) * f64::from(target_width) / f64::from(width)) as u32
}
