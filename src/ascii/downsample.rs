//! Nearest-neighbor downsampling to the character grid resolution.

use super::dimensions::target_height;
use super::pixels::{PixelBuffer, PixelLayout};
use crate::error::{ConversionError, Result};

/// Downsample `source` to `target_width` pixels wide, preserving aspect ratio.
///
/// Each output pixel copies the nearest source pixel under uniform linear
/// scaling; no averaging across source pixels is done. The output height
/// is [`target_height`] (truncated, not rounded).
///
/// The result is always [`PixelLayout::Rgba`] with premultiplied alpha, so
/// a fully transparent source pixel comes out black. RGB sources are
/// treated as opaque and keep their colors unchanged.
///
/// # Errors
/// * [`ConversionError::InvalidImage`] if `target_width` is zero.
/// * [`ConversionError::RenderFailure`] if the output height truncates to
///   zero or the output bitmap cannot be allocated.
///
/// # Example
/// ```
/// use asciify::ascii::{downsample, PixelBuffer, PixelLayout};
/// let src = PixelBuffer::new(4, 2, PixelLayout::Rgb, vec![0; 24]).unwrap();
/// let out = downsample(&src, 2).unwrap();
/// assert_eq!((out.width(), out.height()), (2, 1));
/// assert_eq!(out.bytes_per_pixel(), 4);
/// ```
pub fn downsample(source: &PixelBuffer, target_width: u32) -> Result<PixelBuffer> {
    if target_width == 0 {
        return Err(ConversionError::InvalidImage(
            "target width must be greater than 0".to_string(),
        ));
    }

    let src_w = source.width();
    let src_h = source.height();
    let dst_w = target_width;
    let dst_h = target_height(src_w, src_h, dst_w);

    if dst_h == 0 {
        return Err(ConversionError::RenderFailure(format!(
            "cannot allocate {}x0 bitmap for {}x{} source",
            dst_w, src_w, src_h
        )));
    }

    let out_len = (dst_w as usize)
        .checked_mul(dst_h as usize)
        .and_then(|n| n.checked_mul(PixelLayout::Rgba.bytes_per_pixel()))
        .ok_or_else(|| {
            ConversionError::RenderFailure(format!("{}x{} bitmap is too large", dst_w, dst_h))
        })?;

    let mut data = Vec::new();
    data.try_reserve_exact(out_len).map_err(|e| {
        ConversionError::RenderFailure(format!(
            "failed to allocate {}x{} bitmap: {}",
            dst_w, dst_h, e
        ))
    })?;

    // Source column lookup is the same for every row
    let columns: Vec<u32> = (0..dst_w).map(|x| nearest(x, src_w, dst_w)).collect();

    for y in 0..dst_h {
        let sy = nearest(y, src_h, dst_h);
        for &sx in &columns {
            // Both coordinates are clamped in range by `nearest`
            let px = source.pixel(sx, sy).unwrap_or(&[0, 0, 0, 0]);
            data.extend_from_slice(&premultiply(px, source.layout()));
        }
    }

    log::debug!(
        "downsampled {}x{} {:?} -> {}x{} Rgba",
        src_w,
        src_h,
        source.layout(),
        dst_w,
        dst_h
    );

    PixelBuffer::new(dst_w, dst_h, PixelLayout::Rgba, data)
}

/// Source coordinate nearest to the center of destination cell `dst`.
///
/// Computes `floor((dst + 0.5) * src_len / dst_len)` in integer math,
/// clamped to the last valid source index.
#[inline]
fn nearest(dst: u32, src_len: u32, dst_len: u32) -> u32 {
    let scaled = (2 * u64::from(dst) + 1) * u64::from(src_len) / (2 * u64::from(dst_len));
    (scaled as u32).min(src_len - 1)
}

/// Convert a source pixel to premultiplied RGBA.
#[inline]
fn premultiply(px: &[u8], layout: PixelLayout) -> [u8; 4] {
    match layout {
        PixelLayout::Rgb => [px[0], px[1], px[2], 255],
        PixelLayout::Rgba => {
            let a = u32::from(px[3]);
            let mul = |c: u8| ((u32::from(c) * a + 127) / 255) as u8;
            [mul(px[0]), mul(px[1]), mul(px[2]), px[3]]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_identity() {
        for x in 0..7 {
            assert_eq!(nearest(x, 7, 7), x);
        }
    }

    #[test]
    fn test_nearest_halving_samples_cell_centers() {
        // 4 -> 2: centers at 1.0 and 3.0
        assert_eq!(nearest(0, 4, 2), 1);
        assert_eq!(nearest(1, 4, 2), 3);
    }

    #[test]
    fn test_nearest_upscaling_stays_in_range() {
        for x in 0..10 {
            assert!(nearest(x, 3, 10) < 3);
        }
    }

    #[test]
    fn test_premultiply_opaque_rgba_unchanged() {
        assert_eq!(premultiply(&[10, 20, 30, 255], PixelLayout::Rgba), [10, 20, 30, 255]);
    }

    #[test]
    fn test_premultiply_transparent_is_black() {
        assert_eq!(premultiply(&[200, 150, 100, 0], PixelLayout::Rgba), [0, 0, 0, 0]);
    }

    #[test]
    fn test_premultiply_half_alpha() {
        assert_eq!(premultiply(&[255, 0, 100, 128], PixelLayout::Rgba), [128, 0, 50, 128]);
    }

    #[test]
    fn test_premultiply_rgb_is_opaque() {
        assert_eq!(premultiply(&[1, 2, 3], PixelLayout::Rgb), [1, 2, 3, 255]);
    }

    #[test]
    fn test_zero_target_width_is_invalid() {
        let src = PixelBuffer::new(1, 1, PixelLayout::Rgb, vec![0; 3]).unwrap();
        assert!(matches!(
            downsample(&src, 0),
            Err(ConversionError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_zero_height_is_render_failure() {
        let src = PixelBuffer::new(1000, 5, PixelLayout::Rgb, vec![0; 1000 * 5 * 3]).unwrap();
        assert!(matches!(
            downsample(&src, 100),
            Err(ConversionError::RenderFailure(_))
        ));
    }
}
