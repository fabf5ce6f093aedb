//! Per-pixel cross-dissolve.

use morph_core::Rgba;

/// Blends two colors channel by channel: `alpha * src + (1 - alpha) * dst`.
///
/// The result is truncated toward zero. For `alpha` in `[0, 1]` the
/// combination stays within `u8` range; other values saturate.
///
/// # Example
///
/// ```rust
/// use morph_core::Rgba;
/// use morph_ops::blend::blend_pixel;
///
/// let out = blend_pixel(Rgba::gray(200), Rgba::gray(101), 0.5);
/// assert_eq!(out, Rgba::gray(150));
/// ```
#[inline]
pub fn blend_pixel(src: Rgba, dst: Rgba, alpha: f64) -> Rgba {
    let keep = 1.0 - alpha;
    let mut out = Rgba::default();
    for c in 0..4 {
        let value = alpha * f64::from(src[c]) + keep * f64::from(dst[c]);
        out[c] = value as u8;
    }
    out
}
