//! Bilinear color sampling at fractional coordinates.
//!
//! Coordinates are in buffer space: `x` runs along columns, `y` along rows,
//! integer values land exactly on pixel centers. Neighbors outside the
//! buffer are clamped to the nearest edge pixel, so any finite `(x, y)`
//! yields a valid color.

use morph_core::{PixelBuffer, Rgba};

/// Samples `buffer` at `(x, y)` with bilinear weighting.
///
/// With `col0 = floor(x)`, `row0 = floor(y)`, `col1 = col0 + 1` and
/// `row1 = row0 + 1`, each channel is
///
/// ```text
///   p(row0, col0) * (col1 - x) * (row1 - y)
/// + p(row0, col1) * (x - col0) * (row1 - y)
/// + p(row1, col0) * (col1 - x) * (y - row0)
/// + p(row1, col1) * (x - col0) * (y - row0)
/// ```
///
/// evaluated in `f64`, floored and clamped to `[0, 255]`. The weights come
/// from the unclamped neighbor coordinates; only the pixel fetches are
/// clamped, each index on its own. Samples past an edge therefore
/// reproduce the edge pixel.
///
/// # Example
///
/// ```rust
/// use morph_core::{PixelBuffer, Rgba};
/// use morph_ops::sample_bilinear;
///
/// let mut buf = PixelBuffer::new(2, 2);
/// buf.set_pixel(1, 1, Rgba::opaque(200, 100, 50));
///
/// // Integer coordinates return the pixel itself.
/// assert_eq!(sample_bilinear(&buf, 1.0, 1.0), Rgba::opaque(200, 100, 50));
/// // Far outside the image falls back to the edge.
/// assert_eq!(sample_bilinear(&buf, 50.0, 50.0), Rgba::opaque(200, 100, 50));
/// ```
pub fn sample_bilinear(buffer: &PixelBuffer, x: f64, y: f64) -> Rgba {
    debug_assert!(!buffer.is_empty(), "sampling an empty buffer");

    let col0 = x.floor();
    let row0 = y.floor();
    let col1 = col0 + 1.0;
    let row1 = row0 + 1.0;

    let max_col = buffer.width().saturating_sub(1);
    let max_row = buffer.height().saturating_sub(1);
    let c0 = clamp_index(col0, max_col);
    let c1 = clamp_index(col1, max_col);
    let r0 = clamp_index(row0, max_row);
    let r1 = clamp_index(row1, max_row);

    let p00 = buffer.pixel(r0, c0);
    let p01 = buffer.pixel(r0, c1);
    let p10 = buffer.pixel(r1, c0);
    let p11 = buffer.pixel(r1, c1);

    // Nested lerps expand to the four-term sum above, but stay exact when
    // taps coincide (edges) or a fraction is zero (integer coordinates).
    let fx = x - col0;
    let fy = y - row0;

    let mut result = Rgba::default();
    for c in 0..4 {
        let top = lerp(f64::from(p00[c]), f64::from(p01[c]), fx);
        let bottom = lerp(f64::from(p10[c]), f64::from(p11[c]), fx);
        result[c] = to_channel(lerp(top, bottom, fy));
    }
    result
}

/// Clamps a floored coordinate into `[0, max]`.
#[inline]
fn clamp_index(coord: f64, max: u32) -> u32 {
    // NaN compares false everywhere and lands on 0.
    if coord >= f64::from(max) {
        max
    } else if coord > 0.0 {
        coord as u32
    } else {
        0
    }
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Floors a channel value and clamps it into `u8` range.
#[inline]
fn to_channel(value: f64) -> u8 {
    value.floor().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> PixelBuffer {
        let mut buf = PixelBuffer::new(3, 2);
        let mut v = 0u8;
        for row in 0..2 {
            for col in 0..3 {
                buf.set_pixel(row, col, Rgba::new(v, 255 - v, v / 2, 255));
                v += 40;
            }
        }
        buf
    }

    #[test]
    fn test_integer_coordinates_are_exact() {
        let buf = checker();
        for (row, col, px) in buf.pixels() {
            assert_eq!(sample_bilinear(&buf, col as f64, row as f64), px);
        }
    }

    #[test]
    fn test_edge_clamping() {
        let buf = checker();
        assert_eq!(sample_bilinear(&buf, -3.7, 0.0), buf.pixel(0, 0));
        assert_eq!(sample_bilinear(&buf, 10.2, 1.0), buf.pixel(1, 2));
        assert_eq!(sample_bilinear(&buf, 2.0, -0.5), buf.pixel(0, 2));
        assert_eq!(sample_bilinear(&buf, 0.0, 7.25), buf.pixel(1, 0));
        assert_eq!(sample_bilinear(&buf, -1e9, 1e9), buf.pixel(1, 0));
    }

    #[test]
    fn test_horizontal_midpoint() {
        let mut buf = PixelBuffer::new(2, 1);
        buf.set_pixel(0, 0, Rgba::new(0, 100, 255, 255));
        buf.set_pixel(0, 1, Rgba::new(100, 0, 255, 255));
        // Single row: both row taps clamp to row 0.
        assert_eq!(sample_bilinear(&buf, 0.5, 0.0), Rgba::new(50, 50, 255, 255));
    }

    #[test]
    fn test_corner_weights() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.set_pixel(0, 1, Rgba::new(200, 0, 0, 255));
        buf.set_pixel(1, 0, Rgba::new(0, 200, 0, 255));
        // (row0, col1) weighs (x - col0) * (row1 - y) = 0.5 * 0.75.
        // (row1, col0) weighs (col1 - x) * (y - row0) = 0.5 * 0.25.
        let px = sample_bilinear(&buf, 0.5, 0.25);
        assert_eq!(px.r, 75);
        assert_eq!(px.g, 25);
        assert_eq!(px.b, 0);
    }

    #[test]
    fn test_center_of_four() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.set_pixel(0, 0, Rgba::gray(0));
        buf.set_pixel(0, 1, Rgba::gray(100));
        buf.set_pixel(1, 0, Rgba::gray(200));
        buf.set_pixel(1, 1, Rgba::gray(104));
        assert_eq!(sample_bilinear(&buf, 0.5, 0.5), Rgba::gray(101));
    }

    #[test]
    fn test_output_is_bounded() {
        let buf = checker();
        let mut y = -2.0;
        while y < 4.0 {
            let mut x = -2.0;
            while x < 5.0 {
                // Channels are u8; the point is that nothing panics or wraps.
                let px = sample_bilinear(&buf, x, y);
                assert_eq!(px.a, 255);
                x += 0.37;
            }
            y += 0.41;
        }
    }

    #[test]
    fn test_nan_coordinates_do_not_panic() {
        let buf = checker();
        let _ = sample_bilinear(&buf, f64::NAN, 0.5);
    }
}
