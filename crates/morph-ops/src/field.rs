//! Feature-line warp field.
//!
//! Maps a pixel in intermediate line space back into an input image by
//! letting every guide line pull on it. For line `i` with intermediate
//! segment `P -> Q` and source segment `P' -> Q'`:
//!
//! ```text
//! u = dot(pixel - P, Q - P) / |Q - P|^2      position along the line
//! v = cross(pixel - P, Q - P) / |Q - P|      signed perpendicular offset
//! X = P'.x + u * pq'.x + v * pq'.y / |pq'|
//! Y = P'.y + u * pq'.y - v * pq'.x / |pq'|
//! weight = (|Q - P|^p / (a + dist))^b
//! ```
//!
//! `dist` is the distance from the pixel to the segment: to `P` before it,
//! to `Q` past it, `|v|` alongside. The mapped point is the weighted mean
//! of the per-line `(X, Y)`.

use crate::{OpsError, OpsResult};
use morph_core::{DVec2, GuideLine, MorphParams};
use tracing::trace;

/// Maps `pixel` from intermediate line space into source line space.
///
/// `source_lines[i]` and `inter_lines[i]` must describe the same feature.
/// Lines that are zero-length in either space are skipped. If a line's
/// weight is infinite (`a == 0` with the pixel on the segment) that line
/// alone decides the result.
///
/// # Errors
///
/// - [`OpsError::LineCountMismatch`] if the slices differ in length
/// - [`OpsError::NoInfluenceLines`] if no line contributes a positive,
///   finite weight, which includes the empty case
///
/// # Example
///
/// ```rust
/// use morph_core::{DVec2, GuideLine, MorphParams};
/// use morph_ops::map_point;
///
/// let params = MorphParams::new(0.5, 2.0, 0.0).unwrap();
/// let src = [GuideLine::from_coords(0.0, 0.0, 10.0, 0.0)];
/// // The intermediate line is the source line shifted down by 3.
/// let inter = [GuideLine::from_coords(0.0, 3.0, 10.0, 3.0)];
///
/// let mapped = map_point(DVec2::new(4.0, 5.0), &src, &inter, &params).unwrap();
/// assert!((mapped - DVec2::new(4.0, 2.0)).length() < 1e-9);
/// ```
pub fn map_point(
    pixel: DVec2,
    source_lines: &[GuideLine],
    inter_lines: &[GuideLine],
    params: &MorphParams,
) -> OpsResult<DVec2> {
    if source_lines.len() != inter_lines.len() {
        return Err(OpsError::LineCountMismatch(format!(
            "{} source lines, {} intermediate lines",
            source_lines.len(),
            inter_lines.len()
        )));
    }

    // Running weighted mean: exact whenever every line maps to the same point.
    let mut mean = DVec2::ZERO;
    let mut weight_sum = 0.0;

    for (src, inter) in source_lines.iter().zip(inter_lines) {
        let pq = inter.direction();
        let inter_len = pq.length();
        let pq_src = src.direction();
        let src_len = pq_src.length();
        if inter_len == 0.0 || src_len == 0.0 {
            continue;
        }

        let pd = pixel - inter.p;
        let u = pd.dot(pq) / (inter_len * inter_len);
        let v = pd.perp_dot(pq) / inter_len;

        let mapped = DVec2::new(
            src.p.x + u * pq_src.x + v * pq_src.y / src_len,
            src.p.y + u * pq_src.y - v * pq_src.x / src_len,
        );

        let dist = if u < 0.0 {
            pd.length()
        } else if u > 1.0 {
            (pixel - inter.q).length()
        } else {
            v.abs()
        };

        let weight = (inter_len.powf(params.p) / (params.a + dist)).powf(params.b);
        if weight == f64::INFINITY {
            if mapped.is_finite() {
                return Ok(mapped);
            }
            continue;
        }
        if !(weight > 0.0 && weight.is_finite()) {
            continue;
        }

        weight_sum += weight;
        mean += (mapped - mean) * (weight / weight_sum);
    }

    if !(weight_sum > 0.0 && weight_sum.is_finite()) || !mean.is_finite() {
        trace!(x = pixel.x, y = pixel.y, weight_sum, "pixel has no influence lines");
        return Err(OpsError::NoInfluenceLines {
            x: pixel.x,
            y: pixel.y,
        });
    }
    Ok(mean)
}
