//! In-between guide line geometry.

use morph_core::GuideLine;

/// Interpolates corresponding lines for blend fraction `alpha`.
///
/// Each endpoint is `(1 - alpha) * dest + alpha * source`, so `alpha == 1`
/// reproduces `source` and `alpha == 0` reproduces `dest` bit for bit.
/// Pairs are zipped; callers validate the lengths beforehand.
///
/// # Example
///
/// ```rust
/// use morph_core::GuideLine;
/// use morph_ops::interpolate_lines;
///
/// let src = [GuideLine::from_coords(0.0, 0.0, 10.0, 0.0)];
/// let dst = [GuideLine::from_coords(0.0, 4.0, 10.0, 8.0)];
/// let mid = interpolate_lines(&src, &dst, 0.5);
/// assert_eq!(mid[0], GuideLine::from_coords(0.0, 2.0, 10.0, 4.0));
/// ```
pub fn interpolate_lines(source: &[GuideLine], dest: &[GuideLine], alpha: f64) -> Vec<GuideLine> {
    let mut out = Vec::with_capacity(source.len().min(dest.len()));
    interpolate_lines_into(source, dest, alpha, &mut out);
    out
}

/// Like [`interpolate_lines`], but writes into `out`, reusing its storage.
pub fn interpolate_lines_into(
    source: &[GuideLine],
    dest: &[GuideLine],
    alpha: f64,
    out: &mut Vec<GuideLine>,
) {
    let keep = 1.0 - alpha;
    out.clear();
    out.extend(source.iter().zip(dest).map(|(s, d)| {
        GuideLine::new(keep * d.p + alpha * s.p, keep * d.q + alpha * s.q)
    }));
}
