//! Single-frame morph.
//!
//! For every output pixel the frame is built from two inverse warps (one
//! into the source image, one into the destination image), two bilinear
//! samples and one cross-dissolve.
//!
//! When the `parallel` feature is enabled, rows are rendered with rayon.

use crate::blend::blend_pixel;
use crate::field::map_point;
use crate::resample::sample_bilinear;
use crate::{OpsError, OpsResult};
use morph_core::{DVec2, GuideLine, LineSet, MorphParams, PixelBuffer};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Validated, read-only inputs shared by every frame of a morph.
#[derive(Debug, Clone, Copy)]
pub struct MorphInputs<'a> {
    source: &'a PixelBuffer,
    dest: &'a PixelBuffer,
    lines: &'a LineSet,
    params: MorphParams,
}

impl<'a> MorphInputs<'a> {
    /// Checks that the inputs can be morphed at all.
    ///
    /// # Errors
    ///
    /// - [`OpsError::SizeMismatch`] if the images differ in size
    /// - [`OpsError::LineCountMismatch`] if there are no guide lines
    /// - [`OpsError::InvalidParameter`] if `params` fails validation
    pub fn new(
        source: &'a PixelBuffer,
        dest: &'a PixelBuffer,
        lines: &'a LineSet,
        params: MorphParams,
    ) -> OpsResult<Self> {
        if source.dimensions() != dest.dimensions() {
            return Err(OpsError::SizeMismatch {
                source_width: source.width(),
                source_height: source.height(),
                dest_width: dest.width(),
                dest_height: dest.height(),
            });
        }
        if lines.source().len() != lines.dest().len() {
            return Err(OpsError::LineCountMismatch(format!(
                "{} source lines, {} destination lines",
                lines.source().len(),
                lines.dest().len()
            )));
        }
        if lines.is_empty() {
            return Err(OpsError::LineCountMismatch("no guide lines".into()));
        }
        params
            .validate()
            .map_err(|e| OpsError::InvalidParameter(e.to_string()))?;

        debug!(
            width = source.width(),
            height = source.height(),
            lines = lines.len(),
            %params,
            "morph inputs ready"
        );
        Ok(Self {
            source,
            dest,
            lines,
            params,
        })
    }

    /// Source image.
    #[inline]
    pub fn source(&self) -> &'a PixelBuffer {
        self.source
    }

    /// Destination image.
    #[inline]
    pub fn dest(&self) -> &'a PixelBuffer {
        self.dest
    }

    /// Guide line correspondences.
    #[inline]
    pub fn lines(&self) -> &'a LineSet {
        self.lines
    }

    /// Weighting parameters.
    #[inline]
    pub fn params(&self) -> &MorphParams {
        &self.params
    }

    /// Output `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.source.dimensions()
    }
}

/// Renders one frame for blend fraction `alpha`.
///
/// `inter_lines` is the in-between geometry for `alpha`, usually from
/// [`interpolate_lines`](crate::interpolate_lines). Output pixel
/// `(col, row)` is mapped into both images with [`map_point`], sampled
/// with [`sample_bilinear`] and mixed with [`blend_pixel`].
///
/// # Errors
///
/// - [`OpsError::LineCountMismatch`] if `inter_lines` has the wrong length
/// - [`OpsError::NoInfluenceLines`] for a pixel no line reaches; the rest
///   of the frame is abandoned. With rows rendered in parallel, which
///   failing pixel gets reported is not deterministic.
pub fn morph_frame(
    inputs: &MorphInputs<'_>,
    inter_lines: &[GuideLine],
    alpha: f64,
) -> OpsResult<PixelBuffer> {
    let (width, height) = inputs.dimensions();
    trace!(width, height, alpha, "morph_frame");

    if inter_lines.len() != inputs.lines.len() {
        return Err(OpsError::LineCountMismatch(format!(
            "{} guide lines, {} intermediate lines",
            inputs.lines.len(),
            inter_lines.len()
        )));
    }

    let mut out = PixelBuffer::new(width, height);
    let stride = out.row_stride();
    if stride == 0 || height == 0 {
        return Ok(out);
    }

    render_rows(out.data_mut(), stride, |row, chunk| {
        render_row(inputs, inter_lines, alpha, row, chunk)
    })?;

    Ok(out)
}

#[cfg(feature = "parallel")]
fn render_rows<F>(data: &mut [u8], stride: usize, render: F) -> OpsResult<()>
where
    F: Fn(u32, &mut [u8]) -> OpsResult<()> + Sync,
{
    data.par_chunks_mut(stride)
        .enumerate()
        .try_for_each(|(row, chunk)| render(row as u32, chunk))
}

#[cfg(not(feature = "parallel"))]
fn render_rows<F>(data: &mut [u8], stride: usize, render: F) -> OpsResult<()>
where
    F: Fn(u32, &mut [u8]) -> OpsResult<()>,
{
    data.chunks_mut(stride)
        .enumerate()
        .try_for_each(|(row, chunk)| render(row as u32, chunk))
}

fn render_row(
    inputs: &MorphInputs<'_>,
    inter_lines: &[GuideLine],
    alpha: f64,
    row: u32,
    chunk: &mut [u8],
) -> OpsResult<()> {
    let params = &inputs.params;
    for (col, out) in chunk.chunks_exact_mut(4).enumerate() {
        let pixel = DVec2::new(col as f64, f64::from(row));

        let src_pt = map_point(pixel, inputs.lines.source(), inter_lines, params)?;
        let dst_pt = map_point(pixel, inputs.lines.dest(), inter_lines, params)?;

        let from_source = sample_bilinear(inputs.source, src_pt.x, src_pt.y);
        let from_dest = sample_bilinear(inputs.dest, dst_pt.x, dst_pt.y);

        out.copy_from_slice(&blend_pixel(from_source, from_dest, alpha).to_array());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolate_lines;
    use morph_core::Rgba;

    fn gradient(width: u32, height: u32, seed: u8) -> PixelBuffer {
        let mut buf = PixelBuffer::new(width, height);
        for row in 0..height {
            for col in 0..width {
                let v = (row * 31 + col * 17) as u8;
                buf.set_pixel(row, col, Rgba::new(v, v.wrapping_add(seed), 255 - v, 255));
            }
        }
        buf
    }

    // A single horizontal line with power-of-two length maps every
    // integer pixel onto itself without rounding.
    fn axis_lines() -> LineSet {
        let pts = [DVec2::new(0.0, 0.0), DVec2::new(4.0, 0.0)];
        LineSet::from_points(&pts, &pts).unwrap()
    }

    fn params() -> MorphParams {
        MorphParams::new(0.1, 2.0, 0.0).unwrap()
    }

    #[test]
    fn test_alpha_one_reproduces_source() {
        let src = gradient(6, 5, 3);
        let dst = gradient(6, 5, 90).flip_vertical();
        let lines = axis_lines();
        let inputs = MorphInputs::new(&src, &dst, &lines, params()).unwrap();
        let inter = interpolate_lines(lines.source(), lines.dest(), 1.0);
        assert_eq!(morph_frame(&inputs, &inter, 1.0).unwrap(), src);
    }

    #[test]
    fn test_alpha_zero_reproduces_dest() {
        let src = gradient(6, 5, 3);
        let dst = gradient(6, 5, 90).flip_vertical();
        let lines = axis_lines();
        let inputs = MorphInputs::new(&src, &dst, &lines, params()).unwrap();
        let inter = interpolate_lines(lines.source(), lines.dest(), 0.0);
        assert_eq!(morph_frame(&inputs, &inter, 0.0).unwrap(), dst);
    }

    #[test]
    fn test_translation_shifts_content() {
        // Destination line sits one column right of the source line. With
        // destination geometry and a blend that keeps only the source, the
        // output is the source shifted one column right.
        let src = gradient(5, 3, 0);
        let dst = PixelBuffer::new(5, 3);
        let lines = LineSet::from_points(
            &[DVec2::new(0.0, 0.0), DVec2::new(0.0, 4.0)],
            &[DVec2::new(1.0, 0.0), DVec2::new(1.0, 4.0)],
        )
        .unwrap();
        let inputs = MorphInputs::new(&src, &dst, &lines, params()).unwrap();
        let inter = interpolate_lines(lines.source(), lines.dest(), 0.0);
        let frame = morph_frame(&inputs, &inter, 1.0).unwrap();
        for row in 0..3 {
            for col in 1..5 {
                assert_eq!(frame.pixel(row, col), src.pixel(row, col - 1));
            }
            assert_eq!(frame.pixel(row, 0), src.pixel(row, 0));
        }
    }

    #[test]
    fn test_size_mismatch() {
        let src = PixelBuffer::new(4, 4);
        let dst = PixelBuffer::new(4, 5);
        let lines = axis_lines();
        let err = MorphInputs::new(&src, &dst, &lines, params()).unwrap_err();
        assert!(matches!(
            err,
            OpsError::SizeMismatch {
                source_height: 4,
                dest_height: 5,
                ..
            }
        ));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_empty_lines_rejected() {
        let src = PixelBuffer::new(2, 2);
        let lines = LineSet::default();
        let err = MorphInputs::new(&src, &src, &lines, params()).unwrap_err();
        assert!(matches!(err, OpsError::LineCountMismatch(_)));
    }

    #[test]
    fn test_bad_params_rejected() {
        let src = PixelBuffer::new(2, 2);
        let lines = axis_lines();
        let bad = MorphParams {
            a: -1.0,
            b: 2.0,
            p: 0.0,
        };
        let err = MorphInputs::new(&src, &src, &lines, bad).unwrap_err();
        assert!(matches!(err, OpsError::InvalidParameter(_)));
    }

    #[test]
    fn test_wrong_inter_length() {
        let src = PixelBuffer::new(2, 2);
        let lines = axis_lines();
        let inputs = MorphInputs::new(&src, &src, &lines, params()).unwrap();
        let err = morph_frame(&inputs, &[], 0.5).unwrap_err();
        assert!(matches!(err, OpsError::LineCountMismatch(_)));
    }

    #[test]
    fn test_no_influence_aborts_frame() {
        // a = 0 with b < 0 gives zero weight on the line itself.
        let src = PixelBuffer::new(4, 1);
        let lines = axis_lines();
        let p = MorphParams::new(0.0, -1.0, 0.0).unwrap();
        let inputs = MorphInputs::new(&src, &src, &lines, p).unwrap();
        let inter = interpolate_lines(lines.source(), lines.dest(), 0.5);
        let err = morph_frame(&inputs, &inter, 0.5).unwrap_err();
        assert!(matches!(err, OpsError::NoInfluenceLines { .. }));
    }
}
