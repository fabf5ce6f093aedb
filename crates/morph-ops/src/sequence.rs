//! Frame loop for a full morph.
//!
//! Frame `i` of `n` uses `alpha = i / n`, so the first frame is the
//! destination geometry and colors, and the sequence stops one step short
//! of the source. Each frame is handed to a [`FrameSink`] and dropped.
//!
//! A cancel flag is polled between frames only; a frame that has started
//! always finishes.

use crate::error::BoxError;
use crate::interpolate::interpolate_lines_into;
use crate::morph::{morph_frame, MorphInputs};
use crate::{OpsError, OpsResult};
use morph_core::PixelBuffer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Receives finished frames.
///
/// Implemented for any `FnMut(usize, f64, &PixelBuffer) -> Result<(), BoxError>`.
pub trait FrameSink {
    /// Takes frame `index`, rendered at blend fraction `alpha`.
    fn emit(&mut self, index: usize, alpha: f64, frame: &PixelBuffer) -> Result<(), BoxError>;
}

impl<F> FrameSink for F
where
    F: FnMut(usize, f64, &PixelBuffer) -> Result<(), BoxError>,
{
    fn emit(&mut self, index: usize, alpha: f64, frame: &PixelBuffer) -> Result<(), BoxError> {
        self(index, alpha, frame)
    }
}

/// Outcome of [`MorphSequence::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceReport {
    /// Frames accepted by the sink.
    pub frames_written: usize,
    /// `true` if the cancel flag stopped the run early.
    pub cancelled: bool,
    /// Wall time of the run.
    pub elapsed: Duration,
}

/// Drives [`morph_frame`] over a whole sequence.
#[derive(Debug, Clone)]
pub struct MorphSequence {
    frame_count: usize,
    cancel: Option<Arc<AtomicBool>>,
}

impl MorphSequence {
    /// Creates a sequence of `frame_count` frames.
    pub fn new(frame_count: usize) -> Self {
        Self {
            frame_count,
            cancel: None,
        }
    }

    /// Stops the run before the next frame once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Number of frames a full run produces.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Blend fraction of frame `index`.
    #[inline]
    pub fn alpha(&self, index: usize) -> f64 {
        index as f64 / self.frame_count as f64
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Renders every frame and passes it to `sink`.
    ///
    /// # Errors
    ///
    /// - [`OpsError::InvalidParameter`] if the frame count is zero
    /// - any error of [`morph_frame`], which ends the run
    /// - [`OpsError::Output`] if the sink rejects a frame
    pub fn run<F>(&self, inputs: &MorphInputs<'_>, mut sink: F) -> OpsResult<SequenceReport>
    where
        F: FnMut(usize, f64, &PixelBuffer) -> Result<(), BoxError>,
    {
        self.run_into(inputs, &mut sink)
    }

    /// Like [`run`](Self::run), for sinks that are not closures.
    pub fn run_into<S>(&self, inputs: &MorphInputs<'_>, sink: &mut S) -> OpsResult<SequenceReport>
    where
        S: FrameSink + ?Sized,
    {
        if self.frame_count == 0 {
            return Err(OpsError::InvalidParameter(
                "frame count must be at least 1".into(),
            ));
        }

        let lines = inputs.lines();
        let start = Instant::now();
        let mut inter = Vec::with_capacity(lines.len());
        let mut frames_written = 0;
        let mut cancelled = false;

        debug!(frames = self.frame_count, lines = lines.len(), "starting morph sequence");

        for index in 0..self.frame_count {
            if self.is_cancelled() {
                info!(frames_written, "morph cancelled");
                cancelled = true;
                break;
            }

            let alpha = self.alpha(index);
            interpolate_lines_into(lines.source(), lines.dest(), alpha, &mut inter);
            let frame = morph_frame(inputs, &inter, alpha)?;
            sink.emit(index, alpha, &frame)
                .map_err(|source| OpsError::Output { index, source })?;
            frames_written += 1;

            info!(
                frame = index + 1,
                total = self.frame_count,
                alpha,
                "frame rendered"
            );
        }

        Ok(SequenceReport {
            frames_written,
            cancelled,
            elapsed: start.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morph_core::{DVec2, LineSet, MorphParams, Rgba};

    fn setup() -> (PixelBuffer, PixelBuffer, LineSet) {
        let src = PixelBuffer::filled(4, 3, Rgba::gray(200));
        let dst = PixelBuffer::filled(4, 3, Rgba::gray(100));
        let pts = [DVec2::new(0.0, 0.0), DVec2::new(4.0, 0.0)];
        let lines = LineSet::from_points(&pts, &pts).unwrap();
        (src, dst, lines)
    }

    fn params() -> MorphParams {
        MorphParams::new(0.1, 2.0, 0.0).unwrap()
    }

    #[test]
    fn test_frames_and_alphas() {
        let (src, dst, lines) = setup();
        let inputs = MorphInputs::new(&src, &dst, &lines, params()).unwrap();

        let mut seen = Vec::new();
        let report = MorphSequence::new(4)
            .run(&inputs, |index: usize, alpha: f64, frame: &PixelBuffer| {
                seen.push((index, alpha, frame.pixel(1, 1)));
                Ok(())
            })
            .unwrap();

        assert_eq!(report.frames_written, 4);
        assert!(!report.cancelled);
        assert_eq!(
            seen,
            vec![
                (0, 0.0, Rgba::gray(100)),
                (1, 0.25, Rgba::gray(125)),
                (2, 0.5, Rgba::gray(150)),
                (3, 0.75, Rgba::gray(175)),
            ]
        );
    }

    #[test]
    fn test_alpha_schedule() {
        let seq = MorphSequence::new(5);
        assert_eq!(seq.frame_count(), 5);
        let alphas: Vec<f64> = (0..seq.frame_count()).map(|i| seq.alpha(i)).collect();
        assert_eq!(alphas, vec![0.0, 0.2, 0.4, 0.6, 0.8]);
    }

    #[test]
    fn test_zero_frames_rejected() {
        let (src, dst, lines) = setup();
        let inputs = MorphInputs::new(&src, &dst, &lines, params()).unwrap();
        let err = MorphSequence::new(0)
            .run(&inputs, |_: usize, _: f64, _: &PixelBuffer| Ok(()))
            .unwrap_err();
        assert!(matches!(err, OpsError::InvalidParameter(_)));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_cancel_between_frames() {
        let (src, dst, lines) = setup();
        let inputs = MorphInputs::new(&src, &dst, &lines, params()).unwrap();
        let flag = Arc::new(AtomicBool::new(false));

        let sink_flag = Arc::clone(&flag);
        let report = MorphSequence::new(10)
            .with_cancel_flag(Arc::clone(&flag))
            .run(&inputs, move |index: usize, _: f64, _: &PixelBuffer| {
                if index == 1 {
                    sink_flag.store(true, Ordering::Relaxed);
                }
                Ok(())
            })
            .unwrap();

        // The frame that raised the flag still completes.
        assert_eq!(report.frames_written, 2);
        assert!(report.cancelled);
    }

    #[test]
    fn test_sink_error_is_reported() {
        let (src, dst, lines) = setup();
        let inputs = MorphInputs::new(&src, &dst, &lines, params()).unwrap();
        let err = MorphSequence::new(3)
            .run(&inputs, |index: usize, _: f64, _: &PixelBuffer| {
                if index == 2 {
                    return Err("disk full".into());
                }
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, OpsError::Output { index: 2, .. }));
        assert!(err.to_string().contains("disk full"));
    }

    struct Collect(Vec<PixelBuffer>);

    impl FrameSink for Collect {
        fn emit(&mut self, _: usize, _: f64, frame: &PixelBuffer) -> Result<(), BoxError> {
            self.0.push(frame.clone());
            Ok(())
        }
    }

    #[test]
    fn test_run_into_struct_sink() {
        let (src, dst, lines) = setup();
        let inputs = MorphInputs::new(&src, &dst, &lines, params()).unwrap();
        let mut sink = Collect(Vec::new());
        let report = MorphSequence::new(2).run_into(&inputs, &mut sink).unwrap();
        assert_eq!(report.frames_written, 2);
        assert_eq!(sink.0[0], dst);
        assert_eq!(sink.0[1], PixelBuffer::filled(4, 3, Rgba::gray(150)));
    }
}
