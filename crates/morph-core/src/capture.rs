//! Staged collection of guide points.
//!
//! A [`CaptureSession`] replaces pointer and keyboard callbacks mutating
//! shared point lists. The front end feeds it points and stage changes;
//! the morphing code only sees the finished [`LineSet`].
//!
//! ```text
//! CapturingSource --advance--> CapturingDestination --advance--> Ready
//! ```
//!
//! # Example
//!
//! ```rust
//! use morph_core::{CaptureSession, CaptureStage};
//!
//! let mut session = CaptureSession::new();
//! session.record_point(10.0, 10.0);
//! session.record_point(20.0, 10.0);
//! session.advance_stage();
//! session.record_point(12.0, 11.0);
//! session.record_point(22.0, 11.0);
//! session.advance_stage();
//!
//! assert_eq!(session.stage(), CaptureStage::Ready);
//! let lines = session.into_line_set().unwrap();
//! assert_eq!(lines.len(), 1);
//! ```

use crate::{Error, LineSet, Result};
use glam::DVec2;
use std::fmt;
use tracing::{debug, trace};

/// Where a capture session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureStage {
    /// Points go to the source image.
    #[default]
    CapturingSource,
    /// Points go to the destination image.
    CapturingDestination,
    /// Both images are done; no more points are accepted.
    Ready,
}

impl CaptureStage {
    /// Short stage name for messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::CapturingSource => "capturing-source",
            Self::CapturingDestination => "capturing-destination",
            Self::Ready => "ready",
        }
    }
}

impl fmt::Display for CaptureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What happened to a recorded point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Appended to the source list, which now holds this many points.
    Source(usize),
    /// Appended to the destination list, which now holds this many points.
    Destination(usize),
    /// Dropped because the session is already [`CaptureStage::Ready`].
    Rejected,
}

/// Interactive guide-point capture state.
#[derive(Debug, Clone, Default)]
pub struct CaptureSession {
    stage: CaptureStage,
    source: Vec<DVec2>,
    dest: Vec<DVec2>,
}

impl CaptureSession {
    /// Starts a session in [`CaptureStage::CapturingSource`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stage.
    #[inline]
    pub fn stage(&self) -> CaptureStage {
        self.stage
    }

    /// Points recorded on the source image so far.
    #[inline]
    pub fn source_points(&self) -> &[DVec2] {
        &self.source
    }

    /// Points recorded on the destination image so far.
    #[inline]
    pub fn dest_points(&self) -> &[DVec2] {
        &self.dest
    }

    /// Records a point for the current stage.
    pub fn record_point(&mut self, x: f64, y: f64) -> RecordOutcome {
        let point = DVec2::new(x, y);
        let outcome = match self.stage {
            CaptureStage::CapturingSource => {
                self.source.push(point);
                RecordOutcome::Source(self.source.len())
            }
            CaptureStage::CapturingDestination => {
                self.dest.push(point);
                RecordOutcome::Destination(self.dest.len())
            }
            CaptureStage::Ready => RecordOutcome::Rejected,
        };
        trace!(x, y, ?outcome, "capture point");
        outcome
    }

    /// Moves to the next stage and returns it. Stays put once ready.
    pub fn advance_stage(&mut self) -> CaptureStage {
        self.stage = match self.stage {
            CaptureStage::CapturingSource => CaptureStage::CapturingDestination,
            CaptureStage::CapturingDestination | CaptureStage::Ready => CaptureStage::Ready,
        };
        debug!(
            stage = %self.stage,
            source = self.source.len(),
            dest = self.dest.len(),
            "capture stage advanced"
        );
        self.stage
    }

    /// Returns `true` once both point lists are final.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.stage == CaptureStage::Ready
    }

    /// Pairs the recorded points into lines.
    ///
    /// # Errors
    ///
    /// - [`Error::StageIncomplete`] unless the session is ready
    /// - the pairing errors of [`LineSet::from_points`]
    pub fn into_line_set(self) -> Result<LineSet> {
        if !self.is_ready() {
            return Err(Error::StageIncomplete {
                stage: self.stage.name(),
            });
        }
        LineSet::from_points(&self.source, &self.dest)
    }
}
