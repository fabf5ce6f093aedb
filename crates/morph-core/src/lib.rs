//! # morph-core
//!
//! Core types for feature-line guided image morphing.
//!
//! This crate provides the foundational types used by the rest of the
//! workspace:
//!
//! - [`PixelBuffer`] - Owned RGBA8 image buffer, row-major, row 0 on top
//! - [`Rgba`] - A single 8-bit-per-channel color sample
//! - [`GuideLine`], [`LineSet`] - Directed feature lines and their correspondences
//! - [`MorphParams`] - The `a`, `b`, `p` weighting knobs of the line field
//! - [`CaptureSession`] - Staged collection of guide points
//!
//! ## Crate Structure
//!
//! ```text
//! morph-core (this crate)
//!    ^
//!    |
//!    +-- morph-ops (resampling, warp field, frame morph)
//!    +-- morph-io (image files, point files, parameter files)
//!    +-- morph-cli
//! ```
//!
//! Points are [`glam::DVec2`]; all geometry runs in double precision.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod capture;
pub mod error;
pub mod line;
pub mod params;
pub mod pixel;

pub use buffer::PixelBuffer;
pub use capture::{CaptureSession, CaptureStage, RecordOutcome};
pub use error::{Error, Result};
pub use line::{GuideLine, LineSet};
pub use params::MorphParams;
pub use pixel::Rgba;

pub use glam::DVec2;

/// Prelude module for convenient imports.
///
/// ```
/// use morph_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::PixelBuffer;
    pub use crate::capture::{CaptureSession, CaptureStage};
    pub use crate::error::{Error, Result};
    pub use crate::line::{GuideLine, LineSet};
    pub use crate::params::MorphParams;
    pub use crate::pixel::Rgba;
    pub use glam::DVec2;
}
