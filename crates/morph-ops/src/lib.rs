//! # morph-ops
//!
//! Feature-line guided morphing (Beier-Neely field morphing).
//!
//! # Modules
//!
//! - [`resample`] - Edge-clamped bilinear sampling
//! - [`field`] - Weighted multi-line inverse mapping
//! - [`interpolate`] - In-between guide line geometry
//! - [`blend`] - Per-pixel cross-dissolve
//! - [`morph`] - One output frame: two warps, two samples, one blend
//! - [`sequence`] - Frame loop driving a [`FrameSink`]
//!
//! # Example
//!
//! ```rust
//! use morph_core::{DVec2, LineSet, MorphParams, PixelBuffer, Rgba};
//! use morph_ops::{MorphInputs, MorphSequence};
//!
//! let source = PixelBuffer::filled(8, 8, Rgba::opaque(255, 0, 0));
//! let dest = PixelBuffer::filled(8, 8, Rgba::opaque(0, 0, 255));
//! let pts = [DVec2::new(1.0, 1.0), DVec2::new(6.0, 6.0)];
//! let lines = LineSet::from_points(&pts, &pts).unwrap();
//! let params = MorphParams::new(0.1, 2.0, 0.0).unwrap();
//!
//! let inputs = MorphInputs::new(&source, &dest, &lines, params).unwrap();
//! let mut frames = Vec::new();
//! MorphSequence::new(4)
//!     .run(&inputs, |_index: usize, _alpha: f64, frame: &PixelBuffer| {
//!         frames.push(frame.clone());
//!         Ok(())
//!     })
//!     .unwrap();
//! assert_eq!(frames.len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod blend;
pub mod field;
pub mod interpolate;
pub mod morph;
pub mod resample;
pub mod sequence;

pub use error::{BoxError, OpsError, OpsResult};
pub use field::map_point;
pub use interpolate::{interpolate_lines, interpolate_lines_into};
pub use morph::{morph_frame, MorphInputs};
pub use blend::blend_pixel;
pub use resample::sample_bilinear;
pub use sequence::{FrameSink, MorphSequence, SequenceReport};
