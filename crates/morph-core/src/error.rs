//! Error types for morph-core operations.
//!
//! The [`Error`] enum covers the failure modes of the core types:
//! - Pixel ingestion (unsupported channel layouts, short buffers)
//! - Guide point pairing (odd or mismatched point counts)
//! - Parameter validation
//! - Capture session misuse
//!
//! # Usage
//!
//! ```rust
//! use morph_core::{Error, PixelBuffer};
//!
//! let err = PixelBuffer::ingest(1, 1, &[0, 0], 2).unwrap_err();
//! assert!(matches!(err, Error::UnsupportedChannelCount { channels: 2 }));
//! ```
//!
//! # Used By
//!
//! - [`crate::buffer::PixelBuffer`] - Ingestion
//! - [`crate::line::LineSet`] - Point pairing
//! - `morph-ops` / `morph-io` - wrapped into their own error enums

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the core morphing types.
///
/// # Categories
///
/// - **Ingestion**: [`UnsupportedChannelCount`](Error::UnsupportedChannelCount),
///   [`BufferSizeMismatch`](Error::BufferSizeMismatch)
/// - **Geometry**: [`InvalidDimensions`](Error::InvalidDimensions)
/// - **Configuration**: [`OddPointCount`](Error::OddPointCount),
///   [`PointCountMismatch`](Error::PointCountMismatch),
///   [`InvalidParameter`](Error::InvalidParameter)
/// - **Capture**: [`StageIncomplete`](Error::StageIncomplete)
#[derive(Debug, Error)]
pub enum Error {
    /// Raw pixel data has a channel count other than 1, 3 or 4.
    #[error("unsupported channel count: {channels} (expected 1, 3 or 4)")]
    UnsupportedChannelCount {
        /// Channel count that was supplied
        channels: usize,
    },

    /// Raw pixel data does not hold `width * height * channels` bytes.
    #[error("buffer size mismatch: expected {expected} bytes, got {got}")]
    BufferSizeMismatch {
        /// Byte count implied by the dimensions
        expected: usize,
        /// Byte count supplied
        got: usize,
    },

    /// Image dimensions overflow the addressable buffer size.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// A flat point sequence cannot be split into lines.
    #[error("{which} guide points: odd count {count}, points pair up into lines")]
    OddPointCount {
        /// Which sequence (`source` or `destination`)
        which: &'static str,
        /// Number of points supplied
        count: usize,
    },

    /// Source and destination point sequences differ in length.
    #[error("guide point count mismatch: source has {source_count}, destination has {dest_count}")]
    PointCountMismatch {
        /// Number of source points
        source_count: usize,
        /// Number of destination points
        dest_count: usize,
    },

    /// A morph parameter is out of range.
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Lines were requested from a capture session that is not finished.
    #[error("capture session is still in stage {stage}")]
    StageIncomplete {
        /// Current stage name
        stage: &'static str,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors that describe bad run configuration
    /// (line counts, parameters) rather than bad pixel data.
    #[inline]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::OddPointCount { .. }
                | Self::PointCountMismatch { .. }
                | Self::InvalidParameter { .. }
                | Self::StageIncomplete { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_channel_count_message() {
        let err = Error::UnsupportedChannelCount { channels: 2 };
        assert!(err.to_string().contains('2'));
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn test_point_count_mismatch() {
        let err = Error::PointCountMismatch {
            source_count: 4,
            dest_count: 6,
        };
        let msg = err.to_string();
        assert!(msg.contains('4'));
        assert!(msg.contains('6'));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_invalid_dimensions() {
        let err = Error::invalid_dimensions(100, 200, "overflow");
        assert!(err.to_string().contains("100x200"));
    }
}
