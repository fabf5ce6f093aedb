//! Error types for morph operations.

use thiserror::Error;

/// Boxed error returned by frame sinks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for morph operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Source and destination images differ in size.
    #[error("size mismatch: source is {source_width}x{source_height}, destination is {dest_width}x{dest_height}")]
    SizeMismatch {
        /// Source width
        source_width: u32,
        /// Source height
        source_height: u32,
        /// Destination width
        dest_width: u32,
        /// Destination height
        dest_height: u32,
    },

    /// Parallel line sequences have different lengths.
    #[error("line count mismatch: {0}")]
    LineCountMismatch(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// No guide line has any influence on a pixel.
    #[error("no influence lines for pixel ({x}, {y})")]
    NoInfluenceLines {
        /// Pixel x (column)
        x: f64,
        /// Pixel y (row)
        y: f64,
    },

    /// The frame sink failed to take a frame.
    #[error("failed to emit frame {index}: {source}")]
    Output {
        /// Frame index
        index: usize,
        /// Sink error
        #[source]
        source: BoxError,
    },

    /// Core type error.
    #[error(transparent)]
    Core(#[from] morph_core::Error),
}

impl OpsError {
    /// Returns `true` for failures detected before any frame is computed.
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Self::SizeMismatch { .. } | Self::LineCountMismatch(_) | Self::InvalidParameter(_) => {
                true
            }
            Self::Core(err) => err.is_configuration_error(),
            Self::NoInfluenceLines { .. } | Self::Output { .. } => false,
        }
    }
}

/// Result type for morph operations.
pub type OpsResult<T> = Result<T, OpsError>;
