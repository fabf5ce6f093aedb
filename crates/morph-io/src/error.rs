//! Error types for I/O operations.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported or unrecognized image format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Malformed point or parameter file.
    #[error("parse error: {0}")]
    Parse(String),

    /// Decoded pixels could not be normalized.
    #[error(transparent)]
    Core(#[from] morph_core::Error),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
