//! Morph parameter files.
//!
//! Whitespace-separated `a b p`. A file with only `a b` leaves `p` at 0.
//! Anything after the third value is ignored.

use crate::{IoError, IoResult};
use morph_core::MorphParams;
use std::path::Path;
use tracing::debug;

/// Reads and validates parameters from `path`.
///
/// # Errors
///
/// - [`IoError::Io`] if the file cannot be read
/// - [`IoError::Parse`] with fewer than two values or a non-numeric one
/// - [`IoError::Core`] if the values fail [`MorphParams::validate`]
pub fn read_params<P: AsRef<Path>>(path: P) -> IoResult<MorphParams> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let params = parse_params(&text)
        .map_err(|msg| IoError::Parse(format!("{}: {msg}", path.display())))?;
    params.validate()?;
    debug!(path = %path.display(), %params, "read morph parameters");
    Ok(params)
}

/// Parses `a b [p]` without validating the values.
pub fn parse_params(text: &str) -> Result<MorphParams, String> {
    let values = text
        .split_whitespace()
        .take(3)
        .zip(["a", "b", "p"])
        .map(|(token, name)| {
            token
                .parse::<f64>()
                .map_err(|_| format!("{name} ({token:?}) is not a number"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match values[..] {
        [a, b] => Ok(MorphParams { a, b, p: 0.0 }),
        [a, b, p] => Ok(MorphParams { a, b, p }),
        _ => Err(format!("expected `a b [p]`, found {} value(s)", values.len())),
    }
}

/// Writes parameters as a single `a b p` line.
pub fn write_params<P: AsRef<Path>>(path: P, params: &MorphParams) -> IoResult<()> {
    std::fs::write(path, format!("{} {} {}\n", params.a, params.b, params.p))?;
    Ok(())
}
