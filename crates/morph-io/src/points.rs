//! Guide point files.
//!
//! Plain text, one `x y` pair per line. Reading only cares about
//! whitespace-separated numbers, so any layout with an even count works.

use crate::{IoError, IoResult};
use morph_core::DVec2;
use std::fmt::Write as _;
use std::path::Path;
use tracing::debug;

/// Reads a flat point sequence from `path`.
///
/// # Errors
///
/// - [`IoError::Io`] if the file cannot be read
/// - [`IoError::Parse`] on a token that is not a number, or an odd count
pub fn read_points<P: AsRef<Path>>(path: P) -> IoResult<Vec<DVec2>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let points = parse_points(&text)
        .map_err(|msg| IoError::Parse(format!("{}: {msg}", path.display())))?;
    debug!(path = %path.display(), points = points.len(), "read guide points");
    Ok(points)
}

/// Parses whitespace-separated coordinates into points.
pub fn parse_points(text: &str) -> Result<Vec<DVec2>, String> {
    let values = text
        .split_whitespace()
        .enumerate()
        .map(|(i, token)| {
            token
                .parse::<f64>()
                .map_err(|_| format!("token {} ({token:?}) is not a number", i + 1))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() % 2 != 0 {
        return Err(format!("odd number of coordinates ({})", values.len()));
    }

    Ok(values
        .chunks_exact(2)
        .map(|xy| DVec2::new(xy[0], xy[1]))
        .collect())
}

/// Writes points to `path`, one `x y` line each.
pub fn write_points<P: AsRef<Path>>(path: P, points: &[DVec2]) -> IoResult<()> {
    let path = path.as_ref();
    let mut text = String::with_capacity(points.len() * 16);
    for p in points {
        // Infallible for String.
        let _ = writeln!(text, "{} {}", p.x, p.y);
    }
    std::fs::write(path, text)?;
    debug!(path = %path.display(), points = points.len(), "wrote guide points");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_pairs() {
        let pts = parse_points("1 2\n3.5 -4\n\n  10 20 ").unwrap();
        assert_eq!(
            pts,
            vec![DVec2::new(1.0, 2.0), DVec2::new(3.5, -4.0), DVec2::new(10.0, 20.0)]
        );
    }

    #[test]
    fn test_parse_fractional_and_exponent() {
        let pts = parse_points("0.1 2.5e-1\n-1e2 0.3333333333333333").unwrap();
        assert_eq!(pts.len(), 2);
        assert_relative_eq!(pts[0].x, 0.1);
        assert_relative_eq!(pts[0].y, 0.25);
        assert_relative_eq!(pts[1].x, -100.0);
        assert_relative_eq!(pts[1].y, 1.0 / 3.0, epsilon = 1e-15);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_points("").unwrap().is_empty());
        assert!(parse_points(" \n\t").unwrap().is_empty());
    }

    #[test]
    fn test_odd_count() {
        let err = parse_points("1 2 3").unwrap_err();
        assert!(err.contains("odd"));
    }

    #[test]
    fn test_bad_token() {
        let err = parse_points("1 2 x 4").unwrap_err();
        assert!(err.contains("token 3"));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.dat");
        let pts = vec![DVec2::new(12.0, 40.5), DVec2::new(0.1, 1e-3), DVec2::new(-3.0, 7.0)];
        write_points(&path, &pts[..2]).unwrap();
        assert_eq!(read_points(&path).unwrap(), pts[..2].to_vec());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "12 40.5\n0.1 0.001\n");
    }

    #[test]
    fn test_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.dat");
        std::fs::write(&path, "1 2 3").unwrap();
        match read_points(&path) {
            Err(IoError::Parse(msg)) => assert!(msg.contains("broken.dat")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(read_points("/nonexistent/none.dat"), Err(IoError::Io(_))));
    }
}
