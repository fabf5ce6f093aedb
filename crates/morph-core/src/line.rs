//! Directed guide lines and source/destination correspondences.
//!
//! A [`GuideLine`] runs from its tail `p` to its head `q`. Direction
//! matters: the warp field measures position along the line from `p` and
//! the signed perpendicular offset relative to `p -> q`.
//!
//! Guide points arrive as flat sequences (clicked or read from a file) and
//! pair up in input order: points `2k` and `2k + 1` form line `k`.
//!
//! ```rust
//! use morph_core::{DVec2, LineSet};
//!
//! let src = [DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0)];
//! let dst = [DVec2::new(0.0, 5.0), DVec2::new(10.0, 5.0)];
//! let lines = LineSet::from_points(&src, &dst).unwrap();
//! assert_eq!(lines.len(), 1);
//! ```

use crate::{Error, Result};
use glam::DVec2;

/// A directed line segment `p -> q`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GuideLine {
    /// Tail point
    pub p: DVec2,
    /// Head point
    pub q: DVec2,
}

impl GuideLine {
    /// Creates a line from tail `p` to head `q`.
    #[inline]
    pub const fn new(p: DVec2, q: DVec2) -> Self {
        Self { p, q }
    }

    /// Creates a line from raw coordinates.
    #[inline]
    pub fn from_coords(px: f64, py: f64, qx: f64, qy: f64) -> Self {
        Self::new(DVec2::new(px, py), DVec2::new(qx, qy))
    }

    /// Returns `q - p`.
    #[inline]
    pub fn direction(&self) -> DVec2 {
        self.q - self.p
    }

    /// Returns the segment length `|q - p|`.
    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().length()
    }

    /// Returns the same segment with tail and head swapped.
    #[inline]
    pub fn reversed(&self) -> Self {
        Self::new(self.q, self.p)
    }
}

/// Pairs a flat point sequence into lines, two points per line.
///
/// `which` names the sequence in the error message.
///
/// # Errors
///
/// Returns [`Error::OddPointCount`] if `points.len()` is odd.
pub fn pair_points(points: &[DVec2], which: &'static str) -> Result<Vec<GuideLine>> {
    if points.len() % 2 != 0 {
        return Err(Error::OddPointCount {
            which,
            count: points.len(),
        });
    }
    Ok(points
        .chunks_exact(2)
        .map(|pair| GuideLine::new(pair[0], pair[1]))
        .collect())
}

/// Flattens lines back to their point sequence (`p0, q0, p1, q1, ...`).
pub fn flatten_lines(lines: &[GuideLine]) -> Vec<DVec2> {
    lines.iter().flat_map(|l| [l.p, l.q]).collect()
}

/// Corresponding guide lines on the source and destination images.
///
/// Entry `i` of [`source`](Self::source) and [`dest`](Self::dest) mark the
/// same feature. Both sequences always have the same length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineSet {
    source: Vec<GuideLine>,
    dest: Vec<GuideLine>,
}

impl LineSet {
    /// Builds the correspondence set from two flat point sequences.
    ///
    /// # Errors
    ///
    /// - [`Error::PointCountMismatch`] if the sequences differ in length
    /// - [`Error::OddPointCount`] if either has an odd length
    pub fn from_points(source: &[DVec2], dest: &[DVec2]) -> Result<Self> {
        if source.len() != dest.len() {
            return Err(Error::PointCountMismatch {
                source_count: source.len(),
                dest_count: dest.len(),
            });
        }
        Ok(Self {
            source: pair_points(source, "source")?,
            dest: pair_points(dest, "destination")?,
        })
    }

    /// Builds the set from already paired lines.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PointCountMismatch`] (counted in points) if the two
    /// sequences differ in length.
    pub fn from_lines(source: Vec<GuideLine>, dest: Vec<GuideLine>) -> Result<Self> {
        if source.len() != dest.len() {
            return Err(Error::PointCountMismatch {
                source_count: source.len() * 2,
                dest_count: dest.len() * 2,
            });
        }
        Ok(Self { source, dest })
    }

    /// Lines drawn on the source image.
    #[inline]
    pub fn source(&self) -> &[GuideLine] {
        &self.source
    }

    /// Lines drawn on the destination image.
    #[inline]
    pub fn dest(&self) -> &[GuideLine] {
        &self.dest
    }

    /// Number of line pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Returns `true` if there are no line pairs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Source endpoints in file order.
    pub fn source_points(&self) -> Vec<DVec2> {
        flatten_lines(&self.source)
    }

    /// Destination endpoints in file order.
    pub fn dest_points(&self) -> Vec<DVec2> {
        flatten_lines(&self.dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pts(coords: &[(f64, f64)]) -> Vec<DVec2> {
        coords.iter().map(|&(x, y)| DVec2::new(x, y)).collect()
    }

    #[test]
    fn test_pairs_in_input_order() {
        let src = pts(&[(0.0, 0.0), (1.0, 0.0), (5.0, 5.0), (5.0, 9.0)]);
        let lines = pair_points(&src, "source").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], GuideLine::from_coords(0.0, 0.0, 1.0, 0.0));
        assert_eq!(lines[1], GuideLine::from_coords(5.0, 5.0, 5.0, 9.0));
    }

    #[test]
    fn test_odd_count_rejected() {
        let src = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 2.0)]);
        let err = LineSet::from_points(&src, &src).unwrap_err();
        assert!(matches!(err, Error::OddPointCount { which: "source", count: 3 }));
    }

    #[test]
    fn test_unequal_counts_rejected() {
        let src = pts(&[(0.0, 0.0), (1.0, 0.0)]);
        let dst = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let err = LineSet::from_points(&src, &dst).unwrap_err();
        assert!(matches!(
            err,
            Error::PointCountMismatch {
                source_count: 2,
                dest_count: 4
            }
        ));
    }

    #[test]
    fn test_flatten_round_trip() {
        let src = pts(&[(0.5, 1.5), (2.0, 3.0), (4.0, 4.0), (6.0, 1.0)]);
        let set = LineSet::from_points(&src, &src).unwrap();
        assert_eq!(set.source_points(), src);
        assert_eq!(set.dest_points(), src);
    }

    #[test]
    fn test_length_and_reverse() {
        let line = GuideLine::from_coords(1.0, 1.0, 4.0, 5.0);
        assert_relative_eq!(line.length(), 5.0);
        assert_eq!(line.reversed().direction(), -line.direction());
    }
}
