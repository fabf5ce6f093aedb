//! Line-field weighting parameters.
//!
//! Each guide line's influence on a pixel is
//!
//! ```text
//! weight = (length^p / (a + dist))^b
//! ```
//!
//! - `a` softens the distance term so pixels on a line do not blow up
//! - `b` sets how quickly influence falls off with distance
//! - `p` sets how strongly longer lines dominate shorter ones

use crate::{Error, Result};
use std::fmt;

/// The `a`, `b`, `p` knobs of the Beier-Neely weighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphParams {
    /// Distance softening, `>= 0`
    pub a: f64,
    /// Distance falloff exponent
    pub b: f64,
    /// Length dominance exponent
    pub p: f64,
}

impl MorphParams {
    /// Creates validated parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if any value is not finite or
    /// `a` is negative.
    ///
    /// # Example
    ///
    /// ```rust
    /// use morph_core::MorphParams;
    ///
    /// let params = MorphParams::new(0.1, 2.0, 0.0).unwrap();
    /// assert_eq!(params.b, 2.0);
    /// assert!(MorphParams::new(-1.0, 2.0, 0.0).is_err());
    /// ```
    pub fn new(a: f64, b: f64, p: f64) -> Result<Self> {
        let params = Self { a, b, p };
        params.validate()?;
        Ok(params)
    }

    /// Checks the invariants of [`new`](Self::new) on an existing value.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("a", self.a), ("b", self.b), ("p", self.p)] {
            if !value.is_finite() {
                return Err(Error::InvalidParameter {
                    name,
                    value,
                    reason: "must be finite",
                });
            }
        }
        if self.a < 0.0 {
            return Err(Error::InvalidParameter {
                name: "a",
                value: self.a,
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}

impl fmt::Display for MorphParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a={} b={} p={}", self.a, self.b, self.p)
    }
}
