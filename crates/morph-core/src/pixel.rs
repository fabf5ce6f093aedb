//! RGBA color sample.
//!
//! Every buffer in the workspace stores four 8-bit channels per pixel, so a
//! single concrete [`Rgba`] type is enough. Channel order is R, G, B, A both
//! in memory and for [`Index`] access.

use std::fmt;
use std::ops::{Index, IndexMut};

/// Number of channels stored per pixel.
pub const CHANNELS: usize = 4;

/// One RGBA8 color sample.
///
/// The default value is opaque black, matching freshly decoded pixels that
/// carry no alpha of their own.
///
/// # Example
///
/// ```rust
/// use morph_core::Rgba;
///
/// let px = Rgba::new(10, 20, 30, 40);
/// assert_eq!(px[0], 10);
/// assert_eq!(px[3], 40);
/// assert_eq!(Rgba::default(), Rgba::opaque(0, 0, 0));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Rgba {
    /// Creates a sample from its four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a fully opaque sample.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Creates an opaque gray sample.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self::opaque(v, v, v)
    }

    /// Returns the channels as `[r, g, b, a]`.
    #[inline]
    pub const fn to_array(self) -> [u8; CHANNELS] {
        [self.r, self.g, self.b, self.a]
    }

    /// Builds a sample from `[r, g, b, a]`.
    #[inline]
    pub const fn from_array(arr: [u8; CHANNELS]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Builds a sample from the first four bytes of `bytes`.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than four.
    #[inline]
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::opaque(0, 0, 0)
    }
}

impl From<[u8; CHANNELS]> for Rgba {
    fn from(arr: [u8; CHANNELS]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Rgba> for [u8; CHANNELS] {
    fn from(px: Rgba) -> Self {
        px.to_array()
    }
}

impl Index<usize> for Rgba {
    type Output = u8;

    /// Channel access in `r, g, b, a` order.
    ///
    /// # Panics
    ///
    /// Panics if `c >= 4`.
    #[inline]
    fn index(&self, c: usize) -> &u8 {
        match c {
            0 => &self.r,
            1 => &self.g,
            2 => &self.b,
            3 => &self.a,
            _ => panic!("channel index {c} out of range for Rgba"),
        }
    }
}

impl IndexMut<usize> for Rgba {
    #[inline]
    fn index_mut(&mut self, c: usize) -> &mut u8 {
        match c {
            0 => &mut self.r,
            1 => &mut self.g,
            2 => &mut self.b,
            3 => &mut self.a,
            _ => panic!("channel index {c} out of range for Rgba"),
        }
    }
}

impl fmt::Debug for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}
