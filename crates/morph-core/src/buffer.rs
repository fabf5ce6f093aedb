//! Owned RGBA8 pixel buffer.
//!
//! # Memory Layout
//!
//! Pixels are stored **row-major**, top-to-bottom, four bytes per pixel:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0 (top)
//!         [R G B A R G B A ...]  <- Row 1
//!         ...
//! ```
//!
//! The store is always exactly `4 * width * height` bytes, whatever the
//! channel count of the data it was ingested from.
//!
//! # Usage
//!
//! ```rust
//! use morph_core::{PixelBuffer, Rgba};
//!
//! let mut buf = PixelBuffer::new(4, 2);
//! buf.set_pixel(1, 3, Rgba::opaque(255, 0, 0));
//! assert_eq!(buf.pixel(1, 3), Rgba::opaque(255, 0, 0));
//!
//! // Display surfaces with a bottom-left origin want the rows reversed.
//! let flipped = buf.flip_vertical();
//! assert_eq!(flipped.pixel(0, 3), Rgba::opaque(255, 0, 0));
//! ```

use crate::pixel::CHANNELS;
use crate::{Error, Result, Rgba};

/// Owned RGBA8 image.
///
/// Indexing is `(row, col)`: `row` in `0..height`, `col` in `0..width`.
/// Out-of-range indices are a programming error and panic in every build.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Creates a zero-filled buffer.
    ///
    /// # Panics
    ///
    /// Panics if `4 * width * height` overflows `usize` or the allocation
    /// fails.
    ///
    /// # Example
    ///
    /// ```rust
    /// use morph_core::PixelBuffer;
    ///
    /// let buf = PixelBuffer::new(3, 2);
    /// assert_eq!(buf.data().len(), 3 * 2 * 4);
    /// assert!(buf.data().iter().all(|&b| b == 0));
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        let len = byte_len(width, height, CHANNELS).expect("pixel buffer size overflows usize");
        Self {
            data: vec![0; len],
            width,
            height,
        }
    }

    /// Normalizes externally decoded pixels into RGBA.
    ///
    /// - 1 channel: `v` becomes `(v, v, v, 255)`
    /// - 3 channels: `(r, g, b)` becomes `(r, g, b, 255)`
    /// - 4 channels: copied unchanged
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedChannelCount`] for any other channel count
    /// - [`Error::BufferSizeMismatch`] if `raw` is not exactly
    ///   `width * height * channels` bytes
    /// - [`Error::InvalidDimensions`] if that size overflows
    ///
    /// # Example
    ///
    /// ```rust
    /// use morph_core::{PixelBuffer, Rgba};
    ///
    /// let buf = PixelBuffer::ingest(2, 1, &[10, 20, 30, 40, 50, 60], 3).unwrap();
    /// assert_eq!(buf.pixel(0, 1), Rgba::new(40, 50, 60, 255));
    /// ```
    pub fn ingest(width: u32, height: u32, raw: &[u8], channels: usize) -> Result<Self> {
        if !matches!(channels, 1 | 3 | 4) {
            return Err(Error::UnsupportedChannelCount { channels });
        }
        let expected = byte_len(width, height, channels)
            .ok_or_else(|| Error::invalid_dimensions(width, height, "byte size overflows"))?;
        if raw.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                got: raw.len(),
            });
        }

        let data = match channels {
            1 => raw.iter().flat_map(|&v| [v, v, v, 255]).collect(),
            3 => raw
                .chunks_exact(3)
                .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255])
                .collect(),
            _ => raw.to_vec(),
        };

        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Wraps an RGBA byte vector without copying.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSizeMismatch`] if `data.len()` is not
    /// `4 * width * height`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height, CHANNELS)
            .ok_or_else(|| Error::invalid_dimensions(width, height, "byte size overflows"))?;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates a buffer with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Rgba) -> Self {
        let mut buf = Self::new(width, height);
        for chunk in buf.data.chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&pixel.to_array());
        }
        buf
    }

    /// Returns the width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the buffer has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the raw RGBA bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the raw RGBA bytes mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer and returns its RGBA bytes.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Number of bytes in one row.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    #[inline]
    fn offset(&self, row: u32, col: u32) -> usize {
        // A column past the edge would otherwise alias the next row.
        assert!(
            row < self.height && col < self.width,
            "pixel ({row}, {col}) out of bounds for {}x{}",
            self.width,
            self.height
        );
        (row as usize * self.width as usize + col as usize) * CHANNELS
    }

    /// Returns the pixel at `(row, col)`.
    #[inline]
    pub fn pixel(&self, row: u32, col: u32) -> Rgba {
        let offset = self.offset(row, col);
        Rgba::from_slice(&self.data[offset..offset + CHANNELS])
    }

    /// Returns the pixel at `(row, col)`, or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, row: u32, col: u32) -> Option<Rgba> {
        (row < self.height && col < self.width).then(|| self.pixel(row, col))
    }

    /// Sets the pixel at `(row, col)`.
    #[inline]
    pub fn set_pixel(&mut self, row: u32, col: u32, pixel: Rgba) {
        let offset = self.offset(row, col);
        self.data[offset..offset + CHANNELS].copy_from_slice(&pixel.to_array());
    }

    /// Returns one row of RGBA bytes.
    #[inline]
    pub fn row(&self, row: u32) -> &[u8] {
        debug_assert!(row < self.height, "row {row} out of bounds");
        let stride = self.row_stride();
        let start = row as usize * stride;
        &self.data[start..start + stride]
    }

    /// Returns one row of RGBA bytes mutably.
    #[inline]
    pub fn row_mut(&mut self, row: u32) -> &mut [u8] {
        debug_assert!(row < self.height, "row {row} out of bounds");
        let stride = self.row_stride();
        let start = row as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Iterates over `(row, col, pixel)` in memory order.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Rgba)> + '_ {
        (0..self.height)
            .flat_map(move |row| (0..self.width).map(move |col| (row, col, self.pixel(row, col))))
    }

    /// Returns a copy with the row order reversed.
    ///
    /// Row 0 of the result is row `height - 1` of `self`. The receiver is
    /// not modified; flipping twice gives back an identical buffer.
    pub fn flip_vertical(&self) -> Self {
        let stride = self.row_stride();
        let mut data = Vec::with_capacity(self.data.len());
        if stride > 0 {
            for row in self.data.chunks_exact(stride).rev() {
                data.extend_from_slice(row);
            }
        }
        Self {
            data,
            width: self.width,
            height: self.height,
        }
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

fn byte_len(width: u32, height: u32, channels: usize) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(channels)
}
