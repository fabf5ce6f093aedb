//! # morph-io
//!
//! File I/O for line morphing.
//!
//! - [`read`] / [`write`] - PNG and JPEG images as RGBA [`PixelBuffer`]s
//! - [`points`] - guide point files (`x y` per line)
//! - [`params`] - `a b p` parameter files
//! - [`naming`] - `.dat` companions and numbered frame names
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use morph_io::{read, write};
//!
//! let image = read("face.jpg")?;
//! write("face.png", &image.flip_vertical())?;
//! ```

#![warn(missing_docs)]

mod error;
pub mod detect;
pub mod naming;
pub mod params;
pub mod points;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

pub use detect::Format;
pub use error::{IoError, IoResult};
pub use naming::{frame_path, lines_path_for};
pub use params::read_params;
pub use points::{read_points, write_points};

use morph_core::PixelBuffer;
use std::path::Path;
use tracing::debug;

/// Reads an image, detecting the format from magic bytes or extension.
///
/// # Errors
///
/// - [`IoError::UnsupportedFormat`] for anything but PNG and JPEG
/// - [`IoError::Io`] / [`IoError::DecodeError`] from the codec
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    let format = Format::detect(path)?;

    let image = match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path)?,

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path)?,

        _ => return Err(unsupported(path)),
    };

    debug!(
        path = %path.display(),
        ?format,
        width = image.width(),
        height = image.height(),
        "image loaded"
    );
    Ok(image)
}

/// Writes an image, choosing the format from the extension.
///
/// # Errors
///
/// - [`IoError::UnsupportedFormat`] for extensions other than png/jpg/jpeg
/// - [`IoError::Io`] / [`IoError::EncodeError`] from the codec
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::write(path, image)?,

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::write(path, image)?,

        _ => return Err(unsupported(path)),
    }

    debug!(path = %path.display(), ?format, "image written");
    Ok(())
}

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use morph_core::Rgba;

    #[test]
    fn test_unknown_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let image = PixelBuffer::new(2, 2);
        let err = write(dir.path().join("out.bmp"), &image).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(ref ext) if ext == "bmp"));
    }

    #[test]
    fn test_read_unknown_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();
        assert!(matches!(read(&path), Err(IoError::UnsupportedFormat(_))));
    }

    #[cfg(feature = "png")]
    #[test]
    fn test_dispatch_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.png");
        let image = PixelBuffer::filled(3, 2, Rgba::new(9, 8, 7, 6));
        write(&path, &image).unwrap();
        assert_eq!(read(&path).unwrap(), image);
    }

    #[cfg(feature = "jpeg")]
    #[test]
    fn test_dispatch_jpeg_by_magic() {
        let dir = tempfile::tempdir().unwrap();
        let jpg = dir.path().join("img.jpg");
        let image = PixelBuffer::filled(8, 8, Rgba::gray(128));
        write(&jpg, &image).unwrap();

        // Renamed to a misleading extension; magic bytes still say JPEG.
        let renamed = dir.path().join("img.png");
        std::fs::rename(&jpg, &renamed).unwrap();
        assert_eq!(read(&renamed).unwrap().dimensions(), (8, 8));
    }
}
