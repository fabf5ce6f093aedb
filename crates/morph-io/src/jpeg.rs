//! JPEG reading and writing.
//!
//! Grayscale, RGB and CMYK JPEGs decode to RGBA with opaque alpha.
//! Output is baseline RGB; alpha is dropped.

use crate::{IoError, IoResult};
use morph_core::PixelBuffer;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::trace;

/// Encoder quality used by [`write`].
pub const DEFAULT_QUALITY: u8 = 90;

/// Reads a JPEG file into an RGBA buffer.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let file = File::open(path.as_ref())?;
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(file));
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    trace!(
        width = info.width,
        height = info.height,
        format = ?info.pixel_format,
        "jpeg decoded"
    );

    let (raw, channels) = match info.pixel_format {
        jpeg_decoder::PixelFormat::L8 => (pixels, 1),
        // Big-endian samples; the high byte is the 8-bit value.
        jpeg_decoder::PixelFormat::L16 => (pixels.chunks_exact(2).map(|l| l[0]).collect(), 1),
        jpeg_decoder::PixelFormat::RGB24 => (pixels, 3),
        jpeg_decoder::PixelFormat::CMYK32 => (cmyk_to_rgb(&pixels), 3),
    };

    Ok(PixelBuffer::ingest(
        u32::from(info.width),
        u32::from(info.height),
        &raw,
        channels,
    )?)
}

fn cmyk_to_rgb(cmyk: &[u8]) -> Vec<u8> {
    cmyk.chunks_exact(4)
        .flat_map(|px| {
            let k = 1.0 - f32::from(px[3]) / 255.0;
            let channel = |v: u8| ((1.0 - f32::from(v) / 255.0) * k * 255.0) as u8;
            [channel(px[0]), channel(px[1]), channel(px[2])]
        })
        .collect()
}

/// Writes a buffer as an RGB JPEG at [`DEFAULT_QUALITY`].
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    write_with_quality(path, image, DEFAULT_QUALITY)
}

/// Writes a buffer as an RGB JPEG at `quality` (1-100).
pub fn write_with_quality<P: AsRef<Path>>(
    path: P,
    image: &PixelBuffer,
    quality: u8,
) -> IoResult<()> {
    use jpeg_encoder::{ColorType, Encoder};

    let too_large = || {
        IoError::EncodeError(format!(
            "{}x{} exceeds the JPEG size limit",
            image.width(),
            image.height()
        ))
    };
    let width = u16::try_from(image.width()).map_err(|_| too_large())?;
    let height = u16::try_from(image.height()).map_err(|_| too_large())?;

    let rgb: Vec<u8> = image
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut buffer = Vec::new();
    Encoder::new(&mut buffer, quality)
        .encode(&rgb, width, height, ColorType::Rgb)
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

    std::fs::write(path.as_ref(), buffer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use morph_core::Rgba;

    #[test]
    fn test_roundtrip_flat_color() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.jpg");
        let image = PixelBuffer::filled(16, 16, Rgba::new(200, 120, 40, 77));

        write(&path, &image).unwrap();
        let loaded = read(&path).unwrap();

        assert_eq!(loaded.dimensions(), (16, 16));
        let px = loaded.pixel(8, 8);
        // Lossy: close, not exact. Alpha comes back opaque.
        assert!((i32::from(px.r) - 200).abs() <= 4, "r = {}", px.r);
        assert!((i32::from(px.g) - 120).abs() <= 4, "g = {}", px.g);
        assert!((i32::from(px.b) - 40).abs() <= 4, "b = {}", px.b);
        assert_eq!(px.a, 255);
    }

    #[test]
    fn test_cmyk_conversion() {
        assert_eq!(cmyk_to_rgb(&[0, 0, 0, 0]), vec![255, 255, 255]);
        assert_eq!(cmyk_to_rgb(&[0, 0, 0, 255]), vec![0, 0, 0]);
        assert_eq!(cmyk_to_rgb(&[255, 0, 255, 0]), vec![0, 255, 0]);
    }

    #[test]
    fn test_too_large_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let image = PixelBuffer::new(70_000, 1);
        let err = write(dir.path().join("wide.jpg"), &image).unwrap_err();
        assert!(matches!(err, IoError::EncodeError(_)));
    }
}
