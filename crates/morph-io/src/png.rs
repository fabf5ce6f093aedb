//! PNG reading and writing.
//!
//! Reads any PNG the `png` crate decodes: palette and low bit depths are
//! expanded, 16-bit samples are stripped to 8 bits, and gray or
//! gray-alpha is widened to RGBA. Writes 8-bit RGBA.

use crate::{IoError, IoResult};
use morph_core::PixelBuffer;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::trace;

/// Reads a PNG file into an RGBA buffer.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let file = File::open(path.as_ref())?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    buf.truncate(info.buffer_size());

    trace!(
        width = info.width,
        height = info.height,
        color = ?info.color_type,
        "png decoded"
    );

    let (raw, channels) = match (info.color_type, info.bit_depth) {
        (png::ColorType::Grayscale, png::BitDepth::Eight) => (buf, 1),
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => {
            let rgba = buf
                .chunks_exact(2)
                .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                .collect();
            (rgba, 4)
        }
        (png::ColorType::Rgb, png::BitDepth::Eight) => (buf, 3),
        (png::ColorType::Rgba, png::BitDepth::Eight) => (buf, 4),
        (color_type, bit_depth) => {
            return Err(IoError::DecodeError(format!(
                "unsupported PNG layout {color_type:?} {bit_depth:?}"
            )));
        }
    };

    Ok(PixelBuffer::ingest(info.width, info.height, &raw, channels)?)
}

/// Writes an RGBA buffer as an 8-bit RGBA PNG.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(image.data())
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use morph_core::Rgba;

    fn encode_raw(path: &Path, width: u32, height: u32, color: png::ColorType, data: &[u8]) {
        let file = File::create(path).unwrap();
        let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn test_roundtrip_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        let mut image = PixelBuffer::new(5, 3);
        for row in 0..3 {
            for col in 0..5 {
                image.set_pixel(row, col, Rgba::new((col * 50) as u8, (row * 80) as u8, 7, 200));
            }
        }

        write(&path, &image).unwrap();
        assert_eq!(read(&path).unwrap(), image);
    }

    #[test]
    fn test_gray_is_widened() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        encode_raw(&path, 2, 1, png::ColorType::Grayscale, &[10, 240]);

        let image = read(&path).unwrap();
        assert_eq!(image.pixel(0, 0), Rgba::gray(10));
        assert_eq!(image.pixel(0, 1), Rgba::gray(240));
    }

    #[test]
    fn test_gray_alpha_keeps_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ga.png");
        encode_raw(&path, 1, 1, png::ColorType::GrayscaleAlpha, &[90, 17]);

        let image = read(&path).unwrap();
        assert_eq!(image.pixel(0, 0), Rgba::new(90, 90, 90, 17));
    }

    #[test]
    fn test_rgb_gets_opaque_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        encode_raw(&path, 1, 1, png::ColorType::Rgb, &[1, 2, 3]);

        assert_eq!(read(&path).unwrap().pixel(0, 0), Rgba::opaque(1, 2, 3));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"not a png at all").unwrap();
        assert!(matches!(read(&path), Err(IoError::DecodeError(_))));
    }
}
