//! PNG raster support
//!
//! PNG stores rows top-first while [`Raster`] stores them bottom-first, so
//! both directions flip the row order.

use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use sandfill_core::{Raster, RasterMut, Rgba, color};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image into an RGBA raster.
///
/// Palette and sub-byte grayscale images are expanded to 8 bits; 16-bit
/// samples keep their high byte. Images without an alpha channel are opaque.
///
/// # Errors
///
/// Returns [`IoError::DecodeError`] if the stream is not a valid PNG and
/// [`IoError::UnsupportedFormat`] for color layouts that cannot be expanded.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let (color_type, bit_depth) = reader.output_color_type();

    let channels = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "unexpanded indexed PNG".to_string(),
            ));
        }
    };
    let bytes_per_sample = match bit_depth {
        BitDepth::Eight => 1,
        BitDepth::Sixteen => 2,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG bit depth after expansion: {:?}",
                other
            )));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let stride = channels * bytes_per_sample;

    let mut raster = RasterMut::new_filled(width, height, Rgba::TRANSPARENT)?;
    for row in 0..height {
        let row_start = row as usize * bytes_per_row;
        let y = height - 1 - row;
        for x in 0..width {
            let idx = row_start + x as usize * stride;
            // High byte of each sample
            let sample = |c: usize| data[idx + c * bytes_per_sample];
            let pixel = match channels {
                1 => {
                    let g = sample(0);
                    color::compose_rgba(g, g, g, 255)
                }
                2 => {
                    let g = sample(0);
                    color::compose_rgba(g, g, g, sample(1))
                }
                3 => color::compose_rgba(sample(0), sample(1), sample(2), 255),
                _ => color::compose_rgba(sample(0), sample(1), sample(2), sample(3)),
            };
            raster.set_pixel(x, y, pixel)?;
        }
    }

    Ok(raster.into())
}

/// Write a raster as an 8-bit RGBA PNG.
///
/// # Errors
///
/// Returns [`IoError::EncodeError`] if the encoder fails.
pub fn write_png<W: Write>(raster: &Raster, writer: W) -> IoResult<()> {
    let width = raster.width();
    let height = raster.height();

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let bytes_per_row = width as usize * 4;
    let mut data = vec![0u8; bytes_per_row * height as usize];
    for row in 0..height {
        let row_start = row as usize * bytes_per_row;
        let y = height - 1 - row;
        for x in 0..width {
            let (r, g, b, a) = color::extract_rgba(raster.get_pixel(x, y).unwrap_or(0));
            let idx = row_start + x as usize * 4;
            data[idx..idx + 4].copy_from_slice(&[r, g, b, a]);
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_keeps_orientation() {
        let mut rm = RasterMut::new_filled(3, 2, Rgba::WHITE).unwrap();
        rm.set_rgba(0, 0, Rgba::new(10, 20, 30, 40)).unwrap();
        rm.set_rgba(2, 1, Rgba::BLACK).unwrap();
        let raster: Raster = rm.into();

        let mut bytes = Vec::new();
        write_png(&raster, &mut bytes).unwrap();
        let back = read_png(Cursor::new(bytes)).unwrap();

        assert_eq!(back.width(), 3);
        assert_eq!(back.height(), 2);
        assert_eq!(back.data(), raster.data());
    }

    #[test]
    fn test_top_row_of_file_is_top_of_raster() {
        let mut bytes = Vec::new();
        {
            let mut encoder = Encoder::new(&mut bytes, 1, 2);
            encoder.set_color(ColorType::Grayscale);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            // File order: top row white, bottom row black
            writer.write_image_data(&[255, 0]).unwrap();
            writer.finish().unwrap();
        }
        let raster = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(raster.get_rgba(0, 1), Some(Rgba::WHITE));
        assert_eq!(raster.get_rgba(0, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn test_invalid_data() {
        assert!(read_png(Cursor::new(vec![0u8; 16])).is_err());
    }
}
