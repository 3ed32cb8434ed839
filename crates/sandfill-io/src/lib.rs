//! sandfill-io - Raster I/O for the sandfill coloring engine
//!
//! Loads line-art rasters and writes engine frames as images.
//!
//! # Supported formats
//!
//! - PNG (feature `png-format`, enabled by default)

mod error;
#[cfg(feature = "png-format")]
pub mod png;

pub use error::{IoError, IoResult};

use sandfill_core::Raster;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Read a raster from a file path.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] if the extension is not a
/// supported image format, or any decode error.
pub fn read_raster<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let path = path.as_ref();
    match extension(path).as_deref() {
        #[cfg(feature = "png-format")]
        Some("png") => {
            let file = File::open(path)?;
            png::read_png(BufReader::new(file))
        }
        other => Err(IoError::UnsupportedFormat(format!(
            "cannot read '{}' (extension {:?})",
            path.display(),
            other
        ))),
    }
}

/// Write a raster to a file path; the format follows the extension.
pub fn write_raster<P: AsRef<Path>>(raster: &Raster, path: P) -> IoResult<()> {
    let path = path.as_ref();
    match extension(path).as_deref() {
        #[cfg(feature = "png-format")]
        Some("png") => {
            let file = File::create(path)?;
            png::write_png(raster, BufWriter::new(file))
        }
        other => Err(IoError::UnsupportedFormat(format!(
            "cannot write '{}' (extension {:?})",
            path.display(),
            other
        ))),
    }
}

/// Encode a raster as PNG bytes.
#[cfg(feature = "png-format")]
pub fn write_png_mem(raster: &Raster) -> IoResult<Vec<u8>> {
    let mut bytes = Vec::new();
    png::write_png(raster, &mut bytes)?;
    Ok(bytes)
}

/// Decode a raster from PNG bytes.
#[cfg(feature = "png-format")]
pub fn read_png_mem(data: &[u8]) -> IoResult<Raster> {
    png::read_png(std::io::Cursor::new(data))
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
