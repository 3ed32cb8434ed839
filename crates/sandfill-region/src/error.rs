//! Error types for sandfill-region

use thiserror::Error;

/// Errors that can occur during segmentation and border resolution
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] sandfill_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Segmentation found nothing to fill
    #[error("no fillable regions found")]
    NoRegions,

    /// A pixel coordinate lies outside the raster
    #[error("pixel ({x}, {y}) outside {width}x{height} grid")]
    PixelOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Malformed serialized region data
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Region data that the text format cannot represent
    #[error("encode error: {0}")]
    EncodeError(String),

    /// I/O error while reading or writing region data
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
