//! Error types for the sandfill umbrella crate

use thiserror::Error;

/// Errors from the preprocessing pipeline
#[derive(Debug, Error)]
pub enum SandfillError {
    /// A required input is missing or unusable
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("core error: {0}")]
    Core(#[from] sandfill_core::Error),

    #[error("region error: {0}")]
    Region(#[from] sandfill_region::RegionError),

    #[error("color error: {0}")]
    Color(#[from] sandfill_color::ColorError),

    #[error("fill error: {0}")]
    Fill(#[from] sandfill_fill::FillError),

    #[error("io error: {0}")]
    Io(#[from] sandfill_io::IoError),
}

/// Result type for pipeline operations
pub type SandfillResult<T> = Result<T, SandfillError>;
