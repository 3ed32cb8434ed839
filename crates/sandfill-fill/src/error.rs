//! Error types for sandfill-fill

use thiserror::Error;

/// Errors that can occur while building or driving the fill engine
#[derive(Debug, Error)]
pub enum FillError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] sandfill_core::Error),

    /// Invalid configuration values
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A region pixel lies outside the output frame
    #[error("region {region_id} has pixel ({x}, {y}) outside the {width}x{height} frame")]
    RegionOutOfBounds {
        region_id: u32,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Two regions share an id
    #[error("duplicate region id {0}")]
    DuplicateRegion(u32),
}

/// Result type for fill operations
pub type FillResult<T> = Result<T, FillError>;
