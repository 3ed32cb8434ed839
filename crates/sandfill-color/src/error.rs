//! Error types for sandfill-color

use thiserror::Error;

/// Errors that can occur during color operations
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] sandfill_core::Error),

    /// The palette has no entries to choose from
    #[error("palette is empty")]
    EmptyPalette,
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
