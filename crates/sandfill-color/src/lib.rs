//! sandfill-color - Palettes and color assignment for sandfill
//!
//! - **Palettes** ([`palette`]): the [`NamedPalette`] collaborator interface
//!   and the in-memory [`ColorLibrary`]
//! - **Assignment** ([`assign`]): snapping region colors to the nearest
//!   palette entry
//! - **Jitter** ([`jitter`]): per-grain color variation and lightening

pub mod assign;
pub mod error;
pub mod jitter;
pub mod palette;

// Re-export core types
pub use sandfill_core;

pub use assign::{assign_colors, assign_nearest_color, nearest_color};
pub use error::{ColorError, ColorResult};
pub use jitter::{lighten, vary_hsv, vary_rgb};
pub use palette::{ColorEntry, ColorLibrary, NamedPalette};
