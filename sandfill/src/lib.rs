//! Sandfill - Coloring-book segmentation and sand fill engine
//!
//! Sandfill turns line art into fillable regions and animates filling them
//! with color.
//!
//! # Overview
//!
//! - Segmentation of near-white paper into 4-connected regions
//! - Border resolution: outline ink grouped into borders that can shrink
//!   under neighboring fills
//! - Palette assignment of region colors
//! - A tick-driven fill engine with an eased reveal and a falling-grain
//!   automaton, unlock gating and piece quotas
//! - PNG input and output
//!
//! # Example
//!
//! ```
//! use sandfill::color::ColorLibrary;
//! use sandfill::fill::FillConfig;
//! use sandfill::pipeline::{PipelineOptions, prepare};
//! use sandfill::{RasterMut, Rgba};
//!
//! let mut rm = RasterMut::new_filled(8, 8, Rgba::WHITE).unwrap();
//! for i in 0..8 {
//!     for (x, y) in [(i, 0), (i, 7), (0, i), (7, i)] {
//!         rm.set_rgba(x, y, Rgba::BLACK).unwrap();
//!     }
//! }
//! let raster = rm.into();
//!
//! let prepared = prepare(&raster, &ColorLibrary::with_defaults(), &PipelineOptions::default())
//!     .unwrap();
//! let mut engine = prepared.into_engine(Some(&raster), FillConfig::default()).unwrap();
//! engine.request_fill(0, 1.0);
//! for _ in 0..180 {
//!     engine.tick(1.0 / 60.0);
//! }
//! assert!(engine.is_complete(0));
//! ```

pub mod error;
pub mod logging;
pub mod pipeline;

// Re-export core types (primary data structures used everywhere)
pub use sandfill_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use sandfill_color as color;
pub use sandfill_fill as fill;
pub use sandfill_io as io;
pub use sandfill_region as region;

pub use error::{SandfillError, SandfillResult};
pub use pipeline::{Pipeline, PipelineOptions, Prepared, prepare};
