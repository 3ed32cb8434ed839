//! sandfill-region - Region segmentation and border resolution
//!
//! This crate turns a line-art raster into a labeled partition:
//!
//! - **Pixel classification** - fillable paper, ink, or transparent background
//! - **Segmentation** - 4-connected flood fill of fillable pixels into regions
//! - **Border resolution** - grouping leftover ink into borders and handing
//!   border pixels to neighboring regions
//! - **Preview and persistence** - rendering and text serialization of the
//!   resulting lists
//!
//! # Examples
//!
//! ```
//! use sandfill_core::{RasterMut, Rgba};
//! use sandfill_region::{BorderOptions, SegmentOptions, resolve_borders, segment};
//!
//! // White square with a one-pixel black frame
//! let mut rm = RasterMut::new_filled(10, 10, Rgba::WHITE).unwrap();
//! for i in 0..10 {
//!     for (x, y) in [(i, 0), (i, 9), (0, i), (9, i)] {
//!         rm.set_rgba(x, y, Rgba::BLACK).unwrap();
//!     }
//! }
//! let raster = rm.into();
//!
//! let mut regions = segment(&raster, &SegmentOptions::default()).unwrap();
//! assert_eq!(regions[0].pixel_count(), 64);
//!
//! let options = BorderOptions::new().with_default_shrink(1.0);
//! let borders = resolve_borders(&raster, &mut regions, &options).unwrap();
//! assert!(borders.is_empty());
//! assert_eq!(regions[0].pixel_count(), 100);
//! ```

pub mod border;
pub mod classify;
pub mod error;
pub mod owner;
pub mod preview;
pub mod region;
pub mod segment;
pub mod serial;

// Re-export core types
pub use sandfill_core;

pub use border::{
    BorderOptions, detect_borders, redistribute_borders, remove_border_region, resolve_borders,
};
pub use classify::{ClassifierOptions, PixelClass, PixelClassifier};
pub use error::{RegionError, RegionResult};
pub use owner::{Owner, OwnerMap};
pub use preview::render_preview;
pub use region::{BorderRegion, Region};
pub use segment::{SegmentOptions, segment};
pub use serial::RegionSet;
