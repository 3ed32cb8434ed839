//! sandfill-core - Basic data structures for the sandfill coloring engine
//!
//! This crate provides the fundamental data structures used throughout
//! the workspace:
//!
//! - [`Raster`] / [`RasterMut`] - The RGBA image container (immutable / mutable)
//! - [`Rgba`] / [`Hsv`] - Colors and conversions
//! - [`Point`] - Integer pixel coordinates with 4-connected neighborhoods
//! - [`FrameBuffer`] - Staging + published raster pair for per-tick output

pub mod color;
pub mod error;
pub mod frame;
pub mod point;
pub mod raster;

pub use color::{Hsv, Rgba, hsv_to_rgb, rgb_to_hsv};
pub use error::{Error, Result};
pub use frame::FrameBuffer;
pub use point::Point;
pub use raster::{DEFAULT_PIXELS_PER_UNIT, Raster, RasterMut};
