//! Raster - The RGBA image container
//!
//! The `Raster` structure holds the line art being segmented and the frames
//! produced by the fill engine.
//!
//! # Pixel layout
//!
//! - One `u32` per pixel, packed as `0xRRGGBBAA`
//! - Rows are stored bottom-up: row 0 is the bottom of the picture, so `y`
//!   increases upward
//!
//! # Ownership model
//!
//! `Raster` uses `Arc` for cheap cloning (shared ownership). To modify pixel
//! data, copy it into a `RasterMut` with [`Raster::to_mut`], then convert
//! back with `Into<Raster>`.

mod access;

use crate::color::Rgba;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Default pixels-per-unit scale for world-space transforms
pub const DEFAULT_PIXELS_PER_UNIT: f32 = 100.0;

/// Internal raster data
#[derive(Debug, Clone)]
struct RasterData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Pixels per world unit
    pixels_per_unit: f32,
    /// Packed pixels, bottom row first
    data: Vec<u32>,
}

impl RasterData {
    fn new(width: u32, height: u32, fill: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels_per_unit: DEFAULT_PIXELS_PER_UNIT,
            data: vec![fill; width as usize * height as usize],
        })
    }
}

/// Immutable RGBA raster
///
/// # Examples
///
/// ```
/// use sandfill_core::{Raster, Rgba};
///
/// let raster = Raster::new_filled(64, 32, Rgba::WHITE).unwrap();
/// assert_eq!(raster.width(), 64);
/// assert_eq!(raster.get_rgba(0, 0), Some(Rgba::WHITE));
/// ```
#[derive(Debug, Clone)]
pub struct Raster {
    inner: Arc<RasterData>,
}

impl Raster {
    /// Create a new raster with every pixel transparent black.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_filled(width, height, Rgba::TRANSPARENT)
    }

    /// Create a new raster with every pixel set to `color`.
    pub fn new_filled(width: u32, height: u32, color: Rgba) -> Result<Self> {
        Ok(Raster {
            inner: Arc::new(RasterData::new(width, height, color.to_pixel())?),
        })
    }

    /// Wrap packed `0xRRGGBBAA` pixels stored bottom row first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `data.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::DimensionMismatch {
                expected: (width, height),
                actual: (width, (data.len() / width as usize) as u32),
            });
        }
        Ok(Raster {
            inner: Arc::new(RasterData {
                width,
                height,
                pixels_per_unit: DEFAULT_PIXELS_PER_UNIT,
                data,
            }),
        })
    }

    /// Get the raster width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the raster height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixels-per-unit scale.
    #[inline]
    pub fn pixels_per_unit(&self) -> f32 {
        self.inner.pixels_per_unit
    }

    /// Get raw access to the packed pixels (bottom row first).
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Check if two rasters have the same width and height.
    pub fn sizes_equal(&self, other: &Raster) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Check whether `(x, y)` lies inside the raster.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.inner.width && y < self.inner.height
    }

    /// Convert a pixel coordinate to world space.
    ///
    /// The pivot sits at the raster center and one world unit spans
    /// [`Raster::pixels_per_unit`] pixels.
    pub fn pixel_to_world(&self, x: f32, y: f32) -> (f32, f32) {
        let ppu = self.inner.pixels_per_unit;
        let cx = self.inner.width as f32 / 2.0;
        let cy = self.inner.height as f32 / 2.0;
        ((x - cx) / ppu, (y - cy) / ppu)
    }

    /// Copy `src` into this raster in place when no other handle shares it.
    ///
    /// Returns `false` (leaving `self` untouched) when the data is shared or
    /// the sizes differ.
    pub(crate) fn overwrite_if_unique(&mut self, src: &RasterMut) -> bool {
        match Arc::get_mut(&mut self.inner) {
            Some(data) if data.width == src.inner.width && data.height == src.inner.height => {
                data.data.copy_from_slice(&src.inner.data);
                data.pixels_per_unit = src.inner.pixels_per_unit;
                true
            }
            _ => false,
        }
    }

    /// Create a mutable copy of this raster.
    pub fn to_mut(&self) -> RasterMut {
        RasterMut {
            inner: self.inner.as_ref().clone(),
        }
    }
}

/// Mutable raster
///
/// Allows modification of pixel data. Convert back to an immutable
/// [`Raster`] using `Into<Raster>`.
#[derive(Debug, Clone)]
pub struct RasterMut {
    inner: RasterData,
}

impl RasterMut {
    /// Create a new mutable raster filled with `color`.
    pub fn new_filled(width: u32, height: u32, color: Rgba) -> Result<Self> {
        Ok(RasterMut {
            inner: RasterData::new(width, height, color.to_pixel())?,
        })
    }

    /// Get the raster width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the raster height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixels-per-unit scale.
    #[inline]
    pub fn pixels_per_unit(&self) -> f32 {
        self.inner.pixels_per_unit
    }

    /// Set the pixels-per-unit scale.
    pub fn set_pixels_per_unit(&mut self, ppu: f32) {
        self.inner.pixels_per_unit = ppu;
    }

    /// Get raw access to the packed pixels.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to the packed pixels.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Rgba) {
        self.inner.data.fill(color.to_pixel());
    }

    /// Overwrite this raster's pixels with those of `src`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the sizes differ.
    pub fn copy_from(&mut self, src: &Raster) -> Result<()> {
        if src.width() != self.width() || src.height() != self.height() {
            return Err(Error::DimensionMismatch {
                expected: (self.width(), self.height()),
                actual: (src.width(), src.height()),
            });
        }
        self.inner.data.copy_from_slice(src.data());
        Ok(())
    }
}

impl From<RasterMut> for Raster {
    fn from(raster: RasterMut) -> Self {
        Raster {
            inner: Arc::new(raster.inner),
        }
    }
}
