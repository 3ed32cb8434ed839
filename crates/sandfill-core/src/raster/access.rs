//! Pixel access functions
//!
//! Bounds-checked getters and setters for individual pixels. Coordinates
//! use the bottom-left origin of [`Raster`].

use super::{Raster, RasterMut};
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::point::Point;

impl Raster {
    /// Get a packed pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if !self.contains(x, y) {
            return None;
        }
        Some(self.inner.data[(y as usize) * (self.inner.width as usize) + x as usize])
    }

    /// Get the color at (x, y).
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<Rgba> {
        self.get_pixel(x, y).map(Rgba::from_pixel)
    }

    /// Get the color at a point.
    pub fn get_at(&self, p: Point) -> Option<Rgba> {
        self.get_rgba(p.x, p.y)
    }
}

impl RasterMut {
    /// Get a packed pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.inner.data[(y as usize) * (self.inner.width as usize) + x as usize])
    }

    /// Get the color at (x, y).
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<Rgba> {
        self.get_pixel(x, y).map(Rgba::from_pixel)
    }

    /// Set a packed pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::PixelOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        let (width, height) = (self.inner.width, self.inner.height);
        if x >= width || y >= height {
            return Err(Error::PixelOutOfBounds {
                x,
                y,
                width,
                height,
            });
        }
        self.inner.data[(y as usize) * (width as usize) + x as usize] = val;
        Ok(())
    }

    /// Set the color at (x, y).
    pub fn set_rgba(&mut self, x: u32, y: u32, color: Rgba) -> Result<()> {
        self.set_pixel(x, y, color.to_pixel())
    }

    /// Set the color at a point.
    pub fn set_at(&mut self, p: Point, color: Rgba) -> Result<()> {
        self.set_rgba(p.x, p.y, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_roundtrip() {
        let mut rm = RasterMut::new_filled(4, 3, Rgba::BLACK).unwrap();
        rm.set_rgba(3, 2, Rgba::rgb(1, 2, 3)).unwrap();
        let raster: Raster = rm.into();
        assert_eq!(raster.get_rgba(3, 2), Some(Rgba::rgb(1, 2, 3)));
        // Row 2 is the top row; storage is bottom-up
        assert_eq!(raster.data()[2 * 4 + 3], Rgba::rgb(1, 2, 3).to_pixel());
    }

    #[test]
    fn test_out_of_bounds() {
        let mut rm = RasterMut::new_filled(4, 3, Rgba::BLACK).unwrap();
        assert!(rm.set_rgba(4, 0, Rgba::WHITE).is_err());
        assert!(rm.get_pixel(0, 3).is_none());
        let raster: Raster = rm.into();
        assert!(raster.get_at(Point::new(9, 9)).is_none());
    }
}
