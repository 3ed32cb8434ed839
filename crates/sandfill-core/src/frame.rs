//! Double-buffered output frame
//!
//! The fill engine writes into a staging raster and publishes it with
//! [`FrameBuffer::apply`]. Readers only ever see the published raster, which
//! is replaced wholesale, so a half-written frame is never observable.

use crate::color::Rgba;
use crate::error::Result;
use crate::raster::{Raster, RasterMut};

/// Staging + published raster pair with a single writer
#[derive(Debug)]
pub struct FrameBuffer {
    staging: RasterMut,
    front: Raster,
    generation: u64,
}

impl FrameBuffer {
    /// Create a frame buffer with both rasters cleared to `clear`.
    pub fn new(width: u32, height: u32, clear: Rgba) -> Result<Self> {
        let staging = RasterMut::new_filled(width, height, clear)?;
        let front = Raster::from(staging.clone());
        Ok(Self {
            staging,
            front,
            generation: 0,
        })
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.staging.width()
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.staging.height()
    }

    /// The raster being written.
    pub fn staging(&self) -> &RasterMut {
        &self.staging
    }

    /// Mutable access to the raster being written.
    pub fn staging_mut(&mut self) -> &mut RasterMut {
        &mut self.staging
    }

    /// The last published frame.
    ///
    /// Cloning the returned raster is cheap and keeps it alive across later
    /// applies.
    pub fn front(&self) -> &Raster {
        &self.front
    }

    /// Number of applies so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Publish the staging raster.
    ///
    /// Reuses the previous front allocation when no reader still holds it.
    pub fn apply(&mut self) {
        if !self.front.overwrite_if_unique(&self.staging) {
            self.front = Raster::from(self.staging.clone());
        }
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_invisible_until_apply() {
        let mut fb = FrameBuffer::new(4, 4, Rgba::BLACK).unwrap();
        fb.staging_mut().set_rgba(1, 1, Rgba::WHITE).unwrap();
        assert_eq!(fb.front().get_rgba(1, 1), Some(Rgba::BLACK));

        fb.apply();
        assert_eq!(fb.front().get_rgba(1, 1), Some(Rgba::WHITE));
        assert_eq!(fb.generation(), 1);
    }

    #[test]
    fn test_held_frame_is_not_mutated() {
        let mut fb = FrameBuffer::new(2, 2, Rgba::BLACK).unwrap();
        fb.apply();
        let held = fb.front().clone();

        fb.staging_mut().set_rgba(0, 0, Rgba::WHITE).unwrap();
        fb.apply();

        assert_eq!(held.get_rgba(0, 0), Some(Rgba::BLACK));
        assert_eq!(fb.front().get_rgba(0, 0), Some(Rgba::WHITE));
    }
}
