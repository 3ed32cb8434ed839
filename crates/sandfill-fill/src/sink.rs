//! Frame presentation

use sandfill_core::Raster;

/// Receives published frames
///
/// `origin` is the world position of the frame center and
/// `pixels_per_unit` the scale from pixels to world units.
pub trait RenderSink {
    fn present(&mut self, frame: &Raster, origin: (f32, f32), pixels_per_unit: f32);
}

impl<F> RenderSink for F
where
    F: FnMut(&Raster, (f32, f32), f32),
{
    fn present(&mut self, frame: &Raster, origin: (f32, f32), pixels_per_unit: f32) {
        self(frame, origin, pixels_per_unit)
    }
}

/// Keeps the most recent frame
#[derive(Debug, Default)]
pub struct LatestFrame {
    frame: Option<Raster>,
    origin: (f32, f32),
    pixels_per_unit: f32,
    presents: usize,
}

impl LatestFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last frame presented, if any
    pub fn frame(&self) -> Option<&Raster> {
        self.frame.as_ref()
    }

    /// Origin of the last frame
    pub fn origin(&self) -> (f32, f32) {
        self.origin
    }

    /// Scale of the last frame
    pub fn pixels_per_unit(&self) -> f32 {
        self.pixels_per_unit
    }

    /// Number of frames presented
    pub fn presents(&self) -> usize {
        self.presents
    }
}

impl RenderSink for LatestFrame {
    fn present(&mut self, frame: &Raster, origin: (f32, f32), pixels_per_unit: f32) {
        self.frame = Some(frame.clone());
        self.origin = origin;
        self.pixels_per_unit = pixels_per_unit;
        self.presents += 1;
    }
}
