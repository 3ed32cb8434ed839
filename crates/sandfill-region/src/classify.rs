//! Pixel classification
//!
//! Decides whether a raster pixel is fillable paper, ink, or transparent
//! background.

use crate::error::{RegionError, RegionResult};
use sandfill_core::{Raster, Rgba};

/// Classification of a single pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelClass {
    /// Near-white opaque pixel that belongs to some region
    Fillable,
    /// Opaque non-white pixel (outline ink, shading)
    Ink,
    /// Transparent pixel, part of neither regions nor borders
    Background,
}

/// Options for pixel classification
#[derive(Debug, Clone)]
pub struct ClassifierOptions {
    /// Each of r, g, b (as a unit float) must exceed this to count as white
    pub white_threshold: f32,
    /// Pixels with alpha below this are background
    pub min_alpha: u8,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            white_threshold: 0.9,
            min_alpha: 128,
        }
    }
}

impl ClassifierOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the whiteness threshold
    pub fn with_white_threshold(mut self, threshold: f32) -> Self {
        self.white_threshold = threshold;
        self
    }

    /// Set the minimum opaque alpha
    pub fn with_min_alpha(mut self, min_alpha: u8) -> Self {
        self.min_alpha = min_alpha;
        self
    }

    /// Check that the threshold is a unit value.
    pub fn validate(&self) -> RegionResult<()> {
        if !(0.0..=1.0).contains(&self.white_threshold) {
            return Err(RegionError::InvalidParameters(format!(
                "white threshold {} outside [0, 1]",
                self.white_threshold
            )));
        }
        Ok(())
    }
}

/// Pure predicate over raster pixels
#[derive(Debug, Clone)]
pub struct PixelClassifier {
    white_threshold: f32,
    min_alpha: u8,
}

impl PixelClassifier {
    /// Build a classifier from validated options.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidParameters`] if the threshold is not in
    /// `[0, 1]`.
    pub fn new(options: &ClassifierOptions) -> RegionResult<Self> {
        options.validate()?;
        Ok(Self {
            white_threshold: options.white_threshold,
            min_alpha: options.min_alpha,
        })
    }

    /// Classify a color.
    pub fn classify(&self, color: Rgba) -> PixelClass {
        if color.a < self.min_alpha {
            PixelClass::Background
        } else if self.is_white(color) {
            PixelClass::Fillable
        } else {
            PixelClass::Ink
        }
    }

    /// Whether the color is fillable paper.
    #[inline]
    pub fn is_fillable(&self, color: Rgba) -> bool {
        self.classify(color) == PixelClass::Fillable
    }

    /// Whether the color is strict (transparent) background.
    #[inline]
    pub fn is_background(&self, color: Rgba) -> bool {
        color.a < self.min_alpha
    }

    /// Classify the pixel at `(x, y)`; out-of-bounds pixels are background.
    pub fn classify_at(&self, raster: &Raster, x: u32, y: u32) -> PixelClass {
        raster
            .get_rgba(x, y)
            .map_or(PixelClass::Background, |c| self.classify(c))
    }

    fn is_white(&self, color: Rgba) -> bool {
        let t = self.white_threshold;
        [color.r, color.g, color.b]
            .iter()
            .all(|&c| c as f32 / 255.0 > t)
    }
}

impl Default for PixelClassifier {
    fn default() -> Self {
        let options = ClassifierOptions::default();
        Self {
            white_threshold: options.white_threshold,
            min_alpha: options.min_alpha,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_defaults() {
        let c = PixelClassifier::default();
        assert_eq!(c.classify(Rgba::WHITE), PixelClass::Fillable);
        assert_eq!(c.classify(Rgba::BLACK), PixelClass::Ink);
        assert_eq!(c.classify(Rgba::TRANSPARENT), PixelClass::Background);
        // 230/255 = 0.902 passes, 229/255 = 0.898 does not
        assert!(c.is_fillable(Rgba::rgb(230, 230, 230)));
        assert!(!c.is_fillable(Rgba::rgb(255, 229, 255)));
    }

    #[test]
    fn test_transparent_white_is_background() {
        let c = PixelClassifier::default();
        assert_eq!(
            c.classify(Rgba::new(255, 255, 255, 10)),
            PixelClass::Background
        );
    }

    #[test]
    fn test_invalid_threshold() {
        let opts = ClassifierOptions::new().with_white_threshold(1.5);
        assert!(PixelClassifier::new(&opts).is_err());
    }
}
