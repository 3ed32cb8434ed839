//! Region segmentation
//!
//! Flood-fills connected fillable pixels into [`Region`]s.
//!
//! # Scan order
//!
//! Seeds are taken row by row from the bottom row up, left to right within
//! a row. Region ids follow this discovery order, so the same raster always
//! yields the same ids.

use crate::classify::{ClassifierOptions, PixelClassifier};
use crate::error::RegionResult;
use crate::region::Region;
use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};
use sandfill_core::{Hsv, Point, Raster, Rgba};
use std::collections::VecDeque;

/// Options for segmentation
#[derive(Debug, Clone, Default)]
pub struct SegmentOptions {
    /// Pixel classification
    pub classifier: ClassifierOptions,
    /// Seed for the provisional region colors
    pub seed: u64,
}

impl SegmentOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set classifier options
    pub fn with_classifier(mut self, classifier: ClassifierOptions) -> Self {
        self.classifier = classifier;
        self
    }

    /// Set the color seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Segment a raster into fillable regions.
///
/// Every fillable pixel ends up in exactly one region, and each region is a
/// maximal 4-connected component. A raster with no fillable pixels yields
/// an empty list.
///
/// # Arguments
///
/// * `raster` - Line-art raster
/// * `options` - Classification and color seed
///
/// # Errors
///
/// Returns an error if the classifier options are invalid.
pub fn segment(raster: &Raster, options: &SegmentOptions) -> RegionResult<Vec<Region>> {
    let classifier = PixelClassifier::new(&options.classifier)?;
    let mut rng = StdRng::seed_from_u64(options.seed);

    let width = raster.width();
    let height = raster.height();
    let mut visited = vec![false; width as usize * height as usize];
    let mut regions = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let seed = Point::new(x, y);
            if visited[seed.index(width)] || !is_fillable(&classifier, raster, seed) {
                continue;
            }
            let pixels = flood_fill(&classifier, raster, seed, &mut visited);
            let id = regions.len() as u32;
            regions.push(Region::new(id, pixels, random_color(&mut rng)));
        }
    }

    log::info!(
        "segmented {}x{} raster into {} regions",
        width,
        height,
        regions.len()
    );
    Ok(regions)
}

fn is_fillable(classifier: &PixelClassifier, raster: &Raster, p: Point) -> bool {
    raster.get_at(p).is_some_and(|c| classifier.is_fillable(c))
}

/// BFS over 4-connected fillable pixels starting at `seed`.
fn flood_fill(
    classifier: &PixelClassifier,
    raster: &Raster,
    seed: Point,
    visited: &mut [bool],
) -> Vec<Point> {
    let (width, height) = (raster.width(), raster.height());
    let mut pixels = Vec::new();
    let mut queue = VecDeque::new();
    visited[seed.index(width)] = true;
    queue.push_back(seed);

    while let Some(p) = queue.pop_front() {
        pixels.push(p);
        for n in p.neighbors4(width, height) {
            let i = n.index(width);
            if !visited[i] && is_fillable(classifier, raster, n) {
                visited[i] = true;
                queue.push_back(n);
            }
        }
    }
    pixels
}

/// Uniform hue, saturation and value.
fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgba {
    let h: f32 = rng.random();
    let s: f32 = rng.random();
    let v: f32 = rng.random();
    Hsv::new(h, s, v).to_rgba()
}
