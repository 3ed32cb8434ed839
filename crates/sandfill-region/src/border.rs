//! Border resolution
//!
//! Everything that is neither a region pixel nor transparent background is
//! grouped into [`BorderRegion`]s (typically the ink outlines). Border
//! pixels close to a region can then be handed to that region so outlines
//! shrink under the fill.
//!
//! # Shrink rule
//!
//! For a border with effective shrink `s`, let `max_d` be the largest hop
//! distance (capped) from any of its pixels to a region. Pixels are visited
//! in the border's discovery order; a pixel whose current distance is at
//! most `max_d * s` joins the region that owns most of its 4-neighbors, or
//! the nearest region if none is adjacent. A reassigned pixel counts as
//! region for the pixels visited after it, so the result depends on visit
//! order.

use crate::classify::{ClassifierOptions, PixelClassifier};
use crate::error::{RegionError, RegionResult};
use crate::owner::{Owner, OwnerMap};
use crate::region::{BorderRegion, Region};
use sandfill_core::{Point, Raster, Rgba};
use std::collections::{HashMap, HashSet, VecDeque};

/// Options for border detection and redistribution
#[derive(Debug, Clone)]
pub struct BorderOptions {
    /// Pixel classification, shared with segmentation
    pub classifier: ClassifierOptions,
    /// Shrink amount given to newly detected borders
    pub default_shrink: f32,
    /// Global floor applied to every border's shrink amount
    pub min_shrink: f32,
    /// Cap on the hop distance search
    pub max_distance: u32,
}

impl Default for BorderOptions {
    fn default() -> Self {
        Self {
            classifier: ClassifierOptions::default(),
            default_shrink: 0.0,
            min_shrink: 0.0,
            max_distance: 50,
        }
    }
}

impl BorderOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set classifier options
    pub fn with_classifier(mut self, classifier: ClassifierOptions) -> Self {
        self.classifier = classifier;
        self
    }

    /// Set the shrink amount of newly detected borders
    pub fn with_default_shrink(mut self, shrink: f32) -> Self {
        self.default_shrink = shrink;
        self
    }

    /// Set the global minimum shrink
    pub fn with_min_shrink(mut self, shrink: f32) -> Self {
        self.min_shrink = shrink;
        self
    }

    /// Set the distance search cap
    pub fn with_max_distance(mut self, max_distance: u32) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Check shrink amounts and the distance cap.
    pub fn validate(&self) -> RegionResult<()> {
        for (name, v) in [
            ("default_shrink", self.default_shrink),
            ("min_shrink", self.min_shrink),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(RegionError::InvalidParameters(format!(
                    "{} {} outside [0, 1]",
                    name, v
                )));
            }
        }
        if self.max_distance == 0 {
            return Err(RegionError::InvalidParameters(
                "max_distance must be positive".to_string(),
            ));
        }
        self.classifier.validate()
    }
}

/// Detect borders and redistribute them into `regions`.
///
/// Returns the borders that still own pixels afterwards. Original region
/// pixels are never moved.
///
/// # Errors
///
/// Returns an error if the options are invalid or a region pixel lies
/// outside the raster.
pub fn resolve_borders(
    raster: &Raster,
    regions: &mut [Region],
    options: &BorderOptions,
) -> RegionResult<Vec<BorderRegion>> {
    let mut borders = detect_borders(raster, regions, options)?;
    redistribute_borders(
        raster.width(),
        raster.height(),
        regions,
        &mut borders,
        options,
    )?;
    Ok(borders)
}

/// Flood-fill every unclaimed, non-background pixel into borders.
///
/// Seeds follow the same row-major scan as segmentation. A border's color
/// is the raster color at its seed pixel.
pub fn detect_borders(
    raster: &Raster,
    regions: &[Region],
    options: &BorderOptions,
) -> RegionResult<Vec<BorderRegion>> {
    options.validate()?;
    let classifier = PixelClassifier::new(&options.classifier)?;
    let (width, height) = (raster.width(), raster.height());
    let owners = OwnerMap::from_parts(width, height, regions, &[])?;

    let claimable = |p: Point| {
        owners.get(p) == Owner::Unowned
            && !classifier.is_background(raster.get_at(p).unwrap_or(Rgba::TRANSPARENT))
    };

    let mut visited = vec![false; width as usize * height as usize];
    let mut borders = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let seed = Point::new(x, y);
            if visited[seed.index(width)] || !claimable(seed) {
                continue;
            }
            let mut pixels = Vec::new();
            let mut queue = VecDeque::new();
            visited[seed.index(width)] = true;
            queue.push_back(seed);
            while let Some(p) = queue.pop_front() {
                pixels.push(p);
                for n in p.neighbors4(width, height) {
                    let i = n.index(width);
                    if !visited[i] && claimable(n) {
                        visited[i] = true;
                        queue.push_back(n);
                    }
                }
            }
            borders.push(BorderRegion {
                name: format!("Border {}", borders.len() + 1),
                pixels,
                color: raster.get_at(seed).unwrap_or(Rgba::BLACK),
                shrink_amount: options.default_shrink,
            });
        }
    }

    log::debug!("detected {} border components", borders.len());
    Ok(borders)
}

/// Hand border pixels to neighboring regions according to each border's
/// shrink amount.
///
/// The effective shrink of a border is the larger of its own
/// `shrink_amount` and `options.min_shrink`. Borders left with no pixels
/// are removed from the list.
///
/// # Returns
///
/// The number of pixels reassigned.
pub fn redistribute_borders(
    width: u32,
    height: u32,
    regions: &mut [Region],
    borders: &mut Vec<BorderRegion>,
    options: &BorderOptions,
) -> RegionResult<usize> {
    options.validate()?;
    let mut owners = OwnerMap::from_parts(width, height, regions, borders)?;
    let mut total = 0;

    for b in 0..borders.len() {
        let shrink = borders[b].shrink_amount.max(options.min_shrink).clamp(0.0, 1.0);
        if shrink <= 0.0 || borders[b].pixels.is_empty() {
            continue;
        }

        let distances = border_distances(&owners, b, &borders[b].pixels, options.max_distance);
        let max_d = distances.iter().copied().max().unwrap_or(0);
        let limit = (max_d as f32 * shrink).floor() as u32;
        if limit == 0 {
            continue;
        }

        let pixels = std::mem::take(&mut borders[b].pixels);
        let mut kept = Vec::new();
        let mut moved = 0;
        for p in pixels {
            match nearest_region(&owners, p, b, limit) {
                Some(r) => {
                    owners.set(p, Owner::Region(r));
                    regions[r].pixels.push(p);
                    moved += 1;
                }
                None => kept.push(p),
            }
        }
        log::debug!(
            "{}: reassigned {} of {} pixels (shrink {:.2}, max distance {})",
            borders[b].name,
            moved,
            moved + kept.len(),
            shrink,
            max_d
        );
        borders[b].pixels = kept;
        total += moved;
    }

    borders.retain(|b| !b.pixels.is_empty());
    Ok(total)
}

/// Reassign every pixel of one border to adjacent regions and drop it.
///
/// Pixels join the region owning most of their 4-neighbors; passes repeat
/// until every pixel is placed. Distance and shrink are ignored.
///
/// # Returns
///
/// `false` (nothing changed) if `border_id` is out of range or the border
/// cannot reach any region.
pub fn remove_border_region(
    width: u32,
    height: u32,
    regions: &mut [Region],
    borders: &mut Vec<BorderRegion>,
    border_id: usize,
) -> bool {
    if border_id >= borders.len() {
        log::warn!(
            "border {} does not exist ({} borders)",
            border_id,
            borders.len()
        );
        return false;
    }
    let mut owners = match OwnerMap::from_parts(width, height, regions, borders) {
        Ok(owners) => owners,
        Err(e) => {
            log::warn!("cannot remove border {}: {}", border_id, e);
            return false;
        }
    };

    let mut pending = borders[border_id].pixels.clone();
    let mut assignments: Vec<(Point, usize)> = Vec::with_capacity(pending.len());
    while !pending.is_empty() {
        let before = assignments.len();
        let mut rest = Vec::new();
        for p in pending {
            match owners.majority_region(p) {
                Some(r) => {
                    owners.set(p, Owner::Region(r));
                    assignments.push((p, r));
                }
                None => rest.push(p),
            }
        }
        pending = rest;
        if assignments.len() == before {
            break;
        }
    }

    if !pending.is_empty() {
        log::warn!(
            "{}: {} pixels have no path to a region, border kept",
            borders[border_id].name,
            pending.len()
        );
        return false;
    }

    for (p, r) in assignments {
        regions[r].pixels.push(p);
    }
    let removed = borders.remove(border_id);
    log::info!(
        "removed {} ({} pixels redistributed)",
        removed.name,
        removed.pixels.len()
    );
    true
}

/// Hop distance from each border pixel to the nearest region pixel, capped.
///
/// Borders are maximal components, so any path out of a border enters a
/// region or background; the search stays inside the border.
fn border_distances(owners: &OwnerMap, b: usize, pixels: &[Point], cap: u32) -> Vec<u32> {
    let mut dist: HashMap<Point, u32> = HashMap::with_capacity(pixels.len());
    let mut queue = VecDeque::new();
    for &p in pixels {
        if owners
            .neighbors(p)
            .any(|n| matches!(owners.get(n), Owner::Region(_)))
        {
            dist.insert(p, 1);
            queue.push_back(p);
        }
    }
    while let Some(p) = queue.pop_front() {
        let d = dist.get(&p).copied().unwrap_or(cap);
        if d >= cap {
            continue;
        }
        for n in owners.neighbors(p) {
            if owners.get(n) == Owner::Border(b) && !dist.contains_key(&n) {
                dist.insert(n, d + 1);
                queue.push_back(n);
            }
        }
    }
    pixels
        .iter()
        .map(|p| dist.get(p).copied().unwrap_or(cap).min(cap))
        .collect()
}

/// The region a border pixel should join if one lies within `limit` hops.
fn nearest_region(owners: &OwnerMap, start: Point, b: usize, limit: u32) -> Option<usize> {
    if let Some(r) = owners.majority_region(start) {
        return Some(r);
    }
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([(start, 0u32)]);
    while let Some((p, d)) = queue.pop_front() {
        for n in owners.neighbors(p) {
            match owners.get(n) {
                Owner::Region(r) => return Some(r),
                Owner::Border(other) if other == b && d + 1 < limit && seen.insert(n) => {
                    queue.push_back((n, d + 1));
                }
                _ => {}
            }
        }
    }
    None
}
